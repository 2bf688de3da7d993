//! Victim-selection primitives shared by the policy engine.

use crate::frame::FrameTable;
use crate::policy::Partition;

/// Smallest `load_time` among resident frames.
pub fn evict_fifo(table: &FrameTable) -> Option<usize> {
    table
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.is_empty())
        .min_by_key(|(_, f)| f.load_time)
        .map(|(i, _)| i)
}

/// Smallest `last_access_time` among resident frames in `target`.
pub fn evict_internal_lru(table: &FrameTable, target: Partition) -> Option<usize> {
    table
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.is_empty() && f.list_type == target)
        .min_by_key(|(_, f)| f.last_access_time)
        .map(|(i, _)| i)
}

/// Smallest `access_count` among resident frames in `target`, ties broken by
/// smaller `load_time`.
pub fn evict_internal_lfu(table: &FrameTable, target: Partition) -> Option<usize> {
    table
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.is_empty() && f.list_type == target)
        .min_by_key(|(_, f)| (f.access_count, f.load_time))
        .map(|(i, _)| i)
}

/// CLOCK sweep starting at `hand`. `filter` restricts the ring to frames in
/// `target` (used by the CLOCK-Pro partitioned sweeps); pass `Partition::None`
/// with `filter = false` for the unpartitioned CLOCK-T1/T3 sweep over all
/// resident frames.
///
/// Makes at most two passes clearing reference bits, then a third pass that
/// ignores the reference bit entirely, then falls back to FIFO. This
/// guarantees termination even when every matching frame is referenced.
/// Returns `(victim_index, new_hand, used_fallback)`.
pub fn evict_clock(
    table: &mut FrameTable,
    hand: usize,
    filter: bool,
    target: Partition,
) -> Option<(usize, usize, bool)> {
    let n = table.len();
    if n == 0 {
        return None;
    }
    let matches = |f: &crate::frame::Frame| !f.is_empty() && (!filter || f.list_type == target);

    // Two reference-clearing passes: a referenced frame the hand passes
    // over has its ref_bit cleared and gets a second chance.
    for _pass in 0..2 {
        let mut h = hand;
        for _ in 0..n {
            if matches(table.get(h)) {
                if table.get(h).ref_bit {
                    table.get_mut(h).ref_bit = false;
                } else {
                    return Some((h, (h + 1) % n, false));
                }
            }
            h = (h + 1) % n;
        }
    }

    // Forced-evict pass, ignoring ref bit.
    let mut h = hand;
    for _ in 0..n {
        if matches(table.get(h)) {
            return Some((h, (h + 1) % n, false));
        }
        h = (h + 1) % n;
    }

    // Final fallback: plain FIFO across all resident frames.
    evict_fifo(table).map(|i| (i, hand, true))
}
