//! Adaptive ARC state: target sizes p/q, partition sizes, CLOCK hands, and
//! the four ghost lists.

use crate::ghost::GhostList;
use crate::policy::Policy;

#[derive(Debug, Clone)]
pub struct ArcState {
    pub p: u64,
    pub q: u64,
    pub t1_size: u64,
    pub t2_size: u64,
    pub t3_size: u64,
    pub t4_size: u64,
    pub p_hand: usize,
    pub q_hand: usize,
    pub b1: GhostList,
    pub b2: GhostList,
    pub b3: GhostList,
    pub b4: GhostList,
}

impl ArcState {
    pub fn new(n: usize, policy: Policy) -> ArcState {
        let mut s = ArcState {
            p: 0,
            q: 0,
            t1_size: 0,
            t2_size: 0,
            t3_size: 0,
            t4_size: 0,
            p_hand: 0,
            q_hand: 0,
            b1: GhostList::new(),
            b2: GhostList::new(),
            b3: GhostList::new(),
            b4: GhostList::new(),
        };
        s.reset_targets(policy, n);
        s
    }

    /// Clear p, q, partition sizes, CLOCK hands, and all four ghost lists,
    /// then recompute the new policy's initial targets. Used on a full
    /// reset (any policy-switch transition other than the LRU<->LRU-ARC /
    /// LFU<->LFU-ARC pairs), per SPEC_FULL.md 4.6 step 2.
    pub fn full_reset(&mut self, policy: Policy, n: usize) {
        self.p = 0;
        self.q = 0;
        self.t1_size = 0;
        self.t2_size = 0;
        self.t3_size = 0;
        self.t4_size = 0;
        self.p_hand = 0;
        self.q_hand = 0;
        self.b1.clear();
        self.b2.clear();
        self.b3.clear();
        self.b4.clear();
        self.reset_targets(policy, n);
    }

    /// Recompute just the initial target partition sizes (p/q) for a newly
    /// activated policy, per the original simulator's
    /// `initialize_arc_state` per-policy branch. Does not touch ghost
    /// lists or partition sizes, and does not itself zero p/q — used both
    /// on a full reset (where the caller has already zeroed p/q) and to
    /// preserve ghosts and p/q on the carry-over transitions, where only
    /// the hands are cleared and targets are recomputed.
    pub fn reset_targets(&mut self, policy: Policy, n: usize) {
        let n = n as u64;
        match policy {
            Policy::ClockT1 => {
                self.p = n;
            }
            Policy::ClockT3 => {
                self.q = n;
            }
            Policy::ClockProT1B4LogsB2 => {
                self.p = n / 2;
            }
            Policy::ClockProT3B2LogsB4 => {
                self.q = n / 2;
            }
            Policy::Fifo | Policy::Lru | Policy::Lfu | Policy::LruArc | Policy::LfuArc => {
                // Unpartitioned / shadow-only / carried-over policies:
                // leave p/q as they are (zero on a full reset, preserved
                // on a carry-over transition).
            }
        }
    }

    /// Reset just the CLOCK hands (used on policy switch regardless of
    /// carry-over, per SPEC_FULL.md 4.6 step 4).
    pub fn reset_hands(&mut self) {
        self.p_hand = 0;
        self.q_hand = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_t1_initial_target_is_full_buffer() {
        let s = ArcState::new(10, Policy::ClockT1);
        assert_eq!(s.p, 10);
        assert_eq!(s.q, 0);
    }

    #[test]
    fn clock_pro_t1_initial_target_is_half_buffer() {
        let s = ArcState::new(10, Policy::ClockProT1B4LogsB2);
        assert_eq!(s.p, 5);
    }

    #[test]
    fn full_reset_clears_ghosts_and_sizes() {
        let mut s = ArcState::new(4, Policy::LruArc);
        s.b1.add_mru(1, 4);
        s.t1_size = 2;
        s.full_reset(Policy::Fifo, 4);
        assert_eq!(s.b1.len(), 0);
        assert_eq!(s.t1_size, 0);
    }

    #[test]
    fn full_reset_zeroes_p_and_q_even_when_not_recomputed() {
        // CLOCK_T1 sets p = N; switching away to a policy that never
        // touches p (a non-carry-over transition) must still leave p at 0,
        // not at its stale CLOCK_T1 value.
        let mut s = ArcState::new(10, Policy::ClockT1);
        assert_eq!(s.p, 10);
        s.full_reset(Policy::Lru, 10);
        assert_eq!(s.p, 0);
        assert_eq!(s.q, 0);
    }
}
