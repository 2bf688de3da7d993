//! Bounded, MRU-ordered ghost lists (B1..B4).

use std::collections::VecDeque;

/// A capacity-bounded sequence of page ids, MRU at the back. Used for the
/// four ARC ghost lists, which under the CLOCK-Pro policies are repurposed
/// as "history" or "log" lists rather than pure ghosts (see
/// `Engine`/`SPEC_FULL.md` §9 for the documented overlap-with-resident-set
/// exception on the log lists).
#[derive(Debug, Clone, Default)]
pub struct GhostList {
    entries: VecDeque<u64>,
}

impl GhostList {
    pub fn new() -> GhostList {
        GhostList {
            entries: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, page_id: u64) -> bool {
        self.entries.contains(&page_id)
    }

    /// Remove `page_id` if present, shifting remaining entries left.
    pub fn remove(&mut self, page_id: u64) {
        if let Some(pos) = self.entries.iter().position(|&p| p == page_id) {
            self.entries.remove(pos);
        }
    }

    /// Remove any prior occurrence of `page_id`, then append at the MRU end.
    /// If the list would exceed `cap`, drop from the LRU (front) end.
    pub fn add_mru(&mut self, page_id: u64, cap: usize) {
        self.remove(page_id);
        self.entries.push_back(page_id);
        while self.entries.len() > cap {
            self.entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_mru_respects_capacity() {
        let mut g = GhostList::new();
        g.add_mru(1, 2);
        g.add_mru(2, 2);
        g.add_mru(3, 2);
        assert_eq!(g.len(), 2);
        assert!(!g.contains(1));
        assert!(g.contains(2));
        assert!(g.contains(3));
    }

    #[test]
    fn add_mru_moves_existing_entry_to_back() {
        let mut g = GhostList::new();
        g.add_mru(1, 3);
        g.add_mru(2, 3);
        g.add_mru(1, 3);
        assert_eq!(g.len(), 2);
        // 1 is now MRU; evicting at cap=1 should keep 1, drop 2.
        g.add_mru(3, 2);
        assert!(g.contains(1));
        assert!(g.contains(3));
        assert!(!g.contains(2));
    }

    #[test]
    fn remove_is_noop_on_missing_entry() {
        let mut g = GhostList::new();
        g.add_mru(1, 4);
        g.remove(99);
        assert_eq!(g.len(), 1);
    }
}
