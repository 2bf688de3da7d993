//! The fixed-size buffer frame table.

use crate::policy::Partition;

pub const INVALID_PAGE: u64 = u64::MAX;

/// A single buffer slot. Fields mirror the original simulator's
/// `BufferFrame` struct.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub page_id: u64,
    pub load_time: u64,
    pub last_access_time: u64,
    pub access_count: u32,
    pub dirty: bool,
    pub ref_bit: bool,
    /// Partition tag under the currently active policy.
    pub list_type: Partition,
    /// Shadow ARC-equivalent tag, maintained only under pure LRU/LFU so a
    /// later switch to LRU-ARC/LFU-ARC can recover partition placement.
    pub ref_list_type: Partition,
}

impl Frame {
    pub fn empty() -> Frame {
        Frame {
            page_id: INVALID_PAGE,
            load_time: 0,
            last_access_time: 0,
            access_count: 0,
            dirty: false,
            ref_bit: false,
            list_type: Partition::None,
            ref_list_type: Partition::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.page_id == INVALID_PAGE
    }
}

/// Preallocated array of `N` frames. No per-page heap allocation occurs
/// after construction.
#[derive(Debug, Clone)]
pub struct FrameTable {
    frames: Vec<Frame>,
}

impl FrameTable {
    pub fn new(size: usize) -> FrameTable {
        FrameTable {
            frames: vec![Frame::empty(); size],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, idx: usize) -> &Frame {
        &self.frames[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Frame {
        &mut self.frames[idx]
    }

    pub fn find(&self, page_id: u64) -> Option<usize> {
        self.frames.iter().position(|f| f.page_id == page_id)
    }

    pub fn empty_slot(&self) -> Option<usize> {
        self.frames.iter().position(|f| f.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        self.frames.iter_mut()
    }

    pub fn resident_count(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_empty()).count()
    }

    pub fn count_in_partition(&self, p: Partition) -> usize {
        self.frames
            .iter()
            .filter(|f| !f.is_empty() && f.list_type == p)
            .count()
    }
}
