//! Zoned Namespace write-pointer invariant enforcement.

use log::warn;

use crate::error::EngineWarning;

/// Outcome of validating a physical write against the zone write-pointer
/// invariant. The write is always recorded in the device I/O log regardless
/// of outcome, except `OutOfRange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZnsOutcome {
    /// Write was sequential; write pointer advanced normally.
    Sequential,
    /// Write targeted a page other than the expected next page. The write
    /// pointer is left unchanged; the I/O is still logged.
    NonSequential { expected: u64 },
    /// Write pointer advanced but was clamped at the zone boundary.
    BoundaryClamped,
    /// Zone id exceeds the configured maximum; write must be rejected.
    OutOfRange,
}

/// Per-zone write-pointer table. Disabled entirely (checks always succeed,
/// `OutOfRange` never produced) when `zone_size_pages == 0`.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    zone_size_pages: u64,
    max_zones: u64,
    write_pointers: Vec<u64>,
}

impl ZoneTable {
    pub fn new(zone_size_pages: u64, max_zones: u64) -> ZoneTable {
        let write_pointers = if zone_size_pages == 0 {
            Vec::new()
        } else {
            (0..max_zones).map(|z| z * zone_size_pages).collect()
        };
        ZoneTable {
            zone_size_pages,
            max_zones,
            write_pointers,
        }
    }

    pub fn enabled(&self) -> bool {
        self.zone_size_pages != 0
    }

    pub fn write_pointer(&self, zone_id: u64) -> Option<u64> {
        self.write_pointers.get(zone_id as usize).copied()
    }

    /// Validate and, if appropriate, advance the write pointer for a write
    /// of `num_pages` pages starting at `page_id`.
    pub fn check_write(&mut self, page_id: u64, num_pages: u64) -> ZnsOutcome {
        if !self.enabled() {
            return ZnsOutcome::Sequential;
        }
        let zone_id = page_id / self.zone_size_pages;
        if zone_id >= self.max_zones {
            warn!(
                "{}",
                EngineWarning::ZoneOutOfRange { page: page_id, zone: zone_id, max_zones: self.max_zones }
            );
            return ZnsOutcome::OutOfRange;
        }
        let zone_start = zone_id * self.zone_size_pages;
        let zone_end = zone_start + self.zone_size_pages;
        let expected = self.write_pointers[zone_id as usize];

        if page_id != expected {
            warn!(
                "{}",
                EngineWarning::NonSequentialWrite { zone: zone_id, page: page_id, expected }
            );
            return ZnsOutcome::NonSequential { expected };
        }

        let advanced = expected + num_pages;
        if advanced > zone_end {
            warn!("{}", EngineWarning::ZoneBoundaryClamped { zone: zone_id, page: page_id });
            self.write_pointers[zone_id as usize] = zone_end;
            return ZnsOutcome::BoundaryClamped;
        }
        self.write_pointers[zone_id as usize] = advanced;
        ZnsOutcome::Sequential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_when_zone_size_is_zero() {
        let mut zt = ZoneTable::new(0, 16);
        assert!(!zt.enabled());
        assert_eq!(zt.check_write(1_000_000, 1), ZnsOutcome::Sequential);
    }

    #[test]
    fn sequential_writes_advance_pointer() {
        let mut zt = ZoneTable::new(4, 4);
        assert_eq!(zt.check_write(0, 1), ZnsOutcome::Sequential);
        assert_eq!(zt.write_pointer(0), Some(1));
        assert_eq!(zt.check_write(1, 1), ZnsOutcome::Sequential);
        assert_eq!(zt.write_pointer(0), Some(2));
    }

    #[test]
    fn non_sequential_write_does_not_advance() {
        let mut zt = ZoneTable::new(4, 4);
        let outcome = zt.check_write(1, 1);
        assert_eq!(outcome, ZnsOutcome::NonSequential { expected: 0 });
        assert_eq!(zt.write_pointer(0), Some(0));
    }

    #[test]
    fn zone_out_of_range_is_rejected() {
        let mut zt = ZoneTable::new(4, 2);
        let outcome = zt.check_write(100, 1);
        assert_eq!(outcome, ZnsOutcome::OutOfRange);
    }

    #[test]
    fn boundary_crossing_write_is_clamped() {
        let mut zt = ZoneTable::new(4, 2);
        zt.check_write(0, 1);
        zt.check_write(1, 1);
        zt.check_write(2, 1);
        let outcome = zt.check_write(3, 2); // would go to page 5, crossing zone end at 4
        assert_eq!(outcome, ZnsOutcome::BoundaryClamped);
        assert_eq!(zt.write_pointer(0), Some(4));
    }
}
