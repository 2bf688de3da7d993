//! Result summary printed to standard output at shutdown.

use std::fmt;

use crate::config::SimConfig;
use crate::policy::Policy;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub initial_policy: Policy,
    pub buffer_size: usize,
    pub trace_path: String,
    pub zone_size_pages: u64,
    pub hits: u64,
    pub misses: u64,
    pub log_file_name: String,
}

impl RunSummary {
    pub fn from_config(config: &SimConfig, hits: u64, misses: u64) -> RunSummary {
        RunSummary {
            initial_policy: config.initial_policy,
            buffer_size: config.buffer_size,
            trace_path: config.trace_path.clone(),
            zone_size_pages: config.zone_size_pages,
            hits,
            misses,
            log_file_name: config.log_file_name(),
        }
    }

    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        if self.total_accesses() == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_accesses() as f64 * 100.0
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial policy:    {}", self.initial_policy.name())?;
        writeln!(f, "Buffer size:       {} frames", self.buffer_size)?;
        writeln!(f, "Workload:          {}", self.trace_path)?;
        if self.zone_size_pages > 0 {
            writeln!(f, "Zone size:         {} pages", self.zone_size_pages)?;
        } else {
            writeln!(f, "Zone size:         disabled")?;
        }
        writeln!(f, "Total LBA requests:{}", self.total_accesses())?;
        writeln!(f, "Hits:              {}", self.hits)?;
        writeln!(f, "Misses:            {}", self.misses)?;
        writeln!(f, "Hit rate:          {:.2}%", self.hit_rate())?;
        writeln!(f, "Device I/O log:    {}", self.log_file_name)?;
        Ok(())
    }
}
