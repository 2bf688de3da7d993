//! Startup parameters, parsed from positional CLI arguments.

use crate::error::ConfigError;
use crate::policy::Policy;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub buffer_size: usize,
    pub initial_policy: Policy,
    pub trace_path: String,
    pub zone_size_pages: u64,
}

impl SimConfig {
    /// Parses `buffer_size policy_name trace_path zone_size_pages`, the same
    /// positional order the original simulator reads from `argv`.
    pub fn from_args(args: &[String]) -> Result<SimConfig, ConfigError> {
        let mut it = args.iter();

        let buffer_size_str = it
            .next()
            .ok_or_else(|| ConfigError::MissingArgument("buffer_size".into()))?;
        let buffer_size: usize = buffer_size_str
            .parse()
            .map_err(|_| ConfigError::InvalidBufferSize(buffer_size_str.clone()))?;
        if buffer_size == 0 {
            return Err(ConfigError::InvalidBufferSize(buffer_size_str.clone()));
        }

        let policy_str = it
            .next()
            .ok_or_else(|| ConfigError::MissingArgument("policy_name".into()))?;
        let initial_policy = Policy::parse_name(policy_str)
            .ok_or_else(|| ConfigError::UnknownPolicy(policy_str.clone()))?;

        let trace_path = it
            .next()
            .ok_or_else(|| ConfigError::MissingArgument("trace_path".into()))?
            .clone();

        let zone_size_str = it
            .next()
            .ok_or_else(|| ConfigError::MissingArgument("zone_size_pages".into()))?;
        let zone_size_pages: u64 = zone_size_str
            .parse()
            .map_err(|_| ConfigError::InvalidZoneSize(zone_size_str.clone()))?;

        Ok(SimConfig {
            buffer_size,
            initial_policy,
            trace_path,
            zone_size_pages,
        })
    }

    /// Derives the device I/O log file name from the trace path, policy,
    /// buffer size, and (when enabled) zone size, mirroring the original
    /// simulator's own naming convention.
    pub fn log_file_name(&self) -> String {
        if self.zone_size_pages > 0 {
            format!(
                "{}_{}_{}_ZS{}.fio.log",
                self.trace_path,
                self.initial_policy.name(),
                self.buffer_size,
                self.zone_size_pages
            )
        } else {
            format!(
                "{}_{}_{}.fio.log",
                self.trace_path,
                self.initial_policy.name(),
                self.buffer_size
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_valid_args() {
        let cfg = SimConfig::from_args(&args(&["16", "fifo", "trace.txt", "4"])).unwrap();
        assert_eq!(cfg.buffer_size, 16);
        assert_eq!(cfg.initial_policy, Policy::Fifo);
        assert_eq!(cfg.trace_path, "trace.txt");
        assert_eq!(cfg.zone_size_pages, 4);
    }

    #[test]
    fn rejects_zero_buffer_size() {
        let err = SimConfig::from_args(&args(&["0", "fifo", "trace.txt", "4"]));
        assert!(matches!(err, Err(ConfigError::InvalidBufferSize(_))));
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = SimConfig::from_args(&args(&["16", "bogus", "trace.txt", "4"]));
        assert!(matches!(err, Err(ConfigError::UnknownPolicy(_))));
    }

    #[test]
    fn log_file_name_includes_zone_size_when_enabled() {
        let cfg = SimConfig::from_args(&args(&["16", "fifo", "trace.txt", "4"])).unwrap();
        assert_eq!(cfg.log_file_name(), "trace.txt_FIFO_16_ZS4.fio.log");
    }

    #[test]
    fn log_file_name_omits_zone_size_when_disabled() {
        let cfg = SimConfig::from_args(&args(&["16", "fifo", "trace.txt", "0"])).unwrap();
        assert_eq!(cfg.log_file_name(), "trace.txt_FIFO_16.fio.log");
    }
}
