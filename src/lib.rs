//! Trace-driven simulator of a page buffer cache in front of a Zoned
//! Namespace (ZNS) block device.

pub mod arc_state;
pub mod config;
pub mod engine;
pub mod error;
pub mod eviction;
pub mod frame;
pub mod ghost;
pub mod iolog;
pub mod policy;
pub mod summary;
pub mod workload;
pub mod zns;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
