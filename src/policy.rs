//! The nine replacement policies and the shared partition tag.

use serde::{Deserialize, Serialize};

/// A replacement policy, identified by the stable integer code used both in
/// workload `P <code>` records and in the original simulator this crate
/// reimplements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    ClockProT1B4LogsB2,
    ClockProT3B2LogsB4,
    ClockT1,
    ClockT3,
    Fifo,
    Lfu,
    LfuArc,
    Lru,
    LruArc,
}

impl Policy {
    /// All nine policies in stable code order (0..=8).
    pub const ALL: [Policy; 9] = [
        Policy::ClockProT1B4LogsB2,
        Policy::ClockProT3B2LogsB4,
        Policy::ClockT1,
        Policy::ClockT3,
        Policy::Fifo,
        Policy::Lfu,
        Policy::LfuArc,
        Policy::Lru,
        Policy::LruArc,
    ];

    /// Decode the stable integer code used in `P <code>` workload records.
    pub fn from_code(code: i64) -> Option<Policy> {
        match code {
            0 => Some(Policy::ClockProT1B4LogsB2),
            1 => Some(Policy::ClockProT3B2LogsB4),
            2 => Some(Policy::ClockT1),
            3 => Some(Policy::ClockT3),
            4 => Some(Policy::Fifo),
            5 => Some(Policy::Lfu),
            6 => Some(Policy::LfuArc),
            7 => Some(Policy::Lru),
            8 => Some(Policy::LruArc),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Policy::ClockProT1B4LogsB2 => 0,
            Policy::ClockProT3B2LogsB4 => 1,
            Policy::ClockT1 => 2,
            Policy::ClockT3 => 3,
            Policy::Fifo => 4,
            Policy::Lfu => 5,
            Policy::LfuArc => 6,
            Policy::Lru => 7,
            Policy::LruArc => 8,
        }
    }

    /// The canonical name, matching the original simulator's `policy_names[]`.
    pub fn name(self) -> &'static str {
        match self {
            Policy::ClockProT1B4LogsB2 => "CLOCK_PRO_T1_B4_LOGS_B2",
            Policy::ClockProT3B2LogsB4 => "CLOCK_PRO_T3_B2_LOGS_B4",
            Policy::ClockT1 => "CLOCK_T1",
            Policy::ClockT3 => "CLOCK_T3",
            Policy::Fifo => "FIFO",
            Policy::Lfu => "LFU",
            Policy::LfuArc => "LFU_ARC",
            Policy::Lru => "LRU",
            Policy::LruArc => "LRU_ARC",
        }
    }

    /// Parse a policy by name, case-insensitively.
    pub fn parse_name(name: &str) -> Option<Policy> {
        let upper = name.trim().to_ascii_uppercase();
        Policy::ALL.into_iter().find(|p| p.name() == upper)
    }

    pub fn is_arc_family(self) -> bool {
        matches!(
            self,
            Policy::LruArc
                | Policy::LfuArc
                | Policy::ClockProT1B4LogsB2
                | Policy::ClockProT3B2LogsB4
        )
    }

    pub fn is_clock_family(self) -> bool {
        matches!(
            self,
            Policy::ClockT1 | Policy::ClockT3 | Policy::ClockProT1B4LogsB2 | Policy::ClockProT3B2LogsB4
        )
    }
}

/// Which conceptual ARC-style resident slot a frame currently occupies.
///
/// A single shared tag is used for all nine policies rather than a
/// per-policy partition type: every policy that keeps a T1-style recency
/// partition reads and writes the same `Partition::T1`, and the engine
/// dispatches on the *active policy* once, at the top of its hit/miss
/// handlers, instead of smuggling that dispatch into the tag type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partition {
    None,
    T1,
    T2,
    T3,
    T4,
}
