//! The replacement-policy engine: per-record hit/miss dispatch across all
//! nine policies, and the runtime policy-switch protocol.

use log::{debug, info, warn};

use crate::arc_state::ArcState;
use crate::error::EngineWarning;
use crate::eviction::{evict_clock, evict_fifo, evict_internal_lfu, evict_internal_lru};
use crate::frame::FrameTable;
use crate::iolog::IoKind;
use crate::policy::{Partition, Policy};

pub fn lba_to_page_id(lba: u64, sectors_per_page: u64) -> u64 {
    lba / sectors_per_page
}

/// A physical device I/O caused by an access or an eviction. `ZoneTable`/
/// `IoLogWriter` are applied to these by the driver, not by the engine
/// itself — the engine only knows cache state, not zone/log concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIo {
    pub kind: IoKind,
    pub page_id: u64,
}

#[derive(Debug, Clone)]
pub struct AccessOutcome {
    pub hit: bool,
    pub io: Vec<DeviceIo>,
}

#[derive(Debug)]
pub struct Engine {
    policy: Policy,
    table: FrameTable,
    arc: ArcState,
    current_time: u64,
    hits: u64,
    misses: u64,
}

impl Engine {
    pub fn new(buffer_size: usize, initial_policy: Policy) -> Engine {
        Engine {
            policy: initial_policy,
            table: FrameTable::new(buffer_size),
            arc: ArcState::new(buffer_size, initial_policy),
            current_time: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn table(&self) -> &FrameTable {
        &self.table
    }

    pub fn arc_state(&self) -> &ArcState {
        &self.arc
    }

    /// Process one access record, returning whether it hit and any device
    /// I/O the access caused (a read on miss, plus a write if an evicted
    /// victim was dirty).
    pub fn access(&mut self, page_id: u64, op: IoKind) -> AccessOutcome {
        self.current_time += 1;
        if let Some(idx) = self.table.find(page_id) {
            self.hits += 1;
            self.handle_hit(idx, op);
            debug!("page {} hit under {}", page_id, self.policy.name());
            AccessOutcome { hit: true, io: vec![] }
        } else {
            self.misses += 1;
            let mut io = vec![DeviceIo { kind: IoKind::Read, page_id }];
            self.handle_miss(page_id, op, &mut io);
            debug!("page {} miss under {}", page_id, self.policy.name());
            AccessOutcome { hit: false, io }
        }
    }

    fn handle_hit(&mut self, idx: usize, op: IoKind) {
        let t = self.current_time;
        let f = self.table.get_mut(idx);
        f.last_access_time = t;
        f.access_count = f.access_count.saturating_add(1);
        if op == IoKind::Write {
            f.dirty = true;
        }
        match self.policy {
            Policy::Fifo => {}
            Policy::ClockT1 | Policy::ClockT3 | Policy::ClockProT1B4LogsB2 | Policy::ClockProT3B2LogsB4 => {
                f.ref_bit = true;
            }
            Policy::LruArc => {
                if f.list_type == Partition::T1 {
                    f.list_type = Partition::T2;
                    self.arc.t1_size = self.arc.t1_size.saturating_sub(1);
                    self.arc.t2_size += 1;
                }
            }
            Policy::LfuArc => {
                if f.list_type == Partition::T3 {
                    f.list_type = Partition::T4;
                    self.arc.t3_size = self.arc.t3_size.saturating_sub(1);
                    self.arc.t4_size += 1;
                }
            }
            Policy::Lru => {
                if f.ref_list_type == Partition::T1 {
                    f.ref_list_type = Partition::T2;
                    self.arc.t1_size = self.arc.t1_size.saturating_sub(1);
                    self.arc.t2_size += 1;
                }
            }
            Policy::Lfu => {
                if f.ref_list_type == Partition::T3 {
                    f.ref_list_type = Partition::T4;
                    self.arc.t3_size = self.arc.t3_size.saturating_sub(1);
                    self.arc.t4_size += 1;
                }
            }
        }
    }

    fn handle_miss(&mut self, page_id: u64, op: IoKind, io: &mut Vec<DeviceIo>) {
        let n = self.table.len() as u64;
        let (list_type, ref_list_type) = self.step_a_target(page_id, n);

        let idx = match self.table.empty_slot() {
            Some(i) => i,
            None => self.step_b_evict(list_type, io),
        };

        self.install(idx, page_id, op, list_type, ref_list_type);

        // CLOCK-Pro policies also log the newly loaded page itself.
        let cap = self.table.len();
        match self.policy {
            Policy::ClockProT1B4LogsB2 => self.arc.b2.add_mru(page_id, cap),
            Policy::ClockProT3B2LogsB4 => self.arc.b4.add_mru(page_id, cap),
            _ => {}
        }
    }

    /// Step A: ARC parameter adaptation and target-partition decision.
    /// Returns `(list_type, ref_list_type)` for the page about to be
    /// installed.
    fn step_a_target(&mut self, page_id: u64, n: u64) -> (Partition, Partition) {
        match self.policy {
            Policy::Fifo => (Partition::None, Partition::None),
            Policy::ClockT1 => (Partition::T1, Partition::None),
            Policy::ClockT3 => (Partition::T3, Partition::None),
            Policy::Lru | Policy::LruArc => {
                let shadow = if self.arc.b1.contains(page_id) {
                    let delta = ((self.arc.b2.len().max(1)) / self.arc.b1.len().max(1)).max(1) as u64;
                    self.arc.p = (self.arc.p + delta).min(n);
                    self.arc.b1.remove(page_id);
                    Partition::T2
                } else if self.arc.b2.contains(page_id) {
                    let delta = ((self.arc.b1.len().max(1)) / self.arc.b2.len().max(1)).max(1) as u64;
                    self.arc.p = self.arc.p.saturating_sub(delta);
                    self.arc.b2.remove(page_id);
                    Partition::T2
                } else {
                    Partition::T1
                };
                let list_type = if self.policy == Policy::LruArc { shadow } else { Partition::T1 };
                (list_type, shadow)
            }
            Policy::Lfu | Policy::LfuArc => {
                let shadow = if self.arc.b3.contains(page_id) {
                    let delta = ((self.arc.b4.len().max(1)) / self.arc.b3.len().max(1)).max(1) as u64;
                    self.arc.q = (self.arc.q + delta).min(n);
                    self.arc.b3.remove(page_id);
                    Partition::T4
                } else if self.arc.b4.contains(page_id) {
                    let delta = ((self.arc.b3.len().max(1)) / self.arc.b4.len().max(1)).max(1) as u64;
                    self.arc.q = self.arc.q.saturating_sub(delta);
                    self.arc.b4.remove(page_id);
                    Partition::T4
                } else {
                    Partition::T3
                };
                let list_type = if self.policy == Policy::LfuArc { shadow } else { Partition::T3 };
                (list_type, shadow)
            }
            Policy::ClockProT1B4LogsB2 => {
                if self.arc.b4.contains(page_id) {
                    let delta = ((self.arc.b2.len().max(1)) / self.arc.b4.len().max(1)).max(1) as u64;
                    self.arc.p = (self.arc.p + delta).min(n);
                    self.arc.b4.remove(page_id);
                } else if self.arc.b2.contains(page_id) {
                    let delta = ((self.arc.b4.len().max(1)) / self.arc.b2.len().max(1)).max(1) as u64;
                    self.arc.p = self.arc.p.saturating_sub(delta);
                    self.arc.b2.remove(page_id);
                }
                (Partition::T1, Partition::None)
            }
            Policy::ClockProT3B2LogsB4 => {
                if self.arc.b2.contains(page_id) {
                    let delta = ((self.arc.b4.len().max(1)) / self.arc.b2.len().max(1)).max(1) as u64;
                    self.arc.q = (self.arc.q + delta).min(n);
                    self.arc.b2.remove(page_id);
                } else if self.arc.b4.contains(page_id) {
                    let delta = ((self.arc.b2.len().max(1)) / self.arc.b4.len().max(1)).max(1) as u64;
                    self.arc.q = self.arc.q.saturating_sub(delta);
                    self.arc.b4.remove(page_id);
                }
                (Partition::T3, Partition::None)
            }
        }
    }

    /// Step B/C/D: pick a victim, write back if dirty, update ghost lists
    /// and partition sizes. Returns the index now free for installation.
    fn step_b_evict(&mut self, incoming_target: Partition, io: &mut Vec<DeviceIo>) -> usize {
        let cap = self.table.len();
        let victim = match self.policy {
            Policy::Fifo => evict_fifo(&self.table),
            Policy::Lru => evict_internal_lru(&self.table, Partition::T1),
            Policy::Lfu => evict_internal_lfu(&self.table, Partition::T3),
            Policy::LruArc => {
                let prefer_t2 = incoming_target == Partition::T2
                    && self.arc.t1_size == self.arc.p
                    && self.arc.t2_size > 0;
                if prefer_t2 {
                    evict_internal_lru(&self.table, Partition::T2)
                } else if self.arc.t1_size > 0 {
                    evict_internal_lru(&self.table, Partition::T1)
                } else {
                    evict_internal_lru(&self.table, Partition::T2)
                }
            }
            Policy::LfuArc => {
                let prefer_t4 = incoming_target == Partition::T4
                    && self.arc.t3_size == self.arc.q
                    && self.arc.t4_size > 0;
                if prefer_t4 {
                    evict_internal_lfu(&self.table, Partition::T4)
                } else if self.arc.t3_size > 0 {
                    evict_internal_lfu(&self.table, Partition::T3)
                } else {
                    evict_internal_lfu(&self.table, Partition::T4)
                }
            }
            Policy::ClockT1 => evict_clock(&mut self.table, self.arc.p_hand, false, Partition::None)
                .map(|(i, h, fb)| {
                    self.arc.p_hand = h;
                    if fb {
                        warn!("{}", EngineWarning::EvictionFallback);
                    }
                    i
                }),
            Policy::ClockT3 => evict_clock(&mut self.table, self.arc.q_hand, false, Partition::None)
                .map(|(i, h, fb)| {
                    self.arc.q_hand = h;
                    if fb {
                        warn!("{}", EngineWarning::EvictionFallback);
                    }
                    i
                }),
            Policy::ClockProT1B4LogsB2 => {
                let filtered = self.arc.t1_size >= self.arc.p && self.arc.t1_size > 0;
                evict_clock(&mut self.table, self.arc.p_hand, filtered, Partition::T1).map(|(i, h, fb)| {
                    self.arc.p_hand = h;
                    if fb {
                        warn!("{}", EngineWarning::EvictionFallback);
                    }
                    i
                })
            }
            Policy::ClockProT3B2LogsB4 => {
                let filtered = self.arc.t3_size >= self.arc.q && self.arc.t3_size > 0;
                evict_clock(&mut self.table, self.arc.q_hand, filtered, Partition::T3).map(|(i, h, fb)| {
                    self.arc.q_hand = h;
                    if fb {
                        warn!("{}", EngineWarning::EvictionFallback);
                    }
                    i
                })
            }
        };

        let idx = victim.unwrap_or_else(|| {
            warn!("{}", EngineWarning::EvictionFallback);
            evict_fifo(&self.table).expect("buffer table must be non-empty to reach eviction")
        });

        let (victim_list, victim_ref_list, dirty, victim_page) = {
            let f = self.table.get(idx);
            (f.list_type, f.ref_list_type, f.dirty, f.page_id)
        };

        if dirty {
            io.push(DeviceIo { kind: IoKind::Write, page_id: victim_page });
        }

        match self.policy {
            Policy::Lru => {
                self.arc.t1_size = self.arc.t1_size.saturating_sub(1);
                match victim_ref_list {
                    Partition::T1 => self.arc.b1.add_mru(victim_page, cap),
                    Partition::T2 => {
                        self.arc.t2_size = self.arc.t2_size.saturating_sub(1);
                        self.arc.b2.add_mru(victim_page, cap);
                    }
                    _ => {}
                }
            }
            Policy::LruArc => match victim_list {
                Partition::T1 => {
                    self.arc.t1_size = self.arc.t1_size.saturating_sub(1);
                    self.arc.b1.add_mru(victim_page, cap);
                }
                Partition::T2 => {
                    self.arc.t2_size = self.arc.t2_size.saturating_sub(1);
                    self.arc.b2.add_mru(victim_page, cap);
                }
                _ => {}
            },
            Policy::Lfu => {
                self.arc.t3_size = self.arc.t3_size.saturating_sub(1);
                match victim_ref_list {
                    Partition::T3 => self.arc.b3.add_mru(victim_page, cap),
                    Partition::T4 => {
                        self.arc.t4_size = self.arc.t4_size.saturating_sub(1);
                        self.arc.b4.add_mru(victim_page, cap);
                    }
                    _ => {}
                }
            }
            Policy::LfuArc => match victim_list {
                Partition::T3 => {
                    self.arc.t3_size = self.arc.t3_size.saturating_sub(1);
                    self.arc.b3.add_mru(victim_page, cap);
                }
                Partition::T4 => {
                    self.arc.t4_size = self.arc.t4_size.saturating_sub(1);
                    self.arc.b4.add_mru(victim_page, cap);
                }
                _ => {}
            },
            Policy::ClockT1 => {
                self.arc.t1_size = self.arc.t1_size.saturating_sub(1);
            }
            Policy::ClockT3 => {
                self.arc.t3_size = self.arc.t3_size.saturating_sub(1);
            }
            Policy::ClockProT1B4LogsB2 => {
                self.arc.t1_size = self.arc.t1_size.saturating_sub(1);
                self.arc.b4.add_mru(victim_page, cap);
                self.arc.b2.add_mru(victim_page, cap);
            }
            Policy::ClockProT3B2LogsB4 => {
                self.arc.t3_size = self.arc.t3_size.saturating_sub(1);
                self.arc.b2.add_mru(victim_page, cap);
                self.arc.b4.add_mru(victim_page, cap);
            }
            Policy::Fifo => {}
        }

        idx
    }

    fn install(
        &mut self,
        idx: usize,
        page_id: u64,
        op: IoKind,
        list_type: Partition,
        ref_list_type: Partition,
    ) {
        let t = self.current_time;
        let is_clock_family = self.policy.is_clock_family();
        let f = self.table.get_mut(idx);
        f.page_id = page_id;
        f.load_time = t;
        f.last_access_time = t;
        f.access_count = 1;
        f.dirty = op == IoKind::Write;
        f.ref_bit = is_clock_family;
        f.list_type = list_type;
        f.ref_list_type = ref_list_type;

        match list_type {
            Partition::T1 => self.arc.t1_size += 1,
            Partition::T2 => self.arc.t2_size += 1,
            Partition::T3 => self.arc.t3_size += 1,
            Partition::T4 => self.arc.t4_size += 1,
            Partition::None => {}
        }
    }

    /// Runtime policy-switch protocol. A no-op if `new == self.policy()`.
    pub fn switch_policy(&mut self, new: Policy) {
        if new == self.policy {
            return;
        }
        let old = self.policy;
        let carry_over = matches!(
            (old, new),
            (Policy::Lru, Policy::LruArc)
                | (Policy::LruArc, Policy::Lru)
                | (Policy::Lfu, Policy::LfuArc)
                | (Policy::LfuArc, Policy::Lfu)
        );
        let n = self.table.len();

        if carry_over {
            self.arc.reset_hands();
            self.arc.reset_targets(new, n);
        } else {
            self.arc.full_reset(new, n);
        }

        for f in self.table.iter_mut() {
            if f.is_empty() {
                continue;
            }
            match new {
                Policy::Fifo => {
                    f.list_type = Partition::None;
                    f.ref_list_type = Partition::None;
                    f.ref_bit = false;
                }
                Policy::ClockT1 => {
                    f.list_type = Partition::T1;
                    f.ref_list_type = Partition::None;
                    f.ref_bit = true;
                }
                Policy::ClockT3 => {
                    f.list_type = Partition::T3;
                    f.ref_list_type = Partition::None;
                    f.ref_bit = true;
                }
                Policy::ClockProT1B4LogsB2 => {
                    f.list_type = Partition::T1;
                    f.ref_list_type = Partition::None;
                    f.ref_bit = true;
                }
                Policy::ClockProT3B2LogsB4 => {
                    f.list_type = Partition::T3;
                    f.ref_list_type = Partition::None;
                    f.ref_bit = true;
                }
                Policy::Lru => {
                    if carry_over {
                        f.ref_list_type = f.list_type;
                    } else {
                        f.ref_list_type = Partition::T1;
                    }
                    f.list_type = Partition::T1;
                    f.ref_bit = false;
                }
                Policy::LruArc => {
                    if carry_over {
                        f.list_type = f.ref_list_type;
                    } else {
                        f.list_type = Partition::T1;
                    }
                    f.ref_list_type = Partition::None;
                    f.ref_bit = false;
                }
                Policy::Lfu => {
                    if carry_over {
                        f.ref_list_type = f.list_type;
                    } else {
                        f.ref_list_type = Partition::T3;
                    }
                    f.list_type = Partition::T3;
                    f.ref_bit = false;
                }
                Policy::LfuArc => {
                    if carry_over {
                        f.list_type = f.ref_list_type;
                    } else {
                        f.list_type = Partition::T3;
                    }
                    f.ref_list_type = Partition::None;
                    f.ref_bit = false;
                }
            }
        }

        // Rebuild partition sizes from the relabeled frames.
        let count = |pred: &dyn Fn(&crate::frame::Frame) -> bool| {
            self.table.iter().filter(|f| !f.is_empty() && pred(f)).count() as u64
        };
        match new {
            Policy::Lru => {
                self.arc.t1_size = count(&|f| f.ref_list_type == Partition::T1);
                self.arc.t2_size = count(&|f| f.ref_list_type == Partition::T2);
            }
            Policy::LruArc => {
                self.arc.t1_size = count(&|f| f.list_type == Partition::T1);
                self.arc.t2_size = count(&|f| f.list_type == Partition::T2);
            }
            Policy::Lfu => {
                self.arc.t3_size = count(&|f| f.ref_list_type == Partition::T3);
                self.arc.t4_size = count(&|f| f.ref_list_type == Partition::T4);
            }
            Policy::LfuArc => {
                self.arc.t3_size = count(&|f| f.list_type == Partition::T3);
                self.arc.t4_size = count(&|f| f.list_type == Partition::T4);
            }
            Policy::ClockT1 | Policy::ClockProT1B4LogsB2 => {
                self.arc.t1_size = count(&|f| f.list_type == Partition::T1);
            }
            Policy::ClockT3 | Policy::ClockProT3B2LogsB4 => {
                self.arc.t3_size = count(&|f| f.list_type == Partition::T3);
            }
            Policy::Fifo => {}
        }

        self.policy = new;
        info!("policy switched: {} -> {}", old.name(), new.name());
    }

    /// Shutdown flush: write back every dirty resident frame.
    pub fn flush_all(&mut self) -> Vec<DeviceIo> {
        let mut io = Vec::new();
        for f in self.table.iter_mut() {
            if !f.is_empty() && f.dirty {
                io.push(DeviceIo { kind: IoKind::Write, page_id: f.page_id });
                f.dirty = false;
            }
        }
        info!("shutdown flush wrote back {} dirty pages", io.len());
        io
    }
}
