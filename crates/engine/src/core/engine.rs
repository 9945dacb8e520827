//! The per-policy simulation engine.
//!
//! One engine owns the complete simulation state for one replacement
//! algorithm: the frame table, the MMU, the metrics, the Second-Chance
//! hand, and the policy RNG. Applying an instruction resolves page hits
//! and faults, consults the policy only when RAM is full, commits the
//! policy's decision atomically, and recomputes the derived metrics.
//!
//! Timing convention: timestamps recorded for an event are the value of
//! `total_time` at the moment the event begins; the event's cost is added
//! afterwards. Within one multi-page instruction the per-page effects
//! happen in ascending page-index order, so page timestamps differ by the
//! cumulative cost of the earlier pages. This is what makes FIFO/LRU/MRU
//! well-defined on multi-page allocations.

use log::warn;
use rand_chacha::ChaCha8Rng;

use crate::common::{PageId, SimError};
use crate::config::SimConfig;
use crate::policies::{self, AlgorithmName, ReplacementContext, ReplacementDecision};
use crate::rng::seeded_rng;
use crate::stats::AlgorithmMetrics;
use crate::workload::ProcessInstruction;

use super::frame::{PageFrame, ResidentPage};
use super::mmu::Mmu;
use super::page::{LogicalPage, Residency};

/// Simulation state machine for one replacement algorithm.
pub struct Engine {
    algorithm: AlgorithmName,
    page_size_bytes: u32,
    hit_time: u64,
    fault_time: u64,
    /// Physical RAM; the frame id is the index.
    pub frames: Vec<PageFrame>,
    /// Live logical pages and active pointers.
    pub mmu: Mmu,
    /// Accumulated and derived performance metrics.
    pub metrics: AlgorithmMetrics,
    hand: usize,
    rng: ChaCha8Rng,
    next_disk_address: u64,
}

impl Engine {
    /// Creates an empty engine for `algorithm`.
    ///
    /// The policy RNG stream is derived from the seed and the algorithm
    /// name, so two engines on the same seed draw independently.
    pub fn new(config: &SimConfig, algorithm: AlgorithmName, seed: &str) -> Self {
        Self {
            algorithm,
            page_size_bytes: config.page_size_bytes,
            hit_time: config.hit_time,
            fault_time: config.fault_time,
            frames: vec![PageFrame::default(); config.total_ram_frames],
            mmu: Mmu::new(),
            metrics: AlgorithmMetrics::new(config.ram_total_kb()),
            hand: 0,
            rng: seeded_rng(seed, algorithm.as_str()),
            next_disk_address: 0,
        }
    }

    /// The algorithm this engine runs.
    pub fn algorithm(&self) -> AlgorithmName {
        self.algorithm
    }

    /// Current Second-Chance hand position.
    pub fn hand(&self) -> usize {
        self.hand
    }

    /// Applies one instruction.
    ///
    /// `future` is the full instruction stream plus the index of this
    /// instruction; only the Optimal policy reads it. Derived metrics are
    /// recomputed from the authoritative state before returning.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError`] when a policy is misused or the state is
    /// found corrupted; such errors are fatal to the session.
    pub fn apply(
        &mut self,
        instruction: &ProcessInstruction,
        future: Option<(&[ProcessInstruction], usize)>,
    ) -> Result<(), SimError> {
        match instruction {
            ProcessInstruction::New {
                pid,
                size_bytes,
                ptr_id,
            } => self.exec_new(pid, *size_bytes, *ptr_id, future)?,
            ProcessInstruction::Use { ptr_id } => self.exec_use(*ptr_id, future)?,
            ProcessInstruction::Delete { ptr_id } => self.exec_delete(*ptr_id),
            ProcessInstruction::Kill { pid } => self.exec_kill(pid),
        }
        self.metrics
            .recompute(&self.frames, &self.mmu, self.page_size_bytes);
        Ok(())
    }

    /// Allocates `size_bytes` for `pid` under `ptr_id`, page by page.
    ///
    /// Placement into a free frame costs a hit; displacing a victim costs
    /// a fault. The last page carries the allocation remainder (internal
    /// fragmentation).
    fn exec_new(
        &mut self,
        pid: &str,
        size_bytes: u32,
        ptr_id: u32,
        future: Option<(&[ProcessInstruction], usize)>,
    ) -> Result<(), SimError> {
        let num_pages = size_bytes.div_ceil(self.page_size_bytes);
        for index in 0..num_pages {
            let content_bytes = if index + 1 == num_pages {
                match size_bytes % self.page_size_bytes {
                    0 => self.page_size_bytes,
                    remainder => remainder,
                }
            } else {
                self.page_size_bytes
            };

            let now = self.metrics.total_time;
            let id = PageId::new(ptr_id, index);
            let disk_address = self.fresh_disk_address();
            self.mmu.insert_page(LogicalPage {
                id,
                pid: pid.to_string(),
                residency: Residency::Swapped { disk_address },
                loaded_at: now,
                last_access: now,
                referenced: false,
                content_bytes,
            });

            if self.place_in_ram(id, future)? {
                self.metrics.record_fault(self.fault_time);
            } else {
                self.metrics.record_hit(self.hit_time);
            }
        }
        Ok(())
    }

    /// Dereferences every page of `ptr_id` in allocation order.
    ///
    /// A resident page is a hit; a swapped page is a fault even when a free
    /// frame is available. Unknown pointers are logged no-ops.
    fn exec_use(
        &mut self,
        ptr_id: u32,
        future: Option<(&[ProcessInstruction], usize)>,
    ) -> Result<(), SimError> {
        let Some(entry) = self.mmu.pointer(ptr_id) else {
            warn!("use of unknown pointer {}, skipping", ptr_id);
            return Ok(());
        };
        let page_ids = entry.pages.clone();

        for id in page_ids {
            let now = self.metrics.total_time;
            let residency = {
                let page = self.mmu.page_mut(id).ok_or(SimError::OrphanPage(id))?;
                page.last_access = now;
                page.referenced = true;
                page.residency
            };
            match residency {
                Residency::Resident { frame_id } => {
                    let slot = self.frames[frame_id]
                        .slot
                        .as_mut()
                        .ok_or(SimError::PageMappingBroken(id))?;
                    slot.last_access = now;
                    self.metrics.record_hit(self.hit_time);
                }
                Residency::Swapped { .. } => {
                    self.place_in_ram(id, future)?;
                    self.metrics.record_fault(self.fault_time);
                }
            }
        }
        Ok(())
    }

    /// Frees `ptr_id` and every page it owns. Zero time cost.
    fn exec_delete(&mut self, ptr_id: u32) {
        if !self.release_pointer(ptr_id) {
            warn!("delete of unknown pointer {}, skipping", ptr_id);
        }
    }

    /// Frees every live pointer owned by `pid`. Zero time cost; a pid with
    /// nothing live is a no-op.
    fn exec_kill(&mut self, pid: &str) {
        for ptr_id in self.mmu.pointers_of(pid) {
            self.release_pointer(ptr_id);
        }
    }

    /// Tears down one pointer: frames freed, pages dropped from the MMU.
    fn release_pointer(&mut self, ptr_id: u32) -> bool {
        let Some(entry) = self.mmu.remove_pointer(ptr_id) else {
            return false;
        };
        for id in entry.pages {
            if let Some(page) = self.mmu.remove_page(id) {
                if let Some(frame_id) = page.frame_id() {
                    self.frames[frame_id].slot = None;
                }
            }
        }
        true
    }

    /// Brings page `id` into RAM, evicting if no frame is free.
    ///
    /// Returns whether an eviction happened; the caller does the cost
    /// accounting, because a `new` landing in a free frame is a hit while
    /// a `use` of a swapped page is a fault regardless.
    fn place_in_ram(
        &mut self,
        id: PageId,
        future: Option<(&[ProcessInstruction], usize)>,
    ) -> Result<bool, SimError> {
        let now = self.metrics.total_time;
        let (frame_id, evicted) = match self.frames.iter().position(|frame| frame.slot.is_none()) {
            Some(free) => (free, false),
            None => {
                let decision = self.decide_victim(id, future)?;
                self.commit_eviction(&decision)?;
                (decision.victim_frame_id, true)
            }
        };
        self.install(id, frame_id, now)?;
        Ok(evicted)
    }

    /// Consults the replacement policy for a victim.
    fn decide_victim(
        &mut self,
        incoming: PageId,
        future: Option<(&[ProcessInstruction], usize)>,
    ) -> Result<ReplacementDecision, SimError> {
        let context = ReplacementContext {
            frames: &self.frames,
            mmu: &self.mmu,
            incoming,
            future,
            hand: self.hand,
            rng: &mut self.rng,
        };
        policies::decide(self.algorithm, context)
    }

    /// Commits an eviction decision: the victim leaves RAM for a fresh
    /// symbolic disk address, scheduled reference bits are cleared, and
    /// the hand advances.
    fn commit_eviction(&mut self, decision: &ReplacementDecision) -> Result<(), SimError> {
        let frame = self
            .frames
            .get_mut(decision.victim_frame_id)
            .ok_or(SimError::VictimFrameEmpty(decision.victim_frame_id))?;
        let slot = frame
            .slot
            .take()
            .ok_or(SimError::VictimFrameEmpty(decision.victim_frame_id))?;
        if let Some(expected) = decision.victim_page {
            if expected != slot.page {
                return Err(SimError::VictimMismatch(decision.victim_frame_id));
            }
        }

        let disk_address = self.fresh_disk_address();
        let victim = self
            .mmu
            .page_mut(slot.page)
            .ok_or(SimError::FrameMappingBroken(decision.victim_frame_id))?;
        victim.residency = Residency::Swapped { disk_address };

        for &page_id in &decision.clear_referenced {
            if let Some(page) = self.mmu.page_mut(page_id) {
                page.referenced = false;
            }
        }
        if let Some(hand) = decision.next_hand {
            self.hand = hand;
        }
        Ok(())
    }

    /// Installs page `id` into the (now empty) frame `frame_id`.
    fn install(&mut self, id: PageId, frame_id: usize, now: u64) -> Result<(), SimError> {
        let page = self.mmu.page_mut(id).ok_or(SimError::OrphanPage(id))?;
        page.residency = Residency::Resident { frame_id };
        page.loaded_at = now;
        page.last_access = now;
        let pid = page.pid.clone();
        self.frames[frame_id].slot = Some(ResidentPage {
            page: id,
            pid,
            loaded_at: now,
            last_access: now,
        });
        Ok(())
    }

    /// Next symbolic disk address.
    fn fresh_disk_address(&mut self) -> u64 {
        let address = self.next_disk_address;
        self.next_disk_address += 1;
        address
    }

    /// Checks every structural invariant of the state.
    ///
    /// Run by the session driver at each step boundary; any failure means
    /// an engine bug and aborts the session.
    pub fn verify_invariants(&self) -> Result<(), SimError> {
        // Frame-to-page direction.
        for (frame_id, frame) in self.frames.iter().enumerate() {
            let Some(slot) = frame.slot.as_ref() else {
                continue;
            };
            let page = self
                .mmu
                .page(slot.page)
                .ok_or(SimError::FrameMappingBroken(frame_id))?;
            if page.frame_id() != Some(frame_id) || page.pid != slot.pid {
                return Err(SimError::FrameMappingBroken(frame_id));
            }
        }

        // Page-to-frame direction, plus pointer registration.
        for page in self.mmu.pages() {
            if let Some(frame_id) = page.frame_id() {
                let holds = self
                    .frames
                    .get(frame_id)
                    .and_then(|frame| frame.slot.as_ref())
                    .is_some_and(|slot| slot.page == page.id);
                if !holds {
                    return Err(SimError::PageMappingBroken(page.id));
                }
            }
            let registered = self
                .mmu
                .pointer(page.id.ptr_id)
                .is_some_and(|entry| entry.pages.contains(&page.id));
            if !registered {
                return Err(SimError::OrphanPage(page.id));
            }
        }

        // Pointer table: no dangling or empty entries.
        for (ptr_id, entry) in self.mmu.pointers() {
            if entry.pages.is_empty() {
                return Err(SimError::EmptyPointer(ptr_id));
            }
            for &id in &entry.pages {
                let live = self
                    .mmu
                    .page(id)
                    .is_some_and(|page| page.pid == entry.pid);
                if !live {
                    return Err(SimError::OrphanPage(id));
                }
            }
        }

        // Occupancy and time accounting.
        let occupied = self.frames.iter().filter(|frame| frame.is_occupied()).count();
        if occupied != self.mmu.resident_count() {
            return Err(SimError::MetricsInconsistent(format!(
                "occupied frames {} vs resident pages {}",
                occupied,
                self.mmu.resident_count()
            )));
        }
        let page_kb = u64::from(self.page_size_bytes) / 1024;
        let free = (self.frames.len() - occupied) as u64;
        if self.metrics.ram_used_kb + free * page_kb != self.metrics.ram_total_kb {
            return Err(SimError::MetricsInconsistent(format!(
                "ram_used_kb {} + free {} KB != capacity {} KB",
                self.metrics.ram_used_kb,
                free * page_kb,
                self.metrics.ram_total_kb
            )));
        }
        let expected_time =
            self.hit_time * self.metrics.page_hits + self.fault_time * self.metrics.page_faults;
        if self.metrics.total_time != expected_time {
            return Err(SimError::MetricsInconsistent(format!(
                "total_time {} != {}",
                self.metrics.total_time, expected_time
            )));
        }
        if self.metrics.thrashing_time > self.metrics.total_time {
            return Err(SimError::MetricsInconsistent(format!(
                "thrashing_time {} > total_time {}",
                self.metrics.thrashing_time, self.metrics.total_time
            )));
        }
        if self.metrics.running_processes != self.mmu.running_processes() {
            return Err(SimError::MetricsInconsistent(format!(
                "running_processes {} vs {}",
                self.metrics.running_processes,
                self.mmu.running_processes()
            )));
        }
        Ok(())
    }
}
