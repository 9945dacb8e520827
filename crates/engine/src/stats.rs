//! Simulation metrics collection and reporting.
//!
//! This module tracks performance metrics for one policy engine. It provides:
//! 1. **Access counts:** Page hits and page faults, accumulated per event.
//! 2. **Time:** Total simulated seconds and thrashing time (cumulative fault cost).
//! 3. **Occupancy:** RAM/virtual-RAM usage, internal fragmentation, running processes,
//!    recomputed from the authoritative state after every instruction.
//! 4. **Reporting:** A side-by-side comparison printout for two engines.

use serde::Serialize;

use crate::core::{Mmu, PageFrame};
use crate::policies::AlgorithmName;

/// Metrics for one policy engine.
///
/// Hits, faults, total time, and thrashing time are accumulated as events
/// happen; everything else is derived and overwritten by
/// [`AlgorithmMetrics::recompute`] at each instruction boundary, so it can
/// never drift from the frames and MMU it describes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AlgorithmMetrics {
    /// Accesses whose page was resident.
    pub page_hits: u64,
    /// Accesses whose page had to be brought into RAM.
    pub page_faults: u64,
    /// Total simulated seconds (hit cost + fault cost).
    pub total_time: u64,
    /// Cumulative fault cost in simulated seconds.
    pub thrashing_time: u64,
    /// Kilobytes of RAM backing resident pages.
    pub ram_used_kb: u64,
    /// Kilobytes of swapped-out (virtual) pages.
    pub v_ram_used_kb: u64,
    /// Kilobytes lost to partially filled last pages of allocations.
    pub internal_fragmentation_kb: f64,
    /// Distinct processes with at least one live page.
    pub running_processes: usize,
    /// Total RAM capacity in kilobytes (denominator for percentages).
    pub ram_total_kb: u64,
}

impl AlgorithmMetrics {
    /// Creates zeroed metrics for a machine with `ram_total_kb` of RAM.
    pub fn new(ram_total_kb: u64) -> Self {
        Self {
            ram_total_kb,
            ..Self::default()
        }
    }

    /// Records a page hit costing `hit_time` simulated seconds.
    pub fn record_hit(&mut self, hit_time: u64) {
        self.page_hits += 1;
        self.total_time += hit_time;
    }

    /// Records a page fault costing `fault_time` simulated seconds.
    ///
    /// The full fault cost also counts toward thrashing time.
    pub fn record_fault(&mut self, fault_time: u64) {
        self.page_faults += 1;
        self.total_time += fault_time;
        self.thrashing_time += fault_time;
    }

    /// Recomputes every derived metric from the authoritative state.
    pub fn recompute(&mut self, frames: &[PageFrame], mmu: &Mmu, page_size_bytes: u32) {
        let page_kb = u64::from(page_size_bytes) / 1024;
        let resident = mmu.resident_count() as u64;
        let swapped = mmu.swapped_count() as u64;
        debug_assert_eq!(
            resident,
            frames.iter().filter(|frame| frame.is_occupied()).count() as u64
        );

        self.ram_used_kb = resident * page_kb;
        self.v_ram_used_kb = swapped * page_kb;
        self.running_processes = mmu.running_processes();
        self.internal_fragmentation_kb = mmu
            .pages()
            .filter(|page| page.is_resident())
            .map(|page| f64::from(page_size_bytes - page.content_bytes) / 1024.0)
            .sum();
    }

    /// RAM in use as a percentage of capacity.
    pub fn ram_used_percent(&self) -> f64 {
        percent(self.ram_used_kb as f64, self.ram_total_kb as f64)
    }

    /// Swapped-out kilobytes as a percentage of RAM capacity.
    pub fn v_ram_used_percent(&self) -> f64 {
        percent(self.v_ram_used_kb as f64, self.ram_total_kb as f64)
    }

    /// Thrashing time as a percentage of total simulated time.
    pub fn thrashing_percent(&self) -> f64 {
        percent(self.thrashing_time as f64, self.total_time as f64)
    }
}

fn percent(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

/// Prints a side-by-side comparison of the optimal engine and the chosen
/// policy's engine.
pub fn print_comparison(
    opt: &AlgorithmMetrics,
    chosen: &AlgorithmMetrics,
    algorithm: AlgorithmName,
    instruction_count: usize,
) {
    println!("\n==========================================================");
    println!("VIRTUAL MEMORY SIMULATION STATISTICS");
    println!("==========================================================");
    println!("instructions             {}", instruction_count);
    println!("ram_capacity             {} KB", opt.ram_total_kb);
    println!("----------------------------------------------------------");
    println!("{:<25}{:>14}{:>18}", "", "OPT", algorithm.as_str());
    println!(
        "{:<25}{:>14}{:>18}",
        "sim_time (s)", opt.total_time, chosen.total_time
    );
    println!(
        "{:<25}{:>14}{:>18}",
        "page_hits", opt.page_hits, chosen.page_hits
    );
    println!(
        "{:<25}{:>14}{:>18}",
        "page_faults", opt.page_faults, chosen.page_faults
    );
    println!(
        "{:<25}{:>14}{:>18}",
        "thrashing (s)",
        format!("{} ({:.1}%)", opt.thrashing_time, opt.thrashing_percent()),
        format!(
            "{} ({:.1}%)",
            chosen.thrashing_time,
            chosen.thrashing_percent()
        ),
    );
    println!(
        "{:<25}{:>14}{:>18}",
        "ram_used (KB)",
        format!("{} ({:.0}%)", opt.ram_used_kb, opt.ram_used_percent()),
        format!("{} ({:.0}%)", chosen.ram_used_kb, chosen.ram_used_percent()),
    );
    println!(
        "{:<25}{:>14}{:>18}",
        "vram_used (KB)", opt.v_ram_used_kb, chosen.v_ram_used_kb
    );
    println!(
        "{:<25}{:>14}{:>18}",
        "fragmentation (KB)",
        format!("{:.1}", opt.internal_fragmentation_kb),
        format!("{:.1}", chosen.internal_fragmentation_kb),
    );
    println!(
        "{:<25}{:>14}{:>18}",
        "running_processes", opt.running_processes, chosen.running_processes
    );
    println!("==========================================================");
}
