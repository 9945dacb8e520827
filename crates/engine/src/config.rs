//! Configuration system for the virtual-memory simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! simulation. It provides:
//! 1. **Defaults:** Baseline machine constants (page size, RAM frames, access costs).
//! 2. **Structures:** `SimConfig` for the machine model, `WorkloadConfig` for generation.
//!
//! Configuration is supplied as JSON by a hosting front-end or built with
//! `SimConfig::default()`; tests override individual fields to run with a
//! handful of frames instead of the full machine.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine when not explicitly overridden.
mod defaults {
    /// Size of one page / one RAM frame in bytes (4 KB).
    pub const PAGE_SIZE_BYTES: u32 = 4096;

    /// Number of physical RAM frames (100 frames = 400 KB).
    pub const TOTAL_RAM_FRAMES: usize = 100;

    /// Simulated cost of a page hit, in seconds.
    pub const HIT_TIME: u64 = 1;

    /// Simulated cost of a page fault, in seconds.
    ///
    /// The full fault cost also counts toward thrashing time.
    pub const FAULT_TIME: u64 = 5;

    /// Default number of processes in a generated workload.
    pub const PROCESS_COUNT: usize = 10;

    /// Default number of generated instructions.
    pub const OP_COUNT: usize = 500;

    /// Smallest allocation a generated `new` may request, in bytes.
    pub const MIN_ALLOCATION_BYTES: u32 = 100;

    /// Largest allocation a generated `new` may request, in bytes (16 KB).
    pub const MAX_ALLOCATION_BYTES: u32 = 16 * 1024;
}

/// Root configuration for one simulation session.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use vmsim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.page_size_bytes, 4096);
/// assert_eq!(config.total_ram_frames, 100);
/// assert_eq!(config.ram_total_kb(), 400);
/// ```
///
/// Deserializing from JSON (typical front-end usage):
///
/// ```
/// use vmsim_core::config::SimConfig;
///
/// let json = r#"{
///     "total_ram_frames": 3,
///     "workload": {
///         "process_count": 2,
///         "op_count": 50
///     }
/// }"#;
///
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.total_ram_frames, 3);
/// assert_eq!(config.hit_time, 1);
/// assert_eq!(config.workload.process_count, 2);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Size of one page / one frame in bytes.
    #[serde(default = "SimConfig::default_page_size")]
    pub page_size_bytes: u32,

    /// Number of physical RAM frames.
    #[serde(default = "SimConfig::default_ram_frames")]
    pub total_ram_frames: usize,

    /// Simulated cost of a page hit in seconds.
    #[serde(default = "SimConfig::default_hit_time")]
    pub hit_time: u64,

    /// Simulated cost of a page fault in seconds.
    #[serde(default = "SimConfig::default_fault_time")]
    pub fault_time: u64,

    /// Workload generation parameters.
    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl SimConfig {
    /// Returns the default page size in bytes.
    fn default_page_size() -> u32 {
        defaults::PAGE_SIZE_BYTES
    }

    /// Returns the default RAM frame count.
    fn default_ram_frames() -> usize {
        defaults::TOTAL_RAM_FRAMES
    }

    /// Returns the default hit cost in seconds.
    fn default_hit_time() -> u64 {
        defaults::HIT_TIME
    }

    /// Returns the default fault cost in seconds.
    fn default_fault_time() -> u64 {
        defaults::FAULT_TIME
    }

    /// Total RAM capacity in kilobytes.
    pub fn ram_total_kb(&self) -> u64 {
        self.total_ram_frames as u64 * (self.page_size_bytes as u64 / 1024)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            page_size_bytes: defaults::PAGE_SIZE_BYTES,
            total_ram_frames: defaults::TOTAL_RAM_FRAMES,
            hit_time: defaults::HIT_TIME,
            fault_time: defaults::FAULT_TIME,
            workload: WorkloadConfig::default(),
        }
    }
}

/// Parameters for synthetic workload generation.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkloadConfig {
    /// Number of simulated processes.
    #[serde(default = "WorkloadConfig::default_process_count")]
    pub process_count: usize,

    /// Number of instructions to generate (terminating kills may be appended
    /// past this count).
    #[serde(default = "WorkloadConfig::default_op_count")]
    pub op_count: usize,

    /// Smallest allocation size a generated `new` may request, in bytes.
    #[serde(default = "WorkloadConfig::default_min_allocation")]
    pub min_allocation_bytes: u32,

    /// Largest allocation size a generated `new` may request, in bytes.
    #[serde(default = "WorkloadConfig::default_max_allocation")]
    pub max_allocation_bytes: u32,
}

impl WorkloadConfig {
    /// Returns the default process count.
    fn default_process_count() -> usize {
        defaults::PROCESS_COUNT
    }

    /// Returns the default instruction count.
    fn default_op_count() -> usize {
        defaults::OP_COUNT
    }

    /// Returns the default minimum allocation size in bytes.
    fn default_min_allocation() -> u32 {
        defaults::MIN_ALLOCATION_BYTES
    }

    /// Returns the default maximum allocation size in bytes.
    fn default_max_allocation() -> u32 {
        defaults::MAX_ALLOCATION_BYTES
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            process_count: defaults::PROCESS_COUNT,
            op_count: defaults::OP_COUNT,
            min_allocation_bytes: defaults::MIN_ALLOCATION_BYTES,
            max_allocation_bytes: defaults::MAX_ALLOCATION_BYTES,
        }
    }
}
