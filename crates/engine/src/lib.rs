//! Virtual-memory simulator library.
//!
//! This crate implements a deterministic page-replacement simulator with the following:
//! 1. **Workload:** Instruction model (`new`/`use`/`delete`/`kill`), seeded generator, parser.
//! 2. **Policies:** FIFO, Second Chance, MRU, LRU, Random, and Optimal victim selection.
//! 3. **Core:** RAM frames, the MMU of live logical pages, and the per-policy engine.
//! 4. **Simulation:** Workload file loader and the dual-policy session driver.
//! 5. **Statistics:** Hit/fault/time/fragmentation metrics and comparison reporting.

/// Shared identity types and the engine error enum.
pub mod common;
/// Simulator configuration (defaults, workload parameters).
pub mod config;
/// RAM frames, logical pages, the MMU, and the simulation engine.
pub mod core;
/// Replacement-policy dispatch and the six policy implementations.
pub mod policies;
/// Deterministic seed derivation and per-consumer RNG streams.
pub mod rng;
/// Workload file loader and the dual-policy session driver.
pub mod sim;
/// Performance metrics and comparison reporting.
pub mod stats;
/// Instruction model, workload generation, parsing, serialization.
pub mod workload;

/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Per-policy simulation engine; apply one instruction at a time.
pub use crate::core::Engine;
/// The closed set of replacement algorithms.
pub use crate::policies::AlgorithmName;
/// Dual-policy driver; construct with `sim::new_session`.
pub use crate::sim::{new_session, Session};
