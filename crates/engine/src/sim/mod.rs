//! Simulation driving: workload loading and the dual-policy session.
//!
//! 1. **Loader:** Reads and writes workload files in the textual format.
//! 2. **Session:** Runs the optimal policy and the user's chosen policy in
//!    lock-step over one instruction stream and exposes read-only snapshots.

/// Workload file reading and writing.
pub mod loader;
/// The dual-policy session driver.
pub mod session;

pub use loader::{load_workload, write_workload};
pub use session::{new_session, Session, Snapshot, StateView, StepOutcome};
