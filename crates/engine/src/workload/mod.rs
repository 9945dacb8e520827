//! Workload model and tooling.
//!
//! A workload is an ordered list of process memory instructions. This module
//! provides:
//! 1. **Model:** The `ProcessInstruction` enum and its textual rendering.
//! 2. **Generation:** A seeded synthetic-workload generator.
//! 3. **Parsing:** The line parser (with non-fatal warnings) and serializer.

/// Seeded synthetic workload generation.
pub mod generate;
/// The instruction model.
pub mod instruction;
/// Line parser and serializer for the textual workload format.
pub mod parse;

pub use generate::generate_workload;
pub use instruction::ProcessInstruction;
pub use parse::{parse_workload, serialize_workload, ParseWarning, ParsedWorkload};
