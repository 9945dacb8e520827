//! Seeded synthetic workload generation.
//!
//! The generator drives a set of simulated processes with a single ChaCha8
//! stream derived from the user's seed. Per step it picks a living process
//! uniformly at random and draws an operation:
//!
//! - a process with no live pointers always allocates;
//! - otherwise u < 0.1 is a kill candidate, u < 0.5 a `new`, u < 0.8 a
//!   `use`, and the rest a `delete`.
//!
//! A kill candidate is downgraded to a `new` while the stream is still in
//! its first quarter, or when the chosen process is the last one living;
//! both conditions depend only on the seed-driven stream, so generation is
//! deterministic in the seed. After the requested count, a terminating
//! `kill` is appended for every process still alive (the stream may exceed
//! the requested count).

use rand::Rng;

use crate::config::WorkloadConfig;
use crate::rng::seeded_rng;

use super::instruction::ProcessInstruction;

/// RNG stream label for workload generation.
const STREAM_LABEL: &str = "workload";

/// One simulated process during generation.
struct ProcessSlot {
    pid: String,
    ptrs: Vec<u32>,
    alive: bool,
}

/// The operation chosen for one generation step.
enum Draw {
    New,
    Use,
    Delete,
    Kill,
}

/// Generates a workload from the configuration and seed.
///
/// Returns the instruction list and the next unused pointer id.
pub fn generate_workload(config: &WorkloadConfig, seed: &str) -> (Vec<ProcessInstruction>, u32) {
    let mut rng = seeded_rng(seed, STREAM_LABEL);
    let mut slots: Vec<ProcessSlot> = (1..=config.process_count)
        .map(|i| ProcessSlot {
            pid: format!("P{}", i),
            ptrs: Vec::new(),
            alive: true,
        })
        .collect();

    let mut out = Vec::with_capacity(config.op_count);
    let mut next_ptr_id: u32 = 1;

    while out.len() < config.op_count {
        let living: Vec<usize> = (0..slots.len()).filter(|&i| slots[i].alive).collect();
        if living.is_empty() {
            break;
        }
        let slot_index = living[rng.random_range(0..living.len())];

        let mut draw = if slots[slot_index].ptrs.is_empty() {
            Draw::New
        } else {
            let u: f64 = rng.random_range(0.0..1.0);
            if u < 0.1 {
                Draw::Kill
            } else if u < 0.5 {
                Draw::New
            } else if u < 0.8 {
                Draw::Use
            } else {
                Draw::Delete
            }
        };

        // Don't let the workload terminate its processes too aggressively.
        if matches!(draw, Draw::Kill) && (out.len() < config.op_count / 4 || living.len() == 1) {
            draw = Draw::New;
        }

        let slot = &mut slots[slot_index];
        match draw {
            Draw::New => {
                let size_bytes =
                    rng.random_range(config.min_allocation_bytes..=config.max_allocation_bytes);
                let ptr_id = next_ptr_id;
                next_ptr_id += 1;
                slot.ptrs.push(ptr_id);
                out.push(ProcessInstruction::New {
                    pid: slot.pid.clone(),
                    size_bytes,
                    ptr_id,
                });
            }
            Draw::Use => {
                let ptr_id = slot.ptrs[rng.random_range(0..slot.ptrs.len())];
                out.push(ProcessInstruction::Use { ptr_id });
            }
            Draw::Delete => {
                let ptr_id = slot.ptrs.remove(rng.random_range(0..slot.ptrs.len()));
                out.push(ProcessInstruction::Delete { ptr_id });
            }
            Draw::Kill => {
                slot.alive = false;
                slot.ptrs.clear();
                out.push(ProcessInstruction::Kill {
                    pid: slot.pid.clone(),
                });
            }
        }
    }

    // Terminate whatever is still running. These kills are kept even though
    // they push the stream past the requested count.
    for slot in slots.iter_mut().filter(|s| s.alive) {
        slot.alive = false;
        slot.ptrs.clear();
        out.push(ProcessInstruction::Kill {
            pid: slot.pid.clone(),
        });
    }

    (out, next_ptr_id)
}
