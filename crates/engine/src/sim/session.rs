//! The dual-policy session driver.
//!
//! A session owns the instruction stream and two engines: one fixed to the
//! optimal policy, one running the user's chosen algorithm. `step()` applies
//! the next instruction to both engines atomically (the optimal engine
//! additionally sees the full stream and the current index through its
//! replacement context), then verifies both engines' invariants. There are
//! no suspension points inside a step; stopping between steps is immediate.
//!
//! Given the same seed, algorithm, and instructions, every sequence of
//! snapshots a session produces is bit-reproducible.

use crate::common::SimError;
use crate::config::SimConfig;
use crate::core::{Engine, Mmu, PageFrame};
use crate::policies::AlgorithmName;
use crate::stats::AlgorithmMetrics;
use crate::workload::ProcessInstruction;

/// Result of one driver step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the instruction stream is exhausted.
    pub reached_end: bool,
}

/// Read-only view of one engine's state.
pub struct StateView<'a> {
    /// The algorithm this engine runs.
    pub algorithm: AlgorithmName,
    /// The frame table.
    pub frames: &'a [PageFrame],
    /// Live pages and active pointers.
    pub mmu: &'a Mmu,
    /// Performance metrics.
    pub metrics: &'a AlgorithmMetrics,
}

/// Read-only views of both engines.
pub struct Snapshot<'a> {
    /// The optimal-policy engine.
    pub opt: StateView<'a>,
    /// The chosen-policy engine.
    pub chosen: StateView<'a>,
}

/// Dual-policy driver advancing OPT and the chosen policy in lock-step.
pub struct Session {
    config: SimConfig,
    seed: String,
    algorithm: AlgorithmName,
    instructions: Vec<ProcessInstruction>,
    initial_next_ptr_id: u32,
    cursor: usize,
    opt: Engine,
    chosen: Engine,
}

/// Creates a session over `instructions` for the chosen algorithm.
///
/// Both engines are seeded from per-policy streams of the same seed.
/// `initial_next_ptr_id` is the first pointer id not used by the stream;
/// it is preserved across `reset()` so a front-end can keep extending the
/// workload with fresh ids.
pub fn new_session(
    config: SimConfig,
    seed: &str,
    algorithm: AlgorithmName,
    instructions: Vec<ProcessInstruction>,
    initial_next_ptr_id: u32,
) -> Session {
    let opt = Engine::new(&config, AlgorithmName::Opt, seed);
    let chosen = Engine::new(&config, algorithm, seed);
    Session {
        config,
        seed: seed.to_string(),
        algorithm,
        instructions,
        initial_next_ptr_id,
        cursor: 0,
        opt,
        chosen,
    }
}

impl Session {
    /// Applies the next instruction to both engines.
    ///
    /// A step at the end of the stream is a no-op that reports
    /// `reached_end`. The optimal engine receives the full stream and the
    /// current index; the chosen engine receives them only when the chosen
    /// algorithm is itself OPT.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError`] from either engine or from the step-boundary
    /// invariant check; the session must be considered dead afterwards.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        if self.cursor >= self.instructions.len() {
            return Ok(StepOutcome { reached_end: true });
        }

        let instruction = &self.instructions[self.cursor];
        self.opt
            .apply(instruction, Some((self.instructions.as_slice(), self.cursor)))?;
        let chosen_future = if self.algorithm == AlgorithmName::Opt {
            Some((self.instructions.as_slice(), self.cursor))
        } else {
            None
        };
        self.chosen.apply(instruction, chosen_future)?;

        self.opt.verify_invariants()?;
        self.chosen.verify_invariants()?;

        self.cursor += 1;
        Ok(StepOutcome {
            reached_end: self.cursor == self.instructions.len(),
        })
    }

    /// Steps until the stream is exhausted.
    pub fn run_to_end(&mut self) -> Result<(), SimError> {
        while !self.step()?.reached_end {}
        Ok(())
    }

    /// Rebuilds both engines from the original seed and rewinds the stream.
    pub fn reset(&mut self) {
        self.opt = Engine::new(&self.config, AlgorithmName::Opt, &self.seed);
        self.chosen = Engine::new(&self.config, self.algorithm, &self.seed);
        self.cursor = 0;
    }

    /// Read-only views of both engines.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            opt: StateView {
                algorithm: AlgorithmName::Opt,
                frames: &self.opt.frames,
                mmu: &self.opt.mmu,
                metrics: &self.opt.metrics,
            },
            chosen: StateView {
                algorithm: self.algorithm,
                frames: &self.chosen.frames,
                mmu: &self.chosen.mmu,
                metrics: &self.chosen.metrics,
            },
        }
    }

    /// The chosen algorithm.
    pub fn algorithm(&self) -> AlgorithmName {
        self.algorithm
    }

    /// The instruction stream.
    pub fn instructions(&self) -> &[ProcessInstruction] {
        &self.instructions
    }

    /// Index of the next instruction to apply.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First pointer id not used by the stream.
    pub fn next_ptr_id(&self) -> u32 {
        self.initial_next_ptr_id
    }
}
