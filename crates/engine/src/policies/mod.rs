//! Page-replacement policies.
//!
//! Implements victim selection for a full frame table.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Sc`: Second Chance (clock hand over reference bits).
//! - `Mru`: Most Recently Used.
//! - `Lru`: Least Recently Used.
//! - `Rnd`: Seeded random selection.
//! - `Opt`: Optimal (farthest next use in the future stream).
//!
//! The algorithm set is closed: dispatch is a single match in [`decide`],
//! which keeps the Optimal policy's future-stream parameter type-checked
//! instead of hiding it behind a common function-pointer shape.

/// First-In, First-Out victim selection.
pub mod fifo;
/// Least Recently Used victim selection.
pub mod lru;
/// Most Recently Used victim selection.
pub mod mru;
/// Optimal (clairvoyant) victim selection.
pub mod optimal;
/// Seeded random victim selection.
pub mod random;
/// Second Chance (clock) victim selection.
pub mod second_chance;

use std::fmt;
use std::str::FromStr;

use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use crate::common::{PageId, SimError};
use crate::core::{Mmu, PageFrame};
use crate::workload::ProcessInstruction;

/// Replacement algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlgorithmName {
    /// First-In, First-Out: evict the page loaded earliest.
    #[default]
    #[serde(alias = "Fifo")]
    Fifo,
    /// Second Chance: FIFO with a reference-bit reprieve, driven by a
    /// clock hand.
    #[serde(alias = "Sc", alias = "SecondChance")]
    Sc,
    /// Most Recently Used: evict the page touched last.
    #[serde(alias = "Mru")]
    Mru,
    /// Least Recently Used: evict the page untouched longest.
    #[serde(alias = "Lru")]
    Lru,
    /// Random: evict a uniformly drawn occupied frame.
    #[serde(alias = "Rnd", alias = "Random")]
    Rnd,
    /// Optimal: evict the page whose next use is farthest in the future.
    #[serde(alias = "Opt", alias = "Optimal")]
    Opt,
}

/// Every algorithm, in presentation order.
pub const ALL_ALGORITHMS: &[AlgorithmName] = &[
    AlgorithmName::Fifo,
    AlgorithmName::Sc,
    AlgorithmName::Mru,
    AlgorithmName::Lru,
    AlgorithmName::Rnd,
    AlgorithmName::Opt,
];

impl AlgorithmName {
    /// Canonical upper-case name, also used as the RNG stream label.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmName::Fifo => "FIFO",
            AlgorithmName::Sc => "SC",
            AlgorithmName::Mru => "MRU",
            AlgorithmName::Lru => "LRU",
            AlgorithmName::Rnd => "RND",
            AlgorithmName::Opt => "OPT",
        }
    }
}

impl fmt::Display for AlgorithmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FIFO" => Ok(AlgorithmName::Fifo),
            "SC" | "SECONDCHANCE" => Ok(AlgorithmName::Sc),
            "MRU" => Ok(AlgorithmName::Mru),
            "LRU" => Ok(AlgorithmName::Lru),
            "RND" | "RANDOM" => Ok(AlgorithmName::Rnd),
            "OPT" | "OPTIMAL" => Ok(AlgorithmName::Opt),
            other => Err(format!("unknown algorithm {:?}", other)),
        }
    }
}

/// Everything a policy may consult when choosing a victim.
///
/// The frame table and MMU are read-only views; only the RNG handle is
/// mutable, and only the Random policy draws from it.
pub struct ReplacementContext<'a> {
    /// The frame table. Every policy reads it.
    pub frames: &'a [PageFrame],
    /// The table of live logical pages (reference bits live here).
    pub mmu: &'a Mmu,
    /// The page about to be loaded into the victim's frame.
    pub incoming: PageId,
    /// Full instruction stream and the current index. Optimal only.
    pub future: Option<(&'a [ProcessInstruction], usize)>,
    /// Current clock-hand position. Second Chance only.
    pub hand: usize,
    /// Per-engine policy RNG. Random only.
    pub rng: &'a mut ChaCha8Rng,
}

/// A policy's verdict, applied atomically by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementDecision {
    /// Frame whose page is evicted.
    pub victim_frame_id: usize,
    /// The page the policy believes occupies the victim frame.
    pub victim_page: Option<PageId>,
    /// New clock-hand position. Second Chance only.
    pub next_hand: Option<usize>,
    /// Pages whose reference bit must be cleared when committing the
    /// decision. Second Chance only.
    pub clear_referenced: Vec<PageId>,
}

impl ReplacementDecision {
    /// A plain eviction of `frame_id`/`page` with no auxiliary state.
    fn evict(frame_id: usize, page: PageId) -> Self {
        Self {
            victim_frame_id: frame_id,
            victim_page: Some(page),
            next_hand: None,
            clear_referenced: Vec::new(),
        }
    }
}

/// Selects a victim frame with the given algorithm.
///
/// # Errors
///
/// Returns [`SimError::EvictionFromEmptyRam`] when no frame is occupied
/// (reaching a policy implies RAM is full, so this is an engine bug), and
/// [`SimError::FutureUnavailable`] when the Optimal policy is invoked
/// without the future stream.
pub fn decide(
    algorithm: AlgorithmName,
    mut context: ReplacementContext<'_>,
) -> Result<ReplacementDecision, SimError> {
    if context.frames.iter().all(|frame| frame.slot.is_none()) {
        return Err(SimError::EvictionFromEmptyRam);
    }
    match algorithm {
        AlgorithmName::Fifo => fifo::pick(&context),
        AlgorithmName::Sc => second_chance::pick(&context),
        AlgorithmName::Mru => mru::pick(&context),
        AlgorithmName::Lru => lru::pick(&context),
        AlgorithmName::Rnd => random::pick(&mut context),
        AlgorithmName::Opt => optimal::pick(&context),
    }
}
