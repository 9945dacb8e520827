//! Random replacement policy.
//!
//! Evicts a uniformly drawn occupied frame. The draw comes from the
//! engine's own ChaCha8 stream (derived from the session seed and the
//! algorithm name), so runs are reproducible and unrelated to the stream
//! that generated the workload.

use rand::Rng;

use crate::common::SimError;

use super::{ReplacementContext, ReplacementDecision};

/// Draws a victim uniformly over the occupied frames.
pub fn pick(context: &mut ReplacementContext<'_>) -> Result<ReplacementDecision, SimError> {
    let occupied: Vec<(usize, _)> = context
        .frames
        .iter()
        .enumerate()
        .filter_map(|(id, frame)| frame.slot.as_ref().map(|slot| (id, slot.page)))
        .collect();
    if occupied.is_empty() {
        return Err(SimError::EvictionFromEmptyRam);
    }
    let (frame_id, page) = occupied[context.rng.random_range(0..occupied.len())];
    Ok(ReplacementDecision::evict(frame_id, page))
}
