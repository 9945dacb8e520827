//! Most Recently Used (MRU) replacement policy.
//!
//! Evicts the occupied frame whose page was touched last. Counter-intuitive
//! for general workloads, but effective for cyclic access patterns larger
//! than RAM, where the page just used is the one needed furthest from now.
//! Ties are broken by the smallest frame id.

use std::cmp::Reverse;

use crate::common::SimError;

use super::{ReplacementContext, ReplacementDecision};

/// Selects the occupied frame with the largest last-access timestamp.
pub fn pick(context: &ReplacementContext<'_>) -> Result<ReplacementDecision, SimError> {
    let (frame_id, slot) = context
        .frames
        .iter()
        .enumerate()
        .filter_map(|(id, frame)| frame.slot.as_ref().map(|slot| (id, slot)))
        .max_by_key(|(id, slot)| (slot.last_access, Reverse(*id)))
        .ok_or(SimError::EvictionFromEmptyRam)?;
    Ok(ReplacementDecision::evict(frame_id, slot.page))
}
