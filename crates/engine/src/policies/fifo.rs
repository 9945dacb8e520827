//! First-In, First-Out (FIFO) replacement policy.
//!
//! Evicts the occupied frame whose page was loaded earliest, regardless of
//! how recently it was accessed. Ties are broken by the smallest frame id,
//! which also makes the choice deterministic when several pages were loaded
//! by one multi-page instruction at the same timestamp.

use crate::common::SimError;

use super::{ReplacementContext, ReplacementDecision};

/// Selects the occupied frame with the smallest load timestamp.
pub fn pick(context: &ReplacementContext<'_>) -> Result<ReplacementDecision, SimError> {
    let (frame_id, slot) = context
        .frames
        .iter()
        .enumerate()
        .filter_map(|(id, frame)| frame.slot.as_ref().map(|slot| (id, slot)))
        .min_by_key(|(id, slot)| (slot.loaded_at, *id))
        .ok_or(SimError::EvictionFromEmptyRam)?;
    Ok(ReplacementDecision::evict(frame_id, slot.page))
}
