//! Least Recently Used (LRU) replacement policy.
//!
//! Evicts the occupied frame whose page has gone untouched the longest,
//! i.e. the smallest last-access timestamp. Because timestamps only move
//! forward and every access restamps its page, the smallest value is the
//! coldest page. Ties are broken by the smallest frame id.

use crate::common::SimError;

use super::{ReplacementContext, ReplacementDecision};

/// Selects the occupied frame with the smallest last-access timestamp.
pub fn pick(context: &ReplacementContext<'_>) -> Result<ReplacementDecision, SimError> {
    let (frame_id, slot) = context
        .frames
        .iter()
        .enumerate()
        .filter_map(|(id, frame)| frame.slot.as_ref().map(|slot| (id, slot)))
        .min_by_key(|(id, slot)| (slot.last_access, *id))
        .ok_or(SimError::EvictionFromEmptyRam)?;
    Ok(ReplacementDecision::evict(frame_id, slot.page))
}
