//! Optimal (clairvoyant) replacement policy.
//!
//! Evicts the page whose next use lies farthest in the future instruction
//! stream. A `use(ptr)` dereferences every page of its pointer, so the next
//! use of a page is the next `use` naming its pointer; `new`, `delete`, and
//! `kill` do not count as uses. Pages never used again have infinite
//! distance and are evicted first. Ties are broken by the smallest frame id.
//!
//! Distances are measured from the index of the instruction currently being
//! applied, so pages of the pointer being dereferenced right now are at
//! distance zero and never chosen over anything with a later (or no) use.

use std::cmp::Reverse;

use crate::common::SimError;
use crate::workload::ProcessInstruction;

use super::{ReplacementContext, ReplacementDecision};

/// Selects the occupied frame whose page is needed farthest from now.
pub fn pick(context: &ReplacementContext<'_>) -> Result<ReplacementDecision, SimError> {
    let (stream, current_index) = context.future.ok_or(SimError::FutureUnavailable)?;
    let suffix = &stream[current_index.min(stream.len())..];

    let (frame_id, page) = context
        .frames
        .iter()
        .enumerate()
        .filter_map(|(id, frame)| frame.slot.as_ref().map(|slot| (id, slot.page)))
        .map(|(id, page)| {
            let distance = next_use_distance(suffix, page.ptr_id);
            (distance, id, page)
        })
        .max_by_key(|&(distance, id, _)| (distance, Reverse(id)))
        .map(|(_, id, page)| (id, page))
        .ok_or(SimError::EvictionFromEmptyRam)?;
    Ok(ReplacementDecision::evict(frame_id, page))
}

/// Offset of the next `use` of `ptr_id` in `suffix`, or `u64::MAX` when the
/// pointer is never used again.
fn next_use_distance(suffix: &[ProcessInstruction], ptr_id: u32) -> u64 {
    suffix
        .iter()
        .position(|instruction| {
            matches!(instruction, ProcessInstruction::Use { ptr_id: used } if *used == ptr_id)
        })
        .map_or(u64::MAX, |offset| offset as u64)
}
