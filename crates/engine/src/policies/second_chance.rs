//! Second Chance replacement policy.
//!
//! A clock-hand variant of FIFO. The sweep starts at the hand position;
//! every page found with its reference bit set is spared once (the bit is
//! scheduled for clearing) and the hand advances. The first page with a
//! clear bit is the victim. If one full sweep finds every occupied frame
//! referenced, the policy degenerates to FIFO: the page originally at the
//! hand is evicted and all the others have their bits cleared.
//!
//! The sweep itself is read-only. Bit clearing and the hand update are
//! returned in the decision and committed by the engine together with the
//! eviction.

use crate::common::SimError;

use super::{ReplacementContext, ReplacementDecision};

/// Sweeps the clock hand to select a victim.
pub fn pick(context: &ReplacementContext<'_>) -> Result<ReplacementDecision, SimError> {
    let frames = context.frames;
    let count = frames.len();
    let mut cleared = Vec::new();
    let mut first_occupied = None;

    for step in 0..count {
        let position = (context.hand + step) % count;
        let Some(slot) = frames[position].slot.as_ref() else {
            continue;
        };
        let page = context
            .mmu
            .page(slot.page)
            .ok_or(SimError::FrameMappingBroken(position))?;
        if !page.referenced {
            return Ok(ReplacementDecision {
                victim_frame_id: position,
                victim_page: Some(page.id),
                next_hand: Some((position + 1) % count),
                clear_referenced: cleared,
            });
        }
        if first_occupied.is_none() {
            first_occupied = Some((position, page.id));
        }
        cleared.push(page.id);
    }

    // Full sweep, every occupied frame referenced: FIFO fallback to the
    // page the hand started on; all the others lose their bit.
    let (victim_frame_id, victim_page) =
        first_occupied.ok_or(SimError::EvictionFromEmptyRam)?;
    cleared.retain(|&id| id != victim_page);
    Ok(ReplacementDecision {
        victim_frame_id,
        victim_page: Some(victim_page),
        next_hand: Some((victim_frame_id + 1) % count),
        clear_referenced: cleared,
    })
}
