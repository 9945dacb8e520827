//! Fatal simulator errors.
//!
//! This module defines the error taxonomy for the engine. It covers:
//! 1. **Policy misuse:** A replacement policy asked to evict from empty RAM,
//!    or asked for a victim without the context it needs.
//! 2. **State corruption:** The frame/page bidirectional mapping, the
//!    active-pointers table, or the accumulated metrics disagreeing with the
//!    authoritative state at a step boundary.
//!
//! These errors signal engine bugs, never workload problems: malformed
//! workload lines and unknown pointer ids are non-fatal and handled in the
//! workload and engine layers as logged warnings.

use std::fmt;

use super::ids::PageId;

/// A fatal error raised by the simulation engine.
///
/// Any of these aborts the session; none is recoverable by retrying the
/// step, because the simulator state is no longer trustworthy.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// A replacement policy was invoked while no frame was occupied.
    ///
    /// Reaching a policy implies RAM is full; an empty frame table at that
    /// point means the engine's free-frame search is broken.
    EvictionFromEmptyRam,

    /// The Optimal policy was invoked without the future instruction suffix.
    FutureUnavailable,

    /// A policy chose a victim frame that holds no page.
    VictimFrameEmpty(usize),

    /// A policy's reported victim page does not match the page actually
    /// resident in the victim frame.
    VictimMismatch(usize),

    /// An occupied frame names a page that is missing from the MMU or does
    /// not point back at the frame.
    FrameMappingBroken(usize),

    /// A resident page names a frame that does not hold it.
    PageMappingBroken(PageId),

    /// A page exists in the MMU without a matching active-pointer entry.
    OrphanPage(PageId),

    /// An active-pointer entry has no pages left in the MMU.
    EmptyPointer(u32),

    /// An accumulated metric disagrees with the authoritative state.
    ///
    /// The associated value names the metric and both sides of the mismatch.
    MetricsInconsistent(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::EvictionFromEmptyRam => {
                write!(f, "replacement policy invoked with no occupied frame")
            }
            SimError::FutureUnavailable => {
                write!(f, "optimal policy invoked without the future instruction stream")
            }
            SimError::VictimFrameEmpty(frame_id) => {
                write!(f, "policy selected empty frame {} as victim", frame_id)
            }
            SimError::VictimMismatch(frame_id) => {
                write!(f, "policy victim page disagrees with frame {}", frame_id)
            }
            SimError::FrameMappingBroken(frame_id) => {
                write!(f, "frame {} names a page that does not map back to it", frame_id)
            }
            SimError::PageMappingBroken(page) => {
                write!(f, "resident page {} is not held by its frame", page)
            }
            SimError::OrphanPage(page) => {
                write!(f, "page {} has no active-pointer entry", page)
            }
            SimError::EmptyPointer(ptr_id) => {
                write!(f, "active pointer {} owns no pages", ptr_id)
            }
            SimError::MetricsInconsistent(detail) => {
                write!(f, "metrics inconsistent with state: {}", detail)
            }
        }
    }
}

impl std::error::Error for SimError {}
