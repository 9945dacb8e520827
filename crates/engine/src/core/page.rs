//! Logical pages.
//!
//! A logical page is one page-sized slice of an allocation. While alive it
//! is either resident in a RAM frame or swapped out to a symbolic disk
//! address; the two states are a single enum so they cannot overlap.

use crate::common::PageId;

/// Where a live logical page currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Residency {
    /// In RAM, held by the named frame.
    Resident {
        /// Index of the holding frame.
        frame_id: usize,
    },
    /// Swapped out; the address is symbolic (no data is stored).
    Swapped {
        /// Symbolic disk address.
        disk_address: u64,
    },
}

/// One live logical page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalPage {
    /// Stable identity: pointer id plus index within the pointer.
    pub id: PageId,
    /// Owning process token.
    pub pid: String,
    /// Current location.
    pub residency: Residency,
    /// Simulated time the page last entered RAM.
    pub loaded_at: u64,
    /// Simulated time of the most recent access.
    pub last_access: u64,
    /// Reference bit, consumed by Second Chance.
    pub referenced: bool,
    /// Bytes of the allocation actually backed by this page (≤ page size;
    /// the shortfall on a pointer's last page is internal fragmentation).
    pub content_bytes: u32,
}

impl LogicalPage {
    /// Whether the page is currently in RAM.
    #[inline(always)]
    pub fn is_resident(&self) -> bool {
        matches!(self.residency, Residency::Resident { .. })
    }

    /// The holding frame, if resident.
    pub fn frame_id(&self) -> Option<usize> {
        match self.residency {
            Residency::Resident { frame_id } => Some(frame_id),
            Residency::Swapped { .. } => None,
        }
    }
}
