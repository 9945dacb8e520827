//! The MMU: live logical pages and the active-pointers table.
//!
//! The MMU holds every live logical page, keyed by its stable id, plus the
//! active-pointers table mapping each pointer id to its owning process and
//! the ordered list of its page ids. The pointer table is the authoritative
//! answer to "which pages does this allocation own, and in what order";
//! the page table is the authoritative answer to "where is this page".
//!
//! Both tables are ordered maps so that iteration, and therefore every
//! derived metric and snapshot, is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use crate::common::PageId;

use super::page::LogicalPage;

/// One entry of the active-pointers table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerEntry {
    /// Owning process token.
    pub pid: String,
    /// Page ids of the allocation, in allocation order.
    pub pages: Vec<PageId>,
}

/// The engine's table of live logical pages and active pointers.
#[derive(Clone, Debug, Default)]
pub struct Mmu {
    pages: BTreeMap<PageId, LogicalPage>,
    pointers: BTreeMap<u32, PointerEntry>,
}

impl Mmu {
    /// Creates an empty MMU.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a newborn page and registers it under its pointer.
    pub fn insert_page(&mut self, page: LogicalPage) {
        let entry = self
            .pointers
            .entry(page.id.ptr_id)
            .or_insert_with(|| PointerEntry {
                pid: page.pid.clone(),
                pages: Vec::new(),
            });
        entry.pages.push(page.id);
        self.pages.insert(page.id, page);
    }

    /// Removes a pointer entry, returning it for page teardown.
    pub fn remove_pointer(&mut self, ptr_id: u32) -> Option<PointerEntry> {
        self.pointers.remove(&ptr_id)
    }

    /// Removes one page from the page table.
    pub fn remove_page(&mut self, id: PageId) -> Option<LogicalPage> {
        self.pages.remove(&id)
    }

    /// Looks up a live page.
    pub fn page(&self, id: PageId) -> Option<&LogicalPage> {
        self.pages.get(&id)
    }

    /// Looks up a live page mutably.
    pub fn page_mut(&mut self, id: PageId) -> Option<&mut LogicalPage> {
        self.pages.get_mut(&id)
    }

    /// Looks up an active pointer.
    pub fn pointer(&self, ptr_id: u32) -> Option<&PointerEntry> {
        self.pointers.get(&ptr_id)
    }

    /// Whether `ptr_id` is live.
    pub fn contains_pointer(&self, ptr_id: u32) -> bool {
        self.pointers.contains_key(&ptr_id)
    }

    /// Live pointer ids owned by `pid`, in id order.
    pub fn pointers_of(&self, pid: &str) -> Vec<u32> {
        self.pointers
            .iter()
            .filter(|(_, entry)| entry.pid == pid)
            .map(|(&ptr_id, _)| ptr_id)
            .collect()
    }

    /// Iterates all live pages in id order.
    pub fn pages(&self) -> impl Iterator<Item = &LogicalPage> {
        self.pages.values()
    }

    /// Iterates the active-pointers table in id order.
    pub fn pointers(&self) -> impl Iterator<Item = (u32, &PointerEntry)> {
        self.pointers.iter().map(|(&ptr_id, entry)| (ptr_id, entry))
    }

    /// Number of live pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of active pointers.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Number of live pages currently in RAM.
    pub fn resident_count(&self) -> usize {
        self.pages.values().filter(|page| page.is_resident()).count()
    }

    /// Number of live pages currently swapped out.
    pub fn swapped_count(&self) -> usize {
        self.pages.len() - self.resident_count()
    }

    /// Number of distinct processes with at least one live page.
    pub fn running_processes(&self) -> usize {
        self.pages
            .values()
            .map(|page| page.pid.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}
