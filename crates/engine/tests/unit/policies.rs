//! Replacement-Policy Victim Selection Tests.
//!
//! Verifies the victim rules for FIFO, Second Chance, LRU, MRU, Random, and
//! Optimal by driving small-RAM engines through short streams and
//! inspecting which pages survive in the frame table. Streams use 4 KB
//! allocations so one instruction maps to one page unless stated otherwise.

use crate::common::{apply_all, engine, frame_ptrs, new_op, use_op};
use vmsim_core::common::PageId;
use vmsim_core::policies::AlgorithmName;
use vmsim_core::workload::ProcessInstruction;

fn one_page_news(count: u32) -> Vec<ProcessInstruction> {
    (1..=count).map(|ptr| new_op("A", 4096, ptr)).collect()
}

// ══════════════════════════════════════════════════════════
// 1. FIFO
// ══════════════════════════════════════════════════════════

/// Four single-page allocations into three frames: the first-loaded page
/// is displaced, and the costs are three hits plus one fault.
#[test]
fn fifo_evicts_first_loaded_page() {
    let mut engine = engine(AlgorithmName::Fifo, 3);
    apply_all(&mut engine, &one_page_news(4));

    assert_eq!(frame_ptrs(&engine), vec![Some(4), Some(2), Some(3)]);
    assert_eq!(engine.metrics.page_hits, 3);
    assert_eq!(engine.metrics.page_faults, 1);
    assert_eq!(engine.metrics.total_time, 8);
    assert_eq!(engine.metrics.thrashing_time, 5);
}

/// FIFO only looks at load time: a recent access does not save the oldest
/// page.
#[test]
fn fifo_ignores_recency() {
    let mut engine = engine(AlgorithmName::Fifo, 3);
    let mut stream = one_page_news(3);
    stream.push(use_op(1));
    stream.push(new_op("A", 4096, 4));
    apply_all(&mut engine, &stream);

    assert_eq!(frame_ptrs(&engine), vec![Some(4), Some(2), Some(3)]);
    assert_eq!(engine.metrics.page_faults, 1);
}

// ══════════════════════════════════════════════════════════
// 2. Second Chance
// ══════════════════════════════════════════════════════════

/// Referenced pages are spared once: with pages 1 and 2 referenced and the
/// hand at zero, the sweep clears both bits and evicts page 3.
#[test]
fn second_chance_spares_referenced_pages() {
    let mut engine = engine(AlgorithmName::Sc, 4);
    let mut stream = one_page_news(4);
    stream.push(use_op(1));
    stream.push(use_op(2));
    stream.push(new_op("A", 4096, 5));
    apply_all(&mut engine, &stream);

    assert_eq!(
        frame_ptrs(&engine),
        vec![Some(1), Some(2), Some(5), Some(4)]
    );
    assert_eq!(engine.hand(), 3);
    // The sweep consumed the reprieves.
    assert!(!engine.mmu.page(PageId::new(1, 0)).unwrap().referenced);
    assert!(!engine.mmu.page(PageId::new(2, 0)).unwrap().referenced);
    assert_eq!(engine.metrics.page_faults, 1);
    assert_eq!(engine.metrics.page_hits, 6);
}

/// When every occupied frame is referenced, one full sweep degenerates to
/// FIFO: the page at the starting hand position is the victim and everyone
/// else loses their bit.
#[test]
fn second_chance_full_sweep_falls_back_to_fifo() {
    let mut engine = engine(AlgorithmName::Sc, 3);
    let mut stream = one_page_news(3);
    stream.push(use_op(1));
    stream.push(use_op(2));
    stream.push(use_op(3));
    stream.push(new_op("A", 4096, 4));
    apply_all(&mut engine, &stream);

    assert_eq!(frame_ptrs(&engine), vec![Some(4), Some(2), Some(3)]);
    assert_eq!(engine.hand(), 1);
    assert!(!engine.mmu.page(PageId::new(2, 0)).unwrap().referenced);
    assert!(!engine.mmu.page(PageId::new(3, 0)).unwrap().referenced);
}

/// The hand advances past each victim, so consecutive unreferenced
/// evictions march around the frame table.
#[test]
fn second_chance_hand_advances_between_evictions() {
    let mut engine = engine(AlgorithmName::Sc, 3);
    apply_all(&mut engine, &one_page_news(5));

    assert_eq!(frame_ptrs(&engine), vec![Some(4), Some(5), Some(3)]);
    assert_eq!(engine.hand(), 2);
    assert_eq!(engine.metrics.page_faults, 2);
}

// ══════════════════════════════════════════════════════════
// 3. LRU and MRU
// ══════════════════════════════════════════════════════════

/// After `use(1)`, page 2 has the oldest last access and LRU displaces it.
#[test]
fn lru_evicts_least_recently_used() {
    let mut engine = engine(AlgorithmName::Lru, 3);
    let mut stream = one_page_news(3);
    stream.push(use_op(1));
    stream.push(new_op("A", 4096, 4));
    apply_all(&mut engine, &stream);

    assert_eq!(frame_ptrs(&engine), vec![Some(1), Some(4), Some(3)]);
}

/// Same stream under MRU: the just-used page 1 is the victim instead.
#[test]
fn mru_evicts_most_recently_used() {
    let mut engine = engine(AlgorithmName::Mru, 3);
    let mut stream = one_page_news(3);
    stream.push(use_op(1));
    stream.push(new_op("A", 4096, 4));
    apply_all(&mut engine, &stream);

    assert_eq!(frame_ptrs(&engine), vec![Some(4), Some(2), Some(3)]);
}

/// MRU follows the access timestamp, not the load order.
#[test]
fn mru_tracks_latest_access() {
    let mut engine = engine(AlgorithmName::Mru, 3);
    let mut stream = one_page_news(3);
    stream.push(use_op(2));
    stream.push(new_op("A", 4096, 4));
    apply_all(&mut engine, &stream);

    assert_eq!(frame_ptrs(&engine), vec![Some(1), Some(4), Some(3)]);
}

// ══════════════════════════════════════════════════════════
// 4. Random
// ══════════════════════════════════════════════════════════

/// Two engines with the same seed make identical random choices.
#[test]
fn random_is_reproducible_per_seed() {
    let stream = one_page_news(6);

    let mut first = engine(AlgorithmName::Rnd, 3);
    apply_all(&mut first, &stream);
    let mut second = engine(AlgorithmName::Rnd, 3);
    apply_all(&mut second, &stream);

    assert_eq!(frame_ptrs(&first), frame_ptrs(&second));
    assert_eq!(first.metrics, second.metrics);
}

/// Random evictions keep the books straight: every frame stays occupied
/// and displaced pages are swapped, not lost.
#[test]
fn random_keeps_accounting_consistent() {
    let mut engine = engine(AlgorithmName::Rnd, 3);
    apply_all(&mut engine, &one_page_news(5));

    assert_eq!(engine.mmu.page_count(), 5);
    assert_eq!(engine.mmu.resident_count(), 3);
    assert_eq!(engine.mmu.swapped_count(), 2);
    assert!(engine.frames.iter().all(|frame| frame.is_occupied()));
    assert_eq!(engine.metrics.page_hits, 3);
    assert_eq!(engine.metrics.page_faults, 2);
}

// ══════════════════════════════════════════════════════════
// 5. Optimal
// ══════════════════════════════════════════════════════════

/// With pages 1 and 2 used after the eviction point and page 3 never
/// touched again, the clairvoyant policy sacrifices page 3.
#[test]
fn optimal_evicts_page_never_used_again() {
    let mut engine = engine(AlgorithmName::Opt, 3);
    let mut stream = one_page_news(4);
    stream.push(use_op(1));
    stream.push(use_op(2));
    apply_all(&mut engine, &stream);

    assert_eq!(frame_ptrs(&engine), vec![Some(1), Some(2), Some(4)]);
    assert_eq!(engine.metrics.page_faults, 1);
    assert_eq!(engine.metrics.page_hits, 5);
    assert_eq!(engine.metrics.total_time, 10);
}

/// Among pages all used again, the one whose next use is farthest loses.
#[test]
fn optimal_evicts_farthest_next_use() {
    let mut engine = engine(AlgorithmName::Opt, 3);
    let mut stream = one_page_news(4);
    stream.push(use_op(3));
    stream.push(use_op(2));
    stream.push(use_op(1));
    apply_all(&mut engine, &stream);

    // The fourth allocation displaced page 1 (farthest use); the final
    // use(1) faulted it back over page 4 (never used, smallest frame id).
    assert_eq!(frame_ptrs(&engine), vec![Some(1), Some(2), Some(3)]);
    assert_eq!(engine.metrics.page_faults, 2);
    assert_eq!(engine.metrics.page_hits, 5);
}

/// `delete` and `kill` are not uses: a pointer only deleted in the future
/// counts as never used again.
#[test]
fn optimal_ignores_delete_as_use() {
    let mut engine = engine(AlgorithmName::Opt, 3);
    let stream = vec![
        new_op("A", 4096, 1),
        new_op("A", 4096, 2),
        new_op("A", 4096, 3),
        new_op("A", 4096, 4),
        crate::common::delete_op(3),
        use_op(2),
        use_op(1),
    ];
    apply_all(&mut engine, &stream);

    assert_eq!(frame_ptrs(&engine), vec![Some(1), Some(2), Some(4)]);
    assert_eq!(engine.metrics.page_faults, 1);
    assert_eq!(engine.metrics.page_hits, 5);
    assert_eq!(engine.mmu.page_count(), 3);
}
