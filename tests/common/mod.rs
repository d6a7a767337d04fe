//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Once};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use memvec::prelude::*;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route engine logs to the test harness.
///
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=memvec::db=debug`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Collection name unique within this test process.
pub fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Fixtures
// ============================================================================

/// Fresh database with a freshly created collection.
pub fn collection(
    dimensions: usize,
    measure: VectorIndexMeasure,
) -> (VectorDatabase, Arc<VectorCollection>) {
    init_tracing();
    let db = VectorDatabase::new();
    let config = VectorCollectionConfig::new(unique_name("test"), dimensions, measure)
        .expect("valid collection config");
    let collection = db.get_collection(config).expect("collection created");
    (db, collection)
}

/// The three-point L2 collection used throughout the suite:
/// A = [0, 0], B = [3, 4], C = [1, 0].
pub fn abc_collection() -> Arc<VectorCollection> {
    let (_db, collection) = collection(2, VectorIndexMeasure::L2);
    collection
        .add(vec![
            VectorCollectionItem::new("A", vec![0.0, 0.0]),
            VectorCollectionItem::new("B", vec![3.0, 4.0]),
            VectorCollectionItem::new("C", vec![1.0, 0.0]),
        ])
        .expect("fixture items added");
    collection
}

/// Ids of a result list, in order.
pub fn result_ids(results: &[VectorCollectionResult]) -> Vec<ItemId> {
    results.iter().map(|r| r.id.clone()).collect()
}

/// Fixture-friendly id constructor.
pub fn id(s: &str) -> ItemId {
    ItemId::from(s)
}

// ============================================================================
// Random Data Generation
// ============================================================================

/// Generate a seeded random vector with components in [-1, 1).
pub fn seeded_vector(dimension: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..dimension).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
}

/// Generate a random vector (counter-seeded).
pub fn random_vector(dimension: usize) -> Vec<f32> {
    let seed = COUNTER.fetch_add(1, Ordering::SeqCst);
    seeded_vector(dimension, seed)
}

/// Generate `count` items with integer ids `0..count`.
pub fn random_items(count: usize, dimension: usize, seed: u64) -> Vec<VectorCollectionItem> {
    (0..count)
        .map(|i| {
            VectorCollectionItem::new(i as i64, seeded_vector(dimension, seed ^ ((i as u64) << 8)))
        })
        .collect()
}

/// Score of `a` against `b`, computed independently of the engine.
pub fn reference_score(a: &[f32], b: &[f32], measure: VectorIndexMeasure) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    match measure {
        VectorIndexMeasure::L2 => a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt(),
        VectorIndexMeasure::Dot => dot,
        VectorIndexMeasure::Cosine => {
            let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if na == 0.0 || nb == 0.0 {
                0.0
            } else {
                dot / (na * nb)
            }
        }
    }
}

/// Check that scores are ordered best-first for `measure`.
pub fn assert_ranked(results: &[VectorCollectionResult], measure: VectorIndexMeasure) {
    for pair in results.windows(2) {
        let ordering = measure.ranking().compare(pair[0].score, pair[1].score);
        assert_ne!(
            ordering,
            std::cmp::Ordering::Greater,
            "results out of order: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
}
