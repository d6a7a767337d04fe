//! Vector index engine for memvec
//!
//! This crate builds the searchable layer on top of `memvec-core`:
//! - distance: per-measure scoring (L2 distance, cosine, dot product)
//! - table_scan: brute-force index over a dense row-major matrix
//! - collection: lock-guarded index with paging and id restriction
//! - database: first-writer-wins registry of named collections
//!
//! Nothing is persisted. A process restart starts from empty collections.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod database;
pub mod distance;
pub mod table_scan;

pub use collection::{SearchOptions, VectorCollection};
pub use database::{
    IndexConfig, VectorDatabase, CONFIG_FILE_NAME, DEFAULT_SEARCH_LIMIT, MAX_INITIAL_CAPACITY,
};
pub use table_scan::{TableScanIndex, TableScanView};

pub use memvec_core::{
    ArrayLike, CollectionId, ItemId, Ranking, VectorCollectionConfig, VectorCollectionItem,
    VectorCollectionResult, VectorError, VectorIndexMeasure, VectorResult,
};
