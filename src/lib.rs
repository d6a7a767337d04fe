//! memvec - in-memory vector similarity index
//!
//! memvec keeps named collections of fixed-dimension `f32` vectors and
//! answers k-nearest-neighbor queries by scanning every stored row.
//!
//! # Quick Start
//!
//! ```ignore
//! use memvec::prelude::*;
//!
//! let db = VectorDatabase::new();
//! let docs = db.get_collection(VectorCollectionConfig::new("docs", 3, VectorIndexMeasure::Cosine)?)?;
//!
//! docs.add(vec![
//!     VectorCollectionItem::new("a", vec![1.0, 0.0, 0.0]),
//!     VectorCollectionItem::new("b", vec![0.0, 1.0, 0.0]),
//! ])?;
//!
//! let hits = docs.find_nearest_from_array(&[0.9f32, 0.1, 0.0], SearchOptions::new().with_limit(1))?;
//! assert_eq!(hits[0].id, ItemId::from("a"));
//! ```
//!
//! # Architecture
//!
//! - `memvec-core`: identifiers, measures, records, errors
//! - `memvec-engine`: scoring, the table-scan index, collections and the
//!   collection registry
//!
//! Everything lives in process memory; nothing is written to disk except an
//! optional `memvec.toml` settings file.

pub use memvec_engine::*;

/// Glob-import of the types most callers need
pub mod prelude {
    pub use memvec_engine::{
        ArrayLike, CollectionId, IndexConfig, ItemId, SearchOptions, VectorCollection,
        VectorCollectionConfig, VectorCollectionItem, VectorCollectionResult, VectorDatabase,
        VectorError, VectorIndexMeasure, VectorResult,
    };
}
