//! Data model for vector collections
//!
//! These types describe what callers hand to a collection and what they get
//! back from it. The scoring and indexing logic lives in `memvec-engine`.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::array::ArrayLike;
use crate::error::{VectorError, VectorResult};

/// Maximum collection name length in bytes
pub const MAX_COLLECTION_NAME_BYTES: usize = 256;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of an item, unique within a collection
///
/// Callers key items either by integer or by string. The two spaces are
/// disjoint: `ItemId::from(7)` and `ItemId::from("7")` are different items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// Integer identifier
    Int(i64),
    /// String identifier
    Str(String),
}

impl ItemId {
    /// Borrow the string form, if this is a string id
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ItemId::Str(s) => Some(s),
            ItemId::Int(_) => None,
        }
    }

    /// Get the integer form, if this is an integer id
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ItemId::Int(i) => Some(*i),
            ItemId::Str(_) => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(i) => write!(f, "{}", i),
            ItemId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(v: i64) -> Self {
        ItemId::Int(v)
    }
}

impl From<i32> for ItemId {
    fn from(v: i32) -> Self {
        ItemId::Int(i64::from(v))
    }
}

impl From<u32> for ItemId {
    fn from(v: u32) -> Self {
        ItemId::Int(i64::from(v))
    }
}

impl From<&str> for ItemId {
    fn from(v: &str) -> Self {
        ItemId::Str(v.to_string())
    }
}

impl From<String> for ItemId {
    fn from(v: String) -> Self {
        ItemId::Str(v)
    }
}

impl From<&String> for ItemId {
    fn from(v: &String) -> Self {
        ItemId::Str(v.clone())
    }
}

impl From<&ItemId> for ItemId {
    fn from(v: &ItemId) -> Self {
        v.clone()
    }
}

/// Name of a collection within a `VectorDatabase`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    /// Create a collection id, validating the name
    ///
    /// # Validation Rules
    /// - Cannot be empty
    /// - Cannot exceed 256 bytes
    /// - Cannot contain null bytes
    pub fn new(name: impl Into<String>) -> VectorResult<Self> {
        let name = name.into();
        validate_collection_name(&name)?;
        Ok(CollectionId(name))
    }

    /// Get the collection name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CollectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CollectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Validate a collection name
pub fn validate_collection_name(name: &str) -> VectorResult<()> {
    if name.is_empty() {
        return Err(VectorError::InvalidCollectionName {
            name: name.to_string(),
            reason: "Collection name cannot be empty".to_string(),
        });
    }

    if name.len() > MAX_COLLECTION_NAME_BYTES {
        return Err(VectorError::InvalidCollectionName {
            name: name.to_string(),
            reason: format!(
                "Collection name cannot exceed {} bytes",
                MAX_COLLECTION_NAME_BYTES
            ),
        });
    }

    if name.contains('\0') {
        return Err(VectorError::InvalidCollectionName {
            name: name.to_string(),
            reason: "Collection name cannot contain null bytes".to_string(),
        });
    }

    Ok(())
}

// ============================================================================
// Measures
// ============================================================================

/// Scoring function used to rank vectors
///
/// The measure fixes both the score and the ranking direction:
/// - `L2` returns a distance, lower is better.
/// - `Cosine` and `Dot` return similarities, higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorIndexMeasure {
    /// Euclidean distance: sqrt(sum((a_i - b_i)^2))
    /// Range: [0, inf), lower = more similar
    #[default]
    L2,

    /// Cosine similarity: dot(a,b) / (||a|| * ||b||)
    /// Range: [-1, 1], higher = more similar.
    /// A zero-norm operand scores 0.0.
    Cosine,

    /// Dot product (raw value)
    /// Range: unbounded, higher = more similar
    Dot,
}

impl VectorIndexMeasure {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            VectorIndexMeasure::L2 => "l2",
            VectorIndexMeasure::Cosine => "cosine",
            VectorIndexMeasure::Dot => "dot",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l2" | "euclidean" => Some(VectorIndexMeasure::L2),
            "cosine" | "css" => Some(VectorIndexMeasure::Cosine),
            "dot" | "dot_product" | "inner_product" => Some(VectorIndexMeasure::Dot),
            _ => None,
        }
    }

    /// Direction in which scores of this measure are ranked
    pub fn ranking(&self) -> Ranking {
        match self {
            VectorIndexMeasure::L2 => Ranking::Ascending,
            VectorIndexMeasure::Cosine | VectorIndexMeasure::Dot => Ranking::Descending,
        }
    }
}

impl fmt::Display for VectorIndexMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordering direction of a measure's scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Lower scores rank first (distances)
    Ascending,
    /// Higher scores rank first (similarities)
    Descending,
}

impl Ranking {
    /// Order two scores best-first
    ///
    /// NaN scores rank worst in both directions, whatever their sign bit.
    /// Everything else uses IEEE total ordering, so infinities from an
    /// overflowing dot product still compare.
    pub fn compare(&self, a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match self {
                Ranking::Ascending => a.total_cmp(&b),
                Ranking::Descending => b.total_cmp(&a),
            },
        }
    }
}

// ============================================================================
// Configuration, items and results
// ============================================================================

/// Creation-time parameters of a collection - immutable after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorCollectionConfig {
    /// Collection name
    pub id: CollectionId,

    /// Vector dimensionality. Must be > 0.
    pub dimensions: usize,

    /// Measure used for scoring and ranking
    #[serde(default)]
    pub measure: VectorIndexMeasure,
}

impl VectorCollectionConfig {
    /// Create a new config with validation
    pub fn new(
        id: impl Into<String>,
        dimensions: usize,
        measure: VectorIndexMeasure,
    ) -> VectorResult<Self> {
        let config = VectorCollectionConfig {
            id: CollectionId::new(id)?,
            dimensions,
            measure,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate a config built by hand or deserialized
    pub fn validate(&self) -> VectorResult<()> {
        validate_collection_name(self.id.as_str())?;
        if self.dimensions == 0 {
            return Err(VectorError::InvalidDimension {
                dimension: self.dimensions,
            });
        }
        Ok(())
    }
}

/// An item to insert or update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorCollectionItem {
    /// Item identifier
    pub id: ItemId,

    /// Vector to store under `id`
    pub vector: Vec<f32>,
}

impl VectorCollectionItem {
    /// Create a new item
    pub fn new(id: impl Into<ItemId>, vector: impl Into<Vec<f32>>) -> Self {
        VectorCollectionItem {
            id: id.into(),
            vector: vector.into(),
        }
    }

    /// Create an item from any array-like numeric input
    pub fn from_array<A: ArrayLike + ?Sized>(id: impl Into<ItemId>, array: &A) -> VectorResult<Self> {
        Ok(VectorCollectionItem {
            id: id.into(),
            vector: array.to_vector()?,
        })
    }

    /// Get the vector dimensionality
    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// A ranked query result
///
/// For `l2` the score is a distance (lower is better); for `cosine` and
/// `dot` it is a similarity (higher is better).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorCollectionResult {
    /// Matching item
    pub id: ItemId,

    /// Score under the collection's measure
    pub score: f32,
}

impl VectorCollectionResult {
    /// Create a new result
    pub fn new(id: ItemId, score: f32) -> Self {
        VectorCollectionResult { id, score }
    }
}
