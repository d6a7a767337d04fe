//! VectorCollection: a thread-safe table-scan index
//!
//! ## Design
//!
//! A collection owns exactly one [`TableScanIndex`] behind a
//! `parking_lot::RwLock`:
//! - queries take the read lock for the whole scan, including any
//!   `within_ids` restriction and scoring, so readers run in parallel
//! - `add` takes the write lock once per item, so other readers and
//!   writers may interleave between the items of one batch
//!
//! parking_lot's lock is task-fair: a steady stream of readers cannot starve
//! a waiting writer, and writers cannot starve readers.
//!
//! ## Thread Safety
//!
//! VectorCollection is `Send + Sync`; share it as `Arc<VectorCollection>`.

use parking_lot::RwLock;
use tracing::{debug, trace};

use memvec_core::{
    ArrayLike, CollectionId, ItemId, VectorCollectionConfig, VectorCollectionItem,
    VectorCollectionResult, VectorError, VectorIndexMeasure, VectorResult,
};

use crate::database::IndexConfig;
use crate::table_scan::TableScanIndex;

/// Paging and filtering for nearest-neighbor queries
///
/// # Example
///
/// ```ignore
/// let options = SearchOptions::new().within(["a", "b"]).with_limit(10).with_offset(20);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Restrict candidates to these ids; empty means no restriction
    pub within_ids: Vec<ItemId>,
    /// Maximum number of results; `None` uses the collection default
    pub limit: Option<usize>,
    /// Number of leading results to skip
    pub offset: usize,
}

impl SearchOptions {
    /// Options with no restriction, default limit and no offset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of results
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of leading results to skip
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Restrict candidates to `ids`
    pub fn within<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        self.within_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Concurrency-safe collection of `(id, vector)` pairs
pub struct VectorCollection {
    config: VectorCollectionConfig,
    default_limit: usize,
    reject_non_finite: bool,
    index: RwLock<TableScanIndex>,
}

impl std::fmt::Debug for VectorCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // try_read: formatting must not block behind a writer
        f.debug_struct("VectorCollection")
            .field("config", &self.config)
            .field("len", &self.index.try_read().map(|index| index.len()))
            .finish()
    }
}

impl VectorCollection {
    /// Create an empty collection with default index settings
    ///
    /// # Errors
    /// - `InvalidDimension` / `InvalidCollectionName` if `config` is invalid
    pub fn new(config: VectorCollectionConfig) -> VectorResult<Self> {
        Self::with_index_config(config, &IndexConfig::default())
    }

    /// Create an empty collection with explicit index settings
    pub fn with_index_config(
        config: VectorCollectionConfig,
        settings: &IndexConfig,
    ) -> VectorResult<Self> {
        config.validate()?;
        settings.validate()?;

        let index =
            TableScanIndex::with_capacity(config.dimensions, config.measure, settings.initial_capacity)?;

        Ok(VectorCollection {
            config,
            default_limit: settings.default_limit,
            reject_non_finite: settings.reject_non_finite,
            index: RwLock::new(index),
        })
    }

    /// Get the collection id
    pub fn id(&self) -> &CollectionId {
        &self.config.id
    }

    /// Get the creation-time configuration
    pub fn config(&self) -> &VectorCollectionConfig {
        &self.config
    }

    /// Get the vector dimensionality
    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    /// Get the measure
    pub fn measure(&self) -> VectorIndexMeasure {
        self.config.measure
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    /// Check if an item is stored
    pub fn contains(&self, id: impl Into<ItemId>) -> bool {
        self.index.read().contains(&id.into())
    }

    /// Copy of the vector stored under `id`
    pub fn get(&self, id: impl Into<ItemId>) -> Option<Vec<f32>> {
        self.index.read().get(&id.into()).map(<[f32]>::to_vec)
    }

    /// Run `f` against the index under the read lock
    ///
    /// Used by tests and diagnostics that need a consistent picture of the
    /// whole index, e.g. to check its invariants.
    pub fn with_index<R>(&self, f: impl FnOnce(&TableScanIndex) -> R) -> R {
        f(&self.index.read())
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert or update items, one at a time
    ///
    /// Each item is validated, then upserted under its own write lock. Items
    /// are applied in order; the first invalid item aborts the call and the
    /// items before it stay applied. Returns the number of new ids.
    ///
    /// # Errors
    /// - `DimensionMismatch` if an item's vector has the wrong length
    /// - `InvalidVector` if an item has a NaN or infinite component and
    ///   non-finite values are rejected
    pub fn add<I>(&self, items: I) -> VectorResult<usize>
    where
        I: IntoIterator<Item = VectorCollectionItem>,
    {
        let mut seen = 0usize;
        let mut inserted = 0usize;

        for item in items {
            if let Err(e) = self.check_vector(&item.vector) {
                debug!(
                    target: "memvec::collection",
                    collection = %self.config.id,
                    item = %item.id,
                    applied = seen,
                    error = %e,
                    "Rejected item, batch stopped"
                );
                return Err(e);
            }

            let is_new = self.index.write().upsert(item.id, &item.vector)?;
            if is_new {
                inserted += 1;
            }
            seen += 1;
        }

        debug!(
            target: "memvec::collection",
            collection = %self.config.id,
            items = seen,
            inserted,
            "Added items"
        );
        Ok(inserted)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Nearest neighbors of a stored item
    ///
    /// The item ranks among its own neighbors (first, for any measure where
    /// it scores best against itself).
    ///
    /// # Errors
    /// - `ItemNotFound` if `id` isn't stored, or isn't among a non-empty
    ///   `within_ids`
    pub fn find_nearest_from_id(
        &self,
        id: impl Into<ItemId>,
        options: SearchOptions,
    ) -> VectorResult<Vec<VectorCollectionResult>> {
        let id = id.into();
        let (limit, offset) = self.window(&options);

        let index = self.index.read();
        let ranked = if options.within_ids.is_empty() {
            index.find_nearest_from_id(&id, limit.saturating_add(offset))?
        } else {
            index
                .restrict_to(&options.within_ids)
                .find_nearest_from_id(&id, limit.saturating_add(offset))?
        };
        drop(index);

        let results = paginate(ranked, offset);
        trace!(
            target: "memvec::collection",
            collection = %self.config.id,
            kind = "id",
            limit,
            offset,
            restricted = !options.within_ids.is_empty(),
            returned = results.len(),
            "Nearest-neighbor query"
        );
        Ok(results)
    }

    /// Nearest neighbors of an arbitrary vector
    ///
    /// # Errors
    /// - `InvalidVector` if `array` can't be converted, or has a non-finite
    ///   component while those are rejected
    /// - `DimensionMismatch` if `array` has the wrong length
    pub fn find_nearest_from_array<A: ArrayLike + ?Sized>(
        &self,
        array: &A,
        options: SearchOptions,
    ) -> VectorResult<Vec<VectorCollectionResult>> {
        let query = array.to_vector()?;
        self.check_vector(&query)?;
        let (limit, offset) = self.window(&options);

        let index = self.index.read();
        let ranked = if options.within_ids.is_empty() {
            index.find_nearest_from_array(&query, limit.saturating_add(offset))?
        } else {
            index
                .restrict_to(&options.within_ids)
                .find_nearest_from_array(&query, limit.saturating_add(offset))?
        };
        drop(index);

        let results = paginate(ranked, offset);
        trace!(
            target: "memvec::collection",
            collection = %self.config.id,
            kind = "array",
            limit,
            offset,
            restricted = !options.within_ids.is_empty(),
            returned = results.len(),
            "Nearest-neighbor query"
        );
        Ok(results)
    }

    fn window(&self, options: &SearchOptions) -> (usize, usize) {
        (options.limit.unwrap_or(self.default_limit), options.offset)
    }

    fn check_vector(&self, vector: &[f32]) -> VectorResult<()> {
        if vector.len() != self.config.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.config.dimensions,
                got: vector.len(),
            });
        }

        if self.reject_non_finite {
            if let Some((i, v)) = vector.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(VectorError::invalid_vector(format!(
                    "element {} is not finite ({})",
                    i, v
                )));
            }
        }

        Ok(())
    }
}

/// Drop the first `offset` ranked pairs and wrap the rest as results
fn paginate(ranked: Vec<(ItemId, f32)>, offset: usize) -> Vec<VectorCollectionResult> {
    ranked
        .into_iter()
        .skip(offset)
        .map(|(id, score)| VectorCollectionResult::new(id, score))
        .collect()
}
