//! Table-scan vector index
//!
//! Brute-force O(N·D) nearest-neighbor search over a dense matrix. There is
//! no pruning structure: every query scores every visible row.
//!
//! # Layout
//!
//! - `data`: row-major matrix, row `i` occupies
//!   `data[i * dimensions..(i + 1) * dimensions]`
//! - `ids`: identifier of each row, `ids[i]` belongs to row `i`
//! - `lookup`: identifier -> row
//!
//! # Critical Invariants
//!
//! - `data.len() == ids.len() * dimensions` and `ids.len() == lookup.len()`
//! - `lookup[ids[i]] == i` for every row, so ids are unique
//! - Rows are never removed or reordered. Updates overwrite in place.

use rustc_hash::FxHashMap;

use memvec_core::{ItemId, Ranking, VectorError, VectorIndexMeasure, VectorResult};

use crate::distance::Scorer;

/// Brute-force vector index
pub struct TableScanIndex {
    dimensions: usize,
    measure: VectorIndexMeasure,
    data: Vec<f32>,
    ids: Vec<ItemId>,
    lookup: FxHashMap<ItemId, usize>,
}

impl TableScanIndex {
    /// Create an empty index
    ///
    /// # Errors
    /// - `InvalidDimension` if `dimensions` is 0
    pub fn new(dimensions: usize, measure: VectorIndexMeasure) -> VectorResult<Self> {
        Self::with_capacity(dimensions, measure, 0)
    }

    /// Create an empty index with room for `capacity` rows
    ///
    /// # Errors
    /// - `InvalidDimension` if `dimensions` is 0
    /// - `InvalidConfig` if `capacity` rows can't be reserved
    pub fn with_capacity(
        dimensions: usize,
        measure: VectorIndexMeasure,
        capacity: usize,
    ) -> VectorResult<Self> {
        if dimensions == 0 {
            return Err(VectorError::InvalidDimension { dimension: 0 });
        }

        let reserve_failed = |what: &str| {
            VectorError::InvalidConfig(format!(
                "cannot reserve {} rows of dimension {} ({})",
                capacity, dimensions, what
            ))
        };
        let floats = capacity
            .checked_mul(dimensions)
            .ok_or_else(|| reserve_failed("size overflows"))?;

        let mut data = Vec::new();
        data.try_reserve_exact(floats)
            .map_err(|_| reserve_failed("matrix allocation failed"))?;
        let mut ids = Vec::new();
        ids.try_reserve_exact(capacity)
            .map_err(|_| reserve_failed("id allocation failed"))?;
        let mut lookup = FxHashMap::default();
        lookup
            .try_reserve(capacity)
            .map_err(|_| reserve_failed("lookup allocation failed"))?;

        Ok(TableScanIndex {
            dimensions,
            measure,
            data,
            ids,
            lookup,
        })
    }

    /// Get the vector dimensionality
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Get the measure
    pub fn measure(&self) -> VectorIndexMeasure {
        self.measure
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Check if an id is stored
    pub fn contains(&self, id: &ItemId) -> bool {
        self.lookup.contains_key(id)
    }

    /// Get the stored vector of an id
    pub fn get(&self, id: &ItemId) -> Option<&[f32]> {
        self.lookup.get(id).map(|&row| self.row(row))
    }

    /// Identifiers in row order
    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    /// Iterate `(id, vector)` pairs in row order
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &[f32])> {
        self.ids.iter().zip(self.data.chunks_exact(self.dimensions))
    }

    fn row(&self, row: usize) -> &[f32] {
        let start = row * self.dimensions;
        &self.data[start..start + self.dimensions]
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert or update a vector (upsert semantics)
    ///
    /// An existing id keeps its row and has the vector overwritten in place;
    /// a new id is appended as the last row. Returns `true` if the id was
    /// newly inserted.
    ///
    /// # Errors
    /// - `DimensionMismatch` if `vector.len() != dimensions`. The index is
    ///   left untouched.
    pub fn upsert(&mut self, id: ItemId, vector: &[f32]) -> VectorResult<bool> {
        if vector.len() != self.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimensions,
                got: vector.len(),
            });
        }

        if let Some(&row) = self.lookup.get(&id) {
            let start = row * self.dimensions;
            self.data[start..start + self.dimensions].copy_from_slice(vector);
            return Ok(false);
        }

        let row = self.ids.len();
        self.data.extend_from_slice(vector);
        self.lookup.insert(id.clone(), row);
        self.ids.push(id);
        Ok(true)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// View over every row
    pub fn view(&self) -> TableScanView<'_> {
        TableScanView {
            index: self,
            rows: None,
        }
    }

    /// View restricted to the rows whose id is in `ids`
    ///
    /// Relative row order is preserved. Ids that aren't stored are dropped
    /// silently; a restriction is a best-effort filter, not an assertion
    /// that the ids exist. Duplicates collapse to one row.
    pub fn restrict_to<'a, I>(&self, ids: I) -> TableScanView<'_>
    where
        I: IntoIterator<Item = &'a ItemId>,
    {
        let mut rows: Vec<usize> = ids
            .into_iter()
            .filter_map(|id| self.lookup.get(id).copied())
            .collect();
        rows.sort_unstable();
        rows.dedup();

        TableScanView {
            index: self,
            rows: Some(rows),
        }
    }

    /// The `n` best rows for `query`, best first
    ///
    /// # Errors
    /// - `DimensionMismatch` if the query has the wrong length
    pub fn find_nearest_from_array(
        &self,
        query: &[f32],
        n: usize,
    ) -> VectorResult<Vec<(ItemId, f32)>> {
        self.view().find_nearest_from_array(query, n)
    }

    /// The `n` best rows for the stored vector of `id`, best first
    ///
    /// The id itself is part of the candidate set.
    ///
    /// # Errors
    /// - `ItemNotFound` if `id` is not stored
    pub fn find_nearest_from_id(&self, id: &ItemId, n: usize) -> VectorResult<Vec<(ItemId, f32)>> {
        self.view().find_nearest_from_id(id, n)
    }

    /// Verify the lockstep invariant between matrix, ids and lookup
    pub fn check_invariants(&self) -> VectorResult<()> {
        if self.data.len() != self.ids.len() * self.dimensions {
            return Err(VectorError::Internal(format!(
                "matrix holds {} floats for {} rows of dimension {}",
                self.data.len(),
                self.ids.len(),
                self.dimensions
            )));
        }

        if self.ids.len() != self.lookup.len() {
            return Err(VectorError::Internal(format!(
                "{} ids but {} lookup entries",
                self.ids.len(),
                self.lookup.len()
            )));
        }

        for (row, id) in self.ids.iter().enumerate() {
            match self.lookup.get(id) {
                Some(&mapped) if mapped == row => {}
                Some(&mapped) => {
                    return Err(VectorError::Internal(format!(
                        "id {} at row {} maps to row {}",
                        id, row, mapped
                    )))
                }
                None => {
                    return Err(VectorError::Internal(format!(
                        "id {} at row {} missing from lookup",
                        id, row
                    )))
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for TableScanIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableScanIndex")
            .field("dimensions", &self.dimensions)
            .field("measure", &self.measure)
            .field("len", &self.ids.len())
            .finish()
    }
}

/// Read-only view over all or some rows of a [`TableScanIndex`]
pub struct TableScanView<'a> {
    index: &'a TableScanIndex,
    /// Sorted visible rows; `None` means every row
    rows: Option<Vec<usize>>,
}

impl<'a> TableScanView<'a> {
    /// Number of visible rows
    pub fn len(&self) -> usize {
        match &self.rows {
            Some(rows) => rows.len(),
            None => self.index.len(),
        }
    }

    /// Check if no rows are visible
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if `id` is visible through this view
    pub fn contains(&self, id: &ItemId) -> bool {
        self.resolve(id).is_some()
    }

    /// Visible ids in row order
    pub fn ids(&self) -> Vec<&'a ItemId> {
        let index = self.index;
        match &self.rows {
            Some(rows) => rows.iter().map(|&row| &index.ids[row]).collect(),
            None => index.ids.iter().collect(),
        }
    }

    fn resolve(&self, id: &ItemId) -> Option<usize> {
        let row = *self.index.lookup.get(id)?;
        match &self.rows {
            Some(rows) => rows.binary_search(&row).ok().map(|_| row),
            None => Some(row),
        }
    }

    /// The `n` best visible rows for `query`, best first
    ///
    /// Ties are broken by row order. Returns every visible row if fewer
    /// than `n` exist.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the query has the wrong length
    pub fn find_nearest_from_array(
        &self,
        query: &[f32],
        n: usize,
    ) -> VectorResult<Vec<(ItemId, f32)>> {
        let index = self.index;
        if query.len() != index.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: index.dimensions,
                got: query.len(),
            });
        }

        if n == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let scorer = Scorer::new(query, index.measure);
        let mut scored: Vec<(usize, f32)> = match &self.rows {
            Some(rows) => rows
                .iter()
                .map(|&row| (row, scorer.score(index.row(row))))
                .collect(),
            None => index
                .data
                .chunks_exact(index.dimensions)
                .map(|vector| scorer.score(vector))
                .enumerate()
                .collect(),
        };

        rank_top_n(&mut scored, n, index.measure.ranking());

        Ok(scored
            .into_iter()
            .map(|(row, score)| (index.ids[row].clone(), score))
            .collect())
    }

    /// The `n` best visible rows for the stored vector of `id`
    ///
    /// # Errors
    /// - `ItemNotFound` if `id` isn't visible through this view, even when
    ///   the underlying index stores it
    pub fn find_nearest_from_id(&self, id: &ItemId, n: usize) -> VectorResult<Vec<(ItemId, f32)>> {
        let row = self
            .resolve(id)
            .ok_or_else(|| VectorError::item_not_found(id))?;
        let query = self.index.row(row);
        self.find_nearest_from_array(query, n)
    }
}

/// Keep the `n` best `(row, score)` pairs, sorted best first
///
/// Row number is the secondary key, which makes the order total and
/// equal scores come out in row order.
fn rank_top_n(scored: &mut Vec<(usize, f32)>, n: usize, ranking: Ranking) {
    let cmp = |a: &(usize, f32), b: &(usize, f32)| {
        ranking.compare(a.1, b.1).then_with(|| a.0.cmp(&b.0))
    };

    if n < scored.len() {
        scored.select_nth_unstable_by(n, cmp);
        scored.truncate(n);
    }
    scored.sort_unstable_by(cmp);
}
