//! Distance and similarity functions
//!
//! Scores follow the measure's own convention rather than being normalized:
//! - `L2` yields a Euclidean distance (lower = more similar).
//! - `Cosine` yields a similarity in [-1, 1] (higher = more similar).
//! - `Dot` yields the raw inner product (higher = more similar).
//!
//! No implicit normalization of stored vectors. Zero-norm operands score
//! 0.0 under cosine instead of producing NaN.
//!
//! Sums accumulate in f64 and narrow to f32 at the end. Squares of large
//! finite f32 components would overflow an f32 accumulator.

use memvec_core::VectorIndexMeasure;

/// Compute the score between two vectors under `measure`
pub fn compute_score(a: &[f32], b: &[f32], measure: VectorIndexMeasure) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Dimension mismatch in score computation");

    match measure {
        VectorIndexMeasure::L2 => euclidean_distance(a, b),
        VectorIndexMeasure::Cosine => cosine_similarity(a, b),
        VectorIndexMeasure::Dot => dot_product(a, b),
    }
}

/// Score `query` against every row of a row-major matrix
///
/// `matrix.len()` must be a multiple of `dimensions`; one score is
/// returned per row, in row order.
pub fn score_rows(
    query: &[f32],
    matrix: &[f32],
    dimensions: usize,
    measure: VectorIndexMeasure,
) -> Vec<f32> {
    debug_assert!(dimensions > 0);
    debug_assert_eq!(matrix.len() % dimensions, 0);

    let scorer = Scorer::new(query, measure);
    matrix
        .chunks_exact(dimensions)
        .map(|row| scorer.score(row))
        .collect()
}

/// Scores rows against one fixed query
///
/// Caches the query norm so cosine scans don't recompute it per row.
pub struct Scorer<'a> {
    query: &'a [f32],
    query_norm: f64,
    measure: VectorIndexMeasure,
}

impl<'a> Scorer<'a> {
    /// Prepare a scorer for `query`
    pub fn new(query: &'a [f32], measure: VectorIndexMeasure) -> Self {
        let query_norm = match measure {
            VectorIndexMeasure::Cosine => l2_norm(query),
            VectorIndexMeasure::L2 | VectorIndexMeasure::Dot => 0.0,
        };
        Scorer {
            query,
            query_norm,
            measure,
        }
    }

    /// Score one stored row
    pub fn score(&self, row: &[f32]) -> f32 {
        debug_assert_eq!(self.query.len(), row.len());

        match self.measure {
            VectorIndexMeasure::L2 => euclidean_distance(self.query, row),
            VectorIndexMeasure::Cosine => {
                cosine_from_parts(dot_wide(self.query, row), self.query_norm, l2_norm(row))
            }
            VectorIndexMeasure::Dot => dot_product(self.query, row),
        }
    }
}

/// Cosine similarity: dot(a,b) / (||a|| * ||b||)
///
/// Range: [-1, 1], higher = more similar
/// Returns 0.0 if either vector has zero norm
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    cosine_from_parts(dot_wide(a, b), l2_norm(a), l2_norm(b))
}

fn cosine_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        // Rounding can push |cos| a hair past 1
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0) as f32
    }
}

/// Dot product (inner product)
///
/// Range: unbounded, higher = more similar. A product beyond f32 range
/// saturates to an infinity.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    dot_wide(a, b) as f32
}

fn dot_wide(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum()
}

/// L2 norm (Euclidean length)
fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt()
}

/// Euclidean distance (L2 distance)
fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (f64::from(x) - f64::from(y)).powi(2))
        .sum::<f64>()
        .sqrt() as f32
}
