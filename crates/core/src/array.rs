//! Conversion of array-like numeric input into stored vectors
//!
//! Collections store `f32` vectors. Callers may hold their data as `f64`,
//! fixed arrays, or JSON arrays; [`ArrayLike`] converts each of these and
//! fails instead of coercing anything that is not a number.

use serde_json::Value as JsonValue;

use crate::error::{VectorError, VectorResult};

/// Numeric sequence convertible to an `f32` vector
pub trait ArrayLike {
    /// Convert to an owned `f32` vector
    ///
    /// Length is not checked here; the collection compares it against its
    /// dimensionality.
    fn to_vector(&self) -> VectorResult<Vec<f32>>;
}

impl ArrayLike for [f32] {
    fn to_vector(&self) -> VectorResult<Vec<f32>> {
        Ok(self.to_vec())
    }
}

impl ArrayLike for [f64] {
    fn to_vector(&self) -> VectorResult<Vec<f32>> {
        self.iter()
            .enumerate()
            .map(|(i, &v)| narrow(i, v))
            .collect()
    }
}

impl ArrayLike for Vec<f32> {
    fn to_vector(&self) -> VectorResult<Vec<f32>> {
        self.as_slice().to_vector()
    }
}

impl ArrayLike for Vec<f64> {
    fn to_vector(&self) -> VectorResult<Vec<f32>> {
        self.as_slice().to_vector()
    }
}

impl<const N: usize> ArrayLike for [f32; N] {
    fn to_vector(&self) -> VectorResult<Vec<f32>> {
        self.as_slice().to_vector()
    }
}

impl<const N: usize> ArrayLike for [f64; N] {
    fn to_vector(&self) -> VectorResult<Vec<f32>> {
        self.as_slice().to_vector()
    }
}

impl ArrayLike for JsonValue {
    fn to_vector(&self) -> VectorResult<Vec<f32>> {
        let elements = self
            .as_array()
            .ok_or_else(|| VectorError::invalid_vector(format!("expected an array, got {}", kind(self))))?;

        elements
            .iter()
            .enumerate()
            .map(|(i, element)| match element.as_f64() {
                Some(v) => narrow(i, v),
                None => Err(VectorError::invalid_vector(format!(
                    "element {} is not a number ({})",
                    i,
                    kind(element)
                ))),
            })
            .collect()
    }
}

impl<T: ArrayLike + ?Sized> ArrayLike for &T {
    fn to_vector(&self) -> VectorResult<Vec<f32>> {
        (**self).to_vector()
    }
}

/// Narrow an f64 component, refusing finite values that overflow f32
fn narrow(index: usize, v: f64) -> VectorResult<f32> {
    if v.is_finite() && v.abs() > f64::from(f32::MAX) {
        return Err(VectorError::invalid_vector(format!(
            "element {} ({}) is out of f32 range",
            index, v
        )));
    }
    Ok(v as f32)
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
