//! Core types for memvec
//!
//! This crate defines the foundational types shared by the index engine and
//! its callers:
//! - ItemId / CollectionId: item and collection identifiers
//! - VectorIndexMeasure / Ranking: scoring function and ranking direction
//! - VectorCollectionConfig: creation-time parameters of a collection
//! - VectorCollectionItem / VectorCollectionResult: input and output records
//! - ArrayLike: conversion of numeric input into stored vectors
//! - VectorError: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod error;
pub mod types;

pub use array::ArrayLike;
pub use error::{VectorError, VectorResult};
pub use types::{
    validate_collection_name, CollectionId, ItemId, Ranking, VectorCollectionConfig,
    VectorCollectionItem, VectorCollectionResult, VectorIndexMeasure, MAX_COLLECTION_NAME_BYTES,
};
