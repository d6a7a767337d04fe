//! Process-wide database instance
//!
//! Callers that don't thread a `VectorDatabase` through their code share
//! this one. It is created on first use and lives until the process exits.

use once_cell::sync::OnceCell;

use memvec_core::{VectorError, VectorResult};

use super::{IndexConfig, VectorDatabase};

/// Global database (created lazily, never dropped)
static GLOBAL_DATABASE: OnceCell<VectorDatabase> = OnceCell::new();

/// Get the global database, creating it with default settings on first use
pub(super) fn global() -> &'static VectorDatabase {
    GLOBAL_DATABASE.get_or_init(VectorDatabase::new)
}

/// Create the global database with explicit settings
///
/// # Errors
/// - `InvalidConfig` if `config` is invalid or the global database was
///   already created
pub(super) fn init_global(config: IndexConfig) -> VectorResult<&'static VectorDatabase> {
    let db = VectorDatabase::with_config(config)?;
    GLOBAL_DATABASE.set(db).map_err(|_| {
        VectorError::InvalidConfig("global vector database is already initialized".to_string())
    })?;
    Ok(global())
}
