//! VectorDatabase: named collection registry
//!
//! A database maps collection ids to shared [`VectorCollection`] handles.
//! The first caller to ask for an id decides the collection's dimensions
//! and measure; later callers get the same instance back regardless of the
//! config they pass (first-writer-wins).
//!
//! ## Thread Safety
//!
//! The map is a `DashMap`. Check-then-insert happens under the shard lock
//! of the id's entry, so two threads racing to create the same collection
//! both end up holding the same `Arc`.

pub mod config;
mod registry;

pub use config::{IndexConfig, CONFIG_FILE_NAME, DEFAULT_SEARCH_LIMIT, MAX_INITIAL_CAPACITY};

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use memvec_core::{CollectionId, VectorCollectionConfig, VectorResult};

use crate::collection::VectorCollection;

/// Registry of named vector collections
pub struct VectorDatabase {
    config: IndexConfig,
    collections: DashMap<CollectionId, Arc<VectorCollection>>,
}

impl VectorDatabase {
    /// Create an empty database with default settings
    pub fn new() -> Self {
        VectorDatabase {
            config: IndexConfig::default(),
            collections: DashMap::new(),
        }
    }

    /// Create an empty database whose collections use `config`
    ///
    /// # Errors
    /// - `InvalidConfig` if `config` fails validation
    pub fn with_config(config: IndexConfig) -> VectorResult<Self> {
        config.validate()?;
        Ok(VectorDatabase {
            config,
            collections: DashMap::new(),
        })
    }

    /// Process-wide database, created with default settings on first use
    pub fn global() -> &'static VectorDatabase {
        registry::global()
    }

    /// Create the process-wide database with explicit settings
    ///
    /// Must run before anything calls [`VectorDatabase::global`].
    ///
    /// # Errors
    /// - `InvalidConfig` if `config` is invalid or the global database
    ///   already exists
    pub fn init_global(config: IndexConfig) -> VectorResult<&'static VectorDatabase> {
        registry::init_global(config)
    }

    /// Settings applied to collections this database creates
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Get the collection named by `config.id`, creating it if absent
    ///
    /// An existing collection is returned unchanged even when its
    /// dimensions or measure differ from `config`; the mismatch is logged.
    ///
    /// # Errors
    /// - `InvalidDimension` / `InvalidCollectionName` if the collection has
    ///   to be created and `config` is invalid
    pub fn get_collection(
        &self,
        config: VectorCollectionConfig,
    ) -> VectorResult<Arc<VectorCollection>> {
        if let Some(existing) = self.collections.get(config.id.as_str()) {
            let collection = Arc::clone(existing.value());
            drop(existing);
            self.note_reuse(&collection, &config);
            return Ok(collection);
        }

        match self.collections.entry(config.id.clone()) {
            Entry::Occupied(entry) => {
                let collection = Arc::clone(entry.get());
                drop(entry);
                self.note_reuse(&collection, &config);
                Ok(collection)
            }
            Entry::Vacant(entry) => {
                config.validate()?;
                let dimensions = config.dimensions;
                let measure = config.measure;
                let collection =
                    Arc::new(VectorCollection::with_index_config(config, &self.config)?);
                entry.insert(Arc::clone(&collection));

                info!(
                    target: "memvec::db",
                    collection = %collection.id(),
                    dimensions,
                    measure = %measure,
                    "Created collection"
                );
                Ok(collection)
            }
        }
    }

    /// Look up an existing collection without creating it
    pub fn collection(&self, id: &str) -> Option<Arc<VectorCollection>> {
        self.collections
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Ids of all collections, sorted
    pub fn list_collections(&self) -> Vec<CollectionId> {
        let mut ids: Vec<CollectionId> = self
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort();
        ids
    }

    /// Number of collections
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Check if no collection exists
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    fn note_reuse(&self, collection: &VectorCollection, requested: &VectorCollectionConfig) {
        if collection.dimensions() != requested.dimensions
            || collection.measure() != requested.measure
        {
            warn!(
                target: "memvec::db",
                collection = %collection.id(),
                dimensions = collection.dimensions(),
                measure = %collection.measure(),
                requested_dimensions = requested.dimensions,
                requested_measure = %requested.measure,
                "Collection exists with a different config, ignoring the requested one"
            );
        } else {
            debug!(
                target: "memvec::db",
                collection = %collection.id(),
                "Reusing collection"
            );
        }
    }
}

impl std::fmt::Debug for VectorDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorDatabase")
            .field("config", &self.config)
            .field("collections", &self.collections.len())
            .finish()
    }
}

impl Default for VectorDatabase {
    fn default() -> Self {
        Self::new()
    }
}
