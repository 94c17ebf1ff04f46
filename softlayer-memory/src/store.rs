//! In-memory storage implementation of the document backend.
//!
//! Documents are BSON values kept in HashMaps behind async-aware read-write
//! locks. Registered schema fields are tracked per collection: existing
//! documents are backfilled with the field default at registration time,
//! and inserts fill any missing registered fields, so visibility predicates
//! always have a field to match against.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Uuid};
use mea::rwlock::RwLock;
use tracing::debug;

use softlayer_core::{
    backend::{
        DocumentBackend, DocumentBackendBuilder, FieldSpec, UpdateDoc, UpdateSummary,
    },
    document::ID_FIELD,
    error::{SoftStoreError, SoftStoreResult},
    filter::{Expr, Query, SortDirection},
};

use crate::evaluator::{Comparable, DocumentMatcher};

type CollectionMap = HashMap<String, Bson>;
type StoreMap = HashMap<String, CollectionMap>;
type SchemaMap = HashMap<String, Vec<FieldSpec>>;

fn matches(filter: Option<&Expr>, document: &Bson) -> bool {
    match filter {
        None => true,
        Some(expr) => DocumentMatcher::new(document)
            .matches(expr)
            .unwrap_or(false),
    }
}

/// Merges an update payload into a document, returning whether anything
/// actually changed.
fn merge_update(document: &mut Bson, update: &UpdateDoc) -> bool {
    let Some(map) = document.as_document_mut() else {
        return false;
    };

    let mut changed = false;

    for (field, value) in update.iter() {
        if map.get(field) != Some(value) {
            map.insert(field.clone(), value.clone());
            changed = true;
        }
    }

    changed
}

/// Thread-safe in-memory document storage backend.
///
/// Cloneable; clones share the same underlying data via `Arc`. Queries scan
/// all documents in a collection, so the `indexed` flag on registered
/// fields is recorded but has no effect here.
///
/// The document's ID is exposed to filters as a string under
/// [`ID_FIELD`], the way the id-based entry points expect.
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection name -> (document id -> document)
    store: Arc<RwLock<StoreMap>>,
    /// collection name -> registered field specs
    schemas: Arc<RwLock<SchemaMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
            schemas: Arc::new(RwLock::new(SchemaMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

#[async_trait]
impl DocumentBackend for InMemoryStore {
    async fn insert_documents(
        &self,
        documents: Vec<(Uuid, Bson)>,
        collection: &str,
    ) -> SoftStoreResult<()> {
        let schemas = self.schemas.read().await;
        let specs = schemas.get(collection);

        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        for (id, mut doc) in documents {
            let key = id.to_string();

            if collection_map.contains_key(&key) {
                return Err(SoftStoreError::DocumentAlreadyExists(
                    key,
                    collection.to_string(),
                ));
            }

            let Some(map) = doc.as_document_mut() else {
                return Err(SoftStoreError::InvalidDocument(
                    "only BSON documents can be stored".to_string(),
                ));
            };

            map.insert(ID_FIELD.to_string(), Bson::String(key.clone()));

            if let Some(specs) = specs {
                for spec in specs {
                    if !map.contains_key(&spec.name) {
                        map.insert(spec.name.clone(), spec.default.clone());
                    }
                }
            }

            collection_map.insert(key, doc);
        }

        Ok(())
    }

    async fn find_documents(&self, query: Query, collection: &str) -> SoftStoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        let filtered_docs = match &query.filter {
            Some(filter) => DocumentMatcher::filter_documents(collection_map.values(), filter)?,
            None => collection_map
                .values()
                .cloned()
                .collect::<Vec<_>>(),
        };

        let mut docs = filtered_docs;

        if let Some(sort) = &query.sort {
            docs.sort_by(|a, b| {
                let left = a
                    .as_document()
                    .and_then(|doc| doc.get(&sort.field))
                    .map(Comparable::from)
                    .unwrap_or(Comparable::Null);
                let right = b
                    .as_document()
                    .and_then(|doc| doc.get(&sort.field))
                    .map(Comparable::from)
                    .unwrap_or(Comparable::Null);

                match sort.direction {
                    SortDirection::Asc => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
                    SortDirection::Desc => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
                }
            });
        }

        Ok(docs
            .into_iter()
            .skip(query.offset.unwrap_or(0))
            .take(query.limit.unwrap_or(usize::MAX))
            .collect())
    }

    async fn find_one_and_update(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
        collection: &str,
    ) -> SoftStoreResult<Option<Bson>> {
        let mut store = self.store.write().await;
        let Some(collection_map) = store.get_mut(collection) else {
            return Ok(None);
        };

        for doc in collection_map.values_mut() {
            if matches(filter.as_ref(), doc) {
                merge_update(doc, &update);
                return Ok(Some(doc.clone()));
            }
        }

        Ok(None)
    }

    async fn update_one(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
        collection: &str,
    ) -> SoftStoreResult<UpdateSummary> {
        let mut store = self.store.write().await;
        let Some(collection_map) = store.get_mut(collection) else {
            return Ok(UpdateSummary::default());
        };

        for doc in collection_map.values_mut() {
            if matches(filter.as_ref(), doc) {
                let modified = merge_update(doc, &update);
                return Ok(UpdateSummary {
                    matched_count: 1,
                    modified_count: modified as u64,
                });
            }
        }

        Ok(UpdateSummary::default())
    }

    async fn update_many(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
        collection: &str,
    ) -> SoftStoreResult<UpdateSummary> {
        let mut store = self.store.write().await;
        let Some(collection_map) = store.get_mut(collection) else {
            return Ok(UpdateSummary::default());
        };

        let mut summary = UpdateSummary::default();

        for doc in collection_map.values_mut() {
            if matches(filter.as_ref(), doc) {
                summary.matched_count += 1;
                summary.modified_count += merge_update(doc, &update) as u64;
            }
        }

        Ok(summary)
    }

    async fn replace_one(
        &self,
        filter: Option<Expr>,
        replacement: Bson,
        collection: &str,
    ) -> SoftStoreResult<UpdateSummary> {
        let schemas = self.schemas.read().await;
        let specs = schemas.get(collection);

        let mut store = self.store.write().await;
        let Some(collection_map) = store.get_mut(collection) else {
            return Ok(UpdateSummary::default());
        };

        for (key, doc) in collection_map.iter_mut() {
            if matches(filter.as_ref(), doc) {
                let mut replacement = replacement;

                // The stored ID survives a body replacement, and registered
                // fields the replacement omits fall back to their defaults.
                if let Some(map) = replacement.as_document_mut() {
                    map.insert(ID_FIELD.to_string(), Bson::String(key.clone()));

                    if let Some(specs) = specs {
                        for spec in specs {
                            if !map.contains_key(&spec.name) {
                                map.insert(spec.name.clone(), spec.default.clone());
                            }
                        }
                    }
                }

                let modified = *doc != replacement;
                *doc = replacement;

                return Ok(UpdateSummary {
                    matched_count: 1,
                    modified_count: modified as u64,
                });
            }
        }

        Ok(UpdateSummary::default())
    }

    async fn destroy_documents(&self, ids: Vec<Uuid>, collection: &str) -> SoftStoreResult<()> {
        let mut store = self.store.write().await;
        let collection_map = match store.get_mut(collection) {
            Some(col) => col,
            None => {
                return Err(SoftStoreError::CollectionNotFound(collection.to_string()));
            }
        };

        for id in ids {
            let key = id.to_string();

            if collection_map.remove(&key).is_none() {
                return Err(SoftStoreError::DocumentNotFound(key, collection.to_string()));
            }
        }

        Ok(())
    }

    async fn register_field(&self, collection: &str, spec: FieldSpec) -> SoftStoreResult<()> {
        let mut schemas = self.schemas.write().await;
        let mut store = self.store.write().await;

        debug!(collection, field = %spec.name, indexed = spec.indexed, "registering field");

        // Backfill documents already stored without the field.
        if let Some(collection_map) = store.get_mut(collection) {
            for doc in collection_map.values_mut() {
                if let Some(map) = doc.as_document_mut() {
                    if !map.contains_key(&spec.name) {
                        map.insert(spec.name.clone(), spec.default.clone());
                    }
                }
            }
        }

        let specs = schemas
            .entry(collection.to_string())
            .or_default();
        specs.retain(|existing| existing.name != spec.name);
        specs.push(spec);

        Ok(())
    }

    async fn create_collection(&self, name: &str) -> SoftStoreResult<()> {
        self.store
            .write()
            .await
            .entry(name.to_string())
            .or_insert_with(HashMap::new);

        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> SoftStoreResult<()> {
        // Lock order is schemas before store, everywhere.
        let mut schemas = self.schemas.write().await;
        let mut store = self.store.write().await;

        if store.remove(name).is_none() {
            return Err(SoftStoreError::CollectionNotFound(name.to_string()));
        }

        schemas.remove(name);

        Ok(())
    }

    async fn list_collections(&self) -> SoftStoreResult<Vec<String>> {
        Ok(self
            .store
            .read()
            .await
            .keys()
            .cloned()
            .collect())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl DocumentBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds a freshly initialized store; always succeeds.
    async fn build(self) -> SoftStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
