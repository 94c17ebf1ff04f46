//! Storage backend abstraction consumed by the policy engine.
//!
//! The soft-delete layer performs no I/O of its own; every entry point is a
//! pure filter/payload rewrite followed by a single delegated call on a
//! [`DocumentBackend`]. The trait covers exactly the primitives the rewrites
//! delegate to: insertion, filter-based querying, filter-based updates
//! (returning either the post-update document or an [`UpdateSummary`]),
//! schema field registration, and the hard-delete path that bypasses the
//! policy engine entirely.
//!
//! Implementations must be thread-safe (`Send + Sync`); the concurrency
//! model of a delegated call is the backend's contract, not the engine's.

use async_trait::async_trait;
use bson::{Bson, Uuid};
use std::fmt::Debug;

use crate::{
    error::SoftStoreResult,
    filter::{Expr, Query},
};

/// A partial update payload: field name to new value, merged into every
/// matched document (set semantics, other fields untouched).
pub type UpdateDoc = bson::Document;

/// Outcome summary of an `update_one`/`update_many`/`replace_one` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Number of documents the filter matched.
    pub matched_count: u64,
    /// Number of documents actually changed by the update.
    pub modified_count: u64,
}

/// Declared type of a registered schema field.
///
/// Backends with a schema use this to persist and index the governed
/// fields; schemaless backends may only record it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Boolean,
    Integer,
    Double,
    String,
    DateTime,
    Uuid,
}

impl FieldType {
    /// Infers the field type from a literal BSON value.
    ///
    /// Returns `None` for values with no schema representation (arrays,
    /// nested documents, null).
    pub fn of(value: &Bson) -> Option<FieldType> {
        match value {
            Bson::Boolean(_) => Some(FieldType::Boolean),
            Bson::Int32(_) | Bson::Int64(_) => Some(FieldType::Integer),
            Bson::Double(_) => Some(FieldType::Double),
            Bson::String(_) => Some(FieldType::String),
            Bson::DateTime(_) => Some(FieldType::DateTime),
            Bson::Binary(_) => Some(FieldType::Uuid),
            _ => None,
        }
    }
}

/// A field declaration passed to [`DocumentBackend::register_field`].
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// The field name.
    pub name: String,
    /// The declared value type.
    pub field_type: FieldType,
    /// Whether the backend should index the field.
    pub indexed: bool,
    /// Default value for documents that do not carry the field.
    pub default: Bson,
}

/// Abstract interface for document storage backends.
///
/// The policy engine decides what filter and update payload to send; the
/// backend decides how to execute it. Errors returned here propagate to the
/// caller unchanged.
#[async_trait]
pub trait DocumentBackend: Send + Sync + Debug {
    /// Inserts new documents into a collection.
    ///
    /// Fails if a document with the same ID already exists. Backends that
    /// track registered fields fill any missing ones with their declared
    /// defaults.
    async fn insert_documents(
        &self,
        documents: Vec<(Uuid, Bson)>,
        collection: &str,
    ) -> SoftStoreResult<()>;

    /// Returns the documents matching a query, honoring its limit, offset,
    /// and sort options.
    async fn find_documents(&self, query: Query, collection: &str) -> SoftStoreResult<Vec<Bson>>;

    /// Atomically updates the first document matching the filter and
    /// returns it post-update, or `None` when nothing matched.
    ///
    /// A `None` filter matches any document. The match-then-merge must be
    /// atomic with respect to concurrent updates on the same backend.
    async fn find_one_and_update(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
        collection: &str,
    ) -> SoftStoreResult<Option<Bson>>;

    /// Merges the update payload into the first matching document.
    async fn update_one(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
        collection: &str,
    ) -> SoftStoreResult<UpdateSummary>;

    /// Merges the update payload into every matching document.
    async fn update_many(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
        collection: &str,
    ) -> SoftStoreResult<UpdateSummary>;

    /// Replaces the body of the first matching document entirely.
    async fn replace_one(
        &self,
        filter: Option<Expr>,
        replacement: Bson,
        collection: &str,
    ) -> SoftStoreResult<UpdateSummary>;

    /// Physically removes documents by ID.
    ///
    /// This is the hard-delete path; it bypasses the soft-delete policy.
    async fn destroy_documents(&self, ids: Vec<Uuid>, collection: &str) -> SoftStoreResult<()>;

    /// Declares a field on a collection's schema.
    ///
    /// Documents already stored without the field are backfilled with its
    /// default value.
    async fn register_field(&self, collection: &str, spec: FieldSpec) -> SoftStoreResult<()>;

    /// Creates a collection if it does not already exist.
    async fn create_collection(&self, name: &str) -> SoftStoreResult<()>;

    /// Drops a collection and all its documents.
    async fn drop_collection(&self, name: &str) -> SoftStoreResult<()>;

    /// Lists the names of all collections in the store.
    async fn list_collections(&self) -> SoftStoreResult<Vec<String>>;

    /// Cleanly shuts down the backend, releasing all resources.
    async fn shutdown(self) -> SoftStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait DocumentBackendBuilder {
    type Backend: DocumentBackend;

    async fn build(self) -> SoftStoreResult<Self::Backend>;
}
