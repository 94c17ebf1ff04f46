//! Registration surface tying entities, policies, and a backend together.
//!
//! [`SoftDeleteStore`] wraps a backend and hands out collection handles.
//! Registration is where the side effects happen: options are resolved
//! into an immutable configuration, the governed fields are declared on the
//! collection's schema, and the resulting policy is moved into the returned
//! handle. The store itself keeps no per-entity state, so entities
//! registered with different options cannot leak configuration into each
//! other.

use bson::Bson;
use tracing::debug;

use crate::{
    backend::{DocumentBackend, FieldSpec, FieldType},
    collection::{SoftCollection, TypedSoftCollection},
    config::{SoftDeleteConfig, SoftDeleteOptions},
    document::Document,
    error::SoftStoreResult,
    policy::SoftDeletePolicy,
};

/// A document store with soft-delete semantics layered on top of a backend.
#[derive(Debug)]
pub struct SoftDeleteStore<B: DocumentBackend> {
    backend: B,
}

impl<B: DocumentBackend> SoftDeleteStore<B> {
    /// Creates a store over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Registers a document type and returns its typed collection handle.
    ///
    /// Resolves the options, creates the collection if needed, and declares
    /// the marker field (indexed) and, when configured, the boolean flag
    /// field on the collection's schema.
    ///
    /// # Errors
    ///
    /// Fails with [`SoftStoreError::Configuration`](crate::error::SoftStoreError::Configuration)
    /// for invalid options; backend errors propagate unchanged.
    pub async fn register<D: Document>(
        &self,
        options: SoftDeleteOptions,
    ) -> SoftStoreResult<TypedSoftCollection<'_, B, D>> {
        let config = options.resolve()?;
        self.register_fields(D::collection_name(), &config)
            .await?;

        Ok(TypedSoftCollection::new(
            D::collection_name().to_string(),
            &self.backend,
            SoftDeletePolicy::new(config),
        ))
    }

    /// Registers a collection by name and returns its untyped handle.
    pub async fn collection(
        &self,
        name: &str,
        options: SoftDeleteOptions,
    ) -> SoftStoreResult<SoftCollection<'_, B>> {
        let config = options.resolve()?;
        self.register_fields(name, &config).await?;

        Ok(SoftCollection::new(
            name.to_string(),
            &self.backend,
            SoftDeletePolicy::new(config),
        ))
    }

    async fn register_fields(
        &self,
        collection: &str,
        config: &SoftDeleteConfig,
    ) -> SoftStoreResult<()> {
        self.backend.create_collection(collection).await?;

        self.backend
            .register_field(
                collection,
                FieldSpec {
                    name: config.marker_field.clone(),
                    field_type: config.marker_type,
                    indexed: true,
                    default: Bson::Null,
                },
            )
            .await?;

        if let Some(flag) = &config.flag_field {
            self.backend
                .register_field(
                    collection,
                    FieldSpec {
                        name: flag.clone(),
                        field_type: FieldType::Boolean,
                        indexed: false,
                        default: Bson::Boolean(false),
                    },
                )
                .await?;
        }

        debug!(
            collection,
            marker_field = %config.marker_field,
            flag_field = config.flag_field.as_deref(),
            visibility = ?config.visibility,
            "registered soft-delete fields",
        );

        Ok(())
    }

    /// Drops a collection and all its documents.
    pub async fn drop_collection(&self, name: &str) -> SoftStoreResult<()> {
        self.backend.drop_collection(name).await
    }

    /// Lists all collections in the store.
    pub async fn list_collections(&self) -> SoftStoreResult<Vec<String>> {
        self.backend.list_collections().await
    }

    /// Shuts down the store, consuming it and releasing backend resources.
    pub async fn shutdown(self) -> SoftStoreResult<()> {
        self.backend.shutdown().await
    }
}
