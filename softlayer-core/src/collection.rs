//! Collection handles exposing the soft-delete operation surface.
//!
//! A collection pairs a backend reference with the entity's
//! [`SoftDeletePolicy`] and exposes the full entry-point family:
//!
//! - Read operations in three visibility variants each: the plain name is
//!   alive-only, `*_deleted` is deleted-only, `*_with_deleted` adds no
//!   predicate at all.
//! - Delete-style operations rewritten to updates that stamp the deletion
//!   marker instead of removing the row, plus `restore` to clear it.
//! - Pass-throughs the policy does not govern: `insert` and the explicit
//!   hard-delete `destroy`.
//!
//! Two handle types exist, mirroring the backend/document split:
//! [`SoftCollection`] works on raw BSON documents, [`TypedSoftCollection`]
//! adds serde conversion for a concrete [`Document`] type.

use bson::{Bson, Uuid};
use std::marker::PhantomData;

use crate::{
    backend::{DocumentBackend, UpdateDoc, UpdateSummary},
    document::{Document, DocumentExt, ID_FIELD},
    error::SoftStoreResult,
    filter::{Expr, Filter, Query},
    policy::{SoftDeletePolicy, Visibility},
};

/// An untyped collection handle with explicit BSON documents.
#[derive(Debug)]
pub struct SoftCollection<'a, B: DocumentBackend> {
    name: String,
    backend: &'a B,
    policy: SoftDeletePolicy,
}

impl<'a, B: DocumentBackend> SoftCollection<'a, B> {
    pub(crate) fn new(name: String, backend: &'a B, policy: SoftDeletePolicy) -> Self {
        Self { name, backend, policy }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the soft-delete policy governing this collection.
    pub fn policy(&self) -> &SoftDeletePolicy {
        &self.policy
    }

    fn id_filter(id: &Uuid) -> Expr {
        Filter::eq(ID_FIELD, id.to_string())
    }

    async fn find_scoped(&self, query: Query, scope: Visibility) -> SoftStoreResult<Vec<Bson>> {
        let query = self.policy.scope_query(query, scope)?;
        self.backend
            .find_documents(query, &self.name)
            .await
    }

    async fn find_one_scoped(
        &self,
        filter: Option<Expr>,
        scope: Visibility,
    ) -> SoftStoreResult<Option<Bson>> {
        let query = Query {
            filter: self.policy.scope_filter(filter, scope)?,
            limit: Some(1),
            ..Query::default()
        };

        Ok(self
            .backend
            .find_documents(query, &self.name)
            .await?
            .into_iter()
            .next())
    }

    async fn find_one_and_update_scoped(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
        scope: Visibility,
    ) -> SoftStoreResult<Option<Bson>> {
        self.backend
            .find_one_and_update(self.policy.scope_filter(filter, scope)?, update, &self.name)
            .await
    }

    async fn update_one_scoped(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
        scope: Visibility,
    ) -> SoftStoreResult<UpdateSummary> {
        self.backend
            .update_one(self.policy.scope_filter(filter, scope)?, update, &self.name)
            .await
    }

    async fn update_many_scoped(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
        scope: Visibility,
    ) -> SoftStoreResult<UpdateSummary> {
        self.backend
            .update_many(self.policy.scope_filter(filter, scope)?, update, &self.name)
            .await
    }

    async fn replace_one_scoped(
        &self,
        filter: Option<Expr>,
        replacement: Bson,
        scope: Visibility,
    ) -> SoftStoreResult<UpdateSummary> {
        self.backend
            .replace_one(self.policy.scope_filter(filter, scope)?, replacement, &self.name)
            .await
    }

    // ---- pass-throughs the policy does not govern ----

    /// Inserts new documents. Documents are created alive.
    pub async fn insert(&self, documents: Vec<(Uuid, Bson)>) -> SoftStoreResult<()> {
        self.backend
            .insert_documents(documents, &self.name)
            .await
    }

    /// Physically removes documents by ID, bypassing the soft-delete
    /// policy entirely.
    pub async fn destroy(&self, ids: Vec<Uuid>) -> SoftStoreResult<()> {
        self.backend
            .destroy_documents(ids, &self.name)
            .await
    }

    // ---- visibility-filtered read family ----

    /// Returns the alive documents matching the query.
    pub async fn find(&self, query: Query) -> SoftStoreResult<Vec<Bson>> {
        self.find_scoped(query, Visibility::Alive).await
    }

    /// Returns the soft-deleted documents matching the query.
    pub async fn find_deleted(&self, query: Query) -> SoftStoreResult<Vec<Bson>> {
        self.find_scoped(query, Visibility::Deleted).await
    }

    /// Returns every document matching the query regardless of state.
    pub async fn find_with_deleted(&self, query: Query) -> SoftStoreResult<Vec<Bson>> {
        self.find_scoped(query, Visibility::All).await
    }

    /// Returns the first alive document matching the filter.
    pub async fn find_one(&self, filter: Option<Expr>) -> SoftStoreResult<Option<Bson>> {
        self.find_one_scoped(filter, Visibility::Alive).await
    }

    /// Returns the first soft-deleted document matching the filter.
    pub async fn find_one_deleted(&self, filter: Option<Expr>) -> SoftStoreResult<Option<Bson>> {
        self.find_one_scoped(filter, Visibility::Deleted).await
    }

    /// Returns the first matching document regardless of state.
    pub async fn find_one_with_deleted(
        &self,
        filter: Option<Expr>,
    ) -> SoftStoreResult<Option<Bson>> {
        self.find_one_scoped(filter, Visibility::All).await
    }

    /// Returns the document with the given ID if it is alive.
    pub async fn find_by_id(&self, id: &Uuid) -> SoftStoreResult<Option<Bson>> {
        self.find_one_scoped(Some(Self::id_filter(id)), Visibility::Alive)
            .await
    }

    /// Returns the document with the given ID if it is soft-deleted.
    pub async fn find_by_id_deleted(&self, id: &Uuid) -> SoftStoreResult<Option<Bson>> {
        self.find_one_scoped(Some(Self::id_filter(id)), Visibility::Deleted)
            .await
    }

    /// Returns the document with the given ID regardless of state.
    pub async fn find_by_id_with_deleted(&self, id: &Uuid) -> SoftStoreResult<Option<Bson>> {
        self.find_one_scoped(Some(Self::id_filter(id)), Visibility::All)
            .await
    }

    /// Updates the first alive document matching the filter and returns it
    /// post-update.
    pub async fn find_one_and_update(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<Bson>> {
        self.find_one_and_update_scoped(filter, update, Visibility::Alive)
            .await
    }

    /// Deleted-only counterpart of [`find_one_and_update`](Self::find_one_and_update).
    pub async fn find_one_and_update_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<Bson>> {
        self.find_one_and_update_scoped(filter, update, Visibility::Deleted)
            .await
    }

    /// Unscoped counterpart of [`find_one_and_update`](Self::find_one_and_update).
    pub async fn find_one_and_update_with_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<Bson>> {
        self.find_one_and_update_scoped(filter, update, Visibility::All)
            .await
    }

    /// Updates the document with the given ID if it is alive and returns it
    /// post-update.
    pub async fn find_by_id_and_update(
        &self,
        id: &Uuid,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<Bson>> {
        self.find_one_and_update_scoped(Some(Self::id_filter(id)), update, Visibility::Alive)
            .await
    }

    /// Deleted-only counterpart of [`find_by_id_and_update`](Self::find_by_id_and_update).
    pub async fn find_by_id_and_update_deleted(
        &self,
        id: &Uuid,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<Bson>> {
        self.find_one_and_update_scoped(Some(Self::id_filter(id)), update, Visibility::Deleted)
            .await
    }

    /// Unscoped counterpart of [`find_by_id_and_update`](Self::find_by_id_and_update).
    pub async fn find_by_id_and_update_with_deleted(
        &self,
        id: &Uuid,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<Bson>> {
        self.find_one_and_update_scoped(Some(Self::id_filter(id)), update, Visibility::All)
            .await
    }

    /// Replaces the body of the first alive document matching the filter.
    pub async fn replace_one(
        &self,
        filter: Option<Expr>,
        replacement: Bson,
    ) -> SoftStoreResult<UpdateSummary> {
        self.replace_one_scoped(filter, replacement, Visibility::Alive)
            .await
    }

    /// Deleted-only counterpart of [`replace_one`](Self::replace_one).
    pub async fn replace_one_deleted(
        &self,
        filter: Option<Expr>,
        replacement: Bson,
    ) -> SoftStoreResult<UpdateSummary> {
        self.replace_one_scoped(filter, replacement, Visibility::Deleted)
            .await
    }

    /// Unscoped counterpart of [`replace_one`](Self::replace_one).
    pub async fn replace_one_with_deleted(
        &self,
        filter: Option<Expr>,
        replacement: Bson,
    ) -> SoftStoreResult<UpdateSummary> {
        self.replace_one_scoped(filter, replacement, Visibility::All)
            .await
    }

    /// Merges the update into the first alive document matching the filter.
    pub async fn update_one(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.update_one_scoped(filter, update, Visibility::Alive)
            .await
    }

    /// Deleted-only counterpart of [`update_one`](Self::update_one).
    pub async fn update_one_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.update_one_scoped(filter, update, Visibility::Deleted)
            .await
    }

    /// Unscoped counterpart of [`update_one`](Self::update_one).
    pub async fn update_one_with_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.update_one_scoped(filter, update, Visibility::All)
            .await
    }

    /// Merges the update into every alive document matching the filter.
    pub async fn update_many(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.update_many_scoped(filter, update, Visibility::Alive)
            .await
    }

    /// Deleted-only counterpart of [`update_many`](Self::update_many).
    pub async fn update_many_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.update_many_scoped(filter, update, Visibility::Deleted)
            .await
    }

    /// Unscoped counterpart of [`update_many`](Self::update_many).
    pub async fn update_many_with_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.update_many_scoped(filter, update, Visibility::All)
            .await
    }

    // ---- soft-delete rewrite family ----

    /// Soft-deletes the first alive document matching the filter and
    /// returns it post-update, deletion marker populated.
    pub async fn find_one_and_remove(&self, filter: Option<Expr>) -> SoftStoreResult<Option<Bson>> {
        self.find_one_and_update_scoped(filter, self.policy.delete_stamp()?, Visibility::Alive)
            .await
    }

    /// Synonym for [`find_one_and_remove`](Self::find_one_and_remove).
    pub async fn find_one_and_delete(&self, filter: Option<Expr>) -> SoftStoreResult<Option<Bson>> {
        self.find_one_and_remove(filter).await
    }

    /// Soft-deletes the document with the given ID if it is alive and
    /// returns it post-update.
    pub async fn find_by_id_and_remove(&self, id: &Uuid) -> SoftStoreResult<Option<Bson>> {
        self.find_one_and_update_scoped(
            Some(Self::id_filter(id)),
            self.policy.delete_stamp()?,
            Visibility::Alive,
        )
        .await
    }

    /// Synonym for [`find_by_id_and_remove`](Self::find_by_id_and_remove).
    pub async fn find_by_id_and_delete(&self, id: &Uuid) -> SoftStoreResult<Option<Bson>> {
        self.find_by_id_and_remove(id).await
    }

    /// Soft-deletes the first alive document matching the filter, returning
    /// the update summary rather than the document body.
    pub async fn remove_one(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.update_one_scoped(filter, self.policy.delete_stamp()?, Visibility::Alive)
            .await
    }

    /// Synonym for [`remove_one`](Self::remove_one).
    pub async fn delete_one(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.remove_one(filter).await
    }

    /// Stamps every document matching the filter, regardless of current
    /// visibility state.
    ///
    /// The filter is not narrowed to alive-only; repeated calls refresh the
    /// marker on already-deleted documents. Callers wanting to skip them
    /// must narrow the filter themselves.
    pub async fn remove_many(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.update_many_scoped(filter, self.policy.delete_stamp()?, Visibility::All)
            .await
    }

    /// Synonym for [`remove_many`](Self::remove_many).
    pub async fn delete_many(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.remove_many(filter).await
    }

    /// Clears the deletion stamp on every document matching the filter,
    /// regardless of current state, making them visible to plain reads
    /// again.
    pub async fn restore(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.update_many_scoped(filter, self.policy.restore_stamp()?, Visibility::All)
            .await
    }
}

/// A type-safe collection handle for a specific [`Document`] type.
///
/// Wraps the untyped surface with serde conversion on the way in and out;
/// every operation otherwise behaves exactly like its [`SoftCollection`]
/// counterpart.
#[derive(Debug)]
pub struct TypedSoftCollection<'a, B: DocumentBackend, D: Document> {
    inner: SoftCollection<'a, B>,
    _marker: PhantomData<D>,
}

impl<'a, B: DocumentBackend, D: Document> TypedSoftCollection<'a, B, D> {
    pub(crate) fn new(name: String, backend: &'a B, policy: SoftDeletePolicy) -> Self {
        Self {
            inner: SoftCollection::new(name, backend, policy),
            _marker: PhantomData,
        }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Returns the soft-delete policy governing this collection.
    pub fn policy(&self) -> &SoftDeletePolicy {
        self.inner.policy()
    }

    /// Drops the type parameter, exposing the raw BSON surface.
    pub fn untyped(&self) -> &SoftCollection<'a, B> {
        &self.inner
    }

    fn decode(documents: Vec<Bson>) -> SoftStoreResult<Vec<D>> {
        documents
            .into_iter()
            .map(D::from_bson)
            .collect()
    }

    fn decode_one(document: Option<Bson>) -> SoftStoreResult<Option<D>> {
        document.map(D::from_bson).transpose()
    }

    /// Inserts new documents. Documents are created alive.
    pub async fn insert(&self, documents: Vec<D>) -> SoftStoreResult<()> {
        self.inner
            .insert(
                documents
                    .into_iter()
                    .map(|d| {
                        d.to_bson()
                            .map(move |b| (d.id().clone(), b))
                    })
                    .collect::<SoftStoreResult<Vec<(Uuid, Bson)>>>()?,
            )
            .await
    }

    /// Physically removes documents by ID, bypassing the soft-delete
    /// policy entirely.
    pub async fn destroy(&self, ids: Vec<Uuid>) -> SoftStoreResult<()> {
        self.inner.destroy(ids).await
    }

    /// Returns the alive documents matching the query.
    pub async fn find(&self, query: Query) -> SoftStoreResult<Vec<D>> {
        Self::decode(self.inner.find(query).await?)
    }

    /// Returns the soft-deleted documents matching the query.
    pub async fn find_deleted(&self, query: Query) -> SoftStoreResult<Vec<D>> {
        Self::decode(self.inner.find_deleted(query).await?)
    }

    /// Returns every document matching the query regardless of state.
    pub async fn find_with_deleted(&self, query: Query) -> SoftStoreResult<Vec<D>> {
        Self::decode(self.inner.find_with_deleted(query).await?)
    }

    /// Returns the first alive document matching the filter.
    pub async fn find_one(&self, filter: Option<Expr>) -> SoftStoreResult<Option<D>> {
        Self::decode_one(self.inner.find_one(filter).await?)
    }

    /// Returns the first soft-deleted document matching the filter.
    pub async fn find_one_deleted(&self, filter: Option<Expr>) -> SoftStoreResult<Option<D>> {
        Self::decode_one(self.inner.find_one_deleted(filter).await?)
    }

    /// Returns the first matching document regardless of state.
    pub async fn find_one_with_deleted(&self, filter: Option<Expr>) -> SoftStoreResult<Option<D>> {
        Self::decode_one(
            self.inner
                .find_one_with_deleted(filter)
                .await?,
        )
    }

    /// Returns the document with the given ID if it is alive.
    pub async fn find_by_id(&self, id: &Uuid) -> SoftStoreResult<Option<D>> {
        Self::decode_one(self.inner.find_by_id(id).await?)
    }

    /// Returns the document with the given ID if it is soft-deleted.
    pub async fn find_by_id_deleted(&self, id: &Uuid) -> SoftStoreResult<Option<D>> {
        Self::decode_one(self.inner.find_by_id_deleted(id).await?)
    }

    /// Returns the document with the given ID regardless of state.
    pub async fn find_by_id_with_deleted(&self, id: &Uuid) -> SoftStoreResult<Option<D>> {
        Self::decode_one(
            self.inner
                .find_by_id_with_deleted(id)
                .await?,
        )
    }

    /// Updates the first alive document matching the filter and returns it
    /// post-update.
    pub async fn find_one_and_update(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<D>> {
        Self::decode_one(
            self.inner
                .find_one_and_update(filter, update)
                .await?,
        )
    }

    /// Deleted-only counterpart of [`find_one_and_update`](Self::find_one_and_update).
    pub async fn find_one_and_update_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<D>> {
        Self::decode_one(
            self.inner
                .find_one_and_update_deleted(filter, update)
                .await?,
        )
    }

    /// Unscoped counterpart of [`find_one_and_update`](Self::find_one_and_update).
    pub async fn find_one_and_update_with_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<D>> {
        Self::decode_one(
            self.inner
                .find_one_and_update_with_deleted(filter, update)
                .await?,
        )
    }

    /// Updates the document with the given ID if it is alive and returns it
    /// post-update.
    pub async fn find_by_id_and_update(
        &self,
        id: &Uuid,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<D>> {
        Self::decode_one(
            self.inner
                .find_by_id_and_update(id, update)
                .await?,
        )
    }

    /// Deleted-only counterpart of [`find_by_id_and_update`](Self::find_by_id_and_update).
    pub async fn find_by_id_and_update_deleted(
        &self,
        id: &Uuid,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<D>> {
        Self::decode_one(
            self.inner
                .find_by_id_and_update_deleted(id, update)
                .await?,
        )
    }

    /// Unscoped counterpart of [`find_by_id_and_update`](Self::find_by_id_and_update).
    pub async fn find_by_id_and_update_with_deleted(
        &self,
        id: &Uuid,
        update: UpdateDoc,
    ) -> SoftStoreResult<Option<D>> {
        Self::decode_one(
            self.inner
                .find_by_id_and_update_with_deleted(id, update)
                .await?,
        )
    }

    /// Replaces the body of the first alive document matching the filter.
    pub async fn replace_one(&self, filter: Option<Expr>, replacement: &D) -> SoftStoreResult<UpdateSummary> {
        self.inner
            .replace_one(filter, replacement.to_bson()?)
            .await
    }

    /// Deleted-only counterpart of [`replace_one`](Self::replace_one).
    pub async fn replace_one_deleted(
        &self,
        filter: Option<Expr>,
        replacement: &D,
    ) -> SoftStoreResult<UpdateSummary> {
        self.inner
            .replace_one_deleted(filter, replacement.to_bson()?)
            .await
    }

    /// Unscoped counterpart of [`replace_one`](Self::replace_one).
    pub async fn replace_one_with_deleted(
        &self,
        filter: Option<Expr>,
        replacement: &D,
    ) -> SoftStoreResult<UpdateSummary> {
        self.inner
            .replace_one_with_deleted(filter, replacement.to_bson()?)
            .await
    }

    /// Merges the update into the first alive document matching the filter.
    pub async fn update_one(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.inner.update_one(filter, update).await
    }

    /// Deleted-only counterpart of [`update_one`](Self::update_one).
    pub async fn update_one_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.inner
            .update_one_deleted(filter, update)
            .await
    }

    /// Unscoped counterpart of [`update_one`](Self::update_one).
    pub async fn update_one_with_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.inner
            .update_one_with_deleted(filter, update)
            .await
    }

    /// Merges the update into every alive document matching the filter.
    pub async fn update_many(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.inner.update_many(filter, update).await
    }

    /// Deleted-only counterpart of [`update_many`](Self::update_many).
    pub async fn update_many_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.inner
            .update_many_deleted(filter, update)
            .await
    }

    /// Unscoped counterpart of [`update_many`](Self::update_many).
    pub async fn update_many_with_deleted(
        &self,
        filter: Option<Expr>,
        update: UpdateDoc,
    ) -> SoftStoreResult<UpdateSummary> {
        self.inner
            .update_many_with_deleted(filter, update)
            .await
    }

    /// Soft-deletes the first alive document matching the filter and
    /// returns it post-update, deletion marker populated.
    pub async fn find_one_and_remove(&self, filter: Option<Expr>) -> SoftStoreResult<Option<D>> {
        Self::decode_one(self.inner.find_one_and_remove(filter).await?)
    }

    /// Synonym for [`find_one_and_remove`](Self::find_one_and_remove).
    pub async fn find_one_and_delete(&self, filter: Option<Expr>) -> SoftStoreResult<Option<D>> {
        self.find_one_and_remove(filter).await
    }

    /// Soft-deletes the document with the given ID if it is alive and
    /// returns it post-update.
    pub async fn find_by_id_and_remove(&self, id: &Uuid) -> SoftStoreResult<Option<D>> {
        Self::decode_one(self.inner.find_by_id_and_remove(id).await?)
    }

    /// Synonym for [`find_by_id_and_remove`](Self::find_by_id_and_remove).
    pub async fn find_by_id_and_delete(&self, id: &Uuid) -> SoftStoreResult<Option<D>> {
        self.find_by_id_and_remove(id).await
    }

    /// Soft-deletes the first alive document matching the filter, returning
    /// the update summary rather than the document body.
    pub async fn remove_one(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.inner.remove_one(filter).await
    }

    /// Synonym for [`remove_one`](Self::remove_one).
    pub async fn delete_one(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.inner.delete_one(filter).await
    }

    /// Stamps every document matching the filter, regardless of current
    /// visibility state. See [`SoftCollection::remove_many`].
    pub async fn remove_many(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.inner.remove_many(filter).await
    }

    /// Synonym for [`remove_many`](Self::remove_many).
    pub async fn delete_many(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.inner.delete_many(filter).await
    }

    /// Clears the deletion stamp on every document matching the filter,
    /// regardless of current state.
    pub async fn restore(&self, filter: Option<Expr>) -> SoftStoreResult<UpdateSummary> {
        self.inner.restore(filter).await
    }
}
