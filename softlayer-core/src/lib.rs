//! Core of the softlayer project: a soft-delete policy layer for JSON
//! document stores.
//!
//! Instead of physically removing records, delete-style operations mark a
//! document as logically deleted while leaving it retrievable through
//! explicit deleted-only or with-deleted queries. The heart of the crate is
//! a query-rewriting policy: every entry point either appends a visibility
//! predicate to the caller's filter or converts a delete into an update
//! stamping the deletion marker.
//!
//! This crate provides:
//!
//! - **Configuration** ([`config`]) - Per-entity marker strategy and
//!   visibility mode, validated at registration
//! - **Policy engine** ([`policy`]) - The pure filter/payload rewrites
//! - **Collections** ([`collection`]) - The exposed operation surface, in
//!   typed and untyped flavors
//! - **Store** ([`store`]) - Registration of entities against a backend
//! - **Backend abstraction** ([`backend`]) - The external store collaborator
//! - **Filters** ([`filter`]) - The small filter AST caller conditions and
//!   visibility predicates are expressed in
//! - **Documents** ([`document`]) - Document trait and serialization helpers
//! - **Errors** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use softlayer::{Document, SoftDeleteStore, SoftDeleteOptions, Filter};
//! use bson::Uuid;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Post {
//!     pub id: Uuid,
//!     pub title: String,
//! }
//!
//! impl Document for Post {
//!     fn id(&self) -> &Uuid {
//!         &self.id
//!     }
//!
//!     fn collection_name() -> &'static str {
//!         "posts"
//!     }
//! }
//!
//! # async fn example(store: &SoftDeleteStore<impl softlayer::backend::DocumentBackend>) -> softlayer::error::SoftStoreResult<()> {
//! let posts = store.register::<Post>(SoftDeleteOptions::default()).await?;
//!
//! // Stamp instead of remove; the row stays retrievable.
//! posts.delete_many(Some(Filter::eq("title", "draft"))).await?;
//! let gone = posts.find_deleted(Filter::eq("title", "draft").into()).await?;
//! # Ok(()) }
//! ```

#[allow(unused_extern_crates)]
extern crate self as softlayer_core;

pub mod backend;
pub mod collection;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod policy;
pub mod store;
