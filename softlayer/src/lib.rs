//! Main softlayer crate: soft-delete semantics for document stores.
//!
//! This crate is the primary entry point for users of the softlayer
//! framework. Delete-style operations stamp a deletion marker on matching
//! documents instead of removing them; reads are alive-only by default,
//! with `*_deleted` and `*_with_deleted` escape hatches per operation.
//!
//! # Quick Start
//!
//! ```ignore
//! use softlayer::{prelude::*, memory::InMemoryStore};
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
//!     fn id(&self) -> &Uuid { &self.id }
//!     fn collection_name() -> &'static str { "posts" }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = SoftDeleteStore::new(InMemoryStore::new());
//!
//!     // Registration resolves the marker strategy and declares the
//!     // governed fields on the collection.
//!     let posts = store
//!         .register::<Post>(SoftDeleteOptions::default())
//!         .await
//!         .unwrap();
//!
//!     let post = Post { id: Uuid::new(), title: "hello".to_string() };
//!     posts.insert(vec![post.clone()]).await.unwrap();
//!
//!     // "Delete" stamps `deletedAt` and `deleted: true` instead of
//!     // removing the row.
//!     posts.find_by_id_and_delete(&post.id).await.unwrap();
//!
//!     assert!(posts.find_by_id(&post.id).await.unwrap().is_none());
//!     assert!(posts.find_by_id_deleted(&post.id).await.unwrap().is_some());
//!
//!     // And back again.
//!     posts.restore(Some(Filter::eq("title", "hello"))).await.unwrap();
//!     assert!(posts.find_by_id(&post.id).await.unwrap().is_some());
//! }
//! ```
//!
//! # Custom marker strategies
//!
//! The marker field, its value, and the visibility mode are configured per
//! entity at registration:
//!
//! ```ignore
//! use softlayer::prelude::*;
//!
//! // Literal marker under a custom field name.
//! let options = SoftDeleteOptions::default()
//!     .marker_field("myType")
//!     .marker_literal(true);
//!
//! // Marker produced by a function; the type must be declared so the
//! // store's schema can be informed.
//! let options = SoftDeleteOptions::default()
//!     .marker_producer(|| bson::Bson::Int64(42))
//!     .marker_type(FieldType::Integer);
//!
//! // Gate visibility on marker nullability instead of the boolean flag.
//! let options = SoftDeleteOptions::default()
//!     .visibility(VisibilityMode::MarkerBased)
//!     .without_flag_field();
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//!
//! Any store can participate by implementing
//! [`DocumentBackend`](backend::DocumentBackend); the policy engine only
//! decides what filter and update payload to send.

pub mod prelude;

pub use softlayer_core::{backend, collection, config, document, error, filter, policy, store};

// Re-export BSON types for convenience
pub use bson;

pub use softlayer_core::{
    config::{SoftDeleteOptions, VisibilityMode},
    document::Document,
    filter::{Filter, Query},
    store::SoftDeleteStore,
};

/// In-memory storage backend implementations.
pub mod memory {
    pub use softlayer_memory::{InMemoryStore, InMemoryStoreBuilder};
}
