//! In-memory document backend for softlayer.
//!
//! A thread-safe, in-memory implementation of the `DocumentBackend` trait,
//! using async-aware read-write locks over BSON HashMaps. Ideal for
//! development and tests; queries scan the whole collection, so indexing
//! hints on registered fields are recorded but not used.
//!
//! # Quick Start
//!
//! ```ignore
//! use softlayer::{Document, SoftDeleteStore, SoftDeleteOptions, memory::InMemoryStore};
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
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SoftDeleteStore::new(InMemoryStore::new());
//!     let posts = store.register::<Post>(SoftDeleteOptions::default()).await?;
//!
//!     let post = Post { id: Uuid::new(), title: "hello".to_string() };
//!     posts.insert(vec![post.clone()]).await?;
//!     posts.find_by_id_and_delete(&post.id).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as softlayer_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
