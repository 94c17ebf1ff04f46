//! Core traits for document representation and serialization.

use bson::{Bson, Uuid, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::SoftStoreResult;

/// The field name the id-based entry points constrain on.
///
/// [`find_by_id`](crate::collection::SoftCollection::find_by_id) and friends
/// are rewritten to a `find_one` with an equality predicate on this field,
/// so backends must expose the document id under this name when evaluating
/// filters.
pub const ID_FIELD: &str = "_id";

/// Trait implemented by every type stored through the soft-delete layer.
///
/// A document has a unique identifier and names the collection it lives in.
/// The two governed fields (deletion marker and flag) are registered on the
/// collection at setup time and are not required to appear on the Rust type;
/// include them as `Option` fields if the application wants to read them
/// back in typed form.
///
/// # Example
///
/// ```ignore
/// use softlayer::document::Document;
/// use bson::Uuid;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Post {
///     pub id: Uuid,
///     pub title: String,
/// }
///
/// impl Document for Post {
///     fn id(&self) -> &Uuid {
///         &self.id
///     }
///
///     fn collection_name() -> &'static str {
///         "posts"
///     }
/// }
/// ```
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns a reference to this document's unique identifier.
    fn id(&self) -> &Uuid;

    /// Returns the name of the collection this document belongs to.
    fn collection_name() -> &'static str;
}

/// Extension trait providing serialization utilities for documents.
///
/// Automatically implemented for all [`Document`] types.
pub trait DocumentExt: Document {
    /// Converts this document to a BSON value for storage.
    fn to_bson(&self) -> SoftStoreResult<Bson>;

    /// Creates a document from a BSON value.
    fn from_bson(bson: Bson) -> SoftStoreResult<Self>;

    /// Converts this document to a JSON value.
    fn to_json(&self) -> SoftStoreResult<Value>;

    /// Creates a document from a JSON value.
    fn from_json(value: Value) -> SoftStoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_bson(&self) -> SoftStoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> SoftStoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }

    fn to_json(&self) -> SoftStoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> SoftStoreResult<Self> {
        Ok(from_value(value)?)
    }
}
