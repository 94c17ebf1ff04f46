//! Convenient re-exports of commonly used types from softlayer.
//!
//! ```ignore
//! use softlayer::prelude::*;
//! ```

pub use softlayer_core::{
    backend::{
        DocumentBackend, DocumentBackendBuilder, FieldSpec, FieldType, UpdateDoc, UpdateSummary,
    },
    collection::{SoftCollection, TypedSoftCollection},
    config::{Marker, MarkerProducer, SoftDeleteConfig, SoftDeleteOptions, VisibilityMode},
    document::{Document, DocumentExt, ID_FIELD},
    error::{SoftStoreError, SoftStoreResult},
    filter::{Expr, FieldOp, Filter, FilterVisitor, Query, QueryBuilder, Sort, SortDirection},
    policy::{SoftDeletePolicy, Visibility},
    store::SoftDeleteStore,
};
