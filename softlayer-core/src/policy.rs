//! The soft-delete policy engine: pure filter and payload rewrites.
//!
//! A [`SoftDeletePolicy`] owns one entity's [`SoftDeleteConfig`] and turns
//! it into the two rewrites every entry point needs:
//!
//! - a visibility predicate ANDed onto the caller's filter, selecting
//!   alive-only, deleted-only, or all documents, and
//! - the update payloads that perform logical deletion (the stamp) and
//!   restoration (the stamp cleared).
//!
//! The policy holds no mutable state and performs no I/O; everything here
//! is a synchronous transformation of filters and payloads that the
//! collection layer then delegates to the backend in a single call.

use bson::Bson;

use crate::{
    backend::UpdateDoc,
    config::{SoftDeleteConfig, VisibilityMode},
    error::{SoftStoreError, SoftStoreResult},
    filter::{Expr, Filter, Query},
};

/// Which documents an operation should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only documents not currently soft-deleted (the default scope).
    Alive,
    /// Only soft-deleted documents.
    Deleted,
    /// Every document regardless of state.
    All,
}

/// Stateless rewrite engine for one entity's soft-delete behavior.
#[derive(Debug, Clone)]
pub struct SoftDeletePolicy {
    config: SoftDeleteConfig,
}

impl SoftDeletePolicy {
    /// Creates a policy from a resolved configuration.
    pub fn new(config: SoftDeleteConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this policy applies.
    pub fn config(&self) -> &SoftDeleteConfig {
        &self.config
    }

    fn flag_field(&self) -> SoftStoreResult<&str> {
        self.config
            .flag_field
            .as_deref()
            .ok_or_else(|| SoftStoreError::Configuration("flag field missing".to_string()))
    }

    /// Builds the extra predicate for a visibility scope, or `None` for
    /// [`Visibility::All`].
    ///
    /// # Errors
    ///
    /// Fails with [`SoftStoreError::Configuration`] when the configuration
    /// is flag-based but carries no flag field.
    pub fn visibility_predicate(&self, scope: Visibility) -> SoftStoreResult<Option<Expr>> {
        if scope == Visibility::All {
            return Ok(None);
        }

        let predicate = match self.config.visibility {
            VisibilityMode::FlagBased => {
                let flag = self.flag_field()?;
                match scope {
                    Visibility::Alive => Filter::eq(flag, false),
                    Visibility::Deleted => Filter::eq(flag, true),
                    Visibility::All => unreachable!(),
                }
            }
            VisibilityMode::MarkerBased => {
                let marker = self.config.marker_field.as_str();
                match scope {
                    Visibility::Alive => Filter::eq(marker, Bson::Null),
                    Visibility::Deleted => Filter::ne(marker, Bson::Null),
                    Visibility::All => unreachable!(),
                }
            }
        };

        Ok(Some(predicate))
    }

    /// ANDs the visibility predicate onto a caller filter.
    ///
    /// The caller's conditions are preserved verbatim; the predicate is the
    /// only addition.
    pub fn scope_filter(
        &self,
        filter: Option<Expr>,
        scope: Visibility,
    ) -> SoftStoreResult<Option<Expr>> {
        Ok(match (filter, self.visibility_predicate(scope)?) {
            (Some(filter), Some(predicate)) => Some(filter.and(predicate)),
            (Some(filter), None) => Some(filter),
            (None, predicate) => predicate,
        })
    }

    /// Applies a visibility scope to a full query, leaving its limit,
    /// offset, and sort options untouched.
    pub fn scope_query(&self, mut query: Query, scope: Visibility) -> SoftStoreResult<Query> {
        query.filter = self.scope_filter(query.filter, scope)?;
        Ok(query)
    }

    /// Builds the update payload that performs a logical deletion.
    ///
    /// The marker field receives the configured marker value (produced now)
    /// and the flag field, when configured, is set to `true`. A flag-based
    /// configuration with no flag field fails here rather than silently
    /// omitting the flag from the stamp.
    pub fn delete_stamp(&self) -> SoftStoreResult<UpdateDoc> {
        let mut stamp = UpdateDoc::new();
        stamp.insert(self.config.marker_field.clone(), self.config.marker_value());

        match &self.config.flag_field {
            Some(flag) => {
                stamp.insert(flag.clone(), Bson::Boolean(true));
            }
            None if self.config.visibility == VisibilityMode::FlagBased => {
                return Err(SoftStoreError::Configuration(
                    "flag field missing".to_string(),
                ));
            }
            None => {}
        }

        Ok(stamp)
    }

    /// Builds the update payload that restores a document: marker cleared
    /// to null, flag cleared to false.
    pub fn restore_stamp(&self) -> SoftStoreResult<UpdateDoc> {
        let mut stamp = UpdateDoc::new();
        stamp.insert(self.config.marker_field.clone(), Bson::Null);

        match &self.config.flag_field {
            Some(flag) => {
                stamp.insert(flag.clone(), Bson::Boolean(false));
            }
            None if self.config.visibility == VisibilityMode::FlagBased => {
                return Err(SoftStoreError::Configuration(
                    "flag field missing".to_string(),
                ));
            }
            None => {}
        }

        Ok(stamp)
    }
}
