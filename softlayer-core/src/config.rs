//! Per-entity soft-delete configuration and its resolver.
//!
//! Registration options arrive through [`SoftDeleteOptions`], an explicit
//! structure enumerating every recognized option. [`SoftDeleteOptions::
//! resolve`] validates the combination and produces an immutable
//! [`SoftDeleteConfig`] whose marker source is a resolved tagged union
//! ([`Marker`]) — the marker producer is a real closure captured at
//! configuration time, never a type name evaluated later.
//!
//! The resolved configuration is owned by the collection value returned
//! from registration, so entities registered with different options never
//! leak configuration into one another.

use bson::{Bson, DateTime};
use std::{fmt, sync::Arc};

use crate::{
    backend::FieldType,
    error::{SoftStoreError, SoftStoreResult},
};

/// Default name of the field recording when a document was deleted.
pub const DEFAULT_MARKER_FIELD: &str = "deletedAt";

/// Default name of the companion boolean flag field.
pub const DEFAULT_FLAG_FIELD: &str = "deleted";

/// A caller-supplied zero-argument function producing the marker value at
/// deletion time.
pub type MarkerProducer = Arc<dyn Fn() -> Bson + Send + Sync>;

/// Source of the value stamped into the marker field on deletion.
#[derive(Clone)]
pub enum Marker {
    /// Stamp the current time (the default).
    Timestamp,
    /// Stamp a literal value verbatim.
    Literal(Bson),
    /// Invoke a producer function at deletion time.
    Producer(MarkerProducer),
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Timestamp => f.write_str("Timestamp"),
            Marker::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Marker::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Which field governs whether a document counts as alive.
///
/// Exactly one mode is active per configuration and is applied uniformly
/// across every read and delete rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityMode {
    /// `flag_field == false` is alive. The default; requires a flag field.
    FlagBased,
    /// `marker_field == null` is alive.
    MarkerBased,
}

/// Validated, immutable per-entity configuration.
///
/// Built via [`SoftDeleteOptions::resolve`]; constructing one by hand skips
/// validation, and the rewrite family re-checks the flag-field invariant at
/// use.
#[derive(Debug, Clone)]
pub struct SoftDeleteConfig {
    /// Name of the field recording deletion.
    pub marker_field: String,
    /// Source of the marker value.
    pub marker: Marker,
    /// Declared type of the marker field, as reported to the store schema.
    pub marker_type: FieldType,
    /// Optional companion boolean field.
    pub flag_field: Option<String>,
    /// Active visibility mode.
    pub visibility: VisibilityMode,
}

impl SoftDeleteConfig {
    /// Produces the value to store in the marker field right now.
    pub fn marker_value(&self) -> Bson {
        match &self.marker {
            Marker::Timestamp => Bson::DateTime(DateTime::now()),
            Marker::Literal(value) => value.clone(),
            Marker::Producer(produce) => produce(),
        }
    }
}

/// Registration options for the soft-delete layer.
///
/// All options have defaults; `SoftDeleteOptions::default().resolve()`
/// yields the stock configuration: `deletedAt` timestamp marker, `deleted`
/// boolean flag, flag-based visibility.
///
/// # Example
///
/// ```ignore
/// use softlayer::config::SoftDeleteOptions;
///
/// let config = SoftDeleteOptions::default()
///     .marker_field("archivedAt")
///     .resolve()?;
/// ```
#[derive(Clone, Default)]
pub struct SoftDeleteOptions {
    marker_field: Option<String>,
    marker_literal: Option<Bson>,
    marker_producer: Option<MarkerProducer>,
    marker_type: Option<FieldType>,
    flag_field: Option<String>,
    drop_flag_field: bool,
    visibility: Option<VisibilityMode>,
}

impl fmt::Debug for SoftDeleteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftDeleteOptions")
            .field("marker_field", &self.marker_field)
            .field("marker_literal", &self.marker_literal)
            .field("marker_producer", &self.marker_producer.as_ref().map(|_| ".."))
            .field("marker_type", &self.marker_type)
            .field("flag_field", &self.flag_field)
            .field("drop_flag_field", &self.drop_flag_field)
            .field("visibility", &self.visibility)
            .finish()
    }
}

impl SoftDeleteOptions {
    /// Sets a custom marker field name (default `"deletedAt"`).
    pub fn marker_field(mut self, name: impl Into<String>) -> Self {
        self.marker_field = Some(name.into());
        self
    }

    /// Stores a literal value in the marker field at deletion time instead
    /// of the current timestamp.
    pub fn marker_literal(mut self, value: impl Into<Bson>) -> Self {
        self.marker_literal = Some(value.into());
        self
    }

    /// Invokes a function at deletion time to produce the marker value.
    ///
    /// Requires [`marker_type`](Self::marker_type) so the store schema can
    /// be informed of the produced type.
    pub fn marker_producer(
        mut self,
        produce: impl Fn() -> Bson + Send + Sync + 'static,
    ) -> Self {
        self.marker_producer = Some(Arc::new(produce));
        self
    }

    /// Declares the marker field's type explicitly.
    pub fn marker_type(mut self, field_type: FieldType) -> Self {
        self.marker_type = Some(field_type);
        self
    }

    /// Sets a custom flag field name (default `"deleted"`).
    pub fn flag_field(mut self, name: impl Into<String>) -> Self {
        self.flag_field = Some(name.into());
        self
    }

    /// Omits the companion flag field entirely.
    ///
    /// Only valid together with [`VisibilityMode::MarkerBased`].
    pub fn without_flag_field(mut self) -> Self {
        self.drop_flag_field = true;
        self
    }

    /// Selects the visibility mode (default [`VisibilityMode::FlagBased`]).
    pub fn visibility(mut self, mode: VisibilityMode) -> Self {
        self.visibility = Some(mode);
        self
    }

    /// Validates the option combination and produces the immutable
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SoftStoreError::Configuration`] for an empty marker or flag
    /// field name, a marker field colliding with the flag field, a producer
    /// without a declared type, a null or `false` marker literal, a literal
    /// with no schema representation, or a flag-based configuration with the
    /// flag field dropped.
    pub fn resolve(self) -> SoftStoreResult<SoftDeleteConfig> {
        let marker_field = self
            .marker_field
            .unwrap_or_else(|| DEFAULT_MARKER_FIELD.to_string());

        if marker_field.is_empty() {
            return Err(SoftStoreError::Configuration(
                "marker field must be a non-empty string".to_string(),
            ));
        }

        let (marker, marker_type) = match (self.marker_literal, self.marker_producer) {
            (Some(_), Some(_)) => {
                return Err(SoftStoreError::Configuration(
                    "marker literal and marker producer are mutually exclusive".to_string(),
                ));
            }
            (None, Some(produce)) => {
                let field_type = self.marker_type.ok_or_else(|| {
                    SoftStoreError::Configuration(
                        "type required for function marker".to_string(),
                    )
                })?;
                (Marker::Producer(produce), field_type)
            }
            (Some(value), None) => {
                if matches!(value, Bson::Null | Bson::Boolean(false)) {
                    return Err(SoftStoreError::Configuration(
                        "marker value must not be null or false".to_string(),
                    ));
                }
                let field_type = match self.marker_type {
                    Some(declared) => declared,
                    None => FieldType::of(&value).ok_or_else(|| {
                        SoftStoreError::Configuration(format!(
                            "marker literal {value} has no schema representation",
                        ))
                    })?,
                };
                (Marker::Literal(value), field_type)
            }
            (None, None) => (
                Marker::Timestamp,
                self.marker_type.unwrap_or(FieldType::DateTime),
            ),
        };

        let flag_field = if self.drop_flag_field {
            None
        } else {
            let name = self
                .flag_field
                .unwrap_or_else(|| DEFAULT_FLAG_FIELD.to_string());

            if name.is_empty() {
                return Err(SoftStoreError::Configuration(
                    "flag field must be a non-empty string".to_string(),
                ));
            }
            if name == marker_field {
                return Err(SoftStoreError::Configuration(
                    "marker field and flag field must be distinct".to_string(),
                ));
            }

            Some(name)
        };

        let visibility = self.visibility.unwrap_or(VisibilityMode::FlagBased);

        if visibility == VisibilityMode::FlagBased && flag_field.is_none() {
            return Err(SoftStoreError::Configuration(
                "flag field missing".to_string(),
            ));
        }

        Ok(SoftDeleteConfig { marker_field, marker, marker_type, flag_field, visibility })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_resolve_to_stock_configuration() {
        let config = SoftDeleteOptions::default().resolve().unwrap();

        assert_eq!(config.marker_field, "deletedAt");
        assert_eq!(config.flag_field.as_deref(), Some("deleted"));
        assert_eq!(config.visibility, VisibilityMode::FlagBased);
        assert_eq!(config.marker_type, FieldType::DateTime);
        assert!(matches!(config.marker, Marker::Timestamp));
        assert!(matches!(config.marker_value(), Bson::DateTime(_)));
    }

    #[test]
    fn empty_marker_field_is_rejected() {
        let err = SoftDeleteOptions::default()
            .marker_field("")
            .resolve()
            .unwrap_err();

        assert!(matches!(err, SoftStoreError::Configuration(_)));
    }

    #[test]
    fn producer_without_declared_type_is_rejected() {
        let err = SoftDeleteOptions::default()
            .marker_producer(|| Bson::Int64(7))
            .resolve()
            .unwrap_err();

        assert!(
            err.to_string()
                .contains("type required for function marker")
        );
    }

    #[test]
    fn null_and_false_marker_literals_are_rejected() {
        for value in [Bson::Null, Bson::Boolean(false)] {
            let err = SoftDeleteOptions::default()
                .marker_literal(value)
                .resolve()
                .unwrap_err();

            assert!(matches!(err, SoftStoreError::Configuration(_)));
        }
    }

    #[test]
    fn literal_marker_infers_its_field_type() {
        let config = SoftDeleteOptions::default()
            .marker_field("myType")
            .marker_literal(true)
            .resolve()
            .unwrap();

        assert_eq!(config.marker_type, FieldType::Boolean);
        assert_eq!(config.marker_value(), Bson::Boolean(true));
    }

    #[test]
    fn flag_field_colliding_with_marker_field_is_rejected() {
        let err = SoftDeleteOptions::default()
            .marker_field("gone")
            .flag_field("gone")
            .resolve()
            .unwrap_err();

        assert!(matches!(err, SoftStoreError::Configuration(_)));
    }

    #[test]
    fn flag_based_mode_requires_a_flag_field() {
        let err = SoftDeleteOptions::default()
            .without_flag_field()
            .resolve()
            .unwrap_err();

        assert!(err.to_string().contains("flag field missing"));
    }

    #[test]
    fn marker_based_mode_works_without_a_flag_field() {
        let config = SoftDeleteOptions::default()
            .visibility(VisibilityMode::MarkerBased)
            .without_flag_field()
            .resolve()
            .unwrap();

        assert_eq!(config.flag_field, None);
        assert_eq!(config.visibility, VisibilityMode::MarkerBased);
    }

    #[test]
    fn producer_runs_at_marker_value_time() {
        let config = SoftDeleteOptions::default()
            .marker_producer(|| Bson::String("tombstoned".to_string()))
            .marker_type(FieldType::String)
            .resolve()
            .unwrap();

        assert_eq!(config.marker_value(), Bson::String("tombstoned".to_string()));
    }
}
