//! Filter expression evaluation for in-memory document matching.

use std::{cmp::Ordering, collections::HashMap};

use bson::{Bson, datetime::DateTime};

use softlayer_core::{
    error::{SoftStoreError, SoftStoreResult},
    filter::{Expr, FieldOp, FilterVisitor},
};

/// Type-erased, comparable representation of BSON values.
///
/// Normalizes all numeric types to f64 so filters can compare across
/// integer widths. Private implementation detail of filter evaluation.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    Array(Vec<Comparable<'a>>),
    Map(HashMap<&'a str, Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr.iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>(),
            ),
            Bson::Document(doc) => Comparable::Map(
                doc.iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>(),
            ),
            // Other types are not comparable
            _ => Comparable::Null,
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Evaluates filter expressions against one BSON document at a time.
pub(crate) struct DocumentMatcher<'a> {
    document: &'a Bson,
}

impl<'a> DocumentMatcher<'a> {
    pub fn new(document: &'a Bson) -> Self {
        Self { document }
    }

    pub fn matches(&mut self, expr: &Expr) -> SoftStoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Returns the documents from the iterator matching the expression.
    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Bson>,
        expr: &Expr,
    ) -> SoftStoreResult<Vec<Bson>> {
        Ok(documents
            .into_iter()
            .filter(|doc| {
                DocumentMatcher::new(doc)
                    .matches(expr)
                    .unwrap_or(false)
            })
            .cloned()
            .collect::<Vec<_>>())
    }

    fn fields(&self) -> SoftStoreResult<&'a bson::Document> {
        self.document
            .as_document()
            .ok_or_else(|| SoftStoreError::InvalidDocument("expected a BSON document".to_string()))
    }
}

impl<'a> FilterVisitor for DocumentMatcher<'a> {
    type Output = bool;
    type Error = SoftStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(!self.visit_expr(expr)?)
    }

    fn visit_exists(
        &mut self,
        field: &str,
        should_exist: bool,
    ) -> Result<Self::Output, Self::Error> {
        Ok(self.fields()?.get(field).is_some() == should_exist)
    }

    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.fields()?.get(field) else {
            // An absent field matches nothing, whatever the operator.
            return Ok(false);
        };

        match op {
            FieldOp::Eq => Ok(Comparable::from(field_value) == Comparable::from(value)),
            FieldOp::Ne => Ok(Comparable::from(field_value) != Comparable::from(value)),
            FieldOp::Gt | FieldOp::Gte | FieldOp::Lt | FieldOp::Lte => {
                match Comparable::from(field_value).partial_cmp(&Comparable::from(value)) {
                    Some(ordering) => Ok(match op {
                        FieldOp::Gt => ordering == Ordering::Greater,
                        FieldOp::Gte => ordering != Ordering::Less,
                        FieldOp::Lt => ordering == Ordering::Less,
                        FieldOp::Lte => ordering != Ordering::Greater,
                        _ => unreachable!(),
                    }),
                    None => Ok(false),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use softlayer_core::filter::Filter;

    fn sample() -> Bson {
        Bson::Document(doc! {
            "_id": "abc",
            "title": "hello",
            "revision": 4,
            "deleted": false,
            "deletedAt": Bson::Null,
        })
    }

    #[test]
    fn equality_matches_including_null() {
        let doc = sample();

        assert!(DocumentMatcher::new(&doc).matches(&Filter::eq("deleted", false)).unwrap());
        assert!(DocumentMatcher::new(&doc).matches(&Filter::eq("deletedAt", Bson::Null)).unwrap());
        assert!(!DocumentMatcher::new(&doc).matches(&Filter::eq("deleted", true)).unwrap());
    }

    #[test]
    fn not_equal_distinguishes_null_from_values() {
        let doc = sample();

        assert!(!DocumentMatcher::new(&doc).matches(&Filter::ne("deletedAt", Bson::Null)).unwrap());
        assert!(DocumentMatcher::new(&doc).matches(&Filter::ne("title", "bye")).unwrap());
    }

    #[test]
    fn comparisons_normalize_numeric_widths() {
        let doc = sample();

        assert!(DocumentMatcher::new(&doc).matches(&Filter::gt("revision", 3i64)).unwrap());
        assert!(DocumentMatcher::new(&doc).matches(&Filter::lte("revision", 4.0)).unwrap());
        assert!(!DocumentMatcher::new(&doc).matches(&Filter::lt("revision", 4)).unwrap());
    }

    #[test]
    fn absent_fields_match_nothing_but_exists() {
        let doc = sample();

        assert!(!DocumentMatcher::new(&doc).matches(&Filter::eq("missing", 1)).unwrap());
        assert!(!DocumentMatcher::new(&doc).matches(&Filter::ne("missing", 1)).unwrap());
        assert!(DocumentMatcher::new(&doc).matches(&Filter::not_exists("missing")).unwrap());
        assert!(DocumentMatcher::new(&doc).matches(&Filter::exists("title")).unwrap());
    }

    #[test]
    fn logical_composition() {
        let doc = sample();
        let expr = Filter::eq("deleted", false).and(Filter::gte("revision", 4));

        assert!(DocumentMatcher::new(&doc).matches(&expr).unwrap());
        assert!(
            DocumentMatcher::new(&doc)
                .matches(&expr.not())
                .map(|m| !m)
                .unwrap()
        );
    }
}
