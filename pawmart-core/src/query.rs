//! Query construction and filtering API for document stores.
//!
//! This module provides filter expressions, a small query type carrying a
//! filter and a result limit, and a visitor for executing filters on
//! different backends.
//!
//! # Query Building
//!
//! Queries can be constructed using the fluent builder API:
//!
//! ```ignore
//! use pawmart_core::query::{Query, Filter};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq("email", "a@x.com"))
//!     .limit(6)
//!     .build();
//! ```
//!
//! A query without a filter matches every document in the collection. A query
//! without a limit returns every match. Results come back in the backend's
//! natural order; no sort is applied.

use bson::{Bson, oid::ObjectId};

use crate::{document::ID_FIELD, error::DocumentStoreError};

/// A filter expression for querying documents.
///
/// # Example
///
/// ```ignore
/// use pawmart_core::query::Filter;
///
/// let by_owner = Filter::eq("email", "a@x.com");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Field equality: the named top-level field holds exactly `value`.
    Eq {
        /// The field name to compare.
        field: String,
        /// The value to compare against.
        value: Bson,
    },
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Matches documents where the field equals the specified value.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::Eq { field: field.into(), value: value.into() }
    }

    /// Matches the single document carrying the given identity.
    pub fn id(id: ObjectId) -> Expr {
        Filter::eq(ID_FIELD, Bson::ObjectId(id))
    }
}

/// A structured query: an optional filter and an optional result limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Optional filter expression to match documents.
    pub filter: Option<Expr>,
    /// Maximum number of documents to return.
    pub limit: Option<usize>,
}

impl Query {
    /// Creates a query matching every document, without a limit.
    pub fn all() -> Self {
        Query::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the filter expression for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    pub fn build(self) -> Query {
        self.query
    }
}

/// Walks a filter expression, producing a backend-specific result.
///
/// The in-memory backend evaluates expressions against documents with it; the
/// MongoDB backend translates them into query documents.
pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::Eq { field, value } => self.visit_eq(field, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_filter_targets_identity_field() {
        let id = ObjectId::new();

        assert_eq!(
            Filter::id(id),
            Expr::Eq { field: "_id".to_string(), value: Bson::ObjectId(id) }
        );
    }

    #[test]
    fn builder_sets_filter_and_limit() {
        let query = Query::builder()
            .filter(Filter::eq("email", "a@x.com"))
            .limit(6)
            .build();

        assert_eq!(query.limit, Some(6));
        assert!(query.filter.is_some());
        assert_eq!(Query::all(), Query { filter: None, limit: None });
    }
}
