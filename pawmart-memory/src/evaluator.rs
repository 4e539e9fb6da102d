//! Query expression evaluation for in-memory document filtering.
//!
//! This module provides the evaluation engine for filter expressions,
//! matching them against BSON documents held in memory.

use bson::{Bson, Document, datetime::DateTime, oid::ObjectId};

use pawmart_core::{
    query::{QueryVisitor, Expr},
    error::{DocumentStoreError, DocumentStoreResult},
};


/// Type-erased, comparable representation of BSON values.
///
/// Integers and doubles compare by numeric value, so `1`, `1i64` and `1.0`
/// are equal, while integers stay exact. Embedded documents compare field by
/// field in order, as document databases do.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    /// Int32 and Int64
    Int(i64),
    Double(f64),
    DateTime(DateTime),
    ObjectId(ObjectId),
    String(&'a str),
    Array(Vec<Comparable<'a>>),
    Document(Vec<(&'a str, Comparable<'a>)>),
    /// Values of other BSON types, compared by their canonical form
    Other(&'a Bson),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Int(i64::from(*value)),
            Bson::Int64(value) => Comparable::Int(*value),
            Bson::Double(value) => Comparable::Double(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::ObjectId(value) => Comparable::ObjectId(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Document(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<Vec<_>>()
            ),
            other => Comparable::Other(other),
        }
    }
}

/// Whether an integer and a double hold the same numeric value.
fn int_equals_double(int: i64, double: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    double.fract() == 0.0
        && double >= i64::MIN as f64
        && double < i64::MAX as f64
        && double as i64 == int
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Int(a), Comparable::Int(b)) => a == b,
            (Comparable::Double(a), Comparable::Double(b)) => a == b,
            (Comparable::Int(a), Comparable::Double(b))
            | (Comparable::Double(b), Comparable::Int(a)) => int_equals_double(*a, *b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Document(a), Comparable::Document(b)) => a == b,
            (Comparable::Other(a), Comparable::Other(b)) => a == b,
            _ => false,
        }
    }
}


pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> DocumentStoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Returns whether `document` matches `filter`; no filter matches everything.
    pub fn matches(document: &Document, filter: Option<&Expr>) -> DocumentStoreResult<bool> {
        match filter {
            Some(expr) => DocumentEvaluator::new(document).evaluate(expr),
            None => Ok(true),
        }
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        let expected = Comparable::from(value);

        Ok(match self.document.get(field) {
            // An array field matches when it equals the value or holds it as an element
            Some(field_value) => match Comparable::from(field_value) {
                Comparable::Array(items) => {
                    let whole_match = matches!(&expected, Comparable::Array(other) if *other == items);
                    whole_match || items.iter().any(|item| *item == expected)
                },
                actual => actual == expected,
            },
            None => expected == Comparable::Null,
        })
    }
}
