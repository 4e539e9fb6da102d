//! Filter translation from pawmart expressions to MongoDB query syntax.

use bson::{Document, Bson, doc};

use pawmart_core::{
    query::{QueryVisitor, Expr},
    error::DocumentStoreError,
};

use crate::sanitizer::KeySanitizer;


/// Translates filter expressions into MongoDB query documents.
///
/// Field names go through the same escaping as stored keys, so a filter on
/// `"price.usd"` targets the literal top-level field and not a nested path.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = DocumentStoreError;

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        let key = KeySanitizer::sanitize_key(field);

        Ok(doc! {
            key: {
                "$eq": KeySanitizer::sanitize_value(value.clone()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use pawmart_core::query::Filter;

    #[test]
    fn equality_uses_eq_operator() {
        let id = ObjectId::new();

        let translated = MongoQueryTranslator.visit_expr(&Filter::id(id)).unwrap();

        assert_eq!(translated, doc! { "_id": { "$eq": id } });
    }

    #[test]
    fn field_names_are_escaped() {
        let translated = MongoQueryTranslator.visit_expr(&Filter::eq("price.usd", 12)).unwrap();

        assert_eq!(translated, doc! { "price%2Eusd": { "$eq": 12 } });
    }

    #[test]
    fn values_are_not_escaped() {
        let translated = MongoQueryTranslator.visit_expr(&Filter::eq("email", "a.b$c@x.com")).unwrap();

        assert_eq!(translated, doc! { "email": { "$eq": "a.b$c@x.com" } });
    }
}
