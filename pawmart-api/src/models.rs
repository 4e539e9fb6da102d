//! Typed records for the marketplace collections.
//!
//! Both records keep whatever the client sent in an open `fields` document;
//! only the identity (and the listing owner's email) get real types.

use bson::{Bson, Document as BsonDocument, oid::ObjectId};
use pawmart_store::{
    document::{Document, ID_FIELD, take_identity},
    error::DocumentStoreResult,
};

/// Field holding a listing owner's identifier.
pub const EMAIL_FIELD: &str = "email";

/// A marketplace listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: Option<ObjectId>,
    /// Owner identifier, when the listing carries a string `email`.
    pub email: Option<String>,
    /// Every other field, passed through untouched.
    pub fields: BsonDocument,
}

impl Document for Listing {
    fn collection_name() -> &'static str {
        "listing"
    }

    fn id(&self) -> Option<&ObjectId> {
        self.id.as_ref()
    }

    fn from_document(mut document: BsonDocument) -> DocumentStoreResult<Self> {
        let id = take_identity(&mut document);

        // A non-string email stays in the passthrough fields as sent
        let email = if document.get_str(EMAIL_FIELD).is_ok() {
            match document.remove(EMAIL_FIELD) {
                Some(Bson::String(email)) => Some(email),
                _ => None,
            }
        } else {
            None
        };

        Ok(Self { id, email, fields: document })
    }

    fn into_document(self) -> BsonDocument {
        let mut document = BsonDocument::new();

        if let Some(id) = self.id {
            document.insert(ID_FIELD, id);
        }
        if let Some(email) = self.email {
            document.insert(EMAIL_FIELD, email);
        }
        for (key, value) in self.fields {
            document.insert(key, value);
        }

        document
    }
}

/// An order; no field besides the identity is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Option<ObjectId>,
    pub fields: BsonDocument,
}

impl Document for Order {
    fn collection_name() -> &'static str {
        "order"
    }

    fn id(&self) -> Option<&ObjectId> {
        self.id.as_ref()
    }

    fn from_document(mut document: BsonDocument) -> DocumentStoreResult<Self> {
        let id = take_identity(&mut document);

        Ok(Self { id, fields: document })
    }

    fn into_document(self) -> BsonDocument {
        let mut document = BsonDocument::new();

        if let Some(id) = self.id {
            document.insert(ID_FIELD, id);
        }
        for (key, value) in self.fields {
            document.insert(key, value);
        }

        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn listing_splits_recognized_fields() {
        let id = ObjectId::new();

        let listing = Listing::from_document(doc! { "_id": id, "name": "Leash", "email": "a@x.com" }).unwrap();

        assert_eq!(listing.id, Some(id));
        assert_eq!(listing.email.as_deref(), Some("a@x.com"));
        assert_eq!(listing.fields, doc! { "name": "Leash" });
    }

    #[test]
    fn listing_drops_client_identities() {
        let listing = Listing::from_document(doc! { "_id": "bogus", "name": "Leash XL" }).unwrap();

        assert_eq!(listing.id, None);
        assert_eq!(listing.into_document(), doc! { "name": "Leash XL" });
    }

    #[test]
    fn non_string_email_passes_through() {
        let listing = Listing::from_document(doc! { "email": 42 }).unwrap();

        assert_eq!(listing.email, None);
        assert_eq!(listing.into_document(), doc! { "email": 42 });
    }

    #[test]
    fn order_round_trips_with_identity_first() {
        let id = ObjectId::new();

        let order = Order::from_document(doc! { "quantity": 2, "_id": id }).unwrap();
        let document = order.into_document();

        assert_eq!(document.keys().next().map(String::as_str), Some("_id"));
        assert_eq!(document, doc! { "_id": id, "quantity": 2 });
    }
}
