//! Field-name sanitization for MongoDB compatibility.
//!
//! Passthrough documents arrive with caller-chosen keys. MongoDB gives dots
//! and dollar signs in field names special meaning (nested paths, operators),
//! so a key like `"price.usd"` inside a `$set` would write a nested field and
//! a key like `"$where"` would be rejected. Keys are escaped on the way in and
//! restored on the way out. Values are never touched.

use bson::{Bson, Document};


/// Escapes and restores document keys.
///
/// MongoDB restricts field names (document keys) from containing:
/// - Dots (`.`) - used for nested field access in queries
/// - Dollar signs (`$`) - used for operators in queries
/// - Null bytes (`\0`) - field name terminators
///
/// These are percent-encoded, and `%` itself is encoded as well so that any
/// `%XX` in a stored key is an escape and decoding is exact.
pub(crate) struct KeySanitizer;

impl KeySanitizer {
    const ESCAPES: [(char, &'static str); 4] = [
        ('%', "%25"),
        ('.', "%2E"),
        ('$', "%24"),
        ('\0', "%00"),
    ];

    /// Recursively escapes every key in the document, including nested documents
    /// and documents inside arrays.
    pub(crate) fn sanitize_document(document: Document) -> Document {
        document
            .into_iter()
            .map(|(k, v)| (Self::sanitize_key(&k), Self::sanitize_value(v)))
            .collect()
    }

    pub(crate) fn sanitize_value(value: Bson) -> Bson {
        match value {
            Bson::Document(doc) => Bson::Document(Self::sanitize_document(doc)),
            Bson::Array(arr) => Bson::Array(
                arr
                    .into_iter()
                    .map(Self::sanitize_value)
                    .collect(),
            ),
            other => other,
        }
    }

    pub(crate) fn sanitize_key(input: &str) -> String {
        let mut sanitized = String::with_capacity(input.len());
        for c in input.chars() {
            match Self::ESCAPES.iter().find(|(target, _)| *target == c) {
                Some((_, escape)) => sanitized.push_str(escape),
                None => sanitized.push(c),
            }
        }
        sanitized
    }

    /// Reverts [`sanitize_document`](Self::sanitize_document) on a document read back from MongoDB.
    pub(crate) fn restore_document(document: Document) -> Document {
        document
            .into_iter()
            .map(|(k, v)| (Self::restore_key(&k), Self::restore_value(v)))
            .collect()
    }

    fn restore_value(value: Bson) -> Bson {
        match value {
            Bson::Document(doc) => Bson::Document(Self::restore_document(doc)),
            Bson::Array(arr) => Bson::Array(
                arr
                    .into_iter()
                    .map(Self::restore_value)
                    .collect(),
            ),
            other => other,
        }
    }

    fn restore_key(input: &str) -> String {
        let mut restored = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(position) = rest.find('%') {
            restored.push_str(&rest[..position]);
            rest = &rest[position..];

            match Self::ESCAPES.iter().find(|(_, escape)| rest.starts_with(escape)) {
                Some((target, escape)) => {
                    restored.push(*target);
                    rest = &rest[escape.len()..];
                },
                // Not written by sanitize_key; keep as is
                None => {
                    restored.push('%');
                    rest = &rest[1..];
                },
            }
        }

        restored.push_str(rest);
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn keys_are_escaped_values_are_not() {
        let document = doc! {
            "email": "a@x.com",
            "price.usd": 12,
            "meta": { "$note": "fragile", "tags": [{ "a.b": 1 }] },
        };

        let sanitized = KeySanitizer::sanitize_document(document);

        assert_eq!(
            sanitized,
            doc! {
                "email": "a@x.com",
                "price%2Eusd": 12,
                "meta": { "%24note": "fragile", "tags": [{ "a%2Eb": 1 }] },
            }
        );
    }

    #[test]
    fn keys_resembling_escapes_round_trip() {
        let original = doc! {
            "size__dot__xl": 1,
            "a.b": 2,
            "discount%2E": 3,
            "100%": 4,
            "nul\0byte": 5,
        };

        let sanitized = KeySanitizer::sanitize_document(original.clone());
        assert!(sanitized.keys().all(|key| !key.contains(['.', '$', '\0'])));

        let restored = KeySanitizer::restore_document(sanitized);
        assert_eq!(restored, original);
        assert_eq!(
            restored.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["size__dot__xl", "a.b", "discount%2E", "100%", "nul\0byte"]
        );
    }

    #[test]
    fn restore_reverts_sanitize() {
        let original = doc! { "_id": 1, "a.b": { "$c": ["x.y"] } };

        let restored = KeySanitizer::restore_document(KeySanitizer::sanitize_document(original.clone()));

        assert_eq!(restored, original);
    }
}
