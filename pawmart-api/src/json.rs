//! Conversion between request/response JSON and stored BSON.
//!
//! Responses use plain JSON rather than MongoDB extended JSON: identities are
//! hex strings and datetimes are RFC 3339 strings.

use bson::{Bson, Document as BsonDocument};
use chrono::SecondsFormat;
use serde_json::{Map, Number, Value};

use crate::error::ApiError;

/// A JSON request body; anything other than an object is rejected on extraction.
pub type JsonObject = Map<String, Value>;

/// Converts a JSON request body into a BSON document.
///
/// The conversion is structural: objects that look like extended JSON
/// (`{"$oid": ...}`, `{"$date": ...}`) stay plain documents.
///
/// # Errors
///
/// Returns [`ApiError::InvalidBody`] for values BSON cannot hold, such as
/// unsigned integers above `i64::MAX`.
pub fn to_document(body: &JsonObject) -> Result<BsonDocument, ApiError> {
    let mut document = BsonDocument::new();
    for (key, value) in body {
        document.insert(key.clone(), to_bson(value)?);
    }

    Ok(document)
}

fn to_bson(value: &Value) -> Result<Bson, ApiError> {
    Ok(match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Bson::Int64(i)
            } else if n.is_u64() {
                return Err(ApiError::InvalidBody(format!("integer {n} exceeds the signed 64-bit range")));
            } else {
                Bson::Double(n.as_f64().unwrap_or(f64::NAN))
            }
        },
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(to_bson).collect::<Result<_, _>>()?),
        Value::Object(map) => Bson::Document(to_document(map)?),
    })
}

/// Renders a stored document as plain JSON.
pub fn render_document(document: BsonDocument) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, render(value)))
            .collect()
    )
}

pub fn render(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        // NaN and infinities have no JSON form
        Bson::Double(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(dt) => Value::String(dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)),
        Bson::Array(items) => Value::Array(items.into_iter().map(render).collect()),
        Bson::Document(doc) => render_document(doc),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn identities_render_as_hex() {
        let id = ObjectId::new();

        let rendered = render_document(doc! { "_id": id, "tags": [id] });

        assert_eq!(rendered, json!({ "_id": id.to_hex(), "tags": [id.to_hex()] }));
    }

    #[test]
    fn scalars_render_as_plain_json() {
        let rendered = render_document(doc! {
            "name": "Leash",
            "price": 12.5,
            "stock": 3_i64,
            "active": true,
            "note": Bson::Null,
            "bad": f64::NAN,
            "meta": { "color": "red" },
        });

        assert_eq!(
            rendered,
            json!({
                "name": "Leash",
                "price": 12.5,
                "stock": 3,
                "active": true,
                "note": null,
                "bad": null,
                "meta": { "color": "red" },
            })
        );
    }

    #[test]
    fn datetimes_render_as_rfc3339() {
        let rendered = render(Bson::DateTime(bson::DateTime::from_millis(0)));

        assert_eq!(rendered, json!("1970-01-01T00:00:00.000Z"));
    }

    #[test]
    fn bodies_convert_to_documents() {
        let body = json!({ "name": "Leash", "price": 12, "tags": ["dog"], "meta": { "a": 1 } });
        let Value::Object(body) = body else { unreachable!() };

        let document = to_document(&body).unwrap();

        assert_eq!(document.get_str("name").unwrap(), "Leash");
        assert_eq!(document.get_array("tags").unwrap().len(), 1);
        assert!(document.get_document("meta").is_ok());
    }

    #[test]
    fn extended_json_shapes_stay_documents() {
        let Value::Object(body) = json!({
            "ref": { "$oid": "507f1f77bcf86cd799439011" },
            "when": { "$date": "2020-01-01T00:00:00Z" },
            "n": { "$numberLong": "5" },
        }) else { unreachable!() };

        let document = to_document(&body).unwrap();

        assert_eq!(
            document.get_document("ref").unwrap(),
            &bson::doc! { "$oid": "507f1f77bcf86cd799439011" }
        );
        assert_eq!(render_document(document), Value::Object(body));
    }

    #[test]
    fn numbers_keep_their_kind() {
        let Value::Object(body) = json!({ "count": 3, "neg": -2, "price": 12.5 }) else { unreachable!() };

        let document = to_document(&body).unwrap();

        assert_eq!(document.get("count"), Some(&Bson::Int64(3)));
        assert_eq!(document.get("neg"), Some(&Bson::Int64(-2)));
        assert_eq!(document.get("price"), Some(&Bson::Double(12.5)));
    }

    #[test]
    fn oversized_unsigned_integers_are_rejected() {
        let Value::Object(body) = json!({ "count": u64::MAX }) else { unreachable!() };

        assert!(matches!(to_document(&body), Err(ApiError::InvalidBody(_))));
    }
}
