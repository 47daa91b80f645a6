//! JSON interchange form for values and scopes.
//!
//! The serialized value is an object with two named fields: `content` (the
//! raw value, recursively serialized for nested scopes) and `type` (one of
//! the four kind names). This form is for diagnostics and interop, not
//! authoritative storage: Plain/Link/Date round-trip their string content
//! exactly; Nested round-trips structurally.

use crate::error::ValueError;
use crate::scope::ItemScope;
use crate::value::{Kind, PropertyValue};

/// Serialize a property value to its interchange object.
pub fn value_to_json(value: &PropertyValue) -> serde_json::Value {
    let content = match value {
        PropertyValue::Plain(s) | PropertyValue::Link(s) | PropertyValue::Date(s) => {
            serde_json::Value::String(s.clone())
        }
        PropertyValue::Nested(scope) => scope_to_json(scope),
    };
    serde_json::json!({
        "content": content,
        "type": value.kind().as_str(),
    })
}

/// Deserialize a property value from its interchange object.
///
/// Kind/content mismatches (text content under `"Nested"`, object content
/// under a string kind) fail with `InvalidValue`.
pub fn value_from_json(v: &serde_json::Value) -> Result<PropertyValue, ValueError> {
    let obj = v
        .as_object()
        .ok_or_else(|| ValueError::invalid("value must be a JSON object"))?;
    let kind_name = obj
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| ValueError::invalid("value missing 'type' field"))?;
    let kind = Kind::parse(kind_name)
        .ok_or_else(|| ValueError::invalid(format!("unknown value type '{}'", kind_name)))?;
    let content = obj
        .get("content")
        .ok_or_else(|| ValueError::invalid("value missing 'content' field"))?;

    match (kind, content) {
        (Kind::Nested, serde_json::Value::Object(_)) => {
            Ok(PropertyValue::nested(scope_from_json(content)?))
        }
        (Kind::Nested, _) => Err(ValueError::invalid(
            "kind Nested requires an item scope object as content",
        )),
        (_, serde_json::Value::String(s)) => PropertyValue::from_text(kind, s.as_str()),
        (_, _) => Err(ValueError::invalid(format!(
            "kind {} requires string content",
            kind
        ))),
    }
}

/// Serialize a scope to its interchange object. Property order is an array,
/// not an object, so insertion order survives the round-trip.
pub fn scope_to_json(scope: &ItemScope) -> serde_json::Value {
    let properties: Vec<serde_json::Value> = scope
        .properties()
        .iter()
        .map(|p| {
            let values: Vec<serde_json::Value> = p.values.iter().map(value_to_json).collect();
            serde_json::json!({ "name": p.name, "values": values })
        })
        .collect();
    serde_json::json!({
        "type": scope.item_types(),
        "id": scope.item_id(),
        "properties": properties,
    })
}

/// Deserialize a scope from its interchange object. The returned scope is
/// finalized, matching the lifecycle of an extracted item whose boundary
/// has closed.
pub fn scope_from_json(v: &serde_json::Value) -> Result<ItemScope, ValueError> {
    let obj = v
        .as_object()
        .ok_or_else(|| ValueError::invalid("scope must be a JSON object"))?;
    let item_types: Vec<String> = obj
        .get("type")
        .and_then(|t| t.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|t| t.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default();
    let item_id = obj
        .get("id")
        .and_then(|i| i.as_str())
        .map(str::to_owned);

    let mut scope = ItemScope::new(item_types, item_id);
    if let Some(properties) = obj.get("properties").and_then(|p| p.as_array()) {
        for property in properties {
            let name = property
                .get("name")
                .and_then(|n| n.as_str())
                .ok_or_else(|| ValueError::invalid("property missing 'name' field"))?;
            let values = property
                .get("values")
                .and_then(|v| v.as_array())
                .ok_or_else(|| ValueError::invalid("property missing 'values' array"))?;
            for value in values {
                scope.add_property(name, value_from_json(value)?)?;
            }
        }
    }
    scope.finalize();
    Ok(scope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_value_round_trips_exactly() {
        let v = PropertyValue::plain("42").unwrap();
        let json = value_to_json(&v);
        assert_eq!(json["type"], "Plain");
        assert_eq!(json["content"], "42");
        assert_eq!(value_from_json(&json).unwrap(), v);
    }

    #[test]
    fn link_and_date_round_trip_exactly() {
        for v in [
            PropertyValue::link("https://example.org/x").unwrap(),
            PropertyValue::date("2024-03-15").unwrap(),
        ] {
            assert_eq!(value_from_json(&value_to_json(&v)).unwrap(), v);
        }
    }

    #[test]
    fn nested_value_round_trips_structurally() {
        let mut inner = ItemScope::new(vec!["https://schema.org/Person".into()], None);
        inner
            .add_property("name", PropertyValue::plain("Ada").unwrap())
            .unwrap();
        let v = PropertyValue::nested(inner);

        let back = value_from_json(&value_to_json(&v)).unwrap();
        // Equivalent tree, not necessarily the identical object.
        assert_eq!(back, v);
        let scope = back.as_nested().unwrap();
        assert_eq!(scope.get_property("name")[0].text(), Some("Ada"));
    }

    #[test]
    fn mismatched_kind_and_content_is_rejected() {
        let json = serde_json::json!({ "content": "text", "type": "Nested" });
        assert!(matches!(
            value_from_json(&json).unwrap_err(),
            ValueError::InvalidValue { .. }
        ));

        let json = serde_json::json!({ "content": { "type": [], "properties": [] }, "type": "Plain" });
        assert!(matches!(
            value_from_json(&json).unwrap_err(),
            ValueError::InvalidValue { .. }
        ));
    }

    #[test]
    fn unknown_type_name_is_rejected() {
        let json = serde_json::json!({ "content": "x", "type": "Blob" });
        assert!(value_from_json(&json).is_err());
    }

    #[test]
    fn scope_round_trip_preserves_property_order() {
        let mut scope = ItemScope::new(
            vec!["https://schema.org/Book".into()],
            Some("urn:isbn:0451450523".into()),
        );
        scope
            .add_property("name", PropertyValue::plain("A Book").unwrap())
            .unwrap();
        scope
            .add_property("datePublished", PropertyValue::date("1993-04-01").unwrap())
            .unwrap();
        scope
            .add_property("name", PropertyValue::plain("Alt Title").unwrap())
            .unwrap();
        scope.finalize();

        let back = scope_from_json(&scope_to_json(&scope)).unwrap();
        assert_eq!(back, scope);
        let names: Vec<&str> = back.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "datePublished"]);
        assert!(back.is_closed());
    }

    #[test]
    fn blank_content_in_interchange_is_rejected() {
        let json = serde_json::json!({ "content": "   ", "type": "Plain" });
        assert!(matches!(
            value_from_json(&json).unwrap_err(),
            ValueError::InvalidValue { .. }
        ));
    }
}
