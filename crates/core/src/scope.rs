//! Item scopes: ordered, named property containers for one micro-item.
//!
//! Properties are stored as an ordered list of `(name, values)` entries so
//! insertion order stays observable; a property may repeat with multiple
//! values under one name. A scope accepts properties while open and becomes
//! read-only after [`ItemScope::finalize`].

use crate::error::ValueError;
use crate::value::PropertyValue;
use std::hash::{Hash, Hasher};

/// One named property and its ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    pub name: String,
    pub values: Vec<PropertyValue>,
}

/// The in-memory representation of one micro-item's properties.
///
/// Equality and hashing are structural over `(item_types, item_id,
/// properties)`; the open/closed flag is a lifecycle detail and does not
/// participate.
#[derive(Debug, Clone)]
pub struct ItemScope {
    item_types: Vec<String>,
    item_id: Option<String>,
    properties: Vec<Property>,
    closed: bool,
}

impl ItemScope {
    /// Create an open scope for an item with the given type identifiers.
    pub fn new(item_types: Vec<String>, item_id: Option<String>) -> ItemScope {
        ItemScope {
            item_types,
            item_id,
            properties: Vec::new(),
            closed: false,
        }
    }

    pub fn item_types(&self) -> &[String] {
        &self.item_types
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    /// Append `value` to the ordered sequence for `name`, creating the
    /// sequence on first use. Never overwrites. Fails with `ScopeClosed`
    /// once the scope has been finalized.
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        value: PropertyValue,
    ) -> Result<(), ValueError> {
        if self.closed {
            return Err(ValueError::ScopeClosed {
                scope: self.describe(),
            });
        }
        let name = name.into();
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(property) => property.values.push(value),
            None => self.properties.push(Property {
                name,
                values: vec![value],
            }),
        }
        Ok(())
    }

    /// Ordered values for `name`; empty for absent names. Absence is a
    /// normal state, not a fault.
    pub fn get_property(&self, name: &str) -> &[PropertyValue] {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.values.as_slice())
            .unwrap_or(&[])
    }

    /// All properties in insertion order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Transition the scope to read-only. Idempotent.
    pub fn finalize(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn describe(&self) -> String {
        self.item_id
            .clone()
            .or_else(|| self.item_types.first().cloned())
            .unwrap_or_else(|| "<untyped>".to_string())
    }
}

impl PartialEq for ItemScope {
    fn eq(&self, other: &Self) -> bool {
        self.item_types == other.item_types
            && self.item_id == other.item_id
            && self.properties == other.properties
    }
}

impl Eq for ItemScope {}

impl Hash for ItemScope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item_types.hash(state);
        self.item_id.hash(state);
        self.properties.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn person_scope() -> ItemScope {
        ItemScope::new(vec!["https://schema.org/Person".into()], None)
    }

    #[test]
    fn add_property_preserves_insertion_order() {
        let mut scope = person_scope();
        let v1 = PropertyValue::plain("Ada").unwrap();
        let v2 = PropertyValue::plain("Lovelace").unwrap();
        scope.add_property("name", v1.clone()).unwrap();
        scope.add_property("name", v2.clone()).unwrap();
        assert_eq!(scope.get_property("name"), &[v1, v2]);
    }

    #[test]
    fn property_entries_keep_discovery_order() {
        let mut scope = person_scope();
        scope
            .add_property("name", PropertyValue::plain("Ada").unwrap())
            .unwrap();
        scope
            .add_property("born", PropertyValue::date("1815-12-10").unwrap())
            .unwrap();
        scope
            .add_property("name", PropertyValue::plain("A. L.").unwrap())
            .unwrap();
        let names: Vec<&str> = scope.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "born"]);
        assert_eq!(scope.get_property("name").len(), 2);
    }

    #[test]
    fn absent_property_is_empty_not_an_error() {
        let scope = person_scope();
        assert!(scope.get_property("missing").is_empty());
    }

    #[test]
    fn finalized_scope_rejects_further_properties() {
        let mut scope = person_scope();
        scope
            .add_property("name", PropertyValue::plain("Ada").unwrap())
            .unwrap();
        scope.finalize();
        assert!(scope.is_closed());
        let err = scope
            .add_property("name", PropertyValue::plain("late").unwrap())
            .unwrap_err();
        assert!(matches!(err, ValueError::ScopeClosed { .. }));
        // Existing properties stay readable.
        assert_eq!(scope.get_property("name").len(), 1);
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut scope = person_scope();
        scope.finalize();
        scope.finalize();
        assert!(scope.is_closed());
    }

    #[test]
    fn equality_ignores_the_closed_flag() {
        let mut a = person_scope();
        let mut b = person_scope();
        a.add_property("name", PropertyValue::plain("Ada").unwrap())
            .unwrap();
        b.add_property("name", PropertyValue::plain("Ada").unwrap())
            .unwrap();
        a.finalize();
        assert_eq!(a, b);

        use std::hash::{Hash, Hasher};
        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn nested_scopes_compare_structurally() {
        let mut inner_a = person_scope();
        inner_a
            .add_property("name", PropertyValue::plain("Ada").unwrap())
            .unwrap();
        let inner_b = inner_a.clone();

        let mut outer_a = ItemScope::new(vec!["https://schema.org/Book".into()], None);
        outer_a
            .add_property("author", PropertyValue::nested(inner_a))
            .unwrap();
        let mut outer_b = ItemScope::new(vec!["https://schema.org/Book".into()], None);
        outer_b
            .add_property("author", PropertyValue::nested(inner_b))
            .unwrap();
        assert_eq!(outer_a, outer_b);
    }
}
