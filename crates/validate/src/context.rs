//! Pass-scoped shared state for rule evaluation.
//!
//! A [`RuleContext`] is created fresh for each validation pass and shared by
//! reference across every rule in that pass, so expensive document facts are
//! derived once. Facts written by an earlier rule are visible to later rules
//! in the same pass (evaluation is strictly ordered); nothing survives the
//! pass.

use crate::document::NodeId;
use std::collections::BTreeMap;

/// Mutable, keyed cache of derived document facts, scoped to one pass.
#[derive(Debug, Default)]
pub struct RuleContext {
    facts: BTreeMap<String, serde_json::Value>,
    node_sets: BTreeMap<String, Vec<NodeId>>,
}

impl RuleContext {
    pub fn new() -> RuleContext {
        RuleContext::default()
    }

    /// Record a derived fact under a string key, replacing any previous one.
    pub fn put_fact(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.facts.insert(key.into(), value);
    }

    pub fn fact(&self, key: &str) -> Option<&serde_json::Value> {
        self.facts.get(key)
    }

    pub fn has_fact(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    /// Cache a computed node set (e.g. "all nodes with attribute X").
    pub fn cache_nodes(&mut self, key: impl Into<String>, nodes: Vec<NodeId>) {
        self.node_sets.insert(key.into(), nodes);
    }

    pub fn cached_nodes(&self, key: &str) -> Option<&[NodeId]> {
        self.node_sets.get(key).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facts_are_keyed_and_replaceable() {
        let mut ctx = RuleContext::new();
        assert!(!ctx.has_fact("k"));
        ctx.put_fact("k", serde_json::json!(1));
        ctx.put_fact("k", serde_json::json!(2));
        assert_eq!(ctx.fact("k"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn node_sets_round_trip() {
        let mut ctx = RuleContext::new();
        assert!(ctx.cached_nodes("scopes").is_none());
        ctx.cache_nodes("scopes", vec![NodeId(1), NodeId(3)]);
        assert_eq!(ctx.cached_nodes("scopes"), Some(&[NodeId(1), NodeId(3)][..]));
    }
}
