//! Built-in structural rules for micro-item markup.
//!
//! The first rule that needs the scope-node set caches it into the shared
//! context under [`ITEM_SCOPE_NODES`], so later rules in the same pass skip
//! the document walk.

use crate::context::RuleContext;
use crate::document::{Document, NodeId};
use crate::report::{Location, Report, Severity};
use crate::rule::{Rule, RuleFault};
use itemize_core::PropertyValue;
use std::collections::BTreeMap;

/// Context key for the cached set of scope-marking nodes.
pub const ITEM_SCOPE_NODES: &str = "itemize.item_scope_nodes";

const SCOPE_ATTR: &str = "itemscope";
const TYPE_ATTR: &str = "itemtype";
const ID_ATTR: &str = "itemid";
const PROP_ATTR: &str = "itemprop";
const DATETIME_ATTR: &str = "datetime";

fn scope_nodes(document: &Document, context: &mut RuleContext) -> Vec<NodeId> {
    if let Some(cached) = context.cached_nodes(ITEM_SCOPE_NODES) {
        return cached.to_vec();
    }
    let nodes = document.nodes_with_attr(SCOPE_ATTR);
    context.cache_nodes(ITEM_SCOPE_NODES, nodes.clone());
    nodes
}

/// Flags scope-marking nodes that declare no item type.
///
/// An untyped scope still extracts, but consumers cannot interpret its
/// properties, so this is a warning rather than an error.
pub struct ItemScopeWithoutTypeRule;

impl Rule for ItemScopeWithoutTypeRule {
    fn id(&self) -> &str {
        "item-scope-without-type"
    }

    fn apply(
        &self,
        document: &Document,
        context: &mut RuleContext,
        report: &mut Report,
    ) -> Result<bool, RuleFault> {
        let mut found = false;
        for node in scope_nodes(document, context) {
            if !document.has_attr(node, TYPE_ATTR) {
                report.add(
                    Severity::Warning,
                    self.id(),
                    format!("'{}' node declares no '{}'", SCOPE_ATTR, TYPE_ATTR),
                    Location::at(document, node),
                );
                found = true;
            }
        }
        Ok(found)
    }
}

/// Flags item identifiers used by more than one scope node.
pub struct DuplicateItemIdRule;

impl Rule for DuplicateItemIdRule {
    fn id(&self) -> &str {
        "duplicate-item-id"
    }

    fn apply(
        &self,
        document: &Document,
        context: &mut RuleContext,
        report: &mut Report,
    ) -> Result<bool, RuleFault> {
        let mut first_seen: BTreeMap<&str, NodeId> = BTreeMap::new();
        let mut found = false;
        for node in scope_nodes(document, context) {
            let Some(item_id) = document.attr(node, ID_ATTR) else {
                continue;
            };
            match first_seen.get(item_id) {
                Some(first) => {
                    report.add(
                        Severity::Error,
                        self.id(),
                        format!(
                            "item id '{}' already used at {}",
                            item_id,
                            document.path(*first)
                        ),
                        Location::at(document, node),
                    );
                    found = true;
                }
                None => {
                    first_seen.insert(item_id, node);
                }
            }
        }
        Ok(found)
    }
}

/// Flags property nodes whose declared date value fails the yyyy-MM-dd
/// coercion of the value model.
pub struct MalformedDateValueRule;

impl Rule for MalformedDateValueRule {
    fn id(&self) -> &str {
        "malformed-date-value"
    }

    fn apply(
        &self,
        document: &Document,
        _context: &mut RuleContext,
        report: &mut Report,
    ) -> Result<bool, RuleFault> {
        let mut found = false;
        for node in document.nodes_with_attr(PROP_ATTR) {
            let Some(raw) = document.attr(node, DATETIME_ATTR) else {
                continue;
            };
            let parsed = PropertyValue::date(raw).and_then(|value| value.as_date());
            if let Err(error) = parsed {
                report.add(
                    Severity::Warning,
                    self.id(),
                    error.to_string(),
                    Location::at(document, node),
                );
                found = true;
            }
        }
        Ok(found)
    }
}
