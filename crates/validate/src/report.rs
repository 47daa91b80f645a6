//! Validation reports: the ordered, externally observable result of one
//! rule-evaluation pass.

use crate::document::{Document, NodeId};
use serde::Serialize;

/// Severity level for a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Opaque locator for where an issue was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Slash path into the document tree.
    pub path: String,
    /// Arena index of the offending node, when one exists.
    pub node: Option<usize>,
}

impl Location {
    /// Locate an issue at a specific document node.
    pub fn at(document: &Document, node: NodeId) -> Location {
        Location {
            path: document.path(node),
            node: Some(node.0),
        }
    }

    /// Locate a document-wide issue with no single offending node.
    pub fn document() -> Location {
        Location {
            path: "/".to_string(),
            node: None,
        }
    }
}

/// One detected issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub rule_id: String,
    pub message: String,
    pub location: Location,
}

/// Ordered collection of issues accumulated across one pass.
///
/// Append-only while the pass runs; read-only once the driver returns it.
/// Zero issues is success, not an error condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    issues: Vec<Issue>,
}

impl Report {
    pub fn new() -> Report {
        Report::default()
    }

    /// Append one issue in evaluation order.
    pub fn add(
        &mut self,
        severity: Severity,
        rule_id: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) {
        self.issues.push(Issue {
            severity,
            rule_id: rule_id.into(),
            message: message.into(),
            location,
        });
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Count of issues at a given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}
