//! itemize-validate: rule-based validation of parsed documents.
//!
//! The engine consumes an already-parsed [`Document`] tree (same division of
//! labor as itemize-core's extraction: parsing stays with the host) and an
//! ordered list of [`Rule`]s, and produces one [`Report`] per pass. Each
//! pass owns a fresh [`RuleContext`] shared across its rules, so facts
//! derived by an earlier rule are visible to later rules.
//!
//! # Public API
//!
//! - [`evaluate()`] / [`evaluate_with_cancel()`] -- run one pass
//! - [`Rule`] -- the pluggable check trait (open registry)
//! - [`Report`], [`Issue`], [`Severity`], [`Location`] -- pass output
//! - [`rules`] -- built-in structural rules

pub mod context;
pub mod document;
pub mod engine;
pub mod report;
pub mod rule;
pub mod rules;

// ── Convenience re-exports: key types ────────────────────────────────

pub use context::RuleContext;
pub use document::{Document, Node, NodeId};
pub use engine::{EngineError, Pass};
pub use report::{Issue, Location, Report, Severity};
pub use rule::{Rule, RuleFault};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use engine::{evaluate, evaluate_with_cancel};
