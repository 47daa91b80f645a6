//! The rule abstraction: one pluggable structural check.

use crate::context::RuleContext;
use crate::document::Document;
use crate::report::Report;

/// An internal fault raised by a rule during evaluation. Faults are fatal to
/// the whole pass, never swallowed (see [`crate::engine::EngineError`]).
pub type RuleFault = Box<dyn std::error::Error + Send + Sync>;

/// One structural check applied to a document during validation.
///
/// Rules are stateless or externally parameterized: they hold no mutable
/// state between invocations, so one instance is reusable across passes and
/// documents, and a rule set may be shared read-only across concurrent
/// passes on different documents (`Send + Sync`).
///
/// Within one pass, rules run strictly in list order and share one
/// [`RuleContext`]: facts written by an earlier rule are visible to later
/// rules. A rule appends zero or more issues to the shared report and
/// returns whether it found any.
pub trait Rule: Send + Sync {
    /// Stable identifier recorded on every issue this rule appends.
    fn id(&self) -> &str;

    /// Apply this rule to the document. Returns `Ok(true)` if at least one
    /// issue was detected, `Ok(false)` otherwise.
    fn apply(
        &self,
        document: &Document,
        context: &mut RuleContext,
        report: &mut Report,
    ) -> Result<bool, RuleFault>;
}
