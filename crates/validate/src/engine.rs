//! The rule engine driver: applies an ordered rule list to one document,
//! producing one report.
//!
//! One pass moves through `Created -> Running -> Completed` with no backward
//! transitions. The driver creates a fresh [`RuleContext`] and empty
//! [`Report`], invokes every rule exactly once in list order (validation is
//! exhaustive, not short-circuiting), and returns the final report. A rule
//! fault aborts the pass; a partial report is never returned as success.

use crate::context::RuleContext;
use crate::document::Document;
use crate::report::Report;
use crate::rule::{Rule, RuleFault};
use std::sync::atomic::{AtomicBool, Ordering};

/// Errors that abort a validation pass.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A rule raised an internal fault. The pass is not retried and the
    /// fault is not swallowed; the caller decides whether to exclude the
    /// rule and re-run.
    #[error("rule '{rule_id}' failed during evaluation")]
    RuleEvaluationFailed {
        rule_id: String,
        #[source]
        source: RuleFault,
    },

    /// The cancellation flag was observed before a rule started.
    #[error("validation pass cancelled after {rules_run} rule(s)")]
    Cancelled { rules_run: usize },
}

enum PassState {
    Created,
    Running(usize),
    Completed,
}

/// One validation pass over one document.
///
/// Owns the pass-scoped context and report; neither is shared beyond this
/// pass's thread of execution, so no locking is involved. The document is
/// never mutated.
pub struct Pass<'a> {
    document: &'a Document,
    context: RuleContext,
    report: Report,
    state: PassState,
}

impl<'a> Pass<'a> {
    pub fn new(document: &'a Document) -> Pass<'a> {
        Pass {
            document,
            context: RuleContext::new(),
            report: Report::new(),
            state: PassState::Created,
        }
    }

    /// Run every rule in order, checking `cancel` before each one.
    /// Consumes the pass: the report is frozen on return.
    pub fn run(
        mut self,
        rules: &[Box<dyn Rule>],
        cancel: &AtomicBool,
    ) -> Result<Report, EngineError> {
        // `run` consumes the pass, so re-entry and backward transitions are
        // unrepresentable; the state field tracks forward progress only.
        debug_assert!(matches!(self.state, PassState::Created));
        for (index, rule) in rules.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                return Err(EngineError::Cancelled {
                    rules_run: self.rules_run(),
                });
            }
            self.state = PassState::Running(index);
            // Issues found so far do not stop later rules; only a fault does.
            rule.apply(self.document, &mut self.context, &mut self.report)
                .map_err(|source| EngineError::RuleEvaluationFailed {
                    rule_id: rule.id().to_string(),
                    source,
                })?;
        }
        self.state = PassState::Completed;
        Ok(self.report)
    }

    /// Number of rules that finished (the pass checks cancellation before
    /// starting the next rule, so `Running(i)` means `i + 1` have run).
    fn rules_run(&self) -> usize {
        match self.state {
            PassState::Created => 0,
            PassState::Running(index) => index + 1,
            PassState::Completed => 0,
        }
    }
}

/// Apply `rules` to `document` in order and return the resulting report.
///
/// Deterministic for a fixed `(document, rules)` pair. An empty report is
/// success.
pub fn evaluate(document: &Document, rules: &[Box<dyn Rule>]) -> Result<Report, EngineError> {
    let cancel = AtomicBool::new(false);
    Pass::new(document).run(rules, &cancel)
}

/// Like [`evaluate`], but cooperatively abortable: the flag is checked
/// before each rule invocation, the only natural preemption boundary of a
/// pass.
pub fn evaluate_with_cancel(
    document: &Document,
    rules: &[Box<dyn Rule>],
    cancel: &AtomicBool,
) -> Result<Report, EngineError> {
    Pass::new(document).run(rules, cancel)
}
