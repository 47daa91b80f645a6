//! Engine-level scenarios: ordered context facts, determinism, fault
//! propagation, and cooperative cancellation.

use itemize_validate::{
    evaluate, evaluate_with_cancel, Document, EngineError, Location, Report, Rule, RuleContext,
    RuleFault, Severity,
};
use std::sync::atomic::AtomicBool;

/// Writes a named fact into the shared context and reports nothing.
struct WritesFact {
    key: &'static str,
}

impl Rule for WritesFact {
    fn id(&self) -> &str {
        "writes-fact"
    }

    fn apply(
        &self,
        _document: &Document,
        context: &mut RuleContext,
        _report: &mut Report,
    ) -> Result<bool, RuleFault> {
        context.put_fact(self.key, serde_json::json!(true));
        Ok(false)
    }
}

/// Appends an issue only when the named fact is absent.
struct RequiresFact {
    key: &'static str,
}

impl Rule for RequiresFact {
    fn id(&self) -> &str {
        "requires-fact"
    }

    fn apply(
        &self,
        _document: &Document,
        context: &mut RuleContext,
        report: &mut Report,
    ) -> Result<bool, RuleFault> {
        if context.has_fact(self.key) {
            return Ok(false);
        }
        report.add(
            Severity::Error,
            self.id(),
            format!("expected fact '{}' in context", self.key),
            Location::document(),
        );
        Ok(true)
    }
}

struct Faulty;

impl Rule for Faulty {
    fn id(&self) -> &str {
        "faulty"
    }

    fn apply(
        &self,
        _document: &Document,
        _context: &mut RuleContext,
        _report: &mut Report,
    ) -> Result<bool, RuleFault> {
        Err("synthetic internal fault".into())
    }
}

struct AlwaysWarn;

impl Rule for AlwaysWarn {
    fn id(&self) -> &str {
        "always-warn"
    }

    fn apply(
        &self,
        _document: &Document,
        _context: &mut RuleContext,
        report: &mut Report,
    ) -> Result<bool, RuleFault> {
        report.add(Severity::Warning, self.id(), "warn", Location::document());
        Ok(true)
    }
}

#[test]
fn earlier_rules_facts_are_visible_to_later_rules() {
    let doc = Document::with_root("html");
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(WritesFact { key: "f" }),
        Box::new(RequiresFact { key: "f" }),
    ];
    let report = evaluate(&doc, &rules).unwrap();
    // R1 wrote the fact, so R2 must not have complained.
    assert!(report.is_empty());
}

#[test]
fn reversed_order_loses_the_fact() {
    let doc = Document::with_root("html");
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(RequiresFact { key: "f" }),
        Box::new(WritesFact { key: "f" }),
    ];
    let report = evaluate(&doc, &rules).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.issues()[0].rule_id, "requires-fact");
}

#[test]
fn context_does_not_leak_across_passes() {
    let doc = Document::with_root("html");
    let seed: Vec<Box<dyn Rule>> = vec![Box::new(WritesFact { key: "f" })];
    evaluate(&doc, &seed).unwrap();

    let probe: Vec<Box<dyn Rule>> = vec![Box::new(RequiresFact { key: "f" })];
    let report = evaluate(&doc, &probe).unwrap();
    // Fresh context per pass: the earlier pass's fact is gone.
    assert_eq!(report.len(), 1);
}

#[test]
fn repeated_passes_are_deterministic() {
    let mut doc = Document::with_root("html");
    let div = doc.add_child(doc.root(), "div");
    doc.set_attr(div, "itemscope", "");

    let make_rules = || -> Vec<Box<dyn Rule>> {
        vec![
            Box::new(itemize_validate::rules::ItemScopeWithoutTypeRule),
            Box::new(itemize_validate::rules::DuplicateItemIdRule),
            Box::new(AlwaysWarn),
        ]
    };
    let first = evaluate(&doc, &make_rules()).unwrap();
    let second = evaluate(&doc, &make_rules()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.issues().len(), 2);
}

#[test]
fn fault_in_first_rule_suppresses_partial_report() {
    let doc = Document::with_root("html");
    let rules: Vec<Box<dyn Rule>> = vec![Box::new(Faulty), Box::new(AlwaysWarn)];
    match evaluate(&doc, &rules) {
        Err(EngineError::RuleEvaluationFailed { rule_id, source }) => {
            assert_eq!(rule_id, "faulty");
            assert_eq!(source.to_string(), "synthetic internal fault");
        }
        other => panic!("expected RuleEvaluationFailed, got {other:?}"),
    }
}

#[test]
fn fault_after_issues_still_aborts_the_pass() {
    let doc = Document::with_root("html");
    let rules: Vec<Box<dyn Rule>> = vec![Box::new(AlwaysWarn), Box::new(Faulty)];
    assert!(matches!(
        evaluate(&doc, &rules),
        Err(EngineError::RuleEvaluationFailed { .. })
    ));
}

#[test]
fn cancellation_counts_completed_rules() {
    struct CancelAfterSelf {
        flag: std::sync::Arc<AtomicBool>,
    }

    impl Rule for CancelAfterSelf {
        fn id(&self) -> &str {
            "cancel-after-self"
        }

        fn apply(
            &self,
            _document: &Document,
            _context: &mut RuleContext,
            _report: &mut Report,
        ) -> Result<bool, RuleFault> {
            self.flag.store(true, std::sync::atomic::Ordering::Relaxed);
            Ok(false)
        }
    }

    let doc = Document::with_root("html");
    let cancel = std::sync::Arc::new(AtomicBool::new(false));
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(CancelAfterSelf {
            flag: cancel.clone(),
        }),
        Box::new(AlwaysWarn),
    ];
    match evaluate_with_cancel(&doc, &rules, &cancel) {
        Err(EngineError::Cancelled { rules_run }) => assert_eq!(rules_run, 1),
        other => panic!("expected Cancelled, got {other:?}"),
    }
}

#[test]
fn shared_rule_set_works_across_documents() {
    // Rules are stateless: the same boxed set validates two documents.
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(itemize_validate::rules::ItemScopeWithoutTypeRule),
        Box::new(itemize_validate::rules::DuplicateItemIdRule),
    ];

    let mut bad = Document::with_root("html");
    let div = bad.add_child(bad.root(), "div");
    bad.set_attr(div, "itemscope", "");

    let clean = Document::with_root("html");

    assert_eq!(evaluate(&bad, &rules).unwrap().len(), 1);
    assert!(evaluate(&clean, &rules).unwrap().is_empty());
    // And the bad document still reports identically on a re-run.
    assert_eq!(evaluate(&bad, &rules).unwrap().len(), 1);
}
