//! Dispatch engine orchestrating one audit run over a document.
//!
//! The engine builds an element-type → handler map once, walks the tree
//! exactly once, and then drives the finalize phases. Finalize order equals
//! registration order and is a load-bearing contract: a checker's finalize
//! may read tree state already repaired by an earlier checker (heading
//! re-leveling runs before anything that assumes normalized levels), and
//! analyzers finalize last so analytics reflect the post-fix document.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::analyze::AnalyzerBox;
use crate::check::CheckBox;
use crate::metrics::AnalyzerResult;
use crate::tree::{Document, ElementType};
use crate::types::CheckResult;

/// Handler slot in the dispatch map, preserving registration order across
/// both handler sets (checkers before analyzers for any given variant).
#[derive(Debug, Clone, Copy)]
enum Handler {
    Check(usize),
    Analyzer(usize),
}

/// Results of a completed audit run.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// One result per registered checker, in registration order.
    pub check_results: Vec<CheckResult>,
    /// One result per registered analyzer, in registration order.
    pub analyzer_results: Vec<AnalyzerResult>,
}

impl RunOutcome {
    /// Total number of issues across all checks.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.check_results.iter().map(|r| r.issues.len()).sum()
    }

    /// Number of issues marked fixed across all checks.
    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.check_results.iter().map(CheckResult::fixed_count).sum()
    }

    /// Whether any unfixed error-severity issue remains.
    #[must_use]
    pub fn has_unfixed_errors(&self) -> bool {
        self.check_results.iter().any(|r| {
            r.issues
                .iter()
                .any(|i| i.severity == crate::Severity::Error && !i.fixed)
        })
    }
}

/// The audit engine: registered handlers plus the dispatch map.
pub struct Engine {
    checks: Vec<CheckBox>,
    analyzers: Vec<AnalyzerBox>,
    dispatch: HashMap<ElementType, Vec<Handler>>,
}

impl Engine {
    /// Creates an engine over the given handler sets.
    ///
    /// Registration order of `checks` is the finalize order.
    #[must_use]
    pub fn new(checks: Vec<CheckBox>, analyzers: Vec<AnalyzerBox>) -> Self {
        let mut dispatch: HashMap<ElementType, Vec<Handler>> = HashMap::new();
        for (i, check) in checks.iter().enumerate() {
            for etype in check.element_types() {
                // Doc interest means pre-walk invocation, not per-node dispatch.
                if *etype != ElementType::Doc {
                    dispatch.entry(*etype).or_default().push(Handler::Check(i));
                }
            }
        }
        for (i, analyzer) in analyzers.iter().enumerate() {
            for etype in analyzer.element_types() {
                if *etype != ElementType::Doc {
                    dispatch
                        .entry(*etype)
                        .or_default()
                        .push(Handler::Analyzer(i));
                }
            }
        }
        Self {
            checks,
            analyzers,
            dispatch,
        }
    }

    /// Total number of registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.checks.len() + self.analyzers.len()
    }

    /// Runs the full pre-walk / walk / finalize sequence.
    ///
    /// The tree is only mutated during checker finalize, and only when
    /// `fix` is set. A panic escaping any handler aborts the run; handlers
    /// catch their own external-call failures.
    pub fn run(&mut self, doc: &mut Document, fix: bool) -> RunOutcome {
        info!(
            checks = self.checks.len(),
            analyzers = self.analyzers.len(),
            fix,
            "starting audit run"
        );

        self.pre_walk(doc);
        self.walk(doc);

        let mut outcome = RunOutcome::default();
        for check in &mut self.checks {
            debug!(check_id = check.check_id(), "finalizing check");
            outcome.check_results.push(check.finalize(doc, fix));
        }
        for analyzer in &mut self.analyzers {
            debug!(analyzer_id = analyzer.analyzer_id(), "finalizing analyzer");
            outcome.analyzer_results.push(analyzer.finalize(doc));
        }

        info!(
            issues = outcome.issue_count(),
            fixed = outcome.fixed_count(),
            "audit run complete"
        );
        outcome
    }

    /// Invokes every Doc-interested handler once with the root.
    fn pre_walk(&mut self, doc: &Document) {
        let root = doc.root();
        for check in &mut self.checks {
            if check.element_types().contains(&ElementType::Doc) {
                debug!(check_id = check.check_id(), "pre-walk");
                check.check(doc, root);
            }
        }
        for analyzer in &mut self.analyzers {
            if analyzer.element_types().contains(&ElementType::Doc) {
                analyzer.analyze(doc, root);
            }
        }
    }

    /// Single depth-first pre-order traversal with per-node dispatch.
    fn walk(&mut self, doc: &Document) {
        for node in doc.preorder() {
            let etype = doc.kind(node).element_type();
            let Some(handlers) = self.dispatch.get(&etype) else {
                continue;
            };
            for handler in handlers.clone() {
                match handler {
                    Handler::Check(i) => self.checks[i].check(doc, node),
                    Handler::Analyzer(i) => self.analyzers[i].analyze(doc, node),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricCategory;
    use crate::tree::{ElementKind, NodeId};
    use crate::types::IssueList;
    use std::sync::{Arc, Mutex};

    /// Probe recording every event into a shared log.
    struct ProbeCheck {
        id: &'static str,
        interests: &'static [ElementType],
        log: Arc<Mutex<Vec<String>>>,
    }

    impl crate::Check for ProbeCheck {
        fn check_id(&self) -> &'static str {
            self.id
        }
        fn check_name(&self) -> &'static str {
            "Probe"
        }
        fn wcag_sc(&self) -> &'static str {
            "0.0.0"
        }
        fn element_types(&self) -> &'static [ElementType] {
            self.interests
        }
        fn check(&mut self, doc: &Document, node: NodeId) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:check:{:?}", self.id, doc.kind(node).element_type()));
        }
        fn finalize(&mut self, _doc: &mut Document, _fix: bool) -> CheckResult {
            self.log.lock().unwrap().push(format!("{}:finalize", self.id));
            IssueList::new().into_result(self.id, "Probe")
        }
    }

    struct ProbeAnalyzer {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl crate::Analyzer for ProbeAnalyzer {
        fn analyzer_id(&self) -> &'static str {
            "probe-analyzer"
        }
        fn analyzer_name(&self) -> &'static str {
            "Probe Analyzer"
        }
        fn category(&self) -> MetricCategory {
            MetricCategory::TextStatistics
        }
        fn element_types(&self) -> &'static [ElementType] {
            &[ElementType::Para]
        }
        fn analyze(&mut self, _doc: &Document, _node: NodeId) {
            self.log.lock().unwrap().push("analyzer:analyze".into());
        }
        fn finalize(&mut self, _doc: &Document) -> AnalyzerResult {
            self.log.lock().unwrap().push("analyzer:finalize".into());
            AnalyzerResult::new("probe-analyzer", "Probe Analyzer", self.category(), vec![])
        }
    }

    fn sample_doc() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let header = doc.alloc(ElementKind::Header { level: 1 });
        let title = doc.alloc_str("Title");
        doc.append_child(header, title);
        let para = doc.alloc(ElementKind::Para);
        let text = doc.alloc_str("Body");
        doc.append_child(para, text);
        doc.append_child(root, header);
        doc.append_child(root, para);
        doc
    }

    #[test]
    fn doc_handlers_run_before_walk() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let doc_probe = ProbeCheck {
            id: "doc-probe",
            interests: &[ElementType::Doc],
            log: Arc::clone(&log),
        };
        let para_probe = ProbeCheck {
            id: "para-probe",
            interests: &[ElementType::Para],
            log: Arc::clone(&log),
        };

        let mut doc = sample_doc();
        let mut engine = Engine::new(vec![Box::new(doc_probe), Box::new(para_probe)], vec![]);
        engine.run(&mut doc, false);

        let events = log.lock().unwrap().clone();
        assert_eq!(events[0], "doc-probe:check:Doc");
        assert!(events.contains(&"para-probe:check:Para".to_string()));
    }

    #[test]
    fn finalize_follows_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let first = ProbeCheck {
            id: "first",
            interests: &[ElementType::Header],
            log: Arc::clone(&log),
        };
        let second = ProbeCheck {
            id: "second",
            interests: &[ElementType::Header],
            log: Arc::clone(&log),
        };

        let mut doc = sample_doc();
        let mut engine = Engine::new(vec![Box::new(first), Box::new(second)], vec![]);
        engine.run(&mut doc, true);

        let events = log.lock().unwrap().clone();
        let f1 = events.iter().position(|e| e == "first:finalize").unwrap();
        let f2 = events.iter().position(|e| e == "second:finalize").unwrap();
        assert!(f1 < f2);
        // Walk dispatch also respects registration order.
        let c1 = events.iter().position(|e| e == "first:check:Header").unwrap();
        let c2 = events.iter().position(|e| e == "second:check:Header").unwrap();
        assert!(c1 < c2);
    }

    #[test]
    fn analyzers_finalize_after_checks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let check = ProbeCheck {
            id: "check",
            interests: &[ElementType::Para],
            log: Arc::clone(&log),
        };
        let analyzer = ProbeAnalyzer {
            log: Arc::clone(&log),
        };

        let mut doc = sample_doc();
        let mut engine = Engine::new(vec![Box::new(check)], vec![Box::new(analyzer)]);
        let outcome = engine.run(&mut doc, false);

        let events = log.lock().unwrap().clone();
        let check_fin = events.iter().position(|e| e == "check:finalize").unwrap();
        let analyzer_fin = events.iter().position(|e| e == "analyzer:finalize").unwrap();
        assert!(check_fin < analyzer_fin);
        assert_eq!(outcome.check_results.len(), 1);
        assert_eq!(outcome.analyzer_results.len(), 1);
    }

    #[test]
    fn handler_count_covers_both_sets() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let engine = Engine::new(
            vec![Box::new(ProbeCheck {
                id: "only",
                interests: &[ElementType::Para],
                log: Arc::clone(&log),
            })],
            vec![Box::new(ProbeAnalyzer { log })],
        );
        assert_eq!(engine.handler_count(), 2);
    }
}
