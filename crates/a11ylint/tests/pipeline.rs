//! End-to-end pipeline tests over the native JSON format.

use std::sync::Arc;

use a11ylint::{audit, AuditOptions, GeneratorError, JsonConverter, LinkRewrite, Severity};

const SOURCE: &str = r#"{
    "content": [
        {"t": "header", "level": 2, "content": [{"t": "str", "text": "Intro"}]},
        {"t": "header", "level": 4, "content": [{"t": "str", "text": "Too deep"}]},
        {"t": "para", "content": [
            {"t": "str", "text": "See"},
            {"t": "space"},
            {"t": "link", "url": "https://example.com/report", "content": [{"t": "str", "text": "click here"}]}
        ]},
        {"t": "para", "content": [{"t": "str", "text": "• apples"}]},
        {"t": "para", "content": [{"t": "str", "text": "• oranges"}]},
        {"t": "table", "rows": [["2024", "7"]]}
    ]
}"#;

#[test]
fn report_only_run_finds_expected_issues() {
    let options = AuditOptions {
        fix: false,
        ..AuditOptions::default()
    };
    let outcome = audit(SOURCE, &JsonConverter::new(), &options).unwrap();

    let by_id = |id: &str| {
        outcome
            .check_results
            .iter()
            .find(|r| r.check_id == id)
            .unwrap()
    };

    // No H1 and a skipped level.
    assert_eq!(by_id("heading-hierarchy").error_count(), 2);
    // Generic link text.
    assert_eq!(by_id("link-text").issues.len(), 1);
    // Two bullet paragraphs grouped into one warning.
    assert_eq!(by_id("list-structure").issues.len(), 1);
    // Missing caption.
    assert_eq!(by_id("table-accessibility").issues.len(), 1);
    // Missing language metadata.
    assert_eq!(by_id("document-language").issues.len(), 1);

    assert!(outcome.check_results.iter().all(|r| r
        .issues
        .iter()
        .all(|i| !i.fixed)));
}

#[test]
fn fix_run_repairs_structural_issues() {
    let outcome = audit(SOURCE, &JsonConverter::new(), &AuditOptions::default()).unwrap();

    // Re-leveled heading and promoted language tag survive the round trip.
    let reparsed: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
    assert_eq!(reparsed["metadata"]["lang"], "en");
    assert_eq!(reparsed["content"][1]["t"], "header");
    assert_eq!(reparsed["content"][1]["level"], 3);

    // The bullet paragraphs became one list.
    let kinds: Vec<&str> = reparsed["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["t"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"bullet_list"));

    // Structural fixes are marked; generator-dependent ones are not.
    let list = outcome
        .check_results
        .iter()
        .find(|r| r.check_id == "list-structure")
        .unwrap();
    assert!(list.issues[0].fixed);
    let link = outcome
        .check_results
        .iter()
        .find(|r| r.check_id == "link-text")
        .unwrap();
    assert!(!link.issues[0].fixed);
}

struct StubRewriter;

impl a11ylint::LinkTextGenerator for StubRewriter {
    fn rewrite(&self, batch: &[LinkRewrite]) -> Result<Vec<String>, GeneratorError> {
        Ok(batch.iter().map(|_| "Annual report".to_string()).collect())
    }
}

#[test]
fn configured_generator_fixes_link_text() {
    let mut options = AuditOptions::default();
    options.generators.link_text = Some(Arc::new(StubRewriter));
    let outcome = audit(SOURCE, &JsonConverter::new(), &options).unwrap();

    let link = outcome
        .check_results
        .iter()
        .find(|r| r.check_id == "link-text")
        .unwrap();
    assert!(link.issues[0].fixed);
    assert!(outcome.output.contains("Annual report"));
}

#[test]
fn analytics_appends_composite_score() {
    let options = AuditOptions {
        analytics: true,
        fix: false,
        ..AuditOptions::default()
    };
    let outcome = audit(SOURCE, &JsonConverter::new(), &options).unwrap();

    let score = outcome
        .analyzer_results
        .iter()
        .find(|r| r.analyzer_id == "accessibility-score")
        .unwrap();
    let value = score
        .metric("accessibility_score")
        .and_then(|m| m.value.as_f64())
        .unwrap();
    // Unfixed errors keep the score strictly below 100.
    assert!(value < 100.0);
    assert!(value >= 0.0);

    // The analyzer set ran too.
    assert!(outcome
        .analyzer_results
        .iter()
        .any(|r| r.analyzer_id == "text-statistics"));
}

#[test]
fn disabled_check_does_not_run() {
    let options = AuditOptions {
        fix: false,
        disabled_checks: vec!["link-text".to_string()],
        ..AuditOptions::default()
    };
    let outcome = audit(SOURCE, &JsonConverter::new(), &options).unwrap();
    assert!(outcome
        .check_results
        .iter()
        .all(|r| r.check_id != "link-text"));
}

#[test]
fn report_shape_matches_results() {
    let options = AuditOptions {
        fix: false,
        ..AuditOptions::default()
    };
    let outcome = audit(SOURCE, &JsonConverter::new(), &options).unwrap();
    let report = outcome.report();
    assert_eq!(report.checks.len(), outcome.check_results.len());

    let json = serde_json::to_value(&report).unwrap();
    let issues = json["checks"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|c| c["issues"].as_array().unwrap().clone())
        .collect::<Vec<_>>();
    assert!(!issues.is_empty());
    assert!(issues.iter().all(|i| i["severity"] == "error" || i["severity"] == "warning"));
}

#[test]
fn warnings_do_not_count_as_errors() {
    let outcome = audit(
        SOURCE,
        &JsonConverter::new(),
        &AuditOptions {
            fix: false,
            ..AuditOptions::default()
        },
    )
    .unwrap();
    let list = outcome
        .check_results
        .iter()
        .find(|r| r.check_id == "list-structure")
        .unwrap();
    assert_eq!(list.issues[0].severity, Severity::Warning);
    assert_eq!(list.error_count(), 0);
}
