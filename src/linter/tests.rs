#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for the template linter

use crate::generator::BUNDLED_TEMPLATE;
use crate::linter::{has_errors, lint_template, LintIssue, LintSeverity};

fn kinds(issues: &[LintIssue]) -> Vec<&str> {
    issues.iter().map(|i| i.kind.as_str()).collect()
}

#[test]
fn test_bundled_template_is_clean() {
    let issues = lint_template(BUNDLED_TEMPLATE);
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn test_lint_conditional() {
    let issues = lint_template("a\n{% if tower_count %}\nmany\n{% endif %}\n");
    let cond: Vec<_> = issues.iter().filter(|i| i.kind == "conditional").collect();
    assert_eq!(cond.len(), 2);
    assert_eq!(cond[0].line, 2);
    assert_eq!(cond[0].severity, LintSeverity::Error);
    assert!(cond[0].suggestion.is_some());
}

#[test]
fn test_lint_reports_every_problem() {
    let template = "{{ generator | upper }}\n{# note #}\n{% for t in towers %}\n{% for u in heroes %}\n{% endfor %}\n{% endfor %}\n";
    let issues = lint_template(template);
    let found = kinds(&issues);
    assert!(found.contains(&"filter"));
    assert!(found.contains(&"comment"));
    assert!(found.contains(&"nested_loop"));
    assert!(has_errors(&issues));
}

#[test]
fn test_lint_unknown_names() {
    let template = "{{ version }}\n{% for t in towers %}\n{{ t.cost }}\n{{ t }}\n{% endfor %}\n{% for h in heroes %}\n{% endfor %}\n";
    let issues = lint_template(template);
    assert_eq!(kinds(&issues), ["unknown_variable", "unknown_field", "non_scalar"]);
    assert_eq!(issues[1].line, 3);
    assert!(issues[1]
        .suggestion
        .as_deref()
        .unwrap()
        .contains("literal"));
}

#[test]
fn test_lint_unknown_collection() {
    let issues = lint_template("{% for u in upgrades %}\n{% endfor %}\n");
    assert!(kinds(&issues).contains(&"unknown_collection"));
}

#[test]
fn test_lint_missing_collections_warn() {
    let issues = lint_template("// {{ generator }}\n{% for t in towers %}\n{{ t.literal }}\n{% endfor %}\n");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, "missing_collection");
    assert_eq!(issues[0].severity, LintSeverity::Warning);
    assert!(!has_errors(&issues));
}

#[test]
fn test_lint_trailing_newline_info() {
    let issues = lint_template("{% for t in towers %}{% endfor %}{% for h in heroes %}{% endfor %}");
    assert_eq!(kinds(&issues), ["no_trailing_newline"]);
    assert_eq!(issues[0].severity, LintSeverity::Info);
}
