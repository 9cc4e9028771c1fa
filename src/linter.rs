//! # Template Linter Module
//!
//! Checks a generator template before it is rendered.
//!
//! ## Checks Performed
//!
//! 1. **Fallback subset** - every construct the fallback renderer cannot model
//!    (conditionals, filters, nested loops, comments, whitespace markers,
//!    `loop.*`, unbalanced or unterminated tags) is an error
//! 2. **Known names** - variables and loop collections must exist in the
//!    render context
//! 3. **Coverage** - a template that never iterates `towers` or `heroes`
//!    produces a module without that table
//!
//! ## Usage
//!
//! ```rust
//! use towerstats::linter::{lint_template, LintSeverity};
//!
//! let issues = lint_template("{% if tower_count %}many{% endif %}");
//! assert!(issues.iter().any(|i| i.severity == LintSeverity::Error));
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::generator::fallback::{analyze, Node, ProblemKind, VarRef};

#[cfg(test)]
mod tests;

/// Scalars every template may reference.
const SCALARS: &[&str] = &["generator", "tower_count", "hero_count", "model_count"];

/// Collections and the fields their items carry.
const COLLECTIONS: &[(&str, &[&str])] = &[
    ("models", &["name", "description", "fields"]),
    ("towers", &["id", "name", "literal"]),
    ("heroes", &["id", "name", "literal"]),
];

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Rendering will fail
    Error,
    /// Renders, but the output is probably not what was intended
    Warning,
    /// Style suggestion
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        })
    }
}

/// A lint issue found in a template
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// 1-based template line; 0 for whole-template findings
    pub line: usize,
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "conditional", "unknown_variable")
    pub kind: String,
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        line: usize,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            line,
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

fn suggestion_for(kind: ProblemKind) -> &'static str {
    match kind {
        ProblemKind::Conditional => "move the condition into the render context and emit plain text",
        ProblemKind::Filter => "pre-format the value in the render context",
        ProblemKind::NestedLoop => "flatten the inner collection into a pre-rendered field",
        ProblemKind::Comment => "use a comment in the generated language instead",
        ProblemKind::WhitespaceControl => "drop the `-`/`+` marker; block tags already trim their own line",
        ProblemKind::LoopVariable => "expose the value as a field of the loop item",
        ProblemKind::UnsupportedExpression => "reference `name` or `item.field` only",
        ProblemKind::UnsupportedTag => "only `for ... in ...` and `endfor` block tags are available",
        ProblemKind::UnbalancedBlock => "pair every `for` with exactly one `endfor`",
        ProblemKind::UnterminatedTag => "close the tag on the same line",
    }
}

/// Lint template text.
///
/// Issues are returned in template line order.
#[must_use]
pub fn lint_template(source: &str) -> Vec<LintIssue> {
    let analysis = analyze(source);
    let mut issues: Vec<LintIssue> = analysis
        .problems
        .iter()
        .map(|p| {
            LintIssue::new(p.line, LintSeverity::Error, p.kind.as_str(), p.message.clone())
                .with_suggestion(suggestion_for(p.kind))
        })
        .collect();

    let mut iterated = HashSet::new();
    lint_nodes(&analysis.nodes, None, &mut iterated, &mut issues);

    if analysis.problems.is_empty() {
        for collection in ["towers", "heroes"] {
            if !iterated.contains(collection) {
                issues.push(
                    LintIssue::new(
                        0,
                        LintSeverity::Warning,
                        "missing_collection",
                        format!("template never iterates `{collection}`"),
                    )
                    .with_suggestion(format!(
                        "add `{{% for item in {collection} %}}` ... `{{% endfor %}}`"
                    )),
                );
            }
        }
    }
    if !source.ends_with('\n') {
        issues.push(LintIssue::new(
            0,
            LintSeverity::Info,
            "no_trailing_newline",
            "template does not end with a newline",
        ));
    }

    issues.sort_by_key(|i| i.line);
    issues
}

fn lint_nodes(
    nodes: &[Node],
    scope: Option<(&str, &str)>,
    iterated: &mut HashSet<String>,
    issues: &mut Vec<LintIssue>,
) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Var(var) => lint_var(var, scope, issues),
            Node::Loop {
                var,
                collection,
                line,
                body,
            } => {
                if COLLECTIONS.iter().any(|(name, _)| *name == collection.as_str()) {
                    iterated.insert(collection.clone());
                } else {
                    issues.push(
                        LintIssue::new(
                            *line,
                            LintSeverity::Error,
                            "unknown_collection",
                            format!("`{collection}` is not a collection of the render context"),
                        )
                        .with_suggestion("iterate `models`, `towers` or `heroes`"),
                    );
                }
                lint_nodes(body, Some((var.as_str(), collection.as_str())), iterated, issues);
            }
        }
    }
}

fn lint_var(var: &VarRef, scope: Option<(&str, &str)>, issues: &mut Vec<LintIssue>) {
    if let Some((item, collection)) = scope {
        if var.root == item {
            let fields = COLLECTIONS
                .iter()
                .find(|(name, _)| *name == collection)
                .map_or(&[][..], |(_, fields)| *fields);
            match &var.field {
                Some(field) if fields.contains(&field.as_str()) => {}
                Some(field) => issues.push(
                    LintIssue::new(
                        var.line,
                        LintSeverity::Error,
                        "unknown_field",
                        format!("items of `{collection}` have no field `{field}`"),
                    )
                    .with_suggestion(format!("available: {}", fields.join(", "))),
                ),
                None => issues.push(LintIssue::new(
                    var.line,
                    LintSeverity::Error,
                    "non_scalar",
                    format!("`{item}` is a record; reference one of its fields"),
                )),
            }
            return;
        }
    }

    if SCALARS.contains(&var.root.as_str()) && var.field.is_none() {
        return;
    }
    let kind = if COLLECTIONS.iter().any(|(name, _)| *name == var.root) {
        "non_scalar"
    } else {
        "unknown_variable"
    };
    issues.push(
        LintIssue::new(
            var.line,
            LintSeverity::Error,
            kind,
            format!("`{}` cannot be rendered here", var.root),
        )
        .with_suggestion(format!("scalars available: {}", SCALARS.join(", "))),
    );
}

/// Print lint issues in a formatted way
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("No lint issues found");
        return;
    }

    let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
    println!(
        "{} error(s), {} warning(s), {} info(s)",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );
    for issue in issues {
        let location = if issue.line == 0 {
            "template".to_string()
        } else {
            format!("line {}", issue.line)
        };
        println!("[{}] {} {}: {}", issue.severity, issue.kind, location, issue.message);
        if let Some(suggestion) = &issue.suggestion {
            println!("    suggestion: {suggestion}");
        }
    }
}

/// Whether any issue blocks rendering.
#[must_use]
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}
