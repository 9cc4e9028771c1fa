//! Regex-driven renderer for the narrow template subset the generator uses.
//!
//! Supported: plain text, `{{ name }}` and `{{ item.field }}` tokens, and
//! non-nested `{% for item in collection %}` ... `{% endfor %}` blocks.
//! Block tags follow the engine's `trim_blocks` + `lstrip_blocks` rules, so a
//! template inside this subset renders byte-for-byte like the engine would.
//! Anything else is reported as a [`Problem`] and rendering refuses to start.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::context::RenderContext;
use super::templates::{RendererKind, TemplateRenderer};
use crate::error::{CatalogError, Result};

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{(.*?)\}\}|\{%(.*?)%\}|\{#(.*?)#\}").expect("tag regex should be valid")
});

static VAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)(?:\.([A-Za-z_][A-Za-z0-9_]*))?$")
        .expect("variable regex should be valid")
});

static FOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^for\s+([A-Za-z_][A-Za-z0-9_]*)\s+in\s+([A-Za-z_][A-Za-z0-9_]*)$")
        .expect("for regex should be valid")
});

/// Construct the fallback renderer cannot model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    Conditional,
    Filter,
    NestedLoop,
    Comment,
    WhitespaceControl,
    LoopVariable,
    UnsupportedExpression,
    UnsupportedTag,
    UnbalancedBlock,
    UnterminatedTag,
}

impl ProblemKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::Conditional => "conditional",
            ProblemKind::Filter => "filter",
            ProblemKind::NestedLoop => "nested_loop",
            ProblemKind::Comment => "comment",
            ProblemKind::WhitespaceControl => "whitespace_control",
            ProblemKind::LoopVariable => "loop_variable",
            ProblemKind::UnsupportedExpression => "unsupported_expression",
            ProblemKind::UnsupportedTag => "unsupported_tag",
            ProblemKind::UnbalancedBlock => "unbalanced_block",
            ProblemKind::UnterminatedTag => "unterminated_tag",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub line: usize,
    pub kind: ProblemKind,
    pub message: String,
}

impl Problem {
    fn new(line: usize, kind: ProblemKind, message: impl Into<String>) -> Self {
        Problem {
            line,
            kind,
            message: message.into(),
        }
    }
}

impl From<Problem> for CatalogError {
    fn from(p: Problem) -> Self {
        CatalogError::template(p.line, p.message)
    }
}

/// A variable reference: `root` or `root.field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    pub root: String,
    pub field: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Var(VarRef),
    Loop {
        var: String,
        collection: String,
        line: usize,
        body: Vec<Node>,
    },
}

/// Parse result; `nodes` is only meaningful when `problems` is empty.
#[derive(Debug, Default)]
pub struct Analysis {
    pub nodes: Vec<Node>,
    pub problems: Vec<Problem>,
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}

fn has_ws_marker(inner: &str) -> bool {
    inner.starts_with(['-', '+']) || inner.ends_with(['-', '+'])
}

/// `lstrip_blocks`: drop spaces and tabs before a block tag when nothing
/// else precedes it on the line. `starts_line` tells whether `text` itself
/// begins a source line.
fn lstrip(text: &str, starts_line: bool) -> &str {
    let trimmed = text.trim_end_matches(|c: char| c.is_whitespace() && c != '\n' && c != '\r');
    if trimmed.ends_with(['\n', '\r']) || (trimmed.is_empty() && starts_line) {
        trimmed
    } else {
        text
    }
}

/// `trim_blocks`: drop the first newline after a block tag.
fn trim_newline(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}

enum Block {
    For { var: String, collection: String },
    EndFor,
}

fn parse_var(inner: &str, line: usize) -> std::result::Result<VarRef, Problem> {
    if has_ws_marker(inner) {
        return Err(Problem::new(
            line,
            ProblemKind::WhitespaceControl,
            "whitespace control markers are not supported",
        ));
    }
    let expr = inner.trim();
    if expr.contains('|') {
        return Err(Problem::new(
            line,
            ProblemKind::Filter,
            format!("filters are not supported: `{expr}`"),
        ));
    }
    let caps = VAR_RE.captures(expr).ok_or_else(|| {
        Problem::new(
            line,
            ProblemKind::UnsupportedExpression,
            format!("unsupported expression `{expr}`"),
        )
    })?;
    let root = caps.get(1).map_or("", |m| m.as_str());
    if root == "loop" {
        return Err(Problem::new(
            line,
            ProblemKind::LoopVariable,
            format!("`{expr}` is not supported"),
        ));
    }
    Ok(VarRef {
        root: root.to_string(),
        field: caps.get(2).map(|m| m.as_str().to_string()),
        line,
    })
}

fn parse_block(inner: &str, line: usize) -> std::result::Result<Block, Problem> {
    if has_ws_marker(inner) {
        return Err(Problem::new(
            line,
            ProblemKind::WhitespaceControl,
            "whitespace control markers are not supported",
        ));
    }
    let stmt = inner.trim();
    if stmt == "endfor" {
        return Ok(Block::EndFor);
    }
    if let Some(caps) = FOR_RE.captures(stmt) {
        let var = caps.get(1).map_or("", |m| m.as_str());
        if var == "loop" {
            return Err(Problem::new(
                line,
                ProblemKind::LoopVariable,
                "`loop` cannot be used as a loop variable",
            ));
        }
        return Ok(Block::For {
            var: var.to_string(),
            collection: caps.get(2).map_or("", |m| m.as_str()).to_string(),
        });
    }
    let keyword = stmt.split_whitespace().next().unwrap_or("");
    let problem = match keyword {
        "if" | "elif" | "else" | "endif" => Problem::new(
            line,
            ProblemKind::Conditional,
            format!("conditionals are not supported: `{{% {stmt} %}}`"),
        ),
        "for" => Problem::new(
            line,
            ProblemKind::UnsupportedTag,
            format!("only `for <item> in <collection>` loops are supported: `{{% {stmt} %}}`"),
        ),
        _ => Problem::new(
            line,
            ProblemKind::UnsupportedTag,
            format!("unsupported block tag `{keyword}`"),
        ),
    };
    Err(problem)
}

struct OpenLoop {
    var: String,
    collection: String,
    line: usize,
    body: Vec<Node>,
}

/// Tokenize and structure a template, collecting every unsupported construct.
#[must_use]
pub fn analyze(source: &str) -> Analysis {
    let mut analysis = Analysis::default();
    let mut open: Option<OpenLoop> = None;
    let mut cursor = 0;
    let mut trim_next = false;

    for caps in TAG_RE.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        let line = line_of(source, whole.start());
        let mut text = &source[cursor..whole.start()];
        let mut starts_line = cursor == 0;
        if trim_next {
            let rest = trim_newline(text);
            starts_line |= rest.len() < text.len();
            text = rest;
            trim_next = false;
        }
        check_stray(source, whole.start(), text, &mut analysis.problems);

        let is_block = caps.get(2).is_some();
        if is_block {
            text = lstrip(text, starts_line);
        }
        if !text.is_empty() {
            push(&mut analysis.nodes, &mut open, Node::Text(text.to_string()));
        }
        cursor = whole.end();

        if let Some(inner) = caps.get(1) {
            match parse_var(inner.as_str(), line) {
                Ok(var) => push(&mut analysis.nodes, &mut open, Node::Var(var)),
                Err(p) => analysis.problems.push(p),
            }
        } else if let Some(inner) = caps.get(2) {
            trim_next = true;
            match parse_block(inner.as_str(), line) {
                Ok(Block::For { var, collection }) => {
                    if let Some(outer) = &open {
                        analysis.problems.push(Problem::new(
                            line,
                            ProblemKind::NestedLoop,
                            format!(
                                "nested loops are not supported (inside loop opened on line {})",
                                outer.line
                            ),
                        ));
                    } else {
                        open = Some(OpenLoop {
                            var,
                            collection,
                            line,
                            body: Vec::new(),
                        });
                    }
                }
                Ok(Block::EndFor) => match open.take() {
                    Some(l) => analysis.nodes.push(Node::Loop {
                        var: l.var,
                        collection: l.collection,
                        line: l.line,
                        body: l.body,
                    }),
                    None => analysis.problems.push(Problem::new(
                        line,
                        ProblemKind::UnbalancedBlock,
                        "`endfor` without a matching `for`",
                    )),
                },
                Err(p) => analysis.problems.push(p),
            }
        } else {
            analysis.problems.push(Problem::new(
                line,
                ProblemKind::Comment,
                "comments are not supported",
            ));
        }
    }

    let mut tail = &source[cursor..];
    if trim_next {
        tail = trim_newline(tail);
    }
    check_stray(source, source.len(), tail, &mut analysis.problems);
    if !tail.is_empty() {
        push(&mut analysis.nodes, &mut open, Node::Text(tail.to_string()));
    }

    if let Some(l) = open {
        analysis.problems.push(Problem::new(
            l.line,
            ProblemKind::UnbalancedBlock,
            format!("`for {} in {}` is never closed", l.var, l.collection),
        ));
    }
    analysis
}

fn push(nodes: &mut Vec<Node>, open: &mut Option<OpenLoop>, node: Node) {
    match open {
        Some(l) => l.body.push(node),
        None => nodes.push(node),
    }
}

/// Any opening marker left in plain text belongs to a tag that never closes.
/// `end` is the byte offset in `source` where `text` ends.
fn check_stray(source: &str, end: usize, text: &str, problems: &mut Vec<Problem>) {
    let start = end - text.len();
    for marker in ["{{", "{%", "{#"] {
        if let Some(pos) = text.find(marker) {
            problems.push(Problem::new(
                line_of(source, start + pos),
                ProblemKind::UnterminatedTag,
                format!("`{marker}` is never closed"),
            ));
        }
    }
}

/// Parse a template, failing on the first unsupported construct.
pub fn parse(source: &str) -> Result<Vec<Node>> {
    let mut analysis = analyze(source);
    if analysis.problems.is_empty() {
        Ok(analysis.nodes)
    } else {
        analysis.problems.sort_by_key(|p| p.line);
        Err(analysis.problems.swap_remove(0).into())
    }
}

fn resolve<'a>(
    var: &VarRef,
    ctx: &'a Map<String, Value>,
    scope: Option<(&str, &'a Value)>,
) -> Result<&'a Value> {
    let base = match scope {
        Some((name, item)) if name == var.root => item,
        _ => ctx.get(&var.root).ok_or_else(|| {
            CatalogError::template(var.line, format!("undefined variable `{}`", var.root))
        })?,
    };
    let Some(field) = &var.field else {
        return Ok(base);
    };
    match base {
        Value::Object(map) => map.get(field).ok_or_else(|| {
            CatalogError::template(
                var.line,
                format!("undefined attribute `{}.{field}`", var.root),
            )
        }),
        _ => Err(CatalogError::template(
            var.line,
            format!("`{}` has no attribute `{field}`", var.root),
        )),
    }
}

fn scalar_text(value: &Value, var: &VarRef) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(CatalogError::template(
            var.line,
            format!("`{}` is not a scalar value", display_path(var)),
        )),
    }
}

fn display_path(var: &VarRef) -> String {
    match &var.field {
        Some(f) => format!("{}.{f}", var.root),
        None => var.root.clone(),
    }
}

fn render_into(
    out: &mut String,
    nodes: &[Node],
    ctx: &Map<String, Value>,
    scope: Option<(&str, &Value)>,
) -> Result<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(var) => out.push_str(&scalar_text(resolve(var, ctx, scope)?, var)?),
            Node::Loop {
                var,
                collection,
                line,
                body,
            } => {
                let items = match ctx.get(collection) {
                    Some(Value::Array(items)) => items,
                    Some(_) => {
                        return Err(CatalogError::template(
                            *line,
                            format!("`{collection}` is not a list"),
                        ))
                    }
                    None => {
                        return Err(CatalogError::template(
                            *line,
                            format!("undefined variable `{collection}`"),
                        ))
                    }
                };
                for item in items {
                    render_into(out, body, ctx, Some((var.as_str(), item)))?;
                }
            }
        }
    }
    Ok(())
}

/// Render already-parsed nodes against a JSON object context.
pub fn render_nodes(nodes: &[Node], ctx: &Map<String, Value>) -> Result<String> {
    let mut out = String::new();
    render_into(&mut out, nodes, ctx, None)?;
    Ok(out)
}

/// Renderer that needs no template engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackRenderer;

impl TemplateRenderer for FallbackRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Fallback
    }

    fn render(&self, template: &str, context: &RenderContext) -> Result<String> {
        let nodes = parse(template)?;
        let ctx = match serde_json::to_value(context) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(CatalogError::template(0, "render context is not an object")),
            Err(e) => return Err(CatalogError::template(0, e.to_string())),
        };
        render_nodes(&nodes, &ctx)
    }
}
