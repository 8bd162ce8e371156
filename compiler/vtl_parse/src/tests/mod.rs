//! Parser tests.
//!
//! - `text`: plain text, comments, quoted blocks and `$`/`#` fallbacks to text
//! - `directives`: `#if` chains, `#foreach`, `#set` and the whitespace rules
//! - `references`: reference chains, braces, silence and pushback
//! - `expressions`: precedence climbing, unary forms and literals
//! - `errors`: every failure mode and its message

mod expressions;

use vtl_ir::{Expr, ExprKind, Literal, Node, NodeKind, Reference, ReferenceKind};

use crate::{parse, ParseError};

/// Top-level nodes of a template that must parse.
fn nodes(text: &str) -> Vec<Node> {
    match parse(text, "test.vm") {
        Ok(output) => match output.root.kind {
            NodeKind::Sequence(children) => children,
            other => panic!("root is not a sequence: {other:?}"),
        },
        Err(err) => panic!("unexpected parse error for {text:?}: {err}"),
    }
}

fn parse_err(text: &str) -> ParseError {
    match parse(text, "test.vm") {
        Ok(output) => panic!("expected a parse error for {text:?}, got {:?}", output.root),
        Err(err) => err,
    }
}

/// The condition of a template consisting of a single `#if`.
fn condition(expr_text: &str) -> Expr {
    let mut children = nodes(&format!("#if ({expr_text})#end"));
    assert_eq!(children.len(), 1, "{expr_text}");
    match children.remove(0).kind {
        NodeKind::If { condition, .. } => condition,
        other => panic!("not an #if: {other:?}"),
    }
}

/// Fully parenthesised prefix form, so tests can see how operands grouped.
fn sexpr(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(literal) => literal.to_string(),
        ExprKind::Reference(reference) => reference.to_string(),
        ExprKind::Binary { op, lhs, rhs } => format!("({op} {} {})", sexpr(lhs), sexpr(rhs)),
        ExprKind::Not(operand) => format!("(! {})", sexpr(operand)),
        ExprKind::List(items) => {
            let items: Vec<_> = items.iter().map(sexpr).collect();
            format!("[{}]", items.join(" "))
        }
        ExprKind::Range { first, last } => format!("[{}..{}]", sexpr(first), sexpr(last)),
    }
}

fn text_of(node: &Node) -> &str {
    match &node.kind {
        NodeKind::Text(text) => text,
        other => panic!("not text: {other:?}"),
    }
}

fn reference_of(node: &Node) -> &Reference {
    match &node.kind {
        NodeKind::Expr(Expr {
            kind: ExprKind::Reference(reference),
            ..
        }) => reference,
        other => panic!("not a reference: {other:?}"),
    }
}

fn int(expr: &Expr) -> i64 {
    match expr.kind {
        ExprKind::Literal(Literal::Int(n)) => n,
        ref other => panic!("not an integer literal: {other:?}"),
    }
}

fn is_plain(reference: &Reference, expected: &str) -> bool {
    matches!(&reference.kind, ReferenceKind::Plain { name } if name == expected)
}
