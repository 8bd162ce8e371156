//! Template syntax tree.
//!
//! Three layers, from widest to narrowest:
//!
//! - [`Node`]: anything that renders (text, directives, `${expr}` output).
//! - [`Expr`]: anything that produces a value.
//! - [`Reference`]: a `$name` root followed by member, method and index links.
//!
//! [`Stop`] is kept outside all three. It only exists while the parser is
//! looking for `#end`, `#else`, `#elseif` or end of input, so the tree handed
//! to the evaluator can never contain one.

use std::fmt;

use crate::{Location, Operator};

/// A renderable tree node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Children rendered in order, output concatenated.
    Sequence(Vec<Node>),
    /// Literal text, emitted verbatim.
    Text(String),
    /// `$ref` or `${ref}` in text position.
    Expr(Expr),
    If {
        condition: Expr,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
    ForEach {
        variable: String,
        collection: Expr,
        body: Box<Node>,
    },
    Set {
        variable: String,
        value: Expr,
    },
    /// `##...` or `#*...*#`. Renders nothing.
    Comment,
    /// `#name(args)` for a name that is not a built-in directive.
    MacroCall {
        name: String,
        args: Vec<Expr>,
    },
}

impl Node {
    pub fn new(kind: NodeKind, location: Location) -> Self {
        Node { kind, location }
    }

    pub fn text(text: impl Into<String>, location: Location) -> Self {
        Node::new(NodeKind::Text(text.into()), location)
    }

    /// An empty sequence; renders nothing.
    pub fn empty(location: Location) -> Self {
        Node::new(NodeKind::Sequence(Vec::new()), location)
    }

    /// True for text made only of whitespace (the empty string included).
    pub fn is_whitespace(&self) -> bool {
        match &self.kind {
            NodeKind::Text(text) => text.chars().all(char::is_whitespace),
            _ => false,
        }
    }

    /// True for text made only of whitespace that does not break a line.
    pub fn is_horizontal_whitespace(&self) -> bool {
        match &self.kind {
            NodeKind::Text(text) => text
                .chars()
                .all(|c| c.is_whitespace() && c != '\n' && c != '\r'),
            _ => false,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            &self.kind,
            NodeKind::Expr(Expr {
                kind: ExprKind::Reference(_),
                ..
            })
        )
    }

    /// `#if`, `#foreach`, `#set` or a macro call.
    pub fn is_directive(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::If { .. }
                | NodeKind::ForEach { .. }
                | NodeKind::Set { .. }
                | NodeKind::MacroCall { .. }
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, NodeKind::Comment)
    }

    /// Short name of the node kind, for tracing.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Text(_) => "text",
            NodeKind::Expr(_) => "expr",
            NodeKind::If { .. } => "if",
            NodeKind::ForEach { .. } => "foreach",
            NodeKind::Set { .. } => "set",
            NodeKind::Comment => "comment",
            NodeKind::MacroCall { .. } => "macro-call",
        }
    }
}

/// Why a sub-parse ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopKind {
    End,
    Else,
    ElseIf,
    Eof,
}

impl StopKind {
    /// How the stop reads in a diagnostic.
    pub fn describe(self) -> &'static str {
        match self {
            StopKind::End => "#end",
            StopKind::Else => "#else",
            StopKind::ElseIf => "#elseif",
            StopKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A parse-time stop marker.
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub kind: StopKind,
    pub location: Location,
}

/// A value-producing expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Reference(Reference),
    Binary {
        op: Operator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `!expr`
    Not(Box<Expr>),
    /// `[a, b, c]`
    List(Vec<Expr>),
    /// `[a..b]`, inclusive at both ends.
    Range {
        first: Box<Expr>,
        last: Box<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Expr { kind, location }
    }

    pub fn literal(literal: Literal, location: Location) -> Self {
        Expr::new(ExprKind::Literal(literal), location)
    }

    pub fn binary(op: Operator, lhs: Expr, rhs: Expr) -> Self {
        let location = lhs.location.clone();
        Expr::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            location,
        )
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match &self.kind {
            ExprKind::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}

impl From<Reference> for Expr {
    fn from(reference: Reference) -> Self {
        let location = reference.location.clone();
        Expr::new(ExprKind::Reference(reference), location)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(n) => write!(f, "{n}"),
        }
    }
}

/// A `$` reference chain.
///
/// `silent` is set on every link of a `$!` chain, not only on the root.
#[derive(Clone, Debug, PartialEq)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub silent: bool,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReferenceKind {
    /// `$name`
    Plain { name: String },
    /// `lhs.name`
    Member { lhs: Box<Reference>, name: String },
    /// `lhs.name(args)`
    Method {
        lhs: Box<Reference>,
        name: String,
        args: Vec<Expr>,
    },
    /// `lhs[index]`
    Index { lhs: Box<Reference>, index: Box<Expr> },
}

impl Reference {
    pub fn plain(name: impl Into<String>, silent: bool, location: Location) -> Self {
        Reference {
            kind: ReferenceKind::Plain { name: name.into() },
            silent,
            location,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ReferenceKind::Plain { name } => {
                let bang = if self.silent { "!" } else { "" };
                write!(f, "${bang}{name}")
            }
            ReferenceKind::Member { lhs, name } => write!(f, "{lhs}.{name}"),
            ReferenceKind::Method { lhs, name, args } => {
                write!(f, "{lhs}.{name}(")?;
                write_comma_separated(f, args)?;
                f.write_str(")")
            }
            ReferenceKind::Index { lhs, index } => write!(f, "{lhs}[{index}]"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(literal) => write!(f, "{literal}"),
            ExprKind::Reference(reference) => write!(f, "{reference}"),
            ExprKind::Binary { op, lhs, rhs } => write!(f, "{lhs} {op} {rhs}"),
            ExprKind::Not(operand) => write!(f, "!{operand}"),
            ExprKind::List(items) => {
                f.write_str("[")?;
                write_comma_separated(f, items)?;
                f.write_str("]")
            }
            ExprKind::Range { first, last } => write!(f, "[{first}..{last}]"),
        }
    }
}

fn write_comma_separated(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// A `#macro` definition.
///
/// Definitions are not parsed yet, so a template's macro table is always
/// empty. The type exists so the table has a stable shape for callers.
#[derive(Clone, Debug, PartialEq)]
pub struct MacroDefinition {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Node,
    pub location: Location,
}
