//! Rule expression IR for grammar bodies
//!
//! A production body is an immutable tree of [`RuleExpr`] variants. The tree
//! is strictly a tree: cross-rule references occur only through
//! [`RuleExpr::Symbol`] leaves, which name an entry in the owning grammar's
//! rule table. Recursion between rules (expression → parenthesized_expression
//! → expression) is therefore expressed through the name-indexed table, never
//! through structural sharing, so the IR itself is acyclic.
//!
//! Expressions are normally constructed through the builder DSL (see the
//! [builder](super::builder) module); the validation pass re-walks candidate
//! trees because override builders are arbitrary user code and cannot be
//! trusted to uphold the arity invariants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The name of a production rule, unique within a grammar.
///
/// Compared and hashed by exact text. Every `Symbol` reference inside a rule
/// body must resolve to a `RuleName` defined in the final merged table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleName(String);

impl RuleName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleName {
    fn from(name: &str) -> Self {
        RuleName(name.to_string())
    }
}

impl From<String> for RuleName {
    fn from(name: String) -> Self {
        RuleName(name)
    }
}

/// Associativity attached to a precedence wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assoc {
    Left,
    Right,
}

/// A production body: a closed set of expression variants.
///
/// Structural equality is derived: two expressions are equal iff their
/// variant tags and children are recursively equal, literals by exact text
/// and symbols by `RuleName` identity.
///
/// Arity invariants (enforced by the builder DSL, re-checked by validation):
/// - `Sequence` has at least one child
/// - `Choice` has at least two alternatives
/// - `Pattern` text compiles as a regular expression
/// - `Field` names and `Alias` display names are non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleExpr {
    /// Children matched one after the other.
    Sequence(Vec<RuleExpr>),
    /// Ordered alternatives; the first that matches wins downstream.
    Choice(Vec<RuleExpr>),
    /// `body` repeated `min` or more times (0 = star, 1 = plus).
    Repeat { body: Box<RuleExpr>, min: u32 },
    /// Zero-or-one occurrence of `body`.
    Optional(Box<RuleExpr>),
    /// An exact token text.
    Literal(String),
    /// A regex-specified token.
    Pattern(String),
    /// A reference to another rule by name, the only cross-rule edge.
    Symbol(RuleName),
    /// Names the child in the produced syntax tree.
    Field { name: String, body: Box<RuleExpr> },
    /// Renames the child for downstream consumers.
    Alias { body: Box<RuleExpr>, display: String },
    /// Precedence wrapper for conflict resolution in the table generator.
    Prec {
        level: i32,
        assoc: Option<Assoc>,
        body: Box<RuleExpr>,
    },
}

impl RuleExpr {
    /// Visit every `Symbol` leaf in this expression tree, in left-to-right
    /// declaration order.
    pub fn for_each_symbol<'a>(&'a self, f: &mut impl FnMut(&'a RuleName)) {
        match self {
            RuleExpr::Sequence(children) | RuleExpr::Choice(children) => {
                for child in children {
                    child.for_each_symbol(f);
                }
            }
            RuleExpr::Repeat { body, .. }
            | RuleExpr::Optional(body)
            | RuleExpr::Field { body, .. }
            | RuleExpr::Alias { body, .. }
            | RuleExpr::Prec { body, .. } => body.for_each_symbol(f),
            RuleExpr::Symbol(name) => f(name),
            RuleExpr::Literal(_) | RuleExpr::Pattern(_) => {}
        }
    }

    /// Collect every referenced rule name, in order of appearance.
    pub fn referenced_rules(&self) -> Vec<&RuleName> {
        let mut refs = Vec::new();
        self.for_each_symbol(&mut |name| refs.push(name));
        refs
    }
}
