//! Builder DSL for rule expressions
//!
//! The DSL is the sanctioned way to construct [`RuleExpr`] trees: its
//! constructors uphold the arity invariants (a sequence is never empty, a
//! choice always has at least two alternatives, pattern text must compile),
//! so every expression it produces is well-formed by construction.
//!
//! Override builders receive a [`Dsl`] handle together with a [`Previous`]
//! handle onto the rule body they are replacing. Calling through to
//! `previous` lets an override wrap or narrow the inherited definition
//! instead of restating it; ignoring `previous` replaces wholesale.
//!
//! Builder failures are values ([`BuildError`]), never panics; the resolver
//! attributes them to the overridden rule and keeps collecting diagnostics.

use crate::grammar::expr::{Assoc, RuleExpr, RuleName};
use regex::Regex;
use std::fmt;

/// A failure inside an override builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// `Previous::get` was called but the rule has no current definition.
    UnknownBaseRule,
    /// A DSL constructor was handed arguments violating an arity invariant.
    Malformed(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownBaseRule => {
                write!(f, "no previous definition exists for this rule")
            }
            BuildError::Malformed(detail) => write!(f, "malformed expression: {}", detail),
        }
    }
}

impl std::error::Error for BuildError {}

/// Handle onto the rule body an override is replacing.
///
/// The first override of a name sees the base definition; later overrides of
/// the same name see the most recently produced replacement, so overrides
/// compose left-to-right.
pub struct Previous<'a> {
    body: Option<&'a RuleExpr>,
}

impl<'a> Previous<'a> {
    pub(crate) fn new(body: Option<&'a RuleExpr>) -> Self {
        Previous { body }
    }

    /// The previous definition, cloned for use inside the replacement.
    ///
    /// Fails with [`BuildError::UnknownBaseRule`] when the override targets a
    /// name with no current entry; an override that never calls `get` on
    /// such a name is an addition instead.
    pub fn get(&self) -> Result<RuleExpr, BuildError> {
        self.body.cloned().ok_or(BuildError::UnknownBaseRule)
    }

    /// Whether a previous definition exists, without dereferencing it.
    pub fn exists(&self) -> bool {
        self.body.is_some()
    }
}

/// The expression constructor surface handed to override builders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dsl;

impl Dsl {
    /// Children matched one after the other. Empty sequences are malformed.
    pub fn seq(&self, children: Vec<RuleExpr>) -> Result<RuleExpr, BuildError> {
        if children.is_empty() {
            return Err(BuildError::Malformed("empty sequence".to_string()));
        }
        Ok(RuleExpr::Sequence(children))
    }

    /// Ordered alternatives. Fewer than two alternatives is malformed, since a
    /// single-alternative choice is just its alternative.
    pub fn choice(&self, alternatives: Vec<RuleExpr>) -> Result<RuleExpr, BuildError> {
        if alternatives.len() < 2 {
            return Err(BuildError::Malformed(format!(
                "choice requires at least two alternatives, got {}",
                alternatives.len()
            )));
        }
        Ok(RuleExpr::Choice(alternatives))
    }

    /// Zero or more occurrences of `body`.
    pub fn repeat(&self, body: RuleExpr) -> RuleExpr {
        RuleExpr::Repeat {
            body: Box::new(body),
            min: 0,
        }
    }

    /// One or more occurrences of `body`.
    pub fn repeat1(&self, body: RuleExpr) -> RuleExpr {
        RuleExpr::Repeat {
            body: Box::new(body),
            min: 1,
        }
    }

    /// Zero or one occurrence of `body`.
    pub fn optional(&self, body: RuleExpr) -> RuleExpr {
        RuleExpr::Optional(Box::new(body))
    }

    /// An exact token text.
    pub fn token(&self, text: impl Into<String>) -> RuleExpr {
        RuleExpr::Literal(text.into())
    }

    /// A regex-specified token. The pattern text must compile.
    pub fn pattern(&self, spec: impl Into<String>) -> Result<RuleExpr, BuildError> {
        let spec = spec.into();
        Regex::new(&spec)
            .map_err(|e| BuildError::Malformed(format!("invalid pattern '{}': {}", spec, e)))?;
        Ok(RuleExpr::Pattern(spec))
    }

    /// A reference to another rule by name.
    pub fn symbol(&self, name: impl Into<RuleName>) -> RuleExpr {
        RuleExpr::Symbol(name.into())
    }

    /// Name the child in the produced syntax tree. Field names are non-empty.
    pub fn field(&self, name: impl Into<String>, body: RuleExpr) -> Result<RuleExpr, BuildError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BuildError::Malformed("empty field name".to_string()));
        }
        Ok(RuleExpr::Field {
            name,
            body: Box::new(body),
        })
    }

    /// Rename the child for downstream consumers. Display names are non-empty.
    pub fn alias(&self, body: RuleExpr, display: impl Into<String>) -> Result<RuleExpr, BuildError> {
        let display = display.into();
        if display.is_empty() {
            return Err(BuildError::Malformed("empty alias display name".to_string()));
        }
        Ok(RuleExpr::Alias {
            body: Box::new(body),
            display,
        })
    }

    /// Precedence wrapper with no associativity.
    pub fn prec(&self, level: i32, body: RuleExpr) -> RuleExpr {
        RuleExpr::Prec {
            level,
            assoc: None,
            body: Box::new(body),
        }
    }

    /// Left-associative precedence wrapper.
    pub fn prec_left(&self, level: i32, body: RuleExpr) -> RuleExpr {
        RuleExpr::Prec {
            level,
            assoc: Some(Assoc::Left),
            body: Box::new(body),
        }
    }

    /// Right-associative precedence wrapper.
    pub fn prec_right(&self, level: i32, body: RuleExpr) -> RuleExpr {
        RuleExpr::Prec {
            level,
            assoc: Some(Assoc::Right),
            body: Box::new(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_rejects_empty() {
        let dsl = Dsl;
        assert!(matches!(dsl.seq(vec![]), Err(BuildError::Malformed(_))));
    }

    #[test]
    fn test_choice_rejects_fewer_than_two_alternatives() {
        let dsl = Dsl;
        assert!(matches!(dsl.choice(vec![]), Err(BuildError::Malformed(_))));
        assert!(matches!(
            dsl.choice(vec![dsl.token("x")]),
            Err(BuildError::Malformed(_))
        ));
        assert!(dsl.choice(vec![dsl.token("x"), dsl.token("y")]).is_ok());
    }

    #[test]
    fn test_pattern_must_compile() {
        let dsl = Dsl;
        assert!(dsl.pattern("[a-z_][a-z0-9_]*").is_ok());
        assert!(matches!(
            dsl.pattern("[unclosed"),
            Err(BuildError::Malformed(_))
        ));
    }

    #[test]
    fn test_previous_call_through() {
        let base = RuleExpr::Literal("base".to_string());
        let previous = Previous::new(Some(&base));
        assert!(previous.exists());
        assert_eq!(previous.get().unwrap(), base);

        let missing = Previous::new(None);
        assert!(!missing.exists());
        assert_eq!(missing.get(), Err(BuildError::UnknownBaseRule));
    }

    #[test]
    fn test_field_and_alias_reject_empty_names() {
        let dsl = Dsl;
        assert!(matches!(
            dsl.field("", dsl.token("x")),
            Err(BuildError::Malformed(_))
        ));
        assert!(matches!(
            dsl.alias(dsl.token("x"), ""),
            Err(BuildError::Malformed(_))
        ));
        assert!(dsl.field("value", dsl.token("x")).is_ok());
        assert!(dsl.alias(dsl.token("x"), "operator").is_ok());
    }
}
