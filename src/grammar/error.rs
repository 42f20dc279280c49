//! Error types for grammar derivation
//!
//! Derivation never fails one problem at a time: the resolver and the
//! validator both keep going after a defect so that a single `derive` call
//! reports everything wrong with the override set. The aggregate lands in
//! [`DerivationError::Invalid`]; individual defects are [`Problem`] values.
//!
//! All failures are returned, never panicked: a caller either gets a fully
//! valid derived grammar or the complete diagnostic list.

use crate::grammar::expr::RuleName;
use std::fmt;

/// A single defect found while resolving overrides or validating the
/// candidate grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// An override dereferenced `previous` for a name with no current entry.
    UnknownBaseRule { rule: RuleName },
    /// A rule body references a name absent from the final merged table.
    DanglingReference { rule: RuleName, reference: RuleName },
    /// An addition claims a grammar-metadata keyword as its rule name.
    ReservedNameCollision { name: RuleName },
    /// A rule body violates the IR arity/shape invariants.
    MalformedExpression { rule: RuleName, detail: String },
    /// A metadata field (extras, word, conflicts, precedences, supertypes,
    /// externals) references a rule missing from the table.
    MetadataReferenceInvalid {
        field: &'static str,
        rule: RuleName,
    },
    /// Two distinct rule names collide under case-insensitive normalization.
    NameCollision { first: RuleName, second: RuleName },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::UnknownBaseRule { rule } => {
                write!(
                    f,
                    "override of '{}' calls through to a previous definition, but no base rule with that name exists",
                    rule
                )
            }
            Problem::DanglingReference { rule, reference } => {
                write!(
                    f,
                    "rule '{}' references '{}', which is not defined in the grammar",
                    rule, reference
                )
            }
            Problem::ReservedNameCollision { name } => {
                write!(
                    f,
                    "'{}' is a reserved grammar keyword and cannot be used as a rule name",
                    name
                )
            }
            Problem::MalformedExpression { rule, detail } => {
                write!(f, "rule '{}' has a malformed body: {}", rule, detail)
            }
            Problem::MetadataReferenceInvalid { field, rule } => {
                write!(
                    f,
                    "grammar metadata field '{}' references undefined rule '{}'",
                    field, rule
                )
            }
            Problem::NameCollision { first, second } => {
                write!(
                    f,
                    "rule names '{}' and '{}' collide under case-insensitive comparison",
                    first, second
                )
            }
        }
    }
}

/// The error returned by `derive`: every defect found in one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    /// The candidate grammar is invalid; the list is non-empty and complete.
    Invalid(Vec<Problem>),
}

impl DerivationError {
    /// The collected defects, in discovery order.
    pub fn problems(&self) -> &[Problem] {
        match self {
            DerivationError::Invalid(problems) => problems,
        }
    }
}

impl fmt::Display for DerivationError {
    // Renders a count header followed by one problem per line, so a failed
    // derivation prints as a complete report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DerivationError::Invalid(problems) = self;
        writeln!(
            f,
            "grammar derivation failed with {} problem{}:",
            problems.len(),
            if problems.len() == 1 { "" } else { "s" }
        )?;
        for problem in problems {
            writeln!(f, "  - {}", problem)?;
        }
        Ok(())
    }
}

impl std::error::Error for DerivationError {}

/// Type alias for derivation results.
pub type DeriveResult<T> = Result<T, DerivationError>;
