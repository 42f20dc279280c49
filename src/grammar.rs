//! Grammar derivation: base grammars, overrides, and dialect grammars
//!
//! This module turns a complete base grammar plus a sparse set of named rule
//! overrides into a new, complete, internally consistent derived grammar:
//! the situation of defining a language dialect that matches a larger host
//! language everywhere except a handful of productions.
//!
//! The pieces, leaves first:
//!
//! 1. Rule expression IR ([expr]) - the tagged tree a production body is
//!    made of (sequence, choice, repetition, literal, symbol reference, ...).
//! 2. Grammar model ([model]) - an immutable named rule table plus
//!    grammar-level metadata (extras, word token, conflicts, precedences,
//!    supertypes, externals).
//! 3. Builder DSL ([builder]) - the sanctioned constructor surface handed to
//!    override builders, together with the `previous` call-through handle.
//! 4. Override resolver ([resolve]) - merges overrides against a copy of the
//!    base table, strictly left-to-right.
//! 5. Validation ([mod@validate]) - reference closure, metadata consistency,
//!    structural re-checks, and reachability diagnostics over the candidate.
//! 6. Facade ([mod@derive]) - `derive(base, overrides, name)`, the only
//!    entry point; no unvalidated grammar is observable outside it.
//! 7. Snapshot ([snapshot]) - the normalized serializable view consumed by
//!    downstream table generators.
//!
//! Derivation is a pure, synchronous computation over immutable inputs: a
//! base grammar may back any number of concurrent `derive` calls.

pub mod builder;
pub mod derive;
pub mod error;
pub mod expr;
pub mod model;
pub mod resolve;
pub mod snapshot;
pub mod validate;

// Re-export the public API at module root
pub use builder::{BuildError, Dsl, Previous};
pub use derive::{derive, derive_with_report, DerivationReport};
pub use error::{DerivationError, DeriveResult, Problem};
pub use expr::{Assoc, RuleExpr, RuleName};
pub use model::{Grammar, GrammarMetadata, RuleTable};
pub use resolve::{is_reserved, OverrideSpec, RuleBuilder};
pub use snapshot::{
    snapshot_from_expr, snapshot_from_grammar, ExprSnapshot, GrammarSnapshot, RuleSnapshot,
};
pub use validate::{validate, ValidationReport};
