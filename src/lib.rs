//! # dialect
//!
//! A grammar derivation engine.
//!
//! Given a base grammar (a named, addressable table of production rules plus
//! grammar-level metadata) and an ordered set of targeted rule overrides,
//! `dialect` produces a new, complete, internally consistent derived grammar
//! for a downstream parser-table generator. Each override may call through to
//! the previous definition of its rule to wrap or narrow it, or ignore it and
//! replace wholesale.
//!
//! The engine covers derivation and validation only: it does not author base
//! grammars, compile parser tables, or parse source text.
//!
//! ```text
//! base Grammar + [OverrideSpec] --resolve--> candidate --validate--> Grammar
//! ```
//!
//! The single entry point is [`grammar::derive()`]; everything a failed
//! derivation found wrong comes back in one [`grammar::DerivationError`].

pub mod grammar;

pub use grammar::{
    derive, derive_with_report, Assoc, BuildError, DerivationError, DerivationReport,
    DeriveResult, Dsl, Grammar, GrammarMetadata, GrammarSnapshot, OverrideSpec, Previous, Problem,
    RuleExpr, RuleName, RuleTable,
};
