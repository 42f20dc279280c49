//! Override resolution: merging overrides against a base rule table
//!
//! The resolver starts from a copy of the base grammar's rule table and
//! applies each [`OverrideSpec`] in the order supplied. An override's builder
//! receives the current entry for its name as `previous`: the base
//! definition the first time a name is targeted, the most recently produced
//! replacement on later hits, so overrides compose left-to-right.
//!
//! Targeting a name absent from the base table is an addition, not an
//! override; additions may not claim a reserved grammar keyword. Base
//! metadata (extras, word, conflicts, precedences, supertypes, externals) is
//! carried over untouched; rule-body overrides never imply metadata edits.
//!
//! Builder failures do not abort resolution: the entry keeps its previous
//! value and the problem is recorded, so one pass collects every defect.

use crate::grammar::builder::{BuildError, Dsl, Previous};
use crate::grammar::error::Problem;
use crate::grammar::expr::{RuleExpr, RuleName};
use crate::grammar::model::Grammar;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Grammar-metadata keywords that additions may not claim as rule names.
static RESERVED_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "name",
        "rules",
        "extras",
        "conflicts",
        "word",
        "precedences",
        "supertypes",
        "externals",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` is reserved as a grammar-metadata keyword.
pub fn is_reserved(name: &RuleName) -> bool {
    RESERVED_NAMES.contains(name.as_str())
}

/// The builder callable of an override: receives the DSL and the previous
/// definition, returns the replacement body.
///
/// Builders are expected to be pure: deterministic given `previous`, no I/O,
/// no shared state. The engine does not sandbox them.
pub type RuleBuilder = Box<dyn Fn(&Dsl, Previous<'_>) -> Result<RuleExpr, BuildError>>;

/// A single rule replacement or addition, consumed once by the resolver.
pub struct OverrideSpec {
    name: RuleName,
    builder: RuleBuilder,
}

impl OverrideSpec {
    pub fn new<F>(name: impl Into<RuleName>, builder: F) -> Self
    where
        F: Fn(&Dsl, Previous<'_>) -> Result<RuleExpr, BuildError> + 'static,
    {
        OverrideSpec {
            name: name.into(),
            builder: Box::new(builder),
        }
    }

    pub fn name(&self) -> &RuleName {
        &self.name
    }
}

/// Merge `overrides` against `base`, producing the candidate grammar and
/// every problem encountered along the way.
///
/// The base grammar is never mutated; the candidate carries the base's
/// metadata unchanged and the new `derived_name`. The candidate must still
/// pass validation before it is released to callers.
pub(crate) fn resolve(
    base: &Grammar,
    overrides: Vec<OverrideSpec>,
    derived_name: &str,
) -> (Grammar, Vec<Problem>) {
    let mut table = base.rules().clone();
    let mut problems = Vec::new();
    let dsl = Dsl;

    for spec in overrides {
        let OverrideSpec { name, builder } = spec;

        let is_addition = !table.contains(&name);
        if is_addition && is_reserved(&name) {
            problems.push(Problem::ReservedNameCollision { name });
            continue;
        }

        let previous = Previous::new(table.get(&name));
        match builder(&dsl, previous) {
            Ok(body) => table.insert(name, body),
            Err(BuildError::UnknownBaseRule) => {
                problems.push(Problem::UnknownBaseRule { rule: name });
            }
            Err(BuildError::Malformed(detail)) => {
                problems.push(Problem::MalformedExpression { rule: name, detail });
            }
        }
    }

    let candidate = Grammar::assemble(derived_name, table, base.metadata().clone());
    (candidate, problems)
}
