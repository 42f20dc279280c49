//! Derivation facade: the single entry point for deriving a grammar
//!
//! `derive` runs the override resolver and then the validation pass, and
//! releases the candidate only when both are clean. No partial or
//! unvalidated grammar is ever observable outside this module: a caller
//! either gets a fully valid derived grammar or the complete diagnostic
//! list.

use crate::grammar::error::{DerivationError, DeriveResult};
use crate::grammar::expr::RuleName;
use crate::grammar::model::Grammar;
use crate::grammar::resolve::{resolve, OverrideSpec};
use crate::grammar::validate::validate;

/// Warning-level diagnostics attached to a successful derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationReport {
    /// Rules the start rule (plus extras, word, and externals) never reach.
    /// Harmless to downstream generators, but usually worth pruning.
    pub unreachable: Vec<RuleName>,
}

/// Derive a new grammar by applying `overrides` to `base`.
///
/// Overrides apply strictly left-to-right; each builder sees the current
/// definition of its rule as `previous`. The base grammar is never mutated.
/// Problems from resolution and validation are aggregated into one
/// [`DerivationError`].
pub fn derive(
    base: &Grammar,
    overrides: Vec<OverrideSpec>,
    derived_name: &str,
) -> DeriveResult<Grammar> {
    derive_with_report(base, overrides, derived_name).map(|(grammar, _)| grammar)
}

/// Like [`derive`], but also returns the warning-level diagnostics.
pub fn derive_with_report(
    base: &Grammar,
    overrides: Vec<OverrideSpec>,
    derived_name: &str,
) -> DeriveResult<(Grammar, DerivationReport)> {
    let (candidate, mut problems) = resolve(base, overrides, derived_name);

    let report = validate(&candidate);
    problems.extend(report.problems);

    if !problems.is_empty() {
        return Err(DerivationError::Invalid(problems));
    }

    Ok((
        candidate,
        DerivationReport {
            unreachable: report.unreachable,
        },
    ))
}
