//! Validation and consistency checking for candidate grammars
//!
//! Every check runs over the whole candidate; nothing short-circuits on the
//! first defect, so one validation pass reports every problem found. The
//! checks:
//!
//! 1. Reference closure: every `Symbol` in every rule body resolves to a key
//!    in the rule table.
//! 2. Metadata consistency: every rule name in extras/word/conflicts/
//!    precedences/supertypes/externals exists in the table.
//! 3. Structural well-formedness: a defensive re-walk of the IR arity
//!    invariants, since override builders are arbitrary user code.
//! 4. Name collision: distinct names colliding under case-insensitive
//!    normalization.
//!
//! Reachability from the start rule is recorded as diagnostic metadata in the
//! report, not as a failure, since unreachable helper rules are routinely left
//! behind by overrides and downstream generators tolerate them.

use crate::grammar::error::Problem;
use crate::grammar::expr::{RuleExpr, RuleName};
use crate::grammar::model::Grammar;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// The outcome of validating a candidate grammar.
///
/// `problems` empty means the candidate is sound; `unreachable` lists rules
/// the start rule (plus extras, word, and externals) never reaches, as a
/// warning-level diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub problems: Vec<Problem>,
    pub unreachable: Vec<RuleName>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Run every check over `candidate` and collect all diagnostics.
pub fn validate(candidate: &Grammar) -> ValidationReport {
    let mut problems = Vec::new();

    check_reference_closure(candidate, &mut problems);
    check_metadata_references(candidate, &mut problems);
    check_well_formed(candidate, &mut problems);
    check_name_collisions(candidate, &mut problems);

    ValidationReport {
        problems,
        unreachable: unreachable_rules(candidate),
    }
}

fn check_reference_closure(candidate: &Grammar, problems: &mut Vec<Problem>) {
    for (name, body) in candidate.rules().iter() {
        body.for_each_symbol(&mut |reference| {
            if !candidate.rules().contains(reference) {
                problems.push(Problem::DanglingReference {
                    rule: name.clone(),
                    reference: reference.clone(),
                });
            }
        });
    }
}

fn check_metadata_references(candidate: &Grammar, problems: &mut Vec<Problem>) {
    let metadata = candidate.metadata();
    let mut check = |field: &'static str, name: &RuleName| {
        if !candidate.rules().contains(name) {
            problems.push(Problem::MetadataReferenceInvalid {
                field,
                rule: name.clone(),
            });
        }
    };

    for name in &metadata.extras {
        check("extras", name);
    }
    if let Some(word) = &metadata.word {
        check("word", word);
    }
    for group in &metadata.conflicts {
        for name in group {
            check("conflicts", name);
        }
    }
    for group in &metadata.precedences {
        for name in group {
            check("precedences", name);
        }
    }
    for name in &metadata.supertypes {
        check("supertypes", name);
    }
    for name in &metadata.externals {
        check("externals", name);
    }
}

fn check_well_formed(candidate: &Grammar, problems: &mut Vec<Problem>) {
    for (name, body) in candidate.rules().iter() {
        walk_well_formed(name, body, problems);
    }
}

// Re-checks the arity invariants the builder DSL upholds, since candidate
// bodies may have been constructed directly.
fn walk_well_formed(rule: &RuleName, expr: &RuleExpr, problems: &mut Vec<Problem>) {
    fn malformed(rule: &RuleName, detail: String, problems: &mut Vec<Problem>) {
        problems.push(Problem::MalformedExpression {
            rule: rule.clone(),
            detail,
        });
    }

    match expr {
        RuleExpr::Sequence(children) => {
            if children.is_empty() {
                malformed(rule, "empty sequence".to_string(), problems);
            }
            for child in children {
                walk_well_formed(rule, child, problems);
            }
        }
        RuleExpr::Choice(alternatives) => {
            if alternatives.len() < 2 {
                malformed(
                    rule,
                    format!(
                        "choice requires at least two alternatives, got {}",
                        alternatives.len()
                    ),
                    problems,
                );
            }
            for alternative in alternatives {
                walk_well_formed(rule, alternative, problems);
            }
        }
        RuleExpr::Pattern(spec) => {
            if let Err(e) = Regex::new(spec) {
                malformed(rule, format!("invalid pattern '{}': {}", spec, e), problems);
            }
        }
        RuleExpr::Field { name, body } => {
            if name.is_empty() {
                malformed(rule, "empty field name".to_string(), problems);
            }
            walk_well_formed(rule, body, problems);
        }
        RuleExpr::Alias { body, display } => {
            if display.is_empty() {
                malformed(rule, "empty alias display name".to_string(), problems);
            }
            walk_well_formed(rule, body, problems);
        }
        RuleExpr::Repeat { body, .. } | RuleExpr::Optional(body) => {
            walk_well_formed(rule, body, problems);
        }
        RuleExpr::Prec { body, .. } => walk_well_formed(rule, body, problems),
        RuleExpr::Literal(_) | RuleExpr::Symbol(_) => {}
    }
}

// A single table cannot hold duplicate keys, but names differing only by
// case would collide in case-normalizing downstream consumers.
fn check_name_collisions(candidate: &Grammar, problems: &mut Vec<Problem>) {
    let mut seen: HashMap<String, &RuleName> = HashMap::new();
    for name in candidate.rules().names() {
        let normalized = name.as_str().to_lowercase();
        match seen.get(&normalized) {
            Some(first) => problems.push(Problem::NameCollision {
                first: (*first).clone(),
                second: name.clone(),
            }),
            None => {
                seen.insert(normalized, name);
            }
        }
    }
}

// Breadth-first walk over Symbol edges from the grammar's roots: the start
// rule, extras, the word token, and external-scanner tokens.
fn unreachable_rules(candidate: &Grammar) -> Vec<RuleName> {
    let metadata = candidate.metadata();
    let mut queue: Vec<&RuleName> = Vec::new();
    if let Some(start) = candidate.start_rule() {
        queue.push(start);
    }
    queue.extend(metadata.extras.iter());
    queue.extend(metadata.word.iter());
    queue.extend(metadata.externals.iter());

    let mut reached: HashSet<&RuleName> = HashSet::new();
    while let Some(name) = queue.pop() {
        if !reached.insert(name) {
            continue;
        }
        if let Some(body) = candidate.rule(name) {
            body.for_each_symbol(&mut |reference| {
                if !reached.contains(reference) {
                    queue.push(reference);
                }
            });
        }
    }

    candidate
        .rules()
        .names()
        .filter(|name| !reached.contains(name))
        .cloned()
        .collect()
}
