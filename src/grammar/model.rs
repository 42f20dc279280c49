//! Grammar model: the rule table and grammar-level metadata
//!
//! A [`Grammar`] is a read-only view over a finished rule table plus its
//! metadata. It has a single constructor, [`Grammar::assemble`], which takes
//! already-validated inputs and performs no checking of its own; validation
//! is a separate pass (see the [validate](mod@super::validate) module) that
//! runs over a candidate table before a grammar leaves the resolver.
//!
//! The rule table preserves declaration order: the first declared rule is the
//! start rule, and the order is significant for generated output. Overriding
//! an existing rule keeps its original position; additions append.

use crate::grammar::expr::{RuleExpr, RuleName};
use std::collections::HashMap;

/// An insertion-ordered map from rule name to rule body.
///
/// Lookup is by name; iteration follows declaration order. Replacing an
/// existing entry keeps its position in the order.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    entries: Vec<(RuleName, RuleExpr)>,
    index: HashMap<RuleName, usize>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the body for `name`. Existing entries keep their
    /// declaration position; new names append to the end of the order.
    pub fn insert(&mut self, name: RuleName, body: RuleExpr) {
        match self.index.get(&name) {
            Some(&pos) => self.entries[pos].1 = body,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, body));
            }
        }
    }

    pub fn get(&self, name: &RuleName) -> Option<&RuleExpr> {
        self.index.get(name).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, name: &RuleName) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&RuleName, &RuleExpr)> {
        self.entries.iter().map(|(name, body)| (name, body))
    }

    /// Rule names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &RuleName> {
        self.entries.iter().map(|(name, _)| name)
    }

    /// The first declared rule name, if any.
    pub fn first(&self) -> Option<&RuleName> {
        self.entries.first().map(|(name, _)| name)
    }
}

impl FromIterator<(RuleName, RuleExpr)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (RuleName, RuleExpr)>>(iter: I) -> Self {
        let mut table = RuleTable::new();
        for (name, body) in iter {
            table.insert(name, body);
        }
        table
    }
}

impl PartialEq for RuleTable {
    // Order-sensitive: the same entries in a different declaration order are
    // different tables, because declaration order drives generated output.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for RuleTable {}

/// Grammar-level metadata carried alongside the rule table.
///
/// Every rule name mentioned here must exist in the table, checked by the
/// validation pass, not by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarMetadata {
    /// Rules implicitly allowed between any two tokens (whitespace, comments).
    pub extras: Vec<RuleName>,
    /// The keyword-extraction token, if the grammar designates one.
    pub word: Option<RuleName>,
    /// Ordered groups of rules the table generator may see conflicts between.
    pub conflicts: Vec<Vec<RuleName>>,
    /// Ordered precedence-level groups.
    pub precedences: Vec<Vec<RuleName>>,
    /// Rules designated as abstract groupings for coarser syntax-tree views.
    pub supertypes: Vec<RuleName>,
    /// Tokens recognized by an external scanner, in declaration order.
    pub externals: Vec<RuleName>,
}

/// A complete, named grammar: rule table plus metadata.
///
/// Immutable once assembled. Deriving a dialect produces a new `Grammar`
/// rather than mutating this one, so a base grammar may back any number of
/// concurrent derivations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    name: String,
    rules: RuleTable,
    metadata: GrammarMetadata,
}

impl Grammar {
    /// The single constructor. Inputs are taken as already valid; run the
    /// validation pass over anything assembled from untrusted parts.
    pub fn assemble(name: impl Into<String>, rules: RuleTable, metadata: GrammarMetadata) -> Self {
        Grammar {
            name: name.into(),
            rules,
            metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn rule(&self, name: &RuleName) -> Option<&RuleExpr> {
        self.rules.get(name)
    }

    /// The start rule: the first declared rule in the table.
    pub fn start_rule(&self) -> Option<&RuleName> {
        self.rules.first()
    }

    pub fn metadata(&self) -> &GrammarMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(text: &str) -> RuleExpr {
        RuleExpr::Literal(text.to_string())
    }

    #[test]
    fn test_insertion_order_is_declaration_order() {
        let mut table = RuleTable::new();
        table.insert("program".into(), lit("p"));
        table.insert("statement".into(), lit("s"));
        table.insert("expression".into(), lit("e"));

        let names: Vec<&str> = table.names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["program", "statement", "expression"]);
        assert_eq!(table.first().map(|n| n.as_str()), Some("program"));
    }

    #[test]
    fn test_replacement_keeps_position() {
        let mut table = RuleTable::new();
        table.insert("program".into(), lit("p"));
        table.insert("statement".into(), lit("s"));
        table.insert("program".into(), lit("p2"));

        let names: Vec<&str> = table.names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["program", "statement"]);
        assert_eq!(table.get(&"program".into()), Some(&lit("p2")));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_equality_is_order_sensitive() {
        let a: RuleTable = vec![("a".into(), lit("x")), ("b".into(), lit("y"))]
            .into_iter()
            .collect();
        let b: RuleTable = vec![("b".into(), lit("y")), ("a".into(), lit("x"))]
            .into_iter()
            .collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_grammar_start_rule_is_first_declared() {
        let table: RuleTable = vec![
            ("program".into(), lit("p")),
            ("expression".into(), lit("e")),
        ]
        .into_iter()
        .collect();

        let grammar = Grammar::assemble("scripty", table, GrammarMetadata::default());
        assert_eq!(grammar.start_rule().map(|n| n.as_str()), Some("program"));
        assert_eq!(grammar.name(), "scripty");
    }
}
