//! Grammar snapshot - a normalized serializable representation of a grammar
//!
//! This module provides a canonical, format-agnostic view of a finished
//! grammar suitable for serialization to any output format (JSON, YAML, ...).
//! Downstream table generators and tooling should consume the output of
//! [`snapshot_from_grammar`] rather than re-traversing the rule table.
//!
//! The snapshot captures the complete rule table in declaration order plus
//! grammar metadata. Each expression node carries its node type, primary
//! label, type-specific attributes, and children.

use crate::grammar::expr::{Assoc, RuleExpr};
use crate::grammar::model::Grammar;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A snapshot of a rule expression node in a normalized, serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprSnapshot {
    /// The node type (e.g., "Sequence", "Choice", "Symbol").
    pub node_type: String,

    /// The primary label: literal text, pattern spec, referenced rule name,
    /// field name, or alias display name. Empty for pure combinators.
    pub label: String,

    /// Additional attributes specific to the node type (repeat minimum,
    /// precedence level, associativity).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    /// Child nodes in the tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExprSnapshot>,
}

impl ExprSnapshot {
    /// Create a new snapshot with the given node type and label.
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        ExprSnapshot {
            node_type: node_type.into(),
            label: label.into(),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute to this snapshot.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a child snapshot.
    pub fn with_child(mut self, child: ExprSnapshot) -> Self {
        self.children.push(child);
        self
    }
}

/// One named rule in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSnapshot {
    pub name: String,
    pub body: ExprSnapshot,
}

/// A snapshot of a complete grammar: rules in declaration order plus
/// metadata, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarSnapshot {
    pub name: String,
    pub rules: Vec<RuleSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub precedences: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub externals: Vec<String>,
}

impl GrammarSnapshot {
    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Build the canonical snapshot of a grammar.
pub fn snapshot_from_grammar(grammar: &Grammar) -> GrammarSnapshot {
    let metadata = grammar.metadata();
    GrammarSnapshot {
        name: grammar.name().to_string(),
        rules: grammar
            .rules()
            .iter()
            .map(|(name, body)| RuleSnapshot {
                name: name.to_string(),
                body: snapshot_from_expr(body),
            })
            .collect(),
        extras: metadata.extras.iter().map(|n| n.to_string()).collect(),
        word: metadata.word.as_ref().map(|n| n.to_string()),
        conflicts: metadata
            .conflicts
            .iter()
            .map(|group| group.iter().map(|n| n.to_string()).collect())
            .collect(),
        precedences: metadata
            .precedences
            .iter()
            .map(|group| group.iter().map(|n| n.to_string()).collect())
            .collect(),
        supertypes: metadata.supertypes.iter().map(|n| n.to_string()).collect(),
        externals: metadata.externals.iter().map(|n| n.to_string()).collect(),
    }
}

/// Build the snapshot of a single expression tree.
pub fn snapshot_from_expr(expr: &RuleExpr) -> ExprSnapshot {
    match expr {
        RuleExpr::Sequence(children) => {
            let mut snapshot = ExprSnapshot::new("Sequence", "");
            for child in children {
                snapshot = snapshot.with_child(snapshot_from_expr(child));
            }
            snapshot
        }
        RuleExpr::Choice(alternatives) => {
            let mut snapshot = ExprSnapshot::new("Choice", "");
            for alternative in alternatives {
                snapshot = snapshot.with_child(snapshot_from_expr(alternative));
            }
            snapshot
        }
        RuleExpr::Repeat { body, min } => ExprSnapshot::new("Repeat", "")
            .with_attribute("min", min.to_string())
            .with_child(snapshot_from_expr(body)),
        RuleExpr::Optional(body) => {
            ExprSnapshot::new("Optional", "").with_child(snapshot_from_expr(body))
        }
        RuleExpr::Literal(text) => ExprSnapshot::new("Literal", text.clone()),
        RuleExpr::Pattern(spec) => ExprSnapshot::new("Pattern", spec.clone()),
        RuleExpr::Symbol(name) => ExprSnapshot::new("Symbol", name.as_str()),
        RuleExpr::Field { name, body } => {
            ExprSnapshot::new("Field", name.clone()).with_child(snapshot_from_expr(body))
        }
        RuleExpr::Alias { body, display } => {
            ExprSnapshot::new("Alias", display.clone()).with_child(snapshot_from_expr(body))
        }
        RuleExpr::Prec { level, assoc, body } => {
            let mut snapshot =
                ExprSnapshot::new("Prec", "").with_attribute("level", level.to_string());
            if let Some(assoc) = assoc {
                let assoc = match assoc {
                    Assoc::Left => "left",
                    Assoc::Right => "right",
                };
                snapshot = snapshot.with_attribute("assoc", assoc);
            }
            snapshot.with_child(snapshot_from_expr(body))
        }
    }
}
