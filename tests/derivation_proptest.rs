//! Property-based tests for grammar derivation
//!
//! These exercise the derivation engine over small randomly generated base
//! grammars and override lists, checking the properties that must hold for
//! every input: the derived key set is exactly base keys plus override
//! names, every successful derivation is reference-closed, and deriving with
//! no overrides reproduces the base.

use dialect::{
    derive, Dsl, Grammar, GrammarMetadata, OverrideSpec, Previous, RuleExpr, RuleName, RuleTable,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Names drawn from a fixed pool so that generated bodies can reference
/// rules that exist (and sometimes ones that do not).
const NAME_POOL: &[&str] = &[
    "program",
    "statement",
    "expression",
    "operand",
    "literal",
    "identifier",
    "call",
    "argument_list",
];

fn defined_count() -> impl Strategy<Value = usize> {
    2..=NAME_POOL.len()
}

/// A body whose symbol references stay inside the first `defined` pool names.
fn body_strategy(defined: usize) -> impl Strategy<Value = RuleExpr> {
    let leaf = prop_oneof![
        "[a-z]{1,4}".prop_map(RuleExpr::Literal),
        (0..defined).prop_map(|i| RuleExpr::Symbol(RuleName::from(NAME_POOL[i]))),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(RuleExpr::Sequence),
            prop::collection::vec(inner.clone(), 2..4).prop_map(RuleExpr::Choice),
            (inner.clone(), 0u32..2).prop_map(|(body, min)| RuleExpr::Repeat {
                body: Box::new(body),
                min,
            }),
            inner.prop_map(|body| RuleExpr::Optional(Box::new(body))),
        ]
    })
}

fn base_strategy() -> impl Strategy<Value = Grammar> {
    defined_count().prop_flat_map(|defined| {
        prop::collection::vec(body_strategy(defined), defined).prop_map(move |bodies| {
            let table: RuleTable = bodies
                .into_iter()
                .enumerate()
                .map(|(i, body)| (RuleName::from(NAME_POOL[i]), body))
                .collect();
            Grammar::assemble("base", table, GrammarMetadata::default())
        })
    })
}

/// Override names: a mix of names defined in the base (replacements) and
/// fresh names (additions). Each builder produces a body referencing only
/// defined rules, so derivation is expected to succeed.
fn override_names(defined: usize) -> impl Strategy<Value = Vec<String>> {
    let replacement = (0..defined).prop_map(|i| NAME_POOL[i].to_string());
    let addition = "[a-z]{2,5}_added";
    prop::collection::vec(prop_oneof![replacement, addition], 0..5)
}

proptest! {
    #[test]
    fn derived_key_set_is_base_keys_union_override_names(
        (base, names) in base_strategy().prop_flat_map(|base| {
            let defined = base.rules().len();
            (Just(base), override_names(defined))
        })
    ) {
        let overrides: Vec<OverrideSpec> = names
            .iter()
            .map(|name| {
                OverrideSpec::new(name.clone(), |dsl: &Dsl, _prev: Previous| {
                    Ok(dsl.symbol("program"))
                })
            })
            .collect();

        let derived = derive(&base, overrides, "derived").unwrap();

        let expected: BTreeSet<String> = base
            .rules()
            .names()
            .map(|n| n.as_str().to_string())
            .chain(names.iter().cloned())
            .collect();
        let actual: BTreeSet<String> = derived
            .rules()
            .names()
            .map(|n| n.as_str().to_string())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn successful_derivations_are_reference_closed(
        (base, names) in base_strategy().prop_flat_map(|base| {
            let defined = base.rules().len();
            (Just(base), override_names(defined))
        })
    ) {
        let overrides: Vec<OverrideSpec> = names
            .iter()
            .map(|name| {
                OverrideSpec::new(name.clone(), |dsl: &Dsl, prev: Previous| {
                    if prev.exists() {
                        Ok(dsl.optional(prev.get()?))
                    } else {
                        Ok(dsl.symbol("program"))
                    }
                })
            })
            .collect();

        let derived = derive(&base, overrides, "derived").unwrap();

        for (_, body) in derived.rules().iter() {
            for reference in body.referenced_rules() {
                prop_assert!(
                    derived.rules().contains(reference),
                    "dangling reference to '{}' escaped validation",
                    reference
                );
            }
        }
    }

    #[test]
    fn empty_override_list_is_identity_up_to_name(base in base_strategy()) {
        let derived = derive(&base, vec![], "renamed").unwrap();
        prop_assert_eq!(derived.name(), "renamed");
        prop_assert_eq!(derived.rules(), base.rules());
        prop_assert_eq!(derived.metadata(), base.metadata());
    }

    #[test]
    fn overrides_compose_left_to_right(base in base_strategy()) {
        // B wraps A's result: final body must be Optional(A(base body)).
        let target = "program";
        let overrides = vec![
            OverrideSpec::new(target, |dsl: &Dsl, prev: Previous| {
                Ok(dsl.repeat(prev.get()?))
            }),
            OverrideSpec::new(target, |dsl: &Dsl, prev: Previous| {
                Ok(dsl.optional(prev.get()?))
            }),
        ];

        let derived = derive(&base, overrides, "derived").unwrap();

        let original = base.rule(&target.into()).unwrap().clone();
        let dsl = Dsl;
        let expected = dsl.optional(dsl.repeat(original));
        prop_assert_eq!(derived.rule(&target.into()), Some(&expected));
    }
}
