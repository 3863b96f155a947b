// Placement table behavior across configured and builtin rules

use proofpress::mockup::{PlacementRule, PlacementTable};
use rstest::rstest;
use std::collections::HashMap;

#[rstest]
#[case("T-Shirt")]
#[case("Hoodie")]
#[case("Mug")]
#[case("Poster")]
#[case("Tote Bag")]
#[case("Phone Case")]
fn test_builtin_rule_exists(#[case] name: &str) {
    let table = PlacementTable::builtin();
    let rule = table.lookup(name).expect("builtin rule should exist");
    assert!(rule.width > 0);
    assert!(rule.height > 0);
}

#[rstest]
#[case("Umbrella")]
#[case("t-shirt")]
#[case("")]
fn test_unknown_names_miss(#[case] name: &str) {
    let table = PlacementTable::builtin();
    assert!(table.lookup(name).is_none());
}

#[test]
fn test_configured_table_is_authoritative() {
    let mut rules = HashMap::new();
    rules.insert(
        "Sticker".to_string(),
        PlacementRule {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
        },
    );
    let table = PlacementTable::new(rules);

    assert_eq!(table.len(), 1);
    assert!(!table.is_empty());
    assert!(table.lookup("Sticker").is_some());
    // Builtin catalog does not leak through a configured table
    assert!(table.lookup("T-Shirt").is_none());
}
