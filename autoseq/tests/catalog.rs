//! Tests for the built-in recurrence catalog

use autoseq::CatalogError;
use autoseq::catalog::{Catalog, CatalogBuilder, Term};

fn catalog() -> Catalog {
    CatalogBuilder::new().register_all_plugins().unwrap().build()
}

#[test]
fn test_known_prefixes() {
    let catalog = catalog();
    let cases: [(&str, &[Term]); 10] = [
        ("fibonacci", &[0, 1, 1, 2, 3, 5, 8, 13]),
        ("lucas", &[2, 1, 3, 4, 7, 11, 18, 29]),
        ("tribonacci", &[0, 0, 1, 1, 2, 4, 7, 13]),
        ("pell", &[0, 1, 2, 5, 12, 29, 70, 169]),
        ("jacobsthal", &[0, 1, 1, 3, 5, 11, 21, 43]),
        ("padovan", &[1, 1, 1, 2, 2, 3, 4, 5]),
        ("factorial", &[1, 1, 2, 6, 24, 120, 720, 5040]),
        ("catalan", &[1, 1, 2, 5, 14, 42, 132, 429]),
        ("triangular", &[0, 1, 3, 6, 10, 15, 21, 28]),
        ("fibonacci-sum", &[0, 1, 2, 4, 7, 12, 20, 33]),
    ];

    for (name, expected) in cases {
        let seq = catalog.create(name).unwrap();
        assert_eq!(&*seq.slice(0, expected.len()), expected, "{}", name);
    }
}

#[test]
fn test_every_plugin_reaches_its_limit() {
    for plugin in catalog().iter() {
        if plugin.limit > 1000 {
            continue;
        }
        let seq = plugin.create();
        // Overflow would panic in debug builds
        let last = seq.get(plugin.limit);
        assert!(last > 0, "{}", plugin.name);
        assert_eq!(seq.size(), plugin.limit + 1);
    }
}

#[test]
fn test_values_at_limit() {
    let catalog = catalog();
    assert_eq!(
        catalog.create_checked("fibonacci", 186).unwrap().get(186),
        332_825_110_087_067_562_321_196_029_789_634_457_848
    );
    assert_eq!(
        catalog.create_checked("factorial", 34).unwrap().get(34),
        295_232_799_039_604_140_847_618_609_643_520_000_000
    );
    assert_eq!(
        catalog.create_checked("triangular", 1_000_000).unwrap().get(1_000_000),
        500_000_500_000
    );
}

#[test]
fn test_limit_exceeded() {
    let err = catalog().create_checked("catalan", 70).unwrap_err();
    assert_eq!(
        err,
        CatalogError::LimitExceeded {
            name: "catalan",
            requested: 70,
            limit: 69
        }
    );
}

#[test]
fn test_unknown_name() {
    assert_eq!(
        catalog().create("fib").unwrap_err(),
        CatalogError::NotFound("fib".to_string())
    );
}

#[test]
fn test_tag_filtering() {
    let linear = CatalogBuilder::new()
        .register_plugins(|plugin| plugin.has_tags(&["linear"]))
        .unwrap()
        .build();

    let names: Vec<_> = linear.iter().map(|plugin| plugin.name).collect();
    assert_eq!(
        names,
        vec!["fibonacci", "fibonacci-sum", "jacobsthal", "lucas", "padovan", "pell", "tribonacci"]
    );
}

#[test]
fn test_fresh_sequence_per_create() {
    let catalog = catalog();
    let first = catalog.create("fibonacci").unwrap();
    first.prefetch_up_to(50);

    let second = catalog.create("fibonacci").unwrap();
    assert_eq!(second.size(), 2);
}
