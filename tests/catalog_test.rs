//! Property-style tests for the ordered catalog

use rstest::rstest;

use coursecat::domain::{Catalog, Course};

fn course(number: &str, title: &str) -> Course {
    Course::new(number, title, vec![]).unwrap()
}

/// Deterministic shuffle so each case exercises a different tree shape.
fn shuffled(numbers: &[&'static str], seed: u64) -> Vec<&'static str> {
    let mut items = numbers.to_vec();
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    for i in (1..items.len()).rev() {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let j = (state >> 33) as usize % (i + 1);
        items.swap(i, j);
    }
    items
}

const NUMBERS: &[&str] = &[
    "CSCI100", "CSCI101", "CSCI200", "CSCI300", "CSCI301", "CSCI350", "CSCI400", "MATH201",
    "MATH100", "ENG101", "ART110", "csci100",
];

// ============================================================
// Sorted traversal
// ============================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(7)]
#[case(42)]
#[case(1234)]
fn given_any_insertion_order_when_traversing_then_keys_ascend(#[case] seed: u64) {
    let catalog: Catalog = shuffled(NUMBERS, seed)
        .into_iter()
        .map(|n| course(n, "t"))
        .collect();

    let keys: Vec<&str> = catalog.iter().map(Course::number).collect();
    let mut expected: Vec<&str> = NUMBERS.to_vec();
    expected.sort();

    assert_eq!(keys, expected);
    assert_eq!(catalog.len(), NUMBERS.len());
}

// ============================================================
// Uniqueness: first insert wins
// ============================================================

#[rstest]
#[case(3)]
#[case(99)]
fn given_repeated_inserts_when_loading_then_one_entry_per_key_from_first_insert(
    #[case] seed: u64,
) {
    let mut catalog = Catalog::new();
    for round in 0..3 {
        for number in shuffled(NUMBERS, seed + round) {
            catalog.insert(course(number, &format!("round {round}")));
        }
    }

    assert_eq!(catalog.len(), NUMBERS.len());
    assert_eq!(catalog.iter().count(), NUMBERS.len());
    for number in NUMBERS {
        assert_eq!(catalog.search(number).unwrap().title(), "round 0");
    }
}

// ============================================================
// Search correctness
// ============================================================

#[test]
fn given_inserted_courses_when_searching_then_returns_unchanged_records() {
    let originals = vec![
        Course::new("CSCI300", "Intro to Algorithms", vec!["CSCI200".into(), "MATH201".into()])
            .unwrap(),
        Course::new("CSCI200", "Data Structures", vec!["CSCI101".into()]).unwrap(),
        Course::new("MATH201", "Discrete Mathematics", vec![]).unwrap(),
    ];
    let catalog: Catalog = originals.iter().cloned().collect();

    for original in &originals {
        assert_eq!(catalog.search(original.number()), Some(original));
    }
}

#[rstest]
#[case("CSCI999")]
#[case("")]
#[case("CSCI10")]
#[case("CSCI1000")]
#[case("Csci100")]
fn given_key_never_inserted_when_searching_then_absent(#[case] missing: &str) {
    let catalog: Catalog = NUMBERS.iter().map(|n| course(n, "t")).collect();
    assert!(catalog.search(missing).is_none());
}

#[test]
fn given_prerequisite_missing_from_catalog_when_inserting_then_accepted() {
    let mut catalog = Catalog::new();
    let inserted = catalog.insert(
        Course::new("CSCI400", "Capstone", vec!["NOPE101".into()]).unwrap(),
    );
    assert!(inserted);
    assert!(catalog.search("NOPE101").is_none());
    assert_eq!(
        catalog.search("CSCI400").unwrap().prerequisites(),
        &["NOPE101".to_string()]
    );
}

// ============================================================
// Traversal is restartable
// ============================================================

#[test]
fn given_catalog_when_traversing_repeatedly_then_sequences_match() {
    let mut catalog: Catalog = shuffled(NUMBERS, 5).into_iter().map(|n| course(n, "t")).collect();
    let first: Vec<String> = catalog.iter().map(|c| c.to_string()).collect();
    let second: Vec<String> = catalog.iter().map(|c| c.to_string()).collect();
    assert_eq!(first, second);

    // a partially consumed traversal does not affect the next one
    let mut partial = catalog.iter();
    partial.next();
    let third: Vec<String> = catalog.iter().map(|c| c.to_string()).collect();
    assert_eq!(first, third);

    catalog.insert(course("AAA000", "new"));
    assert_eq!(catalog.iter().next().unwrap().number(), "AAA000");
}
