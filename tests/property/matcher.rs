//! Property-based tests for context selection

use mkubectl::context::ContextMatcher;
use proptest::prelude::*;
use regex::Regex;

fn name() -> impl Strategy<Value = String> {
    "[ \t]{0,2}[a-z]{1,3}(-[a-z0-9]{1,4})?[ \t]{0,2}"
}

/// Selection equals the trimmed lines whose leftmost match is non-empty, in order.
#[test]
fn test_filter_matches_reference_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(name(), 0..12),
                prop_oneof![
                    Just("a"),
                    Just("^b"),
                    Just("-[0-9]+$"),
                    Just("c*"),
                    Just("[a-c]-.*")
                ],
            ),
            |(lines, pattern)| {
                let listing = lines.join("\n");
                let regex = Regex::new(pattern).unwrap();

                let mut expected: Vec<String> = Vec::new();
                for line in &lines {
                    let trimmed = line.trim();
                    let hit = regex.find(trimmed).map(|m| !m.as_str().is_empty());
                    if hit == Some(true) && !expected.iter().any(|e| e == trimmed) {
                        expected.push(trimmed.to_string());
                    }
                }

                let matcher = ContextMatcher::new(pattern).unwrap();
                prop_assert_eq!(matcher.filter(&listing), expected);
                Ok(())
            },
        )
        .unwrap();
}

/// The empty pattern selects every non-blank trimmed line.
#[test]
fn test_empty_pattern_selects_all_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::hash_set("[a-z]{1,6}", 0..10), |names| {
            let names: Vec<String> = names.into_iter().collect();
            let listing = format!("\n{}\n  \n", names.join("\n"));

            let matcher = ContextMatcher::new("").unwrap();
            prop_assert_eq!(matcher.filter(&listing), names);
            Ok(())
        })
        .unwrap();
}
