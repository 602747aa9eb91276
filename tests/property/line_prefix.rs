//! Property-based tests for the line-prefixing writer

use mkubectl::output::{LineAssembler, LinePrefixWriter};
use proptest::prelude::*;
use std::io::Write;

fn render(label: &str, chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut writer = LinePrefixWriter::new(label, Vec::new());
    for chunk in chunks {
        writer.write_all(chunk).unwrap();
    }
    writer.into_inner()
}

/// Reference transform: the label is inserted after every newline byte.
fn expected(label: &str, input: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for &byte in input {
        out.push(byte);
        if byte == b'\n' {
            out.push(b'\t');
            out.extend_from_slice(label.as_bytes());
        }
    }
    out
}

/// Each newline gains exactly one `\t<label>`; every other byte is unchanged.
#[test]
fn test_label_after_each_newline_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                "[a-z0-9-]{1,12}",
                prop::collection::vec(prop_oneof![Just(b'\n'), any::<u8>()], 0..256),
            ),
            |(label, input)| {
                let out = render(&label, &[input.clone()]);
                let newlines = input.iter().filter(|b| **b == b'\n').count();

                prop_assert_eq!(out.len(), input.len() + newlines * (label.len() + 1));
                prop_assert_eq!(out, expected(&label, &input));
                Ok(())
            },
        )
        .unwrap();
}

/// How the input is split across writes does not change the output.
#[test]
fn test_chunking_invariance_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(any::<u8>(), 0..128),
                prop::collection::vec(1usize..16, 1..16),
            ),
            |(input, sizes)| {
                let mut chunks = Vec::new();
                let mut rest = input.as_slice();
                let mut sizes = sizes.iter().cycle();
                while !rest.is_empty() {
                    let take = (*sizes.next().unwrap()).min(rest.len());
                    let (head, tail) = rest.split_at(take);
                    chunks.push(head.to_vec());
                    rest = tail;
                }

                prop_assert_eq!(render("ctx", &chunks), render("ctx", &[input.clone()]));
                Ok(())
            },
        )
        .unwrap();
}

/// Streamed batches hold only whole lines, and together they equal the
/// labelled output minus the label owed after a final newline.
#[test]
fn test_assembled_lines_match_labelled_output_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(prop_oneof![Just(b'\n'), any::<u8>()], 0..128),
                prop::collection::vec(1usize..16, 1..16),
            ),
            |(input, sizes)| {
                let mut lines = LineAssembler::new("ctx");
                let mut joined = Vec::new();
                let mut rest = input.as_slice();
                let mut sizes = sizes.iter().cycle();
                while !rest.is_empty() {
                    let take = (*sizes.next().unwrap()).min(rest.len());
                    let (head, tail) = rest.split_at(take);
                    let batch = lines.push(head);
                    prop_assert!(batch.is_empty() || batch.ends_with(b"\n"));
                    joined.extend(batch);
                    rest = tail;
                }
                joined.extend(lines.finish());

                let mut labelled = expected("ctx", &input);
                if input.ends_with(b"\n") {
                    labelled.truncate(labelled.len() - "\tctx".len());
                }
                prop_assert_eq!(joined, labelled);
                Ok(())
            },
        )
        .unwrap();
}
