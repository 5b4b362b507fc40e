// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relation file ingestion
//!
//! One relation per non-blank, non-comment line:
//! `file1,start1,end1,file2,start2,end2[,type]`. Fields may be wrapped in
//! double quotes; fields beyond the optional seventh are ignored. Any
//! malformed retained line aborts ingestion with the raw text attached.

use std::path::Path;

use anyhow::{Context, Result};

use crate::errors::MalformedRecord;
use crate::relation::{ClonePairRecord, CloneType, FragmentId};

/// Read and parse a relation file into pair records, in file order.
pub fn read_relation_file(path: &Path) -> Result<Vec<ClonePairRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read relation file {}", path.display()))?;
    let records = parse_relations(&content)
        .with_context(|| format!("Malformed relation file {}", path.display()))?;
    Ok(records)
}

/// Parse relation text into pair records, in input order.
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped. Every other line must yield a valid record.
pub fn parse_relations(input: &str) -> Result<Vec<ClonePairRecord>, MalformedRecord> {
    let mut records = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        records.push(parse_record(line, index + 1)?);
    }
    Ok(records)
}

fn parse_record(line: &str, line_number: usize) -> Result<ClonePairRecord, MalformedRecord> {
    let fields = split_fields(line);
    if fields.len() < 6 {
        return Err(MalformedRecord::FieldCount {
            line_number,
            field_count: fields.len(),
            raw: line.to_string(),
        });
    }

    let start1 = parse_line_number(&fields[1], line, line_number)?;
    let end1 = parse_line_number(&fields[2], line, line_number)?;
    let start2 = parse_line_number(&fields[4], line, line_number)?;
    let end2 = parse_line_number(&fields[5], line, line_number)?;

    for (start, end) in [(start1, end1), (start2, end2)] {
        if start > end {
            return Err(MalformedRecord::InvertedRange {
                line_number,
                start,
                end,
                raw: line.to_string(),
            });
        }
    }

    let clone_type = fields
        .get(6)
        .map(|field| CloneType::parse(field))
        .unwrap_or(CloneType::Unknown);

    Ok(ClonePairRecord::new(
        FragmentId::new(&fields[0], start1, end1),
        FragmentId::new(&fields[3], start2, end2),
        clone_type,
    ))
}

fn parse_line_number(
    field: &str,
    line: &str,
    line_number: usize,
) -> Result<u32, MalformedRecord> {
    field.parse::<u32>().map_err(|_| MalformedRecord::BadLineNumber {
        line_number,
        field: field.to_string(),
        raw: line.to_string(),
    })
}

/// Split one line into comma-separated fields with simple double-quote
/// wrapping (`""` escapes a quote inside a quoted field). Fields are trimmed.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields.iter().map(|field| field.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_record() {
        let records = parse_relations("a/Foo.java,1,10,b/Bar.java,5,14").expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].left, FragmentId::new("a/Foo.java", 1, 10));
        assert_eq!(records[0].right, FragmentId::new("b/Bar.java", 5, 14));
        assert_eq!(records[0].clone_type, CloneType::Unknown);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let input = "\n# header comment\n  # indented comment\na,1,2,b,3,4\n\n";
        let records = parse_relations(input).expect("parse");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn reads_optional_type_field_and_ignores_extras() {
        let records =
            parse_relations("a,1,2,b,3,4,near-miss,0.93,msccd").expect("parse");
        assert_eq!(records[0].clone_type, CloneType::NearMiss);
    }

    #[test]
    fn honors_quoted_fields() {
        let records = parse_relations("\"dir, with comma/Foo.java\",1,2,b,3,4").expect("parse");
        assert_eq!(records[0].left.path, "dir, with comma/Foo.java");
    }

    #[test]
    fn normalizes_paths_on_ingestion() {
        let records = parse_relations("./data//Foo.java,1,2,data\\Bar.java,3,4").expect("parse");
        assert_eq!(records[0].left.path, "data/Foo.java");
        assert_eq!(records[0].right.path, "data/Bar.java");
    }

    #[test]
    fn four_fields_is_a_hard_failure_carrying_the_raw_line() {
        let err = parse_relations("a,1,2,b").expect_err("must fail");
        match &err {
            MalformedRecord::FieldCount {
                field_count, raw, ..
            } => {
                assert_eq!(*field_count, 4);
                assert_eq!(raw, "a,1,2,b");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_integer_line_number_fails() {
        let err = parse_relations("a,one,2,b,3,4").expect_err("must fail");
        assert!(matches!(err, MalformedRecord::BadLineNumber { .. }));
    }

    #[test]
    fn inverted_range_fails() {
        let err = parse_relations("a,10,1,b,3,4").expect_err("must fail");
        assert!(matches!(
            err,
            MalformedRecord::InvertedRange { start: 10, end: 1, .. }
        ));
    }

    #[test]
    fn error_reports_original_line_number() {
        let input = "# comment\na,1,2,b,3,4\nbad,line\n";
        let err = parse_relations(input).expect_err("must fail");
        match err {
            MalformedRecord::FieldCount { line_number, .. } => assert_eq!(line_number, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
