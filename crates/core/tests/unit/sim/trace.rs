//! # Trace Reader Tests
//!
//! Verifies line parsing, the `#` end marker, blank-line handling, error
//! reporting with line numbers, and file loading.

use std::io::Write;

use cachesim_core::common::TraceError;
use cachesim_core::sim::trace::{parse_line, parse_trace, read_trace};
use cachesim_core::sim::{Access, Operation, TraceReader};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

// ══════════════════════════════════════════════════════════
// 1. Single Lines
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("R 0x1f", Access::read(0x1f))]
#[case("W 0x7fff0010", Access::write(0x7fff_0010))]
#[case("R 1f", Access::read(0x1f))]
#[case("w 0XABC", Access::write(0xabc))]
#[case("  R\t0x0  ", Access::read(0))]
#[case("R 0xffffffffffffffff", Access::read(u64::MAX))]
fn parses_records(#[case] line: &str, #[case] expected: Access) {
    assert_eq!(parse_line(line, 1).unwrap(), Some(expected));
}

#[test]
fn blank_line_is_not_a_record() {
    assert_eq!(parse_line("", 3).unwrap(), None);
    assert_eq!(parse_line("   \t", 3).unwrap(), None);
}

#[rstest]
#[case("X 0x10", "expected `R` or `W`")]
#[case("READ 0x10", "expected `R` or `W`")]
#[case("R", "missing address")]
#[case("W 0x10 0x20", "unexpected trailing field")]
#[case("R 0xzz", "invalid hex address")]
#[case("R 0x", "invalid hex address")]
#[case("R 0x10000000000000000", "invalid hex address")]
fn rejects_malformed_lines(#[case] line: &str, #[case] expected: &str) {
    match parse_line(line, 7) {
        Err(TraceError::Malformed { line, reason, .. }) => {
            assert_eq!(line, 7);
            assert_eq!(reason, expected);
        }
        other => panic!("expected malformed error, got {other:?}"),
    }
}

#[test]
fn access_display_uses_trace_syntax() {
    assert_eq!(Access::read(0x1f).to_string(), "R 0x1f");
    assert_eq!(Access::write(0).to_string(), "W 0x0");
    assert!(Access::write(4).is_write());
    assert_eq!(Access::read(4).op, Operation::Read);
}

// ══════════════════════════════════════════════════════════
// 2. Streams
// ══════════════════════════════════════════════════════════

#[test]
fn reads_until_end_marker() {
    let text = "R 0x0\nW 0x4\n#eof\nR 0x8\n";
    assert_eq!(
        parse_trace(text).unwrap(),
        vec![Access::read(0), Access::write(4)]
    );
}

#[test]
fn content_after_end_marker_is_never_parsed() {
    let text = "R 0x0\n#\nthis is not a record\n";
    assert_eq!(parse_trace(text).unwrap(), vec![Access::read(0)]);
}

#[test]
fn missing_end_marker_reads_to_eof() {
    let text = "R 0x0\nR 0x4";
    assert_eq!(parse_trace(text).unwrap().len(), 2);
}

#[test]
fn skips_blank_lines_and_crlf() {
    let text = "\nR 0x0\r\n\r\n  \nW 0x10\r\n#\r\n";
    assert_eq!(
        parse_trace(text).unwrap(),
        vec![Access::read(0), Access::write(0x10)]
    );
}

#[test]
fn empty_trace_has_no_records() {
    assert!(parse_trace("").unwrap().is_empty());
    assert!(parse_trace("#\n").unwrap().is_empty());
}

#[test]
fn error_carries_physical_line_number() {
    let text = "R 0x0\n\nR 0x4\nQ 0x8\nR 0xc\n";
    let err = parse_trace(text).unwrap_err();
    assert!(matches!(err, TraceError::Malformed { line: 4, .. }));
    assert_eq!(err.to_string(), "line 4: expected `R` or `W`: `Q 0x8`");
}

#[test]
fn reader_stops_after_first_error() {
    let mut reader = TraceReader::new("R 0x0\nbad\nR 0x4\n".as_bytes());
    assert!(matches!(reader.next(), Some(Ok(_))));
    assert!(matches!(reader.next(), Some(Err(_))));
    assert!(reader.next().is_none());
    assert!(reader.next().is_none());
}

#[test]
fn reader_is_fused_after_end_marker() {
    let mut reader = TraceReader::new("#\nR 0x0\n".as_bytes());
    assert!(reader.next().is_none());
    assert!(reader.next().is_none());
}

// ══════════════════════════════════════════════════════════
// 3. Files
// ══════════════════════════════════════════════════════════

#[test]
fn reads_trace_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "R 0x7fff5a8487f0").unwrap();
    writeln!(file, "W 0x7fff5a8487f8").unwrap();
    writeln!(file, "#eof").unwrap();
    file.flush().unwrap();

    let trace = read_trace(file.path()).unwrap();
    assert_eq!(
        trace,
        vec![
            Access::read(0x7fff_5a84_87f0),
            Access::write(0x7fff_5a84_87f8)
        ]
    );

    let streamed: Vec<Access> = TraceReader::open(file.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(streamed, trace);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    assert!(matches!(read_trace(&path), Err(TraceError::Io(_))));
    assert!(matches!(TraceReader::open(&path), Err(TraceError::Io(_))));
}
