//! Trace record parsing: one record per line.

use std::io::BufRead;

use crate::iolog::IoKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Access { lba: u64, op: IoKind },
    PolicySwitch(i64),
}

/// Parse a single workload line. Blank lines and lines starting with `#`
/// yield `None` silently (not a malformed-record warning). Anything else
/// that fails to parse also yields `None`; the caller is responsible for
/// logging a warning with the line number, since this function has no
/// access to it.
pub fn parse_line(line: &str) -> Option<Record> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    let first = parts.next()?;

    if first.eq_ignore_ascii_case("p") {
        let code: i64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        return Some(Record::PolicySwitch(code));
    }

    let lba: u64 = first.parse().ok()?;
    let op_str = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let op = match op_str {
        "R" | "r" => IoKind::Read,
        "W" | "w" => IoKind::Write,
        _ => return None,
    };
    Some(Record::Access { lba, op })
}

/// Iterator adapter yielding `(line_number, Option<Record>)` pairs, where
/// `None` marks a malformed or skippable line so callers can distinguish
/// "skip silently" (blank/comment) from "skip and warn" (malformed) by
/// re-checking the raw text if desired. Line numbers are 1-based.
pub struct WorkloadReader<R: BufRead> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> WorkloadReader<R> {
    pub fn new(reader: R) -> WorkloadReader<R> {
        WorkloadReader {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for WorkloadReader<R> {
    type Item = (usize, String, Option<Record>);

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.lines.next()?.ok()?;
        self.line_no += 1;
        let record = parse_line(&raw);
        Some((self.line_no, raw, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines_are_ignored() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("# a comment"), None);
    }

    #[test]
    fn parses_access_records_case_insensitively() {
        assert_eq!(
            parse_line("0 R"),
            Some(Record::Access { lba: 0, op: IoKind::Read })
        );
        assert_eq!(
            parse_line("8 w"),
            Some(Record::Access { lba: 8, op: IoKind::Write })
        );
    }

    #[test]
    fn parses_policy_switch_case_insensitively() {
        assert_eq!(parse_line("P 4"), Some(Record::PolicySwitch(4)));
        assert_eq!(parse_line("p 0"), Some(Record::PolicySwitch(0)));
    }

    #[test]
    fn malformed_lines_yield_none() {
        assert_eq!(parse_line("not a record"), None);
        assert_eq!(parse_line("5 X"), None);
        assert_eq!(parse_line("5"), None);
        assert_eq!(parse_line("P"), None);
        assert_eq!(parse_line("5 R extra"), None);
    }

    #[test]
    fn reader_tracks_line_numbers() {
        let data = b"0 R\n# comment\nbad line\nP 2\n";
        let reader = WorkloadReader::new(&data[..]);
        let items: Vec<_> = reader.collect();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].0, 1);
        assert!(items[0].2.is_some());
        assert_eq!(items[1].0, 2);
        assert!(items[1].2.is_none());
        assert_eq!(items[2].0, 3);
        assert!(items[2].2.is_none());
        assert_eq!(items[3].0, 4);
        assert_eq!(items[3].2, Some(Record::PolicySwitch(2)));
    }
}
