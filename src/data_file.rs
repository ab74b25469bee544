//! Line and field handling shared by the semicolon-delimited Unicode Character
//! Database formats (`Scripts.txt`, `ArabicShaping.txt`).
//!
//! ```text
//! 0370..0373    ; Greek # L&   [4] GREEK CAPITAL LETTER HETA..GREEK SMALL LETTER ARCHAIC SAMPI
//! ```

use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::source::SourceTable;
use crate::types::{CodePoint, MAX_CODE_POINT};

/// A line of a data file with its comment removed.
pub struct DataLine<'a> {
    /// 1-based line number within the source document.
    pub number: usize,
    pub content: &'a str,
}

/// Iterator over the non-empty, comment-stripped lines of a data file.
pub struct DataLines<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> DataLines<'a> {
    pub fn new(text: &'a str) -> DataLines<'a> {
        DataLines {
            lines: text.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for DataLines<'a> {
    type Item = DataLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line_with_comment) = self.lines.next()?;
            let content = line_with_comment
                .split('#')
                .next()
                .unwrap_or_default()
                .trim();
            if content.is_empty() {
                continue;
            }

            return Some(DataLine {
                number: index + 1,
                content,
            });
        }
    }
}

impl<'a> DataLine<'a> {
    /// Split the line on `;` into exactly `N` trimmed fields.
    pub fn fields<const N: usize>(&self, table: SourceTable) -> Result<[&'a str; N]> {
        let fields = self.content.split(';').map(str::trim).collect::<Vec<_>>();
        if fields.len() != N {
            return Err(Error::format(
                table,
                self.number,
                format!("expected {} fields, found {}", N, fields.len()),
            ));
        }

        let mut out = [""; N];
        out.copy_from_slice(&fields);
        Ok(out)
    }
}

/// Parse a hexadecimal code point such as `03B1`.
pub fn parse_code_point(field: &str, table: SourceTable, line: usize) -> Result<CodePoint> {
    let field = field.trim();
    let code_point = u32::from_str_radix(field, 16).map_err(|_| {
        Error::format(table, line, format!("`{}` is not a hexadecimal code point", field))
    })?;
    if code_point > MAX_CODE_POINT {
        return Err(Error::format(
            table,
            line,
            format!("code point {:04X} is beyond U+10FFFF", code_point),
        ));
    }
    Ok(code_point)
}

/// Parse a single hexadecimal code point or an inclusive range of two joined
/// by `separator` (`..` in the UCD files, `-` in the IANA registry).
pub fn parse_code_point_range(
    field: &str,
    separator: &str,
    table: SourceTable,
    line: usize,
) -> Result<RangeInclusive<CodePoint>> {
    let mut bounds = field.splitn(2, separator);
    let start = parse_code_point(bounds.next().unwrap_or_default(), table, line)?;
    let end = match bounds.next() {
        Some(end) => parse_code_point(end, table, line)?,
        None => start,
    };
    if end < start {
        return Err(Error::format(
            table,
            line,
            format!("range {:04X}{}{:04X} is reversed", start, separator, end),
        ));
    }
    Ok(start..=end)
}

#[test]
fn data_lines_skip_comments_and_blanks() {
    let text = "# Scripts-6.3.0.txt\n\n0041..005A    ; Latin # L&  [26]\n   \n03B1 ; Greek\n";
    let lines = DataLines::new(text)
        .map(|line| (line.number, line.content))
        .collect::<Vec<_>>();
    assert_eq!(lines, [(3, "0041..005A    ; Latin"), (5, "03B1 ; Greek")]);
}

#[test]
fn fields_checks_count() {
    let line = DataLines::new("0627; ALEF; R").next().expect("one line");
    assert!(line.fields::<3>(SourceTable::JoiningTypes).is_ok());

    match line.fields::<4>(SourceTable::JoiningTypes) {
        Err(Error::Format { line, reason, .. }) => {
            assert_eq!(line, 1);
            assert_eq!(reason, "expected 4 fields, found 3");
        }
        _ => panic!("expected a format error"),
    }
}

#[test]
fn code_point_ranges() {
    let table = SourceTable::Scripts;
    assert_eq!(parse_code_point_range("03B1", "..", table, 1).ok(), Some(0x3B1..=0x3B1));
    assert_eq!(parse_code_point_range("0041..005A", "..", table, 1).ok(), Some(0x41..=0x5A));
    assert_eq!(
        parse_code_point_range("0061-007A", "-", SourceTable::IdnaTables, 1).ok(),
        Some(0x61..=0x7A)
    );
    assert!(parse_code_point_range("00G1", "..", table, 1).is_err());
    assert!(parse_code_point_range("005A..0041", "..", table, 1).is_err());
    assert!(parse_code_point_range("110000", "..", table, 1).is_err());
    assert!(parse_code_point_range("", "..", table, 1).is_err());
}
