//! Processes `Scripts.txt` into code point sets for the scripts that the
//! CONTEXTO rules of RFC 5892 refer to.

use crate::data_file::{parse_code_point_range, DataLines};
use crate::error::{Error, Result};
use crate::source::SourceTable;
use crate::types::{group_by_label, CodePointSet, LabelMap, LabeledRange};

/// The scripts retained in the output, in output order.
///
/// Greek, Hebrew, Hiragana, Katakana and Han are the scripts named by the
/// CONTEXTO rules for KERAIA, GERESH, GERSHAYIM and KATAKANA MIDDLE DOT.
pub const SCRIPT_WHITELIST: [&str; 5] = ["Greek", "Han", "Hebrew", "Hiragana", "Katakana"];

/// Parse every line of `Scripts.txt`.
///
/// File format is:
/// `<code>[..<code>] ; <script>`
pub fn parse_scripts(text: &str) -> Result<Vec<LabeledRange>> {
    DataLines::new(text)
        .map(|line| {
            let [code_points, script] = line.fields::<2>(SourceTable::Scripts)?;
            let range =
                parse_code_point_range(code_points, "..", SourceTable::Scripts, line.number)?;
            Ok(LabeledRange {
                range,
                label: script.into(),
            })
        })
        .collect()
}

/// Keep only the whitelisted scripts, in whitelist order.  Every whitelisted
/// script must be present.
pub fn retain_whitelisted(mut sets: LabelMap<CodePointSet>) -> Result<LabelMap<CodePointSet>> {
    SCRIPT_WHITELIST
        .iter()
        .map(|&script| {
            sets.swap_remove_entry(script).ok_or_else(|| Error::MissingLabel {
                table: SourceTable::Scripts,
                label: script.to_string(),
            })
        })
        .collect()
}

/// Compute the code point set of every whitelisted script.
pub fn process_scripts(text: &str) -> Result<LabelMap<CodePointSet>> {
    let records = parse_scripts(text)?;
    log::debug!("{} script ranges", records.len());
    retain_whitelisted(group_by_label(records))
}

#[test]
fn whitelist_is_sorted() {
    let mut sorted = SCRIPT_WHITELIST;
    sorted.sort_unstable();
    assert_eq!(sorted, SCRIPT_WHITELIST);
}

#[test]
fn only_whitelisted_scripts_are_kept() {
    let text = "\
0041..005A ; Latin # comment
03B1 ; Greek
05D0 ; Hebrew
4E00 ; Han
3041 ; Hiragana
30A1 ; Katakana
";
    let scripts = process_scripts(text).expect("well-formed");

    assert_eq!(scripts.len(), SCRIPT_WHITELIST.len());
    let greek = &scripts["Greek"];
    assert_eq!(greek.len(), 1);
    assert!(greek.contains(&0x03B1));
    assert!(scripts.get("Latin").is_none());
}

#[test]
fn missing_whitelisted_script_is_fatal() {
    let text = "03B1 ; Greek\n05D0 ; Hebrew\n3041 ; Hiragana\n30A1 ; Katakana\n";
    match process_scripts(text) {
        Err(Error::MissingLabel { table, label }) => {
            assert_eq!(table, SourceTable::Scripts);
            assert_eq!(label, "Han");
        }
        _ => panic!("a missing whitelisted script must be reported"),
    }

    assert!(process_scripts("").is_err());
}

#[test]
fn ranges_expand_to_every_code_point() {
    let text = "\
# Scripts-6.3.0.txt
0370..0373    ; Greek # L&   [4] GREEK CAPITAL LETTER HETA..GREEK SMALL LETTER ARCHAIC SAMPI
0375          ; Greek # Sk       GREEK LOWER NUMERAL SIGN
3041..3096    ; Hiragana # Lo  [86] HIRAGANA LETTER SMALL A..HIRAGANA LETTER SMALL KE
";
    let records = parse_scripts(text).expect("well-formed");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].range, 0x370..=0x373);
    assert_eq!(records[0].label.as_str(), "Greek");

    let scripts = group_by_label(records);
    assert_eq!(scripts["Greek"].len(), 5);
    assert_eq!(scripts["Hiragana"].len(), 0x96 - 0x41 + 1);
}

#[test]
fn output_follows_whitelist_order() {
    let text = "\
30A1 ; Katakana
05D0 ; Hebrew
4E00 ; Han
03B1 ; Greek
3041 ; Hiragana
";
    let scripts = process_scripts(text).expect("well-formed");
    let order = scripts.keys().map(|label| label.as_str()).collect::<Vec<_>>();
    assert_eq!(order, SCRIPT_WHITELIST);
}

#[test]
fn malformed_lines_are_fatal() {
    match parse_scripts("03B1 ; Greek\n03B2 ; Greek ; extra\n") {
        Err(Error::Format { table, line, .. }) => {
            assert_eq!(table, SourceTable::Scripts);
            assert_eq!(line, 2);
        }
        _ => panic!("three fields must be rejected"),
    }

    assert!(parse_scripts("03B1\n").is_err());
    assert!(parse_scripts("03BZ ; Greek\n").is_err());
    assert!(parse_scripts("0370...0373 ; Greek\n").is_err());
}
