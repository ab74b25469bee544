//! Parse `ArabicShaping.txt` for the joining type of every listed code point.
//! Joining types are consulted by CONTEXTJ rule A.1 (ZERO WIDTH NON-JOINER).

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::data_file::{parse_code_point, DataLines};
use crate::error::{Error, Result};
use crate::source::SourceTable;
use crate::types::{CodePoint, Label};

/// Joining type of each code point, in source line order.
pub type JoiningTypeMap = IndexMap<CodePoint, Label>;

/// File format is:
/// `<code>; <name>; <joining type>; <joining group>`
pub fn parse_joining_types(text: &str) -> Result<JoiningTypeMap> {
    let mut joining_types = JoiningTypeMap::new();

    for line in DataLines::new(text) {
        let [code, _name, joining_type, _group] = line.fields::<4>(SourceTable::JoiningTypes)?;
        let code = parse_code_point(code, SourceTable::JoiningTypes, line.number)?;

        match joining_types.entry(code) {
            Entry::Occupied(_) => {
                return Err(Error::format(
                    SourceTable::JoiningTypes,
                    line.number,
                    format!("joining type of {:04X} is listed twice", code),
                ));
            }
            Entry::Vacant(entry) => {
                entry.insert(joining_type.into());
            }
        }
    }

    log::debug!("{} joining types", joining_types.len());
    Ok(joining_types)
}

#[test]
fn alef_is_right_joining() {
    let joining_types = parse_joining_types("0627; ALEF; R; Arabic Letter\n").expect("well-formed");
    assert_eq!(joining_types.len(), 1);
    assert_eq!(joining_types[&0x0627u32].as_str(), "R");
}

#[test]
fn source_order_is_kept() {
    let text = "\
# ArabicShaping-6.3.0.txt
#
0628; BEH; D; BEH
0600; ARABIC NUMBER SIGN; U; No_Joining_Group
200D; ZERO WIDTH JOINER; C; No_Joining_Group # format character
0627; ALEF; R; ALEF
";
    let joining_types = parse_joining_types(text).expect("well-formed");
    let entries = joining_types
        .iter()
        .map(|(code, joining_type)| (*code, joining_type.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        entries,
        [(0x0628, "D"), (0x0600, "U"), (0x200D, "C"), (0x0627, "R")]
    );
}

#[test]
fn malformed_lines_are_fatal() {
    assert!(parse_joining_types("0627; ALEF; R\n").is_err());
    assert!(parse_joining_types("0627..0628; ALEF; R; ALEF\n").is_err());
    assert!(parse_joining_types("ALEF; 0627; R; ALEF\n").is_err());

    match parse_joining_types("0627; ALEF; R; ALEF\n0627; ALEF; R; ALEF\n") {
        Err(Error::Format { line, .. }) => assert_eq!(line, 2),
        _ => panic!("duplicate code points must be rejected"),
    }
}
