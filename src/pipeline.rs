//! The compilation pipeline: fetch, parse, compact, one source after another.

use crate::config::Locators;
use crate::emit::CompiledTable;
use crate::error::Result;
use crate::idna_tables::process_idna_tables;
use crate::joining_types::parse_joining_types;
use crate::ranges::{compact, expand, Run};
use crate::scripts::process_scripts;
use crate::source::{Fetch, SourceTable};
use crate::types::{CodePointSet, LabelMap};

/// Compact every label's set, keeping the map's order.
pub fn compact_all(sets: &LabelMap<CodePointSet>) -> LabelMap<Vec<Run>> {
    sets.iter()
        .map(|(label, set)| {
            let runs = compact(set);
            debug_assert_eq!(expand(&runs).count(), set.len(), "runs of {} overlap", label);
            log::debug!("{}: {} code points in {} runs", label, set.len(), runs.len());
            (label.clone(), runs)
        })
        .collect()
}

/// Fetch and compile the three source documents named by `locators`.  The
/// first failure aborts compilation.
pub fn compile(locators: &Locators, fetcher: &dyn Fetch) -> Result<CompiledTable> {
    log::info!("compiling tables for release {}", locators.release);

    log::info!("compiling {} table", SourceTable::Scripts);
    let scripts = process_scripts(&fetcher.fetch(&locators.scripts)?)?;

    log::info!("compiling {} table", SourceTable::JoiningTypes);
    let joining_types = parse_joining_types(&fetcher.fetch(&locators.joining_types)?)?;

    log::info!("compiling {} table", SourceTable::IdnaTables);
    let codepoint_classes = process_idna_tables(&fetcher.fetch(&locators.idna_tables)?)?;

    Ok(CompiledTable {
        release: locators.release.clone(),
        scripts: compact_all(&scripts),
        joining_types,
        codepoint_classes: compact_all(&codepoint_classes),
    })
}

#[cfg(test)]
struct FixedSources(std::collections::HashMap<String, String>);

#[cfg(test)]
impl Fetch for FixedSources {
    fn fetch(&self, locator: &str) -> Result<String> {
        self.0
            .get(locator)
            .cloned()
            .ok_or_else(|| crate::error::Error::fetch(locator, "no such document"))
    }
}

#[cfg(test)]
const SCRIPTS_TXT: &str = "\
# Scripts-6.3.0.txt
0041..005A    ; Latin # L&  [26] LATIN CAPITAL LETTER A..LATIN CAPITAL LETTER Z
0370..0373    ; Greek # L&   [4] GREEK CAPITAL LETTER HETA..GREEK SMALL LETTER ARCHAIC SAMPI
0375          ; Greek # Sk       GREEK LOWER NUMERAL SIGN
05D0..05EA    ; Hebrew # Lo  [27] HEBREW LETTER ALEF..HEBREW LETTER TAV
3005          ; Han # Lm       IDEOGRAPHIC ITERATION MARK
3007          ; Han # Nl       IDEOGRAPHIC NUMBER ZERO
3041..3096    ; Hiragana # Lo  [86] HIRAGANA LETTER SMALL A..HIRAGANA LETTER SMALL KE
30A1..30FA    ; Katakana # Lo  [90] KATAKANA LETTER SMALL A..KATAKANA LETTER VU
";

#[cfg(test)]
const ARABIC_SHAPING_TXT: &str = "\
# ArabicShaping-6.3.0.txt
0627; ALEF; R; ALEF
0628; BEH; D; BEH
200D; ZERO WIDTH JOINER; C; No_Joining_Group
";

#[cfg(test)]
const IDNA_TABLES_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<registry xmlns="http://www.iana.org/assignments" id="idna-tables-6.3.0">
  <registry id="idna-tables-properties">
    <record><codepoint>0000-002C</codepoint><property>DISALLOWED</property></record>
    <record><codepoint>002D</codepoint><property>PVALID</property></record>
    <record><codepoint>0030-0039</codepoint><property>PVALID</property></record>
    <record><codepoint>00B7</codepoint><property>CONTEXTO</property></record>
    <record><codepoint>0061-007A</codepoint><property>PVALID</property></record>
    <record><codepoint>0378-0379</codepoint><property>UNASSIGNED</property></record>
    <record><codepoint>200C-200D</codepoint><property>CONTEXTJ</property></record>
  </registry>
</registry>
"#;

#[cfg(test)]
fn fixed_sources(locators: &Locators) -> FixedSources {
    let mut documents = std::collections::HashMap::new();
    documents.insert(locators.scripts.clone(), SCRIPTS_TXT.to_string());
    documents.insert(locators.joining_types.clone(), ARABIC_SHAPING_TXT.to_string());
    documents.insert(locators.idna_tables.clone(), IDNA_TABLES_XML.to_string());
    FixedSources(documents)
}

#[test]
fn compile_fixed_sources() {
    let locators = Locators::for_release("6.3.0").expect("valid release");
    let table = compile(&locators, &fixed_sources(&locators)).expect("compiles");

    assert_eq!(table.release, "6.3.0");

    let scripts = table.scripts.keys().map(|label| label.as_str()).collect::<Vec<_>>();
    assert_eq!(scripts, ["Greek", "Han", "Hebrew", "Hiragana", "Katakana"]);
    assert_eq!(
        table.scripts["Greek"],
        [Run::Range(0x370..=0x373), Run::Single(0x375)]
    );
    assert_eq!(table.scripts["Han"], [Run::Single(0x3005), Run::Single(0x3007)]);

    assert_eq!(table.joining_types.len(), 3);
    assert_eq!(table.joining_types[&0x200Du32].as_str(), "C");

    let classes = table
        .codepoint_classes
        .keys()
        .map(|label| label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(classes, ["PVALID", "CONTEXTO", "CONTEXTJ"]);
    assert_eq!(
        table.codepoint_classes["PVALID"],
        [Run::Single(0x2D), Run::Range(0x30..=0x39), Run::Range(0x61..=0x7A)]
    );
    assert_eq!(table.class_of(0x20), None);
    assert_eq!(table.class_of(0x378), None);
}

#[test]
fn missing_whitelisted_script_aborts() {
    let locators = Locators::for_release("6.3.0").expect("valid release");
    let mut sources = fixed_sources(&locators);
    let without_han = SCRIPTS_TXT
        .lines()
        .filter(|line| !line.contains("; Han"))
        .map(|line| format!("{}\n", line))
        .collect::<String>();
    sources.0.insert(locators.scripts.clone(), without_han);

    match compile(&locators, &sources) {
        Err(crate::error::Error::MissingLabel { label, .. }) => assert_eq!(label, "Han"),
        _ => panic!("a missing whitelisted script must abort compilation"),
    }
}

#[test]
fn compilation_is_deterministic() {
    let locators = Locators::for_release("6.3.0").expect("valid release");
    let first = compile(&locators, &fixed_sources(&locators))
        .and_then(|table| table.render())
        .expect("compiles");
    let second = compile(&locators, &fixed_sources(&locators))
        .and_then(|table| table.render())
        .expect("compiles");
    assert_eq!(first, second);
}

#[test]
fn missing_source_aborts() {
    let locators = Locators::for_release("6.3.0").expect("valid release");
    let mut sources = fixed_sources(&locators);
    sources.0.remove(locators.joining_types.as_str());

    match compile(&locators, &sources) {
        Err(crate::error::Error::Fetch { locator, .. }) => {
            assert_eq!(locator, locators.joining_types)
        }
        _ => panic!("a missing source must abort compilation"),
    }
}
