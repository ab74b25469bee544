use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const SCRIPTS_TXT: &str = "\
# Scripts-6.3.0.txt
0041..005A    ; Latin # L&  [26] LATIN CAPITAL LETTER A..LATIN CAPITAL LETTER Z
0370..0373    ; Greek # L&   [4] GREEK CAPITAL LETTER HETA..GREEK SMALL LETTER ARCHAIC SAMPI
05D0..05EA    ; Hebrew # Lo  [27] HEBREW LETTER ALEF..HEBREW LETTER TAV
3007          ; Han # Nl       IDEOGRAPHIC NUMBER ZERO
3041..3096    ; Hiragana # Lo  [86] HIRAGANA LETTER SMALL A..HIRAGANA LETTER SMALL KE
30A1..30FA    ; Katakana # Lo  [90] KATAKANA LETTER SMALL A..KATAKANA LETTER VU
";

const ARABIC_SHAPING_TXT: &str = "\
0627; ALEF; R; ALEF
0628; BEH; D; BEH
";

const IDNA_TABLES_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<registry xmlns="http://www.iana.org/assignments" id="idna-tables-6.3.0">
  <registry id="idna-tables-properties">
    <record><codepoint>0000-002C</codepoint><property>DISALLOWED</property></record>
    <record><codepoint>0061-007A</codepoint><property>PVALID</property></record>
    <record><codepoint>200C-200D</codepoint><property>CONTEXTJ</property></record>
  </registry>
</registry>
"#;

fn write_sources(dir: &Path) {
    fs::write(dir.join("Scripts.txt"), SCRIPTS_TXT).expect("write Scripts.txt");
    fs::write(dir.join("ArabicShaping.txt"), ARABIC_SHAPING_TXT).expect("write ArabicShaping.txt");
    fs::write(dir.join("idna-tables-6.3.0.xml"), IDNA_TABLES_XML).expect("write registry");
}

fn build_idna_data() -> Command {
    let mut cmd = Command::cargo_bin("build_idna_data").expect("binary is built");
    cmd.env_remove("IDNA_RELEASE");
    cmd
}

#[test]
fn writes_tables_from_source_directory() {
    let sources = tempfile::tempdir().expect("temporary directory");
    write_sources(sources.path());

    build_idna_data()
        .arg("6.3.0")
        .arg("--source-dir")
        .arg(sources.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "// This file is automatically generated by build_idna_data.",
        ))
        .stdout(predicate::str::contains("pub static SCRIPTS"))
        .stdout(predicate::str::contains("(\"Greek\" , & [Run :: Range (0x0370 ..= 0x0373)]),"))
        .stdout(predicate::str::contains("(0x0627 , \"R\"),"))
        .stdout(predicate::str::contains("(\"PVALID\" , & [Run :: Range (0x0061 ..= 0x007A)]),"))
        .stdout(predicate::str::contains("DISALLOWED\" ,").not());
}

#[test]
fn release_from_environment_and_output_file() {
    let sources = tempfile::tempdir().expect("temporary directory");
    write_sources(sources.path());
    let output = sources.path().join("idnadata.rs");

    build_idna_data()
        .env("IDNA_RELEASE", "6.3.0")
        .arg("--source-dir")
        .arg(sources.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let generated = fs::read_to_string(&output).expect("output written");
    assert!(generated.contains("pub const RELEASE : & str = \"6.3.0\" ;"));

    // A second run over the same sources gives the same bytes.
    let again = sources.path().join("idnadata-again.rs");
    build_idna_data()
        .arg("6.3.0")
        .arg("--source-dir")
        .arg(sources.path())
        .arg("-o")
        .arg(&again)
        .assert()
        .success();
    assert_eq!(generated, fs::read_to_string(&again).expect("output written"));
}

#[test]
fn missing_source_fails_without_output() {
    let sources = tempfile::tempdir().expect("temporary directory");
    write_sources(sources.path());
    fs::remove_file(sources.path().join("idna-tables-6.3.0.xml")).expect("remove registry");
    let output = sources.path().join("idnadata.rs");

    build_idna_data()
        .arg("6.3.0")
        .arg("--source-dir")
        .arg(sources.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("idna-tables-6.3.0.xml"));

    assert!(!output.exists());
}

#[test]
fn malformed_source_fails() {
    let sources = tempfile::tempdir().expect("temporary directory");
    write_sources(sources.path());
    fs::write(sources.path().join("ArabicShaping.txt"), "0627; ALEF; R\n").expect("write");

    build_idna_data()
        .arg("6.3.0")
        .arg("--source-dir")
        .arg(sources.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ArabicShaping.txt:1: expected 4 fields, found 3"));
}

#[test]
fn release_is_required() {
    build_idna_data().assert().failure();
    build_idna_data().arg("latest").assert().failure();
}
