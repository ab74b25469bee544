//! Rendering of the compiled tables as a Rust source module.
//!
//! The generated module is self-contained: it declares its own `Run` type and
//! three tables, `SCRIPTS`, `JOINING_TYPES` and `CODEPOINT_CLASSES`.

use std::fmt::Write;

use quote::quote;

use crate::error::{Error, Result};
use crate::joining_types::JoiningTypeMap;
use crate::ranges::{hex_literal, Run};
use crate::types::LabelMap;

/// Everything compiled from one release's source documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledTable {
    /// The release identifier the sources were selected by.
    pub release: String,

    /// Runs of each whitelisted script, in whitelist order.
    pub scripts: LabelMap<Vec<Run>>,

    /// Joining type of every code point in `ArabicShaping.txt`, in source line
    /// order.  Looked up one code point at a time, so not range-encoded.
    pub joining_types: JoiningTypeMap,

    /// Runs of each IDNA property class, in registry discovery order.  A code
    /// point in none of these classes is UNASSIGNED or DISALLOWED.
    pub codepoint_classes: LabelMap<Vec<Run>>,
}

impl CompiledTable {
    /// Look up the class of `code_point` the way a consumer of the generated
    /// module would.
    #[cfg(test)]
    pub(crate) fn class_of(&self, code_point: crate::types::CodePoint) -> Option<&str> {
        self.codepoint_classes
            .iter()
            .find(|(_, runs)| runs.iter().any(|run| run.contains(code_point)))
            .map(|(class, _)| class.as_str())
    }

    /// Render the tables as Rust source.  The result is checked to parse as a
    /// Rust file before it is returned.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out)
            .map_err(|err| Error::Emit(err.to_string()))?;

        syn::parse_file(&out)?;
        Ok(out)
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "// This file is automatically generated by build_idna_data.")?;
        writeln!(out, "// Do not edit it by hand; regenerate it instead.")?;
        writeln!(out, "//")?;
        writeln!(out, "// Release: {}", self.release)?;
        writeln!(out, "//")?;
        writeln!(
            out,
            "// A code point that is in no CODEPOINT_CLASSES entry is UNASSIGNED or DISALLOWED."
        )?;
        writeln!(out)?;

        let release = &self.release;
        writeln!(out, "{}", quote! { pub const RELEASE: &str = #release; })?;
        writeln!(out)?;

        writeln!(out, "#[derive(Clone, Debug, PartialEq, Eq)]")?;
        writeln!(out, "pub enum Run {{")?;
        writeln!(out, "    Single(u32),")?;
        writeln!(out, "    Range(::core::ops::RangeInclusive<u32>),")?;
        writeln!(out, "}}")?;
        writeln!(out)?;

        write_run_table(out, "SCRIPTS", &self.scripts)?;
        writeln!(out)?;

        writeln!(out, "pub static JOINING_TYPES: &[(u32, &str)] = &[")?;
        for (code_point, joining_type) in &self.joining_types {
            let code_point = hex_literal(*code_point);
            let joining_type = joining_type.as_str();
            writeln!(out, "    {},", quote! { (#code_point, #joining_type) })?;
        }
        writeln!(out, "];")?;
        writeln!(out)?;

        write_run_table(out, "CODEPOINT_CLASSES", &self.codepoint_classes)
    }
}

fn write_run_table(out: &mut String, name: &str, table: &LabelMap<Vec<Run>>) -> std::fmt::Result {
    writeln!(out, "pub static {}: &[(&str, &[Run])] = &[", name)?;
    for (label, runs) in table {
        let label = label.as_str();
        writeln!(out, "    {},", quote! { (#label, &[#(#runs),*]) })?;
    }
    writeln!(out, "];")
}

#[cfg(test)]
fn sample_table() -> CompiledTable {
    let mut scripts = LabelMap::new();
    scripts.insert("Greek".into(), vec![Run::Range(0x370..=0x373), Run::Single(0x375)]);
    scripts.insert("Han".into(), vec![Run::Single(0x3007)]);

    let mut joining_types = JoiningTypeMap::new();
    joining_types.insert(0x0628, "D".into());
    joining_types.insert(0x0627, "R".into());

    let mut codepoint_classes = LabelMap::new();
    codepoint_classes.insert("PVALID".into(), vec![Run::Single(0x2D), Run::Range(0x61..=0x7A)]);
    codepoint_classes.insert("CONTEXTJ".into(), vec![Run::Range(0x200C..=0x200D)]);
    codepoint_classes.insert("CONTEXTO".into(), vec![]);

    CompiledTable {
        release: "6.3.0".to_string(),
        scripts,
        joining_types,
        codepoint_classes,
    }
}

#[test]
fn rendered_tables_parse_as_rust() {
    let rendered = sample_table().render().expect("renders");
    let file = syn::parse_file(&rendered).expect("valid Rust");

    let names = file
        .items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Const(item) => Some(item.ident.to_string()),
            syn::Item::Static(item) => Some(item.ident.to_string()),
            syn::Item::Enum(item) => Some(item.ident.to_string()),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        ["RELEASE", "Run", "SCRIPTS", "JOINING_TYPES", "CODEPOINT_CLASSES"]
    );
}

#[test]
fn rendered_tables_are_marked_generated() {
    let rendered = sample_table().render().expect("renders");
    assert!(rendered.starts_with("// This file is automatically generated by build_idna_data."));
    assert!(rendered.contains("// Release: 6.3.0\n"));
    assert!(rendered.contains("pub const RELEASE : & str = \"6.3.0\" ;"));
}

#[test]
fn rendered_entries() {
    let rendered = sample_table().render().expect("renders");
    let lines = rendered.lines().collect::<Vec<_>>();

    let entry = |prefix: &str| {
        lines
            .iter()
            .position(|line| line.trim_start().starts_with(prefix))
            .unwrap_or_else(|| panic!("no line starting with {}", prefix))
    };

    assert!(lines.contains(
        &"    (\"Greek\" , & [Run :: Range (0x0370 ..= 0x0373) , Run :: Single (0x0375)]),"
    ));
    assert!(lines.contains(&"    (0x0628 , \"D\"),"));
    assert!(lines.contains(&"    (\"CONTEXTO\" , & []),"));

    // Insertion order of every table survives rendering.
    assert!(entry("(\"Greek\"") < entry("(\"Han\""));
    assert!(entry("(0x0628") < entry("(0x0627"));
    assert!(entry("(\"PVALID\"") < entry("(\"CONTEXTJ\""));
    assert!(entry("(\"CONTEXTJ\"") < entry("(\"CONTEXTO\""));
}

#[test]
fn class_lookup() {
    let table = sample_table();
    assert_eq!(table.class_of(0x62), Some("PVALID"));
    assert_eq!(table.class_of(0x200D), Some("CONTEXTJ"));
    assert_eq!(table.class_of(0x41), None);
}
