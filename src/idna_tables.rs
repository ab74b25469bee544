//! Processes the IANA `idna-tables-<version>.xml` registry, which classifies
//! every code point as PVALID, CONTEXTJ, CONTEXTO, DISALLOWED or UNASSIGNED.

use crate::data_file::parse_code_point_range;
use crate::error::{Error, Result};
use crate::source::SourceTable;
use crate::types::{group_by_label, CodePointSet, LabelMap, LabeledRange};

/// Namespace of every element in the registry document.
pub const IDNA_TABLES_NAMESPACE: &str = "http://www.iana.org/assignments";

/// `id` of the sub-registry holding the per-code-point property records.
const PROPERTIES_REGISTRY_ID: &str = "idna-tables-properties";

/// Property classes left out of the compiled table.  Any code point that is in
/// none of the emitted classes belongs to this implicit default class.
pub const DROPPED_PROPERTIES: [&str; 2] = ["UNASSIGNED", "DISALLOWED"];

/// Read every `<record>` of the properties registry, in document order.
///
/// ```text
/// <registry xmlns="http://www.iana.org/assignments" id="idna-tables-6.3.0">
///   <registry id="idna-tables-properties">
///     <record>
///       <codepoint>0061-007A</codepoint>
///       <property>PVALID</property>
///       <description>LATIN SMALL LETTER A..LATIN SMALL LETTER Z</description>
///     </record>
/// ```
pub fn parse_idna_tables(xml: &str) -> Result<Vec<LabeledRange>> {
    let table = SourceTable::IdnaTables;
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(xml, options)
        .map_err(|source| Error::Xml { table, source })?;

    let line_of = |node: roxmltree::Node| document.text_pos_at(node.range().start).row as usize;

    let root = document.root_element();
    let registry = root
        .children()
        .find(|node| {
            node.has_tag_name((IDNA_TABLES_NAMESPACE, "registry"))
                && node.attribute("id") == Some(PROPERTIES_REGISTRY_ID)
        })
        .ok_or_else(|| {
            Error::format(
                table,
                line_of(root),
                format!("no registry with id=\"{}\"", PROPERTIES_REGISTRY_ID),
            )
        })?;

    registry
        .children()
        .filter(|node| node.has_tag_name((IDNA_TABLES_NAMESPACE, "record")))
        .map(|record| {
            let line = line_of(record);
            let field = |name: &str| {
                record
                    .children()
                    .find(|node| node.has_tag_name((IDNA_TABLES_NAMESPACE, name)))
                    .and_then(|node| node.text())
                    .map(str::trim)
                    .ok_or_else(|| Error::format(table, line, format!("record has no <{}>", name)))
            };

            let range = parse_code_point_range(field("codepoint")?, "-", table, line)?;
            let property = field("property")?;
            Ok(LabeledRange {
                range,
                label: property.into(),
            })
        })
        .collect()
}

/// Compute the code point set of every property class other than
/// [`DROPPED_PROPERTIES`], in the order classes first appear in the registry.
pub fn process_idna_tables(xml: &str) -> Result<LabelMap<CodePointSet>> {
    let records = parse_idna_tables(xml)?;
    log::debug!("{} IDNA property records", records.len());

    let classes = group_by_label(
        records
            .into_iter()
            .filter(|record| !DROPPED_PROPERTIES.contains(&record.label.as_str())),
    );
    for (class, code_points) in &classes {
        log::debug!("{}: {} code points", class, code_points.len());
    }
    Ok(classes)
}

#[cfg(test)]
fn registry(records: &[(&str, &str)]) -> String {
    let records = records
        .iter()
        .map(|(codepoint, property)| {
            format!(
                "    <record>\n      <codepoint>{}</codepoint>\n      <property>{}</property>\n      <description>test</description>\n    </record>\n",
                codepoint, property
            )
        })
        .collect::<String>();

    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\n\
         <registry xmlns=\"http://www.iana.org/assignments\" id=\"idna-tables-6.3.0\">\n\
         \x20 <title>IDNA Parameters</title>\n\
         \x20 <registry id=\"idna-tables-context\">\n\
         \x20   <record><codepoint>00B7</codepoint><property>CONTEXTO</property></record>\n\
         \x20 </registry>\n\
         \x20 <registry id=\"idna-tables-properties\">\n\
         {}\
         \x20 </registry>\n\
         </registry>\n",
        records
    )
}

#[test]
fn unassigned_and_disallowed_are_dropped() {
    let xml = registry(&[
        ("0000-002C", "DISALLOWED"),
        ("0378-0379", "UNASSIGNED"),
        ("0061-007A", "PVALID"),
    ]);
    let classes = process_idna_tables(&xml).expect("well-formed");

    assert_eq!(classes.len(), 1);
    let pvalid = &classes["PVALID"];
    assert_eq!(pvalid.len(), 26);
    assert!((0x61..=0x7A).all(|code| pvalid.contains(&code)));
    assert!(classes.get("UNASSIGNED").is_none());
    assert!(classes.get("DISALLOWED").is_none());
}

#[test]
fn classes_follow_discovery_order() {
    let xml = registry(&[
        ("002D", "PVALID"),
        ("00B7", "CONTEXTO"),
        ("200C-200D", "CONTEXTJ"),
        ("0030-0039", "PVALID"),
    ]);
    let classes = process_idna_tables(&xml).expect("well-formed");
    let order = classes.keys().map(|label| label.as_str()).collect::<Vec<_>>();
    assert_eq!(order, ["PVALID", "CONTEXTO", "CONTEXTJ"]);
    assert_eq!(classes["PVALID"].len(), 11);
}

#[test]
fn only_the_properties_registry_is_read() {
    // The CONTEXTO record of the context registry is not a property record.
    let xml = registry(&[("0061", "PVALID")]);
    let records = parse_idna_tables(&xml).expect("well-formed");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].range, 0x61..=0x61);
}

#[test]
fn malformed_registries_are_fatal() {
    match parse_idna_tables("<registry") {
        Err(Error::Xml { .. }) => {}
        _ => panic!("unterminated XML must be rejected"),
    }

    let no_properties = "<registry xmlns=\"http://www.iana.org/assignments\"/>";
    assert!(matches!(
        parse_idna_tables(no_properties),
        Err(Error::Format { .. })
    ));

    let wrong_namespace = registry(&[("0061", "PVALID")]).replace(IDNA_TABLES_NAMESPACE, "urn:x");
    assert!(parse_idna_tables(&wrong_namespace).is_err());

    match parse_idna_tables(&registry(&[("0061", "PVALID"), ("00ZZ", "PVALID")])) {
        Err(Error::Format { line, .. }) => assert_eq!(line, 13),
        _ => panic!("bad code points must be rejected"),
    }

    let missing_property = registry(&[("0061", "PVALID")])
        .replace("<property>PVALID</property>", "");
    assert!(parse_idna_tables(&missing_property).is_err());
}
