//! Common types used across this crate, with meaning not defined within a
//! specific module.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;

use indexmap::IndexMap;

/// A Unicode code point value.
pub type CodePoint = u32;

/// The largest valid code point.
pub const MAX_CODE_POINT: CodePoint = 0x10_FFFF;

/// A set of code point values.
pub type CodePointSet = HashSet<CodePoint>;

/// The key under which code points are grouped: a script name (`Greek`), a
/// joining type (`D`) or an IDNA property class (`PVALID`).
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    pub fn new<S: Into<String>>(label: S) -> Label {
        Label(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(label: &str) -> Label {
        Label::new(label)
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.0)
    }
}

/// A mapping keyed by [`Label`] that iterates in insertion order.
///
/// Each table decides what that order is: the script table inserts in
/// whitelist order, the IDNA property table in the order classes are first
/// seen in the registry.
pub type LabelMap<V> = IndexMap<Label, V>;

/// A single parsed record: every code point in `range` carries `label`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledRange {
    pub range: RangeInclusive<CodePoint>,
    pub label: Label,
}

/// Fold parsed records into one code point set per label.  Labels appear in
/// the order of the first record mentioning them.
pub fn group_by_label<I>(records: I) -> LabelMap<CodePointSet>
where
    I: IntoIterator<Item = LabeledRange>,
{
    records
        .into_iter()
        .fold(LabelMap::new(), |mut sets, LabeledRange { range, label }| {
            sets.entry(label).or_insert_with(CodePointSet::new).extend(range);
            sets
        })
}

#[test]
fn group_by_label_keeps_first_seen_order() {
    let records = vec![
        LabeledRange {
            range: 0x61..=0x63,
            label: "PVALID".into(),
        },
        LabeledRange {
            range: 0x200C..=0x200D,
            label: "CONTEXTJ".into(),
        },
        LabeledRange {
            range: 0x30..=0x30,
            label: "PVALID".into(),
        },
    ];

    let sets = group_by_label(records);
    let labels = sets.keys().map(Label::as_str).collect::<Vec<_>>();
    assert_eq!(labels, ["PVALID", "CONTEXTJ"]);

    let pvalid = &sets["PVALID"];
    assert_eq!(pvalid.len(), 4);
    assert!(pvalid.contains(&0x30));
    assert!(pvalid.contains(&0x62));
    assert_eq!(sets["CONTEXTJ"].len(), 2);
}

#[test]
fn group_by_label_merges_overlapping_records() {
    let records = vec![
        LabeledRange {
            range: 0x370..=0x373,
            label: "Greek".into(),
        },
        LabeledRange {
            range: 0x372..=0x375,
            label: "Greek".into(),
        },
    ];

    let sets = group_by_label(records);
    assert_eq!(sets.len(), 1);
    assert_eq!(sets["Greek"].len(), 6);
}
