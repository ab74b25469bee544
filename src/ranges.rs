//! Re-encoding of code point sets as ordered runs of consecutive code points.
//!
//! A set such as `{0x370, 0x371, 0x372, 0x375}` is stored as the two runs
//! `0x370..=0x372` and `0x375`.  The encoding is the unique minimal partition of
//! the set into maximal contiguous stretches: runs are disjoint, ascending, and
//! no two adjacent runs could be merged into one.

use std::ops::RangeInclusive;

use itertools::Itertools;
use proc_macro2::Span;
use quote::quote;

use crate::types::{CodePoint, CodePointSet};

/// A maximal stretch of consecutive code points in a set.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Run {
    Single(CodePoint),
    /// A closed interval; `start() < end()` always holds.
    Range(RangeInclusive<CodePoint>),
}

impl Run {
    pub fn first(&self) -> CodePoint {
        match self {
            Run::Single(code_point) => *code_point,
            Run::Range(range) => *range.start(),
        }
    }

    pub fn last(&self) -> CodePoint {
        match self {
            Run::Single(code_point) => *code_point,
            Run::Range(range) => *range.end(),
        }
    }

    /// Number of code points covered.
    pub fn len(&self) -> usize {
        (self.last() - self.first()) as usize + 1
    }

    pub fn contains(&self, code_point: CodePoint) -> bool {
        self.first() <= code_point && code_point <= self.last()
    }

    pub fn code_points(&self) -> RangeInclusive<CodePoint> {
        self.first()..=self.last()
    }
}

/// A code point written the way the Unicode data files write it: upper-case
/// hexadecimal, at least four digits.
pub fn hex_literal(code_point: CodePoint) -> syn::LitInt {
    syn::LitInt::new(&format!("0x{:04X}", code_point), Span::call_site())
}

impl quote::ToTokens for Run {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let code = match self {
            Run::Single(code_point) => {
                let code_point = hex_literal(*code_point);
                quote! { Run::Single(#code_point) }
            }
            Run::Range(range) => {
                let start = hex_literal(*range.start());
                let end = hex_literal(*range.end());
                quote! { Run::Range(#start..=#end) }
            }
        };
        tokens.extend(code);
    }
}

/// Compute the minimal ordered sequence of runs covering exactly `set`.
pub fn compact(set: &CodePointSet) -> Vec<Run> {
    let code_points = set.iter().copied().sorted_unstable().collect::<Vec<_>>();

    let mut runs = vec![];

    // Index into `code_points` where the pending run begins; the pending run
    // is `code_points[start..i + 1]`.
    let mut start = 0;

    for i in 0..code_points.len() {
        let continues = code_points
            .get(i + 1)
            .map_or(false, |&next| code_points[i].checked_add(1) == Some(next));
        if continues {
            continue;
        }

        let run = &code_points[start..i + 1];
        runs.push(if run.len() == 1 {
            Run::Single(run[0])
        } else {
            Run::Range(run[0]..=run[run.len() - 1])
        });
        start = i + 1;
    }

    runs
}

/// Every code point covered by `runs`, in order.
pub fn expand(runs: &[Run]) -> impl Iterator<Item = CodePoint> + '_ {
    runs.iter().flat_map(Run::code_points)
}

#[cfg(test)]
fn set_of(code_points: &[CodePoint]) -> CodePointSet {
    code_points.iter().copied().collect()
}

#[cfg(test)]
fn assert_minimal_partition(set: &CodePointSet, runs: &[Run]) {
    assert_eq!(expand(runs).collect::<CodePointSet>(), *set, "round trip");
    assert_eq!(expand(runs).count(), set.len(), "runs overlap");

    for run in runs {
        if let Run::Range(range) = run {
            assert!(range.start() < range.end(), "degenerate range {:?}", range);
        }
    }

    for (a, b) in runs.iter().tuple_windows() {
        assert!(a.last() < b.first(), "{:?} and {:?} out of order", a, b);
        assert!(a.last() + 1 < b.first(), "{:?} and {:?} are mergeable", a, b);
    }
}

#[test]
fn compact_empty() {
    assert!(compact(&CodePointSet::new()).is_empty());
}

#[test]
fn compact_single() {
    assert_eq!(compact(&set_of(&[0x3B1])), [Run::Single(0x3B1)]);
}

#[test]
fn compact_contiguous() {
    let runs = compact(&set_of(&[8, 6, 5, 7]));
    assert_eq!(runs, [Run::Range(5..=8)]);
    assert_eq!(expand(&runs).collect::<Vec<_>>(), [5, 6, 7, 8]);
}

#[test]
fn compact_mixed() {
    let set = set_of(&[0x375, 0x370, 0x371, 0x372, 0x37A, 0x37B, 0x384]);
    let runs = compact(&set);
    assert_eq!(
        runs,
        [
            Run::Range(0x370..=0x372),
            Run::Single(0x375),
            Run::Range(0x37A..=0x37B),
            Run::Single(0x384),
        ]
    );
    assert_minimal_partition(&set, &runs);
}

#[test]
fn compact_at_the_edges() {
    let set = set_of(&[0, 1, u32::MAX - 1, u32::MAX]);
    let runs = compact(&set);
    assert_eq!(runs, [Run::Range(0..=1), Run::Range(u32::MAX - 1..=u32::MAX)]);
}

#[test]
fn compact_is_minimal_for_many_sets() {
    // Sets built from a simple linear congruential sequence, so that runs of
    // every length show up.
    let mut state = 0x2545_F491u32;
    for size in 0..200 {
        let set = (0..size)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 16) % 256
            })
            .collect::<CodePointSet>();
        let runs = compact(&set);
        assert_minimal_partition(&set, &runs);
    }
}

#[test]
fn run_accessors() {
    let run = Run::Range(0x61..=0x7A);
    assert_eq!(run.len(), 26);
    assert!(run.contains(0x61));
    assert!(run.contains(0x7A));
    assert!(!run.contains(0x7B));
    assert_eq!(Run::Single(0x3B1).len(), 1);
}

#[test]
fn run_tokens() {
    use quote::ToTokens;

    let single = Run::Single(0x3B1).into_token_stream().to_string();
    assert_eq!(single, "Run :: Single (0x03B1)");

    let range = Run::Range(0x4E00..=0x9FCC).into_token_stream().to_string();
    assert_eq!(range, "Run :: Range (0x4E00 ..= 0x9FCC)");
}
