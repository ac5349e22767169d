//! Strided-matrix reshaping.
//!
//! A stride matrix is a tokenized table in which every entity occupies a
//! fixed-width group of fields at a fixed stride, repeated identically on
//! every row:
//!
//! ```text
//! token:  0 .. offset-1 | offset .. offset+width | ... stride ... | next slot
//!         row preamble  | slot 0 (key, f1, f2)  |                | slot 1
//! ```
//!
//! The layout is declared once as a [`StrideSchema`]; [`reshape`] turns a
//! header row plus data rows into per-key field groups in row order.

use serde::{Deserialize, Serialize};

/// Layout of one stride matrix row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrideSchema {
    /// Index of the first slot's key token.
    pub offset: usize,
    /// Distance between consecutive slot keys.
    pub stride: usize,
    /// Number of tokens in one slot, key included.
    pub width: usize,
}

impl StrideSchema {
    pub const fn new(offset: usize, stride: usize, width: usize) -> Self {
        Self {
            offset,
            stride,
            width,
        }
    }

    /// Effective stride; a zero stride reads as adjacent slots.
    fn step(&self) -> usize {
        self.stride.max(1)
    }

    fn slot_start(&self, slot: usize) -> Option<usize> {
        slot.checked_mul(self.step())?.checked_add(self.offset)
    }

    /// Returns the key token of every slot that starts inside `row`.
    pub fn keys<'a, T>(&self, row: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        (self.offset..row.len()).step_by(self.step()).map(move |i| &row[i])
    }

    /// Returns the full field group of `slot`, or `None` when any of its
    /// `width` tokens lies outside the row.
    pub fn slot<'a, T>(&self, row: &'a [T], slot: usize) -> Option<&'a [T]> {
        let start = self.slot_start(slot)?;
        let end = start.checked_add(self.width)?;
        row.get(start..end)
    }
}

/// Result of reshaping a stride matrix.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reshaped<'a> {
    /// Field groups per header key, in header order; groups in row order.
    pub groups: Vec<(&'a str, Vec<&'a [&'a str]>)>,
    /// Slots that fell outside a short row.
    pub out_of_bounds: usize,
    /// In-bounds slots whose key is not a header key.
    pub unknown_keys: usize,
}

impl<'a> Reshaped<'a> {
    /// Returns the field groups collected for `key`.
    pub fn get(&self, key: &str) -> Option<&[&'a [&'a str]]> {
        self.groups
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, g)| g.as_slice())
    }
}

/// Reshapes `rows` into per-key field groups using the keys of `header`.
///
/// Header keys are deduplicated in first-seen order. Every row is probed at
/// slots `0..keys.len()`; a slot is attributed to the key found in the row
/// itself, so rows whose entity order differs from the header still land on
/// the right key. Slots that do not fit the row, or carry a key the header
/// does not know, are counted and skipped.
pub fn reshape<'a>(
    schema: &StrideSchema,
    header: &[&'a str],
    rows: &'a [Vec<&'a str>],
) -> Reshaped<'a> {
    let mut out = Reshaped::default();

    for key in schema.keys(header) {
        if !out.groups.iter().any(|(k, _)| k == key) {
            out.groups.push((*key, Vec::new()));
        }
    }

    let slots = out.groups.len();
    for row in rows {
        for slot in 0..slots {
            let Some(fields) = schema.slot(row, slot) else {
                out.out_of_bounds += 1;
                continue;
            };
            match out.groups.iter_mut().find(|(k, _)| *k == fields[0]) {
                Some((_, groups)) => groups.push(fields),
                None => out.unknown_keys += 1,
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: StrideSchema = StrideSchema::new(5, 10, 3);

    fn row(preamble: &[&'static str], slots: &[[&'static str; 3]]) -> Vec<&'static str> {
        let mut tokens: Vec<&str> = preamble.to_vec();
        for slot in slots {
            tokens.extend_from_slice(slot);
            tokens.extend_from_slice(&["-", "-", "-", "-", "-", "-", "-"]);
        }
        tokens
    }

    const PREAMBLE: [&str; 5] = ["Aggregate", "kbytes", "used", "avail", "capacity"];

    #[test]
    fn test_keys_at_stride() {
        let header = row(&PREAMBLE, &[["aggr1", "10", "1"], ["aggr2", "20", "2"]]);
        let keys: Vec<&&str> = SCHEMA.keys(&header).collect();
        assert_eq!(keys, vec![&"aggr1", &"aggr2"]);
    }

    #[test]
    fn test_slot_bounds() {
        let header = row(&PREAMBLE, &[["aggr1", "10", "1"]]);
        assert_eq!(SCHEMA.slot(&header, 0), Some(&["aggr1", "10", "1"][..]));
        assert_eq!(SCHEMA.slot(&header, 1), None);

        // Slot start inside the row but its tail outside.
        let short = vec!["a", "b", "c", "d", "e", "aggr1", "10"];
        assert_eq!(SCHEMA.slot(&short, 0), None);
    }

    #[test]
    fn test_zero_stride_does_not_panic() {
        let schema = StrideSchema::new(0, 0, 1);
        let keys: Vec<&&str> = schema.keys(&["a", "b"]).collect();
        assert_eq!(keys, vec![&"a", &"b"]);
    }

    #[test]
    fn test_zero_stride_slots_match_keys() {
        let schema = StrideSchema::new(0, 0, 1);
        let rows = vec![vec!["a", "b"], vec!["a", "b"]];
        let header = rows[0].clone();
        let shaped = reshape(&schema, &header, &rows);

        assert_eq!(shaped.get("a").unwrap(), &vec![&["a"][..], &["a"][..]]);
        assert_eq!(shaped.get("b").unwrap(), &vec![&["b"][..], &["b"][..]]);
        assert_eq!(shaped.unknown_keys, 0);
    }

    #[test]
    fn test_reshape_groups_in_row_order() {
        let rows = vec![
            row(&PREAMBLE, &[["aggr1", "10", "1000"], ["aggr2", "20", "2000"]]),
            row(&PREAMBLE, &[["aggr1", "10", "1100"], ["aggr2", "20", "1900"]]),
        ];
        let header = rows[0].clone();
        let shaped = reshape(&SCHEMA, &header, &rows);

        let aggr1: Vec<&str> = shaped.get("aggr1").unwrap().iter().map(|g| g[2]).collect();
        let aggr2: Vec<&str> = shaped.get("aggr2").unwrap().iter().map(|g| g[2]).collect();
        assert_eq!(aggr1, vec!["1000", "1100"]);
        assert_eq!(aggr2, vec!["2000", "1900"]);
        assert_eq!(shaped.out_of_bounds, 0);
        assert_eq!(shaped.unknown_keys, 0);
    }

    #[test]
    fn test_reshape_short_row_and_unknown_key() {
        let mut partial = row(&PREAMBLE, &[["aggr1", "10", "900"]]);
        partial.extend_from_slice(&["aggr2", "20"]);
        let rows = vec![
            row(&PREAMBLE, &[["aggr1", "10", "1000"], ["aggr2", "20", "2000"]]),
            partial,
            row(&PREAMBLE, &[["ghost", "10", "5"], ["aggr2", "20", "1800"]]),
        ];
        let header = rows[0].clone();
        let shaped = reshape(&SCHEMA, &header, &rows);

        assert_eq!(shaped.get("aggr1").unwrap().len(), 2);
        assert_eq!(shaped.get("aggr2").unwrap().len(), 2);
        assert_eq!(shaped.out_of_bounds, 1);
        assert_eq!(shaped.unknown_keys, 1);
        assert!(shaped.get("ghost").is_none());
    }
}
