//! Derived rows: sort, then filter.
//!
//! Everything here is pure and works on indices into the caller's record slice, so records are
//! never copied, reordered in place, or mutated.

use crate::column::Column;
use crate::record::Record;
use crate::value::SortKey;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// The active sort key and direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

/// Transient search and sort state of one table instance.
///
/// `sort == None` means unsorted (input order). Once a column has been sorted there is no way
/// back to unsorted short of replacing the state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub sort: Option<SortState>,
}

impl ViewState {
    /// Header-click semantics: a new key sorts ascending, the current key flips direction.
    pub fn toggle_sort(&mut self, key: &str) -> &SortState {
        let direction = match &self.sort {
            Some(s) if s.key == key => s.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.sort.insert(SortState {
            key: key.to_string(),
            direction,
        })
    }

    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|s| s.key == key)
            .map(|s| s.direction)
    }
}

/// Returns record indices in display order for `sort`, or input order when unsorted.
///
/// Values of one kind are ordered in `sort.direction`. Kinds stay grouped (numbers, text,
/// booleans) with unordered values last in input order, whichever the direction.
pub fn sort_indices(records: &[Record], sort: Option<&SortState>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    if let Some(sort) = sort {
        let keys: Vec<SortKey<'_>> = records
            .iter()
            .map(|r| SortKey::of(r.get(&sort.key)))
            .collect();
        indices.sort_by(|&a, &b| {
            let (a, b) = (&keys[a], &keys[b]);
            if a.same_kind(b) {
                sort.direction.apply(a.cmp(b))
            } else {
                a.cmp(b)
            }
        });
    }
    indices
}

/// Whether any column of `record` contains `term`, case-insensitively.
///
/// `term` must already be lowercased. An empty term matches every record.
pub fn record_matches(record: &Record, columns: &[Column], term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    columns.iter().any(|column| {
        record
            .get(&column.key)
            .and_then(|v| v.to_search_text())
            .is_some_and(|text| text.to_lowercase().contains(term))
    })
}

/// Keeps the indices whose records match `term`, preserving order.
pub fn filter_indices(
    records: &[Record],
    columns: &[Column],
    indices: Vec<usize>,
    term: &str,
) -> Vec<usize> {
    let term = term.to_lowercase();
    indices
        .into_iter()
        .filter(|&i| record_matches(&records[i], columns, &term))
        .collect()
}

/// Full sort → filter derivation for `state`.
pub fn derive_rows(records: &[Record], columns: &[Column], state: &ViewState) -> Vec<usize> {
    let sorted = sort_indices(records, state.sort.as_ref());
    let rows = filter_indices(records, columns, sorted, &state.search_term);
    log::trace!(
        "derived {} of {} rows (term={:?}, sort={:?})",
        rows.len(),
        records.len(),
        state.search_term,
        state.sort
    );
    rows
}
