//! Predicate filtering over projected records.
//!
//! Filtering is order-preserving and side-effect free. The threshold form
//! [`filter_below`] compares numerically and uses strict less-than; a record
//! whose field is absent or non-numeric is excluded, never an error.

use crate::record::{Record, numeric_field};

/// Returns the records for which `predicate` returns `true`, in their
/// original order.
pub fn filter_records<F>(records: &[Record], mut predicate: F) -> Vec<Record>
where
    F: FnMut(&Record) -> bool,
{
    records.iter().filter(|r| predicate(r)).cloned().collect()
}

/// Returns the records whose numeric `field` is strictly less than
/// `threshold`, in their original order.
pub fn filter_below(records: &[Record], field: &str, threshold: f64) -> Vec<Record> {
    filter_records(records, |record| {
        matches!(numeric_field(record, field), Some(value) if value < threshold)
    })
}
