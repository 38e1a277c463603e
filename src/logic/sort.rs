//! Comparator table: one stable total order per [`SortKey`].

use std::cmp::Ordering;

use crate::error::Result;
use crate::state::{ResultRecord, SortKey};

/// What: Compute the display order of `records` under `key`.
///
/// Inputs:
/// - `records`: Results in endpoint order
/// - `key`: Active sort key
///
/// Output:
/// - Indices into `records`, a permutation of `0..records.len()`
///
/// # Errors
/// - `UnparseableNumericField` for the first record whose field needed by `key`
///   does not parse. Nothing is reordered in that case.
///
/// Details:
/// - Keys are extracted once per record before sorting, so a bad field is
///   reported up front instead of from inside a comparator.
/// - Uses `slice::sort_by`, which is stable: records comparing equal keep
///   their endpoint order for every key.
pub fn sorted_indices(records: &[ResultRecord], key: SortKey) -> Result<Vec<usize>> {
    match key {
        SortKey::ByName => order_by(records, |r| Ok(r.name.to_lowercase()), String::cmp),
        SortKey::ByVotes => order_by(records, ResultRecord::votes, |a: &u64, b: &u64| b.cmp(a)),
        SortKey::ByPopularity => {
            order_by(records, ResultRecord::popularity_score, |a: &f64, b: &f64| {
                b.total_cmp(a)
            })
        }
        SortKey::ByLastUpdated => {
            order_by(records, ResultRecord::last_modified_at, |a: &i64, b: &i64| {
                b.cmp(a)
            })
        }
        SortKey::ByFirstSubmitted => {
            order_by(records, ResultRecord::first_submitted_at, Ord::cmp)
        }
    }
}

/// What: Return borrowed records in the order `key` defines.
///
/// Inputs:
/// - `records`: Results in endpoint order
/// - `key`: Sort key
///
/// Output:
/// - References into `records`; the records themselves are untouched
///
/// # Errors
/// - Same as [`sorted_indices`]
pub fn sorted<'a>(records: &'a [ResultRecord], key: SortKey) -> Result<Vec<&'a ResultRecord>> {
    Ok(sorted_indices(records, key)?
        .into_iter()
        .map(|i| &records[i])
        .collect())
}

fn order_by<K, E, C>(records: &[ResultRecord], extract: E, cmp: C) -> Result<Vec<usize>>
where
    E: Fn(&ResultRecord) -> Result<K>,
    C: Fn(&K, &K) -> Ordering,
{
    let mut keyed = records
        .iter()
        .enumerate()
        .map(|(i, r)| extract(r).map(|k| (k, i)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|(a, _), (b, _)| cmp(a, b));
    Ok(keyed.into_iter().map(|(_, i)| i).collect())
}
