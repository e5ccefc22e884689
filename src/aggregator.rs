//! Aggregator / reporter (spec §4.4).
//!
//! Turns the raw match table into `(scrolls, non_scrolls)`: distances are
//! walked in descending total-matched-line order (ties broken by smaller
//! `|d|`, then positive over negative), each row claimed by at most one
//! distance, and a distance whose post-claim total falls below `min_hits`
//! is dropped and its rows released back to the unclaimed pool.

use std::collections::BTreeMap;

use crate::matcher::MatchRun;

/// `distance -> {start_line -> run_length}`.
pub type ScrollMap = BTreeMap<i64, BTreeMap<usize, usize>>;
/// `{start_line -> run_length}`.
pub type NonScrollMap = BTreeMap<usize, usize>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrollReport {
    pub scrolls: ScrollMap,
    pub non_scrolls: NonScrollMap,
}

/// Sort key matching spec §4.4 step 3: descending total, then ascending
/// `|d|`, then positive `d` before negative `d` when `|d|` ties.
fn sort_key(total: usize, distance: i64) -> (i64, i64, i64) {
    (-(total as i64), distance.abs(), -distance)
}

fn group_by_distance(match_table: &[MatchRun]) -> Vec<(i64, Vec<(usize, usize)>, usize)> {
    let mut by_distance: BTreeMap<i64, Vec<(usize, usize)>> = BTreeMap::new();
    for run in match_table {
        by_distance
            .entry(run.distance)
            .or_default()
            .push((run.start, run.len));
    }
    by_distance
        .into_iter()
        .map(|(d, runs)| {
            let total: usize = runs.iter().map(|(_, len)| len).sum();
            (d, runs, total)
        })
        .collect()
}

/// Split `[start, start+len)` into maximal sub-runs of rows not yet
/// claimed in `claimed`, marking every surviving row claimed as it goes.
fn claim_unclaimed_subruns(claimed: &mut [bool], start: usize, len: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut sub_start: Option<usize> = None;
    for row in start..start + len {
        if !claimed[row] {
            claimed[row] = true;
            if sub_start.is_none() {
                sub_start = Some(row);
            }
        } else if let Some(s) = sub_start.take() {
            out.push((s, row - s));
        }
    }
    if let Some(s) = sub_start {
        out.push((s, start + len - s));
    }
    out
}

/// Build the full `(scrolls, non_scrolls)` report for one `calculate()`
/// result, applying the `min_hits` floor.
pub fn aggregate(match_table: &[MatchRun], h: usize, min_hits: u32) -> ScrollReport {
    let mut groups = group_by_distance(match_table);
    groups.sort_by_key(|(d, _, total)| sort_key(*total, *d));

    let mut claimed = vec![false; h];
    let mut scrolls: ScrollMap = BTreeMap::new();

    for (distance, runs, _total) in groups {
        let mut surviving: Vec<(usize, usize)> = Vec::new();
        for (start, len) in runs {
            surviving.extend(claim_unclaimed_subruns(&mut claimed, start, len));
        }
        let claimed_total: usize = surviving.iter().map(|(_, len)| len).sum();
        if claimed_total == 0 {
            continue;
        }
        if (claimed_total as u64) < min_hits as u64 {
            // Roll back: release these rows so later (smaller) distances or
            // non_scrolls can claim them instead.
            for (start, len) in &surviving {
                for row in *start..*start + *len {
                    claimed[row] = false;
                }
            }
            continue;
        }
        let entry = scrolls.entry(distance).or_default();
        for (start, len) in surviving {
            entry.insert(start, len);
        }
    }

    let non_scrolls = unclaimed_runs(&claimed);
    ScrollReport { scrolls, non_scrolls }
}

fn unclaimed_runs(claimed: &[bool]) -> NonScrollMap {
    let mut out = NonScrollMap::new();
    let mut run_start: Option<usize> = None;
    for (i, &is_claimed) in claimed.iter().enumerate() {
        if is_claimed {
            if let Some(s) = run_start.take() {
                out.insert(s, i - s);
            }
        } else if run_start.is_none() {
            run_start = Some(i);
        }
    }
    if let Some(s) = run_start {
        out.insert(s, claimed.len() - s);
    }
    out
}

/// The single largest aggregate, independent of any `min_hits` floor a
/// caller might apply to `get_scroll_values` (spec §4.4, and the
/// `test_csum_data` fixture which calls this before `get_scroll_values`).
pub fn best_match(match_table: &[MatchRun], h: usize) -> (i64, usize) {
    let report = aggregate(match_table, h, 1);
    report
        .scrolls
        .iter()
        .map(|(d, runs)| (*d, runs.values().sum::<usize>()))
        .min_by_key(|(d, total)| sort_key(*total, *d))
        .unwrap_or((0, 0))
}
