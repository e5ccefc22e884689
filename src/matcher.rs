//! Distance matcher (spec §4.3).
//!
//! For every candidate shift `d` in `[-D, D]` (`D = min(max_distance, h-1)`),
//! walks the rows looking for `current[i] == previous[i - d]` — row `i` of
//! the new frame holding the same content as the row `d` lines above it in
//! the old frame — and groups the hits into maximal contiguous runs of at
//! least `min_line_count` rows.
//!
//! Flat-band suppression: a row pair that matches *only* because both
//! sides sit inside a run of repeated hashes (a uniform-colour band) is not
//! treated as a match at any non-zero distance — it would otherwise match
//! every distance trivially and dominate the aggregator. At distance 0 no
//! suppression applies; identical content genuinely didn't move.

/// One contiguous run of rows that matched at a given distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRun {
    pub distance: i64,
    pub start: usize,
    pub len: usize,
}

#[inline]
fn is_repeat(hashes: &[u64], idx: usize) -> bool {
    idx > 0 && hashes[idx] == hashes[idx - 1]
}

/// A match at `(i, j)` where both sides are interior to a repeated-hash
/// band is a "self-match" of a flat region rather than genuine scroll
/// content; see spec §4.3 / §9.
#[inline]
fn is_flat_match(current: &[u64], previous: &[u64], i: usize, j: usize) -> bool {
    is_repeat(current, i) && is_repeat(previous, j)
}

/// Build the full match table for every distance in `[-D, D]`.
///
/// `max_distance` is assumed already validated non-negative by the caller;
/// it is clamped here to `h - 1`.
pub fn compute_match_table(
    previous: &[u64],
    current: &[u64],
    max_distance: i64,
    min_line_count: usize,
) -> Vec<MatchRun> {
    let h = current.len();
    if h == 0 {
        return Vec::new();
    }
    let d_max = max_distance.min((h - 1) as i64).max(0);

    let mut runs = Vec::new();
    for d in -d_max..=d_max {
        let mut run_start: Option<usize> = None;
        for i in 0..h {
            let j = i as i64 - d;
            let matched = if j < 0 || j as usize >= h {
                false
            } else {
                let j = j as usize;
                let hashes_equal = current[i] == previous[j];
                hashes_equal && !(d != 0 && is_flat_match(current, previous, i, j))
            };
            if matched {
                if run_start.is_none() {
                    run_start = Some(i);
                }
            } else if let Some(start) = run_start.take() {
                push_run(&mut runs, d, start, i - start, min_line_count);
            }
        }
        if let Some(start) = run_start {
            push_run(&mut runs, d, start, h - start, min_line_count);
        }
    }
    runs
}

#[inline]
fn push_run(runs: &mut Vec<MatchRun>, distance: i64, start: usize, len: usize, min_line_count: usize) {
    if len >= min_line_count {
        runs.push(MatchRun { distance, start, len });
    }
}
