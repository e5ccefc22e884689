//! Row-hash based scroll-motion detector for a remote-desktop
//! screen-update pipeline.
//!
//! Given two successive raster images of the same rectangle, identifies
//! rows that moved vertically between frames and reports them as
//! `(distance, start_line, line_count)` triples so a caller can emit a
//! cheap "scroll region" instruction instead of re-encoding those pixels.
//! Remaining rows are reported as non-scroll so the caller can re-encode
//! them normally.
//!
//! This crate is a pure library: no image decoding, no compression, no
//! network framing, no concurrency orchestration, and no persistent state
//! beyond the one-frame "previous" buffer. The caller (a screen-scraping
//! layer and a packet serializer) is responsible for everything upstream
//! and downstream of the four operations below. A caller typically turns
//! one scroll entry `(distance, start, count)` for rectangle `(x, y, w, h)`
//! into a wire tuple shaped like `(x, y + start, w, count, 0, distance)`;
//! building and sending that tuple is outside this crate's scope.
//!
//! Pipeline: pixels -> row hasher ([`row_hash`]) -> hash history
//! ([`history`]) -> distance matcher ([`matcher`]) -> aggregator
//! ([`aggregator`]) -> caller. There is no feedback loop; each
//! [`ScrollDetector`] instance is single-threaded and bound to one
//! rectangle for its whole lifetime.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod history;
pub mod matcher;
pub mod rect;
pub mod row_hash;

pub use aggregator::{NonScrollMap, ScrollMap};
pub use config::DetectorConfig;
pub use error::MotionError;
pub use rect::Rectangle;

use history::HashHistory;
use matcher::MatchRun;

/// Minimum run length the matcher will ever emit (spec §6/§8); a smaller
/// run is assumed to be hash-collision noise rather than real motion.
pub const MIN_LINE_COUNT: usize = 2;

/// A stateful scroll-motion detector bound to one rectangle.
///
/// See the crate-level docs for the pipeline and [`spec.md`] / `SPEC_FULL.md`
/// in the repository root for the full design rationale.
#[derive(Debug)]
pub struct ScrollDetector {
    rect: Rectangle,
    config: DetectorConfig,
    history: HashHistory,
    match_table: Vec<MatchRun>,
}

impl ScrollDetector {
    /// Construct a detector bound to `(x, y, w, h)` with default config
    /// (`min_hits = 2`, `min_line_count = MIN_LINE_COUNT`, `max_distance =
    /// h - 1`).
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Result<Self, MotionError> {
        Self::with_config(x, y, w, h, DetectorConfig::default())
    }

    /// Construct a detector with an explicit [`DetectorConfig`].
    pub fn with_config(
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        config: DetectorConfig,
    ) -> Result<Self, MotionError> {
        let rect = Rectangle::new(x, y, w, h)?;
        Ok(Self {
            rect,
            config,
            history: HashHistory::new(rect.h as usize),
            match_table: Vec::new(),
        })
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    /// True once two frames have been ingested (spec §4.4 state machine).
    pub fn is_ready(&self) -> bool {
        self.history.is_ready()
    }

    /// Ingest a new frame's pixels. The geometry arguments must match the
    /// rectangle this detector was constructed with.
    pub fn update(
        &mut self,
        pixels: &[u8],
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        stride: usize,
        bpp: usize,
    ) -> Result<(), MotionError> {
        if (x, y, w, h) != (self.rect.x, self.rect.y, self.rect.w, self.rect.h) {
            return Err(MotionError::InvalidGeometry(
                "update geometry does not match the rectangle this detector was built with",
            ));
        }
        let hashes = row_hash::hash_rows(pixels, x, y, w, h, stride, bpp)?;
        tracing::trace!(
            target: "scroll_motion",
            x, y, w, h, stride, bpp,
            "update: hashed new frame from pixels"
        );
        self.history.ingest(hashes)
    }

    /// Test hook (spec §4.5): ingest precomputed row hashes directly,
    /// bypassing the row hasher. `hashes.len()` must equal the rectangle's
    /// `h`.
    pub fn test_update(&mut self, hashes: &[u64]) -> Result<(), MotionError> {
        tracing::trace!(
            target: "scroll_motion",
            len = hashes.len(),
            "test_update: ingested precomputed hashes"
        );
        self.history.ingest(hashes.to_vec())
    }

    /// Recompute the match table for the current (previous, current) pair.
    /// A no-op (empty table) when fewer than two frames have been
    /// ingested. `max_distance`, if given, must be non-negative.
    pub fn calculate(&mut self, max_distance: Option<i64>) -> Result<(), MotionError> {
        if let Some(d) = max_distance {
            if d < 0 {
                return Err(MotionError::InvalidInput(
                    "max_distance must not be negative",
                ));
            }
        }
        let (previous, current) = match (self.history.previous(), self.history.current()) {
            (Some(previous), Some(current)) => (previous, current),
            _ => {
                self.match_table.clear();
                return Ok(());
            }
        };
        let h = self.rect.h as usize;
        let effective = self.config.effective_max_distance(h, max_distance);
        self.match_table =
            matcher::compute_match_table(previous, current, effective, self.config.min_line_count);
        tracing::debug!(
            target: "scroll_motion",
            max_distance = effective,
            candidate_distances = 2 * effective as u64 + 1,
            runs = self.match_table.len(),
            "calculate: rebuilt match table"
        );
        Ok(())
    }

    /// Aggregate the current match table into `(scrolls, non_scrolls)`.
    /// Returns empty maps if `calculate` has never run on a ready pair of
    /// frames.
    pub fn get_scroll_values(&self, min_hits: Option<u32>) -> (ScrollMap, NonScrollMap) {
        let h = self.rect.h as usize;
        let effective_min_hits = self.config.effective_min_hits(min_hits);
        let report = aggregator::aggregate(&self.match_table, h, effective_min_hits);
        tracing::debug!(
            target: "scroll_motion",
            min_hits = effective_min_hits,
            claimed_distances = report.scrolls.len(),
            claimed_lines = report.scrolls.values().map(|m| m.values().sum::<usize>()).sum::<usize>(),
            non_scroll_runs = report.non_scrolls.len(),
            "get_scroll_values: aggregated match table"
        );
        (report.scrolls, report.non_scrolls)
    }

    /// The single distance with the largest aggregate run total, computed
    /// independently of any `min_hits` a caller might later pass to
    /// `get_scroll_values`. Returns `(0, 0)` when no runs survive.
    pub fn get_best_match(&self) -> (i64, usize) {
        aggregator::best_match(&self.match_table, self.rect.h as usize)
    }
}
