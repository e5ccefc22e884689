//! In-memory detector configuration (SPEC_FULL "Configuration").
//!
//! The detector has no file I/O of its own; this mirrors the
//! raw-value-plus-effective-value split `core-config`'s `ConfigContext`
//! uses for viewport-dependent clamping, just without the TOML layer.

/// Per-call defaults for [`crate::ScrollDetector::calculate`] and
/// [`crate::ScrollDetector::get_scroll_values`].
///
/// `max_distance: None` means "use `h - 1`"; `min_hits`/`min_line_count`
/// default to the module constants documented in spec §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    pub max_distance: Option<i64>,
    pub min_hits: u32,
    pub min_line_count: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_distance: None,
            min_hits: 2,
            min_line_count: crate::MIN_LINE_COUNT,
        }
    }
}

impl DetectorConfig {
    /// Clamp a configured (or per-call override) `max_distance` against the
    /// rectangle height, the way `ConfigContext` clamps a margin against
    /// viewport rows.
    pub fn effective_max_distance(&self, h: usize, override_distance: Option<i64>) -> i64 {
        let requested = override_distance.or(self.max_distance);
        let ceiling = h.saturating_sub(1) as i64;
        match requested {
            Some(d) => d.min(ceiling),
            None => ceiling,
        }
    }

    pub fn effective_min_hits(&self, override_hits: Option<u32>) -> u32 {
        override_hits.unwrap_or(self.min_hits)
    }
}
