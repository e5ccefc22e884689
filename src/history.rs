//! Hash history (spec §4.2): the previous/current row-hash vectors.
//!
//! `ingest` is the single mutation point shared by both the pixel-hashing
//! path (`ScrollDetector::update`) and the test hook
//! (`ScrollDetector::test_update`) — it validates length before touching
//! any state, so a rejected call never leaves the detector partially
//! advanced (spec §8 "Rejection").

use crate::error::MotionError;

#[derive(Debug, Default)]
pub struct HashHistory {
    h: usize,
    previous: Option<Vec<u64>>,
    current: Option<Vec<u64>>,
}

impl HashHistory {
    pub fn new(h: usize) -> Self {
        Self {
            h,
            previous: None,
            current: None,
        }
    }

    /// Shift `current` into `previous` and adopt `hashes` as the new
    /// `current`. Rejects (without mutating anything) if the length
    /// doesn't match the rectangle's `h`.
    pub fn ingest(&mut self, hashes: Vec<u64>) -> Result<(), MotionError> {
        if hashes.len() != self.h {
            return Err(MotionError::InvalidGeometry(
                "hash vector length does not match the rectangle height",
            ));
        }
        self.previous = self.current.take();
        self.current = Some(hashes);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.previous.is_some() && self.current.is_some()
    }

    pub fn previous(&self) -> Option<&[u64]> {
        self.previous.as_deref()
    }

    pub fn current(&self) -> Option<&[u64]> {
        self.current.as_deref()
    }
}
