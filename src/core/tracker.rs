// src/core/tracker.rs
//! Authoritative in-memory per-letter sample counters. Counts are derived
//! from the store at startup and incremented only after a write has been
//! confirmed durable, so they never drift ahead of disk.

use crate::core::types::Letter;
use crate::persistence::SampleStore;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    counts: BTreeMap<Letter, usize>,
    target: usize,
}

impl ProgressTracker {
    /// An empty tracker with every letter at zero.
    pub fn new(target: usize) -> Self {
        Self {
            counts: Letter::all().map(|l| (l, 0)).collect(),
            target,
        }
    }

    /// A tracker seeded with explicit counts (missing letters default to
    /// zero). Used by harnesses and tests to model mid-session state.
    pub fn from_counts(counts: BTreeMap<Letter, usize>, target: usize) -> Self {
        let mut tracker = Self::new(target);
        for (letter, count) in counts {
            tracker.counts.insert(letter, count);
        }
        tracker
    }

    /// Scans the sample store and builds counts for all 26 letters. Absent
    /// or unreadable namespaces come back as zero for that letter only; the
    /// scan itself cannot fail.
    pub fn load(store: &SampleStore, target: usize) -> Self {
        Self { counts: store.scan_counts(), target }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn count(&self, letter: Letter) -> usize {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Read-only view of every letter's count, in alphabetical order.
    pub fn counts(&self) -> &BTreeMap<Letter, usize> {
        &self.counts
    }

    /// Records one confirmed durable write. Call only after the store has
    /// acknowledged the sample; a failed write must not reach here.
    pub fn record_sample(&mut self, letter: Letter) {
        *self.counts.entry(letter).or_insert(0) += 1;
    }

    pub fn total_samples(&self) -> usize {
        self.counts.values().sum()
    }

    /// True once every letter has reached the target. Counts past the target
    /// (external files added outside the app) still read as complete.
    pub fn is_complete(&self) -> bool {
        self.counts.values().all(|&c| c >= self.target)
    }

    /// Remaining samples needed per letter. Letters at or above target are
    /// excluded entirely.
    pub fn deficits(&self) -> Vec<(Letter, usize)> {
        self.counts
            .iter()
            .filter(|&(_, &count)| count < self.target)
            .map(|(&letter, &count)| (letter, self.target - count))
            .collect()
    }
}
