// src/core/engine.rs
//! The collection engine ties the pieces together and drives the
//! capture -> normalize -> persist -> record -> advance sequence. It holds
//! `&mut self` across sequence-number assignment and the write, so per-letter
//! numbering is a single critical section.

use crate::core::catalog::WordCatalog;
use crate::core::selection::{SelectionEngine, SelectionOutcome};
use crate::core::tracker::ProgressTracker;
use crate::core::types::{Letter, Prompt, PromptMode, StrokeDrawing, DEFAULT_TARGET_COUNT};
use crate::errors::{CaptureError, SaveError};
use crate::persistence::SampleStore;
use crate::raster;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::path::Path;

pub struct CollectionEngine {
    store: SampleStore,
    tracker: ProgressTracker,
    selection: SelectionEngine,
    rng: StdRng,
}

/// Read-only projection of the session for a UI to render. Queried, not
/// observed: callers pull a fresh snapshot after each mutation.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub total_samples: usize,
    pub target_count: usize,
    pub counts: BTreeMap<Letter, usize>,
    pub complete: bool,
    pub current_prompt: Option<Prompt>,
}

/// Per-letter outcome of a batch word save. Partial success is normal: the
/// tracker reflects exactly the successful cells.
#[derive(Debug)]
pub struct LetterSaveOutcome {
    pub letter: Letter,
    pub result: Result<u32, SaveError>,
}

impl CollectionEngine {
    pub fn new(store: SampleStore, target: usize, mode: PromptMode, seed: Option<u64>) -> Self {
        let tracker = ProgressTracker::load(&store, target);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            tracker,
            selection: SelectionEngine::new(WordCatalog::new(), mode),
            rng,
        }
    }

    /// A word-mode session over the store rooted at `root`, with the default
    /// target of 100 samples per letter.
    pub fn open(root: impl AsRef<Path>) -> Self {
        Self::new(SampleStore::new(root.as_ref()), DEFAULT_TARGET_COUNT, PromptMode::Word, None)
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    pub fn mode(&self) -> PromptMode {
        self.selection.mode()
    }

    pub fn set_mode(&mut self, mode: PromptMode) {
        self.selection.set_mode(mode);
    }

    pub fn current_prompt(&self) -> Option<&Prompt> {
        self.selection.current_prompt()
    }

    /// Normalizes and durably stores one letter's ink, then counts it.
    /// Returns the assigned sequence number. On any failure nothing is
    /// stored and the tracker is untouched; the caller may retry with the
    /// same prompt.
    pub fn save_letter(&mut self, letter: Letter, drawing: &StrokeDrawing) -> Result<u32, SaveError> {
        let sample = raster::render_sample(drawing)?;
        let sequence = self.store.next_sequence_number(letter);
        self.store.persist(letter, sequence, &sample)?;
        self.tracker.record_sample(letter);
        Ok(sequence)
    }

    /// Saves one drawing per letter of a word, in order. Every cell is
    /// attempted; failures are enumerated per letter rather than collapsed,
    /// and only the successful cells are counted. A missing drawing for a
    /// cell is reported as an empty capture.
    pub fn save_word(&mut self, word: &str, drawings: &[StrokeDrawing]) -> Vec<LetterSaveOutcome> {
        let mut outcomes = Vec::new();
        for (i, letter) in word.chars().filter_map(Letter::new).enumerate() {
            let result = match drawings.get(i) {
                Some(drawing) => self.save_letter(letter, drawing),
                None => Err(CaptureError::EmptyCapture.into()),
            };
            outcomes.push(LetterSaveOutcome { letter, result });
        }
        outcomes
    }

    /// Picks the next prompt. Called by the UI after a save (or an explicit
    /// skip); prompts never change on their own.
    pub fn advance(&mut self) -> (Prompt, SelectionOutcome) {
        self.selection.advance(&self.tracker, &mut self.rng)
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            total_samples: self.tracker.total_samples(),
            target_count: self.tracker.target(),
            counts: self.tracker.counts().clone(),
            complete: self.tracker.is_complete(),
            current_prompt: self.selection.current_prompt().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Stroke, StrokePoint};
    use crate::errors::StoreError;

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    fn inked() -> StrokeDrawing {
        StrokeDrawing::new(vec![Stroke::new(vec![
            StrokePoint { x: 50.0, y: 50.0 },
            StrokePoint { x: 150.0, y: 250.0 },
            StrokePoint { x: 250.0, y: 50.0 },
        ])])
    }

    fn engine_in(dir: &tempfile::TempDir) -> CollectionEngine {
        CollectionEngine::new(SampleStore::new(dir.path()), 3, PromptMode::Word, Some(17))
    }

    #[test]
    fn save_letter_persists_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);

        let seq = engine.save_letter(letter('A'), &inked()).unwrap();
        assert_eq!(seq, 1);
        assert!(dir.path().join("A").join("A_0001.png").is_file());
        assert_eq!(engine.tracker().count(letter('A')), 1);
        assert_eq!(engine.status().total_samples, 1);

        let seq = engine.save_letter(letter('A'), &inked()).unwrap();
        assert_eq!(seq, 2);
    }

    #[test]
    fn empty_capture_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);

        let err = engine.save_letter(letter('B'), &StrokeDrawing::default()).unwrap_err();
        assert!(matches!(err, SaveError::Capture(CaptureError::EmptyCapture)));
        assert_eq!(engine.tracker().count(letter('B')), 0);
        assert!(!dir.path().join("B").exists());
    }

    #[test]
    fn word_batch_counts_only_successful_cells() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);

        // Cells 2 and 4 of PIZZA are left blank and must fail individually.
        let drawings = vec![
            inked(),
            StrokeDrawing::default(),
            inked(),
            StrokeDrawing::default(),
            inked(),
        ];
        let outcomes = engine.save_word("PIZZA", &drawings);
        assert_eq!(outcomes.len(), 5);

        let ok: Vec<char> = outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| o.letter.as_char())
            .collect();
        assert_eq!(ok, vec!['P', 'Z', 'A']);

        assert_eq!(engine.tracker().count(letter('P')), 1);
        assert_eq!(engine.tracker().count(letter('I')), 0);
        assert_eq!(engine.tracker().count(letter('Z')), 1);
        assert_eq!(engine.tracker().count(letter('A')), 1);
        assert_eq!(engine.tracker().total_samples(), 3);
    }

    #[test]
    fn word_batch_survives_store_failures() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);

        // Regular files squatting on the R and E namespaces force real
        // store failures for those cells; the other three still land.
        std::fs::write(dir.path().join("R"), b"squatter").unwrap();
        std::fs::write(dir.path().join("E"), b"squatter").unwrap();

        let drawings = vec![inked(); 5];
        let outcomes = engine.save_word("BREAD", &drawings);
        assert_eq!(outcomes.len(), 5);

        for outcome in &outcomes {
            match outcome.letter.as_char() {
                'R' | 'E' => assert!(matches!(
                    outcome.result,
                    Err(SaveError::Store(StoreError::DirectoryCreate(_)))
                )),
                _ => assert!(outcome.result.is_ok()),
            }
        }

        // The tracker reflects exactly the three confirmed writes.
        assert_eq!(engine.tracker().count(letter('B')), 1);
        assert_eq!(engine.tracker().count(letter('A')), 1);
        assert_eq!(engine.tracker().count(letter('D')), 1);
        assert_eq!(engine.tracker().count(letter('R')), 0);
        assert_eq!(engine.tracker().count(letter('E')), 0);
        assert_eq!(engine.tracker().total_samples(), 3);

        // The failed namespaces hold no partial sample or temp file.
        assert!(dir.path().join("R").is_file());
        assert!(dir.path().join("E").is_file());
    }

    #[test]
    fn word_batch_reports_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);

        let outcomes = engine.save_word("HI", &[inked()]);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert_eq!(engine.tracker().count(letter('I')), 0);
    }

    #[test]
    fn restart_recovers_counts_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut engine = engine_in(&dir);
            engine.save_letter(letter('Q'), &inked()).unwrap();
            engine.save_letter(letter('Q'), &inked()).unwrap();
            engine.save_letter(letter('W'), &inked()).unwrap();
        }
        let engine = engine_in(&dir);
        assert_eq!(engine.tracker().count(letter('Q')), 2);
        assert_eq!(engine.tracker().count(letter('W')), 1);
        assert_eq!(engine.tracker().total_samples(), 3);
        // The prompt is transient state, recomputed fresh each session.
        assert!(engine.current_prompt().is_none());
    }

    #[test]
    fn advance_replaces_the_prompt_and_shows_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);
        assert!(engine.status().current_prompt.is_none());

        let (prompt, _) = engine.advance();
        assert_eq!(engine.status().current_prompt.as_ref(), Some(&prompt));
        assert_eq!(engine.current_prompt(), Some(&prompt));
    }

    #[test]
    fn letter_counts_track_files_for_any_save_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_in(&dir);
        for c in ['M', 'M', 'N', 'M', 'O'] {
            engine.save_letter(letter(c), &inked()).unwrap();
        }
        for c in ['M', 'N', 'O'] {
            let files = std::fs::read_dir(dir.path().join(c.to_string()))
                .unwrap()
                .count();
            assert_eq!(engine.tracker().count(letter(c)), files);
        }
    }
}
