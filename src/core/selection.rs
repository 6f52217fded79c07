// src/core/selection.rs
//! Next-prompt policy. Both modes share one idea: bias sampling toward the
//! letters with the largest remaining deficits, and only randomize among
//! equally good choices. The RNG is passed in by the caller so sessions and
//! tests can run seeded.

use crate::core::catalog::WordCatalog;
use crate::core::tracker::ProgressTracker;
use crate::core::types::{Letter, Prompt, PromptMode};
use rand::seq::SliceRandom;
use rand::Rng;

/// How many of the worst-deficit letters word selection targets at once.
pub const TOP_DEFICIT_LETTERS: usize = 3;

/// How a prompt was arrived at. Fallback paths are reported, never silently
/// folded into the normal case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The prompt targets one or more deficit letters.
    Targeted,
    /// Every letter has reached the target; the session may keep collecting,
    /// drawing uniformly from the whole catalog.
    DatasetComplete,
    /// No catalog word contains any of the top-deficit letters; drew
    /// uniformly from the whole catalog instead.
    CatalogExhausted,
}

pub struct SelectionEngine {
    catalog: WordCatalog,
    mode: PromptMode,
    current: Option<Prompt>,
}

impl SelectionEngine {
    pub fn new(catalog: WordCatalog, mode: PromptMode) -> Self {
        Self { catalog, mode, current: None }
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PromptMode) {
        self.mode = mode;
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    /// The prompt currently on offer. None only before the first advance.
    pub fn current_prompt(&self) -> Option<&Prompt> {
        self.current.as_ref()
    }

    /// Replaces the current prompt with a fresh selection. This is the only
    /// transition; prompts never change spontaneously.
    pub fn advance(
        &mut self,
        tracker: &ProgressTracker,
        rng: &mut impl Rng,
    ) -> (Prompt, SelectionOutcome) {
        let (prompt, outcome) = match self.mode {
            PromptMode::Word => {
                let (word, outcome) = self.select_word(tracker, rng);
                (Prompt::Word(word.to_string()), outcome)
            }
            PromptMode::Letter => self.select_letter(tracker, rng),
        };
        self.current = Some(prompt.clone());
        (prompt, outcome)
    }

    /// Word mode: take the top deficit letters, keep only catalog words
    /// containing at least one of them, score candidates by how many
    /// distinct targeted letters they cover, and draw uniformly among the
    /// max scorers.
    fn select_word(
        &self,
        tracker: &ProgressTracker,
        rng: &mut impl Rng,
    ) -> (&'static str, SelectionOutcome) {
        let words = self.catalog.words();
        let deficits = tracker.deficits();
        if deficits.is_empty() {
            return (words[rng.gen_range(0..words.len())], SelectionOutcome::DatasetComplete);
        }

        let targeted = top_deficit_letters(deficits, rng);
        let candidates: Vec<(&'static str, usize)> = words
            .iter()
            .filter_map(|&word| {
                let score = targeted
                    .iter()
                    .filter(|l| word.contains(l.as_char()))
                    .count();
                (score > 0).then_some((word, score))
            })
            .collect();

        if candidates.is_empty() {
            return (words[rng.gen_range(0..words.len())], SelectionOutcome::CatalogExhausted);
        }

        let best = candidates.iter().map(|&(_, s)| s).max().unwrap_or(0);
        let pool: Vec<&'static str> = candidates
            .into_iter()
            .filter(|&(_, s)| s == best)
            .map(|(w, _)| w)
            .collect();
        (pool[rng.gen_range(0..pool.len())], SelectionOutcome::Targeted)
    }

    /// Letter mode: uniform over deficit letters, excluding the letter on
    /// offer right now whenever another choice remains.
    fn select_letter(
        &self,
        tracker: &ProgressTracker,
        rng: &mut impl Rng,
    ) -> (Prompt, SelectionOutcome) {
        let mut pool: Vec<Letter> = tracker.deficits().into_iter().map(|(l, _)| l).collect();
        let outcome = if pool.is_empty() {
            pool = Letter::all().collect();
            SelectionOutcome::DatasetComplete
        } else {
            SelectionOutcome::Targeted
        };

        if pool.len() > 1 {
            if let Some(Prompt::Letter(current)) = &self.current {
                pool.retain(|l| l != current);
            }
        }

        let letter = pool[rng.gen_range(0..pool.len())];
        (Prompt::Letter(letter), outcome)
    }
}

/// The top-N letters by deficit. Ties are broken randomly: the list is
/// shuffled first, then stably sorted by deficit, so equal deficits keep
/// their shuffled order.
fn top_deficit_letters(mut deficits: Vec<(Letter, usize)>, rng: &mut impl Rng) -> Vec<Letter> {
    deficits.shuffle(rng);
    deficits.sort_by(|a, b| b.1.cmp(&a.1));
    deficits
        .into_iter()
        .take(TOP_DEFICIT_LETTERS)
        .map(|(l, _)| l)
        .collect()
}
