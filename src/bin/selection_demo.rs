// Minimal seeded harness for the prompt selection policy.
// Run with: cargo run --bin selection_demo
// src/bin/selection_demo.rs
use rand::rngs::StdRng;
use rand::SeedableRng;
use sampler_core::core::catalog::WordCatalog;
use sampler_core::core::selection::SelectionEngine;
use sampler_core::core::tracker::ProgressTracker;
use sampler_core::core::types::{Letter, PromptMode};
use std::collections::BTreeMap;

const SEED: u64 = 42;

fn tracker_with(overrides: &[(char, usize)], target: usize) -> ProgressTracker {
    let mut counts: BTreeMap<Letter, usize> = Letter::all().map(|l| (l, target)).collect();
    for &(c, count) in overrides {
        counts.insert(Letter::new(c).unwrap(), count);
    }
    ProgressTracker::from_counts(counts, target)
}

fn main() {
    let mut rng = StdRng::seed_from_u64(SEED);

    // Q, X and Z trail the rest of the alphabet: deficits 5, 2 and 1.
    let tracker = tracker_with(&[('Q', 95), ('X', 98), ('Z', 99)], 100);
    println!("Deficits: {:?}", tracker.deficits());

    println!("\nWord mode, seed {}:", SEED);
    let mut words = SelectionEngine::new(WordCatalog::new(), PromptMode::Word);
    for i in 1..=8 {
        let (prompt, outcome) = words.advance(&tracker, &mut rng);
        let tags: String = WordCatalog::rare_letters_in(&prompt.to_string())
            .iter()
            .map(|l| l.as_char())
            .collect();
        println!("  {}. {} ({:?}, rare letters: {})", i, prompt, outcome, tags);
    }

    println!("\nLetter mode, same deficits:");
    let mut letters = SelectionEngine::new(WordCatalog::new(), PromptMode::Letter);
    for i in 1..=8 {
        let (prompt, outcome) = letters.advance(&tracker, &mut rng);
        println!("  {}. {} ({:?})", i, prompt, outcome);
    }

    println!("\nComplete dataset falls back to the full catalog:");
    let done = tracker_with(&[], 100);
    for i in 1..=3 {
        let (prompt, outcome) = words.advance(&done, &mut rng);
        println!("  {}. {} ({:?})", i, prompt, outcome);
    }
}
