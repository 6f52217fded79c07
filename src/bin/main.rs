use crossterm::style::Stylize;
use sampler_core::core::selection::SelectionOutcome;
use sampler_core::core::types::{Prompt, PromptMode, StrokeDrawing};
use sampler_core::CollectionEngine;
use std::fs::File;
use std::io::{stdin, stdout, BufReader, Write};
use std::path::{Path, PathBuf};

fn default_root() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("glyph_sampler");
    path.push("samples");
    path
}

fn main() {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_root);

    let mut engine = CollectionEngine::open(&root);
    let (_, outcome) = engine.advance();
    let mut message = outcome_message(outcome);

    println!("Handwriting Sample Collector. Type 'exit' to quit.");
    println!("---------------------------------------------------------------");

    loop {
        print_ui(&engine, &root, &message);
        message = String::new();

        let mut input = String::new();
        stdin().read_line(&mut input).unwrap();
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            "" | "skip" => {
                // Explicit advance without saving; nothing was persisted, so
                // there is nothing to roll back.
                let (_, outcome) = engine.advance();
                message = outcome_message(outcome);
            }
            "status" => {} // the UI reprints on every loop
            "mode word" => {
                engine.set_mode(PromptMode::Word);
                engine.advance();
            }
            "mode letter" => {
                engine.set_mode(PromptMode::Letter);
                engine.advance();
            }
            s if s.starts_with("save") => {
                let paths: Vec<&str> = s["save".len()..].split_whitespace().collect();
                message = handle_save(&mut engine, &paths);
            }
            other => {
                message = format!("Unknown command: '{}'", other);
            }
        }
    }

    let status = engine.status();
    println!(
        "\n{} samples stored under {}",
        status.total_samples,
        root.display()
    );
}

/// Saves the current prompt from drawing JSON files: one file for a letter
/// prompt, one file per letter cell for a word prompt. Advances only when
/// every cell saved; otherwise the same prompt stays up for a retry.
fn handle_save(engine: &mut CollectionEngine, paths: &[&str]) -> String {
    let Some(prompt) = engine.current_prompt().cloned() else {
        return "No prompt is active; press Enter to get one.".to_string();
    };

    let mut drawings = Vec::new();
    for path in paths {
        match load_drawing(path) {
            Ok(d) => drawings.push(d),
            Err(e) => return format!("Could not read '{}': {}", path, e),
        }
    }

    match prompt {
        Prompt::Letter(letter) => {
            if drawings.len() != 1 {
                return format!("Letter prompt needs exactly 1 drawing, got {}.", drawings.len());
            }
            match engine.save_letter(letter, &drawings[0]) {
                Ok(seq) => {
                    let (_, outcome) = engine.advance();
                    format!(
                        "Saved {} as sample #{}. {}",
                        letter,
                        seq,
                        outcome_message(outcome)
                    )
                }
                Err(e) => format!("{} not saved: {}", letter, e),
            }
        }
        Prompt::Word(word) => {
            let cells = prompt_cells(&word);
            if drawings.len() != cells {
                return format!(
                    "Word '{}' needs {} drawings (one per letter), got {}.",
                    word,
                    cells,
                    drawings.len()
                );
            }
            let outcomes = engine.save_word(&word, &drawings);
            let mut lines = Vec::new();
            let mut all_ok = true;
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(seq) => lines.push(format!("  {} -> sample #{}", outcome.letter, seq)),
                    Err(e) => {
                        all_ok = false;
                        lines.push(format!("  {} FAILED: {}", outcome.letter, e));
                    }
                }
            }
            if all_ok {
                let (_, outcome) = engine.advance();
                format!("Saved '{}'.\n{}\n{}", word, lines.join("\n"), outcome_message(outcome))
            } else {
                format!(
                    "Partial save of '{}'; redraw the failed cells and save again.\n{}",
                    word,
                    lines.join("\n")
                )
            }
        }
    }
}

fn prompt_cells(word: &str) -> usize {
    word.chars().filter(|c| c.is_ascii_alphabetic()).count()
}

fn load_drawing(path: &str) -> Result<StrokeDrawing, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn outcome_message(outcome: SelectionOutcome) -> String {
    match outcome {
        SelectionOutcome::Targeted => String::new(),
        SelectionOutcome::DatasetComplete => {
            "Every letter has reached its target; further samples are a bonus.".to_string()
        }
        SelectionOutcome::CatalogExhausted => {
            "No catalog word covers the neediest letters; picked from the full catalog.".to_string()
        }
    }
}

fn print_ui(engine: &CollectionEngine, root: &Path, message: &str) {
    let status = engine.status();

    // Basic clear screen for simplicity
    print!("\x1B[2J\x1B[1;1H");
    println!("Handwriting Sample Collector");
    println!("Dataset root: {}", root.display());
    println!("---------------------------------------------------------------");

    let total = format!(
        "Samples: {} / {}",
        status.total_samples,
        status.target_count * 26
    );
    if status.complete {
        println!("{}  {}", total, "dataset complete".green().bold());
    } else {
        println!("{}", total);
    }

    // Two rows of thirteen letters each.
    for row in status.counts.iter().collect::<Vec<_>>().chunks(13) {
        let mut line = String::new();
        for (letter, &count) in row {
            let cell = format!("{}:{:<4}", letter, count);
            if count >= status.target_count {
                line.push_str(&format!("{} ", cell.dark_green()));
            } else {
                line.push_str(&format!("{} ", cell));
            }
        }
        println!("{}", line);
    }

    match &status.current_prompt {
        Some(prompt) => println!("\nDraw: {}", prompt.to_string().bold().cyan()),
        None => println!("\nNo prompt yet."),
    }

    if !message.is_empty() {
        println!("\n{}", message);
    }

    println!("\nCommands: save <drawing.json> [more.json ...] | skip | mode word | mode letter | exit");
    print!("> ");
    stdout().flush().unwrap();
}
