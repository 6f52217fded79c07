// src/core/catalog.rs
//! The static word catalog. Words are grouped by the rare letters they were
//! chosen to surface, plus a common-word list; all entries uppercase ASCII.
//! The tables are baked in and never user-mutable.

use crate::core::types::Letter;

/// Letters historically underrepresented in common words; the rare-letter
/// word lists exist to surface these.
pub const RARE_LETTERS: &[char] = &['Q', 'X', 'Z', 'J', 'V', 'K', 'W', 'Y'];

const RARE_LETTER_WORDS: &[(char, &[&str])] = &[
    ('Q', &["QUEEN", "QUIET", "QUICK", "QUAKE", "QUEST", "QUOTE", "QUIRK", "QUILT", "SQUAD", "EQUAL"]),
    ('X', &["XEROX", "EXTRA", "MIXED", "PIXEL", "TOXIC", "BOXER", "EXACT", "OXIDE", "RELAX", "NEXUS"]),
    ('Z', &["ZEBRA", "ZONES", "CRAZY", "FROZE", "PIZZA", "PRIZE", "BLAZE", "FUZZY", "HAZEL", "RAZOR"]),
    ('J', &["JOKER", "JUDGE", "JELLY", "JUICE", "MAJOR", "ENJOY", "JENGA", "JUMBO", "JOINT", "JETTY"]),
    ('V', &["VOICE", "VIVID", "RIVER", "ABOVE", "HEAVY", "VALVE", "VENOM", "COVER", "GROVE", "BRAVE"]),
    ('K', &["KNIFE", "KITTY", "KAYAK", "KIOSK", "KNOCK", "ANKLE", "BRAKE", "CHALK", "FLASK", "SPARK"]),
    ('W', &["WATER", "WORLD", "WRIST", "SWEET", "TOWER", "CROWN", "LOWER", "POWER", "SWIFT", "WHEAT"]),
    ('Y', &["YOUTH", "YOUNG", "YELLOW", "YEAST", "EARLY", "HAPPY", "SHINY", "EMPTY", "STYLE", "PARTY"]),
];

const COMMON_WORDS: &[&str] = &[
    "APPLE", "BREAD", "CHAIR", "DANCE", "EAGLE",
    "FRESH", "GRAPE", "HOUSE", "LIGHT", "MOUSE",
    "NIGHT", "OCEAN", "PIANO", "RADIO", "STONE",
    "TIGER", "UNDER", "BEACH", "CLOCK", "DREAM",
    "FLAME", "GHOST", "HEART", "IMAGE", "LASER",
    "MAGIC", "NORTH", "ORBIT", "PEARL", "SPORT",
    "TRUCK", "ABOUT", "BROWN", "DRIVE", "EIGHT",
    // Words rich in F, M, B, D, P, G, H
    "FAMILY", "FIELD", "FOUND", "FIFTY", "FABLE",
    "MEMBER", "MIGHT", "MONTH", "METAL", "MARCH",
    "BADGE", "BLOCK", "BOARD", "BELOW", "BENCH",
    "DEPTH", "DOUBT", "DRAFT", "DAILY", "MEDAL",
    "PHASE", "PLUMB", "PRIDE", "PROOF", "PUPIL",
    "GLOBE", "GUARD", "GAUGE", "GRIND", "GRAND",
    "HUMOR", "HOTEL", "HONEY", "HEDGE", "HABIT",
];

/// The full prompt vocabulary: common words plus every rare-letter list.
pub struct WordCatalog {
    words: Vec<&'static str>,
}

impl WordCatalog {
    pub fn new() -> Self {
        let mut words: Vec<&'static str> = COMMON_WORDS.to_vec();
        for (_, list) in RARE_LETTER_WORDS {
            words.extend_from_slice(list);
        }
        Self { words }
    }

    pub fn words(&self) -> &[&'static str] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words curated for one rare letter, if it has a list.
    pub fn rare_letter_words(letter: Letter) -> Option<&'static [&'static str]> {
        RARE_LETTER_WORDS
            .iter()
            .find(|(l, _)| *l == letter.as_char())
            .map(|(_, list)| *list)
    }

    /// The rare letters a word contains; this is the prioritization tag on
    /// each catalog entry.
    pub fn rare_letters_in(word: &str) -> Vec<Letter> {
        RARE_LETTERS
            .iter()
            .filter(|&&rare| word.contains(rare))
            .filter_map(|&rare| Letter::new(rare))
            .collect()
    }
}

impl Default for WordCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_uppercase_ascii_only() {
        let catalog = WordCatalog::new();
        assert!(!catalog.is_empty());
        for word in catalog.words() {
            assert!(!word.is_empty());
            assert!(
                word.chars().all(|c| c.is_ascii_uppercase()),
                "bad catalog entry: {word}"
            );
        }
    }

    #[test]
    fn every_rare_letter_is_reachable() {
        let catalog = WordCatalog::new();
        for &rare in RARE_LETTERS {
            let list = WordCatalog::rare_letter_words(Letter::new(rare).unwrap()).unwrap();
            assert_eq!(list.len(), 10);
            // Each curated word actually contains its rare letter, and so
            // the combined catalog can always surface it.
            for word in list {
                assert!(word.contains(rare), "{word} does not contain {rare}");
            }
            assert!(catalog.words().iter().any(|w| w.contains(rare)));
        }
    }

    #[test]
    fn rare_letter_tags() {
        let tags = WordCatalog::rare_letters_in("QUAKE");
        let chars: Vec<char> = tags.iter().map(|l| l.as_char()).collect();
        assert_eq!(chars, vec!['Q', 'K']);
        assert!(WordCatalog::rare_letters_in("STONE").is_empty());
    }
}
