// src/persistence.rs
//! Durable sample storage. One directory per letter under an explicit root,
//! files named `<LETTER>_<seq:04>.png`, sequence numbers assigned at write
//! time and never reused. Writes go through a temp file in the target
//! directory and are renamed into place, so a concurrent reader can never
//! observe a partial sample.

use crate::core::types::Letter;
use crate::errors::StoreError;
use image::codecs::png::PngEncoder;
use image::{ColorType, GrayImage, ImageEncoder};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct SampleStore {
    root: PathBuf,
}

impl SampleStore {
    /// A store rooted at an explicit directory. Nothing is created until the
    /// first persist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn letter_dir(&self, letter: Letter) -> PathBuf {
        self.root.join(letter.as_char().to_string())
    }

    /// Canonical sample filename for a (letter, sequence) pair.
    pub fn sample_filename(letter: Letter, sequence: u32) -> String {
        format!("{}_{:04}.png", letter, sequence)
    }

    /// Full path a given sample would live at.
    pub fn sample_path(&self, letter: Letter, sequence: u32) -> PathBuf {
        self.letter_dir(letter).join(Self::sample_filename(letter, sequence))
    }

    /// Number of samples on disk for one letter. Counts PNG presence only;
    /// gaps in the numbering do not matter. An absent or unreadable
    /// directory counts as zero so one bad namespace never aborts a scan.
    pub fn count_samples(&self, letter: Letter) -> usize {
        let entries = match fs::read_dir(self.letter_dir(letter)) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };
        entries
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "png"))
            .count()
    }

    /// On-disk counts for all 26 letters.
    pub fn scan_counts(&self) -> BTreeMap<Letter, usize> {
        Letter::all().map(|l| (l, self.count_samples(l))).collect()
    }

    /// The next sequence number for a letter: one past the highest number
    /// currently on disk. Derived from the authoritative listing rather than
    /// a count, so externally deleted samples leave gaps instead of causing
    /// filename collisions. Returns 1 for a letter never written.
    pub fn next_sequence_number(&self, letter: Letter) -> u32 {
        self.highest_sequence(letter) + 1
    }

    fn highest_sequence(&self, letter: Letter) -> u32 {
        let entries = match fs::read_dir(self.letter_dir(letter)) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|e| parse_sequence(&e.path(), letter))
            .max()
            .unwrap_or(0)
    }

    /// Writes one sample durably. The letter directory is created if needed
    /// (idempotent); the PNG is encoded fully in memory, written to a temp
    /// file next to its final location, then renamed into place. On any
    /// error the final path is untouched and the caller must not count the
    /// sample.
    pub fn persist(
        &self,
        letter: Letter,
        sequence: u32,
        raster: &GrayImage,
    ) -> Result<PathBuf, StoreError> {
        let dir = self.letter_dir(letter);
        fs::create_dir_all(&dir).map_err(StoreError::DirectoryCreate)?;

        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(raster.as_raw(), raster.width(), raster.height(), ColorType::L8)
            .map_err(StoreError::Encode)?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(StoreError::Write)?;
        temp.write_all(&png).map_err(StoreError::Write)?;

        let path = dir.join(Self::sample_filename(letter, sequence));
        temp.persist(&path).map_err(|e| StoreError::Write(e.error))?;
        Ok(path)
    }
}

/// Parses `<LETTER>_<seq>.png` back into its sequence number. Foreign files
/// in a letter directory are ignored.
fn parse_sequence(path: &Path, letter: Letter) -> Option<u32> {
    if path.extension()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let rest = stem.strip_prefix(letter.as_char())?.strip_prefix('_')?;
    rest.parse().ok()
}
