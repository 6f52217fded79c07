// src/errors.rs
use std::error::Error;
use std::fmt;
use std::io;

/// Failure normalizing a capture into a raster.
#[derive(Debug)]
pub enum CaptureError {
    /// The submitted drawing contains no ink. Recoverable: the caller
    /// re-prompts for the same target and persists nothing.
    EmptyCapture,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::EmptyCapture => write!(f, "capture contains no ink"),
        }
    }
}

impl Error for CaptureError {}

/// Failure persisting a sample. All variants leave the store and the
/// progress counters exactly as they were; the caller may retry.
#[derive(Debug)]
pub enum StoreError {
    /// The letter's namespace directory could not be created.
    DirectoryCreate(io::Error),
    /// The raster could not be serialized to PNG.
    Encode(image::ImageError),
    /// The encoded sample could not be written durably.
    Write(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DirectoryCreate(e) => write!(f, "could not create letter directory: {}", e),
            StoreError::Encode(e) => write!(f, "could not encode sample as PNG: {}", e),
            StoreError::Write(e) => write!(f, "could not write sample file: {}", e),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::DirectoryCreate(e) | StoreError::Write(e) => Some(e),
            StoreError::Encode(e) => Some(e),
        }
    }
}

/// Anything that can go wrong on the normalize-then-persist path for one
/// letter cell.
#[derive(Debug)]
pub enum SaveError {
    Capture(CaptureError),
    Store(StoreError),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Capture(e) => write!(f, "{}", e),
            SaveError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SaveError::Capture(e) => Some(e),
            SaveError::Store(e) => Some(e),
        }
    }
}

impl From<CaptureError> for SaveError {
    fn from(e: CaptureError) -> Self {
        SaveError::Capture(e)
    }
}

impl From<StoreError> for SaveError {
    fn from(e: StoreError) -> Self {
        SaveError::Store(e)
    }
}
