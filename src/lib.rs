// src/lib.rs

pub mod core;
pub mod errors;
pub mod persistence;
pub mod raster;

pub use crate::core::engine::CollectionEngine;
