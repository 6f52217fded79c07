// src/core/mod.rs
pub mod catalog;
pub mod engine;
pub mod selection;
pub mod tracker;
pub mod types;
