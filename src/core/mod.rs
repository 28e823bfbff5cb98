// Autoreg - core/mod.rs
//
// Core business logic layer: splitting, classification, row mapping.
// Must NOT depend on: platform, app, or any file I/O.

pub mod classifier;
pub mod export;
pub mod model;
pub mod patterns;
pub mod splitter;
