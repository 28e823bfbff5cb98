// Autoreg - platform/mod.rs
//
// Platform layer: settings file and filesystem access.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
