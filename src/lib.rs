// Autoreg - lib.rs
//
// Library entry point, exposing every module for integration testing and
// programmatic use. The CLI in main.rs is a thin wrapper over app::pipeline.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
