// Autoreg - app/mod.rs
//
// Application layer: run orchestration and the spreadsheet artifact.
// Depends on core, platform, and util.

pub mod pipeline;
pub mod spreadsheet;
