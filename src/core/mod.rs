// LogTint - core/mod.rs
//
// Core business logic layer.
// Dependencies: regex, chrono, serde, rayon; output through std::io::Write.
// Must NOT depend on: ui, platform, app, or open files directly
// (discovery reads directory metadata only).

pub mod classifier;
pub mod discovery;
pub mod export;
pub mod model;
pub mod position;
pub mod render;
pub mod segment;
pub mod style;
