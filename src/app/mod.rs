// LogTint - app/mod.rs
//
// Application layer: the command-line pipeline and viewer orchestration.
// Dependencies: core layer, platform (file reading, config types).
// Must NOT depend on: ui.

pub mod highlight;
pub mod load;
pub mod state;
