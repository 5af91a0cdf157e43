// LogTint - ui/panels/mod.rs

pub mod summary;
pub mod viewer;
