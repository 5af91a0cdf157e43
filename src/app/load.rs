// LogTint - app/load.rs
//
// Viewer document loading. Reads and classifies a file on a background
// thread so the UI stays responsive on large logs, reporting back over an
// mpsc channel.
//
// Architecture:
//   - `LoadManager` lives on the UI thread; `run_load` runs on a background thread.
//   - Starting a new load abandons the previous one: its receiver is dropped,
//     so its thread's final send fails and the result is discarded.

use crate::core::classifier;
use crate::core::model::ClassifiedDocument;
use crate::core::segment::{self, Segment};
use crate::platform::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Messages from the loader thread to the UI.
#[derive(Debug)]
pub enum LoadProgress {
    /// The file is being read.
    Started { path: PathBuf },
    /// Read and classified.
    Loaded {
        document: ClassifiedDocument,
        segments: Vec<Segment>,
        duration: Duration,
    },
    /// The file could not be read.
    Failed { error: String },
}

/// Limits applied to every load.
#[derive(Debug, Clone, Copy)]
pub struct LoadLimits {
    pub max_file_size: u64,
    pub parallel_threshold: usize,
}

/// Manages a document load on a background thread.
pub struct LoadManager {
    progress_rx: Option<mpsc::Receiver<LoadProgress>>,
}

impl LoadManager {
    pub fn new() -> Self {
        Self { progress_rx: None }
    }

    /// Start loading `path`, replacing any load in flight.
    pub fn start_load(&mut self, path: PathBuf, limits: LoadLimits) {
        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);

        std::thread::spawn(move || run_load(path, limits, tx));
        tracing::info!("Load started");
    }

    /// Whether a load has been started and not yet reported a result.
    pub fn is_active(&self) -> bool {
        self.progress_rx.is_some()
    }

    /// Poll for progress messages without blocking. Returns all pending messages.
    ///
    /// The channel is released once a terminal message has been received.
    pub fn poll_progress(&mut self) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        let mut finished = false;
        if let Some(ref rx) = self.progress_rx {
            loop {
                match rx.try_recv() {
                    Ok(msg) => {
                        finished |= matches!(
                            msg,
                            LoadProgress::Loaded { .. } | LoadProgress::Failed { .. }
                        );
                        messages.push(msg);
                    }
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        finished = true;
                        break;
                    }
                }
            }
        }
        if finished {
            self.progress_rx = None;
        }
        messages
    }
}

impl Default for LoadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Read, classify and flatten one file. Runs on a background thread.
fn run_load(path: PathBuf, limits: LoadLimits, tx: mpsc::Sender<LoadProgress>) {
    // Receiver dropped means the UI moved on; exit quietly.
    if tx
        .send(LoadProgress::Started { path: path.clone() })
        .is_err()
    {
        return;
    }

    let started = Instant::now();
    let msg = match fs::read_document(&path, limits.max_file_size) {
        Ok(text) => {
            let result = if text.len() >= limits.parallel_threshold {
                classifier::classify_parallel(&text)
            } else {
                classifier::classify(&text)
            };
            let segments = segment::flatten(text.len(), &result);
            let duration = started.elapsed();
            tracing::info!(
                file = %path.display(),
                spans = result.len(),
                segments = segments.len(),
                elapsed_ms = duration.as_millis() as u64,
                "Document loaded"
            );
            LoadProgress::Loaded {
                document: ClassifiedDocument {
                    source: path.display().to_string(),
                    text,
                    result,
                },
                segments,
                duration,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Load failed");
            LoadProgress::Failed {
                error: e.to_string(),
            }
        }
    };
    let _ = tx.send(msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: LoadLimits = LoadLimits {
        max_file_size: 1024 * 1024,
        parallel_threshold: 1024 * 1024,
    };

    fn wait_for_result(manager: &mut LoadManager) -> Vec<LoadProgress> {
        let mut all = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        while manager.is_active() && Instant::now() < deadline {
            all.extend(manager.poll_progress());
            std::thread::sleep(Duration::from_millis(5));
        }
        all
    }

    #[test]
    fn test_load_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.log");
        std::fs::write(&path, "[2024-01-15 10:30:00.123456] Data: 0A").unwrap();

        let mut manager = LoadManager::new();
        manager.start_load(path, LIMITS);
        let messages = wait_for_result(&mut manager);

        assert!(matches!(messages.first(), Some(LoadProgress::Started { .. })));
        match messages.last() {
            Some(LoadProgress::Loaded {
                document, segments, ..
            }) => {
                assert_eq!(document.result.len(), 5);
                assert_eq!(segments.last().map(|s| s.end), Some(document.text.len()));
            }
            other => panic!("unexpected final message: {other:?}"),
        }
        assert!(!manager.is_active());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let mut manager = LoadManager::new();
        manager.start_load(PathBuf::from("/nonexistent/logtint.log"), LIMITS);
        let messages = wait_for_result(&mut manager);
        assert!(matches!(messages.last(), Some(LoadProgress::Failed { .. })));
    }
}
