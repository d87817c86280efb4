use std::path::Path;

/// Trait for reporting sweep progress.
///
/// The CLI implements it with an indicatif spinner. All methods have default
/// no-op implementations.
pub trait ProgressReporter {
    fn on_sweep_start(&self, _root: &Path) {}
    fn on_file_visited(&self, _files_visited: usize, _current_path: &Path) {}
    fn on_file_moved(&self, _from: &Path, _to: &Path) {}
    fn on_file_failed(&self, _path: &Path, _reason: &str) {}
    fn on_sweep_complete(&self, _moved: usize, _failed: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
