use crate::error::{Error, Result};
use crate::progress::ProgressReporter;
use glob::Pattern;
use std::cell::Cell;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, error, info};
use walkdir::{DirEntry, WalkDir};

pub const SECONDS_PER_DAY: u64 = 86_400;

/// A file that could not be processed during a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one sweep. `moved` holds original paths in visitation order;
/// in dry-run mode it holds the paths that would have been moved.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub staging_dir: PathBuf,
    pub moved: Vec<PathBuf>,
    pub failures: Vec<SweepFailure>,
    pub files_visited: usize,
    /// Entries pruned by ignore patterns.
    pub skipped_ignored: usize,
    /// Entries pruned because they are the staging directory itself.
    pub skipped_staging: usize,
    pub dry_run: bool,
    pub duration: Duration,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Relocates files not accessed within a threshold into a staging tree that
/// mirrors their path relative to the swept root.
#[derive(Debug, Clone)]
pub struct Sweeper {
    staging_dir: PathBuf,
    threshold_days: u64,
    ignore_patterns: Vec<Pattern>,
    now: Option<SystemTime>,
    dry_run: bool,
}

impl Sweeper {
    pub fn new(staging_dir: impl Into<PathBuf>, threshold_days: u64) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            threshold_days,
            ignore_patterns: Vec::new(),
            now: None,
            dry_run: false,
        }
    }

    /// Invalid globs are logged and dropped.
    pub fn with_ignore_patterns(mut self, globs: &[String]) -> Self {
        self.ignore_patterns = globs
            .iter()
            .filter_map(|glob| match Pattern::new(glob) {
                Ok(p) => Some(p),
                Err(e) => {
                    error!("Invalid glob pattern '{}': {}", glob, e);
                    None
                }
            })
            .collect();
        self
    }

    /// Fix the clock used to compute ages.
    pub fn with_now(mut self, now: SystemTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn threshold(&self) -> Duration {
        Duration::from_secs(self.threshold_days.saturating_mul(SECONDS_PER_DAY))
    }

    /// Age measured from last access. Access times in the future count as zero.
    pub fn age_of(&self, last_accessed: SystemTime) -> Duration {
        let now = self.now.unwrap_or_else(SystemTime::now);
        now.duration_since(last_accessed).unwrap_or(Duration::ZERO)
    }

    pub fn is_stale(&self, last_accessed: SystemTime) -> bool {
        self.age_of(last_accessed) > self.threshold()
    }

    /// Mirrored destination of `file` under the staging directory, or `None`
    /// when `file` is not below `root`.
    pub fn destination_for(&self, root: &Path, file: &Path) -> Option<PathBuf> {
        file.strip_prefix(root)
            .ok()
            .map(|relative| self.staging_dir.join(relative))
    }

    pub fn sweep(&self, root: &Path, reporter: &dyn ProgressReporter) -> Result<SweepReport> {
        if !root.exists() {
            return Err(Error::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        if !self.dry_run {
            fs::create_dir_all(&self.staging_dir)?;
        }
        let scope = WalkScope {
            root,
            canonical_root: resolve(root)?,
            canonical_staging: resolve(&self.staging_dir)?,
        };

        info!(
            "Sweeping {} for files not accessed in {} day(s)",
            root.display(),
            self.threshold_days
        );
        reporter.on_sweep_start(root);
        let start = Instant::now();

        let mut report = SweepReport {
            staging_dir: self.staging_dir.clone(),
            dry_run: self.dry_run,
            ..SweepReport::default()
        };
        let skipped_ignored = Cell::new(0usize);
        let skipped_staging = Cell::new(0usize);

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                match self.exclusion(&scope, entry) {
                    Some(Exclusion::Staging) => {
                        skipped_staging.set(skipped_staging.get() + 1);
                        false
                    }
                    Some(Exclusion::Ignored) => {
                        skipped_ignored.set(skipped_ignored.get() + 1);
                        false
                    }
                    None => true,
                }
            });

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    let reason = err.to_string();
                    debug!("Error walking {}: {}", path.display(), reason);
                    reporter.on_file_failed(&path, &reason);
                    report.failures.push(SweepFailure { path, reason });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            report.files_visited += 1;
            reporter.on_file_visited(report.files_visited, entry.path());

            match self.process_file(root, &entry) {
                Ok(Some(destination)) => {
                    reporter.on_file_moved(entry.path(), &destination);
                    report.moved.push(entry.path().to_path_buf());
                }
                Ok(None) => {}
                Err(err) => {
                    let reason = err.to_string();
                    debug!("Error processing file {}: {}", entry.path().display(), reason);
                    reporter.on_file_failed(entry.path(), &reason);
                    report.failures.push(SweepFailure {
                        path: entry.path().to_path_buf(),
                        reason,
                    });
                }
            }
        }

        report.skipped_ignored = skipped_ignored.get();
        report.skipped_staging = skipped_staging.get();
        report.duration = start.elapsed();
        reporter.on_sweep_complete(
            report.moved.len(),
            report.failures.len(),
            report.duration.as_secs_f64(),
        );
        info!(
            "Sweep of {} finished: {} moved, {} failed, {} visited",
            root.display(),
            report.moved.len(),
            report.failures.len(),
            report.files_visited
        );

        Ok(report)
    }

    fn exclusion(&self, scope: &WalkScope<'_>, entry: &DirEntry) -> Option<Exclusion> {
        let path = entry.path();
        // Compared on resolved paths so `.` or `../x` roots still see a nested staging dir.
        let relative = path.strip_prefix(scope.root).unwrap_or(path);
        if scope
            .canonical_root
            .join(relative)
            .starts_with(&scope.canonical_staging)
        {
            return Some(Exclusion::Staging);
        }
        if self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path))
        {
            return Some(Exclusion::Ignored);
        }
        None
    }

    /// Returns the destination when the file was (or would be) relocated.
    fn process_file(&self, root: &Path, entry: &DirEntry) -> io::Result<Option<PathBuf>> {
        let path = entry.path();
        let last_accessed = entry.metadata().map_err(io::Error::from)?.accessed()?;
        let age = self.age_of(last_accessed);

        if age <= self.threshold() {
            return Ok(None);
        }

        let destination = self.destination_for(root, path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not under {}", path.display(), root.display()),
            )
        })?;

        if self.dry_run {
            debug!(
                "Would move {} ({} day(s) old) to {}",
                path.display(),
                age.as_secs() / SECONDS_PER_DAY,
                destination.display()
            );
            return Ok(Some(destination));
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        move_file(path, &destination)?;
        debug!("Moved {} to {}", path.display(), destination.display());

        Ok(Some(destination))
    }
}

struct WalkScope<'a> {
    root: &'a Path,
    canonical_root: PathBuf,
    canonical_staging: PathBuf,
}

enum Exclusion {
    Staging,
    Ignored,
}

/// Absolute, symlink-free form of `path`. Components that do not exist yet
/// are appended to the canonical form of their nearest existing ancestor.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        match fs::canonicalize(existing) {
            Ok(mut canonical) => {
                for name in missing.iter().rev() {
                    canonical.push(name);
                }
                return Ok(canonical);
            }
            Err(_) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    existing = parent;
                }
                _ => return Ok(absolute.clone()),
            },
        }
    }
}

/// Rename, falling back to copy and remove when the rename is refused
/// (for instance across filesystems).
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    let rename_err = match fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    debug!(
        "Rename {} -> {} failed ({}), copying instead",
        from.display(),
        to.display(),
        rename_err
    );

    copy_then_remove(from, to)
}

/// Copy keeping access and modification times, then remove the source.
/// On failure the source is left as the single copy.
pub fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    copy_then_remove_with(from, to, |source| fs::remove_file(source))
}

fn copy_then_remove_with<F>(from: &Path, to: &Path, remove_source: F) -> io::Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    // Read before copying, which itself touches the access time.
    let metadata = fs::metadata(from)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);

    if let Err(err) = copy_with_times(from, to, times) {
        let _ = fs::remove_file(to);
        return Err(err);
    }
    if let Err(err) = remove_source(from) {
        let _ = fs::remove_file(to);
        return Err(err);
    }
    Ok(())
}

fn copy_with_times(from: &Path, to: &Path, times: FileTimes) -> io::Result<()> {
    fs::copy(from, to)?;
    File::options().write(true).open(to)?.set_times(times)
}
