use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// ctime-style rendering, e.g. `Tue Mar  5 14:02:11 2024`.
pub const ACCESS_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Metadata snapshot of a single file. Built on demand, never cached.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size: u64,
    pub extension: String,
    pub last_accessed: DateTime<Local>,
}

impl FileRecord {
    pub fn last_accessed_human(&self) -> String {
        self.last_accessed.format(ACCESS_TIME_FORMAT).to_string()
    }
}

impl fmt::Display for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File Analysis:")?;
        writeln!(f, "Path: {}", self.path.display())?;
        writeln!(f, "Size: {} bytes", self.size)?;
        writeln!(f, "Extension: {}", self.extension)?;
        write!(f, "Last Accessed: {}", self.last_accessed_human())
    }
}

/// Text after the last dot of the final component. Dotfiles such as
/// `.bashrc` have none.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn inspect(path: &Path) -> Result<FileRecord> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    let last_accessed: DateTime<Local> = metadata.accessed()?.into();
    let record = FileRecord {
        path: path.to_path_buf(),
        size: metadata.len(),
        extension: file_extension(path),
        last_accessed,
    };
    debug!("Inspected {}: {} bytes", path.display(), record.size);

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(Path::new("/data/a.txt")), "txt");
        assert_eq!(file_extension(Path::new("/data/archive.tar.gz")), "gz");
        assert_eq!(file_extension(Path::new("/data/Makefile")), "");
        assert_eq!(file_extension(Path::new("/data/.bashrc")), "");
        assert_eq!(file_extension(Path::new("/data.d/readme")), "");
    }

    #[test]
    fn test_inspect_reports_size_and_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "hello world").unwrap();

        let record = inspect(&path).unwrap();
        assert_eq!(record.size, 11);
        assert_eq!(record.extension, "md");
        assert_eq!(record.path, path);
    }

    #[test]
    fn test_inspect_missing_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        match inspect(&path) {
            Err(Error::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_display_format() {
        let record = FileRecord {
            path: PathBuf::from("/data/a.txt"),
            size: 42,
            extension: "txt".to_string(),
            last_accessed: Local.with_ymd_and_hms(2024, 3, 5, 14, 2, 11).unwrap(),
        };
        let text = record.to_string();
        assert!(text.contains("Size: 42 bytes"));
        assert!(text.contains("Extension: txt"));
        assert!(text.ends_with("Last Accessed: Tue Mar  5 14:02:11 2024"));
    }
}
