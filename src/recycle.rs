use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Capability that moves a path into a recoverable holding area.
pub trait TrashCan {
    fn send(&self, path: &Path) -> std::result::Result<(), String>;
}

/// The platform trash (Recycle Bin, `~/.Trash`, freedesktop trash).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl TrashCan for SystemTrash {
    fn send(&self, path: &Path) -> std::result::Result<(), String> {
        // The platform backends disagree on missing paths, so report it uniformly.
        if let Err(err) = fs::symlink_metadata(path) {
            return Err(err.to_string());
        }
        trash::delete(path).map_err(|e| e.to_string())
    }
}

pub fn trash_file(path: &Path) -> Result<()> {
    trash_file_with(&SystemTrash, path)
}

pub fn trash_file_with(can: &dyn TrashCan, path: &Path) -> Result<()> {
    match can.send(path) {
        Ok(()) => {
            info!("Moved {} to the trash", path.display());
            Ok(())
        }
        Err(reason) => {
            // The caller reports the failure; keep it out of the warn-level log.
            debug!("Failed to trash '{}': {}", path.display(), reason);
            Err(Error::Trash {
                path: path.to_path_buf(),
                reason,
            })
        }
    }
}
