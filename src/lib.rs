pub mod config;
pub mod error;
pub mod inspect;
pub mod progress;
pub mod recycle;
pub mod sweep;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use inspect::{inspect, FileRecord};
pub use progress::{ProgressReporter, SilentReporter};
pub use recycle::{trash_file, SystemTrash, TrashCan};
pub use sweep::{SweepFailure, SweepReport, Sweeper};
