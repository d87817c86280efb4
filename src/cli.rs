use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tidy-files")]
#[command(about = "Inspect, trash and sweep away stale local files", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of ./Config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show size, extension and last access time of a file
    Inspect {
        path: PathBuf,
    },
    /// Move a file to the system trash
    Trash {
        path: PathBuf,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Move files not accessed for more than DAYS into the staging folder
    Sweep(SweepArgs),
    /// Interactive menu
    Menu,
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Directory to scan
    pub dir: PathBuf,
    /// Days of inactivity after which a file counts as old
    #[arg(short, long)]
    pub days: u64,
    /// Override the configured staging directory
    #[arg(long)]
    pub staging_dir: Option<PathBuf>,
    /// List what would be moved without moving anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sweep() {
        let cli = Cli::try_parse_from([
            "tidy-files",
            "sweep",
            "/data",
            "--days",
            "30",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Sweep(args)) => {
                assert_eq!(args.dir, PathBuf::from("/data"));
                assert_eq!(args.days, 30);
                assert!(args.dry_run);
                assert!(args.staging_dir.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_sweep_rejects_non_integer_days() {
        assert!(Cli::try_parse_from(["tidy-files", "sweep", "/data", "--days", "ten"]).is_err());
        assert!(Cli::try_parse_from(["tidy-files", "sweep", "/data", "--days", "-3"]).is_err());
    }

    #[test]
    fn test_parse_trash_with_yes() {
        let cli = Cli::try_parse_from(["tidy-files", "trash", "-y", "/data/a.txt"]).unwrap();
        match cli.command {
            Some(Commands::Trash { path, yes }) => {
                assert_eq!(path, PathBuf::from("/data/a.txt"));
                assert!(yes);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_config_flag() {
        let cli =
            Cli::try_parse_from(["tidy-files", "print-config", "--config", "/etc/tidy.toml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/tidy.toml")));
        assert!(matches!(cli.command, Some(Commands::PrintConfig)));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["tidy-files"]).unwrap();
        assert!(cli.command.is_none());
    }
}
