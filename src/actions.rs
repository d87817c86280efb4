use crate::prompt::prompt_confirm;
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tidy_files::recycle::trash_file_with;
use tidy_files::{inspect, ProgressReporter, SweepReport, Sweeper, TrashCan};
use tracing::debug;

pub fn run_inspect<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    match inspect(path) {
        Ok(record) => writeln!(out, "{}", record),
        Err(err) => writeln!(out, "{} {}", "Error:".red(), err),
    }
}

/// Show the file, confirm unless `assume_yes`, then trash it.
pub fn run_trash<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    can: &dyn TrashCan,
    path: &Path,
    assume_yes: bool,
) -> io::Result<()> {
    if !path.exists() {
        writeln!(out, "The specified file does not exist.")?;
        return Ok(());
    }

    run_inspect(out, path)?;

    if !assume_yes {
        let prompt = format!(
            "Are you sure you want to move '{}' to the recycle bin?",
            path.display()
        );
        if !prompt_confirm(input, out, &prompt, Some(false))? {
            writeln!(out, "Left '{}' where it is.", path.display())?;
            return Ok(());
        }
    }

    match trash_file_with(can, path) {
        Ok(()) => writeln!(
            out,
            "{} The file '{}' has been moved to the recycle bin.",
            "Success:".green(),
            path.display()
        ),
        Err(err) => writeln!(out, "{} {}", "Error:".red(), err),
    }
}

pub fn run_sweep<W: Write>(
    out: &mut W,
    sweeper: &Sweeper,
    root: &Path,
    reporter: &dyn ProgressReporter,
) -> io::Result<()> {
    match sweeper.sweep(root, reporter) {
        Ok(report) => print_sweep_report(out, &report),
        Err(err) => {
            debug!("Sweep of {} failed: {}", root.display(), err);
            writeln!(out, "{} {}", "Error:".red(), err)
        }
    }
}

pub fn print_sweep_report<W: Write>(out: &mut W, report: &SweepReport) -> io::Result<()> {
    if report.moved.is_empty() {
        writeln!(out, "No files met the criteria for being moved.")?;
    } else {
        let verb = if report.dry_run { "Would move" } else { "Moved" };
        writeln!(
            out,
            "{} {} file(s) to staging folder: {}",
            verb,
            format!("{}", report.moved.len()).green(),
            report.staging_dir.display()
        )?;
        for path in &report.moved {
            writeln!(out, " - {}", path.display())?;
        }
    }

    if !report.is_clean() {
        writeln!(
            out,
            "{} file(s) could not be processed:",
            format!("{}", report.failures.len()).red()
        )?;
        for failure in &report.failures {
            writeln!(out, " - {}: {}", failure.path.display(), failure.reason)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use tidy_files::SweepFailure;

    struct AlwaysOk;

    impl TrashCan for AlwaysOk {
        fn send(&self, path: &Path) -> Result<(), String> {
            fs::remove_file(path).map_err(|e| e.to_string())
        }
    }

    struct AlwaysFails;

    impl TrashCan for AlwaysFails {
        fn send(&self, _path: &Path) -> Result<(), String> {
            Err("trash is full".to_string())
        }
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_inspect_missing_reports_error() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        run_inspect(&mut out, &dir.path().join("nope.txt")).unwrap();
        assert!(output(out).contains("does not exist"));
    }

    #[test]
    fn test_trash_declined_keeps_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keep.txt");
        fs::write(&path, "keep").unwrap();

        let mut out = Vec::new();
        run_trash(&mut Cursor::new("no\n"), &mut out, &AlwaysOk, &path, false).unwrap();

        assert!(path.exists());
        let text = output(out);
        assert!(text.contains("File Analysis:"));
        assert!(text.contains("Left '"));
    }

    #[test]
    fn test_trash_confirmed_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bye.txt");
        fs::write(&path, "bye").unwrap();

        let mut out = Vec::new();
        run_trash(&mut Cursor::new("yes\n"), &mut out, &AlwaysOk, &path, false).unwrap();

        assert!(!path.exists());
        assert!(output(out).contains("has been moved to the recycle bin"));
    }

    #[test]
    fn test_trash_failure_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stuck.txt");
        fs::write(&path, "stuck").unwrap();

        let mut out = Vec::new();
        run_trash(&mut Cursor::new(""), &mut out, &AlwaysFails, &path, true).unwrap();

        assert!(path.exists());
        assert!(output(out).contains("Reason: trash is full"));
    }

    #[test]
    fn test_trash_missing_file() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        run_trash(
            &mut Cursor::new(""),
            &mut out,
            &AlwaysOk,
            &dir.path().join("missing.txt"),
            true,
        )
        .unwrap();
        assert!(output(out).contains("The specified file does not exist."));
    }

    #[test]
    fn test_print_empty_report() {
        let mut out = Vec::new();
        print_sweep_report(&mut out, &SweepReport::default()).unwrap();
        assert_eq!(output(out), "No files met the criteria for being moved.\n");
    }

    #[test]
    fn test_print_report_lists_moves_and_failures() {
        let report = SweepReport {
            staging_dir: PathBuf::from("/tmp/Old_Files"),
            moved: vec![PathBuf::from("/data/a.txt")],
            failures: vec![SweepFailure {
                path: PathBuf::from("/data/b.txt"),
                reason: "Permission denied".to_string(),
            }],
            ..SweepReport::default()
        };
        let mut out = Vec::new();
        print_sweep_report(&mut out, &report).unwrap();
        let text = output(out);
        assert!(text.contains("file(s) to staging folder: /tmp/Old_Files"));
        assert!(text.contains(" - /data/a.txt"));
        assert!(text.contains(" - /data/b.txt: Permission denied"));
    }
}
