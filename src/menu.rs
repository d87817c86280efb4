use crate::actions::{run_inspect, run_sweep, run_trash};
use crate::prompt::{prompt_days, prompt_line};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tidy_files::{ProgressReporter, Sweeper, TrashCan};

pub struct MenuContext<'a> {
    pub staging_dir: PathBuf,
    pub ignore_patterns: Vec<String>,
    pub trash: &'a dyn TrashCan,
    pub reporter: &'a dyn ProgressReporter,
}

/// Interactive loop. Returns on choice 4, any unknown choice, or end of input.
pub fn run_menu<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    ctx: &MenuContext<'_>,
) -> io::Result<()> {
    loop {
        writeln!(out, "\nChoose an option:")?;
        writeln!(out, "1. Analyze a specific file")?;
        writeln!(out, "2. Move a specific file to the recycle bin")?;
        writeln!(out, "3. Detect and move old files to the staging folder")?;
        writeln!(out, "4. Exit")?;

        let Some(choice) = prompt_line(input, out, "Enter your choice (1/2/3/4): ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let Some(path) =
                    prompt_line(input, out, "Enter the full path of the file to analyze: ")?
                else {
                    return Ok(());
                };
                run_inspect(out, Path::new(&path))?;
            }
            "2" => {
                let Some(path) = prompt_line(
                    input,
                    out,
                    "Enter the full path of the file to move to the recycle bin: ",
                )?
                else {
                    return Ok(());
                };
                run_trash(input, out, ctx.trash, Path::new(&path), false)?;
            }
            "3" => {
                let Some(folder) =
                    prompt_line(input, out, "Enter the folder path to scan for old files: ")?
                else {
                    return Ok(());
                };
                let folder = PathBuf::from(folder);
                if !folder.exists() {
                    writeln!(out, "The specified folder does not exist.")?;
                    continue;
                }
                let Some(days) = prompt_days(
                    input,
                    out,
                    "Enter the number of days of inactivity to qualify as 'old': ",
                )?
                else {
                    return Ok(());
                };
                let sweeper = Sweeper::new(ctx.staging_dir.clone(), days)
                    .with_ignore_patterns(&ctx.ignore_patterns);
                run_sweep(out, &sweeper, &folder, ctx.reporter)?;
            }
            _ => {
                writeln!(out, "Exiting. Goodbye!")?;
                return Ok(());
            }
        }
    }
}
