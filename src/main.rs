mod actions;
mod cli;
mod logging;
mod menu;
mod prompt;
mod reporter;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, SweepArgs};
use dotenv::dotenv;
use menu::MenuContext;
use reporter::CliReporter;
use std::io;
use std::process;
use tidy_files::{AppConfig, Sweeper, SystemTrash};
use tracing::{debug, error};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let loaded = match &args.config {
        Some(path) => tidy_files::config::load_configuration_from(path),
        None => tidy_files::config::load_configuration(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };
    debug!("config: {:?}", config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match args.command {
        Some(Commands::Inspect { path }) => {
            actions::run_inspect(&mut out, &path)?;
        }
        Some(Commands::Trash { path, yes }) => {
            actions::run_trash(&mut input, &mut out, &SystemTrash, &path, yes)?;
        }
        Some(Commands::Sweep(sweep_args)) => {
            run_sweep(&config, sweep_args)?;
        }
        Some(Commands::Menu) => {
            let reporter = CliReporter::new();
            let ctx = MenuContext {
                staging_dir: config.resolve_staging_dir(),
                ignore_patterns: config.ignore_patterns.clone(),
                trash: &SystemTrash,
                reporter: &reporter,
            };
            menu::run_menu(&mut input, &mut out, &ctx).context("interactive menu failed")?;
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            println!(
                "Staging directory: {}",
                config.resolve_staging_dir().display()
            );
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_sweep(config: &AppConfig, args: SweepArgs) -> anyhow::Result<()> {
    let staging_dir = args
        .staging_dir
        .unwrap_or_else(|| config.resolve_staging_dir());
    let sweeper = Sweeper::new(staging_dir, args.days)
        .with_ignore_patterns(&config.ignore_patterns)
        .with_dry_run(args.dry_run);
    let reporter = CliReporter::new();

    actions::run_sweep(&mut io::stdout(), &sweeper, &args.dir, &reporter)
        .with_context(|| format!("failed to report sweep of {}", args.dir.display()))
}
