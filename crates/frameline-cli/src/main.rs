mod commands;
mod logging;
mod progress;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use frameline_core::sequence::parse_sequence_number;
use frameline_core::{
    AppConfig, ContinuityChecker, ExifExtractor, ProgressReporter, SilentReporter,
};
use progress::CliReporter;
use tracing::{error, info};

/// Exit status when the check ran but found missing or unorderable frames.
const EXIT_GAPS_FOUND: i32 = 2;

fn main() {
    dotenv().ok();

    let guard = logging::init_logger();
    let code = run(Cli::parse());

    // flush the file appender before exiting
    drop(guard);
    process::exit(code);
}

fn run(args: Cli) -> i32 {
    let config = match frameline_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            return 1;
        }
    };

    match args.command {
        Some(Commands::Check { dir, quiet }) => match run_check(&config, &dir, quiet) {
            Ok(true) => EXIT_GAPS_FOUND,
            Ok(false) => 0,
            Err(err) => {
                error!("Error: {:#}", err);
                1
            }
        },
        Some(Commands::Inspect { files }) => {
            run_inspect(&files);
            0
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            println!(
                "Effective worker threads: {}",
                config.effective_worker_threads()
            );
            0
        }
        None => {
            let _ = Cli::command().print_long_help();
            0
        }
    }
}

/// Returns whether any group is incomplete.
fn run_check(config: &AppConfig, dir: &Path, quiet: bool) -> anyhow::Result<bool> {
    let reporter: Box<dyn ProgressReporter> = if quiet {
        Box::new(SilentReporter)
    } else {
        Box::new(CliReporter::new())
    };

    let report = ContinuityChecker::new(config.clone())
        .check(dir, reporter.as_ref())
        .with_context(|| format!("Continuity check of {} could not run", dir.display()))?;

    for line in report.render().lines() {
        println!("{}", colorize(line));
    }

    let incomplete = report.groups.iter().filter(|g| g.is_incomplete()).count();
    info!(
        "{} files in {} groups, {} incomplete",
        format!("{}", report.total_files).green(),
        format!("{}", report.groups.len()).cyan(),
        format!("{}", incomplete).red(),
    );

    Ok(report.has_gaps())
}

fn colorize(line: &str) -> ColoredString {
    if line.starts_with("Checking files from device") {
        line.bold()
    } else if line.contains("Could not order files") {
        line.red()
    } else if line.contains("==== missing files:") {
        line.yellow()
    } else {
        line.normal()
    }
}

fn run_inspect(files: &[PathBuf]) {
    let extractor = ExifExtractor::new();

    for path in files {
        let (identity, strategy) = extractor.extract_with_strategy(path);
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let frame = match parse_sequence_number(&file_name) {
            Ok(n) => format!("{:04}", n),
            Err(_) => "none".to_string(),
        };

        println!(
            "{}: model \"{}\", serial number \"{}\", frame {} ({:?} strategy)",
            file_name.bold(),
            identity.model,
            identity.serial_number,
            frame,
            strategy,
        );
    }
}
