// SPDX-License-Identifier: AGPL-3.0-or-later
//! guard-fixer CLI - include-guard and copyright banner fixer
//!
//! Usage:
//!   guard-fixer <files-or-dirs>...            Fix headers in place
//!   guard-fixer --dry-run <files-or-dirs>...  Preview fixes without writing
//!   guard-fixer --check <files-or-dirs>...    Exit non-zero when a fix is needed

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use guard_fixer::{Config, GuardFixer, RunMode};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod exit_codes;
mod output;

use output::{OutputFormat, Outputter};

#[derive(Parser)]
#[command(name = "guard-fixer")]
#[command(about = "Fix C/C++ header include guards and copyright banners")]
#[command(version)]
struct Cli {
    /// Header files, or directories to search for headers
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Preview fixes without writing
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Do not write; exit with a findings code if any header needs a fix
    #[arg(long)]
    check: bool,

    /// Exit non-zero when any file could not be read or written
    #[arg(long)]
    strict: bool,

    /// Configuration file path
    #[arg(short, long, env = "GUARD_FIXER_CONFIG")]
    config: Option<PathBuf>,

    /// Organization named in inserted copyright banners
    #[arg(long)]
    organization: Option<String>,

    /// Contact line for inserted copyright banners
    #[arg(long)]
    contact: Option<String>,

    /// Year for inserted copyright banners (default: current year)
    #[arg(long)]
    year: Option<i32>,

    /// Output format (plain, json)
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Enable verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn mode(&self) -> RunMode {
        if self.check {
            RunMode::Check
        } else if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Write
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            exit_codes::CONFIG_ERROR
        }
    };

    if code != exit_codes::SUCCESS {
        tracing::debug!("exiting with {} ({})", code, exit_codes::describe(code));
    }
    ExitCode::from(code as u8)
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_directive = if quiet {
        "guard_fixer=error"
    } else {
        match verbose {
            0 => "guard_fixer=warn",
            1 => "guard_fixer=info",
            2 => "guard_fixer=debug",
            _ => "guard_fixer=trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<i32> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(organization) = &cli.organization {
        config.banner.organization = organization.clone();
    }
    if let Some(contact) = &cli.contact {
        config.banner.contact = contact.clone();
    }
    if cli.year.is_some() {
        config.banner.year = cli.year;
    }

    let format = match cli.output {
        Some(format) => format,
        None => match config.output.format.parse::<OutputFormat>() {
            Ok(format) => format,
            Err(e) => {
                error!("{}", e);
                return Ok(exit_codes::INVALID_ARGUMENTS);
            }
        },
    };

    let mode = cli.mode();
    let fixer = GuardFixer::from_config(&config);
    let reports = fixer.fix_paths(&cli.paths, mode);

    if let Err(e) = Outputter::new(format, cli.quiet).reports(&reports) {
        error!("Failed to write report: {}", e);
        return Ok(exit_codes::GENERAL_ERROR);
    }

    Ok(exit_codes::for_run(&reports, mode, cli.strict))
}
