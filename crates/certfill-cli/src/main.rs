//! Certfill CLI entry point.
//!
//! Provides command-line tools for certificate configuration:
//! - `certfill render` - Fill a template from a record
//! - `certfill check` - Validate templates, fee schedules and jurisdictions
//! - `certfill fee` - Assess the printing fee for an event

mod commands;
mod logging;
mod output;

use std::io::{self, IsTerminal};
use std::process::exit;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{run_check, run_fee, run_render, CheckArgs, FeeArgs, RenderArgs};
use logging::{init_logging, LogConfig, LogFormat};

/// Certificate template and fee tools.
#[derive(Debug, Parser)]
#[command(name = "certfill")]
#[command(about = "Certificate template and fee tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value_t = LogFormatArg::Pretty, global = true)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fill a certificate template from a record
    Render(RenderArgs),
    /// Validate configuration files
    Check(CheckArgs),
    /// Assess the printing fee for an event
    Fee(FeeArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let with_ansi = match cli.color {
        ColorWhen::Auto => io::stderr().is_terminal(),
        ColorWhen::Always => true,
        ColorWhen::Never => false,
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    LogConfig::from_verbosity(cli.verbose)
        .with_format(format)
        .with_ansi(with_ansi)
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    init_logging(&log_config_from_cli(&cli));

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Check(args) => run_check(args),
        Commands::Fee(args) => run_fee(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
