//! riftctl - Oculus Rift DK1 tracker CLI
//!
//! Lists attached trackers, dumps the calibration constants read at open,
//! polls live motion readings and writes sensor config flags.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod config;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{parse_hex_u8, parse_hex_u16};

#[derive(Parser)]
#[command(name = "riftctl")]
#[command(about = "Oculus Rift DK1 tracker CLI - inspect calibration and poll motion data")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Sensor link configuration file (YAML, or JSON by extension)
    #[arg(long, global = true, env = "RIFTCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Vendor ID override (hex, e.g. 0x2833)
    #[arg(long, global = true, value_parser = parse_hex_u16)]
    vid: Option<u16>,

    /// Product ID override (hex, e.g. 0x0001)
    #[arg(long, global = true, value_parser = parse_hex_u16)]
    pid: Option<u16>,

    /// Talk to a simulated tracker (for testing)
    #[arg(long, global = true, hide = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List attached trackers
    List,

    /// Show display geometry, sensor range and sensor config
    Info,

    /// Poll and print motion readings
    Monitor {
        /// Stop after this many seconds (default: run until interrupted)
        #[arg(long)]
        duration_secs: Option<u64>,

        /// Delay between polls in milliseconds
        #[arg(long, default_value = "10")]
        interval_ms: u64,
    },

    /// Write the sensor config flag byte (hex, e.g. 0x40)
    SetFlags {
        #[arg(value_parser = parse_hex_u8)]
        flags: u8,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("riftctl={log_level},rift_sensor_link={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(error::exit_code(&e))
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    if let Commands::Completion { shell } = &cli.command {
        completion::generate_completion(*shell);
        return Ok(());
    }

    let link_config = config::load(cli.config.as_deref(), cli.vid, cli.pid)?;
    let registry = commands::open_registry(link_config, cli.mock)?;

    match &cli.command {
        Commands::List => commands::device::list(&registry, cli.json),
        Commands::Info => commands::device::info(&registry, cli.json),
        Commands::Monitor {
            duration_secs,
            interval_ms,
        } => commands::monitor::execute(&registry, *duration_secs, *interval_ms, cli.json),
        Commands::SetFlags { flags } => commands::flags::set(&registry, *flags, cli.json),
        Commands::Completion { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_list_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["riftctl", "list"])?;
        assert!(!cli.json);
        assert!(!cli.mock);
        assert_eq!(cli.verbose, 0);
        assert!(cli.vid.is_none());
        assert!(matches!(cli.command, Commands::List));
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["riftctl", "info", "--json", "--vid", "0x2833", "--pid", "0001", "-vv"])?;
        assert!(cli.json);
        assert_eq!(cli.vid, Some(0x2833));
        assert_eq!(cli.pid, Some(0x0001));
        assert_eq!(cli.verbose, 2);
        Ok(())
    }

    #[test]
    fn parse_monitor_options() -> TestResult {
        let cli = Cli::try_parse_from(["riftctl", "monitor", "--duration-secs", "3"])?;
        assert!(matches!(
            cli.command,
            Commands::Monitor {
                duration_secs: Some(3),
                interval_ms: 10
            }
        ));
        Ok(())
    }

    #[test]
    fn parse_set_flags_hex() -> TestResult {
        let cli = Cli::try_parse_from(["riftctl", "set-flags", "0x40"])?;
        assert!(matches!(cli.command, Commands::SetFlags { flags: 0x40 }));
        assert!(Cli::try_parse_from(["riftctl", "set-flags", "0x400"]).is_err());
        Ok(())
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
