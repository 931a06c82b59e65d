//! Command‑line entry point for the `hpcb` tool.
//!
//! Provides subcommands to generate heater boards, inspect the order search,
//! and list curve points.

use std::{
    fmt::Display,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hilbertpcb::{TraceChoice, board};
use tracing_subscriber::EnvFilter;

/// CLI command implementations.
mod cmd;

use crate::cmd::{Design, Format};

#[derive(Parser)]
#[command(name = "hpcb")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top‑level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, action = clap::ArgAction::Count, help = "Sets the level of verbosity")]
    v: u8,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Which trace to place on the board.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum TraceArg {
    /// Shortest trace meeting the electrical minimum width.
    Min,
    /// Longest trace that fits the board.
    Max,
}

impl From<TraceArg> for TraceChoice {
    fn from(arg: TraceArg) -> Self {
        match arg {
            TraceArg::Min => Self::Minimum,
            TraceArg::Max => Self::Maximum,
        }
    }
}

/// Output format for `generate`.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum FormatArg {
    /// Legacy `PCBNEW-BOARD` text.
    Legacy,
    /// JSON.
    Json,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Legacy => Self::Legacy,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Operating point and board options shared by `generate` and `search`.
#[derive(Args, Clone, Copy, Debug)]
struct DesignArgs {
    #[arg(long, default_value_t = 12.0, help = "Supply voltage")]
    /// Supply voltage.
    volts: f64,

    #[arg(long, default_value_t = 100.0, help = "Power to dissipate in watts")]
    /// Power to dissipate.
    watts: f64,

    #[arg(
        short = 's',
        long,
        default_value_t = 5.0,
        help = "Square board side in inches"
    )]
    /// Board side in inches.
    size: f64,

    #[arg(
        long,
        default_value_t = board::DEFAULT_CLEARANCE_MILS,
        help = "Clearance between adjacent runs in mils"
    )]
    /// Clearance in mils.
    clearance: f64,

    #[arg(
        long,
        default_value_t = hilbertpcb::electrical::DEFAULT_RISE_C,
        help = "Allowed temperature rise in °C"
    )]
    /// Temperature rise.
    rise: f64,

    #[arg(
        long,
        default_value_t = board::DEFAULT_MARGIN,
        help = "Offset of the board from the drawing origin in 1/10000 inch"
    )]
    /// Drawing margin.
    margin: i64,
}

impl From<DesignArgs> for Design {
    fn from(a: DesignArgs) -> Self {
        Self {
            volts: a.volts,
            watts: a.watts,
            size: a.size,
            clearance: a.clearance,
            rise: a.rise,
            margin: a.margin,
        }
    }
}

#[derive(Subcommand)]
/// Subcommands supported by the `hpcb` tool.
enum Commands {
    #[command(about = "Generate a heater board")]
    /// Generate a heater board.
    Generate {
        #[command(flatten)]
        /// Operating point and board.
        design: DesignArgs,

        #[arg(
            short = 't',
            long,
            value_enum,
            default_value = "max",
            help = "Trace to place"
        )]
        /// Trace to place.
        trace: TraceArg,

        #[arg(
            short = 'f',
            long,
            value_enum,
            default_value = "legacy",
            help = "Output format"
        )]
        /// Output format.
        format: FormatArg,

        #[arg(help = "Output file (defaults to stdout)")]
        /// Output path.
        output: Option<PathBuf>,
    },
    #[command(about = "Report the curve orders bounding a design")]
    /// Report the order search.
    Search {
        #[command(flatten)]
        /// Operating point and board.
        design: DesignArgs,
    },
    #[command(about = "List the board positions of a curve's points")]
    /// List curve points.
    Points {
        #[arg(short = 'o', long, help = "Curve order")]
        /// Curve order.
        order: u32,

        #[arg(
            short = 's',
            long,
            default_value_t = 5.0,
            help = "Square board side in inches"
        )]
        /// Board side in inches.
        size: f64,
    },
}

/// Default log filter for a `-v` count.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Exit with status 1 after printing the error chain.
fn report<E: Display>(result: Result<(), E>) {
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Like [`report`], printing `ok_msg` on success.
fn report_ok<E: Display>(result: Result<(), E>, ok_msg: &str) {
    report(result);
    println!("{ok_msg}");
}

/// Write `text` to `output`, or stdout when no path is given.
fn deliver(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Handle the `generate` subcommand.
fn handle_generate(
    design: &Design,
    trace: TraceArg,
    format: FormatArg,
    output: Option<&Path>,
) -> Result<()> {
    let text = cmd::generate(design, trace.into(), format.into())?;
    deliver(&text, output)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.v);

    match cli.command {
        Commands::Generate {
            design,
            trace,
            format,
            output,
        } => {
            let result = handle_generate(&design.into(), trace, format, output.as_deref());
            match output {
                Some(path) => report_ok(result, &format!("Wrote {}", path.display())),
                None => report(result),
            }
        }
        Commands::Search { design } => {
            report(cmd::search(&design.into()).and_then(|text| deliver(&text, None)));
        }
        Commands::Points { order, size } => {
            report(cmd::points(order, size).and_then(|text| deliver(&text, None)));
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands, TraceArg, level_for};

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["hpcb", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                design,
                trace,
                output,
                ..
            } => {
                assert_eq!(design.volts, 12.0);
                assert_eq!(design.watts, 100.0);
                assert_eq!(design.size, 5.0);
                assert_eq!(design.clearance, 10.0);
                assert_eq!(design.rise, 100.0);
                assert_eq!(design.margin, 10_000);
                assert!(matches!(trace, TraceArg::Max));
                assert!(output.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn rejects_unknown_trace() {
        assert!(Cli::try_parse_from(["hpcb", "generate", "--trace", "mid"]).is_err());
    }
}
