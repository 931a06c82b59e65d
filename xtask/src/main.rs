//! Project automation tasks.
//!
//! Run via `cargo xtask <command>`.

use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use xshell::{Shell, cmd};

/// Operating points rendered by `sample`: volts, watts, board side in inches.
const SAMPLES: &[(&str, &str, &str)] = &[("12", "50", "5"), ("12", "100", "6"), ("24", "100", "10")];

/// Command line interface for the `xtask` helper.
#[derive(Debug, Parser)]
#[command(name = "xtask")]
struct Cli {
    /// Task to run.
    #[command(subcommand)]
    command: CommandName,
}

/// Supported automation commands.
#[derive(Debug, Subcommand)]
enum CommandName {
    /// Format the workspace and run the linter.
    Tidy,
    /// Run tests using cargo nextest.
    Test,
    /// Generate sample heater boards into `target/samples/`.
    Sample,
}

/// Common repository paths computed relative to the `xtask` crate.
#[derive(Debug, Clone)]
struct RepoPaths {
    /// Repository root directory.
    root: PathBuf,
    /// Output directory for `sample`.
    samples: PathBuf,
}

impl RepoPaths {
    /// Discover repository paths from `CARGO_MANIFEST_DIR`.
    fn discover() -> Result<Self> {
        let xtask_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let root = xtask_dir
            .parent()
            .context("xtask crate must live at <repo>/xtask")?
            .to_path_buf();

        Ok(Self {
            samples: root.join("target").join("samples"),
            root,
        })
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

/// Dispatch the selected `xtask` command.
fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = RepoPaths::discover()?;

    match cli.command {
        CommandName::Tidy => tidy(&paths),
        CommandName::Test => test(&paths),
        CommandName::Sample => sample(&paths),
    }
}

/// Run `cargo fmt` and the workspace linter.
fn tidy(paths: &RepoPaths) -> Result<()> {
    format_workspace(paths)?;
    lint_workspace(paths)?;
    format_workspace(paths)?;
    Ok(())
}

/// Run tests using cargo nextest.
fn test(paths: &RepoPaths) -> Result<()> {
    let sh = repo_shell(paths)?;
    cmd!(sh, "cargo nextest run --all").run()?;
    Ok(())
}

/// Format the Rust workspace using rustfmt.
fn format_workspace(paths: &RepoPaths) -> Result<()> {
    let sh = repo_shell(paths)?;

    let config = paths.root.join("rustfmt-nightly.toml");
    if config.is_file() {
        cmd!(sh, "cargo +nightly fmt --all -- --config-path {config}").run()?;
        return Ok(());
    }

    cmd!(sh, "cargo +nightly fmt --all").run()?;
    Ok(())
}

/// Run clippy across the workspace, applying safe fixes.
fn lint_workspace(paths: &RepoPaths) -> Result<()> {
    let sh = repo_shell(paths)?;
    cmd!(
        sh,
        "cargo clippy -q --fix --all --all-targets --all-features --allow-dirty --tests --examples"
    )
    .run()?;
    Ok(())
}

/// Create a verbose shell rooted at the repository root.
fn repo_shell(paths: &RepoPaths) -> Result<Shell> {
    let sh = Shell::new()?;
    sh.change_dir(&paths.root);
    Ok(sh)
}

/// Render the maximum-length trace for each sample operating point.
///
/// Operating points whose search hits the order cap or finds nothing that
/// fits are reported and skipped.
fn sample(paths: &RepoPaths) -> Result<()> {
    let sh = repo_shell(paths)?;
    fs::create_dir_all(&paths.samples).with_context(|| {
        format!(
            "failed to create samples dir {}",
            paths.samples.display()
        )
    })?;

    cmd!(sh, "cargo build -q --release -p hpcb").run()?;
    let hpcb = paths.root.join("target").join("release").join("hpcb");

    for &(volts, watts, size) in SAMPLES {
        let out = paths
            .samples
            .join(format!("heater-{volts}v-{watts}w-{size}in.brd"));
        let result = cmd!(
            sh,
            "{hpcb} generate --volts {volts} --watts {watts} --size {size} {out}"
        )
        .run();
        if let Err(err) = result {
            eprintln!("skipping {volts}V {watts}W {size}in: {err}");
        }
    }

    println!("Samples in {}:", paths.samples.display());
    for path in sorted_files(&paths.samples)? {
        println!("{}", describe_file(&path)?);
    }
    Ok(())
}

/// Return an iterator of files in `dir`, sorted by filename.
fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read directory entry in {}", dir.display()))?
            .path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Describe a file size and basename.
fn describe_file(path: &Path) -> Result<String> {
    let metadata =
        fs::metadata(path).with_context(|| format!("failed to stat file {}", path.display()))?;
    let size = human_size(metadata.len());
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    Ok(format!("{size} \t{name}"))
}

/// Render a byte count as a human-friendly string.
fn human_size(bytes: u64) -> String {
    let units = ["B", "KB", "MB", "GB", "TB"];
    let mut amount = bytes as f64;

    for unit in units {
        if amount < 1024.0 || unit == units[units.len() - 1] {
            return format!("{amount:.1} {unit}");
        }
        amount /= 1024.0;
    }

    format!("{amount:.1} PB")
}
