//! Build automation tasks for the logwatch workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! # Available Commands
//!
//! - `check`: Run all checks (fmt, clippy, test)
//! - `fmt`: Format code with rustfmt
//! - `lint`: Run clippy with all targets
//! - `test`: Run all tests
//! - `build`: Build the `logwatch` binary
//! - `clean`: Clean build artifacts
//! - `doc`: Build documentation

// xtask is a build tool - printing to stderr is expected
#![allow(clippy::print_stderr)]

use std::process::Command;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};

/// Build automation for logwatch
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for logwatch")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks (fmt --check, clippy, test)
    Check,
    /// Format code with rustfmt
    Fmt {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy lints
    Lint {
        /// Automatically fix lint warnings
        #[arg(long)]
        fix: bool,
    },
    /// Run all tests
    Test {
        /// Run tests with release optimizations
        #[arg(long)]
        release: bool,
    },
    /// Build the logwatch binary
    Build {
        /// Build in debug mode
        #[arg(long)]
        debug: bool,
    },
    /// Clean build artifacts
    Clean,
    /// Generate documentation
    Doc {
        /// Open in browser after building
        #[arg(long)]
        open: bool,
    },
}

/// Workspace root, one level above this crate.
fn workspace_root() -> Utf8PathBuf {
    let manifest = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .map_or_else(|| manifest.to_owned(), Utf8Path::to_owned)
}

/// Runs `cargo` with `args` from the workspace root.
fn cargo(args: &[&str]) -> Result<()> {
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_owned());
    eprintln!("$ cargo {}", args.join(" "));

    let status = Command::new(&cargo)
        .args(args)
        .current_dir(workspace_root())
        .status()
        .with_context(|| format!("failed to run {cargo}"))?;

    if !status.success() {
        bail!("cargo {} failed with {status}", args.join(" "));
    }
    Ok(())
}

fn fmt(check: bool) -> Result<()> {
    if check {
        cargo(&["fmt", "--all", "--", "--check"])
    } else {
        cargo(&["fmt", "--all"])
    }
}

fn lint(fix: bool) -> Result<()> {
    if fix {
        cargo(&[
            "clippy",
            "--workspace",
            "--all-targets",
            "--fix",
            "--allow-dirty",
            "--allow-staged",
        ])
    } else {
        cargo(&[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ])
    }
}

fn test(release: bool) -> Result<()> {
    if release {
        cargo(&["test", "--workspace", "--release"])
    } else {
        cargo(&["test", "--workspace"])
    }
}

fn build(debug: bool) -> Result<()> {
    if debug {
        cargo(&["build", "-p", "lw-cli"])
    } else {
        cargo(&["build", "-p", "lw-cli", "--release"])
    }
}

fn doc(open: bool) -> Result<()> {
    if open {
        cargo(&["doc", "--workspace", "--no-deps", "--open"])
    } else {
        cargo(&["doc", "--workspace", "--no-deps"])
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            fmt(true)?;
            lint(false)?;
            test(false)
        }
        Commands::Fmt { check } => fmt(check),
        Commands::Lint { fix } => lint(fix),
        Commands::Test { release } => test(release),
        Commands::Build { debug } => build(debug),
        Commands::Clean => cargo(&["clean"]),
        Commands::Doc { open } => doc(open),
    }
}
