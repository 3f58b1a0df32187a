mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{compile, init, lint, CompileArgs, InitArgs, LintArgs};
use tracing_subscriber::EnvFilter;

/// Weave CLI - compile single-file components with pluggable section languages
#[derive(Parser, Debug)]
#[command(name = "weave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log pipeline stages (overridden by WEAVE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Weave project
    Init(InitArgs),

    /// Compile documents to JavaScript modules
    Compile(CompileArgs),

    /// Check markup sections for common mistakes
    Lint(LintArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("WEAVE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match std::env::current_dir().context("Cannot get current directory") {
        Ok(cwd) => match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Compile(args) => compile(args, &cwd).await,
            Command::Lint(args) => lint(args, &cwd),
        },
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
