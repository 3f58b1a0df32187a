use crate::commands::find_documents;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use weave_linter::{lint_document, Diagnostic, DiagnosticLevel, LintOptions};
use weave_parser::error::pretty;
use weave_parser::parse;

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Input document or directory to lint
    #[arg(default_value = ".")]
    pub input: PathBuf,

    /// Show all diagnostics including info level
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Default)]
struct Totals {
    diagnostics: usize,
    errors: usize,
    warnings: usize,
}

impl Totals {
    fn add(&mut self, diagnostics: &[Diagnostic]) {
        self.diagnostics += diagnostics.len();
        self.errors += count(diagnostics, DiagnosticLevel::Error);
        self.warnings += count(diagnostics, DiagnosticLevel::Warning);
    }
}

pub fn lint(args: LintArgs, cwd: &Path) -> Result<()> {
    let input = cwd.join(&args.input);
    let text = args.format != "json";

    if text {
        println!("🔍 {} Weave Linter", "Starting".green().bold());
        println!("   Input: {}", input.display());
        println!();
    }

    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        let config = Config::load(&input)?;
        let files = find_documents(&input, &config.extension);
        if text {
            println!("   Found {} .{} files", files.len(), config.extension);
            println!();
        }
        files
    } else {
        return Err(anyhow::anyhow!("Input path does not exist: {}", input.display()));
    };

    let mut totals = Totals::default();
    for file in &files {
        lint_file(file, &args, &mut totals)?;
    }

    if !text {
        return finish(&totals);
    }

    println!();
    println!(
        "✨ {} Linting complete!",
        if totals.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", files.len());
    println!("   Total diagnostics: {}", totals.diagnostics);

    if totals.errors > 0 {
        println!("   {} {}", "Errors:".red(), totals.errors);
    }
    if totals.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), totals.warnings);
    }

    if totals.errors == 0 && totals.warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }

    finish(&totals)
}

fn finish(totals: &Totals) -> Result<()> {
    if totals.errors > 0 {
        return Err(anyhow::anyhow!("{} lint error(s)", totals.errors));
    }
    Ok(())
}

fn lint_file(file_path: &Path, args: &LintArgs, totals: &mut Totals) -> Result<()> {
    let source = fs::read_to_string(file_path)?;

    let tree = match parse(&source) {
        Ok(tree) => tree,
        Err(err) => {
            let file_name = file_path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown");
            eprintln!(
                "{} Failed to parse {}:\n{}",
                "✗".red(),
                file_path.display(),
                pretty::format_error(&err, file_name, &source)
            );
            totals.errors += 1;
            return Ok(());
        }
    };

    let diagnostics = lint_document(&tree, &source, LintOptions::default());
    totals.add(&diagnostics);

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&diagnostics)?;
        println!("{}", json);
        return Ok(());
    }

    if diagnostics.is_empty() {
        if args.verbose {
            println!("{} {}", "✓".green(), file_path.display());
        }
        return Ok(());
    }

    println!("{}", file_path.display());

    for diagnostic in &diagnostics {
        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };

        if !args.verbose && diagnostic.level == DiagnosticLevel::Info {
            continue;
        }

        println!(
            "  {}:{} {} [{}] {}",
            diagnostic.location.line, diagnostic.location.column, level_str, diagnostic.rule, diagnostic.message
        );

        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "💡".dimmed(), suggestion.dimmed());
        }
    }

    println!();
    Ok(())
}

fn count(diagnostics: &[Diagnostic], level: DiagnosticLevel) -> usize {
    diagnostics.iter().filter(|d| d.level == level).count()
}
