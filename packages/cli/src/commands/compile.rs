use crate::commands::find_documents;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use weave_compiler::{CompileError, CompileOutput, CompilerRegistry, Pipeline};
use weave_parser::error::pretty;
use weave_parser::line_start_offset;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Document or project directory to compile (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

pub async fn compile(args: CompileArgs, cwd: &Path) -> Result<()> {
    let target = cwd.join(&args.path);
    let single_file = target.is_file();
    let config_dir = if single_file { cwd.to_path_buf() } else { target.clone() };
    let config = Config::load(&config_dir)?;

    let (root, files) = if single_file {
        let root = target.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.to_path_buf());
        (root, vec![target.clone()])
    } else {
        let src_dir = config.get_src_dir(&config_dir);
        if !src_dir.exists() {
            return Err(anyhow!("Source directory does not exist: {}", src_dir.display()));
        }
        let files = find_documents(&src_dir, &config.extension);
        (src_dir, files)
    };

    let out_dir = match &args.out_dir {
        Some(out) => cwd.join(out),
        None => config.get_out_dir(&config_dir),
    };

    if !args.stdout {
        println!("{}", "🔨 Compiling Weave documents...".bright_blue().bold());
    }

    if files.is_empty() {
        println!("{}", format!("⚠️  No .{} files found", config.extension).yellow());
        return Ok(());
    }

    let options = config.pipeline.into_options()?;
    let pipeline = Pipeline::new(Arc::new(CompilerRegistry::builtin()), options);

    // Documents are independent; one pipeline serves them all
    let mut tasks = JoinSet::new();
    for (index, file) in files.iter().cloned().enumerate() {
        let pipeline = pipeline.clone();
        tasks.spawn(async move {
            let result = compile_document(&pipeline, &file).await;
            (index, file, result)
        });
    }

    let mut results = Vec::with_capacity(files.len());
    while let Some(joined) = tasks.join_next().await {
        results.push(joined?);
    }
    results.sort_by_key(|(index, _, _)| *index);

    let mut success_count = 0;
    let mut error_count = 0;

    for (_, file, result) in results {
        let relative_path = file.strip_prefix(&root).unwrap_or(&file).to_path_buf();
        match result.and_then(|output| emit(&output, &relative_path, &out_dir, args.stdout)) {
            Ok(written) => {
                success_count += 1;
                if !args.stdout {
                    println!("  {} {} → {}", "✓".green(), relative_path.display(), written.join(", "));
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), relative_path.display(), e.to_string().red());
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} document(s) failed to compile", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!("{} Compiled {} files successfully", "✅".green(), success_count);
        Ok(())
    } else {
        println!("{} Compiled {} files, {} errors", "⚠️".yellow(), success_count, error_count);
        Err(anyhow!("{} document(s) failed to compile", error_count))
    }
}

async fn compile_document(pipeline: &Pipeline, file: &Path) -> Result<CompileOutput> {
    let source = fs::read_to_string(file)?;
    let document_id = file.display().to_string();

    pipeline
        .compile(&source, &document_id)
        .await
        .map_err(|e| anyhow!("{}", format_compile_error(&e, file, &source)))
}

/// Write (or print) the compiled artifacts, returning where they went
fn emit(output: &CompileOutput, relative_path: &Path, out_dir: &Path, stdout: bool) -> Result<Vec<String>> {
    if stdout {
        println!("{}", output.code);
        if let Some(style) = &output.style {
            println!("{}", style);
        }
        return Ok(vec!["stdout".to_string()]);
    }

    let (code_file, style_file) = output_paths(out_dir, relative_path);
    if let Some(parent) = code_file.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&code_file, &output.code)?;
    let mut written = vec![code_file.display().to_string()];

    if let Some(style) = &output.style {
        fs::write(&style_file, style)?;
        written.push(style_file.display().to_string());
    }

    Ok(written)
}

/// `<name>.js` and `<name>.style.js` below the output directory
fn output_paths(out_dir: &Path, relative_path: &Path) -> (PathBuf, PathBuf) {
    let base = out_dir.join(relative_path);
    (base.with_extension("js"), base.with_extension("style.js"))
}

fn format_compile_error(err: &CompileError, file: &Path, source: &str) -> String {
    let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or("unknown");

    match err {
        CompileError::Parse(parse_error) => {
            format!("\n{}", pretty::format_error(parse_error, file_name, source))
        }
        _ => match err.line() {
            Some(line) => format!("{}\n{}", err, source_excerpt(source, line)),
            None => err.to_string(),
        },
    }
}

/// The offending line with its number, as `    7 | text`
fn source_excerpt(source: &str, line: u32) -> String {
    let start = line_start_offset(source, line);
    let text = source[start..].lines().next().unwrap_or("");
    format!("{:>5} | {}", line, text)
}
