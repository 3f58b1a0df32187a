use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;
use weave_compiler::PostProcessConfig;

const EXAMPLE_DOCUMENT: &str = r#"<template>
  <button class="greeting" @click="greet">
    Hello, {{ name }}!
  </button>
</template>

<script>
export default {
  data() {
    return { name: "Weave" };
  },
  methods: {
    greet() {
      console.log(`Hello from ${this.name}`);
    },
  },
};
</script>

<style>
.greeting {
  padding: 8px 16px;
  margin: 0px;
  color: #ffffff;
  background: #3366ff;
}
</style>
"#;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Source directory
    #[arg(short, long, default_value = "src")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Weave project...".bright_blue().bold());

    // Create source directory if it doesn't exist
    let src_dir = cwd.join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        ..Config::default()
    };

    // Create example document
    let example_name = format!("App.{}", config.extension);
    let example_file = src_dir.join(&example_name);
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_DOCUMENT)?;
        println!("  {} Created {}", "✓".green(), example_name);
    }

    let mut config = config;
    config.pipeline.post_processing = PostProcessConfig {
        plugins: vec!["minify".to_string()],
        ..Default::default()
    };

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/{}", args.src_dir, example_name);
    println!("  2. Run: weave compile");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}
