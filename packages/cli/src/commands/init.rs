use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use storefront_editor::LayoutDocument;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Layout file to create
    #[arg(short, long, default_value = "homepage.json")]
    pub layout_file: String,

    /// Force overwrite existing config and layout
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing storefront layout...".bright_blue().bold());

    let config = Config {
        layout_file: args.layout_file.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let layout_path = config.layout_path(cwd, None);
    if args.force && layout_path.exists() {
        fs::remove_file(&layout_path)?;
    }

    if layout_path.exists() {
        println!("  {} Kept existing {}", "•".dimmed(), args.layout_file);
    } else {
        // Loading a missing file yields the default homepage
        let mut doc = LayoutDocument::load(layout_path)?;
        doc.save()?;
        println!(
            "  {} Created {} ({} sections)",
            "✓".green(),
            args.layout_file,
            doc.tree().node_count()
        );
    }

    println!();
    println!("{} Ready. Try {}", "✅".green(), "storefront outline".bright_white());

    Ok(())
}
