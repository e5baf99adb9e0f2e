use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use storefront_editor::{LayoutDocument, Mutation};
use tracing::info;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// JSON file containing an array of mutations
    pub script: PathBuf,

    /// Layout file (defaults to the configured one)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the result instead of saving it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = config.layout_path(cwd, args.file.as_deref());
    let mutations = read_script(&PathBuf::from(cwd).join(&args.script))?;

    println!(
        "{} {} mutation(s) to {}",
        "🔨 Applying".bright_blue().bold(),
        mutations.len(),
        path.display()
    );

    let mut doc = LayoutDocument::load(path)?;
    let mut session = doc.session(config.editor.clone());

    let mut applied = 0;
    let mut skipped = 0;
    for mutation in mutations {
        let label = mutation.describe();
        match session.apply(mutation) {
            Ok(true) => {
                applied += 1;
                println!("  {} {}", "✓".green(), label);
            }
            Ok(false) => {
                skipped += 1;
                println!("  {} {} {}", "•".yellow(), label, "(skipped)".dimmed());
            }
            Err(e) => {
                eprintln!("  {} {} - {}", "✗".red(), label, e.to_string().red());
                return Err(anyhow!("Aborted after {} mutation(s); nothing saved", applied));
            }
        }
    }

    if args.dry_run {
        println!("{}", session.current().to_json_pretty()?);
        println!("{}", "(dry run, not saved)".dimmed());
        return Ok(());
    }

    doc.set_tree(session.current().clone());
    doc.save()?;
    info!(applied, skipped, "Layout updated");

    println!();
    println!("{} Applied {}, skipped {}", "✅".green(), applied, skipped);
    Ok(())
}

fn read_script(path: &Path) -> Result<Vec<Mutation>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read script {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid mutation script {}", path.display()))
}
