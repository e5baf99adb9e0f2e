use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use storefront_editor::locator;
use storefront_model::{walk_node, LayoutTree, SectionNode, Visitor};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Layout file (defaults to the configured one)
    pub file: Option<PathBuf>,
}

#[derive(Debug, Default, PartialEq)]
struct Stats {
    containers: usize,
    leaves: usize,
    empty_containers: usize,
    max_depth: usize,
}

impl Visitor for Stats {
    fn visit_node(&mut self, node: &SectionNode, depth: usize) {
        if node.is_container() {
            self.containers += 1;
            if node.children().is_empty() {
                self.empty_containers += 1;
            }
        } else {
            self.leaves += 1;
        }
        self.max_depth = self.max_depth.max(depth + 1);

        walk_node(self, node, depth);
    }
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = config.layout_path(cwd, args.file.as_deref());

    println!("🔍 {} {}", "Validating".green().bold(), path.display());

    // Read raw: loading through LayoutDocument would silently re-mint duplicates
    let source = fs::read_to_string(&path)
        .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;
    let tree = LayoutTree::from_json(&source)?;

    let mut stats = Stats::default();
    stats.visit_tree(&tree);

    println!("   Sections:   {}", tree.node_count());
    println!("   Containers: {} ({} empty)", stats.containers, stats.empty_containers);
    println!("   Leaves:     {}", stats.leaves);
    println!("   Max depth:  {}", stats.max_depth);

    let duplicates = locator::duplicate_ids(&tree);
    if duplicates.is_empty() {
        println!();
        println!("{} Layout is valid", "✅".green());
        Ok(())
    } else {
        println!();
        for id in &duplicates {
            eprintln!("  {} duplicate id {}", "✗".red(), id.bright_white());
        }
        Err(anyhow!("{} duplicate id(s) found", duplicates.len()))
    }
}
