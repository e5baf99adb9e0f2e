use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use storefront_editor::LayoutDocument;
use storefront_model::{walk_node, SectionNode, Visitor};

#[derive(Debug, Args)]
pub struct OutlineArgs {
    /// Layout file (defaults to the configured one)
    pub file: Option<PathBuf>,

    /// Show node ids
    #[arg(long)]
    pub ids: bool,
}

/// Renders the structure outline, one line per node
struct OutlinePrinter {
    show_ids: bool,
    lines: Vec<String>,
}

impl Visitor for OutlinePrinter {
    fn visit_node(&mut self, node: &SectionNode, depth: usize) {
        let mut line = format!("{}{}", "  ".repeat(depth), node.label());
        if node.display_name.is_some() {
            line.push_str(&format!(" {}", format!("({})", node.kind).dimmed()));
        }
        if node.is_container() && node.children().is_empty() {
            line.push_str(&format!(" {}", "[empty]".dimmed()));
        }
        if self.show_ids {
            line.push_str(&format!(" {}", format!("#{}", node.id).bright_black()));
        }
        self.lines.push(line);

        walk_node(self, node, depth);
    }
}

pub fn outline(args: OutlineArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = config.layout_path(cwd, args.file.as_deref());
    if !path.exists() {
        return Err(anyhow::anyhow!("Layout file does not exist: {}", path.display()));
    }

    let doc = LayoutDocument::load(path.clone())?;

    let mut printer = OutlinePrinter {
        show_ids: args.ids,
        lines: Vec::new(),
    };
    printer.visit_tree(doc.tree());

    println!("{} {}", "📐".bright_blue(), path.display().to_string().bold());
    for line in &printer.lines {
        println!("  {}", line);
    }
    println!();
    println!("   {} sections", doc.tree().node_count());

    Ok(())
}
