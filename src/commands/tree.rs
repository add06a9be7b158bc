//! # Tree Command Implementation
//!
//! Displays, for every model directory, which components refine, see or
//! extend which, followed by the order in which `convert --merge` would print
//! them. Each model is resolved first, so a broken hierarchy is reported the
//! same way as during conversion.
//!
//! This command is read-only.

use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ptree::{write_tree, Style, TreeItem};

use eventb_to_txt::archive;
use eventb_to_txt::output::OutputConfig;
use eventb_to_txt::phases::orchestrator::{self, LoadedModel};
use eventb_to_txt::phases::{graph, DependencyGraph, OutputMode};

/// Display the reference hierarchy of each model
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Model directory or zip archive of one
    #[arg(value_name = "INPUT", default_value = ".")]
    pub input: PathBuf,
}

/// Execute the `tree` command
pub fn execute(args: TreeArgs, output: &OutputConfig) -> Result<()> {
    let source = archive::prepare(&args.input)?;
    let models = orchestrator::load(source.root(), OutputMode::Merge)?;

    for (i, model) in models.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", render_model(model, output)?);
    }
    Ok(())
}

/// Hierarchy and print order of one model as text
fn render_model(model: &LoadedModel, output: &OutputConfig) -> io::Result<String> {
    let mut text = format!(
        "{} {}\n",
        output.emoji("🌳", "Model"),
        output.heading(&model.group.name())
    );

    let graph = graph::execute(&model.registry);
    for root in graph.roots() {
        let mut buffer = Vec::new();
        write_tree(&build_tree_node(model, &graph, root), &mut buffer)?;
        text.push_str(&String::from_utf8_lossy(&buffer));
    }

    text.push_str(&format!("Print order: {}\n", model.queue.order.join(", ")));
    Ok(text)
}

/// Build the node of an artifact with its references as children
fn build_tree_node(model: &LoadedModel, graph: &DependencyGraph, name: &str) -> TreeNode {
    let label = match model.registry.get(name) {
        Some(artifact) => format!("{} {}", artifact.kind(), name),
        None => name.to_string(),
    };
    let children = graph
        .references(name)
        .iter()
        .map(|reference| build_tree_node(model, graph, reference))
        .collect();

    TreeNode { label, children }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
