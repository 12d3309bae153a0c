//! CLI entry point for turnplan.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::Result;
use crate::types::{InvocationState, RenderPlan, RenderUnit};

/// turnplan CLI
#[derive(Parser, Debug)]
#[command(
    name = "turnplan",
    version,
    about = "Render plans for streamed assistant turns"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the render plan for a JSONL log of parts
    Render(RenderArgs),
}

/// Arguments for `turnplan render`.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// JSONL file of wire parts, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Config file (defaults to ~/.turnplan/turnplan.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the plan after every accepted part instead of once at the end
    #[arg(long)]
    pub progressive: bool,
}

/// How plans are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Outline,
}

/// Render a plan in the requested format.
pub fn render(plan: &RenderPlan, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
        OutputFormat::Outline => Ok(outline(plan)),
    }
}

const PREVIEW_CHARS: usize = 60;

/// Plain-text outline, one line per unit and per group member.
pub fn outline(plan: &RenderPlan) -> String {
    let mut lines = Vec::new();
    for unit in plan {
        match unit {
            RenderUnit::Text { anchor, text } => {
                lines.push(format!("[{anchor}] text: {}", preview(text)));
            }
            RenderUnit::Reasoning { anchor, text } => {
                lines.push(format!("[{anchor}] reasoning: {}", preview(text)));
            }
            RenderUnit::SingleTool(invocation) => {
                lines.push(format!(
                    "[{}] tool {} {}: {}",
                    invocation.anchor,
                    invocation.tool,
                    invocation.call_id,
                    status(&invocation.state)
                ));
            }
            RenderUnit::GroupedTool(group) => {
                let state = if group.is_loading() { "loading" } else { "done" };
                lines.push(format!(
                    "[{}] group {} ({} calls, {state})",
                    group.anchor,
                    group.tool,
                    group.len()
                ));
                for invocation in &group.invocations {
                    lines.push(format!(
                        "    {}: {}",
                        invocation.call_id,
                        status(&invocation.state)
                    ));
                }
            }
        }
    }
    lines.join("\n")
}

fn status(state: &InvocationState) -> String {
    match state {
        InvocationState::Pending => "pending".to_string(),
        InvocationState::Resolved { .. } => "resolved".to_string(),
        InvocationState::Errored { message, .. } => format!("errored ({message})"),
    }
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        flat
    }
}
