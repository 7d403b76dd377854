pub mod analyze;
pub mod metrics;
pub mod validate;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use sociogram_core::config::AnalysisConfig;
use sociogram_core::error::{ErrorCode, GraphError};
use sociogram_core::model::InputGraph;
use sociogram_core::{Analysis, analyze};
use tracing::debug;

use crate::output::{CliError, OutputMode, render_error};

/// Input argument shared by every command.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Graph JSON file, or `-` to read stdin.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

/// Read and parse an input graph, rendering a coded error on failure.
pub fn load_graph(input: &Path, output: OutputMode) -> anyhow::Result<InputGraph> {
    match read_graph(input) {
        Ok(graph) => {
            debug!(
                nodes = graph.nodes.len(),
                edges = graph.edges.len(),
                "loaded input graph"
            );
            Ok(graph)
        }
        Err(err) => {
            render_error(
                output,
                &CliError::coded(format!("{err:#}"), ErrorCode::InputParseError),
            )?;
            Err(err)
        }
    }
}

fn read_graph(input: &Path) -> anyhow::Result<InputGraph> {
    let (text, origin) = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read graph from stdin")?;
        (buf, "stdin".to_string())
    } else {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        (text, input.display().to_string())
    };

    serde_json::from_str(&text).with_context(|| format!("Failed to parse graph JSON from {origin}"))
}

/// Run the full analysis, rendering a coded error when the graph is rejected.
pub fn run_analysis(
    graph: &InputGraph,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<Analysis> {
    analyze(graph, config).or_else(|err: GraphError| {
        render_error(output, &CliError::from(&err))?;
        Err(err.into())
    })
}
