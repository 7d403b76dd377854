//! `sociogram metrics`: group-level metrics only.

use std::io::Write;

use sociogram_core::config::AnalysisConfig;
use sociogram_core::metrics::global::GlobalMetrics;
use sociogram_core::model::Status;

use crate::cmd::{InputArgs, load_graph, run_analysis};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Execute `sociogram metrics`.
pub fn run_metrics(
    args: &InputArgs,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, output)?;
    let analysis = run_analysis(&graph, config, output)?;
    render_mode(output, &analysis.metrics, write_metrics_text, write_metrics_pretty)
}

pub fn write_metrics_text(m: &GlobalMetrics, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "cohesion_index={:.2}", m.cohesion_index)?;
    writeln!(w, "positive_density={:.2}", m.positive_density)?;
    writeln!(w, "negative_density={:.2}", m.negative_density)?;
    writeln!(w, "choice_reciprocity={:.2}", m.choice_reciprocity)?;
    writeln!(w, "rejection_reciprocity={:.2}", m.rejection_reciprocity)?;
    for status in Status::ALL {
        writeln!(w, "status.{status}={}", m.status_counts.get(status))?;
    }
    for cluster in &m.clusters {
        writeln!(w, "cluster.{}={}", cluster.id, cluster.members.join(","))?;
    }
    Ok(())
}

pub fn write_metrics_pretty(m: &GlobalMetrics, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Group metrics")?;
    pretty_kv(w, "Cohesion index", format!("{:.2}", m.cohesion_index))?;
    pretty_kv(w, "Positive density", format!("{:.2}", m.positive_density))?;
    pretty_kv(w, "Negative density", format!("{:.2}", m.negative_density))?;
    pretty_kv(w, "Choice reciprocity", format!("{:.2}", m.choice_reciprocity))?;
    pretty_kv(w, "Rejection reciprocity", format!("{:.2}", m.rejection_reciprocity))?;

    writeln!(w, "\nStatus distribution:")?;
    for status in Status::ALL {
        writeln!(w, "  {:<9} {}", status.as_str(), m.status_counts.get(status))?;
    }

    if !m.clusters.is_empty() {
        writeln!(w, "\nMutual-choice clusters:")?;
        for cluster in &m.clusters {
            writeln!(
                w,
                "  #{} ({} members, {} mutual pairs): {}",
                cluster.id,
                cluster.size,
                cluster.mutual_pairs,
                cluster.members.join(", ")
            )?;
        }
    }
    Ok(())
}
