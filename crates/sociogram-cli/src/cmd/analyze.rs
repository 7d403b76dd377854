//! `sociogram analyze`: enriched graph, group metrics and diagnostics.

use std::io::Write;

use sociogram_core::Analysis;
use sociogram_core::config::AnalysisConfig;

use crate::cmd::{InputArgs, load_graph, run_analysis};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Execute `sociogram analyze`.
pub fn run_analyze(
    args: &InputArgs,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, output)?;
    let analysis = run_analysis(&graph, config, output)?;
    render_mode(output, &analysis, render_analysis_text, render_analysis_pretty)
}

fn render_analysis_text(analysis: &Analysis, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "hash={}", analysis.content_hash)?;
    for node in &analysis.graph.nodes {
        let m = &node.metrics;
        writeln!(
            w,
            "node id={} status={} popularity={:.2} antipathy={:.2} choices={}/{} rejections={}/{}",
            node.id,
            m.status,
            m.popularity,
            m.antipathy,
            m.choices_received,
            m.choices_given,
            m.rejections_received,
            m.rejections_given,
        )?;
    }
    super::metrics::write_metrics_text(&analysis.metrics, w)?;
    writeln!(w, "issues={}", analysis.diagnostics.issues.len())
}

fn render_analysis_pretty(analysis: &Analysis, w: &mut dyn Write) -> std::io::Result<()> {
    let title = analysis
        .graph
        .metadata
        .as_ref()
        .and_then(|m| m.title.as_deref())
        .unwrap_or("Sociogram");
    pretty_section(w, title)?;
    pretty_kv(w, "Participants", analysis.graph.nodes.len().to_string())?;
    pretty_kv(w, "Nominations", analysis.graph.edges.len().to_string())?;
    pretty_kv(w, "Content hash", &analysis.content_hash)?;

    writeln!(w)?;
    pretty_section(w, "Participants")?;
    writeln!(
        w,
        "{:<12} {:<20} {:<9} {:>6} {:>6}",
        "ID", "LABEL", "STATUS", "POP", "ANTI"
    )?;
    for node in &analysis.graph.nodes {
        writeln!(
            w,
            "{:<12} {:<20} {:<9} {:>6.2} {:>6.2}",
            node.id,
            node.label,
            node.metrics.status.as_str(),
            node.metrics.popularity,
            node.metrics.antipathy,
        )?;
    }

    writeln!(w)?;
    super::metrics::write_metrics_pretty(&analysis.metrics, w)?;

    if !analysis.diagnostics.is_clean() {
        writeln!(w)?;
        pretty_section(w, "Dropped records")?;
        super::validate::write_issues(&analysis.diagnostics, w)?;
    }
    Ok(())
}
