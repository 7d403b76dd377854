//! `sociogram validate`: report structural problems without analyzing.

use std::io::Write;

use serde::Serialize;
use sociogram_core::diagnose;
use sociogram_core::graph::{GraphDiagnostics, Issue};

use crate::cmd::{InputArgs, load_graph};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Report payload for `sociogram validate`.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub nodes: usize,
    pub edges: usize,
    pub dropped_nodes: usize,
    pub dropped_edges: usize,
    #[serde(flatten)]
    pub diagnostics: GraphDiagnostics,
}

/// Execute `sociogram validate`. Fails when any issue is found.
pub fn run_validate(args: &InputArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, output)?;
    let diagnostics = diagnose(&graph);

    let report = ValidationReport {
        valid: diagnostics.is_clean(),
        nodes: graph.nodes.len(),
        edges: graph.edges.len(),
        dropped_nodes: diagnostics.dropped_node_count(),
        dropped_edges: diagnostics.dropped_edge_count(),
        diagnostics,
    };

    render_mode(output, &report, render_report_text, render_report_pretty)?;

    if !report.valid {
        anyhow::bail!("{} structural issue(s) found", report.diagnostics.issues.len());
    }
    Ok(())
}

fn render_report_text(report: &ValidationReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "valid={}", report.valid)?;
    writeln!(w, "nodes={} edges={}", report.nodes, report.edges)?;
    write_issues(&report.diagnostics, w)
}

fn render_report_pretty(report: &ValidationReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Validation")?;
    pretty_kv(w, "Participants", report.nodes.to_string())?;
    pretty_kv(w, "Nominations", report.edges.to_string())?;
    if report.valid {
        writeln!(w, "\n✓ no structural issues")?;
        return Ok(());
    }
    pretty_kv(w, "Dropped participants", report.dropped_nodes.to_string())?;
    pretty_kv(w, "Dropped nominations", report.dropped_edges.to_string())?;
    writeln!(w)?;
    write_issues(&report.diagnostics, w)
}

/// One line per issue, prefixed with its error code.
pub fn write_issues(diagnostics: &GraphDiagnostics, w: &mut dyn Write) -> std::io::Result<()> {
    for issue in &diagnostics.issues {
        let err = issue.to_error();
        writeln!(w, "{} #{}: {err}", err.code(), position(issue))?;
    }
    Ok(())
}

const fn position(issue: &Issue) -> usize {
    match issue {
        Issue::UnknownNode { position, .. }
        | Issue::SelfLoop { position, .. }
        | Issue::DuplicateEdge { position, .. }
        | Issue::DuplicateNode { position, .. } => *position,
    }
}
