//! Mutual-choice clusters.
//!
//! A cluster is a maximal set of participants linked by chains of mutual
//! choices. We build a directed graph holding only reciprocated choice edges
//! (each mutual pair contributes both directions), so its strongly connected
//! components are exactly the clusters. One-way choices and rejections never
//! join two participants.

use std::collections::BTreeSet;
use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::metrics::reciprocity::ReciprocityIndex;
use crate::model::{EdgeKind, GraphEdge};

/// One group of participants joined by mutual choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// 0-based, ordered by each cluster's smallest member id.
    pub id: usize,
    /// Participant ids, sorted.
    pub members: Vec<String>,
    pub size: usize,
    /// Number of mutual-choice pairs inside the cluster.
    pub mutual_pairs: usize,
}

/// Find mutual-choice clusters with at least `min_size` members.
///
/// `choices` should hold usable choice edges; edges of any other type are
/// skipped. `index` must cover `choices`.
#[must_use]
pub fn mutual_choice_clusters<E: GraphEdge>(
    choices: &[E],
    index: &ReciprocityIndex<'_>,
    min_size: usize,
) -> Vec<ClusterSummary> {
    let mut graph = DiGraph::<&str, ()>::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    for edge in choices {
        if edge.kind() != EdgeKind::Choice || !index.contains_mirror(edge) {
            continue;
        }
        let source = *node_map
            .entry(edge.source())
            .or_insert_with(|| graph.add_node(edge.source()));
        let target = *node_map
            .entry(edge.target())
            .or_insert_with(|| graph.add_node(edge.target()));
        graph.update_edge(source, target, ());
    }

    let mut clusters: Vec<(Vec<String>, usize)> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() >= min_size.max(2))
        .map(|component| {
            let members: BTreeSet<&str> = component.iter().map(|&idx| graph[idx]).collect();
            // Each mutual pair is two directed edges inside the component.
            let directed = component
                .iter()
                .flat_map(|&idx| graph.neighbors(idx))
                .filter(|idx| members.contains(graph[*idx]))
                .count();
            let members = members.into_iter().map(str::to_string).collect();
            (members, directed / 2)
        })
        .collect();

    clusters.sort_by(|(a, _), (b, _)| a.first().cmp(&b.first()));

    clusters
        .into_iter()
        .enumerate()
        .map(|(id, (members, mutual_pairs))| ClusterSummary {
            id,
            size: members.len(),
            members,
            mutual_pairs,
        })
        .collect()
}
