use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "sociogram.toml";

/// Everything that tunes an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub thresholds: StatusThresholds,
    #[serde(default)]
    pub merge_policy: MergePolicy,
    #[serde(default)]
    pub edge_policy: EdgePolicy,
    #[serde(default)]
    pub clusters: ClusterConfig,
}

/// Cut-offs used by the status rule table.
///
/// All comparisons are strict (`>`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    #[serde(default = "default_leader_popularity")]
    pub leader_popularity: f64,
    #[serde(default = "default_popular_popularity")]
    pub popular_popularity: f64,
    #[serde(default = "default_rejected_antipathy")]
    pub rejected_antipathy: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            leader_popularity: default_leader_popularity(),
            popular_popularity: default_popular_popularity(),
            rejected_antipathy: default_rejected_antipathy(),
        }
    }
}

/// What normalization does with nodes that already carry metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Keep pre-supplied metrics untouched; compute only missing ones.
    #[default]
    PreserveExisting,
    /// Ignore pre-supplied metrics and recompute every node.
    Recompute,
}

/// How malformed edges and duplicate nodes are treated at ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Drop unknown-endpoint edges, self-loops and duplicates; report them.
    #[default]
    Lenient,
    /// Reject the graph on the first structural problem.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Attach mutual-choice cluster summaries to the global metrics.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Smallest cluster reported.
    #[serde(default = "default_min_cluster_size")]
    pub min_size: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            min_size: default_min_cluster_size(),
        }
    }
}

/// Load an explicit config file. The file must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`AnalysisConfig`].
pub fn load_config_file(path: &Path) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Path of the per-user config file, if a config directory exists.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sociogram/config.toml"))
}

/// Resolve the effective configuration.
///
/// Precedence (highest wins):
/// 1. `explicit` path (must exist)
/// 2. `sociogram.toml` in `working_dir`
/// 3. `<config dir>/sociogram/config.toml`
/// 4. Built-in defaults
///
/// # Errors
///
/// Returns an error if the selected file cannot be read or parsed.
pub fn resolve_config(explicit: Option<&Path>, working_dir: &Path) -> Result<AnalysisConfig> {
    resolve_config_inner(explicit, working_dir, user_config_path().as_deref())
}

fn resolve_config_inner(
    explicit: Option<&Path>,
    working_dir: &Path,
    user_path: Option<&Path>,
) -> Result<AnalysisConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let project = working_dir.join(PROJECT_CONFIG_FILE);
    if project.exists() {
        return load_config_file(&project);
    }

    if let Some(path) = user_path.filter(|p| p.exists()) {
        return load_config_file(path);
    }

    Ok(AnalysisConfig::default())
}

const fn default_true() -> bool {
    true
}

const fn default_leader_popularity() -> f64 {
    0.5
}

const fn default_popular_popularity() -> f64 {
    0.3
}

const fn default_rejected_antipathy() -> f64 {
    0.3
}

const fn default_min_cluster_size() -> usize {
    2
}
