//! Project files.
//!
//! A project file is the unit of save and load: the configuration together
//! with the graph generated from it, plus renderer-side customizations. The
//! graph is stored verbatim; loading never regenerates or validates it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ProjectConfig;
use crate::graph::TopologyGraph;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProjectFile {
    pub config: ProjectConfig,
    pub graph: TopologyGraph,
    /// `<VENDOR>_<class>` -> icon URL overrides
    #[serde(default)]
    pub custom_icons: BTreeMap<String, String>,
    /// Plane key -> legend label overrides
    #[serde(default)]
    pub legend_labels: BTreeMap<String, String>,
}

impl ProjectFile {
    pub fn new(config: ProjectConfig, graph: TopologyGraph) -> Self {
        Self {
            config,
            graph,
            custom_icons: BTreeMap::new(),
            legend_labels: BTreeMap::new(),
        }
    }
}

/// Project file errors
#[derive(Debug, thiserror::Error)]
pub enum ProjectFileError {
    #[error("failed to access project file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid project file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode project file as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// File name used when exporting a project
pub fn export_file_name(project_name: &str) -> String {
    let stem = project_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_topology.json", stem)
}

pub fn save_project(path: &Path, project: &ProjectFile) -> Result<(), ProjectFileError> {
    let json = serde_json::to_string_pretty(project)?;
    fs::write(path, json)?;
    log::info!("Project written to {}", path.display());
    Ok(())
}

/// Write the same envelope as YAML
pub fn save_project_yaml(path: &Path, project: &ProjectFile) -> Result<(), ProjectFileError> {
    let yaml = serde_yaml::to_string(project)?;
    fs::write(path, yaml)?;
    log::info!("Project written to {}", path.display());
    Ok(())
}

/// Load a project file. Both `config` and `graph` must be present.
pub fn load_project(path: &Path) -> Result<ProjectFile, ProjectFileError> {
    let content = fs::read_to_string(path)?;
    let project: ProjectFile = serde_json::from_str(&content)?;
    log::info!(
        "Loaded project '{}' with {} devices",
        project.config.project_name,
        project.graph.devices.len()
    );
    Ok(project)
}
