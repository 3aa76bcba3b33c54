//! Generation orchestrator.
//!
//! Coordinates the overall flow from a loaded configuration through
//! topology synthesis, consistency checking and project file output.

use std::path::Path;

use clap::ValueEnum;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use log::{info, warn};

use crate::bom::{self, BillOfMaterials};
use crate::config::ProjectConfig;
use crate::project::{self, ProjectFile};
use crate::topology::generate_topology;
use crate::utils::validation::check_topology;

/// Encoding of the written project file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Options controlling one generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub format: OutputFormat,
    /// Fail when the generated graph violates a consistency check
    pub strict: bool,
}

/// Outcome of one generation run
#[derive(Debug)]
pub struct GenerateReport {
    pub project: ProjectFile,
    pub bom: BillOfMaterials,
    pub check_errors: Vec<String>,
}

/// Generate the project for a configuration without touching the filesystem
pub fn generate_project(config: &ProjectConfig, options: &GenerateOptions) -> Result<GenerateReport> {
    let graph = generate_topology(config).wrap_err("Topology synthesis aborted")?;

    let check_errors = match check_topology(&graph, config) {
        Ok(()) => Vec::new(),
        Err(errors) => {
            for error in &errors {
                warn!("Consistency check: {}", error);
            }
            if options.strict {
                return Err(eyre!("Generated topology failed {} consistency check(s)", errors.len()));
            }
            errors
        }
    };

    let bom = bom::estimate(&graph, config);
    Ok(GenerateReport {
        project: ProjectFile::new(config.clone(), graph),
        bom,
        check_errors,
    })
}

/// Generate the project and write it to `output_path`
pub fn generate_project_file(
    config: &ProjectConfig,
    output_path: &Path,
    options: &GenerateOptions,
) -> Result<GenerateReport> {
    let report = generate_project(config, options)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create output directory '{}'", parent.display()))?;
        }
    }

    let written = match options.format {
        OutputFormat::Json => project::save_project(output_path, &report.project),
        OutputFormat::Yaml => project::save_project_yaml(output_path, &report.project),
    };
    written.wrap_err_with(|| format!("Failed to write project file '{}'", output_path.display()))?;

    info!(
        "Wrote {} devices, {} links, {} groups to {:?}",
        report.project.graph.devices.len(),
        report.project.graph.links.len(),
        report.project.graph.groups.len(),
        output_path
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_project_file_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("project.json");
        let config = ProjectConfig::default();

        let report = generate_project_file(&config, &path, &GenerateOptions::default()).unwrap();
        assert!(report.check_errors.is_empty());

        let loaded = project::load_project(&path).unwrap();
        assert_eq!(loaded, report.project);
    }

    #[test]
    fn test_generate_project_file_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("project.yaml");
        let options = GenerateOptions { format: OutputFormat::Yaml, strict: true };

        generate_project_file(&ProjectConfig::default(), &path, &options).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let decoded: ProjectFile = serde_yaml::from_str(&content).unwrap();
        assert_eq!(decoded.config, ProjectConfig::default());
    }
}
