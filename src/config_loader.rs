use crate::config::ProjectConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse a project configuration from a YAML (or JSON) file
pub fn load_config(config_path: &Path) -> Result<ProjectConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    // JSON is valid YAML, so exported editor configs load unchanged
    let config: ProjectConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;
    warn_on_suspicious(&config);

    Ok(config)
}

/// Log settings that are valid but probably not what the author meant
pub fn warn_on_suspicious(config: &ProjectConfig) {
    if config.mode == crate::config::TopologyMode::Hci && config.storage_count > 0 {
        info!(
            "storage_count ({}) is ignored in HCI mode; storage runs on compute nodes",
            config.storage_count
        );
    }

    let network = &config.network;
    if network.is_converged() {
        let separated_only = [
            ("management_redundancy", network.management_redundancy.is_redundant()),
            ("business_redundancy", network.business_redundancy.is_redundant()),
            ("storage_redundancy", network.storage_redundancy.is_redundant()),
            ("backup_redundancy", network.backup_redundancy.is_redundant()),
        ];
        for (field, redundant) in separated_only {
            if redundant {
                info!("{} only applies to Physically_Separated deployments", field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeploymentMode, Redundancy};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_yaml_config() {
        let yaml = r#"
project_name: "Lab"
mode: Standard
node_count: 4
storage_count: 2
network:
  deployment_mode: Physically_Separated
  business_redundancy: Redundant
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.project_name, "Lab");
        assert_eq!(config.network.deployment_mode, DeploymentMode::PhysicallySeparated);
        assert_eq!(config.network.business_redundancy, Redundancy::Redundant);
    }

    #[test]
    fn test_load_json_config() {
        let json = r#"{"project_name": "Json Lab", "node_count": 3, "reuse_compute": true}"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", json).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.node_count, 3);
        assert!(config.reuse_compute);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let yaml = r#"
project_name: ""
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();
        assert!(load_config(temp_file.path()).is_err());

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "mode: Hybrid").unwrap();
        assert!(load_config(temp_file.path()).is_err());

        assert!(load_config(Path::new("/nonexistent/topogen.yaml")).is_err());
    }
}
