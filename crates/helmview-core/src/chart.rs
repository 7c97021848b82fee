//! Chart metadata and directory layout
//!
//! Parses `Chart.yaml` and locates the configuration artifacts the editor
//! works with: `values.yaml`, the optional `values.schema.json`, and the
//! `templates/` directory.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Chart.yaml metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    /// Chart API version (v1 or v2)
    pub api_version: String,

    /// Chart name (required)
    pub name: String,

    /// Chart version (required, SemVer)
    pub version: Version,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Application version
    #[serde(default)]
    pub app_version: Option<String>,

    /// Kubernetes version constraint
    #[serde(default)]
    pub kube_version: Option<String>,

    /// Icon URL
    #[serde(default)]
    pub icon: Option<String>,

    /// Source URLs
    #[serde(default)]
    pub sources: Vec<String>,

    /// Keywords
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Maintainers
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,
}

/// Maintainer information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A chart directory resolved on disk
#[derive(Debug, Clone)]
pub struct LoadedChart {
    /// Chart root directory
    pub root: PathBuf,

    /// Parsed Chart.yaml
    pub metadata: ChartMetadata,

    /// Path to values.yaml (may not exist for bare charts)
    pub values_path: PathBuf,

    /// Path to values.schema.json, if present
    pub schema_path: Option<PathBuf>,

    /// Path to the templates directory, if present
    pub templates_dir: Option<PathBuf>,
}

impl LoadedChart {
    /// Load a chart from a directory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();

        let chart_yaml = root.join("Chart.yaml");
        if !chart_yaml.exists() {
            return Err(CoreError::ChartNotFound {
                path: root.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&chart_yaml)?;
        let metadata: ChartMetadata =
            serde_yaml::from_str(&content).map_err(|e| CoreError::InvalidChart {
                message: format!("{}: {}", chart_yaml.display(), e),
            })?;

        let values_path = root.join("values.yaml");

        let schema_path = {
            let p = root.join("values.schema.json");
            p.exists().then_some(p)
        };

        let templates_dir = {
            let p = root.join("templates");
            p.is_dir().then_some(p)
        };

        Ok(Self {
            root,
            metadata,
            values_path,
            schema_path,
            templates_dir,
        })
    }

    /// Load the chart's default values
    ///
    /// A missing values.yaml yields empty values, matching helm behavior.
    pub fn default_values(&self) -> Result<crate::Values> {
        if self.values_path.exists() {
            crate::Values::from_file(&self.values_path)
        } else {
            Ok(crate::Values::new())
        }
    }
}
