//! Invoking the helm binary
//!
//! The splitter only ever sees stdout from a successful `helm template`
//! run; a non-zero exit or spawn failure surfaces here as an error carrying
//! helm's stderr and is never retried.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelmError {
    #[error("helm binary not found on PATH - is helm installed?")]
    NotFound(#[source] std::io::Error),

    #[error("helm template exited with {status}:\n{stderr}")]
    Failed { status: String, stderr: String },

    #[error("IO error running helm: {0}")]
    Io(#[from] std::io::Error),
}

/// A `helm template` invocation
#[derive(Debug, Clone)]
pub struct TemplateInvocation {
    pub release: String,
    pub chart: PathBuf,
    pub namespace: String,
    pub values_files: Vec<PathBuf>,
}

impl TemplateInvocation {
    pub fn new(release: &str, chart: &Path, namespace: &str) -> Self {
        Self {
            release: release.to_string(),
            chart: chart.to_path_buf(),
            namespace: namespace.to_string(),
            values_files: Vec::new(),
        }
    }

    pub fn values_file(mut self, path: &Path) -> Self {
        self.values_files.push(path.to_path_buf());
        self
    }

    fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "template".into(),
            self.release.clone().into(),
            self.chart.clone().into(),
            "--namespace".into(),
            self.namespace.clone().into(),
        ];
        for file in &self.values_files {
            args.push("-f".into());
            args.push(file.clone().into());
        }
        args
    }

    /// Run helm and return its combined stdout
    pub fn run(&self) -> Result<String, HelmError> {
        let output = Command::new("helm")
            .args(self.args())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HelmError::NotFound(e)
                } else {
                    HelmError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(HelmError::Failed {
                status: output
                    .status
                    .code()
                    .map(|c| format!("code {}", c))
                    .unwrap_or_else(|| "signal".to_string()),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
