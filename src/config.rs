//! Registrar configuration.
//!
//! Everything `run` depends on is carried in [`RegistrarConfig`], so the
//! registrar can be exercised without touching the process environment. The
//! binary fills it from CLI flags, environment variables and an optional JSON
//! file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Registry updated when no target is configured.
pub const DEFAULT_TARGET: &str = "public/models.json";

/// Environment variable holding the raw issue body.
pub const ISSUE_BODY_VAR: &str = "ISSUE_BODY";

/// Environment variable naming the runner's environment file.
pub const ENV_FILE_VAR: &str = "GITHUB_ENV";

/// Heading texts of the model request issue template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateLabels {
    pub model_id: String,
    pub model_name: String,
}

impl Default for TemplateLabels {
    fn default() -> Self {
        Self {
            model_id: "模型 ID (Model ID)".to_string(),
            model_name: "模型名稱與描述 (Model Name & Description)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrarConfig {
    /// Raw issue body. `None` or empty aborts the run.
    pub issue_body: Option<String>,
    /// Environment file to append `MODEL_ID`/`MODEL_NAME` to. `None` skips the step.
    pub env_file: Option<PathBuf>,
    /// Registry files, updated in order.
    pub targets: Vec<PathBuf>,
    pub labels: TemplateLabels,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            issue_body: None,
            env_file: None,
            targets: vec![PathBuf::from(DEFAULT_TARGET)],
            labels: TemplateLabels::default(),
        }
    }
}

impl RegistrarConfig {
    pub fn with_issue_body(mut self, body: impl Into<String>) -> Self {
        self.issue_body = Some(body.into());
        self
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    pub fn with_targets<I, P>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Apply overrides from a config file. Keys absent from the file keep
    /// their current values.
    pub fn with_file(mut self, file: ConfigFile) -> Self {
        if let Some(targets) = file.targets {
            self.targets = targets;
        }
        if let Some(labels) = file.labels {
            self.labels = labels;
        }
        self
    }
}

/// On-disk overrides, e.g.
///
/// ```json
/// { "targets": ["public/models.json", "dist/models.json"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub targets: Option<Vec<PathBuf>>,
    pub labels: Option<TemplateLabels>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }
}
