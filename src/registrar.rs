//! The end-to-end registrar pass: parse the issue, publish the extracted
//! values to the runner, then update the registries.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::config::RegistrarConfig;
use crate::error::RegistrarError;
use crate::issue;
use crate::models::ModelEntry;
use crate::registry;

/// Variable receiving the model id in the environment file.
pub const MODEL_ID_VAR: &str = "MODEL_ID";
/// Variable receiving the model name in the environment file.
pub const MODEL_NAME_VAR: &str = "MODEL_NAME";

const MULTILINE_DELIMITER: &str = "MODEL_REGISTRAR_EOF";

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub entry: ModelEntry,
    /// Whether `MODEL_ID`/`MODEL_NAME` were appended to an environment file.
    pub env_file_written: bool,
    /// Whether at least one registry file was modified.
    pub updated: bool,
}

/// Run the registrar once.
///
/// Fails on a missing issue body, on missing template fields, or on any
/// environment file or registry I/O error. Finding nothing to update is a
/// success.
pub fn run(config: &RegistrarConfig) -> Result<RunOutcome, RegistrarError> {
    let body = match config.issue_body.as_deref() {
        Some(body) if !body.is_empty() => body,
        _ => return Err(RegistrarError::MissingIssueBody),
    };

    tracing::info!("Parsing issue body...");
    let extracted = issue::extract(body, &config.labels);

    let Some(entry) = extracted.clone().into_entry() else {
        tracing::error!("Extracted ID: {:?}", extracted.id);
        tracing::error!("Extracted Name: {:?}", extracted.name);
        return Err(RegistrarError::MissingFields(extracted.missing()));
    };

    tracing::info!("Found Model ID: {}", entry.id);
    tracing::info!("Found Model Name: {}", entry.name);

    let env_file_written = match config.env_file.as_deref() {
        Some(path) => {
            write_env_file(path, &entry)?;
            tracing::info!(
                "Exported {} and {} to {}",
                MODEL_ID_VAR,
                MODEL_NAME_VAR,
                path.display()
            );
            true
        }
        None => {
            tracing::info!("No environment file configured, skipping env var output (local mode)");
            false
        }
    };

    let updated = registry::register(&entry.id, &entry.name, config.targets.as_slice())?;
    if !updated {
        tracing::info!("No files were updated (maybe model already exists?)");
    }

    Ok(RunOutcome {
        entry,
        env_file_written,
        updated,
    })
}

/// Append both assignments to the environment file, creating it if needed.
fn write_env_file(path: &Path, entry: &ModelEntry) -> Result<(), RegistrarError> {
    let block = format!(
        "{}{}",
        env_assignment(MODEL_ID_VAR, &entry.id),
        env_assignment(MODEL_NAME_VAR, &entry.name)
    );

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(block.as_bytes()))
        .map_err(|source| RegistrarError::EnvFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Format one environment file assignment.
///
/// Multi-line values use the `KEY<<DELIMITER` form; the delimiter never
/// occurs in the value.
fn env_assignment(key: &str, value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return format!("{key}={value}\n");
    }

    let mut delimiter = MULTILINE_DELIMITER.to_string();
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{key}<<{delimiter}\n{value}\n{delimiter}\n")
}
