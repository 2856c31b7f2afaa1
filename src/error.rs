use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::MissingField;
use crate::registry::RegistryError;

/// Reasons a registrar run fails. Every variant ends the process with status 1.
#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error("No issue body found in environment variables")]
    MissingIssueBody,

    #[error("Failed to extract {} from issue body", join_fields(.0))]
    MissingFields(Vec<MissingField>),

    #[error("Failed to append to environment file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl RegistrarError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}

fn join_fields(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(MissingField::as_str)
        .collect::<Vec<_>>()
        .join(" and ")
}
