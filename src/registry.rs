//! JSON model registries.
//!
//! A registry is a file holding a top-level JSON array of model objects, each
//! with at least an `id`. [`register`] appends a [`ModelEntry`] to every
//! target that does not already list its id. Existing entries are kept as raw
//! JSON values so fields this tool does not know about survive a rewrite, in
//! their original key order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use thiserror::Error;

use crate::models::ModelEntry;

const INDENT: &[u8] = b"    ";

/// Registry read, decode and write errors. All of them abort a [`register`] call.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a JSON array", .path.display())]
    NotAnArray { path: PathBuf },

    #[error("Entry {index} in {} has no \"id\" field", .path.display())]
    MissingId { path: PathBuf, index: usize },

    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An in-memory copy of one registry file.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    entries: Vec<Value>,
    trailing_newline: bool,
}

impl Registry {
    /// Read and validate a registry file. Returns `Ok(None)` if it does not exist.
    pub fn load(path: impl Into<PathBuf>) -> Result<Option<Self>, RegistryError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(RegistryError::Read { path, source }),
        };

        let root: Value = match serde_json::from_str(&content) {
            Ok(root) => root,
            Err(source) => return Err(RegistryError::Parse { path, source }),
        };

        let Value::Array(entries) = root else {
            return Err(RegistryError::NotAnArray { path });
        };

        if let Some(index) = entries.iter().position(|entry| entry.get("id").is_none()) {
            return Err(RegistryError::MissingId { path, index });
        }

        Ok(Some(Self {
            path,
            entries,
            trailing_newline: content.ends_with('\n'),
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// String entry ids in file order. Entries with other id types are skipped.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_str))
    }

    /// Whether an entry's `id` equals `id`. Non-string ids never match.
    pub fn contains(&self, id: &str) -> bool {
        self.ids().any(|existing| existing == id)
    }

    /// Append an entry after all existing ones. Does not check for duplicates.
    pub fn push(&mut self, entry: &ModelEntry) -> Result<(), RegistryError> {
        let value = serde_json::to_value(entry).map_err(|source| RegistryError::Encode {
            path: self.path.clone(),
            source,
        })?;
        self.entries.push(value);
        Ok(())
    }

    /// Render as 4-space indented JSON with non-ASCII text left unescaped.
    pub fn to_json(&self) -> Result<Vec<u8>, RegistryError> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.entries
            .serialize(&mut ser)
            .map_err(|source| RegistryError::Encode {
                path: self.path.clone(),
                source,
            })?;
        if self.trailing_newline {
            buf.push(b'\n');
        }
        Ok(buf)
    }

    /// Overwrite the backing file.
    pub fn save(&self) -> Result<(), RegistryError> {
        let json = self.to_json()?;
        fs::write(&self.path, json).map_err(|source| RegistryError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Register `{id, name}` in each target registry that lacks it.
///
/// Missing files and files that already list `id` are skipped with a log line.
/// The first read/decode/write error aborts the call, leaving later targets
/// untouched. Returns whether any file was modified.
pub fn register<P: AsRef<Path>>(
    id: &str,
    name: &str,
    targets: &[P],
) -> Result<bool, RegistryError> {
    let entry = ModelEntry::new(id, name);
    let mut updated = false;

    for target in targets {
        let target: &Path = target.as_ref();

        let Some(mut registry) = Registry::load(target)? else {
            tracing::warn!("{} not found, skipping", target.display());
            continue;
        };

        if registry.contains(&entry.id) {
            tracing::info!(
                "Model {} already exists in {}",
                entry.id,
                registry.path().display()
            );
            continue;
        }

        registry.push(&entry)?;
        registry.save()?;

        tracing::info!("Updated {}", registry.path().display());
        updated = true;
    }

    Ok(updated)
}
