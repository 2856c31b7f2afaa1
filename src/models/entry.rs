use serde::{Deserialize, Serialize};

/// One model in a registry file.
///
/// Only `id` and `name` are ever written by the registrar. Entries already in a
/// registry may carry more fields (`type`, `config`, ...); those are never
/// deserialized into this type, so they survive a rewrite untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Unique key within a registry, e.g. `onnx-community/whisper-tiny`.
    pub id: String,
    /// Display label shown to users.
    pub name: String,
}

impl ModelEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
