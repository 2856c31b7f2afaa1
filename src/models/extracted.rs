use super::ModelEntry;

/// Fields pulled out of an issue body. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedModel {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Which required fields an issue body failed to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    ModelId,
    ModelName,
}

impl MissingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModelId => "model id",
            Self::ModelName => "model name",
        }
    }
}

impl ExtractedModel {
    /// Fields that were not found, in template order.
    pub fn missing(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.id.is_none() {
            missing.push(MissingField::ModelId);
        }
        if self.name.is_none() {
            missing.push(MissingField::ModelName);
        }
        missing
    }

    /// Converts into an entry when both fields are present.
    pub fn into_entry(self) -> Option<ModelEntry> {
        match (self.id, self.name) {
            (Some(id), Some(name)) => Some(ModelEntry { id, name }),
            _ => None,
        }
    }
}
