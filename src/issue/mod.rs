//! Issue body parsing.
//!
//! Issue templates render each form field as a `###` heading followed by the
//! submitted value:
//!
//! ```text
//! ### 模型 ID (Model ID)
//!
//! acme/model-7
//!
//! ### 模型名稱與描述 (Model Name & Description)
//!
//! Acme Model 7
//! ```
//!
//! The body is split into sections once ([`IssueSections::parse`]); the known
//! fields are then looked up by heading text ([`extract`]).

mod sections;

pub use sections::*;

use crate::config::TemplateLabels;
use crate::models::ExtractedModel;

/// Pull the model id and display name out of an issue body.
///
/// Absence of either heading (or an empty answer under it) is reported as
/// `None`, never as an error.
pub fn extract(body: &str, labels: &TemplateLabels) -> ExtractedModel {
    let sections = IssueSections::parse(body);
    ExtractedModel {
        id: sections.get(&labels.model_id).map(str::to_string),
        name: sections.get(&labels.model_name).map(str::to_string),
    }
}
