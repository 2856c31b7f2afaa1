//! Domain models for the registrar.
//!
//! - [`ModelEntry`]: one `{id, name}` record in a registry file.
//! - [`ExtractedModel`]: what an issue body yielded, before validation.

mod entry;
mod extracted;

pub use entry::*;
pub use extracted::*;
