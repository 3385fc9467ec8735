//! Template parsing and conversion into snippets
//!
//! This module provides:
//! - Live-template document parsing (`parser`)
//! - Placeholder rewriting with per-template variable ranking (`placeholder`)
//! - Entity unescaping and body line splitting (`text`)
//! - Snippet records, the ordered snippet set, and the file writer (`snippet`)

pub mod parser;
pub mod placeholder;
pub mod snippet;
pub mod text;

use crate::error::ConvertError;
use std::path::Path;

pub use parser::{parse_document, parse_templates, TemplateRecord};
pub use placeholder::{convert_placeholders, PlaceholderOrder};
pub use snippet::{
    convert_all, convert_template, write_snippets, ConvertOptions, SnippetRecord, SnippetSet,
};

/// Parse a template document and convert all of its templates
pub fn convert_file(path: &Path, options: ConvertOptions) -> Result<SnippetSet, ConvertError> {
    let records = parse_templates(path)?;
    convert_all(&records, options)
}
