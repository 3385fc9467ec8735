//! Snippet records and the ordered snippet file they are written to

use super::parser::TemplateRecord;
use super::placeholder::convert_placeholders;
use super::text::to_body_lines;
use crate::error::{ConvertError, WriteError};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One entry of the destination snippets file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetRecord {
    pub prefix: String,
    pub description: String,
    pub body: Vec<String>,
}

/// How template values are rewritten
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Renumber `$NAME$` variables as `${N:NAME}`; when off only the
    /// `$END$` / `$SELECTION$` markers are rewritten
    pub renumber_variables: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            renumber_variables: true,
        }
    }
}

/// Convert one template into its snippet
pub fn convert_template(
    record: &TemplateRecord,
    options: ConvertOptions,
) -> Result<SnippetRecord, ConvertError> {
    if record.name.is_empty() {
        return Err(ConvertError::MissingName {
            index: record.index,
        });
    }

    let rewritten = convert_placeholders(&record.value, options.renumber_variables);
    let description = match record.description.as_deref() {
        Some(desc) if !desc.is_empty() => desc.to_string(),
        _ => record.name.clone(),
    };

    Ok(SnippetRecord {
        prefix: record.name.clone(),
        description,
        body: to_body_lines(&rewritten),
    })
}

/// Snippets keyed by template name, in first-insertion order
///
/// Inserting an existing name replaces the earlier snippet in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetSet {
    entries: Vec<(String, SnippetRecord)>,
    positions: HashMap<String, usize>,
}

impl SnippetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snippet, returning the one it replaced
    pub fn insert(&mut self, name: String, snippet: SnippetRecord) -> Option<SnippetRecord> {
        match self.positions.get(&name) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx].1, snippet)),
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push((name, snippet));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SnippetRecord> {
        self.positions.get(name).map(|&idx| &self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnippetRecord)> {
        self.entries.iter().map(|(name, snippet)| (name.as_str(), snippet))
    }

    /// Pretty JSON with 2-space indentation; non-ASCII is written as-is
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for SnippetSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, snippet) in &self.entries {
            map.serialize_entry(name, snippet)?;
        }
        map.end()
    }
}

/// Convert every template, failing the whole batch on the first invalid one
pub fn convert_all(
    records: &[TemplateRecord],
    options: ConvertOptions,
) -> Result<SnippetSet, ConvertError> {
    let mut snippets = SnippetSet::new();

    for record in records {
        let snippet = convert_template(record, options)?;
        if snippets.insert(record.name.clone(), snippet).is_some() {
            tracing::debug!(name = %record.name, index = record.index, "template replaces an earlier one with the same name");
        }
    }

    Ok(snippets)
}

/// Write the snippets file, creating parent directories and replacing any existing file
pub fn write_snippets(path: &Path, snippets: &SnippetSet) -> Result<(), WriteError> {
    let content = snippets.to_json()?;
    let io_error = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, content).map_err(io_error)?;

    tracing::debug!(path = %path.display(), snippets = snippets.len(), "wrote snippets file");
    Ok(())
}
