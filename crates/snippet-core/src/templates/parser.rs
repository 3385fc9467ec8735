//! Live-template XML parsing
//!
//! Every `<template>` element anywhere in the document becomes one
//! [`TemplateRecord`], in document order.

use crate::error::{ConvertError, ParseError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

const TEMPLATE_TAG: &[u8] = b"template";

/// One `<template>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRecord {
    /// 1-based position among the template elements of the document
    pub index: usize,
    /// Trimmed `name` attribute; empty when missing
    pub name: String,
    pub value: String,
    pub description: Option<String>,
}

/// Read and parse a template document
pub fn parse_templates(path: &Path) -> Result<Vec<TemplateRecord>, ConvertError> {
    let content = fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_document(&content).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), templates = records.len(), "parsed template document");
    Ok(records)
}

/// Parse a template document held in memory
///
/// The document must be well-formed: exactly one root element, matching end
/// tags, and valid attributes.
pub fn parse_document(xml: &str) -> Result<Vec<TemplateRecord>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|e| ParseError::new(reader.buffer_position(), e))?;

        match event {
            Event::Start(ref element) | Event::Empty(ref element) => {
                if depth == 0 {
                    if roots > 0 {
                        return Err(ParseError::new(position, "multiple root elements"));
                    }
                    roots += 1;
                }
                if element.name().as_ref() == TEMPLATE_TAG {
                    records.push(read_template(element, records.len() + 1, position)?);
                }
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(text) if depth == 0 => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(ParseError::new(position, "text outside the root element"));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(ParseError::new(
            reader.buffer_position(),
            "unexpected end of document (unclosed element)",
        ));
    }
    if roots == 0 {
        return Err(ParseError::new(0, "document has no root element"));
    }

    Ok(records)
}

fn read_template(
    element: &BytesStart<'_>,
    index: usize,
    position: u64,
) -> Result<TemplateRecord, ParseError> {
    let mut record = TemplateRecord {
        index,
        ..Default::default()
    };

    for attr in element.attributes() {
        let attr = attr.map_err(|e| ParseError::new(position, e))?;
        let text = attr
            .unescape_value()
            .map_err(|e| ParseError::new(position, e))?
            .into_owned();

        match attr.key.as_ref() {
            b"name" => record.name = text.trim().to_string(),
            b"value" => record.value = text,
            b"description" => record.description = Some(text),
            _ => {}
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<templateSet group="C/C++">
  <template name="for" value="for ($i$ = 0; $i$ &lt; $N$; $i$++) {&#10;  $END$&#10;}" description="for loop" toReformat="true" toShortenFQNames="true">
    <variable name="i" expression="" defaultValue="&quot;i&quot;" alwaysStopAt="true" />
    <context>
      <option name="OC_STATEMENT" value="true" />
    </context>
  </template>
  <template name="  inc  " value="#include &lt;$HEADER$&gt;" />
</templateSet>
"##;

    #[test]
    fn test_parse_sample_document() {
        let records = parse_document(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].index, 1);
        assert_eq!(records[0].name, "for");
        assert_eq!(records[0].value, "for ($i$ = 0; $i$ < $N$; $i$++) {\n  $END$\n}");
        assert_eq!(records[0].description.as_deref(), Some("for loop"));

        assert_eq!(records[1].index, 2);
        assert_eq!(records[1].name, "inc");
        assert_eq!(records[1].value, "#include <$HEADER$>");
        assert_eq!(records[1].description, None);
    }

    #[test]
    fn test_nested_templates_are_found() {
        let xml = r#"<root><group><template name="a" value="1"/></group><template name="b" value="2"></template></root>"#;
        let names: Vec<String> = parse_document(xml).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_name_is_kept_for_validation() {
        let records = parse_document(r#"<set><template value="x"/></set>"#).unwrap();
        assert_eq!(records[0].name, "");
    }

    #[test]
    fn test_rejects_malformed_documents() {
        for xml in [
            "",
            "   ",
            "<set><template name=\"a\" value=\"x\"></set>",
            "<set>",
            "<a/><b/>",
            "junk <set/>",
            "<set><template name=\"a\" name=\"b\"/></set>",
            "<set><template name=\"a\" value=\"&bogus;\"/></set>",
        ] {
            assert!(parse_document(xml).is_err(), "accepted {xml:?}");
        }
    }

    #[test]
    fn test_parse_templates_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let records = parse_templates(file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_templates_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"<broken").unwrap();

        let err = parse_templates(file.path()).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
