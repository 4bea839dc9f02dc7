//! Front-matter codec for framework and prompt documents.
//!
//! A document file is a YAML block delimited by `---` lines followed by the
//! document's body field verbatim.

use crate::dsl::serializer::{dump_yaml_stable, load_yaml};
use crate::dsl::{DocumentKind, FrameworkDsl, PromptDsl};
use crate::error::Result;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static OPENING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\w*\s*$").expect("opening delimiter is a valid regex"));

static CLOSING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*$").expect("closing delimiter is a valid regex"));

/// A document whose body is stored outside the YAML block.
pub trait BodyField: Serialize {
    const KIND: DocumentKind;

    fn body(&self) -> &str;
}

impl BodyField for FrameworkDsl {
    const KIND: DocumentKind = DocumentKind::Framework;

    fn body(&self) -> &str {
        &self.content
    }
}

impl BodyField for PromptDsl {
    const KIND: DocumentKind = DocumentKind::Prompt;

    fn body(&self) -> &str {
        &self.template
    }
}

/// Result of splitting a document file.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    /// Decoded YAML block.
    pub data: Map<String, Value>,
    /// Text after the closing delimiter.
    pub body: String,
}

impl FrontMatter {
    /// Re-assembles the raw document value for the schema registry.
    ///
    /// The body always wins over a same-named key in the YAML block.
    pub fn into_raw(self, kind: DocumentKind) -> Value {
        let mut data = self.data;
        data.insert(kind.body_field().to_string(), Value::String(self.body));
        Value::Object(data)
    }
}

/// Renders a document as `---\n<yaml>---\n<body>`.
///
/// Every field except the body field goes into the YAML block, in the
/// document's canonical field order. A body that itself starts with a line
/// break gets one separator line so that [`from_text`] restores it exactly.
pub fn to_text<D: BodyField>(doc: &D) -> Result<String> {
    let body_key = serde_yaml::Value::from(D::KIND.body_field());
    let rest: serde_yaml::Mapping = match serde_yaml::to_value(doc)? {
        serde_yaml::Value::Mapping(mapping) => mapping
            .into_iter()
            .filter(|(key, _)| *key != body_key)
            .collect(),
        _ => serde_yaml::Mapping::new(),
    };

    let yaml = dump_yaml_stable(&rest)?;
    let body = doc.body();
    let separator = if starts_with_line_break(body) { "\n" } else { "" };
    Ok(format!("---\n{}---\n{}{}", yaml, separator, body))
}

/// Splits a document file into its YAML block and body.
///
/// # Rules
///
/// - UTF-8 BOM (`\u{feff}`) at the start is removed
/// - First line must be `---` (a language tag such as `---yaml` is allowed)
/// - The first following line that is exactly `---` closes the block
/// - A single blank line directly after the closing `---` is dropped
/// - The rest of the body is kept verbatim (line endings included)
///
/// Returns `None` when the delimiters are missing or the block is not a
/// YAML mapping. An empty block decodes to an empty mapping.
pub fn from_text(text: &str) -> Option<FrontMatter> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let first = lines.next()?;
    if !OPENING_RE.is_match(trim_line_end(first)) {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        let line_start = offset;
        offset += line.len();
        if !CLOSING_RE.is_match(trim_line_end(line)) {
            continue;
        }

        let data = match load_yaml(&text[yaml_start..line_start]).ok()? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => return None,
        };
        let body = strip_blank_line(&text[offset..]);
        return Some(FrontMatter {
            data,
            body: body.to_string(),
        });
    }

    None
}

fn trim_line_end(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn starts_with_line_break(text: &str) -> bool {
    text.starts_with('\n') || text.starts_with("\r\n")
}

fn strip_blank_line(body: &str) -> &str {
    body.strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body)
}

#[cfg(test)]
#[path = "frontmatter_test.rs"]
mod tests;
