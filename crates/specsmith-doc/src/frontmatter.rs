//! Metadata header codec
//!
//! A SPEC.md document opens with a `---` line, a flat YAML mapping, and a
//! closing `---` line. Everything after the closing delimiter is the body and
//! is carried through every operation byte for byte.
//!
//! Parsing never fails. A missing or malformed header yields an empty
//! [`Metadata`] and the original content as the body.

use crate::error::DocResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Header delimiter line
pub const DELIMITER: &str = "---";

/// Flat, order-preserving key/value header
///
/// Values are YAML scalars or lists of scalars. Existing keys keep their
/// position on overwrite; new keys are appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, Value>);

impl Metadata {
    /// Create empty metadata
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the header holds no keys
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value for key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether key is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Scalar value rendered as text
    ///
    /// Strings are returned as-is, numbers and booleans are formatted.
    /// Null, lists and anything else yield `None`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_text)
    }

    /// List value rendered as text items
    ///
    /// A scalar is treated as a one-element list; a missing key is empty.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(other) => scalar_text(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Insert or overwrite a value
    ///
    /// Overwriting keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert
    #[inline]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merge `changes` into this header
    ///
    /// Keys already present keep their relative order; unseen keys are
    /// appended in the order `changes` lists them.
    pub fn merge(&mut self, changes: &Metadata) {
        for (key, value) in &changes.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Keys in header order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Header and body of a document
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<'a> {
    /// Parsed header (empty when absent or malformed)
    pub metadata: Metadata,
    /// Text following the closing delimiter, or the whole input if unframed
    pub body: &'a str,
    /// Whether a well-formed header was found
    pub framed: bool,
}

/// Split content into header and body
#[must_use]
pub fn split(content: &str) -> Parsed<'_> {
    if let Some((header, body)) = locate(content) {
        if let Some(metadata) = parse_mapping(header) {
            return Parsed {
                metadata,
                body,
                framed: true,
            };
        }
        tracing::debug!("malformed frontmatter, treating document as body only");
    }

    Parsed {
        metadata: Metadata::new(),
        body: content,
        framed: false,
    }
}

/// Parse content into `(metadata, body)`
///
/// Returns `(empty, content)` when the header is absent or malformed.
#[inline]
#[must_use]
pub fn parse(content: &str) -> (Metadata, &str) {
    let parsed = split(content);
    (parsed.metadata, parsed.body)
}

/// Serialize metadata deterministically, without delimiters
///
/// # Errors
/// Returns `DocError::Serialize` if YAML emission fails.
pub fn serialize(metadata: &Metadata) -> DocResult<String> {
    let yaml = serde_yaml::to_string(&metadata.0)?;
    Ok(yaml.trim_end().to_string())
}

/// Reassemble a document from header and body
///
/// A framed body is appended verbatim after the closing delimiter. An
/// unframed body gets a line break so its first line is not glued to it.
///
/// # Errors
/// Returns `DocError::Serialize` if YAML emission fails.
pub fn compose(metadata: &Metadata, body: &str, framed: bool) -> DocResult<String> {
    let yaml = serialize(metadata)?;
    let separator = if framed || body.is_empty() || body.starts_with(['\n', '\r']) {
        ""
    } else {
        "\n"
    };
    Ok(format!("{DELIMITER}\n{yaml}\n{DELIMITER}{separator}{body}"))
}

/// Merge `changes` into the header of `content`, leaving the body untouched
///
/// # Errors
/// Returns `DocError::Serialize` if YAML emission fails.
pub fn update(content: &str, changes: &Metadata) -> DocResult<String> {
    let Parsed {
        mut metadata,
        body,
        framed,
    } = split(content);
    metadata.merge(changes);
    compose(&metadata, body, framed)
}

/// Find the header text and the body slice
fn locate(content: &str) -> Option<(&str, &str)> {
    let start = usize::from(content.starts_with('\u{feff}')) * '\u{feff}'.len_utf8();
    let first_end = start + content[start..].find('\n')?;
    if content[start..first_end].trim_end() != DELIMITER {
        return None;
    }

    let header_start = first_end + 1;
    let mut pos = header_start;
    while pos <= content.len() {
        let line_end = content[pos..].find('\n').map_or(content.len(), |i| pos + i);
        let line = &content[pos..line_end];
        if line.trim_end() == DELIMITER {
            return Some((&content[header_start..pos], &content[pos + DELIMITER.len()..]));
        }
        if line_end == content.len() {
            break;
        }
        pos = line_end + 1;
    }
    None
}

/// Parse header text as a flat mapping of scalars and scalar lists
fn parse_mapping(text: &str) -> Option<Metadata> {
    if text.trim().is_empty() {
        return Some(Metadata::new());
    }

    match serde_yaml::from_str::<Value>(text).ok()? {
        Value::Null => Some(Metadata::new()),
        Value::Mapping(map) => map
            .into_iter()
            .map(|(key, value)| Some((key_text(&key)?, flat_value(value)?)))
            .collect::<Option<IndexMap<_, _>>>()
            .map(Metadata),
        _ => None,
    }
}

fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flat_value(value: Value) -> Option<Value> {
    match value {
        Value::Sequence(items) if items.iter().all(is_scalar) => Some(Value::Sequence(items)),
        v if is_scalar(&v) => Some(v),
        _ => None,
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
