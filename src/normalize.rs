//! Turns a raw IDL document into an [`ErrorTable`].
//!
//! Two document shapes are recognized, checked in this order:
//!
//! 1. Solana program IDLs (Codama/Shank style) nest errors under `program.errors`
//!    and carry the text in `message`, sometimes with `docs`.
//! 2. Anchor IDLs keep a top-level `errors` array and use `msg`.
//!
//! Nothing here fails: a document that matches neither shape, or an entry that
//! cannot be read, yields fewer errors rather than an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::{ErrorInfo, ErrorTable};

/// One error entry as it appears in an IDL, before normalization.
///
/// Only `code` and `name` are required. A `message`, `msg` or `docs` value of
/// the wrong type reads as absent so the entry itself survives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawErrorEntry {
    pub code: u32,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub msg: Option<String>,
    #[serde(default, deserialize_with = "lenient_docs")]
    pub docs: Option<Vec<String>>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Non-string lines are dropped.
fn lenient_docs<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let Value::Array(lines) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let docs = lines
        .into_iter()
        .filter_map(|line| match line {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect();
    Ok(Some(docs))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum IdlShape {
    /// `{"program": {"errors": [..]}}`
    NestedProgram,
    /// `{"errors": [..]}`
    TopLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    Matched(IdlShape),
    NoErrorsFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedErrors {
    pub outcome: ParseOutcome,
    pub entries: Vec<RawErrorEntry>,
}

impl ExtractedErrors {
    fn none() -> Self {
        Self {
            outcome: ParseOutcome::NoErrorsFound,
            entries: Vec::new(),
        }
    }
}

fn nested_program_errors(doc: &Value) -> Option<&Vec<Value>> {
    doc.get("program")
        .filter(|program| program.is_object())
        .and_then(|program| program.get("errors"))
        .and_then(Value::as_array)
}

fn read_entries(items: &[Value], shape: IdlShape) -> Vec<RawErrorEntry> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match RawErrorEntry::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(%shape, index, error = %e, "skipping unreadable IDL error entry");
                None
            }
        })
        .collect()
}

/// Pulls the raw error list out of an IDL document of unknown shape.
///
/// A document that has both `program.errors` and `errors` is read as
/// [`IdlShape::NestedProgram`].
pub fn extract_raw_errors(doc: &Value) -> ExtractedErrors {
    if let Some(items) = nested_program_errors(doc) {
        return ExtractedErrors {
            outcome: ParseOutcome::Matched(IdlShape::NestedProgram),
            entries: read_entries(items, IdlShape::NestedProgram),
        };
    }

    let Some(obj) = doc.as_object() else {
        return ExtractedErrors::none();
    };

    match obj.get("errors").and_then(Value::as_array) {
        Some(items) => ExtractedErrors {
            outcome: ParseOutcome::Matched(IdlShape::TopLevel),
            entries: read_entries(items, IdlShape::TopLevel),
        },
        None => ExtractedErrors::none(),
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|s| !s.is_empty())
}

/// Maps a raw entry onto [`ErrorInfo`].
///
/// `message` wins over `msg`; an empty `message` counts as absent. With neither,
/// the description is the empty string. `docs` survives only when non-empty.
pub fn normalize_entry(raw: RawErrorEntry) -> ErrorInfo {
    let RawErrorEntry {
        code,
        name,
        message,
        msg,
        docs,
    } = raw;

    let description = non_empty(message).or(non_empty(msg)).unwrap_or_default();

    ErrorInfo {
        code,
        name,
        description,
        docs: docs.filter(|d| !d.is_empty()),
    }
}

/// Extracts and normalizes every error in `doc`. Duplicate codes: last one wins.
pub fn build_error_table(doc: &Value) -> ErrorTable {
    let extracted = extract_raw_errors(doc);
    let mut table = ErrorTable::new();

    for raw in extracted.entries {
        let info = normalize_entry(raw);
        if let Some(previous) = table.insert(info.code, info) {
            tracing::warn!(
                code = previous.code,
                overwritten = %previous.name,
                "duplicate error code in IDL"
            );
        }
    }

    table
}
