//! Response normalization
//!
//! Turns the model's free-form reply into an [`AnalysisRecord`]. Replies are
//! often wrapped in markdown code fences, so fence markers are stripped before
//! parsing. When the reply still is not a JSON object the whole raw reply is
//! kept as the summary; the caller gets a warning, never an error.

use super::types::{AnalysisRecord, GlossaryEntry, Highlight, Section};
use crate::error::StructuredParseFailure;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// A fence opener (optionally tagged `json`) at a line start, or a closer at a line end
static FENCE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^```(?:json)?|```$").expect("fence pattern is valid"));

/// Normalizer output: the record, plus the reason if it is degraded
#[derive(Debug)]
pub struct Normalized {
    pub record: AnalysisRecord,
    pub parse_failure: Option<StructuredParseFailure>,
}

impl Normalized {
    pub fn is_degraded(&self) -> bool {
        self.parse_failure.is_some()
    }
}

/// Recover a structured record from a raw model reply.
pub fn normalize(raw: &str) -> Normalized {
    match parse_record(raw) {
        Ok(record) => Normalized {
            record,
            parse_failure: None,
        },
        Err(failure) => {
            tracing::warn!(
                "[Normalizer] Could not parse reply as JSON ({}), showing raw response",
                failure
            );
            Normalized {
                record: AnalysisRecord::degraded(raw),
                parse_failure: Some(failure),
            }
        }
    }
}

/// Trim the reply and remove code fence markers.
pub fn strip_fences(reply: &str) -> String {
    FENCE_MARKER.replace_all(reply.trim(), "").into_owned()
}

fn parse_record(raw: &str) -> Result<AnalysisRecord, StructuredParseFailure> {
    let cleaned = strip_fences(raw);
    let value: Value = serde_json::from_str(&cleaned)?;

    match value {
        Value::Object(fields) => Ok(record_from_object(&fields)),
        other => Err(StructuredParseFailure::NotAnObject(json_type_name(&other))),
    }
}

fn record_from_object(fields: &Map<String, Value>) -> AnalysisRecord {
    AnalysisRecord {
        summary: fields.get("summary").and_then(summary_text),
        highlights: classify_highlights(fields.get("highlights")),
        glossary: classify_glossary(fields.get("glossary")),
    }
}

fn summary_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(value_text(other)),
    }
}

/// Classify a `highlights` value.
///
/// Only an array made entirely of objects is structured; an array with any
/// other element is treated as missing.
pub fn classify_highlights(value: Option<&Value>) -> Section<Vec<Highlight>> {
    match value {
        Some(Value::Array(items)) => {
            let highlights: Option<Vec<Highlight>> = items
                .iter()
                .map(|item| {
                    item.as_object().map(|obj| Highlight {
                        clause: field_text(obj, "clause"),
                        description: field_text(obj, "description"),
                    })
                })
                .collect();

            match highlights {
                Some(highlights) => Section::Structured(highlights),
                None => {
                    tracing::debug!("[Normalizer] highlights array has non-object items");
                    Section::Absent
                }
            }
        }
        Some(Value::String(text)) => Section::FreeText(text.clone()),
        _ => Section::Absent,
    }
}

/// Classify a `glossary` value. Entries keep the order of the reply.
pub fn classify_glossary(value: Option<&Value>) -> Section<Vec<GlossaryEntry>> {
    match value {
        Some(Value::Object(terms)) => Section::Structured(
            terms
                .iter()
                .map(|(term, explanation)| GlossaryEntry {
                    term: term.clone(),
                    explanation: value_text(explanation),
                })
                .collect(),
        ),
        Some(Value::String(text)) => Section::FreeText(text.clone()),
        _ => Section::Absent,
    }
}

fn field_text(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).map(value_text).unwrap_or_default()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
