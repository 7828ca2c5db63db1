//! Shared types for document analysis

use serde::Serialize;

/// A reply field whose shape is only known once the reply arrives.
///
/// Resolved once by the normalizer; renderers match on it and never look at
/// the raw JSON again.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Section<T> {
    /// The shape the prompt asked for
    Structured(T),
    /// The model answered with prose instead
    FreeText(String),
    /// Missing, null, or unusable
    Absent,
}

/// Which rendering a section calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Structured,
    FreeText,
    Absent,
}

impl<T> Section<T> {
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Structured(_) => SectionKind::Structured,
            Self::FreeText(_) => SectionKind::FreeText,
            Self::Absent => SectionKind::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn structured(&self) -> Option<&T> {
        match self {
            Self::Structured(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self::Absent
    }
}

/// An obligation, right, or critical clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub clause: String,
    pub description: String,
}

/// A legal term and its plain-language explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub explanation: String,
}

/// Structured result of one analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalysisRecord {
    pub summary: Option<String>,
    pub highlights: Section<Vec<Highlight>>,
    pub glossary: Section<Vec<GlossaryEntry>>,
}

impl AnalysisRecord {
    /// Record used when the reply could not be structured: the reply itself
    /// becomes the summary.
    pub fn degraded(raw_reply: &str) -> Self {
        Self {
            summary: Some(raw_reply.to_string()),
            highlights: Section::Absent,
            glossary: Section::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_kind() {
        let structured: Section<Vec<Highlight>> = Section::Structured(vec![]);
        assert_eq!(structured.kind(), SectionKind::Structured);
        assert_eq!(Section::<Vec<Highlight>>::FreeText("x".into()).kind(), SectionKind::FreeText);
        assert!(Section::<Vec<Highlight>>::default().is_absent());
    }

    #[test]
    fn test_degraded_record() {
        let record = AnalysisRecord::degraded("raw text");
        assert_eq!(record.summary.as_deref(), Some("raw text"));
        assert!(record.highlights.is_absent());
        assert!(record.glossary.is_absent());
    }

    #[test]
    fn test_record_serializes_each_shape() {
        let record = AnalysisRecord {
            summary: Some("S".into()),
            highlights: Section::Structured(vec![Highlight {
                clause: "A".into(),
                description: "B".into(),
            }]),
            glossary: Section::FreeText("none".into()),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "summary": "S",
                "highlights": [{"clause": "A", "description": "B"}],
                "glossary": "none"
            })
        );

        let empty = AnalysisRecord::default();
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            json!({"summary": null, "highlights": null, "glossary": null})
        );
    }
}
