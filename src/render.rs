//! Terminal rendering of extracted text and analysis records
//!
//! Structured sections become two-column tables, free text is printed as-is,
//! and absent sections get an explicit "nothing available" line.

use std::io::{self, Write};

use crate::ai::types::{AnalysisRecord, GlossaryEntry, Highlight, Section};
use crate::document::ExtractedText;

const KEY_COLUMN_MAX: usize = 32;
const VALUE_COLUMN_MAX: usize = 72;

pub const NO_SUMMARY: &str = "No summary found.";
pub const NO_HIGHLIGHTS: &str = "No highlights available.";
pub const NO_GLOSSARY: &str = "No glossary available.";

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

/// Print the extracted text, optionally cut after `limit` characters.
pub fn render_preview<W: Write>(
    out: &mut W,
    text: &ExtractedText,
    limit: Option<usize>,
) -> io::Result<()> {
    heading(out, "Document Preview")?;

    let total = text.char_count();
    match limit {
        Some(limit) if total > limit => {
            let shown: String = text.as_str().chars().take(limit).collect();
            writeln!(out, "{}", shown)?;
            writeln!(out, "... ({} more characters)", total - limit)?;
        }
        _ => writeln!(out, "{}", text)?,
    }
    writeln!(out)
}

/// Print the three analysis sections
pub fn render_record<W: Write>(out: &mut W, record: &AnalysisRecord) -> io::Result<()> {
    heading(out, "Summary")?;
    writeln!(out, "{}", record.summary.as_deref().unwrap_or(NO_SUMMARY))?;
    writeln!(out)?;

    heading(out, "Highlights")?;
    render_highlights(out, &record.highlights)?;
    writeln!(out)?;

    heading(out, "Glossary")?;
    render_glossary(out, &record.glossary)
}

pub fn render_highlights<W: Write>(
    out: &mut W,
    highlights: &Section<Vec<Highlight>>,
) -> io::Result<()> {
    match highlights {
        Section::Structured(items) => {
            let rows: Vec<(&str, &str)> = items
                .iter()
                .map(|h| (h.clause.as_str(), h.description.as_str()))
                .collect();
            write_table(out, ("Clause", "Description"), &rows)
        }
        Section::FreeText(text) => writeln!(out, "{}", text),
        Section::Absent => writeln!(out, "{}", NO_HIGHLIGHTS),
    }
}

pub fn render_glossary<W: Write>(
    out: &mut W,
    glossary: &Section<Vec<GlossaryEntry>>,
) -> io::Result<()> {
    match glossary {
        Section::Structured(entries) => {
            let rows: Vec<(&str, &str)> = entries
                .iter()
                .map(|e| (e.term.as_str(), e.explanation.as_str()))
                .collect();
            write_table(out, ("Term", "Explanation"), &rows)
        }
        Section::FreeText(text) => writeln!(out, "{}", text),
        Section::Absent => writeln!(out, "{}", NO_GLOSSARY),
    }
}

fn write_table<W: Write>(out: &mut W, headers: (&str, &str), rows: &[(&str, &str)]) -> io::Result<()> {
    let key_width = column_width(headers.0, rows.iter().map(|r| r.0), KEY_COLUMN_MAX);
    let value_width = column_width(headers.1, rows.iter().map(|r| r.1), VALUE_COLUMN_MAX);

    write_row(out, &[headers.0.to_string()], &[headers.1.to_string()], key_width)?;
    writeln!(out, "{}-+-{}", "-".repeat(key_width), "-".repeat(value_width))?;

    for (key, value) in rows {
        write_row(out, &wrap(key, key_width), &wrap(value, value_width), key_width)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, left: &[String], right: &[String], key_width: usize) -> io::Result<()> {
    let height = left.len().max(right.len()).max(1);
    for i in 0..height {
        let l = left.get(i).map(String::as_str).unwrap_or("");
        let r = right.get(i).map(String::as_str).unwrap_or("");
        let pad = key_width.saturating_sub(l.chars().count());
        let line = format!("{}{} | {}", l, " ".repeat(pad), r);
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>, max: usize) -> usize {
    let widest = cells
        .flat_map(str::lines)
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    widest.min(max).max(header.chars().count())
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for source_line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in source_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            if current_len > 0 && current_len + 1 + word.len() > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_absent_sections_say_so() {
        let output = rendered(|out| render_record(out, &AnalysisRecord::default()));
        assert!(output.contains(NO_SUMMARY));
        assert!(output.contains(NO_HIGHLIGHTS));
        assert!(output.contains(NO_GLOSSARY));
    }

    #[test]
    fn test_structured_highlights_render_as_table() {
        let section = Section::Structured(vec![
            Highlight {
                clause: "Rent".into(),
                description: "Payable on the first of each month".into(),
            },
            Highlight {
                clause: "Deposit".into(),
                description: "Two months' rent".into(),
            },
        ]);
        let output = rendered(|out| render_highlights(out, &section));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Clause  | Description");
        assert!(lines[1].starts_with("--------+-"));
        assert_eq!(lines[2], "Rent    | Payable on the first of each month");
        assert_eq!(lines[3], "Deposit | Two months' rent");
    }

    #[test]
    fn test_glossary_table_headers() {
        let section = Section::Structured(vec![GlossaryEntry {
            term: "Force majeure".into(),
            explanation: "Unforeseeable circumstances".into(),
        }]);
        let output = rendered(|out| render_glossary(out, &section));
        assert!(output.starts_with("Term"));
        assert!(output.contains("Explanation"));
        assert!(output.contains("Force majeure | Unforeseeable circumstances"));
    }

    #[test]
    fn test_free_text_is_verbatim() {
        let section: Section<Vec<GlossaryEntry>> = Section::FreeText("**Tort**: a wrong".into());
        let output = rendered(|out| render_glossary(out, &section));
        assert_eq!(output, "**Tort**: a wrong\n");
    }

    #[test]
    fn test_empty_structured_renders_header_only() {
        let section: Section<Vec<Highlight>> = Section::Structured(vec![]);
        let output = rendered(|out| render_highlights(out, &section));
        assert_eq!(output.lines().count(), 2);
        assert!(!output.contains(NO_HIGHLIGHTS));
    }

    #[test]
    fn test_preview_truncation() {
        let text = ExtractedText::new("abcdefghij").unwrap();
        let output = rendered(|out| render_preview(out, &text, Some(4)));
        assert!(output.contains("abcd\n"));
        assert!(output.contains("(6 more characters)"));

        let output = rendered(|out| render_preview(out, &text, None));
        assert!(output.contains("abcdefghij"));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("first\nsecond", 20), vec!["first", "second"]);
        assert_eq!(wrap("", 10), vec![""]);
    }
}
