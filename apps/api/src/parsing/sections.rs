//! Section Extractor: finds the lines belonging to a named résumé section.

use crate::keywords::dictionary::{EXPERIENCE_HEADINGS, OTHER_HEADINGS, PROJECT_HEADINGS};

/// Lines at least this long are treated as prose, never as headings.
const MAX_HEADING_LEN: usize = 100;

/// Returns the non-blank lines between the first heading line matching any of
/// `heading_keywords` and the next known heading of any kind, joined with
/// `\n`. `None` when no line matches a heading keyword.
pub fn extract_section(text: &str, heading_keywords: &[&str]) -> Option<String> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let heading_idx = lines
        .iter()
        .position(|line| is_heading_line(line, heading_keywords))?;
    let start = heading_idx + 1;

    let end = (start..lines.len())
        .find(|&i| i != heading_idx && is_heading_line(lines[i], all_headings()))
        .unwrap_or(lines.len());

    Some(lines[start..end].join("\n"))
}

fn is_heading_line<S: AsRef<str>>(line: &str, headings: impl IntoIterator<Item = S>) -> bool {
    if line.chars().count() >= MAX_HEADING_LEN {
        return false;
    }
    let lower = line.to_lowercase();
    headings
        .into_iter()
        .any(|h| lower.contains(h.as_ref()))
}

fn all_headings() -> impl Iterator<Item = &'static str> {
    EXPERIENCE_HEADINGS
        .iter()
        .chain(PROJECT_HEADINGS)
        .chain(OTHER_HEADINGS)
        .copied()
}
