//! Experience Parser: turns an experience section into `ExperienceEntry` values.
//!
//! Blocks are separated by blank lines. Each block's first line is the header;
//! its layout decides which side is the position and which is the company.

use std::sync::LazyLock;

use regex::Regex;

use crate::keywords::dictionary::KeywordDictionary;
use crate::keywords::extractor::extract_technologies_from_text;
use crate::models::resume::{ExperienceEntry, NOT_SPECIFIED, NO_DESCRIPTION};
use crate::parsing::patterns::first_date_range;

static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("block separator regex is valid"));

/// Blocks shorter than this (trimmed) are noise: stray dates, page numbers.
const MIN_BLOCK_LEN: usize = 20;

/// How the header line of an experience block is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderLayout {
    /// "Senior Engineer at Acme Corp"
    PositionAtCompany,
    /// "Acme Corp - Senior Engineer"
    CompanyDashPosition,
    /// "Senior Engineer | Acme Corp"
    PositionPipeCompany,
    /// Position on the first line, company on the second.
    Stacked,
}

impl HeaderLayout {
    fn detect(line: &str) -> Self {
        if line.contains(" at ") {
            HeaderLayout::PositionAtCompany
        } else if line.contains(" - ") {
            HeaderLayout::CompanyDashPosition
        } else if line.contains('|') {
            HeaderLayout::PositionPipeCompany
        } else {
            HeaderLayout::Stacked
        }
    }
}

/// Parses every block of `section`. `None` (section absent) yields no entries.
pub fn parse_experience(
    section: Option<&str>,
    dictionary: &KeywordDictionary,
) -> Vec<ExperienceEntry> {
    let Some(section) = section else {
        return Vec::new();
    };

    BLOCK_SEPARATOR
        .split(section)
        .filter_map(|block| parse_block(block, dictionary))
        .collect()
}

fn parse_block(block: &str, dictionary: &KeywordDictionary) -> Option<ExperienceEntry> {
    if block.trim().chars().count() < MIN_BLOCK_LEN {
        return None;
    }

    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let header = *lines.first()?;

    let (position, company) = split_header(header, lines.get(1).copied());

    // Two header lines are skipped whenever both roles resolved: either the
    // stacked company line or, for one-line headers, the date line under it.
    let description_start = if position.is_some() && company.is_some() {
        2
    } else {
        1
    };
    let description = lines
        .get(description_start..)
        .map(|rest| rest.join(" ").trim().to_string())
        .unwrap_or_default();

    Some(ExperienceEntry {
        position: position.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        company: company.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        duration: first_date_range(block).unwrap_or(NOT_SPECIFIED).to_string(),
        description: if description.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            description
        },
        technologies: extract_technologies_from_text(block, dictionary),
    })
}

/// Returns `(position, company)` for a header line.
fn split_header(header: &str, next_line: Option<&str>) -> (Option<String>, Option<String>) {
    match HeaderLayout::detect(header) {
        HeaderLayout::PositionAtCompany => {
            let mut parts = header.split(" at ");
            (non_empty(parts.next()), non_empty(parts.next()))
        }
        HeaderLayout::CompanyDashPosition => {
            let mut parts = header.split(" - ");
            let company = non_empty(parts.next());
            (non_empty(parts.next()), company)
        }
        HeaderLayout::PositionPipeCompany => {
            let mut parts = header.split('|');
            (non_empty(parts.next()), non_empty(parts.next()))
        }
        HeaderLayout::Stacked => (non_empty(Some(header)), non_empty(next_line)),
    }
}

fn non_empty(part: Option<&str>) -> Option<String> {
    part.map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
}
