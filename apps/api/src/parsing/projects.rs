//! Project Parser: line-oriented heuristics over a projects section.
//!
//! A cursor walks the non-blank lines. When a line looks like a project title,
//! a second cursor gathers the following lines into its description until the
//! next title, and the outer cursor resumes after them.
//!
//! Each title heuristic is its own predicate so it can be tested alone.

use std::sync::LazyLock;

use regex::Regex;

use crate::keywords::dictionary::KeywordDictionary;
use crate::keywords::extractor::extract_technologies_from_text;
use crate::models::resume::{ProjectEntry, NOT_SPECIFIED, NO_DESCRIPTION};
use crate::parsing::patterns::{first_date_range, BARE_YEAR_LINE, URL, YEAR};

const LINK_GLYPHS: &[char] = &['↗', '🔗'];
const BULLETS: &[char] = &['•', '-', '*'];

/// Titles are short; anything at or above this is prose.
const MAX_TITLE_LEN: usize = 150;
const MIN_TITLE_LEN: usize = 5;
/// Unbulleted description lines shorter than this are fragments.
const MIN_PROSE_LINE_LEN: usize = 15;

static PIPE_TECH_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\|\s*(?:HTML|CSS|JavaScript|React|Python|Java|Node|API|Tkinter|MySQL|Streamlit|scikit-learn|sklearn|NLP|TF-IDF|Cosine|Similarity)",
    )
    .expect("pipe tech hint regex is valid")
});

static CAPITALIZED_LEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z\s-]+").expect("capitalized lead regex is valid"));

static CAPITALIZED_PIPE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-zA-Z\s-]+\s*\|").expect("capitalized pipe title regex is valid")
});

fn has_link_glyph(line: &str) -> bool {
    line.contains(LINK_GLYPHS)
}

fn has_pipe(line: &str) -> bool {
    line.contains('|')
}

/// "Name | React, ...": a pipe followed by a commonly listed technology.
fn has_pipe_tech_hint(line: &str) -> bool {
    PIPE_TECH_HINT.is_match(line)
}

fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLETS)
}

fn is_bare_year(line: &str) -> bool {
    BARE_YEAR_LINE.is_match(line)
}

/// A short line opening with a capitalized word that is not a bullet.
fn is_capitalized_heading(line: &str) -> bool {
    let len = line.chars().count();
    CAPITALIZED_LEAD.is_match(line) && !is_bullet(line) && len < MAX_TITLE_LEN && len > MIN_TITLE_LEN
}

fn is_capitalized_pipe_title(line: &str) -> bool {
    CAPITALIZED_PIPE_TITLE.is_match(line) && !is_bullet(line)
}

/// Whether the outer cursor should start a project at `line`.
fn is_project_title(line: &str) -> bool {
    has_link_glyph(line) || has_pipe(line) || has_pipe_tech_hint(line) || is_capitalized_heading(line)
}

/// Whether a line inside a description starts the next project. Narrower than
/// [`is_project_title`] so capitalized prose stays in the description.
fn starts_next_project(line: &str) -> bool {
    has_link_glyph(line) || has_pipe_tech_hint(line) || is_capitalized_pipe_title(line)
}

/// Parses every project in `section`. `None` (section absent) yields none.
pub fn parse_projects(section: Option<&str>, dictionary: &KeywordDictionary) -> Vec<ProjectEntry> {
    let Some(section) = section else {
        return Vec::new();
    };

    let lines: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut projects = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if !is_project_title(lines[i]) {
            i += 1;
            continue;
        }

        let title = parse_title(lines[i], lines.get(i + 1).copied());
        let (description_lines, next) = collect_description(&lines, i + 1);
        let description = description_lines.join(" ").trim().to_string();

        let full_text = format!("{} {} {}", title.name, title.technologies_hint, description);
        let technologies = extract_technologies_from_text(&full_text, dictionary);
        let links = URL
            .find_iter(&full_text)
            .map(|m| m.as_str().to_string())
            .collect();
        // A full date range anywhere in the project beats the year guess.
        let duration = first_date_range(&full_text)
            .map(String::from)
            .or(title.duration)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        if is_real_project_name(&title.name) {
            projects.push(ProjectEntry {
                name: title.name,
                duration,
                description: if description.is_empty() {
                    NO_DESCRIPTION.to_string()
                } else {
                    description
                },
                technologies,
                links,
            });
        }

        i = next;
    }

    projects
}

#[derive(Debug, Default, PartialEq)]
struct ProjectTitle {
    name: String,
    technologies_hint: String,
    duration: Option<String>,
}

/// Splits a title line into name, tech-list hint and year, peeking at the
/// following line for a standalone year.
fn parse_title(line: &str, next_line: Option<&str>) -> ProjectTitle {
    let mut title = ProjectTitle::default();

    let mut segments = line.split('|');
    title.name = strip_link_glyphs(segments.next().unwrap_or_default());
    if let Some(second) = segments.next().map(str::trim) {
        if YEAR.is_match(second) {
            title.duration = Some(second.to_string());
        } else {
            title.technologies_hint = second.to_string();
        }
    }

    if let Some(year) = YEAR.find(&title.name) {
        title.duration = Some(year.as_str().to_string());
        title.name = YEAR.replace(&title.name, "").trim().to_string();
    }

    if title.duration.is_none() {
        if let Some(next) = next_line.filter(|l| is_bare_year(l)) {
            title.duration = Some(next.trim().to_string());
        }
    }

    title
}

/// Gathers description lines from `start` until the next project title.
/// Returns the lines and the index where the scan stopped.
fn collect_description<'a>(lines: &[&'a str], start: usize) -> (Vec<&'a str>, usize) {
    let mut description = Vec::new();
    let mut j = start;

    while j < lines.len() {
        let line = lines[j];
        if starts_next_project(line) {
            break;
        }
        j += 1;

        if is_bare_year(line) {
            continue;
        }
        if is_bullet(line) {
            description.push(line.trim_start_matches(BULLETS).trim_start());
        } else if line.chars().count() > MIN_PROSE_LINE_LEN && !has_pipe(line) {
            description.push(line);
        }
    }

    (description, j)
}

fn strip_link_glyphs(text: &str) -> String {
    text.replace(LINK_GLYPHS, "").trim().to_string()
}

/// Rejects the section heading and other degenerate names.
fn is_real_project_name(name: &str) -> bool {
    name.chars().count() > 3 && !name.eq_ignore_ascii_case("projects")
}
