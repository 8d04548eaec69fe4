//! End-to-end résumé analysis over already-extracted text.
//!
//! Order: whole-document technologies, experience section, projects section,
//! ATS score, suggestions. Every step is infallible; a document with no
//! recognizable structure yields empty lists and a low score.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::ats::{calculate_ats_score, AtsScore};
use crate::analysis::suggestions::{generate_detailed_suggestions, DetailedSuggestions};
use crate::keywords::dictionary::{KeywordDictionary, EXPERIENCE_HEADINGS, PROJECT_HEADINGS};
use crate::keywords::extractor::{extract_technologies, DetectedTechnologies};
use crate::models::resume::{ExperienceEntry, ProjectEntry};
use crate::parsing::experience::parse_experience;
use crate::parsing::projects::parse_projects;
use crate::parsing::sections::extract_section;

/// Parsed entries of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary<T> {
    pub found: bool,
    pub count: usize,
    pub entries: Vec<T>,
}

impl<T> SectionSummary<T> {
    fn new(entries: Vec<T>) -> Self {
        SectionSummary {
            found: !entries.is_empty(),
            count: entries.len(),
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    /// Characters of normalized text.
    pub text_length: usize,
    pub total_found: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub success: bool,
    pub data: DetectedTechnologies,
    pub experience: SectionSummary<ExperienceEntry>,
    pub projects: SectionSummary<ProjectEntry>,
    pub ats: AtsScore,
    pub suggestions: DetailedSuggestions,
    pub stats: AnalysisStats,
}

pub fn analyze_resume(text: &str, num_pages: usize, dictionary: &KeywordDictionary) -> ResumeAnalysis {
    let detected = extract_technologies(text, dictionary);

    let experience_section = extract_section(text, EXPERIENCE_HEADINGS);
    let experiences = parse_experience(experience_section.as_deref(), dictionary);

    let projects_section = extract_section(text, PROJECT_HEADINGS);
    let projects = parse_projects(projects_section.as_deref(), dictionary);

    let ats = calculate_ats_score(text, &detected, dictionary);
    let suggestions = generate_detailed_suggestions(text, &detected, &experiences, &projects, &ats);

    info!(
        experiences = experiences.len(),
        projects = projects.len(),
        keywords = ats.matched,
        score = ats.score,
        "Résumé analyzed"
    );

    ResumeAnalysis {
        success: true,
        stats: AnalysisStats {
            text_length: text.chars().count(),
            total_found: detected.total(),
            pages: num_pages,
        },
        data: detected,
        experience: SectionSummary::new(experiences),
        projects: SectionSummary::new(projects),
        ats,
        suggestions,
    }
}
