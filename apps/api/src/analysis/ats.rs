//! ATS Scorer: a deterministic 0-100 approximation of how an applicant
//! tracking system would rate the document.
//!
//! Four additive components:
//! - keywords (max 40): saturating step function of the detected count
//! - diversity (max 25): share of categories with at least one match
//! - sections (max 25): 5 canonical sections, 5 points each
//! - quality (max 10): 5 independent signals, 2 points each

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::keywords::dictionary::KeywordDictionary;
use crate::keywords::extractor::DetectedTechnologies;

const MAX_SCORE: u32 = 100;
const DIVERSITY_WEIGHT: f64 = 25.0;
const SECTIONS_WEIGHT: f64 = 25.0;
const QUALITY_POINTS: u32 = 2;
/// Documents at least this long earn the length quality point.
const SUBSTANTIAL_TEXT_LEN: usize = 500;

static EXPERIENCE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:experience|work history|employment|professional experience)\b")
        .expect("experience section regex is valid")
});
static PROJECTS_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:projects?|portfolio|work samples|github)\b")
        .expect("projects section regex is valid")
});
static EDUCATION_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:education|academic|qualifications?|degree)\b")
        .expect("education section regex is valid")
});
static SKILLS_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:skills?|technical skills|competenc(?:y|ies)|proficienc(?:y|ies))\b")
        .expect("skills section regex is valid")
});
static CONTACT_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:email|phone|linkedin|github|portfolio)\b")
        .expect("contact section regex is valid")
});

/// An address-like `@domain.tld`. Also used by the suggestion generator.
pub(crate) static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)@[a-z0-9.-]+\.[a-z]{2,}").expect("email regex is valid")
});
static METRIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+%|\d+\+|increased|decreased|improved|reduced").expect("metric regex is valid")
});
static ACTION_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:developed|created|built|designed|implemented|managed|led|improved|optimized|automated|deployed|integrated)\b",
    )
    .expect("action verb regex is valid")
});
static PROFILE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://|github\.com|linkedin\.com").expect("profile link regex is valid")
});

const FEEDBACK_EXCELLENT: &str = "Excellent – Highly ATS-friendly!";
const FEEDBACK_GOOD: &str = "Good – Strong resume with room for minor improvements";
const FEEDBACK_AVERAGE: &str = "Average – Needs improvement for better ATS performance";
const FEEDBACK_POOR: &str = "Needs significant improvement for ATS systems";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keywords: u32,
    pub diversity: u32,
    pub sections: u32,
    pub quality: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScore {
    pub score: u32,
    pub feedback: String,
    pub suggestions: Vec<String>,
    pub breakdown: ScoreBreakdown,
    /// Detected keywords across all categories.
    pub matched: usize,
    pub total_possible: usize,
    pub sections_found: Vec<String>,
}

/// Which of the canonical sections the document appears to contain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SectionPresence {
    experience: bool,
    projects: bool,
    education: bool,
    skills: bool,
    contact: bool,
}

impl SectionPresence {
    fn detect(text: &str, lower: &str) -> Self {
        SectionPresence {
            experience: EXPERIENCE_SECTION.is_match(lower),
            projects: PROJECTS_SECTION.is_match(lower),
            education: EDUCATION_SECTION.is_match(lower),
            skills: SKILLS_SECTION.is_match(lower),
            contact: CONTACT_SECTION.is_match(lower) || text.contains('@'),
        }
    }

    /// Names of the present sections, in fixed order.
    fn found(&self) -> Vec<String> {
        [
            ("experience", self.experience),
            ("projects", self.projects),
            ("education", self.education),
            ("skills", self.skills),
            ("contact", self.contact),
        ]
        .into_iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| name.to_string())
        .collect()
    }

    fn count(&self) -> usize {
        self.found().len()
    }
}

pub fn calculate_ats_score(
    text: &str,
    detected: &DetectedTechnologies,
    dictionary: &KeywordDictionary,
) -> AtsScore {
    let lower = text.to_lowercase();
    let matched = detected.total();
    let categories_with_matches = detected.categories_with_matches();

    let keywords = keyword_points(matched) as f64;
    let diversity =
        categories_with_matches as f64 / detected.category_count() as f64 * DIVERSITY_WEIGHT;
    let sections = SectionPresence::detect(text, &lower);
    let section_points = sections.count() as f64 / 5.0 * SECTIONS_WEIGHT;
    let quality = quality_points(text, &lower) as f64;

    let score = ((keywords + diversity + section_points + quality).round() as u32).min(MAX_SCORE);
    let (feedback, suggestions) = feedback_for(score, matched, categories_with_matches, &sections);

    AtsScore {
        score,
        feedback: feedback.to_string(),
        suggestions,
        breakdown: ScoreBreakdown {
            keywords: keywords.round() as u32,
            diversity: diversity.round() as u32,
            sections: section_points.round() as u32,
            quality: quality.round() as u32,
        },
        matched,
        total_possible: dictionary.total_keywords(),
        sections_found: sections.found(),
    }
}

/// Saturating step curve: breadth is rewarded up to 20 keywords.
fn keyword_points(count: usize) -> u32 {
    match count {
        20.. => 40,
        15..=19 => 35,
        10..=14 => 30,
        7..=9 => 25,
        5..=6 => 20,
        3..=4 => 15,
        n => n as u32 * 5,
    }
}

fn quality_points(text: &str, lower: &str) -> u32 {
    let signals = [
        EMAIL.is_match(text),
        METRIC.is_match(lower),
        ACTION_VERB.is_match(lower),
        text.chars().count() >= SUBSTANTIAL_TEXT_LEN,
        PROFILE_LINK.is_match(text),
    ];
    signals.iter().filter(|s| **s).count() as u32 * QUALITY_POINTS
}

fn feedback_for(
    score: u32,
    matched: usize,
    categories_with_matches: usize,
    sections: &SectionPresence,
) -> (&'static str, Vec<String>) {
    let mut suggestions = Vec::new();
    let mut suggest = |cond: bool, text: &str| {
        if cond {
            suggestions.push(text.to_string());
        }
    };

    let feedback = match score {
        85.. => FEEDBACK_EXCELLENT,
        70..=84 => {
            suggest(matched < 15, "Add more relevant technical skills");
            suggest(!sections.contact, "Ensure contact information is clearly visible");
            FEEDBACK_GOOD
        }
        55..=69 => {
            suggest(matched < 10, "Include more technical keywords relevant to your field");
            suggest(
                categories_with_matches < 3,
                "Add skills from different categories (languages, tools, frameworks)",
            );
            suggest(!sections.experience, "Add a clear 'Experience' or 'Work History' section");
            suggest(!sections.projects, "Include a 'Projects' section to showcase your work");
            FEEDBACK_AVERAGE
        }
        _ => {
            suggest(matched < 5, "Add significantly more technical skills and keywords");
            suggest(!sections.skills, "Create a dedicated 'Skills' section");
            suggest(
                !sections.experience && !sections.projects,
                "Add 'Experience' and/or 'Projects' sections",
            );
            suggest(!sections.education, "Include an 'Education' section");
            suggest(
                !sections.contact,
                "Add clear contact information (email, phone, LinkedIn)",
            );
            FEEDBACK_POOR
        }
    };

    (feedback, suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::extractor::extract_technologies;

    fn score(text: &str) -> AtsScore {
        let dictionary = KeywordDictionary::builtin();
        let detected = extract_technologies(text, &dictionary);
        calculate_ats_score(text, &detected, &dictionary)
    }

    const STRONG_RESUME: &str = "Jane Doe | jane.doe@example.com | linkedin.com/in/janedoe | github.com/janedoe\n\
        SKILLS\n\
        Python, Java, JavaScript, TypeScript, Rust, Go backend, SQL, HTML, CSS\n\
        React, Node.js, Django, Flask, Docker, Kubernetes, AWS, GraphQL, Terraform\n\
        Git, Jira, Postman, Figma, Webpack\n\
        Coursework: Data Structures, Algorithms, Operating Systems, Machine Learning\n\
        EXPERIENCE\n\
        Senior Engineer at Acme Corp\n\
        Jan 2020 - Present\n\
        - Developed payment APIs serving 2M users and reduced latency by 40%\n\
        - Led migration of 30+ services to Kubernetes on AWS\n\
        PROJECTS\n\
        TaskTracker | React, Node.js\n\
        - Built and deployed a task manager https://tasks.example.com\n\
        EDUCATION\n\
        B.Sc. Computer Science, State University, degree with honours";

    #[test]
    fn test_empty_text_scores_zero() {
        let ats = score("");
        assert_eq!(ats.score, 0);
        assert_eq!(ats.matched, 0);
        assert!(ats.sections_found.is_empty());
        assert_eq!(ats.feedback, FEEDBACK_POOR);
        assert_eq!(
            ats.suggestions,
            vec![
                "Add significantly more technical skills and keywords",
                "Create a dedicated 'Skills' section",
                "Add 'Experience' and/or 'Projects' sections",
                "Include an 'Education' section",
                "Add clear contact information (email, phone, LinkedIn)",
            ]
        );
    }

    #[test]
    fn test_keyword_points_is_non_decreasing() {
        let mut previous = 0;
        for count in 2..=25 {
            let points = keyword_points(count);
            assert!(points >= previous, "keyword points dropped at {count}");
            previous = points;
        }
        assert_eq!(keyword_points(0), 0);
        assert_eq!(keyword_points(2), 10);
        assert_eq!(keyword_points(3), 15);
        assert_eq!(keyword_points(19), 35);
        assert_eq!(keyword_points(25), 40);
    }

    #[test]
    fn test_strong_resume_is_excellent() {
        let ats = score(STRONG_RESUME);
        assert!(ats.score >= 85, "expected excellent, got {:?}", ats);
        assert_eq!(ats.feedback, FEEDBACK_EXCELLENT);
        assert!(ats.suggestions.is_empty());
        assert_eq!(
            ats.sections_found,
            vec!["experience", "projects", "education", "skills", "contact"]
        );
        assert_eq!(ats.breakdown.keywords, 40);
        assert_eq!(ats.breakdown.diversity, 25);
        assert_eq!(ats.breakdown.sections, 25);
    }

    #[test]
    fn test_no_email_loses_quality_points() {
        let with_email = score("Contact: jane@example.com");
        let without_email = score("Contact: jane at example dot com");
        assert_eq!(with_email.breakdown.quality, 2);
        assert_eq!(without_email.breakdown.quality, 0);
    }

    #[test]
    fn test_bare_at_sign_counts_as_contact() {
        let ats = score("reach me @ the office");
        assert_eq!(ats.sections_found, vec!["contact"]);
    }

    #[test]
    fn test_score_within_bounds() {
        let long = STRONG_RESUME.repeat(5);
        for text in ["", "x", STRONG_RESUME, long.as_str()] {
            let ats = score(text);
            assert!(ats.score <= MAX_SCORE);
            let b = &ats.breakdown;
            assert!(b.keywords <= 40 && b.diversity <= 25 && b.sections <= 25 && b.quality <= 10);
        }
    }

    #[test]
    fn test_total_possible_is_dictionary_size() {
        let dictionary = KeywordDictionary::builtin();
        let ats = score("python");
        assert_eq!(ats.total_possible, dictionary.total_keywords());
        assert_eq!(ats.matched, 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(score("python")).unwrap();
        assert!(json.get("totalPossible").is_some());
        assert!(json.get("sectionsFound").is_some());
        assert!(json["breakdown"].get("keywords").is_some());
    }
}
