//! Suggestion Generator: independent rules, each appending one suggestion to
//! its tier when its condition holds. No rule reads another rule's output.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::ats::{AtsScore, EMAIL};
use crate::keywords::extractor::DetectedTechnologies;
use crate::models::resume::{ExperienceEntry, ProjectEntry};

const TARGET_KEYWORDS: usize = 15;
const MAX_WEAK_PHRASES: usize = 2;
const MIN_PROJECT_DESCRIPTION: usize = 50;
const MIN_PROJECT_TECHNOLOGIES: usize = 3;
const MIN_EXPERIENCE_DESCRIPTION: usize = 100;
const MIN_TEXT_LEN: usize = 800;
const MAX_TEXT_LEN: usize = 2500;
const MIN_BULLETS: usize = 5;

static PROFESSIONAL_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:linkedin\.com|github\.com)\b").expect("professional link regex is valid")
});
static EXPERIENCE_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:experience|work history|employment)\b")
        .expect("experience mention regex is valid")
});
static PROJECT_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:project|portfolio)\b").expect("project mention regex is valid")
});
static WEAK_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:responsible for|duties include|worked on|helped with|tasked with)")
        .expect("weak phrase regex is valid")
});
static METRIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+%|\d+\+|increased|decreased|improved|reduced by \d+")
        .expect("metric regex is valid")
});
static STRONG_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:developed|created|built|designed|implemented|managed|led|improved|optimized)\b")
        .expect("strong verb regex is valid")
});
static DATABASE_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)mongodb|postgresql|mysql|redis|firebase").expect("database regex is valid")
});

/// 1 is most urgent. Serialized as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(format!("priority must be 1, 2 or 3, got {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub issue: String,
    pub impact: String,
    pub fix: String,
    pub priority: Priority,
}

impl Suggestion {
    fn new(issue: impl Into<String>, impact: &str, fix: impl Into<String>, priority: Priority) -> Self {
        Suggestion {
            issue: issue.into(),
            impact: impact.to_string(),
            fix: fix.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSummary {
    pub total_issues: usize,
    pub critical_count: usize,
    pub important_count: usize,
    /// Content quality + keyword optimization + formatting tips.
    pub optional_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedSuggestions {
    pub critical: Vec<Suggestion>,
    pub important: Vec<Suggestion>,
    pub content_quality: Vec<Suggestion>,
    pub keyword_optimization: Vec<Suggestion>,
    pub formatting_tips: Vec<Suggestion>,
    pub summary: SuggestionSummary,
}

pub fn generate_detailed_suggestions(
    text: &str,
    detected: &DetectedTechnologies,
    experiences: &[ExperienceEntry],
    projects: &[ProjectEntry],
    ats: &AtsScore,
) -> DetailedSuggestions {
    let lower = text.to_lowercase();

    let critical = critical_issues(text, &lower, experiences, projects);
    let important = important_improvements(text, detected, ats.matched);
    let content_quality = content_quality(experiences, projects);
    let keyword_optimization = keyword_optimization(text, &lower, detected);
    let formatting_tips = formatting_tips(text);

    let optional_count = content_quality.len() + keyword_optimization.len() + formatting_tips.len();
    let summary = SuggestionSummary {
        total_issues: critical.len() + important.len() + optional_count,
        critical_count: critical.len(),
        important_count: important.len(),
        optional_count,
    };

    DetailedSuggestions {
        critical,
        important,
        content_quality,
        keyword_optimization,
        formatting_tips,
        summary,
    }
}

fn critical_issues(
    text: &str,
    lower: &str,
    experiences: &[ExperienceEntry],
    projects: &[ProjectEntry],
) -> Vec<Suggestion> {
    let mut out = Vec::new();

    if !EMAIL.is_match(text) {
        out.push(Suggestion::new(
            "Missing email address",
            "High - Recruiters cannot contact you",
            "Add a professional email address at the top of your resume (e.g., yourname@email.com)",
            Priority::High,
        ));
    }
    if !PROFESSIONAL_LINK.is_match(text) {
        out.push(Suggestion::new(
            "Missing professional links",
            "High - No way to verify your projects or professional network",
            "Add LinkedIn profile and GitHub portfolio links in your contact section",
            Priority::High,
        ));
    }
    if experiences.is_empty() && !EXPERIENCE_MENTION.is_match(lower) {
        out.push(Suggestion::new(
            "No work experience section detected",
            "Critical - ATS may reject your resume",
            "Add a clearly labeled 'Work Experience' or 'Professional Experience' section",
            Priority::High,
        ));
    }
    if projects.is_empty() && !PROJECT_MENTION.is_match(lower) {
        out.push(Suggestion::new(
            "No projects section detected",
            "High - Missing opportunity to showcase practical skills",
            "Add a 'Projects' section with 2-3 relevant projects including technologies used",
            Priority::High,
        ));
    }

    out
}

fn important_improvements(
    text: &str,
    detected: &DetectedTechnologies,
    total_keywords: usize,
) -> Vec<Suggestion> {
    let mut out = Vec::new();

    if total_keywords < TARGET_KEYWORDS {
        let missing: Vec<String> = detected
            .empty_categories()
            .iter()
            .map(|c| c.label())
            .collect();
        out.push(Suggestion::new(
            format!("Only {total_keywords} technical keywords detected (target: 15+)"),
            "Medium - Lower ATS match scores for job postings",
            format!(
                "Add more relevant skills in these areas: {}. Examples: cloud platforms (AWS, Azure), testing frameworks, databases (PostgreSQL, MongoDB)",
                missing.join(", ")
            ),
            Priority::Medium,
        ));
    }
    if WEAK_PHRASE.find_iter(text).count() > MAX_WEAK_PHRASES {
        out.push(Suggestion::new(
            "Weak action verbs detected",
            "Medium - Reduces impact of your achievements",
            "Replace phrases like 'responsible for' with strong action verbs: Developed, Engineered, Architected, Optimized, Implemented",
            Priority::Medium,
        ));
    }
    if !METRIC.is_match(text) {
        out.push(Suggestion::new(
            "No quantifiable achievements found",
            "Medium - Cannot demonstrate measurable impact",
            "Add metrics to your achievements: 'Improved performance by 30%', 'Reduced load time by 2 seconds', 'Managed team of 5 developers'",
            Priority::Medium,
        ));
    }

    out
}

fn content_quality(experiences: &[ExperienceEntry], projects: &[ProjectEntry]) -> Vec<Suggestion> {
    let mut out = Vec::new();

    for project in projects {
        let name = &project.name;
        if project.description.chars().count() < MIN_PROJECT_DESCRIPTION {
            out.push(Suggestion::new(
                format!("Project \"{name}\" has insufficient description"),
                "Low - Missing opportunity to showcase skills",
                "Expand description to 80-120 characters including problem solved, technologies, and outcomes",
                Priority::Low,
            ));
        }
        if project.technologies.len() < MIN_PROJECT_TECHNOLOGIES {
            out.push(Suggestion::new(
                format!(
                    "Project \"{name}\" lists only {} technologies",
                    project.technologies.len()
                ),
                "Low - Missing keyword opportunities",
                "Add more specific technologies: frameworks, libraries, databases, and tools used",
                Priority::Low,
            ));
        }
        if project.links.is_empty() {
            out.push(Suggestion::new(
                format!("Project \"{name}\" has no GitHub link or live demo"),
                "Medium - Cannot verify your work",
                "Add GitHub repository link or live demo URL to showcase your project",
                Priority::Medium,
            ));
        }
    }

    for experience in experiences {
        let company = &experience.company;
        if experience.description.chars().count() < MIN_EXPERIENCE_DESCRIPTION {
            out.push(Suggestion::new(
                format!("Experience at \"{company}\" has brief description"),
                "Medium - Not showcasing full scope of work",
                "Expand to 3-5 bullet points with specific achievements and quantifiable results",
                Priority::Medium,
            ));
        }
        if !STRONG_VERB.is_match(&experience.description) {
            out.push(Suggestion::new(
                format!("Experience at \"{company}\" lacks strong action verbs"),
                "Medium - Weakens impact of achievements",
                "Start each bullet point with action verbs: Developed, Led, Architected, Optimized",
                Priority::Medium,
            ));
        }
    }

    out
}

fn keyword_optimization(text: &str, lower: &str, detected: &DetectedTechnologies) -> Vec<Suggestion> {
    let mut out = Vec::new();
    let languages = &detected.programming_languages;
    let has_tech = |needles: &[&str]| {
        detected
            .technologies
            .iter()
            .any(|t| needles.iter().any(|n| t.contains(n)))
    };

    if languages.contains("python") && !has_tech(&["django", "flask", "fastapi"]) {
        out.push(Suggestion::new(
            "Python detected but no frameworks mentioned",
            "Low - Missing related keyword opportunities",
            "If you've used Python frameworks, add them: Django, Flask, FastAPI, or Pandas",
            Priority::Low,
        ));
    }
    if languages.contains("javascript") && !has_tech(&["react", "vue", "angular", "node"]) {
        out.push(Suggestion::new(
            "JavaScript detected but no frameworks mentioned",
            "Low - Missing related keyword opportunities",
            "Add JavaScript frameworks you've used: React, Vue, Angular, Node.js, Express",
            Priority::Low,
        ));
    }
    if !has_tech(&["aws", "azure", "gcp", "cloud"]) {
        out.push(Suggestion::new(
            "No cloud platforms detected",
            "Medium - Cloud skills are highly valued",
            "If you have cloud experience, add: AWS, Azure, GCP, or services like S3, Lambda, EC2",
            Priority::Medium,
        ));
    }
    if !lower.contains("database") && !DATABASE_MENTION.is_match(text) {
        out.push(Suggestion::new(
            "No database technologies detected",
            "Medium - Databases are essential for most roles",
            "Add database technologies: MongoDB, PostgreSQL, MySQL, Redis, Firebase",
            Priority::Medium,
        ));
    }

    out
}

fn formatting_tips(text: &str) -> Vec<Suggestion> {
    let mut out = Vec::new();
    let len = text.chars().count();

    if len < MIN_TEXT_LEN {
        out.push(Suggestion::new(
            "Resume content is too brief",
            "Medium - Not enough information for ATS and recruiters",
            "Aim for 800-1200 characters. Expand descriptions with specific details and outcomes",
            Priority::Medium,
        ));
    } else if len > MAX_TEXT_LEN {
        out.push(Suggestion::new(
            "Resume content may be too lengthy",
            "Low - Risk of important details being overlooked",
            "Consider condensing to 1-2 pages. Focus on most relevant experiences",
            Priority::Low,
        ));
    }

    let bullets = text.chars().filter(|c| matches!(c, '•' | '-' | '*')).count();
    if bullets < MIN_BULLETS {
        out.push(Suggestion::new(
            "Too few bullet points detected",
            "Low - May appear unstructured",
            "Use bullet points to organize achievements (3-5 per job/project)",
            Priority::Low,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::analysis::ats::calculate_ats_score;
    use crate::keywords::dictionary::KeywordDictionary;
    use crate::keywords::extractor::extract_technologies;

    fn suggest(
        text: &str,
        experiences: &[ExperienceEntry],
        projects: &[ProjectEntry],
    ) -> DetailedSuggestions {
        let dictionary = KeywordDictionary::builtin();
        let detected = extract_technologies(text, &dictionary);
        let ats = calculate_ats_score(text, &detected, &dictionary);
        generate_detailed_suggestions(text, &detected, experiences, projects, &ats)
    }

    fn issues(list: &[Suggestion]) -> Vec<&str> {
        list.iter().map(|s| s.issue.as_str()).collect()
    }

    fn project(name: &str, description: &str, techs: &[&str], links: &[&str]) -> ProjectEntry {
        ProjectEntry {
            name: name.to_string(),
            duration: "2023".to_string(),
            description: description.to_string(),
            technologies: techs.iter().map(|t| t.to_string()).collect(),
            links: links.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_document_gets_all_critical_issues() {
        let s = suggest("", &[], &[]);
        assert_eq!(
            issues(&s.critical),
            vec![
                "Missing email address",
                "Missing professional links",
                "No work experience section detected",
                "No projects section detected",
            ]
        );
        assert!(s.critical.iter().all(|c| c.priority == Priority::High));
    }

    #[test]
    fn test_missing_email_is_critical() {
        let s = suggest("github.com/jane work experience, one project", &[], &[]);
        assert_eq!(issues(&s.critical), vec!["Missing email address"]);
    }

    #[test]
    fn test_low_keyword_count_names_missing_categories() {
        let s = suggest("python", &[], &[]);
        let low = &s.important[0];
        assert_eq!(low.issue, "Only 1 technical keywords detected (target: 15+)");
        assert!(low.fix.starts_with("Add more relevant skills in these areas: technologies, tools, coursework."));
        assert_eq!(low.priority, Priority::Medium);
    }

    #[test]
    fn test_weak_phrases_need_more_than_two() {
        let two = suggest("Responsible for X. Worked on Y. Increased Z by 10%.", &[], &[]);
        assert!(!issues(&two.important).contains(&"Weak action verbs detected"));
        let three = suggest("Responsible for X. Worked on Y. Helped with Z. 10% faster.", &[], &[]);
        assert!(issues(&three.important).contains(&"Weak action verbs detected"));
        assert!(!issues(&three.important).contains(&"No quantifiable achievements found"));
    }

    #[test]
    fn test_project_content_rules() {
        let p = project("TaskTracker", "Short", &["react"], &[]);
        let s = suggest("", &[], &[p]);
        assert_eq!(
            issues(&s.content_quality),
            vec![
                "Project \"TaskTracker\" has insufficient description",
                "Project \"TaskTracker\" lists only 1 technologies",
                "Project \"TaskTracker\" has no GitHub link or live demo",
            ]
        );
        let priorities: Vec<_> = s.content_quality.iter().map(|c| c.priority).collect();
        assert_eq!(priorities, vec![Priority::Low, Priority::Low, Priority::Medium]);
        // A parsed project suppresses the missing-section warning.
        assert!(!issues(&s.critical).contains(&"No projects section detected"));
    }

    #[test]
    fn test_experience_content_rules() {
        let e = ExperienceEntry {
            position: "Engineer".to_string(),
            company: "Acme".to_string(),
            duration: "2020 - 2021".to_string(),
            description: "Responsible for maintenance".to_string(),
            technologies: BTreeSet::new(),
        };
        let s = suggest("", &[e], &[]);
        assert_eq!(
            issues(&s.content_quality),
            vec![
                "Experience at \"Acme\" has brief description",
                "Experience at \"Acme\" lacks strong action verbs",
            ]
        );
    }

    #[test]
    fn test_framework_and_cloud_gaps() {
        let s = suggest("python javascript", &[], &[]);
        assert_eq!(
            issues(&s.keyword_optimization),
            vec![
                "Python detected but no frameworks mentioned",
                "JavaScript detected but no frameworks mentioned",
                "No cloud platforms detected",
                "No database technologies detected",
            ]
        );

        let s = suggest("python django javascript react aws database", &[], &[]);
        assert!(s.keyword_optimization.is_empty());
    }

    #[test]
    fn test_length_and_bullet_tips() {
        let short = suggest("- a\n- b", &[], &[]);
        assert_eq!(
            issues(&short.formatting_tips),
            vec!["Resume content is too brief", "Too few bullet points detected"]
        );

        let long = "• a line of achievements\n".repeat(120);
        let s = suggest(&long, &[], &[]);
        assert_eq!(issues(&s.formatting_tips), vec!["Resume content may be too lengthy"]);
    }

    #[test]
    fn test_summary_tallies_tiers() {
        let s = suggest("python", &[], &[project("Demo App", "tiny", &[], &[])]);
        let sum = &s.summary;
        assert_eq!(sum.critical_count, s.critical.len());
        assert_eq!(sum.important_count, s.important.len());
        assert_eq!(
            sum.optional_count,
            s.content_quality.len() + s.keyword_optimization.len() + s.formatting_tips.len()
        );
        assert_eq!(sum.total_issues, sum.critical_count + sum.important_count + sum.optional_count);
    }

    #[test]
    fn test_priority_serializes_as_integer() {
        let json = serde_json::to_value(suggest("", &[], &[])).unwrap();
        assert_eq!(json["critical"][0]["priority"], 1);
        assert!(json.get("contentQuality").is_some());
        assert!(json["summary"].get("totalIssues").is_some());
        assert!(serde_json::from_str::<Priority>("4").is_err());
        assert_eq!(serde_json::from_str::<Priority>("3").unwrap(), Priority::Low);
    }
}
