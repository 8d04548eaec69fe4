//! Keyword Dictionary: the categorized technical vocabulary and alias table.
//!
//! Built once at startup and shared read-only (behind an `Arc` in `AppState`).
//! Canonical keywords are lowercase. A spelling that is an alias of another
//! canonical keyword is never listed as a keyword itself, so one mention
//! cannot be counted twice.

use serde::{Deserialize, Serialize};

use crate::keywords::matcher::KeywordEntry;

/// Fixed set of keyword categories. Every detection result carries all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ProgrammingLanguages,
    Technologies,
    Tools,
    Coursework,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ProgrammingLanguages,
        Category::Technologies,
        Category::Tools,
        Category::Coursework,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ProgrammingLanguages => "programming_languages",
            Category::Technologies => "technologies",
            Category::Tools => "tools",
            Category::Coursework => "coursework",
        }
    }

    /// Human-readable name used in suggestion text ("programming languages").
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    fn index(self) -> usize {
        self as usize
    }
}

const PROGRAMMING_LANGUAGES: &[&str] = &[
    "python", "java", "c++", "c", "javascript", "typescript", "html", "css", "sql", "go", "ruby",
    "php", "swift", "kotlin", "rust", "scala", "perl", "bash", "shell", "dart", "objective-c",
    "powershell", "matlab", "r",
];

const TECHNOLOGIES: &[&str] = &[
    // frontend
    "react", "angular", "vue", "next.js", "svelte", "nuxt.js", "astro", "jquery", "bootstrap",
    "tailwind", "tailwindcss", "material ui", "chakra ui", "ant design",
    // backend
    "node.js", "express", "spring", "spring boot", "flask", "django", "fastapi", "laravel",
    "rails", ".net", "nest.js", "adonisjs", "hapi", "fiber",
    // mobile
    "flutter", "react native", "ionic", "xamarin", "cordova",
    // ml
    "tensorflow", "keras", "pytorch", "scikit-learn", "huggingface", "openai gym", "spacy",
    "opencv", "yolo",
    // cloud & infra
    "aws", "azure", "gcp", "firebase", "supabase", "heroku", "vercel", "netlify",
    "digital ocean", "docker", "kubernetes", "terraform", "ansible",
    // apis & misc
    "api integration", "rest api", "graphql", "streamlit", "tkinter", "mysql", "nlp", "tf-idf",
    "naive bayes", "cosine similarity", "google colab",
];

const TOOLS: &[&str] = &[
    "git", "github", "gitlab", "bitbucket", "jenkins", "circleci", "travisci", "azure devops",
    "teamcity", "vscode", "visual studio", "intellij", "pycharm", "eclipse", "android studio",
    "xcode", "figma", "canva", "adobe xd", "sketch", "notion", "slack", "trello", "asana",
    "clickup", "jira", "monday.com", "miro", "postman", "swagger", "insomnia", "npm", "yarn",
    "pnpm", "webpack", "babel", "vite", "gulp", "gradle", "maven", "prometheus", "grafana",
    "datadog", "pm2", "vagrant",
];

const COURSEWORK: &[&str] = &[
    "data structures", "algorithms", "operating systems", "computer networks",
    "database management", "dbms", "machine learning", "deep learning",
    "artificial intelligence", "computer architecture", "software engineering",
    "object oriented programming", "oop", "web development", "mobile development",
    "data science", "cyber security", "cloud computing", "big data analytics",
    "computer vision", "nlp",
];

const ALIASES: &[(&str, &[&str])] = &[
    ("node.js", &["nodejs", "node js"]),
    ("next.js", &["nextjs", "next js"]),
    ("react", &["reactjs", "react js", "react.js"]),
    ("c++", &["cpp", "c plus plus", "c + +", "c⁺⁺"]),
    (".net", &["dotnet", "dot net", "asp.net"]),
    ("aws", &["amazon web services"]),
    ("html", &["html5"]),
    ("css", &["css3"]),
    ("vscode", &["vs code", "visual studio code"]),
    ("github", &["git hub"]),
    ("tensorflow", &["tf"]),
    ("pytorch", &["torch"]),
    ("npm", &["node package manager"]),
    ("machine learning", &["ml"]),
    ("artificial intelligence", &["ai"]),
    ("javascript", &["js"]),
    ("scikit-learn", &["sklearn", "scikit learn"]),
    ("mysql", &["my sql"]),
    ("nlp", &["natural language processing"]),
];

/// Résumé heading phrases that open an experience section.
pub const EXPERIENCE_HEADINGS: &[&str] = &[
    "work experience",
    "professional experience",
    "employment history",
    "experience",
    "work history",
    "career history",
    "relevant experience",
    "professional background",
    "employment",
];

/// Résumé heading phrases that open a projects section.
pub const PROJECT_HEADINGS: &[&str] = &[
    "projects",
    "personal projects",
    "academic projects",
    "key projects",
    "project work",
    "portfolio",
    "project experience",
    "notable projects",
    "technical projects",
];

/// Headings that close a section without opening one we parse.
pub const OTHER_HEADINGS: &[&str] = &[
    "education",
    "skills",
    "certifications",
    "awards",
    "achievements",
];

/// The categorized keyword universe with aliases pre-compiled into matchers.
#[derive(Debug, Clone)]
pub struct KeywordDictionary {
    categories: [Vec<KeywordEntry>; 4],
}

impl KeywordDictionary {
    /// The built-in vocabulary.
    pub fn builtin() -> Self {
        Self::from_tables(
            [
                PROGRAMMING_LANGUAGES,
                TECHNOLOGIES,
                TOOLS,
                COURSEWORK,
            ],
            ALIASES,
        )
    }

    /// Builds a dictionary from keyword lists ordered as [`Category::ALL`].
    pub fn from_tables(tables: [&[&str]; 4], aliases: &[(&str, &[&str])]) -> Self {
        let categories = tables.map(|keywords| {
            keywords
                .iter()
                .map(|kw| {
                    let kw_aliases = aliases
                        .iter()
                        .find(|(canonical, _)| canonical.eq_ignore_ascii_case(kw))
                        .map(|(_, a)| *a)
                        .unwrap_or(&[]);
                    KeywordEntry::new(kw, kw_aliases)
                })
                .collect()
        });
        Self { categories }
    }

    pub fn keywords(&self, category: Category) -> &[KeywordEntry] {
        &self.categories[category.index()]
    }

    /// Every entry across all categories, in category order.
    pub fn all_entries(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.categories.iter().flatten()
    }

    /// Flat keyword count; reported as the ATS "total possible".
    pub fn total_keywords(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_has_all_categories() {
        let dict = KeywordDictionary::builtin();
        for category in Category::ALL {
            assert!(
                !dict.keywords(category).is_empty(),
                "{} should not be empty",
                category.as_str()
            );
        }
    }

    #[test]
    fn test_canonical_keywords_are_lowercase() {
        let dict = KeywordDictionary::builtin();
        for entry in dict.all_entries() {
            assert_eq!(entry.canonical(), entry.canonical().to_lowercase());
        }
    }

    #[test]
    fn test_no_keyword_is_an_alias_of_another() {
        let alias_forms: HashSet<&str> = ALIASES.iter().flat_map(|(_, a)| a.iter().copied()).collect();
        let dict = KeywordDictionary::builtin();
        for entry in dict.all_entries() {
            assert!(
                !alias_forms.contains(entry.canonical()),
                "'{}' is listed both as keyword and alias",
                entry.canonical()
            );
        }
    }

    #[test]
    fn test_every_alias_has_a_canonical_keyword() {
        let dict = KeywordDictionary::builtin();
        let canonicals: HashSet<&str> = dict.all_entries().map(|e| e.canonical()).collect();
        for (canonical, _) in ALIASES {
            assert!(canonicals.contains(canonical), "alias target '{canonical}' missing");
        }
    }

    #[test]
    fn test_total_keywords_matches_tables() {
        let dict = KeywordDictionary::builtin();
        let expected =
            PROGRAMMING_LANGUAGES.len() + TECHNOLOGIES.len() + TOOLS.len() + COURSEWORK.len();
        assert_eq!(dict.total_keywords(), expected);
    }

    #[test]
    fn test_category_serde_and_label() {
        let json = serde_json::to_string(&Category::ProgrammingLanguages).unwrap();
        assert_eq!(json, r#""programming_languages""#);
        assert_eq!(Category::ProgrammingLanguages.label(), "programming languages");
    }
}
