//! Technology Extractor: runs the keyword matcher over the dictionary.
//!
//! Two entry points:
//! - [`extract_technologies`] categorizes a whole document.
//! - [`extract_technologies_from_text`] returns a flat set for a single
//!   experience or project block, combining an explicit pipe-delimited tech
//!   list ("Name | React, Node.js") with prose detection.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::keywords::dictionary::{Category, KeywordDictionary};
use crate::keywords::matcher::{find_tech_keywords, normalize_for_matching};

static PIPE_TECH_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|\s*([^•\n]+)").expect("pipe tech list regex is valid"));

static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",|\band\b").expect("list separator regex is valid"));

/// Canonical keywords found in a document, grouped by category.
///
/// All four categories are always present (possibly empty); scoring divides by
/// the category count and depends on that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedTechnologies {
    pub programming_languages: BTreeSet<String>,
    pub technologies: BTreeSet<String>,
    pub tools: BTreeSet<String>,
    pub coursework: BTreeSet<String>,
}

impl DetectedTechnologies {
    pub fn get(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::ProgrammingLanguages => &self.programming_languages,
            Category::Technologies => &self.technologies,
            Category::Tools => &self.tools,
            Category::Coursework => &self.coursework,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::ProgrammingLanguages => &mut self.programming_languages,
            Category::Technologies => &mut self.technologies,
            Category::Tools => &mut self.tools,
            Category::Coursework => &mut self.coursework,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &BTreeSet<String>)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Total detected keywords across categories. A keyword listed under two
    /// categories (e.g. "nlp") counts once per category.
    pub fn total(&self) -> usize {
        self.iter().map(|(_, kws)| kws.len()).sum()
    }

    pub fn category_count(&self) -> usize {
        Category::ALL.len()
    }

    pub fn categories_with_matches(&self) -> usize {
        self.iter().filter(|(_, kws)| !kws.is_empty()).count()
    }

    pub fn empty_categories(&self) -> Vec<Category> {
        self.iter()
            .filter(|(_, kws)| kws.is_empty())
            .map(|(c, _)| c)
            .collect()
    }
}

/// Categorizes every dictionary keyword found anywhere in `text`.
pub fn extract_technologies(text: &str, dictionary: &KeywordDictionary) -> DetectedTechnologies {
    let lower = text.to_lowercase();
    let mut detected = DetectedTechnologies::default();
    for category in Category::ALL {
        *detected.get_mut(category) = find_tech_keywords(&lower, dictionary.keywords(category));
    }
    detected
}

/// Flat, category-agnostic detection for one experience or project block.
///
/// The union of:
/// 1. items of the first pipe-delimited list, split on commas and "and", each
///    matched against every keyword and alias;
/// 2. whole-block keyword/alias detection.
pub fn extract_technologies_from_text(
    block: &str,
    dictionary: &KeywordDictionary,
) -> BTreeSet<String> {
    let mut found = BTreeSet::new();

    for item in tech_list_items(block) {
        for entry in dictionary.all_entries() {
            if entry.matches_list_item(&item) {
                found.insert(entry.canonical().to_string());
            }
        }
    }

    let lower = block.to_lowercase();
    let normalized = normalize_for_matching(&lower);
    for entry in dictionary.all_entries() {
        if entry.is_match(&normalized) {
            found.insert(entry.canonical().to_string());
        }
    }

    found
}

/// Items of the first `| a, b and c` list in `block`, lowercased and trimmed.
fn tech_list_items(block: &str) -> Vec<String> {
    let Some(list) = PIPE_TECH_LIST.captures(block).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    let lower = list.as_str().to_lowercase();
    let normalized = normalize_for_matching(&lower);
    LIST_SEPARATOR
        .split(&normalized)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
