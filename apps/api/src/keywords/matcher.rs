//! Keyword Matcher: word-boundary-safe detection of a keyword (or one of its
//! aliases) inside lowercased résumé text.
//!
//! Three keywords get special treatment:
//! - `c++` ends in regex metacharacters, so `\b` cannot follow it. It is matched
//!   as a literal token delimited by non-word characters instead.
//! - `r` and `go` collide with the pronoun and the verb. They only count when
//!   followed by a context word ("r programming", "go backend"). False
//!   negatives are accepted here in exchange for precision.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static SPACED_CPP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)c\s*\+\s*\+").expect("spaced c++ regex is valid"));

static SUPERSCRIPT_CPP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)c\s*⁺\s*⁺").expect("superscript c++ regex is valid"));

static CPP_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\w])c\+\+(?:$|[^\w+])").expect("c++ token regex is valid")
});

static R_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\br\b\s*(?:language|programming|developer|project|script|code)")
        .expect("r context regex is valid")
});

static GO_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bgo\b\s*(?:language|programming|developer|backend|code|project)")
        .expect("go context regex is valid")
});

/// Rewrites spaced and superscript spellings of C++ ("c + +", "c⁺⁺") to the
/// literal `c++` so a single rule can match them.
pub fn normalize_for_matching(text: &str) -> Cow<'_, str> {
    let spaced = SPACED_CPP.replace_all(text, "c++");
    if !SUPERSCRIPT_CPP.is_match(&spaced) {
        return spaced;
    }
    Cow::Owned(SUPERSCRIPT_CPP.replace_all(&spaced, "c++").into_owned())
}

/// A compiled surface form (canonical keyword or alias).
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    keyword: String,
    regex: Regex,
}

impl KeywordPattern {
    pub fn new(keyword: &str) -> Self {
        let keyword = keyword.trim().to_lowercase();
        let regex = match keyword.as_str() {
            "c++" => CPP_TOKEN.clone(),
            "r" => R_LANGUAGE.clone(),
            "go" => GO_LANGUAGE.clone(),
            other => whole_word_regex(other),
        };
        Self { keyword, regex }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// `text` must already be lowercased and passed through
    /// [`normalize_for_matching`].
    pub fn is_match(&self, text: &str) -> bool {
        !self.keyword.is_empty() && self.regex.is_match(text)
    }
}

/// Case-insensitive whole-word pattern. Boundaries are only asserted on the
/// sides where the keyword starts or ends with a word character, so keywords
/// like `.net` or `c#` still match next to punctuation.
fn whole_word_regex(keyword: &str) -> Regex {
    let leading = if keyword.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trailing = if keyword.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let pattern = format!("(?i){leading}{}{trailing}", regex::escape(keyword));
    Regex::new(&pattern).expect("escaped keyword always forms a valid regex")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A canonical keyword together with its alternate spellings.
#[derive(Debug, Clone)]
pub struct KeywordEntry {
    canonical: KeywordPattern,
    aliases: Vec<KeywordPattern>,
}

impl KeywordEntry {
    pub fn new(canonical: &str, aliases: &[&str]) -> Self {
        Self {
            canonical: KeywordPattern::new(canonical),
            aliases: aliases.iter().map(|a| KeywordPattern::new(a)).collect(),
        }
    }

    pub fn canonical(&self) -> &str {
        self.canonical.keyword()
    }

    /// Tests the canonical form first, then each alias; stops at the first hit.
    pub fn is_match(&self, normalized: &str) -> bool {
        self.canonical.is_match(normalized) || self.aliases.iter().any(|a| a.is_match(normalized))
    }

    /// Matches a single lowercased item from an author-written tech list.
    /// Any surface form contained in the item counts ("expressjs" yields
    /// `express`). The context-gated `c`, `r` and `go` must equal the whole
    /// item, so "react" never yields "r" or "c".
    pub fn matches_list_item(&self, item: &str) -> bool {
        std::iter::once(&self.canonical)
            .chain(self.aliases.iter())
            .any(|p| match p.keyword() {
                "" => false,
                form @ ("c" | "r" | "go") => item == form,
                form => item.contains(form),
            })
    }
}

/// Returns true if `keyword` occurs in `text` under the matching rules above.
/// `text` is expected to be lowercased by the caller. Compiles the pattern on
/// every call, so request paths hold [`KeywordEntry`] values instead.
#[cfg(test)]
pub fn keyword_exists(keyword: &str, text: &str) -> bool {
    KeywordPattern::new(keyword).is_match(&normalize_for_matching(text))
}

/// Finds every keyword in `entries` present in `text`, reporting the canonical
/// spelling only. The result is deduplicated and sorted.
pub fn find_tech_keywords(text: &str, entries: &[KeywordEntry]) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    let normalized = normalize_for_matching(&lower);
    entries
        .iter()
        .filter(|entry| entry.is_match(&normalized))
        .map(|entry| entry.canonical().to_string())
        .collect()
}
