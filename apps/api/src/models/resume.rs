use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Placeholder for a field the parser could not determine.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Placeholder for an entry with no description lines.
pub const NO_DESCRIPTION: &str = "No description provided";

/// One job or role parsed from the experience section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    /// Free-form date range as written ("Jan 2022 - Present") or
    /// [`NOT_SPECIFIED`].
    pub duration: String,
    pub description: String,
    pub technologies: BTreeSet<String>,
}

/// One project parsed from the projects section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub duration: String,
    pub description: String,
    pub technologies: BTreeSet<String>,
    pub links: Vec<String>,
}
