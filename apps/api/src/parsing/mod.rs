// Text extraction and section parsing.
// pdf + upload turn an uploaded file into normalized text; sections, experience
// and projects turn that text into structured entries.

pub mod experience;
pub mod patterns;
pub mod pdf;
pub mod projects;
pub mod sections;
pub mod upload;
