// Shared regexes used by both résumé parsers.

use std::sync::LazyLock;

use regex::Regex;

const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";

/// "Jan 2020 - Present", "03/2019 to 06/2021", "2018 – 2020".
/// Start: month-year, MM/YYYY or a bare year. End: the same or an open-ended
/// Present / Current / Now.
pub static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let point = format!(r"(?:{MONTH}\s*\d{{4}}|\d{{1,2}}/\d{{4}}|\d{{4}})");
    Regex::new(&format!(
        r"(?i)({point})\s*(?:-|–|to|until)\s*({point}|Present|Current|Now)"
    ))
    .expect("date range regex is valid")
});

/// A 19xx/20xx year anywhere in a line.
pub static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year regex is valid"));

/// A line that holds nothing but a year.
pub static BARE_YEAR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:19|20)\d{2}\s*$").expect("bare year regex is valid"));

pub static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://[^\s]+").expect("url regex is valid"));

/// First date range in `text`, as written.
pub fn first_date_range(text: &str) -> Option<&str> {
    DATE_RANGE.find(text).map(|m| m.as_str())
}
