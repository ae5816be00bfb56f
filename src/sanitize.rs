//! Filename sanitization for saved summaries.

/// Characters rejected by common filesystems
const RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const SUMMARY_SUFFIX: &str = "_summary.txt";

/// Replace reserved characters with `_` and trim surrounding whitespace
pub fn sanitize(name: &str) -> String {
    name.replace(|c: char| RESERVED.contains(&c), "_").trim().to_string()
}

/// File name a title's summary is saved under
pub fn summary_filename(title: &str) -> String {
    format!("{}{}", sanitize(title), SUMMARY_SUFFIX)
}
