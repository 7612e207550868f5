use crate::error::{Result, Word2PdfError};
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Matches file names against a shell-style glob (`*` and `?`), ignoring case.
pub struct FileFilter {
    pattern: String,
    matcher: Regex,
}

impl FileFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let matcher = RegexBuilder::new(&glob_to_regex(pattern))
            .case_insensitive(true)
            .build()
            .map_err(|source| Word2PdfError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_source_document(&self, path: &Path) -> bool {
        let Some(filename) = path.file_name() else {
            return false;
        };
        let filename = filename.to_string_lossy();

        // Office lock files (~$report.docx) are not documents.
        if filename.starts_with("~$") {
            return false;
        }

        self.matcher.is_match(&filename)
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');

    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }

    regex.push('$');
    regex
}
