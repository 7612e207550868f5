use crate::error::Result;
use console::{style, Term};
use std::path::PathBuf;

/// Presents a folder choice to the user.
///
/// `Ok(None)` means the user dismissed the choice without selecting anything;
/// callers decide whether that is a cancellation or a reason to fall back.
pub trait DirectoryChooser {
    fn choose(&self, title: &str) -> Result<Option<PathBuf>>;
}

/// Asks for a folder on the terminal. An empty answer dismisses the prompt.
pub struct ConsoleChooser {
    term: Term,
    use_colors: bool,
}

impl ConsoleChooser {
    pub fn new() -> Self {
        let term = Term::stdout();
        let use_colors = term.features().colors_supported();
        Self { term, use_colors }
    }
}

impl Default for ConsoleChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryChooser for ConsoleChooser {
    fn choose(&self, title: &str) -> Result<Option<PathBuf>> {
        let prompt = format!("{} (leave empty to cancel): ", title);
        if self.use_colors {
            self.term.write_str(&style(prompt).bold().to_string())?;
        } else {
            self.term.write_str(&prompt)?;
        }
        self.term.flush()?;

        // Non-interactive terminals read back an empty line.
        let answer = self.term.read_line()?;
        Ok(parse_answer(&answer))
    }
}

/// Answers every prompt with the same fixed value.
#[derive(Debug, Clone)]
pub struct PresetChooser {
    answer: Option<PathBuf>,
}

impl PresetChooser {
    pub fn new(answer: Option<PathBuf>) -> Self {
        Self { answer }
    }

    pub fn selecting<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(Some(path.into()))
    }

    pub fn dismissing() -> Self {
        Self::new(None)
    }
}

impl DirectoryChooser for PresetChooser {
    fn choose(&self, _title: &str) -> Result<Option<PathBuf>> {
        Ok(self.answer.clone())
    }
}

fn parse_answer(answer: &str) -> Option<PathBuf> {
    // Paths dragged into a terminal arrive quoted.
    let trimmed = answer.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
