use crate::converter::RunSummary;
use crate::error::{UserFriendlyError, Word2PdfError};
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

const SEPARATOR_WIDTH: usize = 57;

pub struct OutputFormatter {
    term: Term,
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let term = Term::stdout();
        let use_colors = match mode {
            OutputMode::Human => term.features().colors_supported() && !quiet,
            OutputMode::Plain => false,
        };

        Self {
            term,
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            if self.use_colors {
                println!("  {}", style(message).dim());
            } else {
                println!("DEBUG: {}", message);
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &Word2PdfError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human if self.use_colors => {
                    println!(
                        "{}{}",
                        INFO,
                        style(&format!("Suggestion: {}", suggestion)).cyan()
                    );
                }
                OutputMode::Human => println!("Suggestion: {}", suggestion),
                OutputMode::Plain => println!("SUGGESTION: {}", suggestion),
            }
        }
    }

    /// Reports an error that ended the run.
    ///
    /// Cancellation is shown as its own short message, even in quiet mode;
    /// anything else is framed as an unexpected failure together with its cause.
    pub fn print_run_error(&self, error: &Word2PdfError) {
        if error.is_cancellation() {
            self.print_cancellation(&error.to_string());
            return;
        }

        let message = error.user_message();
        let detail = match error.cause_message() {
            Some(cause) if !message.contains(&cause) => format!("{}. {}", message, cause),
            _ => message,
        };
        self.error(&format!("An error occurred in the process. Error: {}", detail));

        if let Some(suggestion) = error.suggestion() {
            self.info(&format!("Suggestion: {}", suggestion));
        }
    }

    // Banners and reporting
    pub fn print_banner(&self, lines: &[String]) {
        if self.quiet {
            return;
        }

        self.print_separator();
        for line in lines {
            if self.use_colors {
                println!("> {}", style(line).bold());
            } else {
                println!("> {}", line);
            }
        }
        self.print_separator();
    }

    /// The summary is printed even in quiet mode.
    pub fn print_run_summary(&self, summary: &RunSummary) {
        let line = summary.to_string();

        if self.use_colors {
            let styled = if summary.all_exported() {
                style(line).green().bold()
            } else {
                style(line).yellow().bold()
            };
            println!("{}", styled);
        } else {
            println!("{}", line);
        }

        if !summary.failures.is_empty() && self.should_show_message(1) {
            println!("Files not exported:");
            for failure in &summary.failures {
                println!("  - {}: {}", failure.name, failure.reason);
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            println!("{}", style("─".repeat(SEPARATOR_WIDTH)).dim());
        } else {
            println!("{}", "-".repeat(SEPARATOR_WIDTH));
        }
    }

    /// Blocks until the user presses Enter.
    pub fn wait_for_enter(&self, message: &str) {
        let _ = self.term.write_str(message);
        let _ = self.term.flush();
        // Returns immediately when stdin is not a terminal.
        let _ = self.term.read_line();
    }

    // Private helper methods
    fn print_cancellation(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Warning, message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (CHECKMARK, style(message).green().bold()),
                MessageType::Error => (CROSS, style(message).red().bold()),
                MessageType::Warning => (WARNING, style(message).yellow().bold()),
                MessageType::Info => (INFO, style(message).cyan()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}
