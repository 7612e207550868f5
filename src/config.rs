use crate::error::{Result, Word2PdfError};
use std::path::PathBuf;

/// Glob matching both legacy `.doc` and modern `.docx`/`.docm` files.
pub const DEFAULT_PATTERN: &str = "*.doc*";
pub const DEFAULT_EXPORT_SUBDIR: &str = "exports";
pub const DEFAULT_SOFFICE: &str = "soffice";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: SourceConfig,
    pub export: ExportConfig,
    pub engine: EngineConfig,
    pub pause_on_exit: PauseOnExit,
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub pattern: String,
    /// Directory answered in place of the source prompt.
    pub directory: Option<PathBuf>,
    /// Fall back to the base directory when the source prompt is dismissed.
    pub allow_fallback: bool,
    pub base_directory: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory answered in place of the export prompt.
    pub directory: Option<PathBuf>,
    /// Use `<base>/exports` when the export prompt is dismissed.
    pub allow_default: bool,
    pub default_subdir: String,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub program: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseOnExit(pub bool);

impl Default for PauseOnExit {
    fn default() -> Self {
        PauseOnExit(true)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            directory: None,
            allow_fallback: true,
            base_directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            allow_default: false,
            default_subdir: DEFAULT_EXPORT_SUBDIR.to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_SOFFICE.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref pattern) = cli_args.pattern {
            self.source.pattern = pattern.trim().to_string();
        }

        if let Some(ref source_dir) = cli_args.source_dir {
            self.source.directory = Some(source_dir.clone());
        }

        if cli_args.no_source_fallback {
            self.source.allow_fallback = false;
        }

        if let Some(ref export_dir) = cli_args.export_dir {
            self.export.directory = Some(export_dir.clone());
        }

        if cli_args.default_export {
            self.export.allow_default = true;
        }

        if let Some(ref program) = cli_args.soffice {
            self.engine.program = program.clone();
        }

        if cli_args.no_pause {
            self.pause_on_exit = PauseOnExit(false);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.pattern.is_empty() {
            return Err(Word2PdfError::Config {
                message: "A source file pattern must be specified".to_string(),
            });
        }

        if self.source.pattern.contains('/') || self.source.pattern.contains('\\') {
            return Err(Word2PdfError::Config {
                message: format!(
                    "File pattern must not contain a path separator: {}",
                    self.source.pattern
                ),
            });
        }

        if self.engine.program.trim().is_empty() {
            return Err(Word2PdfError::Config {
                message: "Office engine program must not be empty".to_string(),
            });
        }

        if self.export.default_subdir.trim().is_empty() {
            return Err(Word2PdfError::Config {
                message: "Default export directory name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Export directory used when the prompt is dismissed and defaults are allowed.
    pub fn default_export_directory(&self) -> PathBuf {
        self.source.base_directory.join(&self.export.default_subdir)
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub pattern: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub no_source_fallback: bool,
    pub export_dir: Option<PathBuf>,
    pub default_export: bool,
    pub soffice: Option<String>,
    pub no_pause: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_source_dir(mut self, source_dir: Option<PathBuf>) -> Self {
        self.source_dir = source_dir;
        self
    }

    pub fn with_no_source_fallback(mut self, disabled: bool) -> Self {
        self.no_source_fallback = disabled;
        self
    }

    pub fn with_export_dir(mut self, export_dir: Option<PathBuf>) -> Self {
        self.export_dir = export_dir;
        self
    }

    pub fn with_default_export(mut self, enabled: bool) -> Self {
        self.default_export = enabled;
        self
    }

    pub fn with_soffice(mut self, program: Option<String>) -> Self {
        self.soffice = program;
        self
    }

    pub fn with_no_pause(mut self, no_pause: bool) -> Self {
        self.no_pause = no_pause;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.pattern, "*.doc*");
        assert!(config.source.allow_fallback);
        assert!(!config.export.allow_default);
        assert_eq!(config.engine.program, "soffice");
        assert_eq!(config.pause_on_exit, PauseOnExit(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.source.pattern.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.source.pattern = "docs/*.docx".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.engine.program = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_pattern(Some(" *.docx ".to_string()))
            .with_export_dir(Some(PathBuf::from("/out")))
            .with_no_source_fallback(true)
            .with_default_export(true)
            .with_soffice(Some("/opt/libreoffice/program/soffice".to_string()))
            .with_no_pause(true);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.source.pattern, "*.docx");
        assert_eq!(config.export.directory, Some(PathBuf::from("/out")));
        assert!(!config.source.allow_fallback);
        assert!(config.export.allow_default);
        assert_eq!(config.engine.program, "/opt/libreoffice/program/soffice");
        assert_eq!(config.pause_on_exit, PauseOnExit(false));
    }

    #[test]
    fn test_default_export_directory() {
        let mut config = Config::default();
        config.source.base_directory = PathBuf::from("/work");
        assert_eq!(config.default_export_directory(), PathBuf::from("/work/exports"));
    }
}
