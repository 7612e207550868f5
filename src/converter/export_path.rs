use crate::config::Config;
use crate::converter::RunContext;
use crate::error::{Result, Word2PdfError};
use crate::ui::{DirectoryChooser, OutputFormatter};
use std::path::PathBuf;

pub const SELECT_EXPORT_OPERATION: &str = "GetExportPath";

/// Decides where PDFs go. The user is asked at most once per run.
///
/// With `allow_default` off (the default) a dismissed prompt cancels the run:
/// the user picks a folder or aborts.
#[derive(Debug, Clone)]
pub struct ExportPathResolver {
    allow_default: bool,
    default_directory: PathBuf,
}

impl ExportPathResolver {
    pub fn new(allow_default: bool, default_directory: PathBuf) -> Self {
        Self {
            allow_default,
            default_directory,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.export.allow_default, config.default_export_directory())
    }

    pub fn resolve(
        &self,
        ctx: &mut RunContext,
        chooser: &dyn DirectoryChooser,
        output: &OutputFormatter,
    ) -> Result<PathBuf> {
        if let Some(existing) = ctx.export_directory() {
            return Ok(existing.to_path_buf());
        }

        let directory = match chooser.choose("Select the folder where the PDF files will be saved")? {
            Some(selected) => selected,
            None if self.allow_default => {
                output.info(&format!(
                    "No export folder selected, using {}",
                    self.default_directory.display()
                ));
                self.default_directory.clone()
            }
            None => {
                return Err(Word2PdfError::cancelled(
                    SELECT_EXPORT_OPERATION,
                    "No export folder was selected. The process was cancelled.",
                ))
            }
        };

        output.debug(&format!("Exporting to {}", directory.display()));
        Ok(ctx.set_export_directory(directory).to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{OutputMode, PresetChooser};
    use std::cell::Cell;
    use std::path::Path;

    struct CountingChooser {
        answer: Option<PathBuf>,
        calls: Cell<usize>,
    }

    impl DirectoryChooser for CountingChooser {
        fn choose(&self, _title: &str) -> Result<Option<PathBuf>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.answer.clone())
        }
    }

    fn quiet_output() -> OutputFormatter {
        OutputFormatter::new(OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_prompts_only_once() {
        let resolver = ExportPathResolver::new(false, PathBuf::from("/work/exports"));
        let chooser = CountingChooser {
            answer: Some(PathBuf::from("/out")),
            calls: Cell::new(0),
        };
        let mut ctx = RunContext::new("/work");

        let first = resolver.resolve(&mut ctx, &chooser, &quiet_output()).unwrap();
        let second = resolver.resolve(&mut ctx, &chooser, &quiet_output()).unwrap();

        assert_eq!(first, PathBuf::from("/out"));
        assert_eq!(second, PathBuf::from("/out"));
        assert_eq!(chooser.calls.get(), 1);
    }

    #[test]
    fn test_dismissed_uses_default_when_allowed() {
        let resolver = ExportPathResolver::new(true, PathBuf::from("/work/exports"));
        let mut ctx = RunContext::new("/work");

        let resolved = resolver
            .resolve(&mut ctx, &PresetChooser::dismissing(), &quiet_output())
            .unwrap();

        assert_eq!(resolved, PathBuf::from("/work/exports"));
        assert_eq!(ctx.export_directory(), Some(Path::new("/work/exports")));
    }

    #[test]
    fn test_dismissed_cancels_when_default_not_allowed() {
        let resolver = ExportPathResolver::new(false, PathBuf::from("/work/exports"));
        let mut ctx = RunContext::new("/work");

        let err = resolver
            .resolve(&mut ctx, &PresetChooser::dismissing(), &quiet_output())
            .unwrap_err();

        assert!(err.is_cancellation());
        assert!(err.to_string().starts_with("[GetExportPath] - "));
        assert!(ctx.export_directory().is_none());
    }

    #[test]
    fn test_from_config_uses_base_directory() {
        let mut config = Config::default();
        config.source.base_directory = PathBuf::from("/work");
        config.export.allow_default = true;

        let resolver = ExportPathResolver::from_config(&config);
        let mut ctx = RunContext::new("/work");
        let resolved = resolver
            .resolve(&mut ctx, &PresetChooser::dismissing(), &quiet_output())
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/work/exports"));
    }
}
