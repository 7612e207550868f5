pub mod cli;
pub mod config;
pub mod converter;
pub mod engine;
pub mod error;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::Cli;
pub use config::{CliOverrides, Config, EngineConfig, ExportConfig, PauseOnExit, SourceConfig};
pub use error::{Result, UserFriendlyError, Word2PdfError};

// Core functionality re-exports
pub use converter::{
    ConversionOutcome, ExportPathResolver, FailedFile, PdfConverter, RunContext, RunSummary,
};
pub use engine::{LibreOfficeEngine, OfficeEngine, OfficeSession, OpenDocument, SessionGuard};
pub use scanner::{select_documents, DocumentFile, DocumentScanner, FileFilter};
pub use ui::{
    ConsoleChooser, DirectoryChooser, GracefulShutdown, OutputFormatter, OutputMode,
    PresetChooser,
};

use chrono::Local;
use std::path::PathBuf;

const PRODUCT_NAME: &str = "Word to PDF";
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    NothingToProcess,
    Cancelled(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: RunStatus,
    pub summary: RunSummary,
    pub source_directory: Option<PathBuf>,
    pub export_directory: Option<PathBuf>,
    pub engine_launched: bool,
}

/// Main library interface: one batch conversion per call to [`WordToPdf::run`].
pub struct WordToPdf {
    config: Config,
    output_formatter: OutputFormatter,
    shutdown: GracefulShutdown,
    engine: Box<dyn OfficeEngine>,
    source_chooser: Box<dyn DirectoryChooser>,
    export_chooser: Box<dyn DirectoryChooser>,
}

impl WordToPdf {
    /// Create a new instance with the LibreOffice engine and Ctrl+C handling.
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let shutdown = GracefulShutdown::new()?;
        Ok(Self::assemble(config, output_mode, verbose, quiet, shutdown))
    }

    /// Same as [`WordToPdf::new`] but without installing a signal handler,
    /// which can only be done once per process.
    pub fn without_signal_handler(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        Self::assemble(config, output_mode, verbose, quiet, GracefulShutdown::new_for_test())
    }

    fn assemble(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let engine: Box<dyn OfficeEngine> =
            Box::new(LibreOfficeEngine::new(config.engine.program.clone()));
        let source_chooser = chooser_for(config.source.directory.clone());
        let export_chooser = chooser_for(config.export.directory.clone());

        Self {
            config,
            output_formatter,
            shutdown,
            engine,
            source_chooser,
            export_chooser,
        }
    }

    /// Create an instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = if cli_args.plain {
            OutputMode::Plain
        } else {
            OutputMode::Human
        };

        Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)
    }

    pub fn with_engine(mut self, engine: Box<dyn OfficeEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_source_chooser(mut self, chooser: Box<dyn DirectoryChooser>) -> Self {
        self.source_chooser = chooser;
        self
    }

    pub fn with_export_chooser(mut self, chooser: Box<dyn DirectoryChooser>) -> Self {
        self.export_chooser = chooser;
        self
    }

    /// Runs the whole batch. Never fails: errors are reported on the console
    /// and in the returned report, and the engine is always shut down.
    pub fn run(&self) -> RunReport {
        self.print_start_banner();

        let mut ctx = RunContext::new(self.config.source.base_directory.clone());
        let mut session: Option<SessionGuard> = None;
        let mut source_directory = None;

        let status = match self.execute(&mut ctx, &mut session, &mut source_directory) {
            Ok(status) => status,
            Err(e) => {
                self.output_formatter.print_run_error(&e);
                if e.is_cancellation() {
                    RunStatus::Cancelled(e.to_string())
                } else {
                    RunStatus::Failed(e.to_string())
                }
            }
        };

        let engine_launched = session.is_some();
        if let Some(mut guard) = session.take() {
            if let Err(e) = guard.release() {
                self.output_formatter
                    .warning(&format!("Could not shut down {}: {}", self.engine.name(), e));
            }
        }

        self.print_end_banner();
        self.acknowledge_exit();

        RunReport {
            status,
            summary: ctx.summary(),
            source_directory,
            export_directory: ctx.export_directory().map(|p| p.to_path_buf()),
            engine_launched,
        }
    }

    fn execute(
        &self,
        ctx: &mut RunContext,
        session: &mut Option<SessionGuard>,
        source_directory: &mut Option<PathBuf>,
    ) -> Result<RunStatus> {
        self.shutdown.check_shutdown()?;

        let scanner = DocumentScanner::new(&self.config.source.pattern)?;
        let (directory, documents) = select_documents(
            self.source_chooser.as_ref(),
            &scanner,
            self.config.source.allow_fallback,
            Some(ctx.base_directory()),
            &self.output_formatter,
        )?;
        *source_directory = Some(directory.clone());

        if documents.is_empty() {
            self.output_formatter.info(&format!(
                "The directory \"{}\" contains no files to process.",
                directory.display()
            ));
            self.output_formatter.print_run_summary(&ctx.summary());
            return Ok(RunStatus::NothingToProcess);
        }

        ctx.set_total_files(documents.len());
        self.output_formatter
            .start_operation(&format!("Starting {}", self.engine.name()));
        let guard = session.insert(SessionGuard::new(self.engine.launch()?));

        self.output_formatter
            .info(&format!("Files to process: {}", documents.len()));
        self.output_formatter.print_separator();

        let converter = PdfConverter::new(ExportPathResolver::from_config(&self.config));

        for document in &documents {
            self.shutdown.check_shutdown()?;
            ctx.record_seen();

            self.output_formatter
                .start_operation(&format!("Processing file: {}", document.name));

            if !document.exists() {
                self.output_formatter.warning(&format!(
                    "The file {} does not exist or is not available for processing.",
                    document.name
                ));
                ctx.record_failure(&document.name, "file not found");
                continue;
            }

            let outcome = converter.convert(
                guard.session()?,
                ctx,
                self.export_chooser.as_ref(),
                document,
                &self.output_formatter,
            )?;

            if outcome.exported {
                self.output_formatter.success(&format!(
                    "The file {} was exported successfully.",
                    document.name
                ));
                ctx.record_export();
            } else {
                ctx.record_failure(
                    &document.name,
                    outcome.error.unwrap_or_else(|| "conversion failed".to_string()),
                );
            }
        }

        self.output_formatter.print_separator();
        self.output_formatter.print_run_summary(&ctx.summary());

        Ok(RunStatus::Completed)
    }

    fn print_start_banner(&self) {
        self.output_formatter.print_banner(&[
            PRODUCT_NAME.to_string(),
            format!("Version: {}", version_info()),
            format!("Start: {}", Local::now().format(TIMESTAMP_FORMAT)),
        ]);
    }

    fn print_end_banner(&self) {
        self.output_formatter
            .print_banner(&[format!("End: {}", Local::now().format(TIMESTAMP_FORMAT))]);
    }

    /// Waits for Enter unless disabled by configuration.
    pub fn acknowledge_exit(&self) {
        if self.config.pause_on_exit.0 {
            self.output_formatter
                .wait_for_enter("> Process complete, press Enter to exit...");
        }
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }
}

fn chooser_for(preset: Option<PathBuf>) -> Box<dyn DirectoryChooser> {
    match preset {
        Some(directory) => Box::new(PresetChooser::selecting(directory)),
        None => Box::new(ConsoleChooser::new()),
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
