use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "word2pdf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Batch-convert Word documents to PDF")]
#[command(
    long_about = "Word2Pdf asks for a source folder, converts every matching Word document \
                  to PDF through a headless office engine and writes the results into an \
                  export folder. Run it without arguments for the interactive prompts."
)]
#[command(after_help = "EXAMPLES:\n  \
    word2pdf\n  \
    word2pdf --source ./letters --export-dir ./pdf\n  \
    word2pdf --pattern '*.docx' --default-export --no-pause")]
pub struct Cli {
    /// Source folder (skips the source prompt)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Export folder (skips the export prompt)
    #[arg(short, long)]
    pub export_dir: Option<PathBuf>,

    /// Source file pattern, matched case-insensitively
    #[arg(short, long, help = "File name pattern to convert (default: *.doc*)")]
    pub pattern: Option<String>,

    /// Abort instead of using the current directory when the source prompt is dismissed
    #[arg(long)]
    pub no_source_fallback: bool,

    /// Use ./exports when the export prompt is dismissed instead of aborting
    #[arg(long)]
    pub default_export: bool,

    /// Path to the LibreOffice `soffice` executable
    #[arg(long, env = "WORD2PDF_SOFFICE")]
    pub soffice: Option<String>,

    /// Exit without waiting for Enter
    #[arg(
        long,
        env = "WORD2PDF_NO_PAUSE",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_pause: bool,

    /// Plain output without colors or symbols
    #[arg(long)]
    pub plain: bool,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors and the final summary)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::new();

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_pattern(self.pattern.clone())
            .with_source_dir(self.source.clone())
            .with_no_source_fallback(self.no_source_fallback)
            .with_export_dir(self.export_dir.clone())
            .with_default_export(self.default_export)
            .with_soffice(self.soffice.clone())
            .with_no_pause(self.no_pause)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            // Progress lines are shown at level 1.
            self.verbose + 1
        }
    }
}
