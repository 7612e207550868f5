use crate::converter::{ConversionOutcome, ExportPathResolver, RunContext};
use crate::engine::{OfficeSession, OpenDocument};
use crate::error::{Result, Word2PdfError};
use crate::scanner::DocumentFile;
use crate::ui::{DirectoryChooser, OutputFormatter};
use std::fs;
use std::path::Path;

/// Converts one document at a time through an open office session.
pub struct PdfConverter {
    resolver: ExportPathResolver,
}

impl PdfConverter {
    pub fn new(resolver: ExportPathResolver) -> Self {
        Self { resolver }
    }

    /// Engine and filesystem failures are reported and returned as a failed
    /// outcome. Only cancellation is returned as an error, and it ends the batch.
    pub fn convert(
        &self,
        session: &mut dyn OfficeSession,
        ctx: &mut RunContext,
        chooser: &dyn DirectoryChooser,
        document: &DocumentFile,
        output: &OutputFormatter,
    ) -> Result<ConversionOutcome> {
        let result = self
            .resolver
            .resolve(ctx, chooser, output)
            .and_then(|export_dir| {
                let target = export_dir.join(document.pdf_file_name());
                self.export(session, document, &export_dir, &target, output)?;
                Ok(target)
            });

        match result {
            Ok(target) => Ok(ConversionOutcome::exported(target)),
            Err(e) if e.is_cancellation() => Err(e),
            Err(e) => {
                let detail = describe(&e);
                output.error(&format!(
                    "An error occurred while processing {}. Error: {}",
                    document.source_path.display(),
                    detail
                ));
                Ok(ConversionOutcome::failed(detail))
            }
        }
    }

    fn export(
        &self,
        session: &mut dyn OfficeSession,
        document: &DocumentFile,
        export_dir: &Path,
        target: &Path,
        output: &OutputFormatter,
    ) -> Result<()> {
        fs::create_dir_all(export_dir)?;

        output.debug(&format!(
            "{} -> {}",
            document.source_path.display(),
            target.display()
        ));

        // Dropping the handle closes the document if the export fails.
        let mut opened = OpenDocument::open(session, &document.source_path)?;
        opened.export_pdf(target)?;

        if let Err(e) = opened.close() {
            output.warning(&format!("Could not close {}: {}", document.name, e));
        }

        Ok(())
    }
}

fn describe(error: &Word2PdfError) -> String {
    match error.cause_message() {
        Some(cause) if !error.to_string().contains(&cause) => format!("{}. {}", error, cause),
        _ => error.to_string(),
    }
}
