pub mod export_path;
pub mod pdf_converter;
pub mod run_context;

pub use export_path::ExportPathResolver;
pub use pdf_converter::PdfConverter;
pub use run_context::{ConversionOutcome, FailedFile, RunContext, RunSummary};
