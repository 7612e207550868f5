pub mod document_scanner;
pub mod file_filter;

pub use document_scanner::{select_documents, DocumentFile, DocumentScanner};
pub use file_filter::FileFilter;
