use crate::error::{Result, Word2PdfError};
use crate::scanner::file_filter::FileFilter;
use crate::ui::{DirectoryChooser, OutputFormatter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SELECT_SOURCE_OPERATION: &str = "GetFilePaths";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub source_path: PathBuf,
    /// File name without its extension; also the name of the PDF.
    pub name: String,
}

impl DocumentFile {
    pub fn new(source_path: PathBuf) -> Self {
        let name = source_path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self { source_path, name }
    }

    pub fn pdf_file_name(&self) -> String {
        format!("{}.pdf", self.name)
    }

    pub fn exists(&self) -> bool {
        self.source_path.is_file()
    }
}

pub struct DocumentScanner {
    filter: FileFilter,
}

impl DocumentScanner {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            filter: FileFilter::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.filter.pattern()
    }

    /// Lists matching files directly inside `root`, in filesystem order.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<DocumentFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(Word2PdfError::InvalidPath {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(Word2PdfError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let root_path = root_path.canonicalize()?;
        let mut documents = Vec::new();

        let walker = WalkDir::new(&root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        for entry in walker {
            let entry = entry.map_err(|err| match err.into_io_error() {
                Some(io) => Word2PdfError::Io(io),
                None => Word2PdfError::InvalidPath {
                    path: root_path.display().to_string(),
                },
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            if self.filter.is_source_document(entry.path()) {
                documents.push(DocumentFile::new(entry.into_path()));
            }
        }

        Ok(documents)
    }
}

/// Asks for the source folder and lists its documents.
///
/// A dismissed prompt falls back to `fallback_dir` when `allow_fallback` is
/// set and the directory is known; otherwise the run is cancelled.
pub fn select_documents(
    chooser: &dyn DirectoryChooser,
    scanner: &DocumentScanner,
    allow_fallback: bool,
    fallback_dir: Option<&Path>,
    output: &OutputFormatter,
) -> Result<(PathBuf, Vec<DocumentFile>)> {
    let directory = match chooser.choose("Select the folder with the documents to convert")? {
        Some(selected) => selected,
        None => match fallback_dir.filter(|dir| allow_fallback && !dir.as_os_str().is_empty()) {
            Some(dir) => {
                output.info(&format!(
                    "No folder selected, using the base directory: {}",
                    dir.display()
                ));
                dir.to_path_buf()
            }
            None => {
                return Err(Word2PdfError::cancelled(
                    SELECT_SOURCE_OPERATION,
                    "No source folder was selected. The process was cancelled.",
                ))
            }
        },
    };

    output.debug(&format!(
        "Scanning {} for {}",
        directory.display(),
        scanner.pattern()
    ));
    let documents = scanner.scan_directory(&directory)?;

    Ok((directory, documents))
}
