use std::fmt;
use std::path::{Path, PathBuf};

/// State of a single run, owned by the orchestrator.
#[derive(Debug, Clone)]
pub struct RunContext {
    base_directory: PathBuf,
    export_directory: Option<PathBuf>,
    total_files: usize,
    files_seen: usize,
    exported: usize,
    failures: Vec<FailedFile>,
}

impl RunContext {
    pub fn new<P: Into<PathBuf>>(base_directory: P) -> Self {
        Self {
            base_directory: base_directory.into(),
            export_directory: None,
            total_files: 0,
            files_seen: 0,
            exported: 0,
            failures: Vec::new(),
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn export_directory(&self) -> Option<&Path> {
        self.export_directory.as_deref()
    }

    /// Stores the export directory unless one was already chosen this run.
    pub fn set_export_directory(&mut self, directory: PathBuf) -> &Path {
        self.export_directory.get_or_insert(directory)
    }

    pub fn set_total_files(&mut self, total: usize) {
        self.total_files = total;
    }

    pub fn record_seen(&mut self) {
        self.files_seen += 1;
    }

    pub fn record_export(&mut self) {
        self.exported += 1;
    }

    pub fn record_failure<N: Into<String>, R: Into<String>>(&mut self, name: N, reason: R) {
        self.failures.push(FailedFile {
            name: name.into(),
            reason: reason.into(),
        });
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total_files: self.total_files,
            files_seen: self.files_seen,
            exported: self.exported,
            failures: self.failures.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub name: String,
    pub reason: String,
}

/// Result of converting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub exported: bool,
    pub pdf_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl ConversionOutcome {
    pub fn exported(pdf_path: PathBuf) -> Self {
        Self {
            exported: true,
            pdf_path: Some(pdf_path),
            error: None,
        }
    }

    pub fn failed<S: Into<String>>(error: S) -> Self {
        Self {
            exported: false,
            pdf_path: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_files: usize,
    pub files_seen: usize,
    pub exported: usize,
    pub failures: Vec<FailedFile>,
}

impl RunSummary {
    pub fn all_exported(&self) -> bool {
        self.exported == self.total_files
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} files exported.", self.exported, self.total_files)
    }
}
