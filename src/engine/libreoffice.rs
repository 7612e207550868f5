use crate::engine::{DocumentId, OfficeEngine, OfficeSession};
use crate::error::{Result, Word2PdfError};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;
use url::Url;

const PDF_FILTER: &str = "pdf:writer_pdf_Export";

/// Drives a headless LibreOffice (`soffice`) as the automation engine.
pub struct LibreOfficeEngine {
    program: String,
}

impl LibreOfficeEngine {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl OfficeEngine for LibreOfficeEngine {
    fn name(&self) -> &str {
        "LibreOffice"
    }

    fn launch(&self) -> Result<Box<dyn OfficeSession>> {
        // A private profile keeps us clear of a desktop instance the user may have open.
        let profile = tempfile::Builder::new()
            .prefix("word2pdf-profile-")
            .tempdir()?;
        let profile_arg = user_installation_arg(profile.path())?;

        let output = Command::new(&self.program)
            .arg(&profile_arg)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Word2PdfError::EngineNotFound {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(Word2PdfError::engine(format!(
                "{} --version exited with {}: {}",
                self.program,
                output.status,
                stderr_text(&output)
            )));
        }

        Ok(Box::new(LibreOfficeSession {
            program: self.program.clone(),
            profile: Some(profile),
            profile_arg,
            documents: BTreeMap::new(),
            next_id: 1,
        }))
    }
}

pub struct LibreOfficeSession {
    program: String,
    profile: Option<TempDir>,
    profile_arg: String,
    documents: BTreeMap<DocumentId, PathBuf>,
    next_id: DocumentId,
}

impl LibreOfficeSession {
    fn convert_args(&self, source: &Path, outdir: &Path) -> Vec<OsString> {
        vec![
            OsString::from(&self.profile_arg),
            OsString::from("--headless"),
            OsString::from("--norestore"),
            OsString::from("--nolockcheck"),
            OsString::from("--convert-to"),
            OsString::from(PDF_FILTER),
            OsString::from("--outdir"),
            outdir.as_os_str().to_os_string(),
            source.as_os_str().to_os_string(),
        ]
    }

    fn document_path(&self, document: DocumentId) -> Result<&Path> {
        self.documents
            .get(&document)
            .map(PathBuf::as_path)
            .ok_or_else(|| Word2PdfError::engine(format!("document {} is not open", document)))
    }
}

impl OfficeSession for LibreOfficeSession {
    fn open(&mut self, path: &Path) -> Result<DocumentId> {
        if self.profile.is_none() {
            return Err(Word2PdfError::engine("session has already quit"));
        }

        if !path.is_file() {
            return Err(Word2PdfError::engine(format!(
                "cannot open {}: file not found",
                path.display()
            )));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.documents.insert(id, path.to_path_buf());
        Ok(id)
    }

    fn export_pdf(&mut self, document: DocumentId, target: &Path) -> Result<()> {
        let source = self.document_path(document)?.to_path_buf();
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        // Convert into a scratch folder next to the target, then move into place,
        // so a failed conversion never leaves a partial PDF behind.
        let scratch = tempfile::Builder::new()
            .prefix(".word2pdf-")
            .tempdir_in(parent)?;

        let output = Command::new(&self.program)
            .args(self.convert_args(&source, scratch.path()))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Word2PdfError::Engine {
                message: format!("failed to run {}", self.program),
                source: Some(source),
            })?;

        if !output.status.success() {
            return Err(Word2PdfError::engine(format!(
                "conversion of {} exited with {}: {}",
                source.display(),
                output.status,
                stderr_text(&output)
            )));
        }

        let produced = produced_pdf_path(&source, scratch.path());
        if !produced.is_file() {
            return Err(Word2PdfError::engine(format!(
                "no PDF was produced for {}: {}",
                source.display(),
                stderr_text(&output)
            )));
        }

        fs::rename(&produced, target)?;
        scratch.close()?;
        Ok(())
    }

    fn close(&mut self, document: DocumentId) -> Result<()> {
        self.documents
            .remove(&document)
            .map(|_| ())
            .ok_or_else(|| Word2PdfError::engine(format!("document {} is not open", document)))
    }

    fn open_documents(&self) -> usize {
        self.documents.len()
    }

    fn close_all(&mut self) -> Result<()> {
        self.documents.clear();
        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        self.documents.clear();
        if let Some(profile) = self.profile.take() {
            profile.close()?;
        }
        Ok(())
    }
}

fn user_installation_arg(profile_dir: &Path) -> Result<String> {
    let url = Url::from_directory_path(profile_dir).map_err(|_| {
        Word2PdfError::engine(format!(
            "cannot build a profile URL for {}",
            profile_dir.display()
        ))
    })?;
    Ok(format!("-env:UserInstallation={}", url))
}

/// LibreOffice names its output after the source stem.
fn produced_pdf_path(source: &Path, outdir: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default();
    let mut name = stem.to_os_string();
    name.push(".pdf");
    outdir.join(name)
}

fn stderr_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        "no error output".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_reported() {
        let engine = LibreOfficeEngine::new("word2pdf-no-such-soffice");
        match engine.launch() {
            Err(Word2PdfError::EngineNotFound { program, .. }) => {
                assert_eq!(program, "word2pdf-no-such-soffice");
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("launch should fail"),
        }
    }

    #[test]
    fn test_produced_pdf_path() {
        let produced = produced_pdf_path(Path::new("/in/Report.v2.docx"), Path::new("/tmp/x"));
        assert_eq!(produced, PathBuf::from("/tmp/x/Report.v2.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn test_user_installation_arg() {
        let arg = user_installation_arg(Path::new("/tmp/word2pdf profile")).unwrap();
        assert_eq!(arg, "-env:UserInstallation=file:///tmp/word2pdf%20profile/");
    }

    #[test]
    fn test_session_bookkeeping() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let source = temp_dir.path().join("a.docx");
        fs::write(&source, "a").unwrap();

        let mut session = LibreOfficeSession {
            program: "soffice".to_string(),
            profile: Some(tempfile::TempDir::new().unwrap()),
            profile_arg: "-env:UserInstallation=file:///tmp/p/".to_string(),
            documents: BTreeMap::new(),
            next_id: 1,
        };

        assert!(session.open(&temp_dir.path().join("missing.docx")).is_err());

        let id = session.open(&source).unwrap();
        assert_eq!(session.open_documents(), 1);

        let args = session.convert_args(&source, Path::new("/scratch"));
        assert_eq!(args.last().unwrap(), source.as_os_str());
        assert!(args.contains(&OsString::from("--headless")));
        assert!(args.contains(&OsString::from(PDF_FILTER)));

        session.close(id).unwrap();
        assert!(session.close(id).is_err());
        assert_eq!(session.open_documents(), 0);

        session.quit().unwrap();
        assert!(session.open(&source).is_err());
    }
}
