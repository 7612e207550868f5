//! Office automation engine.
//!
//! The converter only talks to the [`OfficeEngine`] and [`OfficeSession`]
//! traits. [`SessionGuard`] and [`OpenDocument`] tie the engine's resources
//! to scopes so documents are closed and the session quits on every exit
//! path.

pub mod libreoffice;

pub use libreoffice::LibreOfficeEngine;

use crate::error::{Result, Word2PdfError};
use std::path::Path;

pub type DocumentId = u64;

pub trait OfficeEngine {
    /// Product name shown in console output.
    fn name(&self) -> &str;

    /// Starts an automation session. Called at most once per run.
    fn launch(&self) -> Result<Box<dyn OfficeSession>>;
}

pub trait OfficeSession {
    fn open(&mut self, path: &Path) -> Result<DocumentId>;

    /// Exports an open document as PDF to `target`, replacing any existing file.
    fn export_pdf(&mut self, document: DocumentId, target: &Path) -> Result<()>;

    fn close(&mut self, document: DocumentId) -> Result<()>;

    fn open_documents(&self) -> usize;

    fn close_all(&mut self) -> Result<()>;

    fn quit(&mut self) -> Result<()>;
}

/// Owns a launched session and releases it exactly once.
pub struct SessionGuard {
    session: Option<Box<dyn OfficeSession>>,
}

impl SessionGuard {
    pub fn new(session: Box<dyn OfficeSession>) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub fn session(&mut self) -> Result<&mut dyn OfficeSession> {
        match self.session.as_deref_mut() {
            Some(session) => Ok(session),
            None => Err(Word2PdfError::engine("office session was already closed")),
        }
    }

    /// Closes any open documents and quits. Later calls do nothing.
    pub fn release(&mut self) -> Result<()> {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };

        let closed = if session.open_documents() > 0 {
            session.close_all()
        } else {
            Ok(())
        };
        let quit = session.quit();

        closed.and(quit)
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// A document opened in a session; closed when dropped.
pub struct OpenDocument<'s> {
    session: &'s mut dyn OfficeSession,
    id: DocumentId,
    closed: bool,
}

impl<'s> OpenDocument<'s> {
    pub fn open(session: &'s mut dyn OfficeSession, path: &Path) -> Result<Self> {
        let id = session.open(path)?;
        Ok(Self {
            session,
            id,
            closed: false,
        })
    }

    pub fn export_pdf(&mut self, target: &Path) -> Result<()> {
        self.session.export_pdf(self.id, target)
    }

    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.session.close(self.id)
    }
}

impl Drop for OpenDocument<'_> {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.session.close(self.id);
        }
    }
}
