#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use word2pdf::engine::DocumentId;
use word2pdf::{
    Config, DirectoryChooser, OfficeEngine, OfficeSession, OutputMode, PauseOnExit,
    Result, Word2PdfError, WordToPdf,
};

pub const STUB_PDF: &[u8] = b"%PDF-1.4\n% word2pdf test\n";

/// Everything the fake engine was asked to do.
#[derive(Debug, Default)]
pub struct EngineLog {
    pub launches: usize,
    pub opened: Vec<PathBuf>,
    pub exported: Vec<PathBuf>,
    pub closed: usize,
    pub close_all_calls: usize,
    pub quits: usize,
    pub open_at_quit: usize,
}

/// Stands in for the office engine. Documents whose file name contains
/// "corrupt" fail to export; everything else produces a small PDF.
pub struct FakeEngine {
    log: Rc<RefCell<EngineLog>>,
    delete_on_launch: Vec<PathBuf>,
    fail_launch: bool,
    leak_documents: bool,
}

impl FakeEngine {
    pub fn new(log: Rc<RefCell<EngineLog>>) -> Self {
        Self {
            log,
            delete_on_launch: Vec::new(),
            fail_launch: false,
            leak_documents: false,
        }
    }

    /// Removes `path` when the session starts, after the files were listed.
    pub fn deleting_on_launch<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.delete_on_launch.push(path.into());
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// Sessions ignore `close`, leaving documents for shutdown to clean up.
    pub fn leaking_documents(mut self) -> Self {
        self.leak_documents = true;
        self
    }
}

impl OfficeEngine for FakeEngine {
    fn name(&self) -> &str {
        "FakeOffice"
    }

    fn launch(&self) -> Result<Box<dyn OfficeSession>> {
        if self.fail_launch {
            return Err(Word2PdfError::engine("automation server unavailable"));
        }

        self.log.borrow_mut().launches += 1;
        for path in &self.delete_on_launch {
            fs::remove_file(path)?;
        }

        Ok(Box::new(FakeSession {
            log: self.log.clone(),
            open: BTreeMap::new(),
            next_id: 0,
            leak_documents: self.leak_documents,
        }))
    }
}

struct FakeSession {
    log: Rc<RefCell<EngineLog>>,
    open: BTreeMap<DocumentId, PathBuf>,
    next_id: DocumentId,
    leak_documents: bool,
}

impl OfficeSession for FakeSession {
    fn open(&mut self, path: &Path) -> Result<DocumentId> {
        self.next_id += 1;
        self.open.insert(self.next_id, path.to_path_buf());
        self.log.borrow_mut().opened.push(path.to_path_buf());
        Ok(self.next_id)
    }

    fn export_pdf(&mut self, document: DocumentId, target: &Path) -> Result<()> {
        let source = self
            .open
            .get(&document)
            .ok_or_else(|| Word2PdfError::engine("document not open"))?;

        let corrupt = source
            .file_name()
            .map(|n| n.to_string_lossy().contains("corrupt"))
            .unwrap_or(false);
        if corrupt {
            return Err(Word2PdfError::engine(format!(
                "{} could not be loaded",
                source.display()
            )));
        }

        fs::write(target, STUB_PDF)?;
        self.log.borrow_mut().exported.push(target.to_path_buf());
        Ok(())
    }

    fn close(&mut self, document: DocumentId) -> Result<()> {
        if !self.leak_documents {
            self.open.remove(&document);
        }
        self.log.borrow_mut().closed += 1;
        Ok(())
    }

    fn open_documents(&self) -> usize {
        self.open.len()
    }

    fn close_all(&mut self) -> Result<()> {
        self.open.clear();
        self.log.borrow_mut().close_all_calls += 1;
        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.quits += 1;
        log.open_at_quit = self.open.len();
        Ok(())
    }
}

/// Answers with a fixed value and counts how often it was asked.
pub struct CountingChooser {
    answer: Option<PathBuf>,
    pub calls: Rc<Cell<usize>>,
}

impl CountingChooser {
    pub fn new(answer: Option<PathBuf>) -> Self {
        Self {
            answer,
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl DirectoryChooser for CountingChooser {
    fn choose(&self, _title: &str) -> Result<Option<PathBuf>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.answer.clone())
    }
}

pub fn test_config(base_directory: &Path) -> Config {
    let mut config = Config::default();
    config.source.base_directory = base_directory.to_path_buf();
    config.pause_on_exit = PauseOnExit(false);
    config
}

pub fn test_app(config: Config, engine: FakeEngine) -> WordToPdf {
    WordToPdf::without_signal_handler(config, OutputMode::Plain, 0, true)
        .with_engine(Box::new(engine))
}

pub fn write_documents(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), format!("contents of {}", name)).unwrap();
    }
}

pub fn pdf_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .filter(|n| n.ends_with(".pdf"))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
