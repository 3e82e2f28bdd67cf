//! Destinations for generated documents.

use crate::error::GenerateError;
use crate::generate::EmittedDocument;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Receives generated documents.
pub trait DocumentSink {
    /// Takes ownership of a generated document.
    fn write(&mut self, document: EmittedDocument) -> Result<(), GenerateError>;

    /// Called once after the last document has been written.
    fn finish(&mut self) -> Result<(), GenerateError> {
        Ok(())
    }
}

/// A line of the manifest written by [DirectorySink].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub file: String,
    pub lines: usize,
}

/// Writes each document to `{module_name}.rs` in a directory, followed by a `manifest.json`.
pub struct DirectorySink {
    dir: PathBuf,
    manifest: Vec<ManifestEntry>,
}

impl DirectorySink {
    pub const MANIFEST: &'static str = "manifest.json";

    /// Creates a sink for `dir`, creating the directory if it does not exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, GenerateError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            manifest: vec![],
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn manifest(&self) -> &[ManifestEntry] {
        &self.manifest
    }
}

impl DocumentSink for DirectorySink {
    fn write(&mut self, document: EmittedDocument) -> Result<(), GenerateError> {
        let file = document.file_name();
        let path = self.dir.join(&file);
        fs::write(&path, document.text())?;
        log::info!("wrote {}", path.display());
        self.manifest.push(ManifestEntry {
            name: document.name,
            file,
            lines: document.lines.len(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GenerateError> {
        let file = File::create(self.dir.join(Self::MANIFEST))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &self.manifest)?;
        out.flush()?;
        Ok(())
    }
}

/// Keeps documents in memory.
#[derive(Default)]
pub struct MemorySink {
    pub documents: Vec<EmittedDocument>,
    pub finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Default::default()
    }

    /// Finds a written document by type name.
    pub fn get(&self, name: &str) -> Option<&EmittedDocument> {
        self.documents.iter().find(|doc| doc.name == name)
    }
}

impl DocumentSink for MemorySink {
    fn write(&mut self, document: EmittedDocument) -> Result<(), GenerateError> {
        self.documents.push(document);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GenerateError> {
        self.finished = true;
        Ok(())
    }
}
