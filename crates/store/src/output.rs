//! Export delivery
//!
//! The finished PDF leaves the pipeline through an `OutputSink`. The
//! directory sink writes a real file; the memory sink captures deliveries
//! for inspection.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::Result;

/// Destination for a finished export.
pub trait OutputSink: Send + Sync {
    /// Deliver the named file.
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<()>;
}

/// Writes delivered files into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl OutputSink for DirectorySink {
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(file_name);
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), size = bytes.len(), "export delivered");
        Ok(())
    }
}

/// Captures delivered files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: RwLock<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the files delivered so far, in order.
    pub fn file_names(&self) -> Vec<String> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Bytes of a delivered file, if present.
    pub fn file(&self, file_name: &str) -> Option<Vec<u8>> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.clone())
    }
}

impl OutputSink for MemorySink {
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files.push((file_name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_sink_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(temp_dir.path().join("out"));

        sink.deliver("report.pdf", b"%PDF-").unwrap();

        let written = std::fs::read(temp_dir.path().join("out/report.pdf")).unwrap();
        assert_eq!(written, b"%PDF-");
    }

    #[test]
    fn test_memory_sink_records_deliveries() {
        let sink = MemorySink::new();
        sink.deliver("a.pdf", b"aa").unwrap();
        sink.deliver("b.pdf", b"bb").unwrap();

        assert_eq!(sink.file_names(), vec!["a.pdf", "b.pdf"]);
        assert_eq!(sink.file("b.pdf").unwrap(), b"bb");
        assert!(sink.file("c.pdf").is_none());
    }
}
