//! FileSink - appends lines to a file on disk

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use contracts::{ContractError, LineSink};
use tracing::debug;

/// Sink that appends formatted lines to a single file.
#[derive(Debug)]
pub struct FileSink {
    name: String,
    path: PathBuf,
    file: File,
}

impl FileSink {
    /// Open the file at `path` in append mode, creating it if missing.
    pub fn new(name: impl Into<String>, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            name: name.into(),
            path,
            file,
        })
    }

    /// Create from params map (for the factory); requires a `path` entry.
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let path = params.get("path").ok_or_else(|| {
            ContractError::config_validation("path", "file sink requires a 'path' parameter")
        })?;
        Self::new(name.clone(), path)
            .map_err(|e| ContractError::sink_creation(name, e.to_string()))
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&mut self, line: &[u8]) -> Result<usize, ContractError> {
        self.file
            .write(line)
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        self.file
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        self.file
            .sync_all()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        debug!(sink = %self.name, path = %self.path.display(), "FileSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_sink_appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.log");

        let mut sink = FileSink::new("test_file", &path).unwrap();
        sink.write(b"one\n").await.unwrap();
        sink.write(b"two\n").await.unwrap();
        sink.flush().await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[tokio::test]
    async fn test_file_sink_appends_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.log");

        let mut first = FileSink::new("first", &path).unwrap();
        first.write(b"one\n").await.unwrap();
        first.close().await.unwrap();

        let mut second = FileSink::new("second", &path).unwrap();
        second.write(b"two\n").await.unwrap();
        second.close().await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn test_from_params_missing_path() {
        let err = FileSink::from_params("broken", &HashMap::new()).unwrap_err();
        assert!(matches!(err, ContractError::ConfigValidation { .. }));
    }
}
