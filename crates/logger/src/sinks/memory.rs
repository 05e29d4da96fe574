//! MemorySink - capturable in-memory buffer

use std::sync::{Arc, Mutex, PoisonError};

use contracts::{ContractError, LineSink};

/// Sink that appends lines to a shared in-memory buffer.
///
/// Clones share the same buffer, so a test or demo can keep one clone for
/// assertions while the logger owns the other. Stands in for standard
/// output wherever a capturable stream is needed.
#[derive(Debug, Clone)]
pub struct MemorySink {
    name: String,
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Create a new MemorySink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buf: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Contents as text, lossy on invalid UTF-8.
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LineSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn write(&mut self, line: &[u8]) -> Result<usize, ContractError> {
        self.lock().extend_from_slice(line);
        Ok(line.len())
    }

    async fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        Ok(())
    }
}
