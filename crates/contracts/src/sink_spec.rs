//! Sink configuration
//!
//! Declarative description of the sink a logger should write to, resolved
//! into a concrete sink by the logger crate's factory at construction time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Sink kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// Process standard output
    Stdout,
    /// Append-mode file
    File,
    /// In-memory buffer (tests, demos)
    Memory,
}

/// Sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkSpec {
    /// Sink name
    pub name: String,

    /// Sink kind
    pub kind: SinkKind,

    /// Kind-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl SinkSpec {
    /// Spec for the process standard output sink
    pub fn stdout() -> Self {
        Self {
            name: "stdout".to_string(),
            kind: SinkKind::Stdout,
            params: HashMap::new(),
        }
    }

    /// Spec for an append-mode file sink at `path`
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SinkKind::File,
            params: HashMap::from([("path".to_string(), path.into())]),
        }
    }

    /// Spec for an in-memory buffer sink
    pub fn memory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SinkKind::Memory,
            params: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_deserialize_defaults_params() {
        let spec: SinkSpec = serde_json::from_str(r#"{"name":"out","kind":"stdout"}"#).unwrap();
        assert_eq!(spec.name, "out");
        assert_eq!(spec.kind, SinkKind::Stdout);
        assert!(spec.params.is_empty());
    }

    #[test]
    fn test_file_spec_carries_path() {
        let spec = SinkSpec::file("applog", "/tmp/app.log");
        assert_eq!(spec.kind, SinkKind::File);
        assert_eq!(spec.params.get("path").map(String::as_str), Some("/tmp/app.log"));
    }
}
