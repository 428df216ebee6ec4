use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::error::ConfigError;

/// Options for [`run_with`](crate::run_with).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Indentation reference the root parser starts with
    #[serde(default = "default_initial_indent")]
    pub initial_indent: usize,

    /// Name shown in front of error messages, usually a file path
    #[serde(default)]
    pub source_name: Option<String>,

    /// Copy the context stack into `ParseError`
    #[serde(default = "default_true")]
    pub capture_context: bool,

    /// Fail with `ExpectingEnd` when the root parser leaves input behind
    #[serde(default)]
    pub require_end: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            initial_indent: default_initial_indent(),
            source_name: None,
            capture_context: default_true(),
            require_end: false,
        }
    }
}

impl RunConfig {
    // JSONファイルから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

fn default_initial_indent() -> usize {
    1
}

fn default_true() -> bool {
    true
}
