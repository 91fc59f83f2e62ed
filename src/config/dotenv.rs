//! Minimal `.env` reader.
//!
//! Values are kept in a map and consulted after the real environment, so the process
//! environment is never modified.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Key/value pairs parsed from a `.env` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotEnv {
    vars: HashMap<String, String>,
}

impl DotEnv {
    /// Reads `path`. A missing file yields an empty set.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::DotEnv {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&contents))
    }

    /// Like [`load`](Self::load), but a missing file is [`ConfigError::PathNotFound`].
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::load(path)
    }

    /// Parses `KEY=value` lines.
    ///
    /// Blank lines, `#` comments and lines without `=` are ignored. Keys and values are
    /// trimmed and surrounding quotes are stripped from values. The first occurrence of a
    /// key wins.
    pub fn parse(contents: &str) -> Self {
        let mut vars = HashMap::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').trim_matches('\'');
            vars.entry(key.trim().to_string())
                .or_insert_with(|| value.to_string());
        }
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
