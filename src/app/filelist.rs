//! File list parsing
//!
//! A file list restricts a download to selected files. Each non-blank line
//! is either a literal relative path or, when prefixed with `regex:`, a
//! case-insensitive regular expression matched against forward-slash paths.

use std::collections::HashSet;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::constants::filelist::REGEX_PREFIX;
use crate::errors::{ConfigError, ConfigResult};

/// Set of files selected for download
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// Exact relative paths, forward-slash separated
    pub exact: HashSet<String>,
    /// Case-insensitive path patterns
    pub patterns: Vec<Regex>,
}

impl FileFilter {
    /// Read and parse a file list from disk
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidValue {
            flag: "-filelist",
            value: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::parse_lines(content.lines())
    }

    /// Parse file list lines, skipping blank ones
    pub fn parse_lines<I, S>(lines: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();

        for line in lines {
            let entry = line.as_ref();
            if entry.trim().is_empty() {
                continue;
            }

            if let Some(pattern) = entry.strip_prefix(REGEX_PREFIX) {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ConfigError::InvalidValue {
                        flag: "-filelist",
                        value: entry.to_string(),
                        reason: e.to_string(),
                    })?;
                filter.patterns.push(regex);
            } else {
                filter.exact.insert(normalize_separators(entry));
            }
        }

        debug!(
            "Parsed file list: {} paths, {} patterns",
            filter.exact.len(),
            filter.patterns.len()
        );
        Ok(filter)
    }

    /// Whether a relative path is selected by this list
    pub fn matches(&self, relative_path: &str) -> bool {
        let path = normalize_separators(relative_path);

        self.exact
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(&path))
            || self.patterns.iter().any(|regex| regex.is_match(&path))
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.patterns.is_empty()
    }
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
