//! Discovery of installed versions under a base directory

use super::Version;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One discovered installation directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationCandidate {
    pub version: Version,
    pub path: PathBuf,
}

/// Scans a base directory for `<Prefix><YYYY>.<minor>` subdirectories
#[derive(Debug, Clone)]
pub struct VersionScanner {
    prefix: String,
}

impl VersionScanner {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Parse a directory name, returning the version if it follows the naming convention
    pub fn match_name(&self, name: &str) -> Option<Version> {
        name.strip_prefix(&self.prefix)?.parse().ok()
    }

    /// List the immediate subdirectories of `base` that follow the naming convention
    ///
    /// Files, non-matching names and unreadable entries are skipped. A missing
    /// base directory yields an empty list.
    pub fn scan(&self, base: &Path) -> Vec<InstallationCandidate> {
        let candidates: Vec<InstallationCandidate> = WalkDir::new(base)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| {
                let version = self.match_name(entry.file_name().to_str()?)?;
                Some(InstallationCandidate {
                    version,
                    path: entry.into_path(),
                })
            })
            .collect();

        tracing::debug!(
            base = %base.display(),
            found = candidates.len(),
            "scanned for {} installations",
            self.prefix
        );
        candidates
    }
}

/// Sort candidates newest first; equal versions keep discovery order
pub fn sort_descending(mut candidates: Vec<InstallationCandidate>) -> Vec<InstallationCandidate> {
    candidates.sort_by(|a, b| b.version.cmp(&a.version));
    candidates
}

/// The newest version among the candidates, if any
pub fn pick_latest(candidates: &[InstallationCandidate]) -> Option<Version> {
    candidates.iter().map(|c| c.version).max()
}
