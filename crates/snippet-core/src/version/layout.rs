//! Where installations live and how a version maps to a template document path

use super::scanner::{InstallationCandidate, VersionScanner};
use super::Version;
use std::path::{Path, PathBuf};

/// A resolved version together with the template document path built from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePath {
    pub version: Version,
    pub path: PathBuf,
}

/// Directory layout of the source editor's installations
#[derive(Debug, Clone)]
pub struct InstallLayout {
    installations_dir: PathBuf,
    prefix: String,
    template_file: PathBuf,
}

impl InstallLayout {
    /// `prefix` is the literal directory-name prefix (e.g. "CLion") and
    /// `template_file` the document path relative to an installation directory
    pub fn new(
        installations_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        template_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            installations_dir: installations_dir.into(),
            prefix: prefix.into(),
            template_file: template_file.into(),
        }
    }

    pub fn installations_dir(&self) -> &Path {
        &self.installations_dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Installation directory name for a version, e.g. `CLion2024.3`
    pub fn segment(&self, version: Version) -> String {
        format!("{}{}", self.prefix, version)
    }

    pub fn scanner(&self) -> VersionScanner {
        VersionScanner::new(self.prefix.clone())
    }

    /// Scan the installations directory
    pub fn scan(&self) -> Vec<InstallationCandidate> {
        self.scanner().scan(&self.installations_dir)
    }

    /// Full template document path for a version
    pub fn candidate(&self, version: Version) -> CandidatePath {
        CandidatePath {
            version,
            path: self
                .installations_dir
                .join(self.segment(version))
                .join(&self.template_file),
        }
    }

    /// Swap the version in an already-built path
    ///
    /// The first `<Prefix><old>` occurrence is replaced literally so the
    /// components around it stay as they were. Paths that are not valid UTF-8
    /// or no longer contain the segment are rebuilt from the layout instead.
    pub fn retarget(&self, current: &CandidatePath, version: Version) -> CandidatePath {
        let old = self.segment(current.version);
        let new = self.segment(version);

        match current.path.to_str() {
            Some(path) if path.contains(&old) => {
                let path = PathBuf::from(path.replacen(&old, &new, 1));
                tracing::debug!(from = %current.path.display(), to = %path.display(), "retargeted input path");
                CandidatePath { version, path }
            }
            _ => self.candidate(version),
        }
    }
}
