//! Installation versions: discovery, path construction, and interactive resolution
//!
//! This module provides:
//! - The `YYYY.X` version type and its numeric ordering
//! - Scanning a base directory for `<Prefix><YYYY>.<minor>` installations
//! - Building and retargeting template input paths
//! - The interactive resolver that settles on one installation
//! - A read-only summary of what is installed

pub mod layout;
pub mod listing;
pub mod resolver;
pub mod scanner;

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

pub use layout::{CandidatePath, InstallLayout};
pub use listing::{summarize_installations, InstallationSummary};
pub use resolver::{Resolution, ResolveOptions, VersionResolver};
pub use scanner::{pick_latest, sort_descending, InstallationCandidate, VersionScanner};

/// An installation version such as `2024.3`
///
/// Equality and ordering are numeric on `(year, minor)`, so `2024.10` sorts
/// after `2024.9`. The minor keeps the digit count it was written with, so a
/// directory named `CLion2024.09` displays (and maps back) as `2024.09`.
#[derive(Debug, Clone, Copy)]
pub struct Version {
    pub year: u32,
    pub minor: u32,
    minor_width: usize,
}

impl Version {
    pub fn new(year: u32, minor: u32) -> Self {
        Self {
            year,
            minor,
            minor_width: minor.to_string().len(),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        (self.year, self.minor) == (other.year, other.minor)
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.year, self.minor).hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.minor).cmp(&(other.year, other.minor))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!(
            "{}.{:0width$}",
            self.year,
            self.minor,
            width = self.minor_width
        ))
    }
}

/// Operator or stored input that is not a `YYYY.X` version
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid version: use the YYYY.X form (e.g. 2026.2)")]
pub struct VersionFormatError {
    pub input: String,
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{4})\.([0-9]+)$").expect("version pattern is a valid regex")
    })
}

impl FromStr for Version {
    type Err = VersionFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionFormatError {
            input: s.to_string(),
        };

        let caps = version_pattern().captures(s).ok_or_else(invalid)?;
        let year = caps[1].parse().map_err(|_| invalid())?;
        // An absurdly long minor overflows u32 and is rejected like any other bad input
        let minor = caps[2].parse().map_err(|_| invalid())?;

        Ok(Self {
            year,
            minor,
            minor_width: caps[2].len(),
        })
    }
}
