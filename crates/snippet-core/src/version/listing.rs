//! Read-only overview of the discovered installations

use super::layout::InstallLayout;
use super::scanner::sort_descending;
use super::Version;
use std::fmt;
use std::path::PathBuf;

/// One installation as shown by the `list` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationSummary {
    pub version: Version,
    pub directory: PathBuf,
    /// The template document exists inside the installation
    pub has_templates: bool,
    /// Matches the stored preference
    pub preferred: bool,
}

impl fmt::Display for InstallationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} {}", self.version, self.directory.display())?;
        if !self.has_templates {
            write!(f, " (no templates)")?;
        }
        if self.preferred {
            write!(f, " [saved]")?;
        }
        Ok(())
    }
}

/// Scan the layout, newest first, marking the stored preference
pub fn summarize_installations(
    layout: &InstallLayout,
    stored: Option<&str>,
) -> Vec<InstallationSummary> {
    let preferred = stored.and_then(|value| value.parse::<Version>().ok());

    sort_descending(layout.scan())
        .into_iter()
        .map(|found| InstallationSummary {
            version: found.version,
            has_templates: layout.candidate(found.version).path.is_file(),
            preferred: Some(found.version) == preferred,
            directory: found.path,
        })
        .collect()
}
