//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface each converter binary implements to
//! describe its source editor's installation layout and the destination
//! snippets file.

use crate::version::InstallLayout;
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Configuration trait for different converter products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Where source installations live and how they are named
/// - Where the snippets file is written
/// - Where the chosen version is remembered
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the settings directory)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Literal prefix of installation directory names (e.g. "CLion")
    fn directory_prefix(&self) -> &'static str;

    /// Template document path relative to an installation directory
    fn template_file(&self) -> &'static str;

    /// Environment variable name for overriding the installations directory
    fn installations_dir_env(&self) -> &'static str;

    /// Default directory holding the versioned installations
    fn default_installations_dir(&self) -> PathBuf;

    /// Default snippets file to write
    fn default_output_path(&self) -> PathBuf;

    /// Settings key holding the chosen version
    fn settings_key(&self) -> &'static str;

    /// Installations directory, honouring the environment override
    fn installations_dir(&self) -> PathBuf {
        std::env::var_os(self.installations_dir_env())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.default_installations_dir())
    }

    /// Settings file in the per-user config directory
    fn settings_path(&self) -> PathBuf {
        ProjectDirs::from("", "", self.name())
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from(format!(".{}-settings.json", self.name())))
    }

    /// Installation layout rooted at `installations_dir`
    fn layout(&self, installations_dir: PathBuf) -> InstallLayout {
        InstallLayout::new(
            installations_dir,
            self.directory_prefix(),
            self.template_file(),
        )
    }
}

/// The platform's per-user configuration directory
///
/// `~/Library/Application Support` on macOS, `~/.config` on Linux and
/// `%APPDATA%` on Windows. Falls back to the working directory when no home
/// directory can be determined.
pub fn platform_config_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
