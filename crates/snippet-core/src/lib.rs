//! Snippet Core - Shared library for live-template to snippet converters
//!
//! This library converts an IDE's XML live-template document into an editor
//! snippets file. It is designed to be used by converter binaries (e.g.
//! `clion-snippets`) that share the same resolution and conversion logic but
//! describe different products through a `ProductConfig`.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Version scanning, template parsing, placeholder rewriting
//! - **Layer 2: Workflow Orchestration** - `ProductConfig`, the version resolver and `run_pipeline`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//! - `dialog`: Reports a missing template document with a native message box
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use snippet_core::{run_pipeline, InstallLayout, MemoryPreference, PipelineOptions};
//!
//! let layout = InstallLayout::new("/jb", "CLion", "templates/C_C__.xml");
//! let mut store = MemoryPreference::new(Some("2024.3"));
//! let outcome = run_pipeline(
//!     &layout,
//!     Path::new("cpp.json"),
//!     &mut store,
//!     &mut my_prompter,
//!     &ConsoleNotifier,
//!     PipelineOptions::default(),
//! )?;
//! ```

pub mod error;
pub mod logging;
pub mod notify;
pub mod pipeline;
pub mod product;
pub mod prompt;
pub mod settings;
pub mod templates;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use error::{ConvertError, ParseError, PipelineError, WriteError};
pub use logging::{init_logging, LogConfig};
pub use notify::{default_notifier, ConsoleNotifier, Notifier};
pub use pipeline::{run_pipeline, Outcome, PipelineOptions};
pub use product::{platform_config_dir, ProductConfig};
pub use prompt::Prompter;
pub use settings::{JsonSettingsFile, MemoryPreference, PreferenceStore, SettingsError};
pub use templates::{convert_file, write_snippets, ConvertOptions, SnippetRecord, SnippetSet};
pub use version::{InstallLayout, Resolution, ResolveOptions, Version, VersionResolver};

#[cfg(feature = "tui")]
pub use tui::run;
