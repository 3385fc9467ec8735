//! Charm-style CLI prompts using cliclack

use crate::error::PipelineError;
use crate::notify::default_notifier;
use crate::pipeline::{run_pipeline, Outcome, PipelineOptions};
use crate::product::ProductConfig;
use crate::prompt::Prompter;
use crate::settings::{JsonSettingsFile, PreferenceStore};
use crate::templates::ConvertOptions;
use crate::version::{summarize_installations, ResolveOptions};
use console::style;
use std::io;
use std::path::PathBuf;

/// Settled arguments for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Directory scanned for `<Prefix><YYYY>.<minor>` installations
    pub installations_dir: PathBuf,

    /// Snippets file to write
    pub output: PathBuf,

    /// JSON file holding the remembered version
    pub settings_path: PathBuf,

    /// Leave `$NAME$` variables as they are
    pub keep_variables: bool,

    /// Offer the `latest` answer when confirming
    pub allow_latest: bool,

    /// Remember versions picked after the first confirmation
    pub remember_choice: bool,
}

impl ConvertArgs {
    /// Defaults taken from the product configuration
    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        Self {
            installations_dir: config.installations_dir(),
            output: config.default_output_path(),
            settings_path: config.settings_path(),
            keep_variables: false,
            allow_latest: true,
            remember_choice: true,
        }
    }

    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            resolve: ResolveOptions {
                allow_latest: self.allow_latest,
                remember_choice: self.remember_choice,
            },
            convert: ConvertOptions {
                renumber_variables: !self.keep_variables,
            },
        }
    }
}

/// [`Prompter`] backed by cliclack text inputs and log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn ask(&mut self, prompt: &str, default: &str) -> io::Result<Option<String>> {
        let mut input = cliclack::input(prompt).required(false);
        if !default.is_empty() {
            input = input.placeholder(default).default_input(default);
        }

        match input.interact::<String>() {
            Ok(answer) => {
                let answer = answer.trim();
                Ok(Some(if answer.is_empty() {
                    default.to_string()
                } else {
                    answer.to_string()
                }))
            }
            // Esc or Ctrl+C inside the widget
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::info(message)
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::warning(message)
    }

    fn note(&mut self, title: &str, body: &str) -> io::Result<()> {
        cliclack::note(title, body)
    }
}

/// Run the conversion with interactive prompts
pub fn run<C: ProductConfig>(config: &C, args: ConvertArgs) -> Result<Outcome, PipelineError> {
    cliclack::intro(config.display_name())?;

    let options = args.pipeline_options();
    let layout = config.layout(args.installations_dir);
    let mut store = JsonSettingsFile::new(args.settings_path, config.settings_key());
    let notifier = default_notifier();

    tracing::debug!(
        installations = %layout.installations_dir().display(),
        settings = %store.path().display(),
        "starting conversion"
    );

    let result = run_pipeline(
        &layout,
        &args.output,
        &mut store,
        ClackPrompter,
        notifier.as_ref(),
        options,
    );

    // The run already has its outcome; a failing outro must not replace it
    match &result {
        Ok(Outcome::Written {
            input,
            output,
            snippets,
        }) => {
            let _ = cliclack::log::success(format!("Read templates from {}", input.display()));
            let _ = cliclack::outro(format!(
                "Wrote {} snippets to {}",
                snippets,
                style(output.display()).cyan()
            ));
        }
        Ok(Outcome::Cancelled) => {
            let _ = cliclack::outro_cancel("Nothing was written.");
        }
        // The notifier has already told the operator
        Err(PipelineError::MissingInput { .. }) => {}
        Err(e) => {
            let _ = cliclack::outro_cancel(e.to_string());
        }
    }

    result
}

/// Show the discovered installations without prompting or writing anything
///
/// Returns the number of installations found.
pub fn list<C: ProductConfig>(
    config: &C,
    installations_dir: PathBuf,
    settings_path: PathBuf,
) -> io::Result<usize> {
    cliclack::intro(config.display_name())?;

    let layout = config.layout(installations_dir);
    let stored = JsonSettingsFile::new(settings_path, config.settings_key()).get();
    let summaries = summarize_installations(&layout, stored.as_deref());

    if summaries.is_empty() {
        cliclack::log::warning(format!(
            "No {} installations found in {}.",
            layout.prefix(),
            layout.installations_dir().display()
        ))?;
    } else {
        let body = summaries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        cliclack::note(
            format!("{} installations (newest first)", layout.prefix()),
            body,
        )?;
    }

    if let Some(stored) = stored {
        cliclack::log::info(format!("Saved version: {}", stored))?;
    }

    cliclack::outro(format!("{} found", summaries.len()))?;
    Ok(summaries.len())
}
