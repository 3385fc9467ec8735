//! End-to-end conversion run: resolve the input, convert it, write the output
//!
//! Each failure point maps to its own [`PipelineError`] variant and exit code.
//! Cancellation by the operator is a successful [`Outcome::Cancelled`] and
//! leaves the output file untouched.

use crate::error::PipelineError;
use crate::notify::Notifier;
use crate::prompt::Prompter;
use crate::settings::PreferenceStore;
use crate::templates::{convert_file, write_snippets, ConvertOptions};
use crate::version::{InstallLayout, Resolution, ResolveOptions, VersionResolver};
use std::path::{Path, PathBuf};

/// Options for one conversion run
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub resolve: ResolveOptions,
    pub convert: ConvertOptions,
}

/// Successful end states of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operator cancelled; nothing was written
    Cancelled,
    /// The snippets file was written
    Written {
        input: PathBuf,
        output: PathBuf,
        snippets: usize,
    },
}

/// Run the whole conversion
pub fn run_pipeline<S, P, N>(
    layout: &InstallLayout,
    output: &Path,
    store: S,
    prompter: P,
    notifier: &N,
    options: PipelineOptions,
) -> Result<Outcome, PipelineError>
where
    S: PreferenceStore,
    P: Prompter,
    N: Notifier + ?Sized,
{
    let resolution = VersionResolver::new(layout, store, prompter, options.resolve).resolve()?;

    let input = match resolution {
        Resolution::Finalized(chosen) => chosen.path,
        Resolution::Cancelled => {
            tracing::info!("cancelled by operator, nothing written");
            return Ok(Outcome::Cancelled);
        }
    };

    if !input.exists() {
        tracing::error!(path = %input.display(), "input file not found");
        notifier.missing_input(&input);
        return Err(PipelineError::MissingInput { path: input });
    }

    let snippets = convert_file(&input, options.convert).map_err(|e| {
        tracing::error!(error = %e, "conversion failed");
        e
    })?;

    write_snippets(output, &snippets).map_err(|e| {
        tracing::error!(error = %e, "writing snippets failed");
        e
    })?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        snippets = snippets.len(),
        "conversion complete"
    );

    Ok(Outcome::Written {
        input,
        output: output.to_path_buf(),
        snippets: snippets.len(),
    })
}
