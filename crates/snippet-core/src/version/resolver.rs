//! Interactive resolution of the installation to read templates from
//!
//! Resolution runs as a small state machine:
//!
//! ```text
//! ResolvePreference ──(none stored)──> ResolveLatestScan ──(nothing found)──> ResolveManualEntry
//!        │                                   │                                     │
//!        └──────────────────────────────> Confirm <────────────────────────────────┘
//!                                            │ accept ──────────────> Finalized
//!                                            │ latest ─(accepted)───> Finalized
//!                                            └ reject ──> NumberedSelection ──(confirmed)──> Finalized
//! ```
//!
//! Any interactive step can end in `Cancelled`, which is a normal outcome.

use super::layout::{CandidatePath, InstallLayout};
use super::scanner::{pick_latest, sort_descending};
use super::Version;
use crate::prompt::{is_yes, Prompter};
use crate::settings::PreferenceStore;
use std::io;

/// Knobs for the Confirm / NumberedSelection steps
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    /// Offer the `latest` answer at the Confirm step
    pub allow_latest: bool,
    /// Persist versions chosen at Confirm / NumberedSelection
    pub remember_choice: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            allow_latest: true,
            remember_choice: true,
        }
    }
}

/// Final outcome of a resolution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Finalized(CandidatePath),
    Cancelled,
}

#[derive(Debug)]
enum State {
    ResolvePreference,
    ResolveLatestScan,
    ResolveManualEntry,
    Confirm(CandidatePath),
    NumberedSelection(CandidatePath),
    Finalized(CandidatePath),
    Cancelled,
}

/// Drives one resolution pass against a layout, a preference store and a prompter
pub struct VersionResolver<'a, S, P> {
    layout: &'a InstallLayout,
    store: S,
    prompter: P,
    options: ResolveOptions,
}

/// Unwrap a prompt answer, moving to `Cancelled` when the operator aborted
macro_rules! answer_or_cancel {
    ($answer:expr) => {
        match $answer? {
            Some(answer) => answer,
            None => return Ok(State::Cancelled),
        }
    };
}

impl<'a, S: PreferenceStore, P: Prompter> VersionResolver<'a, S, P> {
    pub fn new(layout: &'a InstallLayout, store: S, prompter: P, options: ResolveOptions) -> Self {
        Self {
            layout,
            store,
            prompter,
            options,
        }
    }

    /// Run the state machine to completion
    pub fn resolve(mut self) -> io::Result<Resolution> {
        let mut state = State::ResolvePreference;

        loop {
            tracing::trace!(?state, "resolver step");
            state = match state {
                State::ResolvePreference => self.resolve_preference(),
                State::ResolveLatestScan => self.resolve_latest_scan()?,
                State::ResolveManualEntry => self.resolve_manual_entry()?,
                State::Confirm(current) => self.confirm(current)?,
                State::NumberedSelection(current) => self.numbered_selection(&current)?,
                State::Finalized(chosen) => {
                    tracing::debug!(version = %chosen.version, path = %chosen.path.display(), "resolved input");
                    return Ok(Resolution::Finalized(chosen));
                }
                State::Cancelled => {
                    self.prompter.info("Cancelled.")?;
                    return Ok(Resolution::Cancelled);
                }
            };
        }
    }

    fn label(&self) -> &'a str {
        self.layout.prefix()
    }

    /// Store the version; a failed write is only a warning
    fn persist(&mut self, version: Version) -> io::Result<()> {
        if let Err(e) = self.store.set(&version.to_string()) {
            tracing::warn!(error = %e, "could not save selected version");
            self.prompter
                .warn(&format!("Could not save the selected version: {}", e))?;
        }
        Ok(())
    }

    fn not_found_message(&self) -> String {
        format!(
            "No {} installations found in {}.",
            self.label(),
            self.layout.installations_dir().display()
        )
    }

    fn resolve_preference(&mut self) -> State {
        let Some(stored) = self.store.get() else {
            return State::ResolveLatestScan;
        };

        match stored.parse::<Version>() {
            Ok(version) => {
                tracing::debug!(%version, "using stored preference");
                State::Confirm(self.layout.candidate(version))
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring stored preference");
                State::ResolveLatestScan
            }
        }
    }

    fn resolve_latest_scan(&mut self) -> io::Result<State> {
        let found = self.layout.scan();

        match pick_latest(&found) {
            Some(latest) => {
                self.persist(latest)?;
                let message = format!(
                    "No saved choice yet, selected the newest {} version ({}).",
                    self.label(),
                    latest
                );
                self.prompter.info(&message)?;
                Ok(State::Confirm(self.layout.candidate(latest)))
            }
            None => {
                let message = self.not_found_message();
                self.prompter.warn(&message)?;
                Ok(State::ResolveManualEntry)
            }
        }
    }

    fn resolve_manual_entry(&mut self) -> io::Result<State> {
        let prompt = format!(
            "Enter the {} version manually (e.g. 2026.2, Enter to cancel)",
            self.label()
        );

        loop {
            let answer = answer_or_cancel!(self.prompter.ask(&prompt, ""));
            if answer.is_empty() {
                return Ok(State::Cancelled);
            }

            match answer.parse::<Version>() {
                Ok(version) => {
                    self.persist(version)?;
                    return Ok(State::Confirm(self.layout.candidate(version)));
                }
                Err(e) => self.prompter.warn(&e.to_string())?,
            }
        }
    }

    fn confirm(&mut self, current: CandidatePath) -> io::Result<State> {
        let detected = format!("Detected {} version: {}", self.label(), current.version);
        self.prompter.info(&detected)?;

        let choices = if self.options.allow_latest {
            "y/n/latest"
        } else {
            "y/n"
        };
        let answer = answer_or_cancel!(self
            .prompter
            .ask(&format!("Proceed with this version? ({})", choices), "y"));

        if is_yes(&answer) {
            return Ok(State::Finalized(current));
        }

        if self.options.allow_latest && answer.eq_ignore_ascii_case("latest") {
            match pick_latest(&self.layout.scan()) {
                Some(latest) => {
                    let proposed = self.layout.retarget(&current, latest);
                    self.prompter
                        .info(&format!("Newest version detected: {}", latest))?;

                    match self.confirm_change(&proposed)? {
                        Some(true) => {
                            if self.options.remember_choice {
                                self.persist(latest)?;
                            }
                            return Ok(State::Finalized(proposed));
                        }
                        Some(false) => {}
                        None => return Ok(State::Cancelled),
                    }
                }
                None => {
                    let message = format!(
                        "No {} installations found, switching to numbered selection / manual entry.",
                        self.label()
                    );
                    self.prompter.warn(&message)?;
                }
            }
        }

        Ok(State::NumberedSelection(current))
    }

    /// Show the new path and ask for a final yes/no (default yes)
    fn confirm_change(&mut self, proposed: &CandidatePath) -> io::Result<Option<bool>> {
        self.prompter.info(&format!(
            "Input path will change to:\n{}",
            proposed.path.display()
        ))?;

        Ok(self
            .prompter
            .ask("Proceed? (y/n)", "y")?
            .map(|answer| is_yes(&answer)))
    }

    /// Confirm a version picked from the menu; declining cancels the whole run
    fn confirm_selection(&mut self, current: &CandidatePath, version: Version) -> io::Result<State> {
        let proposed = self.layout.retarget(current, version);

        match self.confirm_change(&proposed)? {
            Some(true) => {
                if self.options.remember_choice {
                    self.persist(version)?;
                }
                Ok(State::Finalized(proposed))
            }
            Some(false) | None => Ok(State::Cancelled),
        }
    }

    fn numbered_selection(&mut self, current: &CandidatePath) -> io::Result<State> {
        loop {
            let found = sort_descending(self.layout.scan());

            if found.is_empty() {
                let message = self.not_found_message();
                self.prompter.warn(&message)?;

                let answer =
                    answer_or_cancel!(self.prompter.ask("Manual version (YYYY.X), Enter to cancel", ""));
                if answer.is_empty() {
                    return Ok(State::Cancelled);
                }
                match answer.parse::<Version>() {
                    Ok(version) => return self.confirm_selection(current, version),
                    Err(e) => {
                        self.prompter.warn(&e.to_string())?;
                        continue;
                    }
                }
            }

            let menu = found
                .iter()
                .enumerate()
                .map(|(idx, candidate)| format!("{}. {}", idx + 1, candidate.version))
                .chain([
                    "m. enter a version manually (YYYY.X)".to_string(),
                    "r. rescan".to_string(),
                    "Enter. cancel".to_string(),
                ])
                .collect::<Vec<_>>()
                .join("\n");
            let title = format!("Available {} versions (newest first)", self.label());
            self.prompter.note(&title, &menu)?;

            let answer = answer_or_cancel!(self.prompter.ask("Select a number", "")).to_lowercase();

            match answer.as_str() {
                "" => return Ok(State::Cancelled),
                "r" => continue,
                "m" => {
                    let manual = answer_or_cancel!(self.prompter.ask("Version (e.g. 2026.2)", ""));
                    match manual.parse::<Version>() {
                        Ok(version) => return self.confirm_selection(current, version),
                        Err(e) => self.prompter.warn(&e.to_string())?,
                    }
                }
                digits if digits.chars().all(|c| c.is_ascii_digit()) => {
                    match digits.parse::<usize>() {
                        Ok(n) if (1..=found.len()).contains(&n) => {
                            return self.confirm_selection(current, found[n - 1].version);
                        }
                        _ => self.prompter.warn(&format!(
                            "Selection out of range, choose 1-{}.",
                            found.len()
                        ))?,
                    }
                }
                _ => self.prompter.warn("Invalid input.")?,
            }
        }
    }
}
