//! Test doubles shared by the unit tests

use crate::notify::Notifier;
use crate::prompt::Prompter;
use crate::settings::{PreferenceStore, SettingsError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

type Hook = Box<dyn FnMut()>;

/// Replays canned answers; an exhausted script behaves like an aborted prompt
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
    infos: Vec<String>,
    warnings: Vec<String>,
    notes: Vec<(String, String)>,
    hooks: Vec<(usize, Hook)>,
}

impl ScriptedPrompter {
    pub fn new<'s>(answers: impl IntoIterator<Item = &'s str>) -> Self {
        Self {
            answers: answers.into_iter().map(str::to_string).collect(),
            ..Default::default()
        }
    }

    /// Run `hook` while the prompt with this zero-based index is being answered
    pub fn on_prompt(&mut self, index: usize, hook: impl FnMut() + 'static) {
        self.hooks.push((index, Box::new(hook)));
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn notes(&self) -> &[(String, String)] {
        &self.notes
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str, default: &str) -> io::Result<Option<String>> {
        let index = self.asked.len();
        self.asked.push(prompt.to_string());

        for (at, hook) in &mut self.hooks {
            if *at == index {
                hook();
            }
        }

        Ok(self.answers.pop_front().map(|answer| {
            let answer = answer.trim();
            if answer.is_empty() {
                default.to_string()
            } else {
                answer.to_string()
            }
        }))
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        self.infos.push(message.to_string());
        Ok(())
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        self.warnings.push(message.to_string());
        Ok(())
    }

    fn note(&mut self, title: &str, body: &str) -> io::Result<()> {
        self.notes.push((title.to_string(), body.to_string()));
        Ok(())
    }
}

/// Remembers every missing-input notification
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    missing: RefCell<Vec<PathBuf>>,
}

impl RecordingNotifier {
    pub fn missing(&self) -> Vec<PathBuf> {
        self.missing.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn missing_input(&self, path: &Path) {
        self.missing.borrow_mut().push(path.to_path_buf());
    }
}

/// A preference that can be read but whose writes always fail
#[derive(Debug, Default)]
pub struct ReadOnlyPreference {
    value: Option<String>,
    attempts: usize,
}

impl ReadOnlyPreference {
    pub fn new(value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
            attempts: 0,
        }
    }

    /// How many times a write was attempted
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl PreferenceStore for ReadOnlyPreference {
    fn get(&self) -> Option<String> {
        self.value.clone()
    }

    fn set(&mut self, _value: &str) -> Result<(), SettingsError> {
        self.attempts += 1;
        Err(SettingsError::Io {
            path: PathBuf::from("/read-only/settings.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system"),
        })
    }
}
