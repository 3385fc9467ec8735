//! Reporting a missing template document to the operator

use colored::Colorize;
use std::path::Path;

/// Escalation channel for a missing input document
///
/// Implementations must not fail or panic: the caller exits with the same
/// code whatever happens here.
pub trait Notifier {
    fn missing_input(&self, path: &Path);
}

/// Plain stderr message
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn missing_input(&self, path: &Path) {
        eprintln!(
            "{} Input file not found: {}",
            "[ERROR]".red().bold(),
            path.display()
        );
    }
}

/// Native error dialog on top of the console message
///
/// The console line is always written: on a headless or portal-less desktop
/// the dialog can return without showing anything.
#[cfg(feature = "dialog")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogNotifier;

#[cfg(feature = "dialog")]
impl Notifier for DialogNotifier {
    fn missing_input(&self, path: &Path) {
        escalate(&ConsoleNotifier, path, |description| {
            let answer = rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Input file missing")
                .set_description(description)
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
            tracing::debug!(?answer, "native dialog closed");
        });
    }
}

/// Report through `console`, then try `show`; a panicking `show` is contained
#[cfg(feature = "dialog")]
fn escalate<N, F>(console: &N, path: &Path, show: F)
where
    N: Notifier + ?Sized,
    F: FnOnce(&str) + std::panic::UnwindSafe,
{
    console.missing_input(path);

    let description = format!("Input file not found:\n{}", path.display());
    if std::panic::catch_unwind(move || show(&description)).is_err() {
        tracing::debug!("native dialog unavailable");
    }
}

/// The best notifier this build supports
pub fn default_notifier() -> Box<dyn Notifier> {
    #[cfg(feature = "dialog")]
    {
        Box::new(DialogNotifier)
    }
    #[cfg(not(feature = "dialog"))]
    {
        Box::new(ConsoleNotifier)
    }
}
