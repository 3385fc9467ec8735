//! Line-based operator interaction used by the version resolver

use std::io;

/// Blocking, line-oriented prompts plus plain status output
///
/// The interactive front end implements this on top of the terminal; tests
/// substitute a script of canned answers.
pub trait Prompter {
    /// Ask for one line of input.
    ///
    /// Returns the trimmed answer, `default` when the answer is empty, or
    /// `None` when the operator aborted the prompt.
    fn ask(&mut self, prompt: &str, default: &str) -> io::Result<Option<String>>;

    fn info(&mut self, message: &str) -> io::Result<()>;

    fn warn(&mut self, message: &str) -> io::Result<()>;

    /// Show a titled block of text, such as a numbered menu
    fn note(&mut self, title: &str, body: &str) -> io::Result<()>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask(&mut self, prompt: &str, default: &str) -> io::Result<Option<String>> {
        (**self).ask(prompt, default)
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        (**self).info(message)
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        (**self).warn(message)
    }

    fn note(&mut self, title: &str, body: &str) -> io::Result<()> {
        (**self).note(title, body)
    }
}

/// True for the answers that accept a yes/no question
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "" | "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        for answer in ["", "y", "Y", "yes", "YES", "Yes"] {
            assert!(is_yes(answer), "{answer:?}");
        }
        for answer in ["n", "no", "latest", "yep", "1"] {
            assert!(!is_yes(answer), "{answer:?}");
        }
    }
}
