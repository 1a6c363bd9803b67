use std::io::{self, BufRead, Write};

/// User-facing confirmation and notice capability, injected into the
/// controller so it can be swapped for a scripted double in tests.
pub trait UserPrompt {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Stdin/stderr-backed prompt for the CLI. `assume_yes` maps the
/// `--yes` flag onto every confirmation.
#[derive(Debug, Clone)]
pub struct TerminalPrompt {
    pub assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl UserPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{message} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        )
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}
