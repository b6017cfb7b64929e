//! Yes/no confirmation before steps that change something.
use std::io::{self, BufRead, Write};

/// A yes/no gate.
pub trait Confirm {
    /// Ask `question`; `true` means go ahead.
    fn confirm(&self, question: &str) -> bool;
}

/// Asks on the terminal and reads the answer from stdin.
///
/// Only `y` or `yes` (any case) count as yes. Anything else, including an
/// empty line, end of input or a read error, is no.
#[derive(Debug, Default, Clone, Copy)]
pub struct Prompt;

impl Confirm for Prompt {
    fn confirm(&self, question: &str) -> bool {
        ask(&mut io::stdin().lock(), &mut io::stdout(), question).unwrap_or(false)
    }
}

/// Answers yes to everything; used for `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, question: &str) -> bool {
        tracing::debug!("{question} [assumed yes]");
        true
    }
}

/// Write `question` with a `[y/N]` hint to `output` and read one answer
/// line from `input`.
///
/// # Errors
///
/// Returns an error if writing the question or reading the answer fails.
pub fn ask(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> io::Result<bool> {
    output.write_all(format!("{question} [y/N] ").as_bytes())?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

/// Whether `answer` means yes.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
