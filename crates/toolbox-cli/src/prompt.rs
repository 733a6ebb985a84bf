//! Yes/no confirmation prompts.

use crate::error::{CliError, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Something that can answer an overwrite question
pub trait Confirm {
    /// Ask `question`; only an explicit "y" counts as yes
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Interactive terminal prompt
pub struct TerminalPrompt {
    editor: DefaultEditor,
}

impl TerminalPrompt {
    /// Create a prompt bound to the terminal
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| CliError::Prompt(format!("Failed to initialize editor: {}", e)))?;
        Ok(Self { editor })
    }
}

impl Confirm for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        match self.editor.readline(question) {
            Ok(answer) => Ok(is_yes(&answer)),
            // Ctrl-C / Ctrl-D decline
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
            Err(e) => Err(CliError::Prompt(e.to_string())),
        }
    }
}

/// Answers yes to everything (`--force`)
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
