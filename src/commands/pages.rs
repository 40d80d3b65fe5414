use crate::command::{Command, CommandOutcome, CommandResult, ParsedArgs};
use crate::context::SessionState;

/// Prints a fixed block of text (who, what, where...).
pub struct PageCommand {
    text: String,
}

impl PageCommand {
    pub fn new(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}

impl Command for PageCommand {
    fn execute(&self, _args: &ParsedArgs, _session: &SessionState) -> CommandResult {
        Ok(CommandOutcome::text(self.text.clone()))
    }
}
