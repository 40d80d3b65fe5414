use crate::command::{Command, CommandOutcome, CommandResult, Effect, ParsedArgs};
use crate::context::SessionState;

/// Says goodbye, then asks the host to leave the page.
pub struct ExitCommand {
    farewell: String,
    location: String,
}

impl ExitCommand {
    pub fn new(farewell: &str, location: &str) -> Self {
        Self { farewell: farewell.to_string(), location: location.to_string() }
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &ParsedArgs, _session: &SessionState) -> CommandResult {
        Ok(CommandOutcome::text(self.farewell.clone()).with_effect(Effect::Navigate(self.location.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};
    use crate::output::OutputRecord;

    #[test]
    fn test_exit() {
        let out = run(&ExitCommand::new("bye", "/home"), &[], &session()).unwrap();
        assert_eq!(out.outputs, vec![OutputRecord::text("bye")]);
        assert_eq!(out.effect, Some(Effect::Navigate("/home".to_string())));
    }
}
