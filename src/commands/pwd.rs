use crate::command::{Command, CommandOutcome, CommandResult, ParsedArgs};
use crate::context::SessionState;

pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, _args: &ParsedArgs, session: &SessionState) -> CommandResult {
        Ok(CommandOutcome::text(session.cwd()))
    }
}
