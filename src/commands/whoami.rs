use super::printenv::USER;
use crate::command::{Command, CommandOutcome, CommandResult, ParsedArgs};
use crate::context::SessionState;

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn execute(&self, _args: &ParsedArgs, _session: &SessionState) -> CommandResult {
        Ok(CommandOutcome::text(USER))
    }
}
