use crate::command::{Command, CommandOutcome, CommandResult, ParsedArgs};
use crate::context::SessionState;
use crate::error::ConsoleError;

pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, args: &ParsedArgs, session: &SessionState) -> CommandResult {
        if !args.positional.is_empty() {
            return Err(ConsoleError::InvalidArguments("usage: history".to_string()));
        }
        // the line running this command is already recorded
        let out = session
            .history()
            .iter()
            .enumerate()
            .map(|(i, cmd)| format!("{:4}  {}", i + 1, cmd))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(CommandOutcome::text(out))
    }
}
