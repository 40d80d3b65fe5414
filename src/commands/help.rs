use crate::command::{Command, CommandOutcome, CommandResult, ParsedArgs};
use crate::context::SessionState;

const HELP_HEADER: &str = "The following commands are available:";

pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, _args: &ParsedArgs, session: &SessionState) -> CommandResult {
        let mut lines = vec![HELP_HEADER.to_string()];
        lines.extend(session.commands().get_command_names().into_iter().map(|name| format!("    - {}", name)));
        Ok(CommandOutcome::text(lines.join("\n")))
    }
}
