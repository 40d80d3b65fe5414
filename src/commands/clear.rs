use crate::command::{Command, CommandOutcome, CommandResult, ParsedArgs, StatePatch};
use crate::context::SessionState;

/// Empties the output log. The renderer sees the shorter log and wipes the screen.
pub struct ClearCommand;

impl Command for ClearCommand {
    fn execute(&self, _args: &ParsedArgs, _session: &SessionState) -> CommandResult {
        Ok(CommandOutcome::empty().with_patch(StatePatch { clear_outputs: true, ..StatePatch::default() }))
    }
}
