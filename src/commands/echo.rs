use crate::command::{Command, CommandOutcome, CommandResult, ParsedArgs};
use crate::context::SessionState;

/// echo [STRING]...
/// Write arguments separated by single spaces.
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(&self, args: &ParsedArgs, _session: &SessionState) -> CommandResult {
        Ok(CommandOutcome::text(args.positional.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};
    use crate::output::OutputRecord;

    #[test]
    fn test_echo_joins_words() {
        let out = run(&EchoCommand, &["hello", "world"], &session()).unwrap();
        assert_eq!(out.outputs, vec![OutputRecord::text("hello world")]);
    }

    #[test]
    fn test_echo_empty() {
        let out = run(&EchoCommand, &[], &session()).unwrap();
        assert_eq!(out.outputs, vec![OutputRecord::text("")]);
    }
}
