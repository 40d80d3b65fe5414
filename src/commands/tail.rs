use super::head::LINES_OPTIONS;
use super::line_count;
use crate::command::{Command, CommandOutcome, CommandResult, OptionDef, ParsedArgs};
use crate::context::SessionState;
use crate::error::ConsoleError;
use crate::vfs::normalize;

/// tail [-n N] FILE
pub struct TailCommand;

impl Command for TailCommand {
    fn options(&self) -> &'static [OptionDef] {
        LINES_OPTIONS
    }

    fn execute(&self, args: &ParsedArgs, session: &SessionState) -> CommandResult {
        let [path] = args.positional.as_slice() else {
            return Err(ConsoleError::InvalidArguments("usage: tail [-n N] FILE".to_string()));
        };
        let count = line_count(args.value("lines"))?;
        let text = session.vfs().read(&normalize(session.cwd(), path))?;
        let lines: Vec<&str> = text.split('\n').collect();
        let start = lines.len().saturating_sub(count);
        Ok(CommandOutcome::text(lines[start..].join("\n")))
    }
}
