use crate::command::{Command, CommandOutcome, CommandResult, OptionDef, ParsedArgs};
use crate::context::SessionState;
use crate::error::ConsoleError;
use crate::output::OutputRecord;
use crate::vfs::normalize;

/// cat [-n] FILE...
/// Print each file; unreadable ones become an error line and the rest still print.
pub struct CatCommand;

const CAT_OPTIONS: &[OptionDef] = &[OptionDef::flag("number", &["-n", "--number"])];

fn number_lines(text: &str) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| format!("{:6}\t{}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Command for CatCommand {
    fn options(&self) -> &'static [OptionDef] {
        CAT_OPTIONS
    }

    fn execute(&self, args: &ParsedArgs, session: &SessionState) -> CommandResult {
        if args.positional.is_empty() {
            return Err(ConsoleError::InvalidArguments("missing file operand".to_string()));
        }
        let number = args.flag("number");
        let records = args
            .positional
            .iter()
            .map(|path| match session.vfs().read(&normalize(session.cwd(), path)) {
                Ok(text) if number => OutputRecord::text(number_lines(text)),
                Ok(text) => OutputRecord::text(text),
                Err(e) => OutputRecord::error(format!("cat: {}", e)),
            })
            .collect();
        Ok(CommandOutcome::records(records))
    }
}
