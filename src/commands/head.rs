use super::line_count;
use crate::command::{Command, CommandOutcome, CommandResult, OptionDef, ParsedArgs};
use crate::context::SessionState;
use crate::error::ConsoleError;
use crate::vfs::normalize;

/// head [-n N] FILE
pub struct HeadCommand;

pub(crate) const LINES_OPTIONS: &[OptionDef] = &[OptionDef::value("lines", &["-n", "--lines"])];

impl Command for HeadCommand {
    fn options(&self) -> &'static [OptionDef] {
        LINES_OPTIONS
    }

    fn execute(&self, args: &ParsedArgs, session: &SessionState) -> CommandResult {
        let [path] = args.positional.as_slice() else {
            return Err(ConsoleError::InvalidArguments("usage: head [-n N] FILE".to_string()));
        };
        let count = line_count(args.value("lines"))?;
        let text = session.vfs().read(&normalize(session.cwd(), path))?;
        let out: Vec<&str> = text.split('\n').take(count).collect();
        Ok(CommandOutcome::text(out.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};
    use crate::output::OutputRecord;
    use crate::vfs::{SeedEntry, VirtualFileSystem};
    use crate::command::CommandRegistry;

    fn numbered() -> SessionState {
        let body: Vec<String> = (1..=15).map(|i| i.to_string()).collect();
        let vfs = VirtualFileSystem::from_seed(&[SeedEntry::file("/nums", &body.join("\n"))]).unwrap();
        SessionState::new(vfs, CommandRegistry::new())
    }

    #[test]
    fn test_head_default_ten() {
        let out = run(&HeadCommand, &["nums"], &numbered()).unwrap();
        assert_eq!(out.outputs[0].content().lines().count(), 10);
        assert!(out.outputs[0].content().ends_with("10"));
    }

    #[test]
    fn test_head_n() {
        let out = run(&HeadCommand, &["-n", "2", "/nums"], &numbered()).unwrap();
        assert_eq!(out.outputs, vec![OutputRecord::text("1\n2")]);
    }

    #[test]
    fn test_head_bad_count() {
        let err = run(&HeadCommand, &["-n", "x", "/nums"], &numbered()).unwrap_err();
        assert_eq!(err.to_string(), "invalid number of lines: 'x'");
    }

    #[test]
    fn test_head_directory() {
        let err = run(&HeadCommand, &["/usr"], &session()).unwrap_err();
        assert_eq!(err, ConsoleError::NotAFile("/usr".into()));
    }
}
