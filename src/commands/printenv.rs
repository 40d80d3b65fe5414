use crate::command::{Command, CommandOutcome, CommandResult, ParsedArgs};
use crate::context::SessionState;
use crate::vfs::HOME;

/// login name reported by whoami and USER
pub const USER: &str = "root";

/// printenv [NAME]...
/// Without names prints every variable as NAME=VALUE; unknown names print nothing.
pub struct PrintenvCommand;

/// The variables the console exposes, in print order.
pub fn environment(session: &SessionState) -> Vec<(&'static str, String)> {
    vec![
        ("HOME", HOME.to_string()),
        ("PWD", session.cwd().to_string()),
        ("USER", USER.to_string()),
    ]
}

impl Command for PrintenvCommand {
    fn execute(&self, args: &ParsedArgs, session: &SessionState) -> CommandResult {
        let env = environment(session);
        let lines: Vec<String> = if args.positional.is_empty() {
            env.iter().map(|(name, value)| format!("{}={}", name, value)).collect()
        } else {
            args.positional
                .iter()
                .filter_map(|wanted| env.iter().find(|(name, _)| *name == wanted.as_str()).map(|(_, v)| v.clone()))
                .collect()
        };
        if lines.is_empty() {
            return Ok(CommandOutcome::empty());
        }
        Ok(CommandOutcome::text(lines.join("\n")))
    }
}
