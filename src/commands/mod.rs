// builtins
pub mod cat;
pub mod cd;
pub mod clear;
pub mod echo;
pub mod head;
pub mod history;
pub mod ls;
pub mod printenv;
pub mod pwd;
pub mod tail;
pub mod whoami;

// site commands
pub mod exit;
pub mod help;
pub mod how;
pub mod pages;

use crate::error::{ConsoleError, Result};

/// Parses the `-n` value shared by head and tail.
pub(crate) fn line_count(value: Option<&str>) -> Result<usize> {
    match value {
        None => Ok(10),
        Some(v) => v
            .parse()
            .map_err(|_| ConsoleError::InvalidArguments(format!("invalid number of lines: '{}'", v))),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::command::{Command, CommandRegistry, CommandResult, ParsedArgs};
    use crate::config::ConsoleConfig;
    use crate::content::Content;
    use crate::context::SessionState;
    use crate::vfs::VirtualFileSystem;

    pub fn session() -> SessionState {
        let content = Content::bundled().unwrap();
        let vfs = VirtualFileSystem::from_seed(content.filesystem()).unwrap();
        SessionState::new(vfs, CommandRegistry::default_commands(&content, &ConsoleConfig::default()))
    }

    pub fn run(cmd: &dyn Command, tokens: &[&str], session: &SessionState) -> CommandResult {
        let args = ParsedArgs::parse(tokens, cmd.options())?;
        cmd.execute(&args, session)
    }
}
