use crate::command::{Command, CommandOutcome, CommandResult, ParsedArgs, StatePatch};
use crate::context::SessionState;
use crate::error::ConsoleError;
use crate::vfs::{normalize, HOME};

pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, args: &ParsedArgs, session: &SessionState) -> CommandResult {
        let target = match args.positional.as_slice() {
            [] => HOME.to_string(),
            [path] => normalize(session.cwd(), path),
            _ => return Err(ConsoleError::InvalidArguments("too many arguments".to_string())),
        };

        if !session.vfs().resolve(&target)?.is_dir() {
            return Err(ConsoleError::NotADirectory(target));
        }
        // silent on success
        Ok(CommandOutcome::empty().with_patch(StatePatch { cwd: Some(target), ..StatePatch::default() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{run, session};

    fn cwd_after(tokens: &[&str], from: &str) -> Option<String> {
        run(&CdCommand, tokens, &session().with_cwd(from)).unwrap().patch.cwd
    }

    #[test]
    fn test_cd_absolute_and_relative() {
        assert_eq!(cwd_after(&["/usr"], "/"), Some("/usr".to_string()));
        assert_eq!(cwd_after(&["seegrand"], "/usr"), Some("/usr/seegrand".to_string()));
        assert_eq!(cwd_after(&[".."], "/usr/seegrand"), Some("/usr".to_string()));
        assert_eq!(cwd_after(&[".."], "/"), Some("/".to_string()));
    }

    #[test]
    fn test_cd_home() {
        assert_eq!(cwd_after(&[], "/usr"), Some(HOME.to_string()));
        assert_eq!(cwd_after(&["~"], "/usr"), Some(HOME.to_string()));
    }

    #[test]
    fn test_cd_into_file() {
        let err = run(&CdCommand, &["README"], &session()).unwrap_err();
        assert_eq!(err, ConsoleError::NotADirectory("/README".into()));
    }

    #[test]
    fn test_cd_missing() {
        let err = run(&CdCommand, &["/nope"], &session()).unwrap_err();
        assert_eq!(err, ConsoleError::PathNotFound("/nope".into()));
    }

    #[test]
    fn test_cd_too_many() {
        let err = run(&CdCommand, &["/usr", "/var"], &session()).unwrap_err();
        assert_eq!(err.to_string(), "too many arguments");
    }

    #[test]
    fn test_cd_prints_nothing() {
        let out = run(&CdCommand, &["/usr"], &session()).unwrap();
        assert!(out.outputs.is_empty());
    }
}
