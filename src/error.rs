use std::fmt;

/// Everything that can go wrong while running a console command.
///
/// None of these are fatal: the dispatcher turns each one into a single
/// error line and the session stays usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    CommandNotFound(String),
    PathNotFound(String),
    NotADirectory(String),
    NotAFile(String),
    PermissionDenied(String),
    AlreadyExists(String),
    InvalidArguments(String),
    /// bundled static content could not be loaded
    Content(String),
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::CommandNotFound(name) => write!(f, "{}: command not found", name),
            ConsoleError::PathNotFound(path) => write!(f, "{}: No such file or directory", path),
            ConsoleError::NotADirectory(path) => write!(f, "{}: Not a directory", path),
            ConsoleError::NotAFile(path) => write!(f, "{}: Is a directory", path),
            ConsoleError::PermissionDenied(path) => write!(f, "{}: Permission denied", path),
            ConsoleError::AlreadyExists(path) => write!(f, "{}: File exists", path),
            ConsoleError::InvalidArguments(msg) => f.write_str(msg),
            ConsoleError::Content(msg) => write!(f, "content error: {}", msg),
            ConsoleError::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for ConsoleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_like_messages() {
        assert_eq!(ConsoleError::CommandNotFound("bogus".into()).to_string(), "bogus: command not found");
        assert_eq!(ConsoleError::PathNotFound("/nope".into()).to_string(), "/nope: No such file or directory");
        assert_eq!(ConsoleError::NotAFile("/usr".into()).to_string(), "/usr: Is a directory");
        assert_eq!(ConsoleError::PermissionDenied("/README".into()).to_string(), "/README: Permission denied");
    }
}
