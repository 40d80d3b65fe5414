use crate::animation::AnimationSequence;
use crate::config::ConsoleConfig;
use crate::content::Content;
use crate::context::SessionState;
use crate::error::{ConsoleError, Result};
use crate::output::OutputRecord;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub type CommandResult = Result<CommandOutcome>;

pub trait Command {
    /// Flags this command understands. Anything else is positional.
    fn options(&self) -> &'static [OptionDef] {
        &[]
    }

    fn execute(&self, args: &ParsedArgs, session: &SessionState) -> CommandResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDef {
    pub name: &'static str,
    pub flags: &'static [&'static str],
    pub takes_value: bool,
}

impl OptionDef {
    pub const fn flag(name: &'static str, flags: &'static [&'static str]) -> Self {
        Self { name, flags, takes_value: false }
    }

    pub const fn value(name: &'static str, flags: &'static [&'static str]) -> Self {
        Self { name, flags, takes_value: true }
    }
}

/// Command line tokens split into positionals and recognized options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub positional: Vec<String>,
    options: BTreeMap<&'static str, Option<String>>,
}

impl ParsedArgs {
    pub fn parse(tokens: &[&str], defs: &[OptionDef]) -> Result<Self> {
        let mut parsed = ParsedArgs::default();
        let mut tokens = tokens.iter();
        while let Some(token) = tokens.next() {
            match defs.iter().find(|def| def.flags.contains(token)) {
                Some(def) if def.takes_value => {
                    let value = tokens.next().ok_or_else(|| {
                        ConsoleError::InvalidArguments(format!("option '{}' requires a value", token))
                    })?;
                    parsed.options.insert(def.name, Some(value.to_string()));
                }
                Some(def) => {
                    parsed.options.insert(def.name, None);
                }
                None => parsed.positional.push(token.to_string()),
            }
        }
        Ok(parsed)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(|v| v.as_deref())
    }

    pub fn first(&self) -> Option<&str> {
        self.positional.first().map(String::as_str)
    }
}

/// What a handler hands back to the dispatcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutcome {
    pub outputs: Vec<OutputRecord>,
    pub patch: StatePatch,
    pub effect: Option<Effect>,
}

impl CommandOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self { outputs: vec![OutputRecord::text(content)], ..Self::default() }
    }

    pub fn records(outputs: Vec<OutputRecord>) -> Self {
        Self { outputs, ..Self::default() }
    }

    pub fn with_patch(mut self, patch: StatePatch) -> Self {
        self.patch = patch;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub cwd: Option<String>,
    pub clear_outputs: bool,
}

/// Out-of-band requests to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// play a flipbook instead of printing text
    Animate(Arc<AnimationSequence>),
    /// leave the console page
    Navigate(String),
}

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command + Send + Sync>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: HashMap::new() }
    }

    pub fn register_command(&mut self, name: &str, cmd: Box<dyn Command + Send + Sync>) {
        self.commands.insert(name.to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Command + Send + Sync)> {
        self.commands.get(name).map(|cmd| cmd.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn get_command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// Entries of `other` win over entries with the same name.
    pub fn merge(mut self, other: CommandRegistry) -> Self {
        self.commands.extend(other.commands);
        self
    }

    /// Filesystem navigation, listing, reading, echoing and clearing.
    pub fn builtin() -> Self {
        use crate::commands::*;
        let mut reg = Self::new();
        reg.register_command("cat", Box::new(cat::CatCommand));
        reg.register_command("cd", Box::new(cd::CdCommand));
        reg.register_command("clear", Box::new(clear::ClearCommand));
        reg.register_command("echo", Box::new(echo::EchoCommand));
        reg.register_command("head", Box::new(head::HeadCommand));
        reg.register_command("history", Box::new(history::HistoryCommand));
        reg.register_command("ls", Box::new(ls::LsCommand));
        reg.register_command("printenv", Box::new(printenv::PrintenvCommand));
        reg.register_command("pwd", Box::new(pwd::PwdCommand));
        reg.register_command("tail", Box::new(tail::TailCommand));
        reg.register_command("whoami", Box::new(whoami::WhoamiCommand));
        reg
    }

    /// The site's own commands, built from the bundled content.
    pub fn extensions(content: &Content, config: &ConsoleConfig) -> Self {
        use crate::commands::*;
        let mut reg = Self::new();
        for (name, text) in content.pages() {
            reg.register_command(name, Box::new(pages::PageCommand::new(text)));
        }
        reg.register_command("how", Box::new(how::HowCommand::new(content.how())));
        reg.register_command("help", Box::new(help::HelpCommand));
        reg.register_command(
            "exit",
            Box::new(exit::ExitCommand::new(content.farewell(), &config.exit_location)),
        );
        reg
    }

    pub fn default_commands(content: &Content, config: &ConsoleConfig) -> Self {
        Self::builtin().merge(Self::extensions(content, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFS: &[OptionDef] = &[OptionDef::flag("long", &["-l"]), OptionDef::value("lines", &["-n", "--lines"])];

    #[test]
    fn test_parse_positional_and_flags() {
        let args = ParsedArgs::parse(&["-l", "/usr", "-x"], DEFS).unwrap();
        assert!(args.flag("long"));
        assert_eq!(args.positional, vec!["/usr".to_string(), "-x".to_string()]);
    }

    #[test]
    fn test_parse_value_option() {
        let args = ParsedArgs::parse(&["--lines", "3", "file"], DEFS).unwrap();
        assert_eq!(args.value("lines"), Some("3"));
        assert_eq!(args.first(), Some("file"));
    }

    #[test]
    fn test_parse_missing_value() {
        let err = ParsedArgs::parse(&["-n"], DEFS).unwrap_err();
        assert_eq!(err, ConsoleError::InvalidArguments("option '-n' requires a value".to_string()));
    }

    #[test]
    fn test_no_definitions_means_everything_positional() {
        let args = ParsedArgs::parse(&["-l", "x"], &[]).unwrap();
        assert!(!args.flag("long"));
        assert_eq!(args.positional.len(), 2);
    }

    #[test]
    fn test_merge_overrides() {
        let base = CommandRegistry::builtin();
        let content = Content::bundled().unwrap();
        let merged = base.merge(CommandRegistry::extensions(&content, &ConsoleConfig::default()));
        for name in ["ls", "cd", "cat", "whoami", "printenv", "who", "how", "help", "exit"] {
            assert!(merged.contains(name), "missing {}", name);
        }
        let names = merged.get_command_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
