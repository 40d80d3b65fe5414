use crate::command::{Command, CommandOutcome, CommandResult, OptionDef, ParsedArgs};
use crate::context::SessionState;
use crate::error::ConsoleError;
use crate::vfs::{normalize, VfsNode};
use chrono::{DateTime, Local};

/// ls [-l] [-a] [PATH]
pub struct LsCommand;

const LS_OPTIONS: &[OptionDef] = &[OptionDef::flag("long", &["-l"]), OptionDef::flag("all", &["-a"])];

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn display_name(node: &VfsNode) -> String {
    if node.is_dir() {
        format!("{}/", node.name())
    } else {
        node.name().to_string()
    }
}

fn mode_string(node: &VfsNode) -> String {
    let kind = if node.is_dir() { 'd' } else { '-' };
    let write = if node.can_modify() { 'w' } else { '-' };
    format!("{}r{}", kind, write)
}

fn format_time(dt: &DateTime<Local>) -> String {
    dt.format("%b %e %H:%M").to_string()
}

impl Command for LsCommand {
    fn options(&self) -> &'static [OptionDef] {
        LS_OPTIONS
    }

    fn execute(&self, args: &ParsedArgs, session: &SessionState) -> CommandResult {
        if args.positional.len() > 1 {
            return Err(ConsoleError::InvalidArguments("too many arguments".to_string()));
        }
        let show_all = args.flag("all");
        let target = normalize(session.cwd(), args.first().unwrap_or("."));
        let node = session.vfs().resolve(&target)?;

        let entries: Vec<&VfsNode> = match node {
            VfsNode::Directory { children, .. } => children
                .values()
                .filter(|child| show_all || !is_hidden(child.name()))
                .collect(),
            // a file lists as itself
            VfsNode::File { .. } => vec![node],
        };
        if entries.is_empty() {
            return Ok(CommandOutcome::empty());
        }

        let lines: Vec<String> = if args.flag("long") {
            entries
                .iter()
                .map(|n| format!("{} {:>6} {} {}", mode_string(n), n.size(), format_time(n.mtime()), display_name(n)))
                .collect()
        } else {
            entries.iter().map(|n| display_name(n)).collect()
        };
        Ok(CommandOutcome::text(lines.join("\n")))
    }
}
