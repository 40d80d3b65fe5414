use crate::command::{CommandRegistry, StatePatch};
use crate::output::OutputRecord;
use crate::vfs::VirtualFileSystem;
use std::sync::Arc;

/// Immutable snapshot of the console.
///
/// Every `with_*` method returns a new snapshot and leaves `self` alone.
/// The filesystem and command table are shared between snapshots; the
/// output log and history are copied on write.
#[derive(Clone)]
pub struct SessionState {
    vfs: Arc<VirtualFileSystem>,
    commands: Arc<CommandRegistry>,
    outputs: Arc<Vec<OutputRecord>>,
    history: Arc<Vec<String>>,
    cwd: String,
}

impl SessionState {
    pub fn new(vfs: VirtualFileSystem, commands: CommandRegistry) -> Self {
        Self {
            vfs: Arc::new(vfs),
            commands: Arc::new(commands),
            outputs: Arc::new(Vec::new()),
            history: Arc::new(Vec::new()),
            cwd: "/".to_string(),
        }
    }

    pub fn vfs(&self) -> &VirtualFileSystem {
        &self.vfs
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn outputs(&self) -> &[OutputRecord] {
        &self.outputs
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Replaces the whole log, e.g. with the welcome banner.
    pub fn with_outputs(&self, outputs: Vec<OutputRecord>) -> Self {
        let mut next = self.clone();
        next.outputs = Arc::new(outputs);
        next
    }

    pub fn with_appended(&self, records: impl IntoIterator<Item = OutputRecord>) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.outputs).extend(records);
        next
    }

    pub fn with_cwd(&self, cwd: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.cwd = cwd.into();
        next
    }

    pub fn with_history_entry(&self, line: &str) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.history).push(line.to_string());
        next
    }

    pub fn cleared(&self) -> Self {
        self.with_outputs(Vec::new())
    }

    pub fn apply(&self, patch: &StatePatch) -> Self {
        let mut next = if patch.clear_outputs { self.cleared() } else { self.clone() };
        if let Some(cwd) = &patch.cwd {
            next.cwd = cwd.clone();
        }
        next
    }

    /// true when both snapshots point at the same filesystem
    pub fn shares_vfs_with(&self, other: &SessionState) -> bool {
        Arc::ptr_eq(&self.vfs, &other.vfs)
    }
}
