use crate::animation::AnimationSequence;
use crate::command::{Command, CommandOutcome, CommandResult, Effect, ParsedArgs};
use crate::context::SessionState;
use std::sync::Arc;

/// Plays the bundled flipbook. Prints nothing itself.
pub struct HowCommand {
    sequence: Arc<AnimationSequence>,
}

impl HowCommand {
    pub fn new(sequence: Arc<AnimationSequence>) -> Self {
        Self { sequence }
    }
}

impl Command for HowCommand {
    fn execute(&self, _args: &ParsedArgs, _session: &SessionState) -> CommandResult {
        Ok(CommandOutcome::empty().with_effect(Effect::Animate(Arc::clone(&self.sequence))))
    }
}
