use crate::command::{CommandOutcome, Effect, ParsedArgs};
use crate::context::SessionState;
use crate::error::ConsoleError;
use crate::output::OutputRecord;
use tracing::{debug, warn};

/// Result of running one input line.
pub struct Execution {
    pub session: SessionState,
    /// records appended to the log by this line, header first
    pub emitted: Vec<OutputRecord>,
    pub effect: Option<Effect>,
}

/// Runs `raw` against `session` and returns the next snapshot.
///
/// The line is always echoed as a header first, blank lines and unknown
/// commands included. Handler errors become a single error record.
pub fn execute(session: &SessionState, raw: &str) -> Execution {
    let base = session.with_history_entry(raw);
    let mut emitted = vec![OutputRecord::header(raw)];

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let Some((name, rest)) = tokens.split_first() else {
        debug!("blank line");
        return Execution { session: base.with_appended(emitted.clone()), emitted, effect: None };
    };

    debug!(command = name, args = rest.len(), "dispatching");
    match run(&base, name, rest) {
        Ok(outcome) => {
            let next = base.apply(&outcome.patch);
            if outcome.patch.clear_outputs {
                // the reset takes the header with it
                emitted.clear();
            }
            emitted.extend(outcome.outputs);
            Execution {
                session: next.with_appended(emitted.clone()),
                emitted,
                effect: outcome.effect,
            }
        }
        Err(err) => {
            warn!(command = name, error = %err, "command failed");
            emitted.push(OutputRecord::error(describe(name, &err)));
            Execution { session: base.with_appended(emitted.clone()), emitted, effect: None }
        }
    }
}

fn run(session: &SessionState, name: &str, rest: &[&str]) -> Result<CommandOutcome, ConsoleError> {
    let command = session
        .commands()
        .get(name)
        .ok_or_else(|| ConsoleError::CommandNotFound(name.to_string()))?;
    let args = ParsedArgs::parse(rest, command.options())?;
    command.execute(&args, session)
}

fn describe(name: &str, err: &ConsoleError) -> String {
    match err {
        ConsoleError::CommandNotFound(_) => err.to_string(),
        _ => format!("{}: {}", name, err),
    }
}
