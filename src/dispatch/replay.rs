use super::{CommandError, EXECUTE_HISTORY_COMMAND};
use crate::command::Command;
use crate::history::History;

/// The `!` builtin: resolves its single argument as a 1-based history index
/// and hands the stored command back for normal dispatch.
///
/// A stored `!` is refused outright instead of resolved again, so a replay
/// is always a single indirection.
pub(super) fn resolve<'a>(
    history: &'a History,
    args: &[String],
) -> Result<&'a Command, CommandError> {
    if args.len() > 1 {
        return Err(CommandError::TooManyParameters(EXECUTE_HISTORY_COMMAND));
    }
    let arg = args
        .first()
        .ok_or(CommandError::MissingParameter(EXECUTE_HISTORY_COMMAND))?;

    let out_of_range = || CommandError::ReplayOutOfRange {
        min: usize::from(!history.is_empty()),
        max: history.len(),
    };

    let display_index: usize = arg.parse().map_err(|_| out_of_range())?;
    let entry = history.get(display_index).ok_or_else(out_of_range)?;

    if entry.name == EXECUTE_HISTORY_COMMAND {
        return Err(CommandError::RecursiveReplay);
    }

    Ok(entry)
}
