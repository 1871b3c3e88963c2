use super::{CommandError, DISPLAY_HISTORY_COMMAND};
use crate::history::{History, HISTORY_DEFAULT_DISPLAY_SIZE, HISTORY_MAX_SIZE};
use crate::SHELL_NAME;

/// The `history` builtin: prints the most recent entries, oldest of them
/// first, each tagged with the 1-based index `!` accepts. Takes an optional
/// count, defaulting to ten.
pub(super) fn show(history: &History, args: &[String]) -> Result<(), CommandError> {
    if args.len() > 1 {
        return Err(CommandError::TooManyParameters(DISPLAY_HISTORY_COMMAND));
    }

    let mut count = HISTORY_DEFAULT_DISPLAY_SIZE;
    if let Some(arg) = args.first() {
        count = arg
            .parse()
            .map_err(|_| CommandError::InvalidParameter(DISPLAY_HISTORY_COMMAND))?;
    }

    if history.is_empty() {
        println!("{}: {}: empty", SHELL_NAME, DISPLAY_HISTORY_COMMAND);
        return Ok(());
    }

    let shown = count.min(HISTORY_MAX_SIZE).min(history.len());
    for display_index in (1..=shown).rev() {
        if let Some(entry) = history.get(display_index) {
            println!("{}: ! {}: {}", SHELL_NAME, display_index, entry);
        }
    }

    Ok(())
}
