use std::env;
use std::path::{Path, PathBuf};

use super::{CommandError, CHANGE_DIRECTORY_COMMAND, CHANGE_TO_LAST_DIRECTORY_COMMAND};
use crate::path::PathExpander;

/// Implements `cd` and `cdl` against the process-wide working directory.
///
/// `last_dir` holds the directory the shell was in before the most recent
/// successful change, so consecutive `cdl`s toggle between two places.
pub(super) struct DirectoryTracker {
    expander: PathExpander,
    last_dir: PathBuf,
}

impl DirectoryTracker {
    pub fn new() -> Result<Self, CommandError> {
        Ok(DirectoryTracker {
            expander: PathExpander::new(),
            last_dir: env::current_dir()?,
        })
    }

    /// `cd` with no argument or an empty argument goes to the root; a
    /// leading `~` expands to the home directory.
    pub fn change_directory(&mut self, args: &[String]) -> Result<(), CommandError> {
        if args.len() > 1 {
            return Err(CommandError::TooManyParameters(CHANGE_DIRECTORY_COMMAND));
        }

        let raw = args.first().map(String::as_str).unwrap_or("");
        let target = self
            .expander
            .expand(raw)
            .map_err(|_| CommandError::HomeDirNotFound)?;
        self.change_to(&target)
    }

    pub fn change_to_last(&mut self, args: &[String]) -> Result<(), CommandError> {
        if !args.is_empty() {
            return Err(CommandError::TooManyParameters(
                CHANGE_TO_LAST_DIRECTORY_COMMAND,
            ));
        }

        let target = self.last_dir.clone();
        self.change_to(&target)
    }

    fn change_to(&mut self, target: &Path) -> Result<(), CommandError> {
        let saved = env::current_dir()?;

        env::set_current_dir(target).map_err(|source| CommandError::DirectoryChange {
            path: target.display().to_string(),
            source,
        })?;

        // Only a successful change updates where cdl swaps back to.
        self.last_dir = saved;
        Ok(())
    }
}
