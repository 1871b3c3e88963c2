use crate::command::Command;
use crate::history::{History, HISTORY_MAX_SIZE};
use crate::process::{Launcher, ProcessError};

mod display;
mod replay;
mod workdir;

use workdir::DirectoryTracker;

pub const QUIT_COMMANDS: [&str; 2] = ["exit", "quit"];
pub const CHANGE_DIRECTORY_COMMAND: &str = "cd";
pub const CHANGE_TO_LAST_DIRECTORY_COMMAND: &str = "cdl";
pub const DISPLAY_HISTORY_COMMAND: &str = "history";
pub const EXECUTE_HISTORY_COMMAND: &str = "!";

/// True for the builtins that end the session; the read-eval loop checks
/// these before dispatching, so they are never recorded.
pub fn is_quit(name: &str) -> bool {
    QUIT_COMMANDS.contains(&name)
}

#[derive(Debug)]
pub enum CommandError {
    TooManyParameters(&'static str),
    MissingParameter(&'static str),
    InvalidParameter(&'static str),
    ReplayOutOfRange { min: usize, max: usize },
    RecursiveReplay,
    DirectoryChange { path: String, source: std::io::Error },
    HomeDirNotFound,
    Io(std::io::Error),
    Process(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::TooManyParameters(builtin) => {
                write!(f, "{}: too many parameters", builtin)
            }
            CommandError::MissingParameter(builtin) => {
                write!(f, "{}: missing parameter", builtin)
            }
            CommandError::InvalidParameter(builtin) => {
                write!(f, "{}: invalid parameter", builtin)
            }
            CommandError::ReplayOutOfRange { min, max } => write!(
                f,
                "{}: invalid parameter (min={} max={})",
                EXECUTE_HISTORY_COMMAND, min, max
            ),
            CommandError::RecursiveReplay => write!(
                f,
                "{}: cannot replay '{}'",
                EXECUTE_HISTORY_COMMAND, EXECUTE_HISTORY_COMMAND
            ),
            CommandError::DirectoryChange { path, source } => {
                write!(f, "{}: '{}': {}", CHANGE_DIRECTORY_COMMAND, path, source)
            }
            CommandError::HomeDirNotFound => write!(f, "~: failed to find home directory"),
            CommandError::Io(err) => write!(f, "IO error: {}", err),
            CommandError::Process(err) => write!(f, "{}", err),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::Io(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

impl std::error::Error for CommandError {}

/// Routes each parsed command to a builtin or to the process launcher, and
/// owns the session state the builtins touch: the command history and the
/// directory `cdl` swaps back to.
pub struct Dispatcher {
    history: History,
    workdir: DirectoryTracker,
    launcher: Launcher,
}

impl Dispatcher {
    pub fn new() -> Result<Self, CommandError> {
        Ok(Dispatcher {
            history: History::new(HISTORY_MAX_SIZE),
            workdir: DirectoryTracker::new()?,
            launcher: Launcher::new(),
        })
    }

    /// Executes one command. An `Err` is a single-command failure the caller
    /// reports to the user; it never ends the session.
    pub fn dispatch(&mut self, cmd: &Command) -> Result<(), CommandError> {
        if cmd.name.is_empty() {
            return Ok(());
        }

        // Listing history is the one command that leaves no trace of itself.
        if cmd.name == DISPLAY_HISTORY_COMMAND {
            return display::show(&self.history, &cmd.arguments);
        }

        // A replay executes and records the historical command, never `!`.
        let resolved = if cmd.name == EXECUTE_HISTORY_COMMAND {
            replay::resolve(&self.history, &cmd.arguments)?.clone()
        } else {
            cmd.clone()
        };

        self.history.record_executed(resolved.clone());

        match resolved.name.as_str() {
            CHANGE_DIRECTORY_COMMAND => self.workdir.change_directory(&resolved.arguments),
            CHANGE_TO_LAST_DIRECTORY_COMMAND => self.workdir.change_to_last(&resolved.arguments),
            _ => self
                .launcher
                .run(&resolved.name, &resolved.arguments)
                .map_err(CommandError::from),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{split_commands, tokenize};
    use std::env;
    use std::sync::Mutex;

    // Tests that read or change the process working directory serialize on
    // this lock; cargo runs tests in parallel and the cwd is process-wide.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    fn cmd(name: &str, args: &[&str]) -> Command {
        Command::new(name, args.iter().map(|s| s.to_string()).collect())
    }

    // `cd` with two arguments is rejected before any directory change but
    // after recording, which makes it a side-effect-free recording vehicle.
    fn record_via_invalid_cd(dispatcher: &mut Dispatcher, marker: &str) {
        let result = dispatcher.dispatch(&cmd("cd", &[marker, "extra"]));
        assert!(matches!(result, Err(CommandError::TooManyParameters(_))));
    }

    #[test]
    fn test_empty_name_is_a_noop() {
        let mut dispatcher = Dispatcher::new().unwrap();
        assert!(dispatcher.dispatch(&cmd("", &[])).is_ok());
        assert!(dispatcher.history().is_empty());
    }

    #[test]
    fn test_failed_commands_are_still_recorded() {
        let mut dispatcher = Dispatcher::new().unwrap();
        record_via_invalid_cd(&mut dispatcher, "a");

        assert_eq!(dispatcher.history().len(), 1);
        assert_eq!(dispatcher.history().get(1), Some(&cmd("cd", &["a", "extra"])));
    }

    #[test]
    fn test_history_builtin_is_not_recorded() {
        let mut dispatcher = Dispatcher::new().unwrap();
        assert!(dispatcher.dispatch(&cmd("history", &[])).is_ok());
        assert!(dispatcher.history().is_empty());
    }

    #[test]
    fn test_history_builtin_argument_validation() {
        let mut dispatcher = Dispatcher::new().unwrap();

        let result = dispatcher.dispatch(&cmd("history", &["1", "2"]));
        assert!(matches!(result, Err(CommandError::TooManyParameters(_))));

        let result = dispatcher.dispatch(&cmd("history", &["three"]));
        assert!(matches!(result, Err(CommandError::InvalidParameter(_))));

        assert!(dispatcher.dispatch(&cmd("history", &["3"])).is_ok());
        assert!(dispatcher.history().is_empty());
    }

    #[test]
    fn test_replay_argument_validation() {
        let mut dispatcher = Dispatcher::new().unwrap();

        let result = dispatcher.dispatch(&cmd("!", &[]));
        assert!(matches!(result, Err(CommandError::MissingParameter(_))));

        let result = dispatcher.dispatch(&cmd("!", &["1", "2"]));
        assert!(matches!(result, Err(CommandError::TooManyParameters(_))));

        // Empty history reports min=0 max=0 whatever the index.
        let result = dispatcher.dispatch(&cmd("!", &["1"]));
        assert!(matches!(
            result,
            Err(CommandError::ReplayOutOfRange { min: 0, max: 0 })
        ));
    }

    #[test]
    fn test_replay_index_out_of_range() {
        let mut dispatcher = Dispatcher::new().unwrap();
        record_via_invalid_cd(&mut dispatcher, "a");

        for bad_index in ["0", "2", "not-a-number", "-1"] {
            let result = dispatcher.dispatch(&cmd("!", &[bad_index]));
            assert!(matches!(
                result,
                Err(CommandError::ReplayOutOfRange { min: 1, max: 1 })
            ));
        }

        // Failed replays leave history untouched.
        assert_eq!(dispatcher.history().len(), 1);
    }

    #[test]
    fn test_replay_executes_the_resolved_command() {
        let mut dispatcher = Dispatcher::new().unwrap();
        record_via_invalid_cd(&mut dispatcher, "a");

        // The replay runs `cd a extra` again: same rejection, and the store
        // still holds a single entry for it; `!` itself is never recorded.
        let result = dispatcher.dispatch(&cmd("!", &["1"]));
        assert!(matches!(result, Err(CommandError::TooManyParameters(_))));

        assert_eq!(dispatcher.history().len(), 1);
        assert_eq!(dispatcher.history().get(1), Some(&cmd("cd", &["a", "extra"])));
    }

    #[test]
    fn test_replay_promotes_older_entry() {
        let mut dispatcher = Dispatcher::new().unwrap();
        record_via_invalid_cd(&mut dispatcher, "a");
        record_via_invalid_cd(&mut dispatcher, "b");

        let _ = dispatcher.dispatch(&cmd("!", &["2"]));

        assert_eq!(dispatcher.history().len(), 2);
        assert_eq!(dispatcher.history().get(1), Some(&cmd("cd", &["a", "extra"])));
        assert_eq!(dispatcher.history().get(2), Some(&cmd("cd", &["b", "extra"])));
    }

    #[test]
    fn test_unknown_program_is_reported_and_recorded() {
        let mut dispatcher = Dispatcher::new().unwrap();
        let missing = cmd("venule-test-no-such-program", &[]);

        let result = dispatcher.dispatch(&missing);
        assert!(matches!(
            result,
            Err(CommandError::Process(ProcessError::CommandNotFound(_)))
        ));
        assert_eq!(dispatcher.history().get(1), Some(&missing));
    }

    #[test]
    fn test_cdl_requires_zero_arguments() {
        let mut dispatcher = Dispatcher::new().unwrap();
        let result = dispatcher.dispatch(&cmd("cdl", &["/tmp"]));
        assert!(matches!(result, Err(CommandError::TooManyParameters(_))));
    }

    #[test]
    fn test_cd_and_cdl_swap_directories() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let original = env::current_dir().unwrap();

        let mut dispatcher = Dispatcher::new().unwrap();
        assert!(dispatcher.dispatch(&cmd("cd", &["/tmp"])).is_ok());
        assert_eq!(env::current_dir().unwrap(), std::path::PathBuf::from("/tmp"));

        assert!(dispatcher.dispatch(&cmd("cd", &["/"])).is_ok());
        assert_eq!(env::current_dir().unwrap(), std::path::PathBuf::from("/"));

        // cdl returns to the directory before the last change.
        assert!(dispatcher.dispatch(&cmd("cdl", &[])).is_ok());
        assert_eq!(env::current_dir().unwrap(), std::path::PathBuf::from("/tmp"));

        // cd with no argument goes to the root.
        assert!(dispatcher.dispatch(&cmd("cd", &[])).is_ok());
        assert_eq!(env::current_dir().unwrap(), std::path::PathBuf::from("/"));

        env::set_current_dir(original).unwrap();
    }

    #[test]
    fn test_cd_failure_keeps_session_and_last_directory() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let original = env::current_dir().unwrap();

        let mut dispatcher = Dispatcher::new().unwrap();
        assert!(dispatcher.dispatch(&cmd("cd", &["/tmp"])).is_ok());

        let result = dispatcher.dispatch(&cmd("cd", &["/venule/does/not/exist"]));
        assert!(matches!(result, Err(CommandError::DirectoryChange { .. })));
        assert_eq!(env::current_dir().unwrap(), std::path::PathBuf::from("/tmp"));

        // The failed change did not clobber what cdl swaps back to.
        assert!(dispatcher.dispatch(&cmd("cdl", &[])).is_ok());
        assert_eq!(env::current_dir().unwrap(), original);

        env::set_current_dir(original).unwrap();
    }

    #[test]
    fn test_chained_line_records_in_execution_order() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let original = env::current_dir().unwrap();

        let mut dispatcher = Dispatcher::new().unwrap();
        let words = tokenize("cd /tmp && ls");
        for command in split_commands(&words) {
            let _ = dispatcher.dispatch(&command);
        }

        assert_eq!(dispatcher.history().len(), 2);
        assert_eq!(dispatcher.history().get(1), Some(&cmd("ls", &[])));
        assert_eq!(dispatcher.history().get(2), Some(&cmd("cd", &["/tmp"])));

        env::set_current_dir(original).unwrap();
    }

    #[test]
    fn test_is_quit() {
        assert!(is_quit("exit"));
        assert!(is_quit("quit"));
        assert!(!is_quit("Exit"));
        assert!(!is_quit("ls"));
    }
}
