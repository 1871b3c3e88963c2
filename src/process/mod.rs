use std::fmt;

mod launcher;
pub mod signal;

pub use launcher::Launcher;

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    Other(String),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Other(e.to_string())
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "command not found: {}", cmd),
            ProcessError::Other(msg) => write!(f, "{}", msg),
        }
    }
}
