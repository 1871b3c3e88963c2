use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use super::{signal, ProcessError};

/// Spawns external programs and waits for them to finish.
///
/// The child inherits the shell's stdio; the shell blocks until the child
/// terminates, so at most one child is ever live.
#[derive(Clone, Default)]
pub struct Launcher;

impl Launcher {
    pub fn new() -> Self {
        Launcher
    }

    /// Runs `name` with `args`, resolving `name` through the normal
    /// executable search. argv[0] carries only the final path component, so
    /// `/usr/bin/ls` shows up to the child as `ls`.
    pub fn run(&self, name: &str, args: &[String]) -> Result<(), ProcessError> {
        let argv0 = match name.rsplit_once('/') {
            Some((_, base)) => base,
            None => name,
        };

        let mut command = Command::new(name);
        command
            .arg0(argv0)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    return Err(ProcessError::CommandNotFound(name.to_string()));
                }
                return Err(e.into());
            }
        };

        signal::ignore_sigint_while_waiting();

        child.wait()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_existing_program() {
        let launcher = Launcher::new();
        assert!(launcher.run("true", &[]).is_ok());
    }

    #[test]
    fn test_run_with_arguments() {
        let launcher = Launcher::new();
        let args = vec!["venule launcher test".to_string()];
        assert!(launcher.run("echo", &args).is_ok());
    }

    #[test]
    fn test_run_by_full_path() {
        let launcher = Launcher::new();
        assert!(launcher.run("/bin/sh", &["-c".to_string(), "exit 0".to_string()]).is_ok());
    }

    #[test]
    fn test_run_waits_for_nonzero_exit() {
        // A failing child is not a launcher error; the contract only covers
        // spawn and wait.
        let launcher = Launcher::new();
        assert!(launcher.run("false", &[]).is_ok());
    }

    #[test]
    fn test_run_unknown_program() {
        let launcher = Launcher::new();
        let result = launcher.run("definitely-not-a-real-program-zzz", &[]);
        assert!(matches!(result, Err(ProcessError::CommandNotFound(_))));
    }
}
