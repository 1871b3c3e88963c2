use std::env;

use rustyline::DefaultEditor;

mod prompt;

use crate::{
    dispatch::{self, Dispatcher},
    error::ShellError,
    flags::Flags,
    parse::{split_commands, tokenize},
    SHELL_NAME,
};
use prompt::Prompt;

pub struct Shell {
    editor: DefaultEditor,
    dispatcher: Dispatcher,
    prompt: Prompt,
    flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;
        let dispatcher = Dispatcher::new()?;

        // Set up ctrl-c handler
        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to exit the shell");
        })?;

        Ok(Shell {
            editor,
            dispatcher,
            prompt: Prompt::new(),
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let current_dir = env::current_dir()
                .map(|dir| dir.to_string_lossy().to_string())
                .unwrap_or_else(|_| String::from("?"));
            let prompt = self.prompt.render(&current_dir);

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        if !self.flags.is_set("quiet") {
                            eprintln!("Warning: Couldn't add to history: {}", e);
                        }
                    }

                    if self.execute_line(&line) {
                        return Ok(());
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-C");
                    }
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-D");
                    }
                    break;
                }
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            }
        }
        Ok(())
    }

    /// Parses and dispatches one input line. Returns true when the line
    /// asked the session to end. A command that fails is reported and the
    /// rest of the chain still runs.
    fn execute_line(&mut self, line: &str) -> bool {
        let words = tokenize(line);
        for command in split_commands(&words) {
            if dispatch::is_quit(&command.name) {
                return true;
            }

            if let Err(e) = self.dispatcher.dispatch(&command) {
                eprintln!("{}: {}", SHELL_NAME, e);
            }
        }
        false
    }
}
