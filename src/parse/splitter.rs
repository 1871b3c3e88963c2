use crate::command::Command;

/// Words that mark a boundary between two commands on one line.
const COMMAND_SEPARATORS: [&str; 2] = ["&&", ";"];

/// Groups a word sequence into an ordered list of commands.
///
/// Separator words are consumed and never appear in a command. An empty run
/// between two separators, or before the first or after the last one, simply
/// produces no command. The first word of each run becomes the command name,
/// the remaining words its arguments.
pub fn split_commands(words: &[String]) -> Vec<Command> {
    let mut commands = Vec::new();

    for run in words.split(|word| COMMAND_SEPARATORS.contains(&word.as_str())) {
        if let Some((name, arguments)) = run.split_first() {
            commands.push(Command::new(name.clone(), arguments.to_vec()));
        }
    }

    commands
}
