mod splitter;
mod tokens;

pub use splitter::split_commands;
pub use tokens::tokenize;
