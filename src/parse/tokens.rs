/// Characters that delimit words on the command line.
const WHITESPACE_CHARS: [char; 2] = [' ', '\t'];

/// Splits a raw input line into whitespace-delimited words.
///
/// Runs of whitespace collapse, so no empty words are ever produced and
/// leading or trailing whitespace contributes nothing.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(|c| WHITESPACE_CHARS.contains(&c))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
