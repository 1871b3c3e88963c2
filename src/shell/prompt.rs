use inksac::prelude::*;
use std::env;

use crate::SHELL_NAME;

/// Renders the `venule(user):dir$ ` prompt, colored when the terminal
/// supports it.
pub struct Prompt {
    color_support: ColorSupport,
}

impl Prompt {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn render(&self, current_dir: &str) -> String {
        let user = env::var("USER").ok().filter(|u| !u.is_empty());

        if matches!(self.color_support, ColorSupport::NoColor) {
            return plain(user.as_deref(), current_dir);
        }

        let shell_style = Style::builder().foreground(Color::Blue).bold().build();
        let user_style = Style::builder().foreground(Color::Green).bold().build();
        let dir_style = Style::builder().foreground(Color::Blue).bold().build();

        let mut prompt = SHELL_NAME.style(shell_style).to_string();
        if let Some(user) = user {
            prompt.push('(');
            prompt.push_str(&user.style(user_style).to_string());
            prompt.push(')');
        }
        prompt.push(':');
        prompt.push_str(&current_dir.to_string().style(dir_style).to_string());
        prompt.push_str("$ ");
        prompt
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

fn plain(user: Option<&str>, current_dir: &str) -> String {
    match user {
        Some(user) => format!("{}({}):{}$ ", SHELL_NAME, user, current_dir),
        None => format!("{}:{}$ ", SHELL_NAME, current_dir),
    }
}
