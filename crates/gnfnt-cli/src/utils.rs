use std::{
    fmt::Display,
    io::Write,
    sync::{LazyLock, RwLock},
};

use gnfnt_core::{error::ErrorContext, GnfntResult};
use nu_ansi_term::Color;

pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
    pub const INSTALLED: &str = "✓";
    pub const NOT_INSTALLED: &str = "○";
    pub const WARNING: &str = "⚠";
}

pub static COLOR: LazyLock<RwLock<bool>> = LazyLock::new(|| RwLock::new(true));
pub static PROGRESS: LazyLock<RwLock<bool>> = LazyLock::new(|| RwLock::new(true));

pub fn progress_enabled() -> bool {
    *PROGRESS.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn color_enabled() -> bool {
    *COLOR.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn interactive_ask(ques: &str) -> GnfntResult<String> {
    print!("{ques}");

    std::io::stdout()
        .flush()
        .with_context(|| "flushing stdout stream".to_string())?;

    let mut response = String::new();
    std::io::stdin()
        .read_line(&mut response)
        .with_context(|| "reading input from stdin".to_string())?;

    Ok(response.trim().to_owned())
}

/// Whether `response` is an affirmative answer.
pub fn is_affirmative(response: &str) -> bool {
    matches!(response.to_lowercase().as_str(), "y" | "yes")
}

pub fn confirm_action(message: &str) -> GnfntResult<bool> {
    let response = interactive_ask(&format!("{} [y/N]: ", message))?;
    Ok(is_affirmative(&response))
}

pub struct Colored<T: Display>(pub Color, pub T);

impl<T: Display> Display for Colored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if color_enabled() {
            write!(f, "{}", self.0.prefix())?;
            self.1.fmt(f)?;
            write!(f, "{}", self.0.suffix())
        } else {
            self.1.fmt(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("YES"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_colored_contains_text() {
        let rendered = Colored(Color::Green, "Hack").to_string();
        assert!(rendered.contains("Hack"));
    }
}
