//! Terminal capability detection and status icons

use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
}

impl TerminalCapabilities {
    /// No color, ASCII icons (pipes, files, tests)
    pub fn plain() -> Self {
        Self {
            is_tty: false,
            supports_color: false,
            supports_unicode: false,
        }
    }
}

pub fn detect_capabilities() -> TerminalCapabilities {
    detect_capabilities_impl(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
}

fn detect_capabilities_impl(
    get_env: impl Fn(&str) -> Option<String>,
    is_tty: bool,
) -> TerminalCapabilities {
    let term = get_env("TERM").unwrap_or_default();
    let term_is_dumb = term.eq_ignore_ascii_case("dumb");
    let no_color = get_env("NO_COLOR").is_some();

    TerminalCapabilities {
        is_tty,
        supports_color: is_tty && !term_is_dumb && !no_color,
        supports_unicode: is_tty && !term_is_dumb && unicode_locale(&get_env),
    }
}

fn unicode_locale(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    const KEYS: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];
    for k in KEYS {
        if let Some(val) = get_env(k) {
            let v = val.to_lowercase();
            if v.contains("utf-8") || v.contains("utf8") {
                return true;
            }
        }
    }
    // No locale hint at all: assume a modern terminal
    KEYS.iter().all(|k| get_env(k).is_none())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Arrow,
    Remote,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => "✓",
            (true, Icon::Error) => "✗",
            (true, Icon::Warning) => "⚠",
            (true, Icon::Arrow) => "→",
            (true, Icon::Remote) => "⇄",
            (false, Icon::Success) => "[OK]",
            (false, Icon::Error) => "[FAIL]",
            (false, Icon::Warning) => "[WARN]",
            (false, Icon::Arrow) => "->",
            (false, Icon::Remote) => "<->",
        }
    }

    pub fn colored(&self, caps: TerminalCapabilities) -> String {
        let s = self.render(caps.supports_unicode);
        if !caps.supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => Color::Green,
            Icon::Error => Color::Red,
            Icon::Warning => Color::Yellow,
            Icon::Arrow => Color::DarkGrey,
            Icon::Remote => Color::Cyan,
        };
        s.with(color).to_string()
    }
}
