//! TUI color themes.
//!
//! Light and dark palettes, plus automatic detection from the terminal
//! environment.

use ratatui::style::Color;

use crate::cli::ThemeArg;

/// Colors used by the TUI widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Borders, title, progress gauge
    pub primary: Color,
    /// Cursor and selected choices
    pub secondary: Color,
    /// Wrong answers
    pub danger: Color,
    /// Correct answers
    pub success: Color,
    /// Hints and secondary text
    pub dim: Color,
    /// Main text
    pub normal: Color,
    /// Text on a colored background
    pub inverted_fg: Color,
}

impl Theme {
    /// High-contrast dark theme (default).
    #[must_use]
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            dim: Color::DarkGray,
            normal: Color::White,
            inverted_fg: Color::Black,
        }
    }

    /// High-contrast light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            secondary: Color::Magenta,
            danger: Color::Red,
            success: Color::Green,
            dim: Color::Gray,
            normal: Color::Black,
            inverted_fg: Color::White,
        }
    }

    /// Detect the terminal background, defaulting to dark.
    #[must_use]
    pub fn auto() -> Self {
        if is_light_terminal() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Theme for a CLI/config selection.
    #[must_use]
    pub fn from_arg(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Auto => Self::auto(),
            ThemeArg::Light => Self::light(),
            ThemeArg::Dark => Self::dark(),
        }
    }

    /// Whether this is the light palette.
    #[must_use]
    pub fn is_light(&self) -> bool {
        self.normal == Color::Black
    }

    /// The opposite palette.
    #[must_use]
    pub fn toggled(&self) -> Self {
        if self.is_light() {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Reads `COLORFGBG` ("fg;bg"), set by rxvt, xterm and konsole.
fn is_light_terminal() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| background_is_light(&value))
        .unwrap_or(false)
}

fn background_is_light(colorfgbg: &str) -> Option<bool> {
    let bg = colorfgbg.split(';').next_back()?.parse::<u32>().ok()?;
    // 0 is black, 7 light gray, 8 dark gray, 15 white
    Some(bg >= 7 && bg != 8)
}
