//! Keybinding configuration for the TUI.
//!
//! Bindings come from a profile and can be extended through the
//! `custom_keybindings` config table. The default profile (Universal)
//! accepts both vim-style (hjkl) AND arrow key navigation.
//!
//! # Profiles
//!
//! - [`KeybindingProfile::Universal`]: Both vim-style AND arrow keys (default)
//! - [`KeybindingProfile::Vim`]: Vim-style keys only (hjkl)
//! - [`KeybindingProfile::Standard`]: Arrow keys and letter shortcuts only
//!
//! Every profile shares the quiz keys: digits pick a choice, Space toggles
//! the choice under the cursor, Enter checks the answer or moves on.
//!
//! # Example
//!
//! ```
//! use quizdeck::tui::keybindings::{KeyBindings, KeybindingProfile};
//! use quizdeck::tui::Action;
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//!
//! let bindings = KeyBindings::from_profile(KeybindingProfile::Universal);
//!
//! let j_key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
//! let down_key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
//! let two_key = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE);
//!
//! assert_eq!(bindings.resolve(&j_key), Some(Action::NavigateDown));
//! assert_eq!(bindings.resolve(&down_key), Some(Action::NavigateDown));
//! assert_eq!(bindings.resolve(&two_key), Some(Action::Pick(1)));
//! ```

use std::collections::HashMap;

use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Action;

/// Keybinding profile presets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingProfile {
    /// Supports BOTH vim-style AND arrow key navigation.
    #[default]
    Universal,

    /// Vim-style navigation using hjkl keys, no arrow keys.
    Vim,

    /// Arrow keys and letter shortcuts, no vim-style navigation.
    Standard,
}

impl KeybindingProfile {
    /// Get the display name for the profile.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Universal => "Universal (Vim + Arrow keys)",
            Self::Vim => "Vim (hjkl)",
            Self::Standard => "Standard (Arrow keys)",
        }
    }

    /// Get all available profiles.
    #[must_use]
    pub fn all() -> &'static [KeybindingProfile] {
        &[Self::Universal, Self::Vim, Self::Standard]
    }
}

impl std::fmt::Display for KeybindingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Universal => "universal",
            Self::Vim => "vim",
            Self::Standard => "standard",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for KeybindingProfile {
    type Err = KeybindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "universal" => Ok(Self::Universal),
            "vim" => Ok(Self::Vim),
            "standard" | "arrows" | "arrow" => Ok(Self::Standard),
            _ => Err(KeybindingError::InvalidProfile(s.to_string())),
        }
    }
}

/// Error type for keybinding operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeybindingError {
    /// Invalid profile name.
    #[error("Unknown keybinding profile: '{0}'. Valid profiles: universal, vim, standard")]
    InvalidProfile(String),

    /// Invalid key specification.
    #[error("Invalid key specification: '{0}'. Examples: 'j', 'Ctrl+c', 'Down', 'Space', 'F1'")]
    InvalidKeySpec(String),

    /// Invalid action name.
    #[error("Unknown action: '{0}'. Valid actions: {}", Action::all_names().join(", "))]
    InvalidAction(String),
}

/// Keybinding configuration mapping actions to key events.
///
/// Multiple keys can trigger the same action; a key triggers at most one
/// action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// The profile these bindings are based on.
    profile: KeybindingProfile,

    /// Mapping from actions to the key events that trigger them.
    action_keys: HashMap<Action, Vec<KeyEvent>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_profile(KeybindingProfile::Universal)
    }
}

impl KeyBindings {
    /// Create keybindings from a specific profile.
    #[must_use]
    pub fn from_profile(profile: KeybindingProfile) -> Self {
        let mut action_keys = Self::shared_bindings();
        let navigation = match profile {
            KeybindingProfile::Universal => {
                let mut nav = Self::vim_navigation();
                for (action, keys) in Self::arrow_navigation() {
                    nav.entry(action).or_default().extend(keys);
                }
                nav
            }
            KeybindingProfile::Vim => Self::vim_navigation(),
            KeybindingProfile::Standard => Self::arrow_navigation(),
        };
        for (action, keys) in navigation {
            action_keys.entry(action).or_default().extend(keys);
        }

        Self {
            profile,
            action_keys,
        }
    }

    /// Get the keybinding profile.
    #[must_use]
    pub fn profile(&self) -> KeybindingProfile {
        self.profile
    }

    /// Resolve a key event to an action.
    ///
    /// Key release and repeat events are ignored; some terminals send them.
    #[must_use]
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        self.action_keys
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| Self::key_matches(k, key)))
            .map(|(action, _)| *action)
    }

    /// Matches code and modifiers, ignoring kind and state.
    fn key_matches(target: &KeyEvent, actual: &KeyEvent) -> bool {
        target.code == actual.code && target.modifiers == actual.modifiers
    }

    /// Get the keys bound to a specific action.
    ///
    /// Returns an empty slice if the action is not bound.
    #[must_use]
    pub fn keys_for_action(&self, action: &Action) -> &[KeyEvent] {
        self.action_keys
            .get(action)
            .map_or(&[], |keys| keys.as_slice())
    }

    /// Get all actions and their bound keys.
    #[must_use]
    pub fn all_bindings(&self) -> &HashMap<Action, Vec<KeyEvent>> {
        &self.action_keys
    }

    /// Human-readable form of the first key bound to an action.
    #[must_use]
    pub fn key_hint(&self, action: &Action) -> String {
        self.keys_for_action(action)
            .first()
            .map_or_else(String::new, Self::format_key)
    }

    /// Format a key event as a human-readable string.
    #[must_use]
    pub fn format_key(key: &KeyEvent) -> String {
        let mut parts = Vec::new();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if key.modifiers.contains(KeyModifiers::SHIFT) && !matches!(key.code, KeyCode::Char(_)) {
            parts.push("Shift");
        }

        let key_name = match key.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };

        if parts.is_empty() {
            key_name
        } else {
            parts.push(&key_name);
            parts.join("+")
        }
    }

    /// Parse a key specification string into a KeyEvent.
    ///
    /// Supports simple keys ("j", "Space", "Enter"), arrows ("Up"),
    /// function keys ("F1") and modifiers ("Ctrl+c", "Alt+Shift+x").
    ///
    /// # Errors
    ///
    /// Returns `KeybindingError::InvalidKeySpec` if the specification
    /// cannot be parsed.
    ///
    /// # Example
    ///
    /// ```
    /// use quizdeck::tui::keybindings::KeyBindings;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let key = KeyBindings::parse_key("Ctrl+n").unwrap();
    /// assert_eq!(key.code, KeyCode::Char('n'));
    /// assert_eq!(key.modifiers, KeyModifiers::CONTROL);
    /// ```
    pub fn parse_key(spec: &str) -> Result<KeyEvent, KeybindingError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(KeybindingError::InvalidKeySpec(spec.to_string()));
        }

        // '+' on its own is the plus key, not a separator
        let parts: Vec<&str> = if spec == "+" {
            vec!["+"]
        } else {
            spec.split('+').map(str::trim).collect()
        };

        let mut modifiers = KeyModifiers::NONE;
        let mut key_part = None;

        for (i, part) in parts.iter().enumerate() {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "meta" | "option" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => {
                    if i != parts.len() - 1 {
                        return Err(KeybindingError::InvalidKeySpec(format!(
                            "'{spec}' - unexpected modifier position for '{part}'"
                        )));
                    }
                    key_part = Some(*part);
                }
            }
        }

        let key_str = key_part.ok_or_else(|| {
            KeybindingError::InvalidKeySpec(format!("'{spec}' - missing key after modifiers"))
        })?;

        let code = Self::parse_key_code(key_str)
            .ok_or_else(|| KeybindingError::InvalidKeySpec(spec.to_string()))?;

        Ok(KeyEvent::new(code, modifiers))
    }

    fn parse_key_code(s: &str) -> Option<KeyCode> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return c.is_ascii().then_some(KeyCode::Char(c));
        }

        let lower = s.to_lowercase();
        if let Some(rest) = lower.strip_prefix('f') {
            if let Ok(n) = rest.parse::<u8>() {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
            }
        }

        match lower.as_str() {
            "space" | "spc" => Some(KeyCode::Char(' ')),
            "enter" | "return" | "ret" | "cr" => Some(KeyCode::Enter),
            "esc" | "escape" => Some(KeyCode::Esc),
            "tab" => Some(KeyCode::Tab),
            "backtab" | "shifttab" => Some(KeyCode::BackTab),
            "backspace" | "bs" => Some(KeyCode::Backspace),
            "delete" | "del" => Some(KeyCode::Delete),
            "up" | "uparrow" => Some(KeyCode::Up),
            "down" | "downarrow" => Some(KeyCode::Down),
            "left" | "leftarrow" => Some(KeyCode::Left),
            "right" | "rightarrow" => Some(KeyCode::Right),
            "pageup" | "pgup" | "page_up" => Some(KeyCode::PageUp),
            "pagedown" | "pgdn" | "pgdown" | "page_down" => Some(KeyCode::PageDown),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),
            _ => None,
        }
    }

    /// Parse an action name from a string.
    ///
    /// # Errors
    ///
    /// Returns `KeybindingError::InvalidAction` if the name is not recognized.
    pub fn parse_action(name: &str) -> Result<Action, KeybindingError> {
        name.parse::<Action>()
            .map_err(|_| KeybindingError::InvalidAction(name.to_string()))
    }

    /// Merge custom keybindings into the profile defaults.
    ///
    /// Custom keys are added to an action's existing keys and removed from
    /// every other action, so the custom binding always wins.
    ///
    /// # Errors
    ///
    /// Returns an error if any action name or key specification is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use quizdeck::tui::keybindings::{KeyBindings, KeybindingProfile};
    /// use quizdeck::tui::Action;
    /// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    /// use std::collections::HashMap;
    ///
    /// let mut custom = HashMap::new();
    /// custom.insert("quit".to_string(), vec!["x".to_string()]);
    ///
    /// let bindings = KeyBindings::from_profile(KeybindingProfile::Standard)
    ///     .with_custom_overrides(&custom)
    ///     .unwrap();
    ///
    /// let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
    /// assert_eq!(bindings.resolve(&x), Some(Action::Quit));
    /// ```
    pub fn with_custom_overrides(
        mut self,
        custom: &HashMap<String, Vec<String>>,
    ) -> Result<Self, KeybindingError> {
        for (action_name, key_specs) in custom {
            let action = Self::parse_action(action_name)?;

            for key_spec in key_specs {
                let key_event = Self::parse_key(key_spec)?;

                for (other_action, other_keys) in &mut self.action_keys {
                    if *other_action != action {
                        other_keys.retain(|k| !Self::key_matches(k, &key_event));
                    }
                }

                log::debug!("Binding {} to {}", key_spec, action_name);
                self.action_keys.entry(action).or_default().push(key_event);
            }
        }

        Ok(self)
    }

    /// Create keybindings from a profile with custom overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if any custom binding is invalid.
    pub fn from_profile_with_custom(
        profile: KeybindingProfile,
        custom: &HashMap<String, Vec<String>>,
    ) -> Result<Self, KeybindingError> {
        Self::from_profile(profile).with_custom_overrides(custom)
    }

    // =========================================================================
    // Profile Binding Definitions
    // =========================================================================

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn plain(c: char) -> KeyEvent {
        Self::key(KeyCode::Char(c), KeyModifiers::NONE)
    }

    /// Keys common to every profile.
    fn shared_bindings() -> HashMap<Action, Vec<KeyEvent>> {
        let mut bindings = HashMap::new();

        // Digits 1-9 pick the matching choice
        for (index, digit) in ('1'..='9').enumerate() {
            bindings.insert(Action::Pick(index), vec![Self::plain(digit)]);
        }

        bindings.insert(Action::ToggleChoice, vec![Self::plain(' ')]);
        bindings.insert(
            Action::Confirm,
            vec![Self::key(KeyCode::Enter, KeyModifiers::NONE)],
        );
        bindings.insert(Action::ToggleReview, vec![Self::plain('v')]);
        bindings.insert(Action::Restart, vec![Self::plain('r')]);
        bindings.insert(Action::ToggleTheme, vec![Self::plain('t')]);
        bindings.insert(
            Action::ShowHelp,
            vec![
                Self::plain('?'),
                Self::key(KeyCode::F(1), KeyModifiers::NONE),
            ],
        );
        bindings.insert(
            Action::Cancel,
            vec![Self::key(KeyCode::Esc, KeyModifiers::NONE)],
        );
        bindings.insert(Action::Quit, vec![Self::plain('q')]);
        // Raw mode delivers Ctrl+C as a key, not a signal.
        bindings.insert(
            Action::Interrupt,
            vec![Self::key(KeyCode::Char('c'), KeyModifiers::CONTROL)],
        );

        bindings
    }

    /// hjkl navigation.
    fn vim_navigation() -> HashMap<Action, Vec<KeyEvent>> {
        let mut bindings = HashMap::new();
        bindings.insert(Action::NavigateDown, vec![Self::plain('j')]);
        bindings.insert(Action::NavigateUp, vec![Self::plain('k')]);
        bindings.insert(Action::NextQuestion, vec![Self::plain('l')]);
        bindings.insert(Action::PreviousQuestion, vec![Self::plain('h')]);
        bindings
    }

    /// Arrow key navigation with letter shortcuts for paging questions.
    fn arrow_navigation() -> HashMap<Action, Vec<KeyEvent>> {
        let mut bindings = HashMap::new();
        bindings.insert(
            Action::NavigateDown,
            vec![Self::key(KeyCode::Down, KeyModifiers::NONE)],
        );
        bindings.insert(
            Action::NavigateUp,
            vec![Self::key(KeyCode::Up, KeyModifiers::NONE)],
        );
        bindings.insert(
            Action::NextQuestion,
            vec![
                Self::key(KeyCode::Right, KeyModifiers::NONE),
                Self::plain('n'),
            ],
        );
        bindings.insert(
            Action::PreviousQuestion,
            vec![
                Self::key(KeyCode::Left, KeyModifiers::NONE),
                Self::plain('p'),
            ],
        );
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key_press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn key_release(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_profile_default_and_display() {
        assert_eq!(KeybindingProfile::default(), KeybindingProfile::Universal);
        assert_eq!(KeybindingProfile::Vim.to_string(), "vim");
        assert_eq!(
            "arrows".parse::<KeybindingProfile>().unwrap(),
            KeybindingProfile::Standard
        );
        assert!("emacs".parse::<KeybindingProfile>().is_err());
    }

    #[test]
    fn test_universal_has_both_styles() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Char('k'), KeyModifiers::NONE)),
            Some(Action::NavigateUp)
        );
        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Up, KeyModifiers::NONE)),
            Some(Action::NavigateUp)
        );
        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Char('l'), KeyModifiers::NONE)),
            Some(Action::NextQuestion)
        );
        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Left, KeyModifiers::NONE)),
            Some(Action::PreviousQuestion)
        );
    }

    #[test]
    fn test_vim_has_no_arrows() {
        let bindings = KeyBindings::from_profile(KeybindingProfile::Vim);
        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Down, KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::NavigateDown)
        );
    }

    #[test]
    fn test_standard_has_no_hjkl() {
        let bindings = KeyBindings::from_profile(KeybindingProfile::Standard);
        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Char('j'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(Action::NextQuestion)
        );
    }

    #[test]
    fn test_digits_pick_choices() {
        for profile in KeybindingProfile::all() {
            let bindings = KeyBindings::from_profile(*profile);
            assert_eq!(
                bindings.resolve(&key_press(KeyCode::Char('1'), KeyModifiers::NONE)),
                Some(Action::Pick(0))
            );
            assert_eq!(
                bindings.resolve(&key_press(KeyCode::Char('9'), KeyModifiers::NONE)),
                Some(Action::Pick(8))
            );
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.resolve(&key_release(KeyCode::Enter, KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_no_key_bound_twice() {
        for profile in KeybindingProfile::all() {
            let bindings = KeyBindings::from_profile(*profile);
            let mut seen = Vec::new();
            for keys in bindings.all_bindings().values() {
                for key in keys {
                    assert!(
                        !seen.contains(&(key.code, key.modifiers)),
                        "{:?} bound twice in {}",
                        key,
                        profile
                    );
                    seen.push((key.code, key.modifiers));
                }
            }
        }
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(
            KeyBindings::parse_key("Space").unwrap().code,
            KeyCode::Char(' ')
        );
        let key = KeyBindings::parse_key("Ctrl+Shift+x").unwrap();
        assert_eq!(key.code, KeyCode::Char('x'));
        assert_eq!(key.modifiers, KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(KeyBindings::parse_key("F5").unwrap().code, KeyCode::F(5));
        assert_eq!(KeyBindings::parse_key("+").unwrap().code, KeyCode::Char('+'));
        assert!(KeyBindings::parse_key("").is_err());
        assert!(KeyBindings::parse_key("Ctrl+").is_err());
        assert!(KeyBindings::parse_key("x+Ctrl").is_err());
        assert!(KeyBindings::parse_key("F13").is_err());
        assert!(KeyBindings::parse_key("é").is_err());
    }

    #[test]
    fn test_custom_override_moves_key() {
        let mut custom = HashMap::new();
        custom.insert("next_question".to_string(), vec!["j".to_string()]);
        let bindings = KeyBindings::from_profile_with_custom(KeybindingProfile::Vim, &custom)
            .unwrap();

        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::NextQuestion)
        );
        assert!(bindings.keys_for_action(&Action::NavigateDown).is_empty());
        // Profile default still bound
        assert_eq!(
            bindings.resolve(&key_press(KeyCode::Char('l'), KeyModifiers::NONE)),
            Some(Action::NextQuestion)
        );
    }

    #[test]
    fn test_custom_override_errors() {
        let mut custom = HashMap::new();
        custom.insert("teleport".to_string(), vec!["x".to_string()]);
        assert!(matches!(
            KeyBindings::default().with_custom_overrides(&custom),
            Err(KeybindingError::InvalidAction(_))
        ));

        let mut custom = HashMap::new();
        custom.insert("quit".to_string(), vec!["Hyper+x".to_string()]);
        assert!(matches!(
            KeyBindings::default().with_custom_overrides(&custom),
            Err(KeybindingError::InvalidKeySpec(_))
        ));
    }

    #[test]
    fn test_format_key_and_hint() {
        assert_eq!(
            KeyBindings::format_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            "Ctrl+c"
        );
        assert_eq!(
            KeyBindings::format_key(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
            "Space"
        );
        let bindings = KeyBindings::default();
        assert_eq!(bindings.key_hint(&Action::Confirm), "Enter");
        assert_eq!(bindings.key_hint(&Action::Quit), "q");
    }
}
