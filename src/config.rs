//! User configuration — keybindings, drag tuning, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/snap-sheet/config.toml` (default
//! `~/.config/snap-sheet/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

/// A malformed config entry.  Parsing never fails the app — bad entries are
/// logged and skipped.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for `{key}`: `{value}`")]
    InvalidValue { key: String, value: String },
    #[error("unparseable key binding `{0}`")]
    BadKeyBind(String),
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleSheet,
    ScrollUp,
    ScrollDown,
    OpenHelp,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::ToggleSheet,
        Action::ScrollUp,
        Action::ScrollDown,
        Action::OpenHelp,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ToggleSheet => "Toggle Sheet",
            Action::ScrollUp => "Scroll Body Up",
            Action::ScrollDown => "Scroll Body Down",
            Action::OpenHelp => "Open Help",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ToggleSheet => "toggle_sheet",
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::OpenHelp => "open_help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "toggle_sheet" => Some(Action::ToggleSheet),
            "scroll_up" => Some(Action::ScrollUp),
            "scroll_down" => Some(Action::ScrollDown),
            "open_help" => Some(Action::OpenHelp),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"Space"`, `"↑"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Ctrl+c"`, `"Space"`, `"Up"`).
    fn to_config_string(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Space"`, `"Up"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            s if s.len() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and drag tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Pointer-sample accumulation window in milliseconds.
    pub accumulation_ms: u64,
    /// Offset ratio past which a released sheet snaps to extended.
    pub snap_threshold: f64,
    /// Share of the content area an extended sheet covers, in percent.
    pub sheet_height_pct: u16,
    /// Ease-out fraction per animation tick.
    pub snap_speed: f64,
}

impl AppConfig {
    /// Hard-coded defaults.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ToggleSheet, vec![KeyBind::new(Char(' '), n), KeyBind::new(Enter, n)]);
        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(OpenHelp, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"Space/Enter"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "drag or tap the handle | {}: toggle | {}: help | {}: quit",
            self.short_binding(Action::ToggleSheet),
            self.short_binding(Action::OpenHelp),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.  A missing file is
    /// written out with the defaults so users have something to edit.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        let config = Self::defaults();
        if let Err(e) = config.save() {
            tracing::warn!("could not write default config: {e}");
        }
        config
    }

    /// Built-in defaults, no disk access.
    pub fn defaults() -> Self {
        Self {
            bindings: Self::default_bindings(),
            accumulation_ms: 100,
            snap_threshold: 0.5,
            sheet_height_pct: 60,
            snap_speed: 0.35,
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::defaults();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Tuning values, each clamped to a predictable range.
            match key {
                "accumulation_ms" => {
                    match value.parse::<u64>() {
                        Ok(v) => config.accumulation_ms = v.clamp(16, 1000),
                        Err(_) => warn_invalid(key, value),
                    }
                    continue;
                }
                "snap_threshold" => {
                    match value.parse::<f64>() {
                        Ok(v) => config.snap_threshold = v.clamp(0.05, 0.95),
                        Err(_) => warn_invalid(key, value),
                    }
                    continue;
                }
                "sheet_height_pct" => {
                    match value.parse::<u16>() {
                        Ok(v) => config.sheet_height_pct = v.clamp(20, 90),
                        Err(_) => warn_invalid(key, value),
                    }
                    continue;
                }
                "snap_speed" => {
                    match value.parse::<f64>() {
                        Ok(v) => config.snap_speed = v.clamp(0.05, 0.95),
                        Err(_) => warn_invalid(key, value),
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                match KeyBind::parse(part) {
                    Some(bind) => parsed.push(bind),
                    None => tracing::warn!("{}", ConfigError::BadKeyBind(part.to_string())),
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# snap-sheet configuration".to_string(),
            String::new(),
            "# Drag tuning".to_string(),
            format!("accumulation_ms = {}", self.accumulation_ms),
            format!("snap_threshold = {}", self.snap_threshold),
            format!("sheet_height_pct = {}", self.sheet_height_pct),
            format!("snap_speed = {}", self.snap_speed),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn warn_invalid(key: &str, value: &str) {
    tracing::warn!(
        "{}",
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    );
}

/// Return the config file path (`$XDG_CONFIG_HOME/snap-sheet/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("snap-sheet").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_through_serialise() {
        let mut config = AppConfig::defaults();
        config.accumulation_ms = 250;
        config.snap_threshold = 0.7;
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Esc, KeyModifiers::NONE)]);

        let parsed = AppConfig::parse_config(&config.serialise());
        assert_eq!(parsed.accumulation_ms, 250);
        assert_eq!(parsed.snap_threshold, 0.7);
        assert_eq!(
            parsed.bindings.get(&Action::Quit),
            Some(&vec![KeyBind::new(KeyCode::Esc, KeyModifiers::NONE)])
        );
    }

    #[test]
    fn tuning_values_are_clamped() {
        let parsed = AppConfig::parse_config(
            "accumulation_ms = 5\nsnap_threshold = 2.0\nsheet_height_pct = 99\nsnap_speed = 0.001\n",
        );
        assert_eq!(parsed.accumulation_ms, 16);
        assert_eq!(parsed.snap_threshold, 0.95);
        assert_eq!(parsed.sheet_height_pct, 90);
        assert_eq!(parsed.snap_speed, 0.05);
    }

    #[test]
    fn malformed_entries_fall_back_to_defaults() {
        let parsed = AppConfig::parse_config(
            "accumulation_ms = fast\ntoggle_sheet = NotAKey\nnonsense\n",
        );
        assert_eq!(parsed.accumulation_ms, 100);
        assert_eq!(
            parsed.bindings.get(&Action::ToggleSheet),
            AppConfig::default_bindings().get(&Action::ToggleSheet)
        );
    }

    #[test]
    fn keybind_parse_handles_modifiers_and_specials() {
        assert_eq!(
            KeyBind::parse("Ctrl+c"),
            Some(KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            KeyBind::parse("Space"),
            Some(KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE))
        );
        assert_eq!(
            KeyBind::parse("Alt+Up"),
            Some(KeyBind::new(KeyCode::Up, KeyModifiers::ALT))
        );
        assert_eq!(KeyBind::parse("Hyper+x"), None);
    }

    #[test]
    fn match_key_prefers_more_modifiers() {
        let mut config = AppConfig::defaults();
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('q'), KeyModifiers::NONE)]);
        config.bindings.insert(
            Action::OpenHelp,
            vec![KeyBind::new(KeyCode::Char('q'), KeyModifiers::CONTROL)],
        );

        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(config.match_key(event), Some(Action::OpenHelp));
    }
}
