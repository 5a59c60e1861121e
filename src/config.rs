//! User configuration: picker definitions, key bindings, and persistence.
//!
//! Loaded from `$XDG_CONFIG_HOME/ruler-picker/config.toml` (default
//! `~/.config/ruler-picker/config.toml`).  Every key is optional:
//!
//! ```toml
//! tick_rate_ms = 33
//! deceleration = 0.35
//!
//! [weight]
//! minimum = 35
//! maximum = 150
//! default = 55
//! highlight_unit = " KG"
//!
//! [height]
//! direction = "vertical"
//! alignment = "start"
//!
//! [keys]
//! step_forward = ["Right", "l"]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use ruler_picker::{Alignment, Configuration, Metrics, PickerError, ScrollDirection, ValueLabels};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    StepBack,
    StepForward,
    JumpBack,
    JumpForward,
    First,
    Last,
    SwitchPicker,
    Report,
    ToggleHelp,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::StepBack,
        Action::StepForward,
        Action::JumpBack,
        Action::JumpForward,
        Action::First,
        Action::Last,
        Action::SwitchPicker,
        Action::Report,
        Action::ToggleHelp,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::StepBack => "Previous Value",
            Action::StepForward => "Next Value",
            Action::JumpBack => "Back One Division",
            Action::JumpForward => "Forward One Division",
            Action::First => "Minimum",
            Action::Last => "Maximum",
            Action::SwitchPicker => "Switch Picker",
            Action::Report => "Show Values",
            Action::ToggleHelp => "Controls",
            Action::Quit => "Quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "step_back" => Some(Action::StepBack),
            "step_forward" => Some(Action::StepForward),
            "jump_back" => Some(Action::JumpBack),
            "jump_forward" => Some(Action::JumpForward),
            "first" => Some(Action::First),
            "last" => Some(Action::Last),
            "switch_picker" => Some(Action::SwitchPicker),
            "report" => Some(Action::Report),
            "toggle_help" => Some(Action::ToggleHelp),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
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

    /// User-friendly display string (e.g. `"Alt+↑"`, `"Ctrl+c"`, `"q"`).
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
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
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
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── pickers ───────────

/// Full definition of one on-screen picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSpec {
    pub title: String,
    pub minimum: i64,
    pub maximum: i64,
    pub default: i64,
    pub divisions: u32,
    pub full_line: f64,
    pub mid_line: f64,
    pub small_line: f64,
    pub direction: ScrollDirection,
    pub alignment: Alignment,
    pub line_spacing: f64,
    pub label_spacing: f64,
    /// Appended to tape labels.
    pub tick_unit: String,
    /// Appended to the indicator label.
    pub highlight_unit: String,
}

impl PickerSpec {
    /// Horizontal weight tape, 35–150 KG.
    pub fn weight() -> Self {
        Self {
            title: "Weight".into(),
            minimum: 35,
            maximum: 150,
            default: 55,
            divisions: 5,
            full_line: 3.0,
            mid_line: 2.0,
            small_line: 1.0,
            direction: ScrollDirection::Horizontal,
            alignment: Alignment::End,
            line_spacing: 1.0,
            label_spacing: 1.0,
            tick_unit: String::new(),
            highlight_unit: " KG".into(),
        }
    }

    /// Vertical height tape, 100–250 cm.
    pub fn height() -> Self {
        Self {
            title: "Height".into(),
            minimum: 100,
            maximum: 250,
            default: 155,
            divisions: 5,
            full_line: 4.0,
            mid_line: 3.0,
            small_line: 2.0,
            direction: ScrollDirection::Vertical,
            alignment: Alignment::Start,
            line_spacing: 0.0,
            label_spacing: 1.0,
            tick_unit: " cm".into(),
            highlight_unit: " cm".into(),
        }
    }

    /// Build the picker configuration, failing on invalid values.
    pub fn to_configuration(&self) -> Result<Configuration, PickerError> {
        let metrics = Metrics::new(
            self.minimum,
            self.default,
            self.maximum,
            self.divisions,
            self.full_line,
            self.mid_line,
            self.small_line,
        )?;
        Configuration::new(
            self.direction,
            self.alignment,
            self.line_spacing,
            self.label_spacing,
            metrics,
        )
    }

    pub fn labels(&self) -> ValueLabels {
        ValueLabels::new()
            .tick_suffix(self.tick_unit.clone())
            .highlight_suffix(self.highlight_unit.clone())
    }

    /// Indicator text for `value`, as shown when a selection settles.
    pub fn highlight_label(&self, value: i64) -> String {
        format!("{value}{}", self.highlight_unit)
    }
}

/// Partial picker table as written in the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PickerOverrides {
    title: Option<String>,
    minimum: Option<i64>,
    maximum: Option<i64>,
    default: Option<i64>,
    divisions: Option<u32>,
    full_line: Option<f64>,
    mid_line: Option<f64>,
    small_line: Option<f64>,
    direction: Option<ScrollDirection>,
    alignment: Option<Alignment>,
    line_spacing: Option<f64>,
    label_spacing: Option<f64>,
    tick_unit: Option<String>,
    highlight_unit: Option<String>,
}

impl PickerOverrides {
    fn apply(self, base: PickerSpec) -> PickerSpec {
        PickerSpec {
            title: self.title.unwrap_or(base.title),
            minimum: self.minimum.unwrap_or(base.minimum),
            maximum: self.maximum.unwrap_or(base.maximum),
            default: self.default.unwrap_or(base.default),
            divisions: self.divisions.unwrap_or(base.divisions),
            full_line: self.full_line.unwrap_or(base.full_line),
            mid_line: self.mid_line.unwrap_or(base.mid_line),
            small_line: self.small_line.unwrap_or(base.small_line),
            direction: self.direction.unwrap_or(base.direction),
            alignment: self.alignment.unwrap_or(base.alignment),
            line_spacing: self.line_spacing.unwrap_or(base.line_spacing),
            label_spacing: self.label_spacing.unwrap_or(base.label_spacing),
            tick_unit: self.tick_unit.unwrap_or(base.tick_unit),
            highlight_unit: self.highlight_unit.unwrap_or(base.highlight_unit),
        }
    }
}

/// On-disk layout of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    tick_rate_ms: Option<u64>,
    deceleration: Option<f64>,
    weight: PickerOverrides,
    height: PickerOverrides,
    keys: HashMap<String, Vec<String>>,
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: pickers, animation, and keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Event-loop tick interval; drives deceleration frames.
    pub tick_rate_ms: u64,
    /// Fraction of the remaining distance covered per deceleration frame.
    pub deceleration: f64,
    pub weight: PickerSpec,
    pub height: PickerSpec,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            tick_rate_ms: 33,
            deceleration: 0.35,
            weight: PickerSpec::weight(),
            height: PickerSpec::height(),
        }
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(
            StepBack,
            vec![KeyBind::new(Left, n), KeyBind::new(Up, n), KeyBind::new(Char('h'), n), KeyBind::new(Char('k'), n)],
        );
        m.insert(
            StepForward,
            vec![KeyBind::new(Right, n), KeyBind::new(Down, n), KeyBind::new(Char('l'), n), KeyBind::new(Char('j'), n)],
        );
        m.insert(JumpBack, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('['), n)]);
        m.insert(JumpForward, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(']'), n)]);
        m.insert(First, vec![KeyBind::new(Home, n)]);
        m.insert(Last, vec![KeyBind::new(End, n)]);
        m.insert(SwitchPicker, vec![KeyBind::new(Tab, n)]);
        m.insert(Report, vec![KeyBind::new(Enter, n)]);
        m.insert(ToggleHelp, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

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

    /// Format the binding list for a given action (e.g. `"← / h"`).
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
            "drag/scroll or {}{}: adjust | {}: switch | {}: values | {}: controls",
            self.short_binding(Action::StepBack),
            self.short_binding(Action::StepForward),
            self.short_binding(Action::SwitchPicker),
            self.short_binding(Action::Report),
            self.short_binding(Action::ToggleHelp),
        )
    }

    /// Rows for the help popup.
    pub fn help_rows(&self) -> Vec<(&'static str, String)> {
        Action::ALL
            .iter()
            .map(|&action| (action.label(), self.display_bindings(action)))
            .collect()
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from `path` (or the default location).  A missing file
    /// at the default location yields the defaults; a missing explicit path
    /// or a malformed file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };
        if !explicit && !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse config-file contents on top of the defaults.
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(s)?;
        let defaults = Self::default();

        let weight = file.weight.apply(PickerSpec::weight());
        let height = file.height.apply(PickerSpec::height());
        // Fail at load time rather than when the picker is built.
        weight.to_configuration().context("[weight]")?;
        height.to_configuration().context("[height]")?;

        let mut bindings = defaults.bindings;
        for (key, values) in file.keys {
            let Some(action) = Action::from_config_key(&key) else {
                tracing::warn!("ignoring unknown action '{key}' in [keys]");
                continue;
            };
            let parsed: Vec<KeyBind> = values.iter().filter_map(|v| KeyBind::parse(v.trim())).collect();
            if parsed.is_empty() {
                tracing::warn!("no valid keys for '{key}', keeping defaults");
                continue;
            }
            bindings.insert(action, parsed);
        }

        Ok(Self {
            bindings,
            // Keep this bounded for predictable animation.
            tick_rate_ms: file.tick_rate_ms.unwrap_or(defaults.tick_rate_ms).clamp(10, 250),
            deceleration: file.deceleration.unwrap_or(defaults.deceleration),
            weight,
            height,
        })
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/ruler-picker/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("ruler-picker").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.weight, PickerSpec::weight());
        assert_eq!(config.height, PickerSpec::height());
        assert_eq!(config.tick_rate_ms, 33);
    }

    #[test]
    fn test_partial_picker_table_keeps_other_defaults() {
        let config = AppConfig::parse(
            r#"
            tick_rate_ms = 1
            [height]
            maximum = 220
            alignment = "end"
            "#,
        )
        .unwrap();
        assert_eq!(config.height.maximum, 220);
        assert_eq!(config.height.alignment, Alignment::End);
        assert_eq!(config.height.minimum, 100);
        assert_eq!(config.height.direction, ScrollDirection::Vertical);
        assert_eq!(config.tick_rate_ms, 10);
    }

    #[test]
    fn test_invalid_picker_fails_fast() {
        assert!(AppConfig::parse("[weight]\ndivisions = 0").is_err());
        assert!(AppConfig::parse("[height]\nminimum = 300").is_err());
        assert!(AppConfig::parse("[weight]\nbogus = 1").is_err());
        assert!(AppConfig::parse(
            "[weight]\nminimum = -9223372036854775808\nmaximum = 9223372036854775807"
        )
        .is_err());
    }

    #[test]
    fn test_key_overrides() {
        let config = AppConfig::parse(
            r#"
            [keys]
            step_forward = ["Ctrl+n", "x"]
            nonsense = ["z"]
            quit = ["Hyper+q"]
            "#,
        )
        .unwrap();
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(config.match_key(ctrl_n), Some(Action::StepForward));
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(config.match_key(right), None);
        // Unparseable bindings leave the defaults in place.
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(config.match_key(q), Some(Action::Quit));
    }

    #[test]
    fn test_keybind_parse_and_display() {
        assert_eq!(
            KeyBind::parse("Alt+Up"),
            Some(KeyBind::new(KeyCode::Up, KeyModifiers::ALT))
        );
        assert_eq!(KeyBind::parse("F5"), Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("Q"), Some(KeyBind::new(KeyCode::Char('Q'), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("Meta+x"), None);
        assert_eq!(KeyBind::new(KeyCode::Left, KeyModifiers::CONTROL).display(), "Ctrl+←");
    }

    #[test]
    fn test_picker_spec_builds_configuration() {
        let config = PickerSpec::height().to_configuration().unwrap();
        assert!(!config.is_horizontal());
        assert_eq!(config.metrics().default_value(), 155);
        assert_eq!(PickerSpec::weight().highlight_label(60), "60 KG");
    }
}
