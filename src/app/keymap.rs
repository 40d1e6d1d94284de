//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Keys that resolve to no action are treated as text input by the active screen
//! (search box on the listing, focused field in the wizard), so defaults avoid
//! binding plain printable characters.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Open the add-user wizard from the listing.
    NewUser,
    /// Leave the wizard for the listing; on the listing, clear the search.
    BackToDashboard,
    /// Next step, or submit on the review step. No-op on the listing.
    Confirm,
    /// Go back one wizard step.
    PreviousStep,
    /// Next row on the listing, next input in the wizard.
    MoveDown,
    /// Previous row on the listing, previous input in the wizard.
    MoveUp,
    PageUp,
    PageDown,
    /// Swallow the key.
    Ignore,
}

const ALL_ACTIONS: [KeyAction; 10] = [
    KeyAction::Quit,
    KeyAction::NewUser,
    KeyAction::BackToDashboard,
    KeyAction::Confirm,
    KeyAction::PreviousStep,
    KeyAction::MoveDown,
    KeyAction::MoveUp,
    KeyAction::PageUp,
    KeyAction::PageDown,
    KeyAction::Ignore,
];

/// Mapping from `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::CONTROL, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Esc), KeyAction::BackToDashboard);
        bindings.insert((M::NONE, Enter), KeyAction::Confirm);
        bindings.insert((M::CONTROL, Char('b')), KeyAction::PreviousStep);
        bindings.insert((M::NONE, Tab), KeyAction::MoveDown);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        // Shift+Tab is BackTab in crossterm; some terminals also set SHIFT
        bindings.insert((M::NONE, BackTab), KeyAction::MoveUp);
        bindings.insert((M::SHIFT, BackTab), KeyAction::MoveUp);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        Self { bindings }
    }

    /// Load `path` if it exists; otherwise write the defaults there and use them.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default keybindings");
        }
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// Lines use `<Action> = <KeySpec>`; the legacy `<KeySpec> = <Action>` order is
    /// accepted too. File entries are layered over the defaults.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse keymap text, starting from defaults.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            tracing::debug!(line, "ignoring unrecognized keybinding");
        }
        map
    }

    /// Write the current keymap to a configuration file.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-dashboard keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: Ctrl+q, Enter, Esc, Tab, BackTab, Up, Down, PageUp, PageDown\n");
        buf.push_str("# Unbound printable keys are typed into the search box or the focused field.\n");
        buf.push_str("# NextField/PrevField are accepted as aliases of MoveDown/MoveUp.\n");
        buf.push_str("# Actions: ");
        let names: Vec<&str> = ALL_ACTIONS.iter().map(|a| format_action(*a)).collect();
        buf.push_str(&names.join(", "));
        buf.push_str("\n\n");

        let mut entries: Vec<(String, &'static str)> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| (Self::format_key(*mods, *code), format_action(*action)))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(&b.0)));
        entries.dedup();
        for (key, action) in entries {
            let _ = writeln!(&mut buf, "{} = {}", action, key);
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its bound action, if any.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Keys bound to `action`, formatted and sorted, for hint lines.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Format a key (modifiers + code) into a spec like "Ctrl+q" or "BackTab".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let mut rest = s;
    let mut mods = KeyModifiers::NONE;
    if let Some(after) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        rest = after;
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    // wizard-flavored names for the same actions
    match s {
        "NextField" => return Some(KeyAction::MoveDown),
        "PrevField" => return Some(KeyAction::MoveUp),
        _ => {}
    }
    ALL_ACTIONS.iter().copied().find(|a| format_action(*a) == s)
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::NewUser => "NewUser",
        KeyAction::BackToDashboard => "BackToDashboard",
        KeyAction::Confirm => "Confirm",
        KeyAction::PreviousStep => "PreviousStep",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::Ignore => "Ignore",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(mods: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, mods, KeyEventKind::Press)
    }

    #[test]
    fn defaults_leave_printable_keys_unbound() {
        let km = Keymap::default();
        for c in ['q', 'n', 'j', '/', ' ', 'A'] {
            assert_eq!(km.resolve(&key(KeyModifiers::NONE, KeyCode::Char(c))), None);
        }
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('c'))),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn parse_accepts_both_orders_and_skips_junk() {
        let km = Keymap::parse(
            "# comment\nPreviousStep = Ctrl+p\nF2 = Quit\nLeft = NewUser\nnonsense\nQuit =\n",
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('p'))),
            Some(KeyAction::PreviousStep)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Left)),
            Some(KeyAction::NewUser)
        );
        // defaults survive
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('b'))),
            Some(KeyAction::PreviousStep)
        );
    }

    #[test]
    fn field_navigation_names_are_accepted() {
        let km = Keymap::parse("NextField = Ctrl+j\nCtrl+k = PrevField\nMoveDown = Right\n");
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('j'))),
            Some(KeyAction::MoveDown)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::CONTROL, KeyCode::Char('k'))),
            Some(KeyAction::MoveUp)
        );
        assert_eq!(
            km.resolve(&key(KeyModifiers::NONE, KeyCode::Right)),
            Some(KeyAction::MoveDown)
        );
    }

    #[test]
    fn keys_for_lists_every_binding() {
        let km = Keymap::default();
        assert_eq!(km.keys_for(KeyAction::Quit), vec!["Ctrl+c", "Ctrl+q"]);
        assert_eq!(km.keys_for(KeyAction::MoveDown), vec!["Down", "Tab"]);
    }
}
