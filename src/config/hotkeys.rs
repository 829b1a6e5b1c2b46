//! Hotkey configuration management.
//!
//! This module defines the keymap of the application: the actions keys can
//! trigger, how key combinations are matched and serialized, and the default
//! bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // Selection protocol
    SelectNext,
    SelectPrevious,
    ClearSelection,
    FocusSearch,

    // Issue actions
    NewIssue,
    DeleteIssue,
    CycleStatus,
    CyclePriority,
    CycleAssignee,
    EditTitle,
    EditDescription,
    CopyIdentifier,

    // Sidebar
    ViewAll,
    ViewActive,
    ViewBacklog,
    FilterBacklog,
    FilterTodo,
    FilterInProgress,
    FilterDone,
    FilterCancelled,

    ToggleLog,
    Quit,
}

/// Represents a key combination (KeyCode + modifiers).
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Hotkey { code, modifiers }
    }

    /// Unmodified character key.
    ///
    pub fn char(c: char) -> Self {
        Hotkey::new(KeyCode::Char(c), KeyModifiers::empty())
    }

    pub fn key(code: KeyCode) -> Self {
        Hotkey::new(code, KeyModifiers::empty())
    }
}

/// Custom serialization for Hotkey.
///
impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{Error, SerializeStruct};
        let code = KeyCodeSerde::try_from(self.code).map_err(S::Error::custom)?;
        let mut state = serializer.serialize_struct("Hotkey", 3)?;
        state.serialize_field("code", &code)?;
        if let KeyCode::Char(c) = self.code {
            state.serialize_field("char", &c)?;
        }
        state.serialize_field("modifiers", &KeyModifiersSerde::from(self.modifiers))?;
        state.end()
    }
}

/// Custom deserialization for Hotkey.
///
impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct HotkeyHelper {
            code: KeyCodeSerde,
            #[serde(default)]
            char: Option<char>,
            #[serde(default)]
            modifiers: KeyModifiersSerde,
        }

        let helper = HotkeyHelper::deserialize(deserializer)?;
        let code = match helper.code {
            KeyCodeSerde::Char => match helper.char {
                Some(c) => KeyCode::Char(c),
                None => {
                    return Err(serde::de::Error::custom(
                        "Char key code requires 'char' field",
                    ))
                }
            },
            KeyCodeSerde::Esc => KeyCode::Esc,
            KeyCodeSerde::Enter => KeyCode::Enter,
            KeyCodeSerde::Backspace => KeyCode::Backspace,
            KeyCodeSerde::Tab => KeyCode::Tab,
            KeyCodeSerde::Delete => KeyCode::Delete,
            KeyCodeSerde::Up => KeyCode::Up,
            KeyCodeSerde::Down => KeyCode::Down,
            KeyCodeSerde::Left => KeyCode::Left,
            KeyCodeSerde::Right => KeyCode::Right,
        };
        Ok(Hotkey {
            code,
            modifiers: helper.modifiers.into(),
        })
    }
}

/// Helper enum for serializing KeyCode.
///
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
enum KeyCodeSerde {
    Char,
    Esc,
    Enter,
    Backspace,
    Tab,
    Delete,
    Up,
    Down,
    Left,
    Right,
}

impl TryFrom<KeyCode> for KeyCodeSerde {
    type Error = String;

    fn try_from(code: KeyCode) -> Result<Self, Self::Error> {
        match code {
            KeyCode::Char(_) => Ok(KeyCodeSerde::Char),
            KeyCode::Esc => Ok(KeyCodeSerde::Esc),
            KeyCode::Enter => Ok(KeyCodeSerde::Enter),
            KeyCode::Backspace => Ok(KeyCodeSerde::Backspace),
            KeyCode::Tab => Ok(KeyCodeSerde::Tab),
            KeyCode::Delete => Ok(KeyCodeSerde::Delete),
            KeyCode::Up => Ok(KeyCodeSerde::Up),
            KeyCode::Down => Ok(KeyCodeSerde::Down),
            KeyCode::Left => Ok(KeyCodeSerde::Left),
            KeyCode::Right => Ok(KeyCodeSerde::Right),
            other => Err(format!("unsupported key code {:?}", other)),
        }
    }
}

/// Helper struct for serializing KeyModifiers.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KeyModifiersSerde {
    #[serde(default)]
    control: bool,
    #[serde(default)]
    shift: bool,
    #[serde(default)]
    alt: bool,
    #[serde(default, rename = "super")]
    super_key: bool,
    #[serde(default)]
    meta: bool,
}

impl From<KeyModifiers> for KeyModifiersSerde {
    fn from(modifiers: KeyModifiers) -> Self {
        KeyModifiersSerde {
            control: modifiers.contains(KeyModifiers::CONTROL),
            shift: modifiers.contains(KeyModifiers::SHIFT),
            alt: modifiers.contains(KeyModifiers::ALT),
            super_key: modifiers.contains(KeyModifiers::SUPER),
            meta: modifiers.contains(KeyModifiers::META),
        }
    }
}

impl From<KeyModifiersSerde> for KeyModifiers {
    fn from(serde: KeyModifiersSerde) -> Self {
        let mut result = KeyModifiers::empty();
        if serde.control {
            result |= KeyModifiers::CONTROL;
        }
        if serde.shift {
            result |= KeyModifiers::SHIFT;
        }
        if serde.alt {
            result |= KeyModifiers::ALT;
        }
        if serde.super_key {
            result |= KeyModifiers::SUPER;
        }
        if serde.meta {
            result |= KeyModifiers::META;
        }
        result
    }
}

/// Maps each action to the key combinations that trigger it.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keymap {
    bindings: HashMap<HotkeyAction, Vec<Hotkey>>,
}

impl Default for Keymap {
    fn default() -> Self {
        default_keymap()
    }
}

impl Keymap {
    /// Return the bindings for an action.
    ///
    pub fn bindings(&self, action: HotkeyAction) -> &[Hotkey] {
        self.bindings
            .get(&action)
            .map(|keys| keys.as_slice())
            .unwrap_or(&[])
    }

    pub fn bind(&mut self, action: HotkeyAction, keys: Vec<Hotkey>) -> &mut Self {
        self.bindings.insert(action, keys);
        self
    }

    /// Fill actions missing from a user keymap with their default bindings.
    /// Default keys the user already bound to another action are left out.
    ///
    pub fn with_defaults(mut self) -> Self {
        let taken: HashSet<_> = self.bindings.values().flatten().map(key_identity).collect();
        for (action, keys) in default_keymap().bindings {
            if self.bindings.contains_key(&action) {
                continue;
            }
            let keys = keys
                .into_iter()
                .filter(|hotkey| !taken.contains(&key_identity(hotkey)))
                .collect();
            self.bindings.insert(action, keys);
        }
        self
    }

    /// Return a key bound to more than one action, if any.
    ///
    pub fn conflicting_hotkey(&self) -> Option<&Hotkey> {
        let mut owners = HashMap::new();
        for (action, keys) in &self.bindings {
            for hotkey in keys {
                let owner = owners.entry(key_identity(hotkey)).or_insert(*action);
                if *owner != *action {
                    return Some(hotkey);
                }
            }
        }
        None
    }

    /// Return the action bound to a key event, if any.
    ///
    pub fn action_for(&self, event: &KeyEvent) -> Option<HotkeyAction> {
        self.bindings
            .iter()
            .find(|(_, keys)| keys.iter().any(|hotkey| matches_hotkey(event, hotkey)))
            .map(|(action, _)| *action)
    }
}

/// Returns the default keymap.
///
pub fn default_keymap() -> Keymap {
    use HotkeyAction::*;

    let mut keymap = Keymap {
        bindings: HashMap::new(),
    };
    keymap
        .bind(SelectNext, vec![Hotkey::char('j'), Hotkey::key(KeyCode::Down)])
        .bind(SelectPrevious, vec![Hotkey::char('k'), Hotkey::key(KeyCode::Up)])
        .bind(ClearSelection, vec![Hotkey::key(KeyCode::Esc)])
        .bind(
            FocusSearch,
            vec![
                Hotkey::new(KeyCode::Char('/'), KeyModifiers::CONTROL),
                Hotkey::new(KeyCode::Char('/'), KeyModifiers::SUPER),
                Hotkey::new(KeyCode::Char('/'), KeyModifiers::META),
                // Legacy terminals encode Ctrl+/ as 0x1F, which crossterm reports as Ctrl+7
                Hotkey::new(KeyCode::Char('7'), KeyModifiers::CONTROL),
            ],
        )
        .bind(NewIssue, vec![Hotkey::char('n')])
        .bind(DeleteIssue, vec![Hotkey::char('d')])
        .bind(CycleStatus, vec![Hotkey::char('s')])
        .bind(CyclePriority, vec![Hotkey::char('p')])
        .bind(CycleAssignee, vec![Hotkey::char('a')])
        .bind(EditTitle, vec![Hotkey::char('e')])
        .bind(EditDescription, vec![Hotkey::char('E')])
        .bind(CopyIdentifier, vec![Hotkey::char('y')])
        .bind(ViewAll, vec![Hotkey::char('1')])
        .bind(ViewActive, vec![Hotkey::char('2')])
        .bind(ViewBacklog, vec![Hotkey::char('3')])
        .bind(FilterBacklog, vec![Hotkey::char('4')])
        .bind(FilterTodo, vec![Hotkey::char('5')])
        .bind(FilterInProgress, vec![Hotkey::char('6')])
        .bind(FilterDone, vec![Hotkey::char('7')])
        .bind(FilterCancelled, vec![Hotkey::char('8')])
        .bind(ToggleLog, vec![Hotkey::char('L')])
        .bind(
            Quit,
            vec![
                Hotkey::char('q'),
                Hotkey::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            ],
        );
    keymap
}

/// Terminals disagree on whether upper-case characters carry SHIFT, so it is
/// ignored for character keys.
///
fn normalized(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(_) => modifiers - KeyModifiers::SHIFT,
        _ => modifiers,
    }
}

fn key_identity(hotkey: &Hotkey) -> (KeyCode, KeyModifiers) {
    (hotkey.code, normalized(hotkey.code, hotkey.modifiers))
}

/// Checks if a KeyEvent matches a Hotkey.
///
pub fn matches_hotkey(event: &KeyEvent, hotkey: &Hotkey) -> bool {
    event.code == hotkey.code
        && normalized(event.code, event.modifiers) == normalized(hotkey.code, hotkey.modifiers)
}

/// Builds a footer text string from the keymap.
///
pub fn build_footer_text(keymap: &Keymap, actions: &[(HotkeyAction, &str)]) -> String {
    actions
        .iter()
        .filter_map(|(action, description)| {
            let keys = keymap.bindings(*action);
            if keys.is_empty() {
                return None;
            }
            let display: Vec<String> = keys.iter().take(2).map(format_hotkey_display).collect();
            Some(format!(" {}: {}", display.join("/"), description))
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats a hotkey for display in the footer.
///
pub fn format_hotkey_display(hotkey: &Hotkey) -> String {
    let mut parts = Vec::new();
    if hotkey.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if hotkey.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if hotkey.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if hotkey.modifiers.contains(KeyModifiers::SUPER) {
        parts.push("Super");
    }
    if hotkey.modifiers.contains(KeyModifiers::META) {
        parts.push("Meta");
    }

    let key_str = match &hotkey.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        _ => "?".to_string(),
    };

    if parts.is_empty() {
        key_str
    } else {
        format!("{}+{}", parts.join("+"), key_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_hotkey() {
        let hotkey = Hotkey::char('j');
        let event = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::empty());
        assert!(matches_hotkey(&event, &hotkey));

        let event2 = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::empty());
        assert!(!matches_hotkey(&event2, &hotkey));

        let event3 = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert!(!matches_hotkey(&event3, &hotkey));
    }

    #[test]
    fn test_matches_hotkey_ignores_shift_on_chars() {
        let hotkey = Hotkey::char('E');
        let with_shift = KeyEvent::new(KeyCode::Char('E'), KeyModifiers::SHIFT);
        let without_shift = KeyEvent::new(KeyCode::Char('E'), KeyModifiers::empty());
        assert!(matches_hotkey(&with_shift, &hotkey));
        assert!(matches_hotkey(&without_shift, &hotkey));
        assert!(!matches_hotkey(
            &KeyEvent::new(KeyCode::Char('e'), KeyModifiers::empty()),
            &hotkey
        ));
    }

    #[test]
    fn test_default_navigation_bindings() {
        let keymap = default_keymap();
        let cases = [
            (KeyCode::Char('j'), KeyModifiers::empty(), HotkeyAction::SelectNext),
            (KeyCode::Down, KeyModifiers::empty(), HotkeyAction::SelectNext),
            (KeyCode::Char('k'), KeyModifiers::empty(), HotkeyAction::SelectPrevious),
            (KeyCode::Up, KeyModifiers::empty(), HotkeyAction::SelectPrevious),
            (KeyCode::Esc, KeyModifiers::empty(), HotkeyAction::ClearSelection),
            (KeyCode::Char('/'), KeyModifiers::CONTROL, HotkeyAction::FocusSearch),
            (KeyCode::Char('/'), KeyModifiers::SUPER, HotkeyAction::FocusSearch),
            (KeyCode::Char('7'), KeyModifiers::CONTROL, HotkeyAction::FocusSearch),
            (KeyCode::Char('7'), KeyModifiers::empty(), HotkeyAction::FilterDone),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, HotkeyAction::Quit),
        ];
        for (code, modifiers, action) in cases {
            let event = KeyEvent::new(code, modifiers);
            assert_eq!(keymap.action_for(&event), Some(action), "{:?}", code);
        }
        let plain_slash = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::empty());
        assert_eq!(keymap.action_for(&plain_slash), None);
    }

    #[test]
    fn test_default_bindings_are_unambiguous() {
        let keymap = default_keymap();
        let mut seen = std::collections::HashSet::new();
        for keys in keymap.bindings.values() {
            for key in keys {
                assert!(seen.insert(key_identity(key)), "duplicate binding {:?}", key);
            }
        }
        assert_eq!(keymap.conflicting_hotkey(), None);
    }

    #[test]
    fn test_with_defaults_drops_taken_default_keys() {
        let mut keymap = Keymap {
            bindings: HashMap::new(),
        };
        keymap.bind(HotkeyAction::NewIssue, vec![Hotkey::char('j')]);
        let keymap = keymap.with_defaults();

        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::empty());
        assert_eq!(keymap.action_for(&j), Some(HotkeyAction::NewIssue));
        assert_eq!(
            keymap.bindings(HotkeyAction::SelectNext),
            &[Hotkey::key(KeyCode::Down)]
        );
        assert_eq!(keymap.conflicting_hotkey(), None);
    }

    #[test]
    fn test_conflicting_hotkey_detects_shared_key() {
        let mut keymap = Keymap {
            bindings: HashMap::new(),
        };
        keymap
            .bind(HotkeyAction::NewIssue, vec![Hotkey::char('x')])
            .bind(
                HotkeyAction::DeleteIssue,
                vec![Hotkey::new(KeyCode::Char('x'), KeyModifiers::SHIFT)],
            );
        assert_eq!(
            keymap.conflicting_hotkey().map(|key| key.code),
            Some(KeyCode::Char('x'))
        );

        keymap.bind(HotkeyAction::DeleteIssue, vec![Hotkey::char('x'), Hotkey::char('x')]);
        keymap.bind(HotkeyAction::NewIssue, vec![Hotkey::char('c')]);
        assert_eq!(keymap.conflicting_hotkey(), None);
    }

    #[test]
    fn test_with_defaults_fills_missing_actions() {
        let mut keymap = Keymap {
            bindings: HashMap::new(),
        };
        keymap.bind(HotkeyAction::NewIssue, vec![Hotkey::char('c')]);
        let keymap = keymap.with_defaults();
        assert_eq!(keymap.bindings(HotkeyAction::NewIssue), &[Hotkey::char('c')]);
        assert_eq!(
            keymap.bindings(HotkeyAction::SelectNext),
            default_keymap().bindings(HotkeyAction::SelectNext)
        );
    }

    #[test]
    fn test_hotkey_serialization() {
        let hotkey = Hotkey::new(KeyCode::Char('/'), KeyModifiers::CONTROL);
        let serialized = serde_yaml::to_string(&hotkey).unwrap();
        assert!(serialized.contains("/"));
        assert!(serialized.contains("control: true"));
        let deserialized: Hotkey = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(hotkey, deserialized);
    }

    #[test]
    fn test_hotkey_deserialization_requires_char() {
        let result: Result<Hotkey, _> = serde_yaml::from_str("code: Char\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unsupported_key_code_fails_to_serialize() {
        let hotkey = Hotkey::key(KeyCode::F(5));
        assert!(serde_yaml::to_string(&hotkey).is_err());
    }

    #[test]
    fn test_keymap_yaml_uses_action_names() {
        let mut keymap = Keymap {
            bindings: HashMap::new(),
        };
        keymap.bind(HotkeyAction::SelectNext, vec![Hotkey::key(KeyCode::Down)]);
        let yaml = serde_yaml::to_string(&keymap).unwrap();
        assert!(yaml.contains("select_next"));
        let parsed: Keymap = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, keymap);
    }

    #[test]
    fn test_build_footer_text() {
        let keymap = default_keymap();
        let text = build_footer_text(
            &keymap,
            &[
                (HotkeyAction::SelectNext, "next"),
                (HotkeyAction::NewIssue, "new"),
            ],
        );
        assert_eq!(text, " j/↓: next, n: new");
    }

    #[test]
    fn test_format_hotkey_display() {
        assert_eq!(
            format_hotkey_display(&Hotkey::new(KeyCode::Char('/'), KeyModifiers::CONTROL)),
            "Ctrl+/"
        );
        assert_eq!(format_hotkey_display(&Hotkey::char(' ')), "Space");
        assert_eq!(format_hotkey_display(&Hotkey::key(KeyCode::Esc)), "Esc");
    }
}
