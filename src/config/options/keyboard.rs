//! Keyboard action registry and the shortcut defaults derived from it

use super::defaults::{DefaultOption, DefaultValue};
use super::error::Result;
use once_cell::sync::Lazy;

/// Prefix of every per-action shortcut option
pub const SHORTCUT_OPTION_PREFIX: &str = "keyboardShortcuts";

/// A registered keyboard action, or a separator grouping the ones after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardAction {
    /// None for separators
    pub action_name: Option<String>,
    pub separator: Option<String>,
    pub default_shortcuts: Vec<String>,
}

impl KeyboardAction {
    pub fn action(name: &str, shortcuts: &[&str]) -> Self {
        Self {
            action_name: Some(name.to_string()),
            separator: None,
            default_shortcuts: shortcuts.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn separator(label: &str) -> Self {
        Self {
            action_name: None,
            separator: Some(label.to_string()),
            default_shortcuts: Vec::new(),
        }
    }

    /// Option holding this action's shortcuts, None for separators
    pub fn option_name(&self) -> Option<String> {
        self.action_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(shortcut_option_name)
    }
}

/// Supplies the keyboard actions known to the application
pub trait KeyboardActionSource {
    fn default_keyboard_actions(&self) -> Vec<KeyboardAction>;
}

impl KeyboardActionSource for Vec<KeyboardAction> {
    fn default_keyboard_actions(&self) -> Vec<KeyboardAction> {
        self.clone()
    }
}

/// `backInNoteHistory` -> `keyboardShortcutsBackInNoteHistory`
pub fn shortcut_option_name(action_name: &str) -> String {
    let mut chars = action_name.chars();
    let mut name = String::from(SHORTCUT_OPTION_PREFIX);
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

/// One local-only default per named action, value is the JSON list of its shortcuts
pub fn keyboard_default_options(source: &dyn KeyboardActionSource) -> Result<Vec<DefaultOption>> {
    let mut defaults = Vec::new();

    for action in source.default_keyboard_actions() {
        let Some(name) = action.option_name() else {
            continue;
        };
        let value = serde_json::to_string(&action.default_shortcuts)?;
        defaults.push(DefaultOption {
            name,
            value: DefaultValue::Literal(value),
            is_synced: false,
        });
    }

    Ok(defaults)
}

/// Actions shipped with the application
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinKeyboardActions;

impl KeyboardActionSource for BuiltinKeyboardActions {
    fn default_keyboard_actions(&self) -> Vec<KeyboardAction> {
        BUILTIN_ACTIONS.clone()
    }
}

static BUILTIN_ACTIONS: Lazy<Vec<KeyboardAction>> = Lazy::new(|| {
    vec![
        KeyboardAction::separator("Note navigation"),
        KeyboardAction::action("backInNoteHistory", &[history_back()]),
        KeyboardAction::action("forwardInNoteHistory", &[history_forward()]),
        KeyboardAction::action("jumpToNote", &["CommandOrControl+J"]),
        KeyboardAction::action("scrollToActiveNote", &["CommandOrControl+."]),
        KeyboardAction::action("quickSearch", &["CommandOrControl+S"]),
        KeyboardAction::action("searchInSubtree", &["CommandOrControl+Shift+S"]),
        KeyboardAction::action("expandSubtree", &[]),
        KeyboardAction::action("collapseTree", &["Alt+C"]),
        KeyboardAction::action("collapseSubtree", &["Alt+-"]),
        KeyboardAction::action("sortChildNotes", &["Alt+S"]),
        KeyboardAction::separator("Creating and moving notes"),
        KeyboardAction::action("createNoteAfter", &["CommandOrControl+O"]),
        KeyboardAction::action("createNoteInto", &["CommandOrControl+P"]),
        KeyboardAction::action("deleteNotes", &["Delete"]),
        KeyboardAction::action("moveNoteUp", &["CommandOrControl+Up"]),
        KeyboardAction::action("moveNoteDown", &["CommandOrControl+Down"]),
        KeyboardAction::action("editNoteTitle", &["Enter"]),
        KeyboardAction::separator("Tabs and windows"),
        KeyboardAction::action("openNewTab", &["CommandOrControl+T"]),
        KeyboardAction::action("closeActiveTab", &["CommandOrControl+W"]),
        KeyboardAction::action("reopenLastTab", &["CommandOrControl+Shift+T"]),
        KeyboardAction::action("activateNextTab", &["CommandOrControl+Tab"]),
        KeyboardAction::action("activatePreviousTab", &["CommandOrControl+Shift+Tab"]),
        KeyboardAction::action("openNewWindow", &[]),
        KeyboardAction::separator("Dialogs"),
        KeyboardAction::action("showNoteSource", &[]),
        KeyboardAction::action("showOptions", &[]),
        KeyboardAction::action("showRevisions", &[]),
        KeyboardAction::action("showHelp", &["F1"]),
        KeyboardAction::separator("Other"),
        KeyboardAction::action("toggleZenMode", &["F9"]),
        KeyboardAction::action("findInText", &["CommandOrControl+F"]),
        KeyboardAction::action("toggleLeftPane", &[]),
        KeyboardAction::action("printActiveNote", &[]),
        KeyboardAction::action("reloadFrontendApp", &["F5", "CommandOrControl+R"]),
        KeyboardAction::action("toggleFullscreen", &["F11"]),
        KeyboardAction::action("zoomOut", &["CommandOrControl+-"]),
        KeyboardAction::action("zoomIn", &["CommandOrControl+="]),
        KeyboardAction::action("zoomReset", &["CommandOrControl+0"]),
    ]
});

fn history_back() -> &'static str {
    if cfg!(target_os = "macos") {
        "CommandOrControl+["
    } else {
        "Alt+Left"
    }
}

fn history_forward() -> &'static str {
    if cfg!(target_os = "macos") {
        "CommandOrControl+]"
    } else {
        "Alt+Right"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_option_name() {
        assert_eq!(
            shortcut_option_name("backInNoteHistory"),
            "keyboardShortcutsBackInNoteHistory"
        );
        assert_eq!(shortcut_option_name("x"), "keyboardShortcutsX");
    }

    #[test]
    fn test_separators_are_skipped() {
        let actions = vec![
            KeyboardAction::separator("Group"),
            KeyboardAction::action("showHelp", &["F1"]),
            KeyboardAction::action("", &["F2"]),
        ];

        let defaults = keyboard_default_options(&actions).unwrap();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name, "keyboardShortcutsShowHelp");
        assert!(!defaults[0].is_synced);
        assert_eq!(defaults[0].value.as_literal(), Some(r#"["F1"]"#));
    }

    #[test]
    fn test_empty_shortcut_list_encodes_as_empty_array() {
        let actions = vec![KeyboardAction::action("openNewWindow", &[])];
        let defaults = keyboard_default_options(&actions).unwrap();
        assert_eq!(defaults[0].value.as_literal(), Some("[]"));
    }

    #[test]
    fn test_builtin_action_names_are_unique() {
        let defaults = keyboard_default_options(&BuiltinKeyboardActions).unwrap();
        let mut names: Vec<_> = defaults.iter().map(|d| d.name.clone()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert!(total > 0);
    }
}
