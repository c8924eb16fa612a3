//! Keyboard bindings of the preview.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to preview actions.
///
/// Arrow keys and their vim counterparts drive the expanding height; single
/// letters trigger the remaining actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Bind `code` with `modifiers` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Expanding height
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::Uncover);
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::Uncover);
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::Cover);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::Cover);
        keys.bind(KeyCode::Char('m'), KeyModifiers::NONE, KeyAction::MomentumSnap);

        // Mode requests
        keys.bind(KeyCode::Char('e'), KeyModifiers::NONE, KeyAction::Expand);
        keys.bind(KeyCode::Char('c'), KeyModifiers::NONE, KeyAction::Collapse);

        // Misc
        keys.bind(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::LoadThumbnail);
        keys.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::CloseMenu);
        keys.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
