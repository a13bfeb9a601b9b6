//=========================================================================
// Bindings
//=========================================================================
//
// Maps abstract actions to physical scancodes, with alias indirection.
//
// Architecture:
//   associations: Action → [Scancode]
//   aliases:      Action → [Action]
//
// `matches(action, code)` is true when `code` is bound directly to
// `action`, or bound directly to one of the actions `action` aliases.
// Aliases are expanded exactly one level: an alias of an alias does not
// contribute its codes.
//
// An action whose code (or alias) list becomes empty is removed from the
// map entirely, so `has()` reflects only actions with live entries.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{
    action::Action,
    event::{InputEvent, Scancode},
};

//=== Bindings ============================================================

/// Action ↔ scancode lookup table consumed by states.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    /// Direct bindings: action → scancodes (insertion order, duplicates allowed)
    associations: HashMap<Action, Vec<Scancode>>,

    /// Alias bindings: action → aliased actions
    aliases: HashMap<Action, Vec<Action>>,
}

impl Bindings {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the engine's default keyboard layout.
    ///
    /// | Action         | Keys                      |
    /// |----------------|---------------------------|
    /// | `MoveForward`  | Up, W                     |
    /// | `MoveBackward` | Down, S                   |
    /// | `MoveLeft`     | Left, A                   |
    /// | `MoveRight`    | Right, D                  |
    /// | `MenuOk`       | Space, Return, Keypad Enter |
    /// | `MenuBack`     | Escape, Backspace         |
    ///
    /// `MenuUp`/`MenuDown`/`MenuLeft`/`MenuRight` alias the matching move
    /// actions.
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();

        bindings.set(Action::MoveForward, Scancode::ArrowUp);
        bindings.add(Action::MoveForward, Scancode::KeyW);
        bindings.set(Action::MoveBackward, Scancode::ArrowDown);
        bindings.add(Action::MoveBackward, Scancode::KeyS);
        bindings.set(Action::MoveLeft, Scancode::ArrowLeft);
        bindings.add(Action::MoveLeft, Scancode::KeyA);
        bindings.set(Action::MoveRight, Scancode::ArrowRight);
        bindings.add(Action::MoveRight, Scancode::KeyD);

        bindings.set_alias(Action::MenuUp, Action::MoveForward);
        bindings.set_alias(Action::MenuDown, Action::MoveBackward);
        bindings.set_alias(Action::MenuLeft, Action::MoveLeft);
        bindings.set_alias(Action::MenuRight, Action::MoveRight);

        bindings.set(Action::MenuOk, Scancode::Space);
        bindings.add(Action::MenuOk, Scancode::Return);
        bindings.add(Action::MenuOk, Scancode::NumpadEnter);

        bindings.set(Action::MenuBack, Scancode::Escape);
        bindings.add(Action::MenuBack, Scancode::Backspace);

        bindings
    }

    //--- Direct Bindings --------------------------------------------------

    /// Replaces every scancode of `action` with `code`.
    pub fn set(&mut self, action: Action, code: Scancode) {
        self.associations.insert(action, vec![code]);
    }

    /// Appends `code` to the scancodes of `action`.
    pub fn add(&mut self, action: Action, code: Scancode) {
        self.associations.entry(action).or_default().push(code);
    }

    /// Removes one occurrence of `code` from `action`.
    pub fn remove(&mut self, action: Action, code: Scancode) {
        let Some(codes) = self.associations.get_mut(&action) else {
            return;
        };
        if let Some(index) = codes.iter().position(|&c| c == code) {
            codes.remove(index);
        }
        if codes.is_empty() {
            self.associations.remove(&action);
        }
    }

    /// Removes every scancode bound to `action`.
    pub fn clear(&mut self, action: Action) {
        self.associations.remove(&action);
    }

    //--- Aliases ----------------------------------------------------------

    /// Replaces every alias of `action` with `alias`.
    ///
    /// Aliasing an action to itself is rejected and leaves the table
    /// unchanged.
    pub fn set_alias(&mut self, action: Action, alias: Action) {
        if action == alias {
            debug!("Ignoring self-alias for {:?}", action);
            return;
        }
        self.aliases.insert(action, vec![alias]);
    }

    /// Appends `alias` to the aliases of `action`. Self-aliases are rejected.
    pub fn add_alias(&mut self, action: Action, alias: Action) {
        if action == alias {
            debug!("Ignoring self-alias for {:?}", action);
            return;
        }
        self.aliases.entry(action).or_default().push(alias);
    }

    /// Removes one occurrence of `alias` from `action`.
    pub fn remove_alias(&mut self, action: Action, alias: Action) {
        let Some(aliases) = self.aliases.get_mut(&action) else {
            return;
        };
        if let Some(index) = aliases.iter().position(|&a| a == alias) {
            aliases.remove(index);
        }
        if aliases.is_empty() {
            self.aliases.remove(&action);
        }
    }

    /// Removes every alias of `action`.
    pub fn clear_alias(&mut self, action: Action) {
        self.aliases.remove(&action);
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if `action` has direct scancodes or aliases.
    pub fn has(&self, action: Action) -> bool {
        self.associations.contains_key(&action) || self.aliases.contains_key(&action)
    }

    /// Returns the scancodes bound directly to `action`.
    ///
    /// Aliases are not expanded.
    pub fn get(&self, action: Action) -> &[Scancode] {
        self.associations
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the aliases of `action`.
    pub fn aliases(&self, action: Action) -> &[Action] {
        self.aliases.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if `code` triggers `action`, directly or through one
    /// level of alias.
    pub fn matches(&self, action: Action, code: Scancode) -> bool {
        if self.get(action).contains(&code) {
            return true;
        }
        self.aliases(action)
            .iter()
            .any(|&alias| self.get(alias).contains(&code))
    }

    /// Returns `true` if `event` is a key press that triggers `action`.
    pub fn matches_event(&self, action: Action, event: &InputEvent) -> bool {
        event
            .pressed_key()
            .is_some_and(|key| self.matches(action, key))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
