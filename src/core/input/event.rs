//=========================================================================
// Input Event Types
//
// Engine-side representation of raw input.
//
// Platform-specific input (winit today) is translated into these types
// before it reaches the state stack, so states and bindings never see a
// backend type.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateManager::process_event()
//         ↓
//    Bindings::matches() inside each State
// ```
//
//=========================================================================

//=== Scancode ============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - Keypad digits and keypad enter
/// - Common special keys (Space, Return, Escape, etc.)
///
/// Additional keys can be added as needed without breaking existing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scancode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Keypad -----------------------------------------------------------

    /// Keypad digits: 0-9
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,

    NumpadEnter,

    //--- Special Keys -----------------------------------------------------

    Space,

    /// Main Return/Enter key
    Return,

    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Raw event delivered to the state stack once per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key pressed. `repeat` is set for auto-repeat presses.
    KeyDown { key: Scancode, repeat: bool },

    /// Key released.
    KeyUp { key: Scancode },

    /// Window inner size changed, in pixels.
    WindowResized { width: u32, height: u32 },

    /// Application quit requested (window closed or a state asked for it).
    Quit,
}

impl InputEvent {
    /// Convenience constructor for a non-repeat key press.
    #[inline]
    pub const fn key_down(key: Scancode) -> Self {
        Self::KeyDown { key, repeat: false }
    }

    /// Returns the pressed key if this is a key-down event.
    pub fn pressed_key(&self) -> Option<Scancode> {
        match *self {
            Self::KeyDown { key, .. } => Some(key),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
