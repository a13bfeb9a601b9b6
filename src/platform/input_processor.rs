//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit window events into engine InputEvents.
//
// Architecture:
//   Winit Events → input_processor → InputEvent (engine type) → InputBuffer
//
// Keys are identified by physical location. Keys without an engine
// scancode are filtered out (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, Scancode};

//=== Event Processing ====================================================

/// Converts a Winit key event (filters unmapped keys).
pub(crate) fn process_key_event(key_event: &KeyEvent) -> Option<InputEvent> {
    let key = match key_event.physical_key {
        PhysicalKey::Code(code) => Scancode::from(code),
        PhysicalKey::Unidentified(_) => return None,
    };

    key_input_event(key, key_event.state, key_event.repeat)
}

/// Converts a new window inner size.
pub(crate) fn process_resize(size: PhysicalSize<u32>) -> InputEvent {
    InputEvent::WindowResized {
        width: size.width,
        height: size.height,
    }
}

fn key_input_event(key: Scancode, state: ElementState, repeat: bool) -> Option<InputEvent> {
    if key == Scancode::Unidentified {
        return None;
    }

    Some(match state {
        ElementState::Pressed => InputEvent::KeyDown { key, repeat },
        ElementState::Released => InputEvent::KeyUp { key },
    })
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine scancodes.
///
/// Maps A-Z, 0-9, arrows, keypad digits and common special keys. Anything
/// else becomes `Scancode::Unidentified`.
impl From<WinitKeyCode> for Scancode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => Scancode::Digit0,
            Digit1 => Scancode::Digit1,
            Digit2 => Scancode::Digit2,
            Digit3 => Scancode::Digit3,
            Digit4 => Scancode::Digit4,
            Digit5 => Scancode::Digit5,
            Digit6 => Scancode::Digit6,
            Digit7 => Scancode::Digit7,
            Digit8 => Scancode::Digit8,
            Digit9 => Scancode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => Scancode::KeyA,
            KeyB => Scancode::KeyB,
            KeyC => Scancode::KeyC,
            KeyD => Scancode::KeyD,
            KeyE => Scancode::KeyE,
            KeyF => Scancode::KeyF,
            KeyG => Scancode::KeyG,
            KeyH => Scancode::KeyH,
            KeyI => Scancode::KeyI,
            KeyJ => Scancode::KeyJ,
            KeyK => Scancode::KeyK,
            KeyL => Scancode::KeyL,
            KeyM => Scancode::KeyM,
            KeyN => Scancode::KeyN,
            KeyO => Scancode::KeyO,
            KeyP => Scancode::KeyP,
            KeyQ => Scancode::KeyQ,
            KeyR => Scancode::KeyR,
            KeyS => Scancode::KeyS,
            KeyT => Scancode::KeyT,
            KeyU => Scancode::KeyU,
            KeyV => Scancode::KeyV,
            KeyW => Scancode::KeyW,
            KeyX => Scancode::KeyX,
            KeyY => Scancode::KeyY,
            KeyZ => Scancode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => Scancode::ArrowUp,
            ArrowDown => Scancode::ArrowDown,
            ArrowLeft => Scancode::ArrowLeft,
            ArrowRight => Scancode::ArrowRight,

            //--- Keypad -------------------------------------------------------

            Numpad0 => Scancode::Numpad0,
            Numpad1 => Scancode::Numpad1,
            Numpad2 => Scancode::Numpad2,
            Numpad3 => Scancode::Numpad3,
            Numpad4 => Scancode::Numpad4,
            Numpad5 => Scancode::Numpad5,
            Numpad6 => Scancode::Numpad6,
            Numpad7 => Scancode::Numpad7,
            Numpad8 => Scancode::Numpad8,
            Numpad9 => Scancode::Numpad9,
            NumpadEnter => Scancode::NumpadEnter,

            //--- Special ------------------------------------------------------

            Space => Scancode::Space,
            Enter => Scancode::Return,
            Escape => Scancode::Escape,
            Tab => Scancode::Tab,
            Backspace => Scancode::Backspace,
            Delete => Scancode::Delete,

            _ => Scancode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
