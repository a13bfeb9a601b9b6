//=========================================================================
// Actions
//=========================================================================
//
// Abstract input intents, decoupled from physical keys.
//
// The engine predefines the movement and menu actions its games share;
// games add their own through `Action::Custom`.
//
//=========================================================================

/// Abstract input intent (move forward, menu confirm, ...).
///
/// Actions are bound to [`Scancode`](super::Scancode)s through
/// [`Bindings`](super::Bindings). Game-specific actions use `Custom`:
///
/// ```
/// use arcade_engine::prelude::*;
///
/// const ACTION_FLAP: Action = Action::custom(0);
///
/// let mut bindings = Bindings::new();
/// bindings.add(ACTION_FLAP, Scancode::Space);
/// assert!(bindings.matches(ACTION_FLAP, Scancode::Space));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MenuUp,
    MenuDown,
    MenuLeft,
    MenuRight,
    MenuOk,
    MenuBack,

    /// Game-defined action.
    Custom(u32),
}

impl Action {
    /// Creates a game-defined action.
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
