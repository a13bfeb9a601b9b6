//=========================================================================
// Input
//
// Backend-independent input vocabulary shared by states and the platform
// layer.
//
// Responsibilities:
// - Physical key identifiers (`Scancode`) and raw events (`InputEvent`)
// - Abstract intents (`Action`)
// - The action ↔ key lookup table with alias indirection (`Bindings`)
//
// Notes:
// The platform layer produces `InputEvent`s; states consume them and ask
// `Bindings` whether a key press triggers an action they care about.
//
//=========================================================================

//=== Submodules ==========================================================

mod action;
mod bindings;
mod event;

//=== Public API ==========================================================

pub use action::Action;
pub use bindings::Bindings;
pub use event::{InputEvent, Scancode};
