//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the windowing backend and the logic thread.
//
// Components:
// - `interface`: messages crossing the thread boundary, platform errors
// - `event_collector`: logic-side draining of platform events
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{CoreCommand, PlatformEvent};

//=== Public API ==========================================================

pub use interface::PlatformError;
