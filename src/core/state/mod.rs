//=========================================================================
// State System
//=========================================================================
//
// Layered application behavior driven by a bounded stack.
//
// Architecture:
//   StateManager
//     ├─ layers: Vec<Layer>          (bottom → top)
//     └─ host:   HostContext         (window + options)
//
// Flow:
//   process_event() / update()  → top-down walk, Flow decides pass-through
//   render()                    → transparency scan down, then draw upward
//
// Every hook is optional. A hook that is not provided returns `None`,
// and the manager applies its per-dispatch default (see `StateManager`).
//
//=========================================================================

//=== Module Declarations =================================================

mod hook_state;
mod state_manager;

//=== Public API ==========================================================

pub use hook_state::HookState;
pub use state_manager::{StateManager, StateManagerError};

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::Canvas;

//=== Flow ================================================================

/// Pass-through decision returned by `update` and `process_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep dispatching to the layer below.
    Continue,

    /// Stop the walk at this layer.
    Halt,
}

impl From<bool> for Flow {
    fn from(pass_through: bool) -> Self {
        if pass_through {
            Flow::Continue
        } else {
            Flow::Halt
        }
    }
}

//=== State Trait =========================================================

/// One layer of application behavior.
///
/// Every hook is optional: the default implementations return `None`,
/// meaning "not provided". The manager treats a missing hook as follows:
///
/// | Hook             | Missing hook                                  |
/// |------------------|-----------------------------------------------|
/// | `init`/`destroy` | logged, nothing else                          |
/// | `update`         | walk halts at this layer                      |
/// | `process_event`  | walk halts at this layer                      |
/// | `is_transparent` | transparency scan stops here (treated opaque) |
/// | `render`         | layer skipped                                 |
///
/// Hooks that receive the manager may push or pop it, including popping
/// the state currently running. A state that pops itself is destroyed
/// right after its hook returns and the current walk ends.
///
/// # Examples
///
/// ```
/// use arcade_engine::prelude::*;
///
/// struct Pause;
///
/// impl State for Pause {
///     fn update(&mut self, _delta_ms: u64, _manager: &mut StateManager) -> Option<Flow> {
///         Some(Flow::Halt)
///     }
///
///     fn is_transparent(&self) -> Option<bool> {
///         Some(true)
///     }
/// }
///
/// let mut manager = StateManager::new(3, HostContext::default()).unwrap();
/// manager.push(Pause).unwrap();
/// manager.update(16);
/// ```
pub trait State: 'static {
    /// Called once right after the state is pushed.
    fn init(&mut self, _manager: &mut StateManager) -> Option<()> {
        None
    }

    /// Called once when the state leaves the stack, before it is dropped.
    fn destroy(&mut self) -> Option<()> {
        None
    }

    /// Per-tick logic. `delta_ms` is the time since the previous tick.
    fn update(&mut self, _delta_ms: u64, _manager: &mut StateManager) -> Option<Flow> {
        None
    }

    /// Whether the layer beneath must be drawn too.
    fn is_transparent(&self) -> Option<bool> {
        None
    }

    fn render(&mut self, _canvas: &mut dyn Canvas) -> Option<()> {
        None
    }

    fn process_event(
        &mut self,
        _event: &InputEvent,
        _manager: &mut StateManager,
    ) -> Option<Flow> {
        None
    }

    /// Name used in log messages.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
