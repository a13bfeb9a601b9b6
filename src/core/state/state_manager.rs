//=========================================================================
// State Manager
//=========================================================================
//
// Bounded stack of owned states with layered dispatch.
//
// Layers are stored bottom → top. Each layer carries a unique id so a walk
// can tell whether the layer it dispatched to is still the same one after
// the hook returns.
//
// Re-entrancy:
//   While a hook runs, its state is taken out of the layer slot and the
//   hook receives `&mut StateManager`. On return:
//     - same layer id at the same index → state goes back into its slot
//     - otherwise the state was popped  → destroy it now, end the walk
//   Popping a layer whose state is in flight removes the layer and defers
//   the destroy to the end of the hook.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Flow, State};
use crate::core::host::{HostContext, HostWindow};
use crate::core::input::{Bindings, InputEvent};
use crate::core::options::Options;
use crate::core::render::Canvas;

//=== StateManagerError ===================================================

/// Recoverable stack operation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateManagerError {
    /// A manager needs room for at least one state.
    InvalidCapacity,

    /// No state was given to push.
    StateNull,

    /// The stack is at capacity; pop before pushing.
    Full,

    /// The stack has no state to pop.
    Empty,
}

impl fmt::Display for StateManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity => write!(f, "State stack capacity must be greater than zero"),
            Self::StateNull => write!(f, "No state given to push"),
            Self::Full => write!(f, "State stack is full"),
            Self::Empty => write!(f, "State stack is empty"),
        }
    }
}

impl std::error::Error for StateManagerError {}

//=== Layer ===============================================================

struct Layer {
    id: u64,

    /// `None` while one of the state's hooks is running.
    state: Option<Box<dyn State>>,
}

//=== StateManager ========================================================

/// Fixed-capacity stack of states plus the host resources they use.
///
/// # Examples
///
/// ```
/// use arcade_engine::prelude::*;
///
/// let mut manager = StateManager::new(2, HostContext::default()).unwrap();
/// assert_eq!(manager.top(), None);
///
/// manager.push(HookState::<()>::new()).unwrap();
/// manager.push(HookState::<()>::new()).unwrap();
/// assert_eq!(manager.top(), Some(1));
///
/// assert_eq!(
///     manager.push(HookState::<()>::new()),
///     Err(StateManagerError::Full)
/// );
/// ```
pub struct StateManager {
    layers: Vec<Layer>,
    capacity: usize,
    next_id: u64,
    host: HostContext,
}

impl StateManager {
    //--- Construction -----------------------------------------------------

    /// Creates an empty manager that holds at most `capacity` states.
    pub fn new(capacity: usize, host: HostContext) -> Result<Self, StateManagerError> {
        if capacity == 0 {
            return Err(StateManagerError::InvalidCapacity);
        }

        debug!("Created state manager with capacity {}", capacity);

        Ok(Self {
            layers: Vec::with_capacity(capacity),
            capacity,
            next_id: 0,
            host,
        })
    }

    //--- Stack Operations -------------------------------------------------

    /// Pushes `state` and runs its `init` hook.
    pub fn push<T: State>(&mut self, state: T) -> Result<(), StateManagerError> {
        self.push_boxed(Some(Box::new(state)))
    }

    /// Pushes an already boxed state. `None` is rejected with `StateNull`.
    pub fn push_boxed(&mut self, state: Option<Box<dyn State>>) -> Result<(), StateManagerError> {
        let state = state.ok_or(StateManagerError::StateNull)?;

        if self.layers.len() == self.capacity {
            warn!("Cannot push {}: state stack is full", state.name());
            return Err(StateManagerError::Full);
        }

        let id = self.next_id;
        self.next_id += 1;
        let name = state.name();

        debug!("Pushing state {} at layer {}", name, self.layers.len());
        self.layers.push(Layer { id, state: Some(state) });

        let index = self.layers.len() - 1;
        if let Some(None) = self.dispatch(index, |state, manager| state.init(manager)) {
            info!("State {} does not have an init hook", name);
        }

        Ok(())
    }

    /// Pops the top state, running its `destroy` hook.
    ///
    /// A state that pops itself from inside one of its own hooks is
    /// destroyed only after that hook returns, so a state pushed by the same
    /// hook has its `init` run first.
    pub fn pop(&mut self) -> Result<(), StateManagerError> {
        let Some(layer) = self.layers.pop() else {
            warn!("Cannot pop: state stack is empty");
            return Err(StateManagerError::Empty);
        };

        match layer.state {
            Some(state) => Self::destroy_state(state),
            None => debug!("Popped a running state; destroy deferred until its hook returns"),
        }

        Ok(())
    }

    /// Pops every state, top first.
    pub fn clear(&mut self) {
        while !self.layers.is_empty() {
            let _ = self.pop();
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Walks the stack top-down calling `update` until a layer halts.
    pub fn update(&mut self, delta_ms: u64) {
        self.walk("update", |state, manager| state.update(delta_ms, manager));
    }

    /// Walks the stack top-down calling `process_event` until a layer halts.
    pub fn process_event(&mut self, event: &InputEvent) {
        self.walk("process_event", |state, manager| {
            state.process_event(event, manager)
        });
    }

    /// Renders the visible layers bottom-up.
    ///
    /// Scans down from the top while layers report themselves transparent;
    /// drawing starts at the first layer that is opaque or does not say.
    /// When every layer is transparent, drawing starts at the bottom.
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        let mut start = 0;

        for (index, layer) in self.layers.iter().enumerate().rev() {
            let Some(state) = layer.state.as_deref() else {
                start = index;
                break;
            };

            match state.is_transparent() {
                Some(true) => continue,
                Some(false) => {
                    start = index;
                    break;
                }
                None => {
                    debug!("State {} does not have an is_transparent hook", state.name());
                    start = index;
                    break;
                }
            }
        }

        for layer in &mut self.layers[start..] {
            let Some(state) = layer.state.as_deref_mut() else {
                continue;
            };
            if state.render(canvas).is_none() {
                debug!("State {} does not have a render hook", state.name());
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Index of the top layer, `None` when empty.
    pub fn top(&self) -> Option<usize> {
        self.layers.len().checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    //--- Host Access ------------------------------------------------------

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut HostContext {
        &mut self.host
    }

    pub fn window(&self) -> &HostWindow {
        &self.host.window
    }

    pub fn window_mut(&mut self) -> &mut HostWindow {
        &mut self.host.window
    }

    pub fn options(&self) -> &Options {
        &self.host.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.host.options
    }

    pub fn bindings(&self) -> &Bindings {
        self.host.options.bindings()
    }

    //--- Internal Helpers -------------------------------------------------

    /// Top-down walk shared by `update` and `process_event`.
    fn walk<F>(&mut self, hook_name: &str, mut hook: F)
    where
        F: FnMut(&mut dyn State, &mut StateManager) -> Option<Flow>,
    {
        let mut index = self.layers.len();

        while index > 0 {
            index -= 1;

            match self.dispatch(index, &mut hook) {
                Some(Some(Flow::Continue)) => {}
                Some(None) => {
                    debug!("Layer {} does not have a {} hook", index, hook_name);
                    break;
                }
                Some(Some(Flow::Halt)) => break,
                None => break,
            }
        }
    }

    /// Runs `hook` on the state at `index` with the state lifted out of its
    /// slot.
    ///
    /// Returns `None` when the slot holds no state (already running) or
    /// when the state left the stack during the hook; in the latter case
    /// the state is destroyed here.
    fn dispatch<R, F>(&mut self, index: usize, hook: F) -> Option<R>
    where
        F: FnOnce(&mut dyn State, &mut StateManager) -> R,
    {
        let layer = self.layers.get_mut(index)?;
        let id = layer.id;
        let mut state = layer.state.take()?;

        let result = hook(state.as_mut(), self);

        match self.layers.get_mut(index) {
            Some(layer) if layer.id == id => {
                layer.state = Some(state);
                Some(result)
            }
            _ => {
                debug!("State {} left the stack during its own hook", state.name());
                Self::destroy_state(state);
                None
            }
        }
    }

    fn destroy_state(mut state: Box<dyn State>) {
        if state.destroy().is_none() {
            info!("State {} does not have a destroy hook", state.name());
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl Drop for StateManager {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for StateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<&str> = self
            .layers
            .iter()
            .map(|layer| layer.state.as_deref().map_or("<running>", |s| s.name()))
            .collect();

        f.debug_struct("StateManager")
            .field("layers", &layers)
            .field("capacity", &self.capacity)
            .field("host", &self.host)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
