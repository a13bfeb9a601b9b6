//=========================================================================
// Hook State
//=========================================================================
//
// A `State` assembled from closures instead of a dedicated type.
//
// Each hook is set independently; unset hooks report "not provided" to
// the manager. The state's memory `M` is created by the init closure
// (or `M::default()` without one, for states built with `new`), handed to
// every other hook, and given to the destroy closure when the state leaves
// the stack.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::{Flow, State, StateManager};
use crate::core::input::InputEvent;
use crate::core::render::Canvas;

//=== Hook Types ==========================================================

type InitHook<M> = Box<dyn FnMut(&mut StateManager) -> M>;
type DestroyHook<M> = Box<dyn FnMut(M)>;
type UpdateHook<M> = Box<dyn FnMut(&mut M, u64, &mut StateManager) -> Flow>;
type TransparencyHook<M> = Box<dyn Fn(&M) -> bool>;
type RenderHook<M> = Box<dyn FnMut(&mut M, &mut dyn Canvas)>;
type EventHook<M> = Box<dyn FnMut(&mut M, &InputEvent, &mut StateManager) -> Flow>;

//=== HookState ===========================================================

/// State built from optional closures over owned memory `M`.
///
/// # Examples
///
/// ```
/// use arcade_engine::prelude::*;
///
/// let counter = HookState::<u32>::new()
///     .with_update(|count, _delta_ms, _manager| {
///         *count += 1;
///         Flow::Continue
///     })
///     .with_transparency(|_| false);
///
/// let mut manager = StateManager::new(3, HostContext::default()).unwrap();
/// manager.push(counter).unwrap();
/// manager.update(16);
/// ```
pub struct HookState<M> {
    memory: Option<M>,
    /// Builds the memory when no init hook is set.
    fallback: Option<fn() -> M>,
    init: Option<InitHook<M>>,
    destroy: Option<DestroyHook<M>>,
    update: Option<UpdateHook<M>>,
    is_transparent: Option<TransparencyHook<M>>,
    render: Option<RenderHook<M>>,
    process_event: Option<EventHook<M>>,
}

impl<M: Default + 'static> HookState<M> {
    /// Creates a state with every hook unset and no memory.
    ///
    /// Without an init hook the memory starts as `M::default()`.
    pub fn new() -> Self {
        let fallback: fn() -> M = M::default;
        Self::with_fallback(Some(fallback))
    }
}

impl<M: 'static> HookState<M> {
    /// Creates a state whose memory comes from `init`.
    ///
    /// `M` does not need a default value. The other hooks only run once
    /// `init` has produced the memory.
    pub fn from_init(init: impl FnMut(&mut StateManager) -> M + 'static) -> Self {
        Self::with_fallback(None).with_init(init)
    }

    fn with_fallback(fallback: Option<fn() -> M>) -> Self {
        Self {
            memory: None,
            fallback,
            init: None,
            destroy: None,
            update: None,
            is_transparent: None,
            render: None,
            process_event: None,
        }
    }

    //--- Hook Setters -----------------------------------------------------

    pub fn with_init(mut self, hook: impl FnMut(&mut StateManager) -> M + 'static) -> Self {
        self.init = Some(Box::new(hook));
        self
    }

    pub fn with_destroy(mut self, hook: impl FnMut(M) + 'static) -> Self {
        self.destroy = Some(Box::new(hook));
        self
    }

    pub fn with_update(
        mut self,
        hook: impl FnMut(&mut M, u64, &mut StateManager) -> Flow + 'static,
    ) -> Self {
        self.update = Some(Box::new(hook));
        self
    }

    pub fn with_transparency(mut self, hook: impl Fn(&M) -> bool + 'static) -> Self {
        self.is_transparent = Some(Box::new(hook));
        self
    }

    pub fn with_render(mut self, hook: impl FnMut(&mut M, &mut dyn Canvas) + 'static) -> Self {
        self.render = Some(Box::new(hook));
        self
    }

    pub fn with_process_event(
        mut self,
        hook: impl FnMut(&mut M, &InputEvent, &mut StateManager) -> Flow + 'static,
    ) -> Self {
        self.process_event = Some(Box::new(hook));
        self
    }

    //--- Memory -----------------------------------------------------------

    /// Returns the state's memory, if it has been created.
    pub fn memory(&self) -> Option<&M> {
        self.memory.as_ref()
    }

    /// Fills in the fallback memory if none exists yet.
    fn ensure_memory(&mut self) {
        if self.memory.is_none() {
            self.memory = self.fallback.map(|fallback| fallback());
        }
    }
}

impl<M: Default + 'static> Default for HookState<M> {
    fn default() -> Self {
        Self::new()
    }
}

//=== State Implementation ================================================

// A per-frame hook on a state with no memory (no init ran and `M` has no
// fallback) reports "not provided".
impl<M: 'static> State for HookState<M> {
    fn init(&mut self, manager: &mut StateManager) -> Option<()> {
        match self.init.as_mut() {
            Some(init) => {
                self.memory = Some(init(manager));
                Some(())
            }
            None => {
                self.memory = self.fallback.map(|fallback| fallback());
                None
            }
        }
    }

    fn destroy(&mut self) -> Option<()> {
        let memory = self.memory.take();
        let destroy = self.destroy.as_mut()?;
        if let Some(memory) = memory {
            destroy(memory);
        }
        Some(())
    }

    fn update(&mut self, delta_ms: u64, manager: &mut StateManager) -> Option<Flow> {
        self.ensure_memory();
        let hook = self.update.as_mut()?;
        let memory = self.memory.as_mut()?;
        Some(hook(memory, delta_ms, manager))
    }

    fn is_transparent(&self) -> Option<bool> {
        let hook = self.is_transparent.as_ref()?;
        Some(self.memory.as_ref().is_some_and(|memory| hook(memory)))
    }

    fn render(&mut self, canvas: &mut dyn Canvas) -> Option<()> {
        self.ensure_memory();
        let hook = self.render.as_mut()?;
        let memory = self.memory.as_mut()?;
        hook(memory, canvas);
        Some(())
    }

    fn process_event(&mut self, event: &InputEvent, manager: &mut StateManager) -> Option<Flow> {
        self.ensure_memory();
        let hook = self.process_event.as_mut()?;
        let memory = self.memory.as_mut()?;
        Some(hook(memory, event, manager))
    }
}

impl<M: fmt::Debug> fmt::Debug for HookState<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookState")
            .field("memory", &self.memory)
            .field("init", &self.init.is_some())
            .field("destroy", &self.destroy.is_some())
            .field("update", &self.update.is_some())
            .field("is_transparent", &self.is_transparent.is_some())
            .field("render", &self.render.is_some())
            .field("process_event", &self.process_event.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::HostContext;
    use std::cell::Cell;
    use std::rc::Rc;

    fn manager() -> StateManager {
        StateManager::new(3, HostContext::default()).unwrap()
    }

    #[test]
    fn fresh_state_has_no_hooks_and_no_memory() {
        let mut state = HookState::<u32>::new();
        let mut manager = manager();

        assert!(state.memory().is_none());
        assert_eq!(state.update(16, &mut manager), None);
        assert_eq!(state.is_transparent(), None);
        assert_eq!(state.process_event(&InputEvent::Quit, &mut manager), None);
        assert_eq!(state.destroy(), None);
    }

    #[test]
    fn init_creates_memory() {
        let mut state = HookState::<u32>::new().with_init(|_| 41);
        let mut manager = manager();

        assert_eq!(state.init(&mut manager), Some(()));
        assert_eq!(state.memory(), Some(&41));
    }

    #[test]
    fn missing_init_uses_default_memory() {
        let mut state = HookState::<u32>::new();
        let mut manager = manager();

        assert_eq!(state.init(&mut manager), None);
        assert_eq!(state.memory(), Some(&0));
    }

    #[test]
    fn hooks_share_memory() {
        let mut state = HookState::<u32>::new()
            .with_init(|_| 1)
            .with_update(|count, delta_ms, _| {
                *count += delta_ms as u32;
                Flow::Halt
            })
            .with_transparency(|count| *count > 10);
        let mut manager = manager();
        state.init(&mut manager);

        assert_eq!(state.is_transparent(), Some(false));
        assert_eq!(state.update(16, &mut manager), Some(Flow::Halt));
        assert_eq!(state.memory(), Some(&17));
        assert_eq!(state.is_transparent(), Some(true));
    }

    #[test]
    fn destroy_receives_memory() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let mut state = HookState::<u32>::new()
            .with_init(|_| 9)
            .with_destroy(move |memory| sink.set(memory));
        let mut manager = manager();

        state.init(&mut manager);
        assert_eq!(state.destroy(), Some(()));

        assert_eq!(seen.get(), 9);
        assert!(state.memory().is_none());
    }

    /// Level memory with no sensible default value.
    #[derive(Debug, PartialEq)]
    struct Level {
        lives: u8,
        row: i32,
    }

    #[test]
    fn memory_without_default_comes_from_init() {
        let mut state = HookState::from_init(|_| Level { lives: 3, row: 12 }).with_update(
            |level: &mut Level, _, _| {
                level.row -= 1;
                Flow::Continue
            },
        );
        let mut manager = manager();

        assert_eq!(state.update(16, &mut manager), None);
        assert!(state.memory().is_none());

        assert_eq!(state.init(&mut manager), Some(()));
        assert_eq!(state.update(16, &mut manager), Some(Flow::Continue));
        assert_eq!(state.memory(), Some(&Level { lives: 3, row: 11 }));
    }

    #[test]
    fn state_without_default_memory_runs_on_the_stack() {
        let lives = Rc::new(Cell::new(0));
        let sink = Rc::clone(&lives);
        let mut manager = manager();
        manager
            .push(
                HookState::from_init(|_| Level { lives: 3, row: 12 })
                    .with_update(|level: &mut Level, _, _| {
                        level.lives -= 1;
                        Flow::Continue
                    })
                    .with_destroy(move |level| sink.set(level.lives)),
            )
            .unwrap();

        manager.update(16);
        manager.pop().unwrap();

        assert_eq!(lives.get(), 2);
    }
}
