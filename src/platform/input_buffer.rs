//=========================================================================
// Input Buffer
//
// Per-frame store for input gathered by the platform between two
// `RedrawRequested` boundaries.
//
// Responsibilities:
// - Keep discrete events (key presses and releases) in arrival order
// - Collapse identical consecutive discrete events
// - Keep only the latest continuous event of each kind (window size)
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::mem;

//=== Internal Modules ====================================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Vec<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: Vec::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Event Handling ---------------------------------------

    /// Stores `event`, replacing an earlier event of the same kind.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        let kind = mem::discriminant(&event);

        match self.continuous.iter_mut().find(|e| mem::discriminant(*e) == kind) {
            Some(slot) => *slot = event,
            None => self.continuous.push(event),
        }
    }

    //--- Discrete Event Handling -----------------------------------------

    /// Appends `event` unless it repeats the previous one exactly.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes everything collected this frame, or `None` if nothing was.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        Some((mem::take(&mut self.discrete), mem::take(&mut self.continuous)))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Scancode;

    #[test]
    fn empty_buffer_drains_nothing() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn discrete_events_keep_order_and_collapse_repeats() {
        let mut buffer = InputBuffer::new();
        let held = InputEvent::KeyDown { key: Scancode::KeyW, repeat: true };

        buffer.push_discrete(InputEvent::key_down(Scancode::KeyW));
        buffer.push_discrete(held);
        buffer.push_discrete(held);
        buffer.push_discrete(InputEvent::KeyUp { key: Scancode::KeyW });

        let (discrete, continuous) = buffer.drain().unwrap();
        assert_eq!(
            discrete,
            vec![
                InputEvent::key_down(Scancode::KeyW),
                held,
                InputEvent::KeyUp { key: Scancode::KeyW },
            ]
        );
        assert!(continuous.is_empty());
    }

    #[test]
    fn latest_resize_wins() {
        let mut buffer = InputBuffer::new();

        buffer.push_continuous(InputEvent::WindowResized { width: 100, height: 100 });
        buffer.push_continuous(InputEvent::WindowResized { width: 300, height: 200 });

        let (_, continuous) = buffer.drain().unwrap();
        assert_eq!(continuous, vec![InputEvent::WindowResized { width: 300, height: 200 }]);
    }

    #[test]
    fn drain_resets_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(InputEvent::key_down(Scancode::Space));

        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
