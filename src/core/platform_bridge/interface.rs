//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages exchanged between the platform thread and the logic thread.
//
//   platform ──PlatformEvent──> logic     (input batches, window closed)
//   platform <──CoreCommand──── logic     (resize, exit)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform to the logic thread.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Input gathered during one platform frame.
    ///
    /// `discrete` keeps arrival order. `continuous` holds at most one event
    /// per kind (the latest window size).
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// The user closed the window.
    WindowClosed,
}

//=== CoreCommand =========================================================

/// Requests sent from the logic thread back to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CoreCommand {
    /// A state asked for a new window size.
    ResizeWindow { width: u32, height: u32 },

    /// The logic thread stopped; close the window.
    Exit,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop execution error.
    EventLoopExecution(String),

    /// The window could not be created.
    WindowCreation(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================
