//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's logic thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Orchestrator    │
//  │   ↓                      │    │   ↓              │
//  │  input_processor         │    │  StateManager    │
//  │   ↓                      │    │   ├─ events      │
//  │  InputBuffer             │    │   ├─ update      │
//  │   ├─ discrete: keys      │    │   └─ render      │
//  │   └─ continuous: resize  │    │                  │
//  │   ↓                      │    └──────────────────┘
//  │  RedrawRequested (flush) ├──PlatformEvent──→ ↑
//  │  apply commands          ←──CoreCommand──────┘
//  └──────────────────────────┘
// ```
//
// Responsibilities:
// - Create the OS window with the configured title and size
// - Convert Winit events to engine InputEvents and buffer them per frame
// - Send each frame's input to the logic thread on RedrawRequested
// - Apply resize and exit commands coming back from the logic thread
//
// Notes:
// Winit requires the event loop on the main thread (macOS/iOS), so this
// runs on the thread that called `Engine::run()`. A dead logic thread
// only drops input; the window can still be closed normally.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::host::HostWindow;
use crate::core::platform_bridge::{CoreCommand, PlatformError, PlatformEvent};
use input_buffer::InputBuffer;

//=== Platform ============================================================

/// Window owner and input aggregator.
///
/// Not `Send`: it stays on the main thread and talks to the logic thread
/// only through its two channels. The window is created lazily in
/// `resumed()`.
pub(crate) struct Platform {
    window: Option<Window>,
    title: String,
    initial_size: PhysicalSize<u32>,

    /// Input collected since the last frame boundary.
    buffer: InputBuffer,

    event_sender: Sender<PlatformEvent>,
    commands: Receiver<CoreCommand>,

    /// First fatal error seen inside the event loop.
    error: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        window: &HostWindow,
        event_sender: Sender<PlatformEvent>,
        commands: Receiver<CoreCommand>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            title: window.title().to_owned(),
            initial_size: PhysicalSize::new(window.width(), window.height()),
            buffer: InputBuffer::new(),
            event_sender,
            commands,
            error: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes or the logic
    /// thread asks to exit.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when the event loop cannot be created or
    /// fails, or when the window could not be created.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms where Winit
    /// requires it.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends this frame's input to the logic thread. Empty frames are not
    /// sent.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self
                .event_sender
                .send(PlatformEvent::Inputs { discrete, continuous })
                .is_err()
            {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    discrete_count + continuous_count
                );
            }
        }
    }

    /// Applies commands from the logic thread. Returns `false` once the
    /// event loop should stop.
    fn apply_commands(&mut self) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(CoreCommand::ResizeWindow { width, height }) => self.resize_window(width, height),
                Ok(CoreCommand::Exit) => {
                    info!(target: "platform", "Logic thread finished, closing window");
                    return false;
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "platform", "Logic thread disconnected, closing window");
                    return false;
                }
            }
        }
    }

    fn resize_window(&mut self, width: u32, height: u32) {
        let Some(window) = &self.window else {
            self.initial_size = PhysicalSize::new(width, height);
            return;
        };

        debug!(target: "platform", "Resize requested: {}x{}", width, height);

        // `Some` means the size was applied at once and no Resized event
        // will follow.
        if let Some(size) = window.request_inner_size(PhysicalSize::new(width, height)) {
            self.buffer.push_continuous(input_processor::process_resize(size));
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );

                if size != self.initial_size {
                    self.buffer.push_continuous(input_processor::process_resize(size));
                }

                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                self.error = Some(PlatformError::WindowCreation(e.to_string()));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.flush_input_buffer();
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                trace!(target: "platform::input", "Resized to {}x{}", size.width, size.height);
                self.buffer.push_continuous(input_processor::process_resize(*size));
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = input_processor::process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if !self.apply_commands() {
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
