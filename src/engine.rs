//=========================================================================
// Arcade Engine
//
// Main entry point: configures and runs the platform and logic threads.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init(): initial states
//         ├─ with_window_title()     └─ run(): spawns the logic thread,
//         ├─ with_window_size()                runs the platform,
//         ├─ with_options()                    blocks until exit
//         └─ with_frame_sink()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::bounded;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::host::{HostContext, HostWindow};
use crate::core::options::Options;
use crate::core::platform_bridge::{CoreCommand, PlatformError, PlatformEvent};
use crate::core::render::FrameBuffer;
use crate::core::state::{StateManager, StateManagerError};
use crate::core::{CoreConfig, CoreSystemsOrchestrator, FrameSink, StateSetup};
use crate::platform::Platform;

//=== EngineError =========================================================

/// Failures reported by [`Engine::run`].
#[derive(Debug)]
pub enum EngineError {
    /// The window or its event loop failed.
    Platform(PlatformError),

    /// Building the state stack or pushing the initial states failed.
    State(StateManagerError),

    /// The logic thread panicked.
    CoreThreadPanicked,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform(e) => write!(f, "Platform error: {}", e),
            Self::State(e) => write!(f, "State setup error: {}", e),
            Self::CoreThreadPanicked => write!(f, "Core thread panicked"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(e),
            Self::State(e) => Some(e),
            Self::CoreThreadPanicked => None,
        }
    }
}

impl From<PlatformError> for EngineError {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

impl From<StateManagerError> for EngineError {
    fn from(e: StateManagerError) -> Self {
        Self::State(e)
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 messages
/// - **State capacity**: 3 stacked states
/// - **Window**: "Arcade Engine", 640×480
///
/// A `WindowSize` entry in the options given to
/// [`with_options`](Self::with_options) overrides the window size.
///
/// # Examples
///
/// ```no_run
/// use arcade_engine::prelude::*;
///
/// let result = EngineBuilder::new()
///     .with_tps(120.0)
///     .with_window_title("Crossing Roads")
///     .build()
///     .init(|manager| manager.push(HookState::<u32>::new()))
///     .run();
///
/// if let Err(e) = result {
///     eprintln!("{}", e);
/// }
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    state_capacity: usize,
    title: String,
    width: u32,
    height: u32,
    options: Options,
    frame_sink: Option<FrameSink>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            state_capacity: 3,
            title: "Arcade Engine".to_owned(),
            width: 640,
            height: 480,
            options: Options::new(),
            frame_sink: None,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the platform ↔ logic channels.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets how many states can be stacked at once.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_state_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "State capacity must be positive");
        self.state_capacity = capacity;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window size in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the options (and bindings) handed to every state.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Registers a callback receiving every rendered frame on the logic
    /// thread.
    pub fn with_frame_sink<F>(mut self, sink: F) -> Self
    where
        F: FnMut(&FrameBuffer) + Send + 'static,
    {
        self.frame_sink = Some(Box::new(sink));
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        let window = HostWindow::new(self.title, self.width, self.height);
        let mut host = HostContext::new(window, self.options);
        let size = host.preferred_window_size();
        host.window.set_size(size.width, size.height);

        info!(
            "Building engine (TPS: {}, channel: {}, states: {}, window: {}x{})",
            self.tps, self.channel_capacity, self.state_capacity, size.width, size.height
        );

        Engine {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            state_capacity: self.state_capacity,
            host,
            setup: None,
            frame_sink: self.frame_sink,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Arcade Engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► StateManager, FrameBuffer
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: PlatformEvent →, ← CoreCommand
/// ```
pub struct Engine {
    tps: f64,
    channel_capacity: usize,
    state_capacity: usize,
    host: HostContext,
    setup: Option<StateSetup>,
    frame_sink: Option<FrameSink>,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Registers the closure that pushes the initial states.
    ///
    /// It runs on the logic thread once the stack exists. Calling `init`
    /// again appends another closure, run after the previous ones.
    pub fn init<F>(mut self, next: F) -> Self
    where
        F: FnOnce(&mut StateManager) -> Result<(), StateManagerError> + Send + 'static,
    {
        let setup: StateSetup = match self.setup.take() {
            Some(previous) => Box::new(move |manager: &mut StateManager| {
                previous(manager)?;
                next(manager)
            }),
            None => Box::new(next),
        };
        self.setup = Some(setup);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform ↔ logic channels
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On exit, waits for the logic thread to destroy its states
    ///
    /// # Errors
    ///
    /// Platform failures take precedence over logic thread failures.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms where Winit
    /// requires it.
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channels ----------------------------
        let (event_tx, event_rx) = bounded::<PlatformEvent>(self.channel_capacity);
        let (command_tx, command_rx) = bounded::<CoreCommand>(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let setup: StateSetup = match self.setup {
            Some(setup) => setup,
            None => Box::new(|_: &mut StateManager| Ok::<(), StateManagerError>(())),
        };
        let platform = Platform::new(&self.host.window, event_tx, command_rx);
        let config = CoreConfig {
            tps: self.tps,
            state_capacity: self.state_capacity,
            host: self.host,
            setup,
            frame_sink: self.frame_sink,
        };
        let core_handle = CoreSystemsOrchestrator::spawn_core_thread(config, event_rx, command_tx);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform_result = platform.run();
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the logic thread -----------------------
        let core_result = match core_handle.join() {
            Ok(Ok(())) => {
                info!("Core thread terminated cleanly");
                Ok(())
            }
            Ok(Err(e)) => Err(EngineError::State(e)),
            Err(_) => {
                error!("Core thread panicked");
                Err(EngineError::CoreThreadPanicked)
            }
        };

        info!("Engine shutdown complete");
        platform_result?;
        core_result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::{OptionName, WindowSize};
    use crate::core::state::HookState;
    use std::sync::{Arc, Mutex};

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.state_capacity, 3);
        assert_eq!(builder.title, "Arcade Engine");
        assert_eq!((builder.width, builder.height), (640, 480));
        assert!(builder.frame_sink.is_none());
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "State capacity must be positive")]
    fn builder_with_state_capacity_panics_on_zero() {
        EngineBuilder::new().with_state_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero() {
        EngineBuilder::new().with_window_size(0, 480);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_state_capacity(5)
            .with_window_title("Flappy")
            .with_window_size(288, 512)
            .with_frame_sink(|_| {})
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.state_capacity, 5);
        assert_eq!(engine.host.window.title(), "Flappy");
        assert_eq!((engine.host.window.width(), engine.host.window.height()), (288, 512));
        assert!(engine.frame_sink.is_some());
    }

    #[test]
    fn window_size_option_overrides_builder_size() {
        let mut options = Options::new();
        options.set(OptionName::WindowSize, WindowSize { width: 800, height: 600 });

        let engine = EngineBuilder::new().with_window_size(320, 240).with_options(options).build();

        assert_eq!((engine.host.window.width(), engine.host.window.height()), (800, 600));
    }

    #[test]
    fn init_closures_run_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let (first, second) = (Arc::clone(&order), Arc::clone(&order));
        let engine = EngineBuilder::new()
            .build()
            .init(move |manager| {
                first.lock().unwrap().push(1);
                manager.push(HookState::<()>::new())
            })
            .init(move |manager| {
                second.lock().unwrap().push(2);
                manager.push(HookState::<()>::new())
            });

        let setup = engine.setup.unwrap();
        let mut manager = StateManager::new(3, HostContext::default()).unwrap();
        setup(&mut manager).unwrap();

        assert_eq!(*order.lock().unwrap(), vec![1, 2]);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn init_error_is_propagated() {
        let engine = EngineBuilder::new()
            .build()
            .init(|manager| manager.pop())
            .init(|_| panic!("later setup must not run"));

        let setup = engine.setup.unwrap();
        let mut manager = StateManager::new(1, HostContext::default()).unwrap();

        assert_eq!(setup(&mut manager), Err(StateManagerError::Empty));
    }

    //=====================================================================
    // EngineError Tests
    //=====================================================================

    #[test]
    fn engine_error_wraps_sources() {
        use std::error::Error;

        let error = EngineError::from(StateManagerError::Full);
        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("State setup error"));

        let error = EngineError::from(PlatformError::WindowCreation("denied".into()));
        assert_eq!(error.to_string(), "Platform error: Window creation failed: denied");
        assert!(EngineError::CoreThreadPanicked.source().is_none());
    }
}
