//=========================================================================
// Core Systems Orchestrator
//
// Coordinator for everything running on the logic (non-platform) thread.
//
// Responsibilities:
// - Own the state stack and the frame buffer it renders into
// - Receive platform input via channel and feed it to the stack
// - Tick the stack at a fixed rate (TPS) with the measured delta
// - Forward window requests made by states back to the platform
//
// Notes:
// States are not `Send`, so the `StateManager` is built on the logic
// thread itself from a `CoreConfig` and a setup closure. The loop stops
// when the window closes, the stack empties or a state requests quit; the
// remaining states are destroyed top first before the thread returns.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod entity;
pub mod host;
pub mod input;
pub mod options;
pub mod render;
pub mod state;

pub(crate) mod platform_bridge;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, error, info, warn};

//=== Internal Modules ====================================================

use host::HostContext;
use input::InputEvent;
use platform_bridge::{CoreCommand, EventCollector, PlatformEvent, TickControl};
use render::{Canvas, Color, FrameBuffer};
use state::{StateManager, StateManagerError};

//=== Hooks ===============================================================

/// Receives every finished frame on the logic thread.
pub type FrameSink = Box<dyn FnMut(&FrameBuffer) + Send>;

/// Pushes the initial states once the stack exists.
pub type StateSetup = Box<dyn FnOnce(&mut StateManager) -> Result<(), StateManagerError> + Send>;

//=== CoreConfig ==========================================================

/// Everything the logic thread needs to build its state stack.
pub(crate) struct CoreConfig {
    pub(crate) tps: f64,
    pub(crate) state_capacity: usize,
    pub(crate) host: HostContext,
    pub(crate) setup: StateSetup,
    pub(crate) frame_sink: Option<FrameSink>,
}

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator {
    collector: EventCollector,
    commands: Sender<CoreCommand>,
    manager: StateManager,
    frame: FrameBuffer,
    frame_sink: Option<FrameSink>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        manager: StateManager,
        receiver: Receiver<PlatformEvent>,
        commands: Sender<CoreCommand>,
        frame_sink: Option<FrameSink>,
    ) -> Self {
        let frame = FrameBuffer::new(manager.window().width(), manager.window().height());

        Self {
            collector: EventCollector::new(receiver),
            commands,
            manager,
            frame,
            frame_sink,
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Builds the stack on a new thread, runs the setup closure and ticks
    // until shutdown. Setup errors are returned through the join handle
    // after telling the platform to close.
    //
    pub(crate) fn spawn_core_thread(
        config: CoreConfig,
        receiver: Receiver<PlatformEvent>,
        commands: Sender<CoreCommand>,
    ) -> thread::JoinHandle<Result<(), StateManagerError>> {
        let frame_duration = Duration::from_secs_f64(1.0 / config.tps);

        thread::spawn(move || {
            let setup = config.setup;
            let manager = StateManager::new(config.state_capacity, config.host)
                .and_then(|mut manager| setup(&mut manager).map(|()| manager));

            let manager = match manager {
                Ok(manager) => manager,
                Err(e) => {
                    error!("State setup failed: {}", e);
                    let _ = commands.send(CoreCommand::Exit);
                    return Err(e);
                }
            };

            info!("Core thread started ({} states)", manager.len());
            let mut orchestrator = Self::new(manager, receiver, commands, config.frame_sink);
            orchestrator.run(frame_duration);
            Ok(())
        })
    }

    //--- run() ------------------------------------------------------------

    fn run(&mut self, frame_duration: Duration) {
        let mut last_tick = Instant::now();

        loop {
            let frame_start = Instant::now();
            let delta_ms = frame_start.duration_since(last_tick).as_millis() as u64;
            last_tick = frame_start;

            if self.tick(delta_ms) == TickControl::Exit {
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }

        self.shutdown();
    }

    //--- tick() -----------------------------------------------------------
    //
    // One logic frame:
    //  1. Collect platform input and hand each event to the stack
    //  2. Update the stack with the elapsed time
    //  3. Render into the frame buffer and pass it to the sink
    //  4. Forward window requests and decide whether to keep going
    //
    pub(crate) fn tick(&mut self, delta_ms: u64) -> TickControl {
        let control = self.collector.collect_frame();

        for event in self.collector.take_events() {
            self.dispatch_event(&event);
        }

        if control == TickControl::Exit {
            self.manager.process_event(&InputEvent::Quit);
            return TickControl::Exit;
        }

        self.manager.update(delta_ms);
        self.present();
        self.forward_window_requests();

        if self.manager.is_empty() {
            info!("State stack is empty, stopping");
            return TickControl::Exit;
        }
        if self.manager.window().quit_requested() {
            info!("Quit requested, stopping");
            return TickControl::Exit;
        }

        TickControl::Continue
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn manager(&self) -> &StateManager {
        &self.manager
    }

    #[cfg(test)]
    pub(crate) fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    //--- Internal Helpers -------------------------------------------------

    fn dispatch_event(&mut self, event: &InputEvent) {
        if let InputEvent::WindowResized { width, height } = *event {
            debug!("Window resized to {}x{}", width, height);
            self.manager.window_mut().set_size(width, height);
            self.frame.resize(width, height);
        }

        self.manager.process_event(event);
    }

    fn present(&mut self) {
        self.frame.set_draw_color(Color::BLACK);
        self.frame.clear();
        self.manager.render(&mut self.frame);

        if let Some(sink) = self.frame_sink.as_mut() {
            sink(&self.frame);
        }
    }

    fn forward_window_requests(&mut self) {
        if let Some((width, height)) = self.manager.window_mut().take_resize_request() {
            self.send_command(CoreCommand::ResizeWindow { width, height });
        }
    }

    fn send_command(&self, command: CoreCommand) {
        match self.commands.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                warn!("Platform command queue full, dropping {:?}", command);
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!("Platform gone, command not delivered");
            }
        }
    }

    fn shutdown(&mut self) {
        self.manager.clear();
        self.send_command(CoreCommand::Exit);
        info!("Core thread exiting.");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::HostWindow;
    use crate::core::input::Scancode;
    use crate::core::options::Options;
    use crate::core::render::FRect;
    use crate::core::state::{Flow, HookState};
    use crossbeam_channel::unbounded;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    type Log = Rc<RefCell<Vec<String>>>;

    struct Harness {
        orchestrator: CoreSystemsOrchestrator,
        events: Sender<PlatformEvent>,
        commands: Receiver<CoreCommand>,
    }

    fn harness(frame_sink: Option<FrameSink>) -> Harness {
        let host = HostContext::new(HostWindow::new("test", 8, 6), Options::new());
        let manager = StateManager::new(3, host).unwrap();
        let (event_tx, event_rx) = unbounded();
        let (command_tx, command_rx) = unbounded();

        Harness {
            orchestrator: CoreSystemsOrchestrator::new(manager, event_rx, command_tx, frame_sink),
            events: event_tx,
            commands: command_rx,
        }
    }

    fn recording_state(log: &Log) -> HookState<()> {
        let events = log.clone();
        let updates = log.clone();
        HookState::new()
            .with_process_event(move |_, event, _| {
                events.borrow_mut().push(format!("{:?}", event));
                Flow::Continue
            })
            .with_update(move |_, delta_ms, _| {
                updates.borrow_mut().push(format!("update {}", delta_ms));
                Flow::Continue
            })
    }

    fn send(harness: &Harness, discrete: Vec<InputEvent>, continuous: Vec<InputEvent>) {
        harness
            .events
            .send(PlatformEvent::Inputs { discrete, continuous })
            .unwrap();
    }

    #[test]
    fn tick_dispatches_events_before_update() {
        let log: Log = Rc::default();
        let mut harness = harness(None);
        harness.orchestrator.manager.push(recording_state(&log)).unwrap();

        send(&harness, vec![InputEvent::key_down(Scancode::Space)], vec![]);

        assert_eq!(harness.orchestrator.tick(16), TickControl::Continue);
        assert_eq!(
            *log.borrow(),
            vec![
                format!("{:?}", InputEvent::key_down(Scancode::Space)),
                "update 16".to_string(),
            ]
        );
    }

    #[test]
    fn resize_updates_window_and_frame() {
        let log: Log = Rc::default();
        let mut harness = harness(None);
        harness.orchestrator.manager.push(recording_state(&log)).unwrap();

        send(&harness, vec![], vec![InputEvent::WindowResized { width: 20, height: 10 }]);
        harness.orchestrator.tick(0);

        let window = harness.orchestrator.manager().window();
        assert_eq!((window.width(), window.height()), (20, 10));
        assert_eq!(harness.orchestrator.frame().output_size(), (20, 10));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn window_closed_delivers_quit_and_exits() {
        let log: Log = Rc::default();
        let mut harness = harness(None);
        harness.orchestrator.manager.push(recording_state(&log)).unwrap();

        harness.events.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(harness.orchestrator.tick(16), TickControl::Exit);
        assert_eq!(*log.borrow(), vec![format!("{:?}", InputEvent::Quit)]);
    }

    #[test]
    fn empty_stack_exits() {
        let mut harness = harness(None);
        assert_eq!(harness.orchestrator.tick(16), TickControl::Exit);
    }

    #[test]
    fn state_popping_itself_ends_the_loop() {
        let mut harness = harness(None);
        harness
            .orchestrator
            .manager
            .push(HookState::<()>::new().with_update(|_, _, manager| {
                manager.pop().unwrap();
                Flow::Halt
            }))
            .unwrap();

        assert_eq!(harness.orchestrator.tick(16), TickControl::Exit);
        assert!(harness.orchestrator.manager().is_empty());
    }

    #[test]
    fn quit_request_exits() {
        let mut harness = harness(None);
        harness
            .orchestrator
            .manager
            .push(HookState::<()>::new().with_update(|_, _, manager| {
                manager.window_mut().request_quit();
                Flow::Halt
            }))
            .unwrap();

        assert_eq!(harness.orchestrator.tick(16), TickControl::Exit);
        assert_eq!(harness.orchestrator.manager().len(), 1);
    }

    #[test]
    fn resize_request_is_forwarded_to_platform() {
        let mut harness = harness(None);
        harness
            .orchestrator
            .manager
            .push(HookState::<()>::new().with_init(|manager| {
                manager.window_mut().request_resize(640, 480);
            }))
            .unwrap();

        assert_eq!(harness.orchestrator.tick(0), TickControl::Continue);
        assert_eq!(
            harness.commands.try_recv(),
            Ok(CoreCommand::ResizeWindow { width: 640, height: 480 })
        );
        assert!(harness.commands.try_recv().is_err());
    }

    #[test]
    fn frame_sink_sees_rendered_frame() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = seen.clone();
        let sink: FrameSink = Box::new(move |frame| {
            sink_seen.lock().unwrap().push((frame.pixel(0, 0), frame.pixel(7, 5)));
        });

        let mut harness = harness(Some(sink));
        harness
            .orchestrator
            .manager
            .push(HookState::<()>::new().with_render(|_, canvas| {
                canvas.set_draw_color(Color::rgb(255, 0, 0));
                canvas.fill_rect(FRect::new(0.0, 0.0, 1.0, 1.0));
            }))
            .unwrap();

        harness.orchestrator.tick(16);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(Some(Color::rgb(255, 0, 0)), Some(Color::BLACK))]
        );
    }

    #[test]
    fn core_thread_runs_setup_and_stops_on_quit() {
        let (event_tx, event_rx) = unbounded::<PlatformEvent>();
        let (command_tx, command_rx) = unbounded();
        let destroyed = Arc::new(Mutex::new(Vec::new()));
        let (menu_log, game_log) = (Arc::clone(&destroyed), Arc::clone(&destroyed));
        let config = CoreConfig {
            tps: 120.0,
            state_capacity: 2,
            host: HostContext::new(HostWindow::new("test", 4, 4), Options::new()),
            setup: Box::new(move |manager| {
                manager.push(
                    HookState::<()>::new().with_destroy(move |_| menu_log.lock().unwrap().push("menu")),
                )?;
                manager.push(
                    HookState::<u32>::new()
                        .with_update(|ticks, _, manager| {
                            *ticks += 1;
                            if *ticks == 3 {
                                manager.window_mut().request_quit();
                            }
                            Flow::Halt
                        })
                        .with_destroy(move |_| game_log.lock().unwrap().push("game")),
                )
            }),
            frame_sink: None,
        };

        let handle = CoreSystemsOrchestrator::spawn_core_thread(config, event_rx, command_tx);

        assert_eq!(handle.join().unwrap(), Ok(()));
        assert_eq!(command_rx.try_recv(), Ok(CoreCommand::Exit));
        assert_eq!(*destroyed.lock().unwrap(), vec!["game", "menu"]);
        drop(event_tx);
    }

    #[test]
    fn core_thread_reports_setup_failure() {
        let (_event_tx, event_rx) = unbounded::<PlatformEvent>();
        let (command_tx, command_rx) = unbounded();
        let config = CoreConfig {
            tps: 60.0,
            state_capacity: 1,
            host: HostContext::new(HostWindow::new("test", 4, 4), Options::new()),
            setup: Box::new(|manager| {
                manager.push(HookState::<()>::new())?;
                manager.push(HookState::<()>::new())
            }),
            frame_sink: None,
        };

        let handle = CoreSystemsOrchestrator::spawn_core_thread(config, event_rx, command_tx);

        assert_eq!(handle.join().unwrap(), Err(StateManagerError::Full));
        assert_eq!(command_rx.try_recv(), Ok(CoreCommand::Exit));
    }
}
