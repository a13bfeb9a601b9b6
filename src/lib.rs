//=========================================================================
// Arcade Engine Library Root
//
// Core of a small 2D arcade game engine: a stack of game states with
// optional lifecycle hooks, action-based input bindings, a typed option
// registry and grid entities, driven by a windowed fixed-rate loop.
//
// Typical usage:
// ```no_run
// use arcade_engine::prelude::*;
//
// fn main() -> Result<(), EngineError> {
//     EngineBuilder::new()
//         .build()
//         .init(|manager| manager.push(HookState::<()>::new()))
//         .run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything states and games are written against: the
// state stack, input, options, entities and the drawing surface.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the Winit event loop and is not part of
// the public API. `engine` wires it to the logic thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::platform_bridge::PlatformError;
pub use crate::core::{FrameSink, StateSetup};
pub use engine::{Engine, EngineBuilder, EngineError};
