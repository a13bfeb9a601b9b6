//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use arcade_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine runtime
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// State stack
pub use crate::core::state::{Flow, HookState, State, StateManager, StateManagerError};

// Host context and options
pub use crate::core::host::{HostContext, HostWindow};
pub use crate::core::options::{OptionName, Options, WindowSize};

// Input
pub use crate::core::input::{Action, Bindings, InputEvent, Scancode};

// Entities
pub use crate::core::entity::{
    collides, draw_entity, CollisionMargin, Direction, Entity, EntityError, GridBounds,
    GridLayout, LevelBounds, Obstacle, ObstacleKind, Player, Position, Size,
};

// Drawing
pub use crate::core::render::{Canvas, Color, FRect, FrameBuffer, Texture};
