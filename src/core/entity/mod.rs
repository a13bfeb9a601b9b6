//=========================================================================
// Entities
//=========================================================================
//
// Grid-space game objects owned by gameplay states.
//
// Architecture:
//   trait Entity
//     ├─ Obstacle  (car / turtle / log: constant velocity, horizontal wrap)
//     └─ Player    (grid-stepping animation state machine)
//
// Positions and sizes are in grid cells. An entity only sees its level
// through `LevelBounds`. Textures and private data are released when the
// entity is dropped.
//
//=========================================================================

//=== Module Declarations =================================================

mod collision;
mod obstacle;
mod player;

//=== Public API ==========================================================

pub use collision::{collides, CollisionMargin};
pub use obstacle::{Obstacle, ObstacleKind};
pub use player::{Animation, Player};

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::render::{Canvas, FRect, Texture};

/// Texture pixels per grid cell, on both axes.
pub const CELL_SIZE: u32 = 32;

//=== Geometry ============================================================

/// Position in grid cells. Fractional while moving.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Extent in grid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub x: f64,
    pub y: f64,
}

impl Size {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

//=== LevelBounds =========================================================

/// The part of a level an entity needs: its grid size.
pub trait LevelBounds {
    /// Columns.
    fn width(&self) -> u32;

    /// Rows.
    fn height(&self) -> u32;
}

/// Plain grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub width: u32,
    pub height: u32,
}

impl GridBounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl LevelBounds for GridBounds {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

//=== Entity ==============================================================

/// Game object living on a level grid.
///
/// # Examples
///
/// ```
/// use arcade_engine::prelude::*;
///
/// let level = GridBounds::new(15, 7);
/// let mut player = Player::new(Position::new(7.0, 6.0));
///
/// assert!(player.request_move(Direction::Up, &level));
/// for _ in 0..25 {
///     player.update(10, &level);
/// }
/// assert_eq!(player.position(), Position::new(7.0, 5.0));
/// ```
pub trait Entity {
    fn position(&self) -> Position;

    fn position_mut(&mut self) -> &mut Position;

    fn size(&self) -> Size;

    /// Advances the entity by `delta_ms` milliseconds.
    fn update(&mut self, delta_ms: u64, level: &dyn LevelBounds);

    /// Returns the texture reflecting the entity's current state.
    fn render(&mut self, level: &dyn LevelBounds) -> Option<&Texture>;
}

//=== EntityError =========================================================

/// Invalid entity construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityError {
    /// Obstacles only travel left or right.
    InvalidDirection(Direction),

    /// Obstacles span at least one cell.
    ZeroLength,
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection(d) => write!(f, "Invalid direction for an obstacle: {:?}", d),
            Self::ZeroLength => write!(f, "Obstacle length must be at least one cell"),
        }
    }
}

impl std::error::Error for EntityError {}

//=== GridLayout ==========================================================

/// Maps grid cells to output pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Pixel position of cell (0, 0).
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl GridLayout {
    pub const fn new(origin_x: f32, origin_y: f32, cell_width: f32, cell_height: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_width,
            cell_height,
        }
    }

    /// Centers a `level` grid of `CELL_SIZE` cells inside an output.
    pub fn centered(level: &dyn LevelBounds, output: (u32, u32)) -> Self {
        let cell = CELL_SIZE as f32;
        let width = level.width() as f32 * cell;
        let height = level.height() as f32 * cell;

        Self::new(
            (output.0 as f32 - width) / 2.0,
            (output.1 as f32 - height) / 2.0,
            cell,
            cell,
        )
    }

    /// Output rectangle covered by an area of the grid.
    pub fn rect(&self, position: Position, size: Size) -> FRect {
        FRect::new(
            self.origin_x + position.x as f32 * self.cell_width,
            self.origin_y + position.y as f32 * self.cell_height,
            size.x as f32 * self.cell_width,
            size.y as f32 * self.cell_height,
        )
    }
}

/// Renders `entity` and draws its texture at its grid position.
pub fn draw_entity(
    canvas: &mut dyn Canvas,
    entity: &mut dyn Entity,
    level: &dyn LevelBounds,
    layout: &GridLayout,
) {
    let dst = layout.rect(entity.position(), entity.size());
    if let Some(texture) = entity.render(level) {
        canvas.draw_texture(texture, dst);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{Color, FrameBuffer};

    #[test]
    fn only_left_and_right_are_horizontal() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
    }

    #[test]
    fn layout_maps_cells_to_pixels() {
        let layout = GridLayout::new(10.0, 20.0, 32.0, 32.0);
        let rect = layout.rect(Position::new(1.0, 2.0), Size::new(3.0, 1.0));

        assert_eq!(rect, FRect::new(42.0, 84.0, 96.0, 32.0));
    }

    #[test]
    fn centered_layout() {
        let level = GridBounds::new(2, 1);
        let layout = GridLayout::centered(&level, (128, 64));

        assert_eq!(layout.origin_x, 32.0);
        assert_eq!(layout.origin_y, 16.0);
    }

    #[test]
    fn draw_entity_blits_texture_at_position() {
        let level = GridBounds::new(4, 4);
        let layout = GridLayout::new(0.0, 0.0, 2.0, 2.0);
        let mut player = Player::new(Position::new(1.0, 1.0));
        let mut canvas = FrameBuffer::new(8, 8);

        draw_entity(&mut canvas, &mut player, &level, &layout);

        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 4), Some(Color::BLACK));
    }
}
