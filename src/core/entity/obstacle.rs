//=========================================================================
// Obstacles
//=========================================================================
//
// Cars, turtles and logs: one row tall, several cells long, moving
// horizontally at constant speed and wrapping around the level edges.
//
// Speed is expressed in cells per `TIME_CELL_MS`. Once an obstacle has
// fully left the level it re-enters from the opposite side, `WRAP_MARGIN`
// cells outside the edge.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Direction, Entity, EntityError, LevelBounds, Position, Size, CELL_SIZE};
use crate::core::render::{Color, Texture};

/// Milliseconds for an obstacle of speed 1 to travel one cell.
pub const TIME_CELL_MS: f64 = 600.0;

/// Cells between the level edge and a wrapped obstacle.
pub const WRAP_MARGIN: f64 = 2.0;

//=== ObstacleKind ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Kills the player on contact.
    Car,

    /// Carries the player across water.
    Turtle,

    /// Carries the player across water.
    Log,
}

impl ObstacleKind {
    pub const fn color(self) -> Color {
        match self {
            ObstacleKind::Car => Color::rgb(160, 25, 25),
            ObstacleKind::Turtle => Color::rgb(25, 150, 50),
            ObstacleKind::Log => Color::rgb(153, 88, 42),
        }
    }

    /// Whether the obstacle can carry a rider.
    pub const fn is_floating(self) -> bool {
        matches!(self, ObstacleKind::Turtle | ObstacleKind::Log)
    }
}

//=== Obstacle ============================================================

/// Horizontally moving obstacle.
#[derive(Debug, Clone)]
pub struct Obstacle {
    kind: ObstacleKind,
    position: Position,
    size: Size,
    direction: Direction,
    speed: f64,
    texture: Texture,
}

impl Obstacle {
    /// Creates an obstacle `length` cells long at `start`.
    ///
    /// The start position is wrapped immediately, so an obstacle created
    /// past the edge it is moving away from re-enters from the other side.
    pub fn new(
        kind: ObstacleKind,
        start: Position,
        direction: Direction,
        length: u32,
        speed: f64,
        level: &dyn LevelBounds,
    ) -> Result<Self, EntityError> {
        if !direction.is_horizontal() {
            return Err(EntityError::InvalidDirection(direction));
        }
        if length == 0 {
            return Err(EntityError::ZeroLength);
        }

        let mut obstacle = Self {
            kind,
            position: start,
            size: Size::new(length as f64, 1.0),
            direction,
            speed,
            texture: Texture::filled(length * CELL_SIZE, CELL_SIZE, kind.color()),
        };
        obstacle.wrap(level);

        Ok(obstacle)
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Speed in cells per [`TIME_CELL_MS`].
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Distance covered in `delta_ms`, in cells.
    pub fn distance(&self, delta_ms: u64) -> f64 {
        delta_ms as f64 * self.speed / TIME_CELL_MS
    }

    /// Moves `rider` the same distance this obstacle travels in `delta_ms`.
    pub fn carry(&self, rider: &mut dyn Entity, delta_ms: u64) {
        shift(rider.position_mut(), self.direction, self.distance(delta_ms));
    }

    fn wrap(&mut self, level: &dyn LevelBounds) {
        let width = level.width() as f64;

        match self.direction {
            Direction::Left if self.position.x + self.size.x <= 0.0 => {
                self.position.x = width + WRAP_MARGIN;
            }
            Direction::Right if self.position.x >= width => {
                self.position.x = -WRAP_MARGIN - self.size.x;
            }
            _ => {}
        }
    }
}

fn shift(position: &mut Position, direction: Direction, distance: f64) {
    match direction {
        Direction::Left => position.x -= distance,
        Direction::Right => position.x += distance,
        Direction::Up | Direction::Down => {}
    }
}

//=== Entity Implementation ===============================================

impl Entity for Obstacle {
    fn position(&self) -> Position {
        self.position
    }

    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    fn size(&self) -> Size {
        self.size
    }

    fn update(&mut self, delta_ms: u64, level: &dyn LevelBounds) {
        let distance = self.distance(delta_ms);
        shift(&mut self.position, self.direction, distance);
        self.wrap(level);
    }

    fn render(&mut self, _level: &dyn LevelBounds) -> Option<&Texture> {
        Some(&self.texture)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
