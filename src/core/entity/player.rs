//=========================================================================
// Player
//=========================================================================
//
// Grid-stepping player with a fixed-length move animation.
//
// State machine:
//
//   Idle ──request_move(dir)──> Moving(dir)     (only if the target cell
//                                                is inside the level)
//   Moving(dir) ──elapsed >= ANIMATION_LENGTH_MS──> Idle   (position snapped)
//
// Move requests while moving are ignored. Each phase has its own color.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::{Direction, Entity, LevelBounds, Position, Size, CELL_SIZE};
use crate::core::render::{Color, Texture};

/// Duration of one cell step.
pub const ANIMATION_LENGTH_MS: u64 = 250;

//=== Animation ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Animation {
    #[default]
    Idle,
    MovingUp,
    MovingDown,
    MovingLeft,
    MovingRight,
}

impl Animation {
    fn moving(direction: Direction) -> Self {
        match direction {
            Direction::Up => Animation::MovingUp,
            Direction::Down => Animation::MovingDown,
            Direction::Left => Animation::MovingLeft,
            Direction::Right => Animation::MovingRight,
        }
    }

    /// Color the player is drawn with during this phase.
    pub const fn color(self) -> Color {
        match self {
            Animation::Idle => Color::WHITE,
            Animation::MovingUp => Color::rgb(255, 0, 0),
            Animation::MovingDown => Color::rgb(0, 255, 0),
            Animation::MovingLeft => Color::rgb(0, 255, 255),
            Animation::MovingRight => Color::rgb(255, 0, 255),
        }
    }
}

//=== Player ==============================================================

#[derive(Debug, Clone)]
pub struct Player {
    position: Position,
    animation: Animation,
    elapsed_ms: u64,

    /// Created on first render.
    texture: Option<Texture>,
}

impl Player {
    pub fn new(start: Position) -> Self {
        Self {
            position: start,
            animation: Animation::Idle,
            elapsed_ms: 0,
            texture: None,
        }
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn is_moving(&self) -> bool {
        self.animation != Animation::Idle
    }

    /// Starts a one-cell move toward `direction`.
    ///
    /// Returns `false` when the player is already moving or the move would
    /// leave the level.
    pub fn request_move(&mut self, direction: Direction, level: &dyn LevelBounds) -> bool {
        if self.is_moving() {
            return false;
        }

        let allowed = match direction {
            Direction::Up => self.position.y > 0.0,
            Direction::Down => self.position.y + 1.0 < level.height() as f64,
            Direction::Left => self.position.x > 0.0,
            Direction::Right => self.position.x + 1.0 < level.width() as f64,
        };

        if allowed {
            trace!("Player starts moving {:?}", direction);
            self.animation = Animation::moving(direction);
            self.elapsed_ms = 0;
        }
        allowed
    }
}

//=== Entity Implementation ===============================================

impl Entity for Player {
    fn position(&self) -> Position {
        self.position
    }

    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    fn size(&self) -> Size {
        Size::new(1.0, 1.0)
    }

    fn update(&mut self, delta_ms: u64, _level: &dyn LevelBounds) {
        if !self.is_moving() {
            return;
        }

        let step_ms = delta_ms.min(ANIMATION_LENGTH_MS - self.elapsed_ms);
        let distance = step_ms as f64 / ANIMATION_LENGTH_MS as f64;
        self.elapsed_ms += step_ms;

        match self.animation {
            Animation::Idle => {}
            Animation::MovingUp => self.position.y -= distance,
            Animation::MovingDown => self.position.y += distance,
            Animation::MovingLeft => self.position.x -= distance,
            Animation::MovingRight => self.position.x += distance,
        }

        if self.elapsed_ms >= ANIMATION_LENGTH_MS {
            self.position.x = self.position.x.round();
            self.position.y = self.position.y.round();
            self.animation = Animation::Idle;
            self.elapsed_ms = 0;
        }
    }

    fn render(&mut self, _level: &dyn LevelBounds) -> Option<&Texture> {
        let color = self.animation.color();
        let texture = self
            .texture
            .get_or_insert_with(|| Texture::filled(CELL_SIZE, CELL_SIZE, color));
        texture.fill(color);
        Some(&*texture)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::GridBounds;

    const LEVEL: GridBounds = GridBounds::new(15, 7);

    #[test]
    fn starts_idle() {
        let player = Player::new(Position::new(7.0, 6.0));
        assert_eq!(player.animation(), Animation::Idle);
        assert!(!player.is_moving());
    }

    #[test]
    fn move_request_starts_animation() {
        let mut player = Player::new(Position::new(7.0, 6.0));

        assert!(player.request_move(Direction::Up, &LEVEL));
        assert_eq!(player.animation(), Animation::MovingUp);

        player.update(125, &LEVEL);
        assert_eq!(player.position(), Position::new(7.0, 5.5));
        assert!(player.is_moving());
    }

    #[test]
    fn request_while_moving_is_ignored() {
        let mut player = Player::new(Position::new(7.0, 3.0));
        assert!(player.request_move(Direction::Left, &LEVEL));

        player.update(50, &LEVEL);
        assert!(!player.request_move(Direction::Right, &LEVEL));
        assert_eq!(player.animation(), Animation::MovingLeft);
    }

    #[test]
    fn animation_snaps_to_target_cell() {
        let mut player = Player::new(Position::new(7.0, 3.0));
        assert!(player.request_move(Direction::Right, &LEVEL));

        for delta in [16, 17, 16, 17, 16, 17, 16, 17, 16, 17, 16, 17, 16, 17, 16, 17] {
            player.update(delta, &LEVEL);
        }

        assert_eq!(player.animation(), Animation::Idle);
        assert_eq!(player.position(), Position::new(8.0, 3.0));
    }

    #[test]
    fn overshooting_delta_is_clamped() {
        let mut player = Player::new(Position::new(7.0, 3.0));
        assert!(player.request_move(Direction::Down, &LEVEL));

        player.update(1000, &LEVEL);

        assert_eq!(player.animation(), Animation::Idle);
        assert_eq!(player.position(), Position::new(7.0, 4.0));
    }

    #[test]
    fn moves_off_grid_are_rejected() {
        let mut corner = Player::new(Position::new(0.0, 0.0));
        assert!(!corner.request_move(Direction::Up, &LEVEL));
        assert!(!corner.request_move(Direction::Left, &LEVEL));

        let mut far = Player::new(Position::new(14.0, 6.0));
        assert!(!far.request_move(Direction::Down, &LEVEL));
        assert!(!far.request_move(Direction::Right, &LEVEL));
        assert!(!far.is_moving());
    }

    #[test]
    fn idle_update_does_not_move() {
        let mut player = Player::new(Position::new(2.0, 2.0));
        player.update(500, &LEVEL);
        assert_eq!(player.position(), Position::new(2.0, 2.0));
    }

    #[test]
    fn render_color_follows_animation() {
        let mut player = Player::new(Position::new(7.0, 3.0));
        assert_eq!(player.render(&LEVEL).unwrap().pixel(0, 0), Some(Color::WHITE));

        player.request_move(Direction::Up, &LEVEL);
        let texture = player.render(&LEVEL).unwrap();
        assert_eq!(texture.pixel(0, 0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(texture.width(), CELL_SIZE);
    }
}
