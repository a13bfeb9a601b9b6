//=========================================================================
// Collision
//=========================================================================
//
// Axis-aligned overlap between entities with an inset margin, so two
// entities that merely graze each other's edges do not collide.
//
//=========================================================================

use super::{Entity, CELL_SIZE};
use crate::core::render::FRect;

/// Inset applied to both rectangles before testing overlap, in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionMargin {
    pub x: f64,
    pub y: f64,
}

impl CollisionMargin {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for CollisionMargin {
    /// Two texture pixels on each axis.
    fn default() -> Self {
        Self::new(2.0 / CELL_SIZE as f64, 2.0 / CELL_SIZE as f64)
    }
}

fn inset(entity: &dyn Entity, margin: CollisionMargin) -> FRect {
    let position = entity.position();
    let size = entity.size();

    FRect::new(
        (position.x + margin.x) as f32,
        (position.y + margin.y) as f32,
        (size.x - margin.x) as f32,
        (size.y - margin.y) as f32,
    )
}

/// Returns `true` when the inset rectangles of `a` and `b` overlap with a
/// strictly positive area.
pub fn collides(a: &dyn Entity, b: &dyn Entity, margin: CollisionMargin) -> bool {
    inset(a, margin).intersection(&inset(b, margin)).is_some()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{Direction, GridBounds, Obstacle, ObstacleKind, Player, Position};

    fn car_at(x: f64, y: f64) -> Obstacle {
        let level = GridBounds::new(15, 7);
        Obstacle::new(ObstacleKind::Car, Position::new(x, y), Direction::Left, 2, 1.0, &level)
            .unwrap()
    }

    #[test]
    fn overlapping_entities_collide() {
        let player = Player::new(Position::new(3.0, 2.0));
        let car = car_at(2.5, 2.0);

        assert!(collides(&player, &car, CollisionMargin::default()));
    }

    #[test]
    fn different_rows_do_not_collide() {
        let player = Player::new(Position::new(3.0, 2.0));
        let car = car_at(3.0, 3.0);

        assert!(!collides(&player, &car, CollisionMargin::default()));
    }

    #[test]
    fn edge_contact_is_absorbed_by_margin() {
        let player = Player::new(Position::new(5.0, 2.0));
        let car = car_at(3.0, 2.0);

        assert!(!collides(&player, &car, CollisionMargin::default()));
        assert!(!collides(&player, &car, CollisionMargin::new(0.0, 0.0)));
    }

    #[test]
    fn slight_overlap_needs_to_exceed_margin() {
        let player = Player::new(Position::new(4.95, 2.0));
        let car = car_at(3.0, 2.0);

        assert!(collides(&player, &car, CollisionMargin::new(0.0, 0.0)));
        assert!(!collides(&player, &car, CollisionMargin::default()));
    }
}
