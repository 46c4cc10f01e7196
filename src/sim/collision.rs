//! Collision detection and response
//!
//! Balls are circles; pins are circles; the board has two side walls and a
//! ceiling. The floor is open and drains balls.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Collision point (if hit)
    pub point: Vec2,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and a pin
pub fn ball_pin_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    pin_pos: Vec2,
    pin_radius: f32,
) -> CollisionResult {
    let delta = ball_pos - pin_pos;
    let dist = delta.length();
    let min_dist = ball_radius + pin_radius;

    if dist >= min_dist {
        return CollisionResult::miss();
    }

    // Dead center: push straight up so the ball falls off one side later
    let normal = if dist > 1e-4 { delta / dist } else { Vec2::Y };
    CollisionResult {
        hit: true,
        point: pin_pos + normal * pin_radius,
        normal,
        penetration: min_dist - dist,
    }
}

/// Check collision against the side walls and ceiling of a board
pub fn ball_wall_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    board_width: f32,
    board_height: f32,
) -> CollisionResult {
    if ball_pos.x - ball_radius < 0.0 {
        return CollisionResult {
            hit: true,
            point: Vec2::new(0.0, ball_pos.y),
            normal: Vec2::X,
            penetration: ball_radius - ball_pos.x,
        };
    }
    if ball_pos.x + ball_radius > board_width {
        return CollisionResult {
            hit: true,
            point: Vec2::new(board_width, ball_pos.y),
            normal: Vec2::NEG_X,
            penetration: ball_pos.x + ball_radius - board_width,
        };
    }
    if ball_pos.y + ball_radius > board_height {
        return CollisionResult {
            hit: true,
            point: Vec2::new(ball_pos.x, board_height),
            normal: Vec2::NEG_Y,
            penetration: ball_pos.y + ball_radius - board_height,
        };
    }
    CollisionResult::miss()
}

/// Reflect velocity off a surface with given normal
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_pin_overlap() {
        let result = ball_pin_collision(Vec2::new(10.0, 0.0), 8.0, Vec2::ZERO, 6.0);
        assert!(result.hit);
        assert!((result.penetration - 4.0).abs() < 0.001);
        // Normal points from pin toward ball
        assert!((result.normal - Vec2::X).length() < 0.001);
    }

    #[test]
    fn test_ball_pin_miss() {
        let result = ball_pin_collision(Vec2::new(20.0, 0.0), 8.0, Vec2::ZERO, 6.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_ball_pin_dead_center() {
        let result = ball_pin_collision(Vec2::ZERO, 8.0, Vec2::ZERO, 6.0);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_wall_collision() {
        // Ball inside - no collision
        assert!(!ball_wall_collision(Vec2::new(100.0, 100.0), 8.0, 360.0, 640.0).hit);

        let left = ball_wall_collision(Vec2::new(4.0, 100.0), 8.0, 360.0, 640.0);
        assert!(left.hit);
        assert_eq!(left.normal, Vec2::X);

        let right = ball_wall_collision(Vec2::new(358.0, 100.0), 8.0, 360.0, 640.0);
        assert!(right.hit);
        assert_eq!(right.normal, Vec2::NEG_X);

        let ceiling = ball_wall_collision(Vec2::new(100.0, 636.0), 8.0, 360.0, 640.0);
        assert!(ceiling.hit);
        assert_eq!(ceiling.normal, Vec2::NEG_Y);
    }
}
