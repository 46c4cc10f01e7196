//! Fixed timestep ball step
//!
//! Advances a single ball through the pin field deterministically.

use glam::Vec2;

use super::collision::{ball_pin_collision, ball_wall_collision, reflect_velocity};
use super::state::{Ball, BallState, Pin, PinHit, PinKind};
use crate::deck::BallSpec;
use crate::settings::{BoardSettings, PhysicsSettings};

/// Fraction of speed kept after bouncing off a wall
const WALL_RESTITUTION: f32 = 0.9;

/// What happened to a ball during one step
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    pub hits: Vec<PinHit>,
    pub drained: bool,
}

/// Board position where a ball described by `spec` appears
pub fn spawn_position(spec: &BallSpec, board: &BoardSettings) -> Vec2 {
    let radius = spec.kind.radius();
    // Not clamp(): the range is empty when the board is narrower than the ball
    let x = (spec.spawn_lane * board.width)
        .min(board.width - radius)
        .max(radius);
    Vec2::new(x, board.spawn_height())
}

/// Advance one falling ball by `dt`
///
/// Pins are visited in slice order, which callers keep sorted by id.
pub fn step_ball(
    ball: &mut Ball,
    pins: &mut [Pin],
    physics: &PhysicsSettings,
    board: &BoardSettings,
    dt: f32,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if !ball.is_falling() {
        return outcome;
    }

    ball.age_ticks += 1;
    if ball.age_ticks > physics.max_ball_age_ticks {
        log::debug!("Ball {} timed out after {} ticks", ball.id, ball.age_ticks);
        ball.state = BallState::Drained;
        outcome.drained = true;
        return outcome;
    }

    // Integrate
    ball.vel.y -= physics.gravity * ball.kind.gravity_scale() * dt;
    ball.vel = ball.vel.clamp_length_max(physics.max_speed);
    ball.pos += ball.vel * dt;

    // Walls
    let wall = ball_wall_collision(ball.pos, ball.radius, board.width, board.height);
    if wall.hit {
        ball.pos += wall.normal * wall.penetration;
        if ball.vel.dot(wall.normal) < 0.0 {
            ball.vel = reflect_velocity(ball.vel, wall.normal) * WALL_RESTITUTION;
        }
    }

    // Pins
    for pin in pins.iter_mut().filter(|p| p.is_standing()) {
        let hit = ball_pin_collision(ball.pos, ball.radius, pin.pos, pin.radius);
        if !hit.hit {
            continue;
        }
        ball.pos += hit.normal * hit.penetration;

        // Resting contact that is already separating does not count
        if ball.vel.dot(hit.normal) >= 0.0 {
            continue;
        }
        ball.vel = reflect_velocity(ball.vel, hit.normal) * ball.kind.restitution();
        if pin.kind == PinKind::Bumper {
            ball.vel += hit.normal * physics.bumper_kick;
        }
        ball.vel = ball.vel.clamp_length_max(physics.max_speed);
        ball.hits += 1;

        let knocked = pin.damage(ball.kind.damage());
        let mut points = pin.kind.hit_points();
        if knocked {
            points += pin.kind.knock_bonus();
        }
        outcome.hits.push(PinHit {
            pin_id: pin.id,
            ball_id: ball.id,
            pin_kind: pin.kind,
            points,
            ball_multiplier_pct: ball.kind.score_multiplier_pct(),
            knocked,
        });
    }

    // Open floor
    if ball.pos.y + ball.radius < 0.0 {
        ball.state = BallState::Drained;
        outcome.drained = true;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::deck::BallKind;

    fn spec(kind: BallKind, lane: f32) -> BallSpec {
        BallSpec {
            kind,
            spawn_lane: lane,
        }
    }

    fn ball_at(kind: BallKind, pos: Vec2) -> Ball {
        Ball::from_spec(1, &spec(kind, 0.5), pos)
    }

    #[test]
    fn test_gravity_pulls_down() {
        let physics = PhysicsSettings::default();
        let board = BoardSettings::default();
        let mut ball = ball_at(BallKind::Standard, Vec2::new(180.0, 300.0));

        let outcome = step_ball(&mut ball, &mut [], &physics, &board, SIM_DT);
        assert!(outcome.hits.is_empty());
        assert!(!outcome.drained);
        assert!(ball.vel.y < 0.0);
        assert!(ball.pos.y < 300.0);
    }

    #[test]
    fn test_ball_drains_through_floor() {
        let physics = PhysicsSettings::default();
        let board = BoardSettings::default();
        let mut ball = ball_at(BallKind::Standard, Vec2::new(180.0, 50.0));

        let mut drained = false;
        for _ in 0..600 {
            if step_ball(&mut ball, &mut [], &physics, &board, SIM_DT).drained {
                drained = true;
                break;
            }
        }
        assert!(drained);
        assert_eq!(ball.state, BallState::Drained);

        // Drained balls no longer move
        let pos = ball.pos;
        step_ball(&mut ball, &mut [], &physics, &board, SIM_DT);
        assert_eq!(ball.pos, pos);
    }

    #[test]
    fn test_ball_knocks_pin_below() {
        let physics = PhysicsSettings::default();
        let board = BoardSettings::default();
        let mut pins = vec![Pin::new(7, PinKind::Standard, Vec2::new(180.0, 280.0), 6.0)];
        let mut ball = ball_at(BallKind::Standard, Vec2::new(181.0, 300.0));

        let mut hits = Vec::new();
        for _ in 0..120 {
            hits.extend(step_ball(&mut ball, &mut pins, &physics, &board, SIM_DT).hits);
            if !hits.is_empty() {
                break;
            }
        }
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].pin_id, 7);
        assert!(hits[0].knocked);
        assert_eq!(hits[0].points, 10);
        assert!(!pins[0].is_standing());
        // Bounced back up
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_golden_ball_reports_multiplier() {
        let physics = PhysicsSettings::default();
        let board = BoardSettings::default();
        let mut pins = vec![Pin::new(1, PinKind::Gold, Vec2::new(100.0, 100.0), 6.0)];
        let mut ball = ball_at(BallKind::Golden, Vec2::new(100.0, 115.0));
        ball.vel = Vec2::new(0.0, -200.0);

        let outcome = step_ball(&mut ball, &mut pins, &physics, &board, SIM_DT);
        assert_eq!(outcome.hits.len(), 1);
        assert_eq!(outcome.hits[0].ball_multiplier_pct, 200);
        // Gold takes two hits
        assert!(!outcome.hits[0].knocked);
        assert_eq!(pins[0].hp, 1);
    }

    #[test]
    fn test_bumper_kicks_harder_than_standard() {
        let physics = PhysicsSettings::default();
        let board = BoardSettings::default();

        let bounce_speed = |kind: PinKind| {
            let mut pins = vec![Pin::new(1, kind, Vec2::new(100.0, 100.0), 6.0)];
            let mut ball = ball_at(BallKind::Standard, Vec2::new(100.0, 115.0));
            ball.vel = Vec2::new(0.0, -200.0);
            step_ball(&mut ball, &mut pins, &physics, &board, SIM_DT);
            ball.vel.y
        };
        assert!(bounce_speed(PinKind::Bumper) > bounce_speed(PinKind::Standard));
    }

    #[test]
    fn test_side_wall_reflects() {
        let physics = PhysicsSettings::default();
        let board = BoardSettings::default();
        let mut ball = ball_at(BallKind::Standard, Vec2::new(9.0, 300.0));
        ball.vel = Vec2::new(-300.0, 0.0);

        step_ball(&mut ball, &mut [], &physics, &board, SIM_DT);
        assert!(ball.vel.x > 0.0);
        assert!(ball.pos.x >= ball.radius - 0.001);
    }

    #[test]
    fn test_old_ball_times_out() {
        let physics = PhysicsSettings {
            max_ball_age_ticks: 3,
            ..Default::default()
        };
        let board = BoardSettings::default();
        let mut ball = ball_at(BallKind::Standard, Vec2::new(180.0, 600.0));

        let drained: Vec<bool> = (0..4)
            .map(|_| step_ball(&mut ball, &mut [], &physics, &board, SIM_DT).drained)
            .collect();
        assert_eq!(drained, vec![false, false, false, true]);
    }

    #[test]
    fn test_spawn_position_clamped_to_board() {
        let board = BoardSettings::default();
        let pos = spawn_position(&spec(BallKind::Heavy, 0.0), &board);
        assert!((pos.x - BallKind::Heavy.radius()).abs() < 0.001);
        assert!((pos.y - board.spawn_height()).abs() < 0.001);

        let right = spawn_position(&spec(BallKind::Heavy, 1.0), &board);
        assert!((right.x - (board.width - BallKind::Heavy.radius())).abs() < 0.001);

        // Narrower than the ball: pinned to the left wall instead of panicking
        let narrow = BoardSettings {
            width: 15.0,
            ..BoardSettings::default()
        };
        let pos = spawn_position(&spec(BallKind::Heavy, 0.5), &narrow);
        assert!((pos.x - BallKind::Heavy.radius()).abs() < 0.001);
    }

    #[test]
    fn test_determinism() {
        // Two identical setups should produce identical results
        let physics = PhysicsSettings::default();
        let board = BoardSettings::default();
        let make_pins = || {
            (0..5)
                .map(|i| Pin::new(i, PinKind::Standard, Vec2::new(150.0 + i as f32 * 15.0, 300.0), 6.0))
                .collect::<Vec<_>>()
        };
        let mut pins1 = make_pins();
        let mut pins2 = make_pins();
        let mut ball1 = ball_at(BallKind::Bouncy, Vec2::new(173.0, 500.0));
        let mut ball2 = ball1.clone();

        for _ in 0..400 {
            step_ball(&mut ball1, &mut pins1, &physics, &board, SIM_DT);
            step_ball(&mut ball2, &mut pins2, &physics, &board, SIM_DT);
        }
        assert_eq!(ball1.pos, ball2.pos);
        assert_eq!(ball1.hits, ball2.hits);
    }
}
