//! Grid collision for the viewpoint
//!
//! Axes are resolved one at a time so that pushing diagonally into a wall
//! still slides along it.

use glam::Vec2;

use super::tick::TickInput;
use crate::level::Level;

/// Movement wanted this tick from the held keys, in world units
pub fn desired_delta(input: &TickInput, heading: f32, speed: f32) -> Vec2 {
    let (sin_a, cos_a) = heading.sin_cos();
    let mut delta = Vec2::ZERO;
    if input.forward {
        delta += Vec2::new(cos_a, sin_a);
    }
    if input.backward {
        delta -= Vec2::new(cos_a, sin_a);
    }
    if input.strafe_left {
        delta += Vec2::new(sin_a, -cos_a);
    }
    if input.strafe_right {
        delta += Vec2::new(-sin_a, cos_a);
    }
    delta * speed
}

/// Heading change wanted this tick
pub fn rotation_delta(input: &TickInput, rotation_speed: f32) -> f32 {
    let mut delta = 0.0;
    if input.rotate_left {
        delta -= rotation_speed;
    }
    if input.rotate_right {
        delta += rotation_speed;
    }
    delta
}

/// Move `pos` by `delta`, committing each axis only if the cell just ahead
/// (by `radius`, in the direction of travel) is open.
pub fn slide_move(pos: Vec2, delta: Vec2, radius: f32, level: &Level) -> Vec2 {
    let mut out = pos;

    if delta.x != 0.0 {
        let candidate = out.x + delta.x;
        let edge = Vec2::new(candidate + radius * delta.x.signum(), out.y);
        if !level.is_blocked(edge) {
            out.x = candidate;
        }
    }

    if delta.y != 0.0 {
        let candidate = out.y + delta.y;
        let edge = Vec2::new(out.x, candidate + radius * delta.y.signum());
        if !level.is_blocked(edge) {
            out.y = candidate;
        }
    }

    level.clamp_position(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn closed_room() -> Level {
        // 6x5 room, one pillar at (3, 2)
        Level::from_rows(&[
            vec![1, 1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 0, 1],
            vec![1, 0, 0, 1, 0, 1],
            vec![1, 0, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1, 1],
        ])
        .unwrap()
    }

    #[test]
    fn test_open_move_commits_both_axes() {
        let level = closed_room();
        let out = slide_move(Vec2::new(1.5, 1.5), Vec2::new(0.05, 0.05), 0.3, &level);
        assert!((out - Vec2::new(1.55, 1.55)).length() < 1e-6);
    }

    #[test]
    fn test_wall_blocks_axis() {
        let level = closed_room();
        // Right wall at x = 5; edge 4.75 + 0.3 lands in it
        let out = slide_move(Vec2::new(4.65, 2.5), Vec2::new(0.1, 0.0), 0.3, &level);
        assert_eq!(out.x, 4.65);
    }

    #[test]
    fn test_slides_along_wall() {
        let level = closed_room();
        // Pushing up-left into the left wall: x blocked, y still moves
        let start = Vec2::new(1.35, 2.5);
        let out = slide_move(start, Vec2::new(-0.1, -0.1), 0.3, &level);
        assert_eq!(out.x, start.x);
        assert!((out.y - 2.4).abs() < 1e-6);
    }

    #[test]
    fn test_desired_delta_directions() {
        let forward = TickInput {
            forward: true,
            ..Default::default()
        };
        let d = desired_delta(&forward, 0.0, 0.05);
        assert!((d - Vec2::new(0.05, 0.0)).length() < 1e-6);

        let strafe = TickInput {
            strafe_right: true,
            ..Default::default()
        };
        // Facing +x, strafing right moves toward +y (screen down)
        let d = desired_delta(&strafe, 0.0, 1.0);
        assert!((d - Vec2::new(0.0, 1.0)).length() < 1e-6);

        let back = TickInput {
            backward: true,
            ..Default::default()
        };
        let d = desired_delta(&back, FRAC_PI_2, 1.0);
        assert!((d - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_rotation_cancels() {
        let both = TickInput {
            rotate_left: true,
            rotate_right: true,
            ..Default::default()
        };
        assert_eq!(rotation_delta(&both, 0.03), 0.0);
    }

    proptest! {
        #[test]
        fn prop_never_steps_into_wall(
            x in 1.3f32..4.7,
            y in 1.3f32..3.7,
            dx in -0.2f32..0.2,
            dy in -0.2f32..0.2,
        ) {
            let level = closed_room();
            let start = Vec2::new(x, y);
            prop_assume!(!level.is_blocked(start));
            let radius = 0.3;
            let out = slide_move(start, Vec2::new(dx, dy), radius, &level);

            if out.x != start.x {
                let edge = Vec2::new(out.x + radius * dx.signum(), start.y);
                prop_assert!(!level.is_blocked(edge));
            }
            if out.y != start.y {
                let edge = Vec2::new(out.x, out.y + radius * dy.signum());
                prop_assert!(!level.is_blocked(edge));
            }
            prop_assert!(!level.is_blocked(out));
        }
    }
}
