//! Ray Arena - a first-person grid raycaster with a chase-and-collect loop
//!
//! Core modules:
//! - `level`: Immutable cell grid and spawn records
//! - `sim`: Deterministic simulation (movement, pursuit AI, pickups, session state)
//! - `renderer`: Ray casting, wall slices, billboard sprites, HUD
//! - `settings`: Data-driven session configuration
//! - `app`: Frame loop glue (input → simulate → render → present)

pub mod app;
pub mod error;
pub mod level;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{DemoPilot, Game, InputSource, LoopControl, ScriptedInput};
pub use error::{Error, Result};
pub use level::{Cell, Level};
pub use settings::{Config, QualityPreset};

use glam::Vec2;

/// Fixed game constants that are not worth exposing as configuration
pub mod consts {
    /// Maximum (and starting) viewpoint health
    pub const MAX_HEALTH: i32 = 100;
    /// Smallest distance used for projection math
    pub const DEPTH_EPSILON: f32 = 1e-4;
    /// Sprite height as a fraction of `screen_height * scale`
    pub const SPRITE_HEIGHT_FACTOR: f32 = 0.8;
    /// Wall slices never grow taller than this many screen heights
    pub const MAX_WALL_SCREENS: f32 = 2.0;
}

/// Normalize an angle into (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Unit direction vector for a heading
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Grid cell index containing a world position (may be negative)
#[inline]
pub fn cell_of(pos: Vec2) -> (i32, i32) {
    (pos.x.floor() as i32, pos.y.floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(-5.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_cell_of_negative() {
        assert_eq!(cell_of(Vec2::new(1.5, 2.9)), (1, 2));
        assert_eq!(cell_of(Vec2::new(-0.2, 0.1)), (-1, 0));
    }
}
