//! Ray marching against the level grid
//!
//! One ray per screen column. Each ray advances in fixed steps from the
//! viewpoint until it lands in a wall cell or leaves the map, then the raw
//! distance is projected onto the view direction to undo the fisheye bow.

use glam::Vec2;

use crate::heading_vector;
use crate::level::{Cell, Level};

/// Which face of a wall cell a ray struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallSide {
    /// Face running along the x axis (y = const)
    #[default]
    Horizontal,
    /// Face running along the y axis (x = const)
    Vertical,
}

/// Result of one column's ray
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RaySample {
    /// Fisheye-corrected distance used for wall height
    pub perpendicular_distance: f32,
    /// Distance along the ray itself
    pub raw_distance: f32,
    pub ray_angle: f32,
    pub side: WallSide,
    /// False when the ray left the map or ran out of depth
    pub hit: bool,
}

/// Where a single marched ray ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub side: WallSide,
}

/// Number of marching steps needed to cover `max_depth`.
///
/// The ratio is nudged down before rounding up so that float error in
/// e.g. `20.0 / 0.01` does not add a step past the depth limit.
#[inline]
pub fn max_steps(max_depth: f32, step: f32) -> u32 {
    (max_depth / step - 1e-3).ceil().max(1.0) as u32
}

/// March one ray from `origin` at `angle`.
///
/// Returns `None` when the ray leaves the map or reaches `max_depth` without
/// touching a wall. Hit distances never exceed `max_depth`.
pub fn march_ray(
    level: &Level,
    origin: Vec2,
    angle: f32,
    max_depth: f32,
    step: f32,
) -> Option<RayHit> {
    let dir = heading_vector(angle);

    for k in 1..=max_steps(max_depth, step) {
        let travelled = k as f32 * step;
        let p = origin + dir * travelled;
        match level.cell_at(p) {
            None => return None,
            Some(Cell::Wall) => {
                let fx = p.x - p.x.floor();
                let fy = p.y - p.y.floor();
                let side = if (fx - 0.5).abs() > (fy - 0.5).abs() {
                    WallSide::Vertical
                } else {
                    WallSide::Horizontal
                };
                return Some(RayHit {
                    distance: travelled.min(max_depth),
                    side,
                });
            }
            Some(_) => {}
        }
    }
    None
}

/// Preallocated per-column sample buffer, reused every frame
#[derive(Debug, Clone, Default)]
pub struct RayBuffer {
    samples: Vec<RaySample>,
}

impl RayBuffer {
    pub fn with_columns(columns: usize) -> Self {
        Self {
            samples: vec![RaySample::default(); columns],
        }
    }

    #[inline]
    pub fn samples(&self) -> &[RaySample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Cast `columns` rays spread over `[heading - fov/2, heading + fov/2)`
    #[allow(clippy::too_many_arguments)]
    pub fn cast(
        &mut self,
        level: &Level,
        origin: Vec2,
        heading: f32,
        fov: f32,
        columns: usize,
        max_depth: f32,
        step: f32,
    ) -> &[RaySample] {
        if self.samples.len() != columns {
            self.samples.resize(columns, RaySample::default());
        }

        let start = heading - fov / 2.0;
        let delta = fov / columns.max(1) as f32;
        for (i, sample) in self.samples.iter_mut().enumerate() {
            let ray_angle = start + delta * i as f32;
            *sample = match march_ray(level, origin, ray_angle, max_depth, step) {
                Some(hit) => RaySample {
                    perpendicular_distance: hit.distance * (ray_angle - heading).cos(),
                    raw_distance: hit.distance,
                    ray_angle,
                    side: hit.side,
                    hit: true,
                },
                None => RaySample {
                    perpendicular_distance: max_depth,
                    raw_distance: max_depth,
                    ray_angle,
                    side: WallSide::Horizontal,
                    hit: false,
                },
            };
        }
        &self.samples
    }
}
