//! Billboard sprite projection and compositing
//!
//! Sprites are painted back-to-front after the wall layer. By default there
//! is no depth test against the walls, so a sprite behind a wall still shows
//! through it; `Config::occlude_sprites` enables a coarse center-column check.

use glam::Vec2;

use super::raycast::RaySample;
use super::surface::{ImageHandle, Rect, SpriteSet, Surface};
use crate::consts::SPRITE_HEIGHT_FACTOR;
use crate::normalize_angle;
use crate::settings::Config;
use crate::sim::{EntityKind, GameState};

/// Projection limits taken from the session config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub fov: f32,
    pub margin: f32,
    pub max_scale: f32,
    pub min_distance: f32,
    pub screen_width: u32,
}

impl ProjectionParams {
    pub fn from_config(config: &Config, screen_width: u32) -> Self {
        Self {
            fov: config.fov,
            margin: config.sprite_margin,
            max_scale: config.max_sprite_scale,
            min_distance: config.min_sprite_distance,
            screen_width,
        }
    }
}

/// An entity mapped into screen space for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedSprite {
    pub screen_x: f32,
    pub distance: f32,
    pub scale: f32,
    /// Index into `GameState::entities`
    pub entity: usize,
}

/// Scale of a billboard at `distance`, clamped at both ends
#[inline]
pub fn sprite_scale(base_scale: f32, distance: f32, params: &ProjectionParams) -> f32 {
    (base_scale / distance.max(params.min_distance)).min(params.max_scale)
}

/// Project a world position relative to the viewpoint, `None` if outside the view cone
pub fn project(
    pos: Vec2,
    base_scale: f32,
    eye: Vec2,
    heading: f32,
    entity: usize,
    params: &ProjectionParams,
) -> Option<ProjectedSprite> {
    let offset = pos - eye;
    let distance = offset.length().max(params.min_distance);
    let delta = normalize_angle(offset.y.atan2(offset.x) - heading);

    if delta.abs() > params.fov / 2.0 + params.margin {
        return None;
    }

    Some(ProjectedSprite {
        screen_x: (delta / params.fov + 0.5) * params.screen_width as f32,
        distance,
        scale: sprite_scale(base_scale, distance, params),
        entity,
    })
}

/// Sort farthest first; equal distances keep their input order
pub fn sort_back_to_front(sprites: &mut [ProjectedSprite]) {
    sprites.sort_by(|a, b| b.distance.total_cmp(&a.distance));
}

/// Darkening applied to a sprite at `distance`
#[inline]
pub fn distance_darkness(distance: f32) -> u8 {
    (distance * 20.0).clamp(0.0, 200.0) as u8
}

/// Screen rectangle of a projected sprite for an image of the given shape
pub fn sprite_rect(sprite: &ProjectedSprite, image: ImageHandle, screen_height: u32) -> Rect {
    let height = (screen_height as f32 * sprite.scale * SPRITE_HEIGHT_FACTOR) as u32;
    let width = image.width_for_height(height);
    let x = sprite.screen_x as i32 - (width / 2) as i32;
    let y = (screen_height / 2) as i32 - (height / 2) as i32;
    Rect::new(x, y, width, height)
}

/// Per-frame sprite projection and painter's-algorithm compositing
#[derive(Debug, Default)]
pub struct Compositor {
    scratch: Vec<ProjectedSprite>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project every active entity and sort the result back to front
    pub fn collect(&mut self, state: &GameState, params: &ProjectionParams) -> &[ProjectedSprite] {
        self.scratch.clear();
        let eye = state.viewpoint.pos;
        let heading = state.viewpoint.heading;
        for (idx, entity) in state.active_entities() {
            let projected = project(entity.pos, entity.base_scale, eye, heading, idx, params);
            if let Some(sprite) = projected {
                self.scratch.push(sprite);
            }
        }
        sort_back_to_front(&mut self.scratch);
        &self.scratch
    }

    /// Sprites from the last `collect`, in paint order
    pub fn sprites(&self) -> &[ProjectedSprite] {
        &self.scratch
    }

    /// Paint collected sprites in order over the wall layer
    pub fn paint<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        state: &GameState,
        images: &SpriteSet,
        rays: &[RaySample],
    ) {
        let (w, h) = surface.size();
        let occlude = state.config().occlude_sprites;

        for sprite in &self.scratch {
            if occlude && hidden_by_wall(sprite, rays, w) {
                continue;
            }
            let image = match state.entities[sprite.entity].kind {
                EntityKind::Pickup => images.pickup,
                EntityKind::Adversary { .. } => images.adversary,
            };
            let rect = sprite_rect(sprite, image, h);
            if rect.is_empty() {
                continue;
            }
            surface.blit_scaled_image(image, rect, distance_darkness(sprite.distance));
        }
    }
}

/// Whether the wall in the sprite's center column is nearer than the sprite.
///
/// Both sides are measured along the ray; the fisheye-corrected wall
/// distance would understate the wall for off-center sprites.
fn hidden_by_wall(sprite: &ProjectedSprite, rays: &[RaySample], screen_width: u32) -> bool {
    if rays.is_empty() || screen_width == 0 {
        return false;
    }
    let col = (sprite.screen_x / screen_width as f32 * rays.len() as f32).floor();
    if col < 0.0 || col >= rays.len() as f32 {
        return false;
    }
    let ray = rays[col as usize];
    ray.hit && ray.raw_distance < sprite.distance
}
