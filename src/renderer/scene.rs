//! Frame composition
//!
//! Owns the per-frame scratch buffers and paints one frame in a fixed order:
//! sky and floor, wall slices, sprites, HUD, minimap, then the outcome overlay.

use super::hud;
use super::raycast::RayBuffer;
use super::sprites::{Compositor, ProjectionParams};
use super::surface::{AssetStore, SpriteSet, Surface};
use super::walls;
use crate::error::Result;
use crate::sim::GameState;

/// Render state reused across frames
#[derive(Debug)]
pub struct SceneRenderer {
    rays: RayBuffer,
    compositor: Compositor,
    sprites: SpriteSet,
}

impl SceneRenderer {
    pub fn new(sprites: SpriteSet, columns: usize) -> Self {
        Self {
            rays: RayBuffer::with_columns(columns),
            compositor: Compositor::new(),
            sprites,
        }
    }

    /// Resolve the required images up front; fails on the first missing one
    pub fn from_assets<A: AssetStore + ?Sized>(assets: &A, columns: usize) -> Result<Self> {
        Ok(Self::new(SpriteSet::resolve(assets)?, columns))
    }

    pub fn sprites(&self) -> &SpriteSet {
        &self.sprites
    }

    /// Ray samples from the last rendered frame
    pub fn rays(&self) -> &RayBuffer {
        &self.rays
    }

    /// Paint the whole frame. Does not present.
    pub fn render<S: Surface + ?Sized>(&mut self, state: &GameState, surface: &mut S) {
        let config = state.config();
        let (width, _) = surface.size();
        let vp = state.viewpoint;

        let samples = self.rays.cast(
            state.level(),
            vp.pos,
            vp.heading,
            config.fov,
            config.column_count(),
            config.max_depth,
            config.ray_step,
        );
        walls::paint_wall_layer(surface, samples);

        let params = ProjectionParams::from_config(config, width);
        self.compositor.collect(state, &params);
        self.compositor
            .paint(surface, state, &self.sprites, self.rays.samples());

        if config.show_hud {
            hud::paint_status(surface, state, &self.sprites);
        }
        if config.show_minimap {
            hud::paint_minimap(surface, state);
        }
        if state.session.is_terminal() {
            hud::paint_overlay(surface, state.session, &self.sprites);
        }
    }
}
