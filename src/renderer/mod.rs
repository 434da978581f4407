//! Software raycasting renderer
//!
//! Draws through the `Surface` trait; `Framebuffer` is the in-memory target.

pub mod framebuffer;
pub mod hud;
pub mod raycast;
pub mod scene;
pub mod sprites;
pub mod surface;
pub mod walls;

#[cfg(test)]
pub(crate) mod testing;

pub use framebuffer::{Framebuffer, Pixmap};
pub use raycast::{RayBuffer, RaySample, WallSide};
pub use scene::SceneRenderer;
pub use surface::{AssetStore, Color, ImageHandle, Rect, SpriteSet, Surface};
