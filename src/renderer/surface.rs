//! Drawing and asset contracts
//!
//! The renderer only ever talks to a `Surface` and resolves images through an
//! `AssetStore`. Windowing, image decoding and presentation belong to whoever
//! implements these traits.

use crate::error::{Error, Result};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from possibly out-of-range channels, clamping each to 0..=255
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Self::rgb(c(r), c(g), c(b))
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Subtract `amount` from each color channel (alpha untouched)
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
            a: self.a,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY: Color = Color::rgb(135, 206, 235);
    pub const FLOOR: Color = Color::rgb(139, 90, 43);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 213, 0);
    pub const PINK: Color = Color::rgb(255, 105, 180);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREY: Color = Color::rgb(100, 100, 100);
    pub const DARK_GREY: Color = Color::rgb(50, 50, 50);
}

/// Integer screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Opaque reference to a preloaded image with known pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    /// Width for a given height, keeping the aspect ratio
    pub fn width_for_height(&self, height: u32) -> u32 {
        if self.height == 0 {
            return 0;
        }
        ((height as u64 * self.width as u64) / self.height as u64) as u32
    }
}

/// A drawable target
pub trait Surface {
    /// Size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Rectangle outline `thickness` pixels wide
    fn draw_rect(&mut self, rect: Rect, color: Color, thickness: u32);

    /// Draw `image` stretched to `dest`, with every channel reduced by `darken`
    fn blit_scaled_image(&mut self, image: ImageHandle, dest: Rect, darken: u8);

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color, width: u32);

    /// Filled circle
    fn draw_circle(&mut self, center: (i32, i32), radius: u32, color: Color);

    /// Finish the frame
    fn present(&mut self);
}

/// Resolves logical sprite names to preloaded images
pub trait AssetStore {
    fn resolve(&self, name: &str) -> Option<ImageHandle>;
}

/// Logical asset names the renderer needs
pub mod asset_names {
    pub const PICKUP: &str = "pickup";
    pub const ADVERSARY: &str = "adversary";
    pub const GAME_OVER: &str = "game_over";
    pub const PORTRAIT: &str = "portrait";

    pub const REQUIRED: [&str; 4] = [PICKUP, ADVERSARY, GAME_OVER, PORTRAIT];
}

/// Every image the renderer draws, resolved once before the loop starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSet {
    pub pickup: ImageHandle,
    pub adversary: ImageHandle,
    pub game_over: ImageHandle,
    pub portrait: ImageHandle,
}

impl SpriteSet {
    /// Resolve all required images; any missing one is fatal
    pub fn resolve<A: AssetStore + ?Sized>(assets: &A) -> Result<Self> {
        let get = |name: &str| {
            assets
                .resolve(name)
                .ok_or_else(|| Error::MissingAsset(name.to_string()))
        };
        Ok(Self {
            pickup: get(asset_names::PICKUP)?,
            adversary: get(asset_names::ADVERSARY)?,
            game_over: get(asset_names::GAME_OVER)?,
            portrait: get(asset_names::PORTRAIT)?,
        })
    }
}
