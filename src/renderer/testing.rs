//! Test doubles for the drawing contracts

use super::surface::{Color, ImageHandle, Rect, SpriteSet, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Fill(Rect, Color),
    Outline(Rect, Color, u32),
    Blit(ImageHandle, Rect, u8),
    Line((i32, i32), (i32, i32), Color),
    Circle((i32, i32), u32, Color),
    Present,
}

/// Surface that records every call in order
#[derive(Debug)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, thickness: u32) {
        self.calls.push(DrawCall::Outline(rect, color, thickness));
    }

    fn blit_scaled_image(&mut self, image: ImageHandle, dest: Rect, darken: u8) {
        self.calls.push(DrawCall::Blit(image, dest, darken));
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color, _width: u32) {
        self.calls.push(DrawCall::Line(from, to, color));
    }

    fn draw_circle(&mut self, center: (i32, i32), radius: u32, color: Color) {
        self.calls.push(DrawCall::Circle(center, radius, color));
    }

    fn present(&mut self) {
        self.calls.push(DrawCall::Present);
    }
}

/// Square 32x32 placeholders with distinct ids
pub fn test_sprites() -> SpriteSet {
    let img = |id| ImageHandle {
        id,
        width: 32,
        height: 32,
    };
    SpriteSet {
        pickup: img(1),
        adversary: img(2),
        game_over: img(3),
        portrait: img(4),
    }
}
