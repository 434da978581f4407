//! CPU framebuffer
//!
//! An in-memory RGBA `Surface` that also owns the images it can blit, so it
//! doubles as the `AssetStore` for headless runs and tests.

use std::collections::HashMap;

use super::surface::{AssetStore, Color, ImageHandle, Rect, Surface};

/// Immutable image pixels, sampled nearest-neighbor
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Pixmap {
    /// `None` if `pixels` does not match the size
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        let expected = width as usize * height as usize;
        (expected > 0 && pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from a per-pixel function
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Color) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    fn sample(&self, x: u32, y: u32) -> Color {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }
}

#[inline]
fn blend(dst: Color, src: Color) -> Color {
    match src.a {
        255 => src,
        0 => dst,
        a => {
            let a = a as u32;
            let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
            Color::rgb(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b))
        }
    }
}

/// Software render target
#[derive(Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    color_buffer: Vec<Color>,
    images: Vec<Pixmap>,
    names: HashMap<String, ImageHandle>,
    frames_presented: u64,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color_buffer: vec![Color::rgb(0, 0, 0); width as usize * height as usize],
            images: Vec::new(),
            names: HashMap::new(),
            frames_presented: 0,
        }
    }

    /// Register an image under a logical name, replacing any previous one
    pub fn register_image(&mut self, name: &str, pixmap: Pixmap) -> ImageHandle {
        let handle = ImageHandle {
            id: self.images.len() as u32,
            width: pixmap.width,
            height: pixmap.height,
        };
        self.images.push(pixmap);
        self.names.insert(name.to_string(), handle);
        handle
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height)
            .then(|| self.color_buffer[y as usize * self.width as usize + x as usize])
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Raw pixels, row-major
    pub fn pixels(&self) -> &[Color] {
        &self.color_buffer
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.color_buffer[idx] = blend(self.color_buffer[idx], color);
    }

    /// Rect clipped to the buffer, as (x0, y0, x1, y1) exclusive
    fn clip(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

impl AssetStore for Framebuffer {
    fn resolve(&self, name: &str) -> Option<ImageHandle> {
        self.names.get(name).copied()
    }
}

impl Surface for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, thickness: u32) {
        let t = thickness.min(rect.w / 2 + 1).min(rect.h / 2 + 1);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t as i32, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - t as i32, rect.y, t, rect.h), color);
    }

    fn blit_scaled_image(&mut self, image: ImageHandle, dest: Rect, darken: u8) {
        if dest.is_empty() {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(dest) else {
            return;
        };
        let Some(pixmap) = self.images.get(image.id as usize) else {
            log::warn!("blit of unknown image id {}", image.id);
            return;
        };
        let stride = self.width as usize;
        for y in y0..y1 {
            let ty = ((y - dest.y) as u64 * pixmap.height as u64 / dest.h as u64) as u32;
            let row = y as usize * stride;
            for x in x0..x1 {
                let tx = ((x - dest.x) as u64 * pixmap.width as u64 / dest.w as u64) as u32;
                let c = pixmap.sample(tx, ty);
                if c.a < 8 {
                    continue;
                }
                let idx = row + x as usize;
                self.color_buffer[idx] = blend(self.color_buffer[idx], c.darken(darken));
            }
        }
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color, width: u32) {
        // Bresenham, thickened with a square brush
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let r = (width.max(1) as i32 - 1) / 2;
        loop {
            self.fill_rect(
                Rect::new(x - r, y - r, (2 * r + 1) as u32, (2 * r + 1) as u32),
                color,
            );
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_circle(&mut self, center: (i32, i32), radius: u32, color: Color) {
        let r = radius as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.put(center.0 + dx, center.1 + dy, color);
                }
            }
        }
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_is_clipped() {
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_rect(Rect::new(-2, 2, 10, 10), Color::rgb(9, 9, 9));
        assert_eq!(fb.pixel(0, 1), Some(Color::rgb(0, 0, 0)));
        assert_eq!(fb.pixel(3, 3), Some(Color::rgb(9, 9, 9)));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn test_alpha_blend() {
        let mut fb = Framebuffer::new(1, 1);
        fb.fill_rect(Rect::new(0, 0, 1, 1), Color::rgb(200, 100, 0));
        fb.fill_rect(Rect::new(0, 0, 1, 1), Color::rgba(0, 0, 0, 0));
        assert_eq!(fb.pixel(0, 0), Some(Color::rgb(200, 100, 0)));
        fb.fill_rect(Rect::new(0, 0, 1, 1), Color::rgba(0, 0, 0, 255));
        assert_eq!(fb.pixel(0, 0), Some(Color::rgb(0, 0, 0)));
    }

    #[test]
    fn test_blit_scales_and_darkens() {
        let mut fb = Framebuffer::new(4, 4);
        // 2x1 image: left red, right transparent
        let img = Pixmap::new(2, 1, vec![Color::rgb(250, 10, 10), Color::rgba(0, 0, 0, 0)])
            .unwrap();
        let handle = fb.register_image("pickup", img);
        assert_eq!(fb.resolve("pickup"), Some(handle));
        assert_eq!(fb.resolve("nope"), None);

        fb.blit_scaled_image(handle, Rect::new(0, 0, 4, 4), 20);
        assert_eq!(fb.pixel(0, 3), Some(Color::rgb(230, 0, 0)));
        assert_eq!(fb.pixel(1, 0), Some(Color::rgb(230, 0, 0)));
        // Transparent half untouched
        assert_eq!(fb.pixel(3, 0), Some(Color::rgb(0, 0, 0)));
    }

    #[test]
    fn test_line_and_circle() {
        let mut fb = Framebuffer::new(8, 8);
        let c = Color::rgb(1, 2, 3);
        fb.draw_line((0, 0), (7, 7), c, 1);
        for i in 0..8 {
            assert_eq!(fb.pixel(i, i), Some(c));
        }
        fb.draw_circle((4, 1), 1, Color::rgb(7, 7, 7));
        assert_eq!(fb.pixel(4, 0), Some(Color::rgb(7, 7, 7)));
        assert_eq!(fb.pixel(3, 0), Some(Color::rgb(0, 0, 0)));
    }

    #[test]
    fn test_pixmap_size_mismatch() {
        assert!(Pixmap::new(2, 2, vec![Color::default(); 3]).is_none());
        let p = Pixmap::from_fn(3, 2, |x, y| Color::rgb(x as u8, y as u8, 0));
        assert_eq!(p.sample(2, 1), Color::rgb(2, 1, 0));
    }

    #[test]
    fn test_large_buffer_indexing() {
        // Row offsets far past the u16 range
        let mut fb = Framebuffer::new(3, 70_000);
        fb.fill_rect(Rect::new(0, 69_999, 3, 1), Color::rgb(4, 5, 6));
        assert_eq!(fb.pixels().len(), 210_000);
        assert_eq!(fb.pixel(2, 69_999), Some(Color::rgb(4, 5, 6)));
    }

    #[test]
    fn test_present_counts_frames() {
        let mut fb = Framebuffer::new(1, 1);
        fb.present();
        fb.present();
        assert_eq!(fb.frames_presented(), 2);
    }
}
