//! Wall slices and sky/floor fill

use super::raycast::{RaySample, WallSide};
use super::surface::{Color, Rect, Surface, colors};
use crate::consts::{DEPTH_EPSILON, MAX_WALL_SCREENS};

/// Wall slice height in pixels for a corrected distance
pub fn slice_height(distance: f32, screen_height: u32) -> u32 {
    let h = screen_height as f32;
    (h / (distance + DEPTH_EPSILON)).min(h * MAX_WALL_SCREENS) as u32
}

/// Shade for a slice: darker with distance, darker again on vertical faces
pub fn wall_color(distance: f32, side: WallSide) -> Color {
    let mut shade = (255 - (distance * 25.0) as i32).max(50);
    if side == WallSide::Vertical {
        shade = (shade as f32 * 0.7) as i32;
    }
    Color::clamped(shade + 30, shade, shade - 30)
}

/// Sky above the horizon, floor below
pub fn paint_background<S: Surface + ?Sized>(surface: &mut S, sky: Color, floor: Color) {
    let (w, h) = surface.size();
    let half = h / 2;
    surface.fill_rect(Rect::new(0, 0, w, half), sky);
    surface.fill_rect(Rect::new(0, half as i32, w, h - half), floor);
}

/// Screen x span of column `i` of `columns`
#[inline]
pub fn column_span(i: usize, columns: usize, screen_width: u32) -> (i32, u32) {
    let w = screen_width as usize;
    let x0 = i * w / columns;
    let x1 = ((i + 1) * w / columns).max(x0 + 1);
    (x0 as i32, (x1 - x0) as u32)
}

/// Paint one vertical slice per ray, centered on the horizon
pub fn paint_walls<S: Surface + ?Sized>(surface: &mut S, samples: &[RaySample]) {
    let (w, h) = surface.size();
    let columns = samples.len();
    if columns == 0 {
        return;
    }
    let horizon = (h / 2) as i32;

    for (i, sample) in samples.iter().enumerate() {
        if !sample.hit {
            continue;
        }
        let distance = sample.perpendicular_distance;
        let height = slice_height(distance, h);
        let (x, width) = column_span(i, columns, w);
        let y = horizon - (height / 2) as i32;
        surface.fill_rect(Rect::new(x, y, width, height), wall_color(distance, sample.side));
    }
}

/// Full wall layer: background then slices
pub fn paint_wall_layer<S: Surface + ?Sized>(surface: &mut S, samples: &[RaySample]) {
    paint_background(surface, colors::SKY, colors::FLOOR);
    paint_walls(surface, samples);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::{DrawCall, RecordingSurface};

    fn hit(distance: f32, side: WallSide) -> RaySample {
        RaySample {
            perpendicular_distance: distance,
            raw_distance: distance,
            ray_angle: 0.0,
            side,
            hit: true,
        }
    }

    #[test]
    fn test_slice_height_inverse_and_clamped() {
        assert_eq!(slice_height(1.0, 768), 767);
        assert_eq!(slice_height(2.0, 768), 383);
        assert_eq!(slice_height(0.0, 768), 1536);
        assert!(slice_height(4.0, 768) < slice_height(3.0, 768));
    }

    #[test]
    fn test_wall_color_shading() {
        assert_eq!(wall_color(0.0, WallSide::Horizontal), Color::rgb(255, 255, 225));
        assert_eq!(wall_color(2.0, WallSide::Horizontal), Color::rgb(235, 205, 175));
        // Vertical faces are darker at the same distance
        assert_eq!(wall_color(2.0, WallSide::Vertical), Color::rgb(173, 143, 113));
        // Floor at 50 for far walls
        assert_eq!(wall_color(100.0, WallSide::Horizontal), Color::rgb(80, 50, 20));
    }

    #[test]
    fn test_column_spans_tile_screen() {
        let mut next = 0;
        for i in 0..7 {
            let (x, w) = column_span(i, 7, 100);
            assert_eq!(x, next);
            next = x + w as i32;
        }
        assert_eq!(next, 100);
    }

    #[test]
    fn test_paint_order_and_misses() {
        let mut surface = RecordingSurface::new(8, 100);
        let samples = [
            hit(1.0, WallSide::Horizontal),
            RaySample::default(),
            hit(2.0, WallSide::Vertical),
            hit(4.0, WallSide::Horizontal),
        ];
        paint_wall_layer(&mut surface, &samples);

        let fills: Vec<Rect> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Fill(rect, _) => Some(*rect),
                _ => None,
            })
            .collect();
        // sky, floor, three slices (the miss is skipped)
        assert_eq!(fills.len(), 5);
        assert_eq!(fills[0], Rect::new(0, 0, 8, 50));
        assert_eq!(fills[1], Rect::new(0, 50, 8, 50));
        // 100 / 1.0001 = 99, centered on y = 50
        assert_eq!(fills[2], Rect::new(0, 1, 2, 99));
        assert_eq!(fills[3].x, 4);
        assert_eq!(fills[4], Rect::new(6, 38, 2, 24));
    }
}
