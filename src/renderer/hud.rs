//! HUD, minimap and end-of-session overlay
//!
//! Drawn with surface primitives only; there is no text rendering.

use glam::Vec2;

use super::surface::{Color, Rect, SpriteSet, Surface, colors};
use crate::consts::MAX_HEALTH;
use crate::level::Cell;
use crate::sim::{EntityKind, GameState, SessionState};

const BAR_WIDTH: u32 = 200;
const BAR_HEIGHT: u32 = 30;
const PORTRAIT_SIZE: (u32, u32) = (150, 200);
const MINIMAP_SIZE: u32 = 150;
const PIP_SIZE: u32 = 14;

/// Health bar fill color by remaining health
pub fn health_color(health: i32) -> Color {
    if health > 50 {
        colors::GREEN
    } else if health > 25 {
        colors::YELLOW
    } else {
        colors::RED
    }
}

/// Portrait, health bar and pickup pips
pub fn paint_status<S: Surface + ?Sized>(surface: &mut S, state: &GameState, images: &SpriteSet) {
    let (w, h) = surface.size();
    let h = h as i32;

    surface.blit_scaled_image(
        images.portrait,
        Rect::new(10, h - PORTRAIT_SIZE.1 as i32 - 10, PORTRAIT_SIZE.0, PORTRAIT_SIZE.1),
        0,
    );

    let frame = Rect::new(170, h - 60, BAR_WIDTH, BAR_HEIGHT);
    surface.fill_rect(frame, colors::GREY);
    let health = state.viewpoint.health.clamp(0, MAX_HEALTH);
    let fill = (BAR_WIDTH - 4) * health as u32 / MAX_HEALTH as u32;
    if fill > 0 {
        surface.fill_rect(
            Rect::new(frame.x + 2, frame.y + 2, fill, BAR_HEIGHT - 4),
            health_color(health),
        );
    }
    surface.draw_rect(frame, colors::WHITE, 2);

    // One pip per pickup, filled once collected
    let total = state.total_pickups;
    let x0 = w as i32 - 20 - (total * (PIP_SIZE + 6)) as i32;
    for n in 0..total {
        let pip = Rect::new(x0 + (n * (PIP_SIZE + 6)) as i32, 20, PIP_SIZE, PIP_SIZE);
        if n < state.viewpoint.pickups_collected {
            surface.fill_rect(pip, colors::PINK);
        }
        surface.draw_rect(pip, colors::WHITE, 1);
    }
}

/// Top-down map in the lower-right corner
pub fn paint_minimap<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let (w, h) = surface.size();
    let level = state.level();
    let cell = (MINIMAP_SIZE / level.width().max(level.height()) as u32).max(1);
    let origin = (
        w as i32 - MINIMAP_SIZE as i32 - 10,
        h as i32 - MINIMAP_SIZE as i32 - 70,
    );

    surface.fill_rect(
        Rect::new(origin.0 - 5, origin.1 - 5, MINIMAP_SIZE + 10, MINIMAP_SIZE + 10),
        colors::BLACK.with_alpha(128),
    );

    for (j, row) in level.rows().enumerate() {
        for (i, &c) in row.iter().enumerate() {
            let color = if c == Cell::Wall {
                colors::GREY
            } else {
                colors::DARK_GREY
            };
            surface.fill_rect(
                Rect::new(
                    origin.0 + (i as u32 * cell) as i32,
                    origin.1 + (j as u32 * cell) as i32,
                    cell.saturating_sub(1).max(1),
                    cell.saturating_sub(1).max(1),
                ),
                color,
            );
        }
    }

    let to_map = |p: Vec2| -> (i32, i32) {
        (
            origin.0 + (p.x * cell as f32) as i32,
            origin.1 + (p.y * cell as f32) as i32,
        )
    };

    let vp = state.viewpoint;
    let eye = to_map(vp.pos);
    surface.draw_circle(eye, 3, colors::YELLOW);
    let tip = (
        eye.0 + (vp.heading.cos() * 8.0) as i32,
        eye.1 + (vp.heading.sin() * 8.0) as i32,
    );
    surface.draw_line(eye, tip, colors::YELLOW, 2);

    for (_, entity) in state.active_entities() {
        let color = match entity.kind {
            EntityKind::Pickup => colors::PINK,
            EntityKind::Adversary { .. } => colors::GREEN,
        };
        surface.draw_circle(to_map(entity.pos), 2, color);
    }
}

/// Darken the frame and show the outcome
pub fn paint_overlay<S: Surface + ?Sized>(
    surface: &mut S,
    session: SessionState,
    images: &SpriteSet,
) {
    let banner = match session {
        SessionState::Playing => return,
        SessionState::Victory => colors::PINK,
        SessionState::Defeat => colors::RED,
    };
    let (w, h) = surface.size();
    let (cx, cy) = ((w / 2) as i32, (h / 2) as i32);

    surface.fill_rect(Rect::new(0, 0, w, h), colors::BLACK.with_alpha(180));
    surface.blit_scaled_image(images.game_over, Rect::new(cx - 150, cy - 250, 300, 400), 0);
    surface.fill_rect(Rect::new(cx - 200, cy + 165, 400, 30), banner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::renderer::testing::{DrawCall, RecordingSurface, test_sprites};
    use crate::settings::Config;
    use std::sync::Arc;

    fn arena() -> GameState {
        GameState::new(Arc::new(Level::arena()), Config::default(), 1)
    }

    #[test]
    fn test_health_color_thresholds() {
        assert_eq!(health_color(100), colors::GREEN);
        assert_eq!(health_color(51), colors::GREEN);
        assert_eq!(health_color(50), colors::YELLOW);
        assert_eq!(health_color(26), colors::YELLOW);
        assert_eq!(health_color(25), colors::RED);
        assert_eq!(health_color(0), colors::RED);
    }

    #[test]
    fn test_status_bar_width_tracks_health() {
        let mut state = arena();
        state.viewpoint.health = 50;
        state.viewpoint.pickups_collected = 2;
        let mut surface = RecordingSurface::new(1024, 768);
        paint_status(&mut surface, &state, &test_sprites());

        let fills: Vec<(Rect, Color)> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Fill(r, col) => Some((*r, *col)),
                _ => None,
            })
            .collect();
        // frame, bar, two collected pips
        assert_eq!(fills.len(), 4);
        assert_eq!(fills[1].0.w, 98);
        assert_eq!(fills[1].1, colors::YELLOW);
        assert!(fills[2..].iter().all(|(_, c)| *c == colors::PINK));
    }

    #[test]
    fn test_empty_bar_at_zero_health() {
        let mut state = arena();
        state.viewpoint.health = 0;
        let mut surface = RecordingSurface::new(1024, 768);
        paint_status(&mut surface, &state, &test_sprites());
        let fills = surface
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Fill(..)))
            .count();
        assert_eq!(fills, 1);
    }

    #[test]
    fn test_minimap_draws_every_cell_and_entity() {
        let mut state = arena();
        state.entities[0].active = false;
        let mut surface = RecordingSurface::new(1024, 768);
        paint_minimap(&mut surface, &state);

        let fills = surface
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Fill(..)))
            .count();
        let circles = surface
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle(..)))
            .count();
        assert_eq!(fills, 1 + 16 * 16);
        // viewpoint + 7 active entities
        assert_eq!(circles, 8);
    }

    #[test]
    fn test_overlay_only_when_terminal() {
        let images = test_sprites();
        let mut surface = RecordingSurface::new(640, 480);
        paint_overlay(&mut surface, SessionState::Playing, &images);
        assert!(surface.calls.is_empty());

        paint_overlay(&mut surface, SessionState::Defeat, &images);
        assert_eq!(surface.calls.len(), 3);
        assert!(matches!(surface.calls[1], DrawCall::Blit(img, _, _) if img == images.game_over));
        assert!(matches!(surface.calls[2], DrawCall::Fill(_, c) if c == colors::RED));
    }
}
