//! Ray Arena headless runner
//!
//! Plays a level with the demo pilot into an in-memory framebuffer and logs
//! how the session went.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use ray_arena::app::DemoPilot;
use ray_arena::renderer::surface::{asset_names, colors};
use ray_arena::renderer::{Color, Framebuffer, Pixmap};
use ray_arena::{Config, Game, Level, QualityPreset};

/// Ray Arena - headless first-person raycaster run by a demo pilot
#[derive(Parser, Debug)]
#[command(name = "ray-arena")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session config (JSON); missing fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level file (JSON); the built-in arena when omitted
    #[arg(short, long)]
    level: Option<PathBuf>,

    /// Frames to run before stopping
    #[arg(short, long, default_value_t = 3600)]
    frames: u64,

    /// Session seed for adversary headings
    #[arg(short, long, default_value_t = 0x5EED)]
    seed: u64,

    /// Ray column quality: low, medium or high (overrides the config)
    #[arg(short, long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
}

fn parse_quality(s: &str) -> std::result::Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality `{s}`"))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Flat placeholder art so the runner needs no files on disk
fn builtin_images(fb: &mut Framebuffer) {
    let disc = |color: Color| {
        move |x: u32, y: u32| {
            let (dx, dy) = (x as i32 - 16, y as i32 - 16);
            if dx * dx + dy * dy <= 15 * 15 {
                color
            } else {
                Color::rgba(0, 0, 0, 0)
            }
        }
    };
    fb.register_image(
        asset_names::PICKUP,
        Pixmap::from_fn(32, 32, disc(colors::PINK)),
    );
    fb.register_image(
        asset_names::ADVERSARY,
        Pixmap::from_fn(32, 48, disc(colors::GREEN)),
    );
    fb.register_image(
        asset_names::GAME_OVER,
        Pixmap::from_fn(30, 40, |x, y| {
            if (x + y) % 2 == 0 {
                colors::WHITE
            } else {
                colors::BLACK
            }
        }),
    );
    fb.register_image(
        asset_names::PORTRAIT,
        Pixmap::from_fn(15, 20, |_, y| Color::clamped(200, 160 - y as i32 * 4, 120)),
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_json(&read_file(path)?)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(quality) = args.quality {
        config.quality = quality;
    }
    let level = match &args.level {
        Some(path) => Level::from_json(&read_file(path)?)
            .with_context(|| format!("loading level {}", path.display()))?,
        None => Level::arena(),
    };

    log::info!("Ray Arena starting ({} preset)", config.quality.as_str());
    log::debug!("Config: {}", serde_json::to_string(&config)?);

    let mut fb = Framebuffer::new(config.screen_width, config.screen_height);
    builtin_images(&mut fb);

    let mut game =
        Game::new(config, Arc::new(level), &fb, args.seed).context("starting session")?;
    let frames = game.run(&mut DemoPilot::new(), &mut fb, Some(args.frames));

    let state = game.state();
    log::info!(
        "Finished after {} frames: {:?}, health {}, pickups {}/{}",
        frames,
        state.session,
        state.viewpoint.health,
        state.viewpoint.pickups_collected,
        state.total_pickups
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_and_inline_values() {
        let args = Args::try_parse_from(["ray-arena"]).unwrap();
        assert_eq!(args.frames, 3600);
        assert!(args.config.is_none());

        let args =
            Args::try_parse_from(["ray-arena", "--frames=5", "--seed", "9", "-q", "high"]).unwrap();
        assert_eq!(args.frames, 5);
        assert_eq!(args.seed, 9);
        assert_eq!(args.quality, Some(QualityPreset::High));
    }

    #[test]
    fn test_help_and_bad_values() {
        let err = Args::try_parse_from(["ray-arena", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(Args::try_parse_from(["ray-arena", "--frames", "many"]).is_err());
        assert!(Args::try_parse_from(["ray-arena", "--quality", "ultra"]).is_err());
    }

    #[test]
    fn test_builtin_images_cover_required_assets() {
        let mut fb = Framebuffer::new(8, 8);
        builtin_images(&mut fb);
        for name in asset_names::REQUIRED {
            assert!(ray_arena::renderer::AssetStore::resolve(&fb, name).is_some(), "{name}");
        }
    }
}
