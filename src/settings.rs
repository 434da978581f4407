//! Session configuration
//!
//! One immutable `Config` is handed to every constructor at session start, so
//! independent sessions (tests, replays) never share state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest accepted screen width or height, in pixels
pub const MAX_SCREEN_DIM: u32 = 8192;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Screen pixels covered by one ray column
    pub fn pixels_per_column(&self) -> u32 {
        match self {
            QualityPreset::Low => 4,
            QualityPreset::Medium => 2,
            QualityPreset::High => 1,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Screen ===
    pub screen_width: u32,
    pub screen_height: u32,
    /// Ray column resolution
    pub quality: QualityPreset,
    /// Frames per second the loop paces itself to (0 = unpaced)
    pub target_fps: u32,

    // === Ray casting ===
    /// Horizontal field of view (radians)
    pub fov: f32,
    /// Farthest distance a ray marches (grid units)
    pub max_depth: f32,
    /// Ray marching step (grid units)
    pub ray_step: f32,

    // === Player ===
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub collision_radius: f32,

    // === Entities ===
    pub pickup_scale: f32,
    pub pickup_radius: f32,
    pub pickup_heal: i32,
    pub adversary_scale: f32,
    pub adversary_speed: f32,
    pub contact_distance: f32,
    pub contact_damage: i32,

    // === Sprites ===
    /// Extra angle beyond half the FOV before a sprite is culled
    pub sprite_margin: f32,
    pub max_sprite_scale: f32,
    pub min_sprite_distance: f32,
    /// Hide sprites whose center column is behind a nearer wall
    pub occlude_sprites: bool,

    // === HUD ===
    pub show_hud: bool,
    pub show_minimap: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 1024,
            screen_height: 768,
            quality: QualityPreset::Medium,
            target_fps: 60,

            fov: std::f32::consts::FRAC_PI_3,
            max_depth: 20.0,
            ray_step: 0.01,

            move_speed: 0.05,
            rotation_speed: 0.03,
            collision_radius: 0.3,

            pickup_scale: 0.4,
            pickup_radius: 0.5,
            pickup_heal: 10,
            adversary_scale: 0.7,
            adversary_speed: 0.02,
            contact_distance: 0.5,
            contact_damage: 1,

            sprite_margin: 0.3,
            max_sprite_scale: 1.5,
            min_sprite_distance: 0.1,
            occlude_sprites: false,

            show_hud: true,
            show_minimap: true,
        }
    }
}

impl Config {
    /// Create a config from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of rays cast per frame
    pub fn column_count(&self) -> usize {
        (self.screen_width / self.quality.pixels_per_column()).max(1) as usize
    }

    /// Maximum number of marching steps per ray
    pub fn max_steps(&self) -> u32 {
        crate::renderer::raycast::max_steps(self.max_depth, self.ray_step)
    }

    /// Reject values that would break projection or the loop
    pub fn validate(&self) -> Result<()> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(Error::InvalidConfig("screen size must be non-zero".into()));
        }
        if self.screen_width > MAX_SCREEN_DIM || self.screen_height > MAX_SCREEN_DIM {
            return Err(Error::InvalidConfig(format!(
                "screen size {}x{} exceeds {}x{}",
                self.screen_width, self.screen_height, MAX_SCREEN_DIM, MAX_SCREEN_DIM
            )));
        }
        if !(self.fov > 0.0 && self.fov < std::f32::consts::TAU) {
            return Err(Error::InvalidConfig(format!(
                "fov {} must be in (0, 2π)",
                self.fov
            )));
        }
        if !(self.ray_step > 0.0) || !(self.max_depth > 0.0) {
            return Err(Error::InvalidConfig(
                "ray_step and max_depth must be positive".into(),
            ));
        }
        if self.min_sprite_distance <= 0.0 || self.max_sprite_scale <= 0.0 {
            return Err(Error::InvalidConfig(
                "sprite distance floor and scale cap must be positive".into(),
            ));
        }
        let distances = [
            ("move_speed", self.move_speed),
            ("rotation_speed", self.rotation_speed),
            ("collision_radius", self.collision_radius),
            ("pickup_radius", self.pickup_radius),
            ("adversary_speed", self.adversary_speed),
            ("contact_distance", self.contact_distance),
        ];
        if let Some((name, value)) = distances.iter().find(|(_, v)| !(*v >= 0.0)) {
            return Err(Error::InvalidConfig(format!(
                "{} must be non-negative, got {}",
                name, value
            )));
        }
        if self.pickup_heal < 0 || self.contact_damage < 0 {
            return Err(Error::InvalidConfig(
                "heal and damage amounts cannot be negative".into(),
            ));
        }
        Ok(())
    }
}
