//! Frame loop glue
//!
//! One frame is: poll input, advance the simulation one tick, log what
//! happened, render, present. `Game::run` repeats that at `target_fps`.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::error::Result;
use crate::level::Level;
use crate::normalize_angle;
use crate::renderer::{AssetStore, SceneRenderer, Surface};
use crate::settings::Config;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Anything that can produce the key state for the next tick
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// A running session plus its renderer
#[derive(Debug)]
pub struct Game {
    state: GameState,
    renderer: SceneRenderer,
    frames: u64,
}

impl Game {
    /// Validate the config and resolve every image before the first frame
    pub fn new<A: AssetStore + ?Sized>(
        config: Config,
        level: Arc<Level>,
        assets: &A,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        let renderer = SceneRenderer::from_assets(assets, config.column_count())?;
        log::info!(
            "Session start: {}x{} level, {}x{} screen, {} columns, seed {}",
            level.width(),
            level.height(),
            config.screen_width,
            config.screen_height,
            config.column_count(),
            seed
        );
        Ok(Self {
            state: GameState::new(level, config, seed),
            renderer,
            frames: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one full frame. A quit request still finishes the frame.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        input: &TickInput,
        surface: &mut S,
    ) -> LoopControl {
        tick(&mut self.state, input);
        for event in self.state.drain_events() {
            log_event(&event, self.state.time_ticks);
        }

        self.renderer.render(&self.state, surface);
        surface.present();
        self.frames += 1;

        if input.quit {
            log::info!("Quit requested after {} frames", self.frames);
            LoopControl::Quit
        } else {
            LoopControl::Continue
        }
    }

    /// Drive frames until quit or `max_frames`; returns the frames run
    pub fn run<I: InputSource + ?Sized, S: Surface + ?Sized>(
        &mut self,
        input: &mut I,
        surface: &mut S,
        max_frames: Option<u64>,
    ) -> u64 {
        let budget = match self.state.config().target_fps {
            0 => None,
            fps => Some(Duration::from_secs_f64(1.0 / fps as f64)),
        };
        let mut count = 0u64;

        while max_frames.is_none_or(|max| count < max) {
            let started = Instant::now();
            let tick_input = input.poll(&self.state);
            let control = self.frame(&tick_input, surface);
            count += 1;

            if let Some(budget) = budget {
                let elapsed = started.elapsed();
                match budget.checked_sub(elapsed) {
                    Some(rest) => thread::sleep(rest),
                    None => log::debug!("Frame {} over budget: {:?}", self.frames, elapsed),
                }
            }
            if control == LoopControl::Quit {
                break;
            }
        }
        count
    }
}

fn log_event(event: &GameEvent, tick: u64) {
    match event {
        GameEvent::PickupCollected { id, collected, total } => {
            log::debug!("Tick {}: pickup {} collected ({}/{})", tick, id, collected, total)
        }
        GameEvent::DamageTaken { by, health } => {
            log::debug!("Tick {}: hit by {}, health {}", tick, by, health)
        }
        GameEvent::Victory => log::info!("Victory at tick {}", tick),
        GameEvent::Defeat => log::info!("Defeat at tick {}", tick),
        GameEvent::Reset => log::info!("Session reset"),
    }
}

/// Replays a fixed list of inputs, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        let input = self.frames.get(self.cursor).copied().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        });
        self.cursor += 1;
        input
    }
}

/// Frames without movement before the pilot tries to slide free
const STUCK_FRAMES: u32 = 15;
/// How long the pilot strafes once stuck
const UNSTICK_FRAMES: u32 = 30;

/// Demo player: turns toward the nearest pickup and walks at it
#[derive(Debug, Clone, Default)]
pub struct DemoPilot {
    last_pos: Option<Vec2>,
    still: u32,
    unstick: u32,
}

impl DemoPilot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for DemoPilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        if state.session.is_terminal() {
            input.restart = true;
            self.last_pos = None;
            return input;
        }

        let vp = state.viewpoint;
        let moved = self.last_pos.is_none_or(|p| p.distance(vp.pos) > 1e-4);
        self.last_pos = Some(vp.pos);
        self.still = if moved { 0 } else { self.still + 1 };

        if self.still >= STUCK_FRAMES {
            self.still = 0;
            self.unstick = UNSTICK_FRAMES;
        }
        if self.unstick > 0 {
            self.unstick -= 1;
            input.strafe_right = true;
            input.rotate_right = true;
            return input;
        }

        let target = state
            .active_entities()
            .filter(|(_, e)| e.is_pickup())
            .map(|(_, e)| e.pos)
            .min_by(|a, b| a.distance(vp.pos).total_cmp(&b.distance(vp.pos)));
        let Some(target) = target else {
            return input;
        };

        let to = target - vp.pos;
        let delta = normalize_angle(to.y.atan2(to.x) - vp.heading);
        let turn = state.config().rotation_speed;
        if delta > turn {
            input.rotate_right = true;
        } else if delta < -turn {
            input.rotate_left = true;
        }
        input.forward = delta.abs() < 0.6;
        input
    }
}
