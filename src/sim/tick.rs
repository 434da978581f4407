//! Fixed-step simulation tick
//!
//! Order within a tick: player movement, adversaries, pickups, then the
//! session transition check. Terminal states skip all of it.

use super::movement::{desired_delta, rotation_delta, slide_move};
use super::pursuit::update_adversaries;
use super::state::{GameEvent, GameState, SessionState};
use crate::consts::MAX_HEALTH;

/// Polled key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Restart after Victory/Defeat
    pub restart: bool,
    /// End the loop after this frame
    pub quit: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.session.is_terminal() {
        if input.restart {
            state.reset();
        }
        return;
    }

    state.time_ticks += 1;

    // Player
    let config = &state.config;
    let delta = desired_delta(input, state.viewpoint.heading, config.move_speed);
    state.viewpoint.heading += rotation_delta(input, config.rotation_speed);
    state.viewpoint.pos = slide_move(
        state.viewpoint.pos,
        delta,
        config.collision_radius,
        &state.level,
    );

    update_adversaries(state);

    if state.viewpoint.is_alive() {
        collect_pickups(state);
    }

    check_transition(state);
}

/// Deactivate pickups within reach of the viewpoint, healing for each
fn collect_pickups(state: &mut GameState) {
    let reach = state.config.pickup_radius;
    let heal = state.config.pickup_heal;
    let pos = state.viewpoint.pos;
    let mut collected = Vec::new();

    for entity in state.entities.iter_mut() {
        if entity.active && entity.is_pickup() && entity.pos.distance(pos) < reach {
            entity.active = false;
            collected.push(entity.id);
        }
    }

    for id in collected {
        let vp = &mut state.viewpoint;
        vp.pickups_collected = (vp.pickups_collected + 1).min(state.total_pickups);
        vp.health = (vp.health + heal).min(MAX_HEALTH);
        let event = GameEvent::PickupCollected {
            id,
            collected: vp.pickups_collected,
            total: state.total_pickups,
        };
        state.push_event(event);
    }
}

fn check_transition(state: &mut GameState) {
    if !state.viewpoint.is_alive() {
        state.session = SessionState::Defeat;
        state.push_event(GameEvent::Defeat);
    } else if state.total_pickups > 0 && state.viewpoint.pickups_collected >= state.total_pickups {
        state.session = SessionState::Victory;
        state.push_event(GameEvent::Victory);
    }
}
