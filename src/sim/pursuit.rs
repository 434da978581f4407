//! Adversary chase behavior
//!
//! Each adversary walks straight at the viewpoint. There is no pathfinding:
//! a step into a wall is simply dropped, so adversaries can get stuck on
//! corners. Inside contact range they stop and deal damage every tick.

use super::state::{EntityKind, GameEvent, GameState};

/// Advance every adversary by one tick and apply contact damage
pub fn update_adversaries(state: &mut GameState) {
    let contact = state.config.contact_distance;
    let damage = state.config.contact_damage;
    let target = state.viewpoint.pos;
    let mut hits: Vec<u32> = Vec::new();

    let level = &state.level;
    for entity in state.entities.iter_mut().filter(|e| e.active) {
        let EntityKind::Adversary { speed, heading } = &mut entity.kind else {
            continue;
        };

        let to_target = target - entity.pos;
        let distance = to_target.length();

        if distance > contact {
            let dir = to_target / distance;
            *heading = dir.y.atan2(dir.x);
            let next = entity.pos + dir * *speed;
            if !level.is_blocked(next) {
                entity.pos = level.clamp_position(next);
            }
        } else {
            hits.push(entity.id);
        }
    }

    for by in hits {
        if !state.viewpoint.is_alive() {
            break;
        }
        state.viewpoint.health = (state.viewpoint.health - damage).max(0);
        let health = state.viewpoint.health;
        state.push_event(GameEvent::DamageTaken { by, health });
    }
}
