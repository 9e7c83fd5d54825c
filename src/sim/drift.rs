//! Per-tick drift of power, stability, and ideology
//!
//! One delta per state drives both power and stability, so a bad year hurts
//! on both axes at once. Every live state appends exactly one history
//! record per tick.

use rand::Rng;

use crate::core::config::PoliticsConfig;
use crate::sim::world::World;

pub fn apply_drift(world: &mut World, config: &PoliticsConfig) {
    let tick = world.tick;
    let World {
        ref mut states,
        ref mut rng,
        ..
    } = *world;

    for state in states.iter_mut() {
        let delta = rng.gen_range(-config.drift_magnitude..=config.drift_magnitude);
        state.power = (state.power + delta).max(config.power_floor);
        state.stability = (state.stability + delta).clamp(-10, 10);

        state.ideology.drift(rng, config.drift_magnitude);
        state.zone = state.ideology.zone();

        state.record_tick(tick);
    }
}
