//! Per-tick battle scheduling
//!
//! Stage 1: every live parent fights its separatist once, silently, in
//! shuffled order; emptied states leave the roster before later pairs run.
//! Stage 2: up to `max_battles` battles between independent states whose
//! ideologies permit an attack, re-enumerating the eligible pairs after
//! every resolved battle.

use rand::seq::SliceRandom;

use crate::core::types::StateId;
use crate::polity::ideology;
use crate::sim::battle::{self, BattleOutcome, BattleReport};
use crate::sim::world::World;

pub fn run_battles(world: &mut World, max_battles: u32) -> Vec<BattleReport> {
    let mut reports = Vec::new();
    run_separatist_battles(world, &mut reports);
    run_independent_battles(world, max_battles, &mut reports);
    reports
}

fn run_separatist_battles(world: &mut World, reports: &mut Vec<BattleReport>) {
    let mut pairs: Vec<(StateId, StateId)> = world
        .states
        .iter()
        .filter_map(|s| {
            let parent = s.parent()?;
            world.state(parent)?;
            Some((parent, s.id))
        })
        .collect();
    pairs.shuffle(&mut world.rng);

    for (parent, separatist) in pairs {
        // Either side may have fallen in an earlier pair this stage
        let alive = |id: StateId| world.state(id).map_or(false, |s| !s.territory.is_empty());
        if !alive(parent) || !alive(separatist) {
            continue;
        }
        if let Some(report) = battle::resolve_battle(world, parent, separatist, true) {
            remove_if_emptied(world, &report);
            reports.push(report);
        }
    }
}

fn run_independent_battles(world: &mut World, max_battles: u32, reports: &mut Vec<BattleReport>) {
    let mut count = 0;
    while count < max_battles {
        let mut pairs = eligible_pairs(world);
        if pairs.is_empty() {
            tracing::debug!("no eligible wars remain");
            break;
        }
        pairs.shuffle(&mut world.rng);

        let mut resolved = false;
        for (attacker, defender) in pairs {
            if let Some(report) = battle::resolve_battle(world, attacker, defender, false) {
                remove_if_emptied(world, &report);
                reports.push(report);
                count += 1;
                resolved = true;
                break;
            }
        }
        if !resolved {
            tracing::debug!("no reachable wars this tick");
            break;
        }
    }
}

/// Ordered (attacker, defender) pairs among independent, landed states whose
/// ideologies allow the attack
fn eligible_pairs(world: &World) -> Vec<(StateId, StateId)> {
    let mut pairs = Vec::new();
    for attacker in &world.states {
        if attacker.is_separatist() || attacker.territory.is_empty() {
            continue;
        }
        for defender in &world.states {
            if defender.id == attacker.id
                || defender.is_separatist()
                || defender.territory.is_empty()
            {
                continue;
            }
            if ideology::can_attack(attacker, defender) {
                pairs.push((attacker.id, defender.id));
            }
        }
    }
    pairs
}

fn remove_if_emptied(world: &mut World, report: &BattleReport) {
    if let BattleOutcome::Victory { loser, .. } = report.outcome {
        let emptied = world
            .state(loser)
            .map_or(false, |s| s.territory.is_empty());
        if emptied {
            let name = world
                .state(loser)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            tracing::info!(state = %name, "destroyed and removed from the roster");
            world.remove_state(loser);
        }
    }
}
