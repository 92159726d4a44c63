//! Fixed timestep simulation step
//!
//! Advances every ray one tick, collects decay children, then culls. The
//! driver owns all cadence: it calls `spawn_particle` on a wall-clock
//! interval and `step` once per frame; nothing here self-drives timing.

use glam::Vec2;
use rand::Rng;

use super::state::{Detector, Particle, Shield, SimEvent, SimState, Viewport};
use crate::consts::*;

/// Spawn one cosmic ray at a random point along the top edge
pub fn spawn_particle(state: &mut SimState) {
    let x = state.rng.random_range(0.0..state.viewport.width);
    let speed = state.rng.random_range(SPAWN_SPEED_MIN..SPAWN_SPEED_MAX);
    let budget = state.rng.random_range(DECAY_BUDGET_MIN..=DECAY_BUDGET_MAX);
    state
        .particles
        .push(Particle::new(Vec2::new(x, 0.0), speed, 0.0, budget));
}

/// Advance the simulation by one tick of `dt_ms` milliseconds
///
/// Children produced by decay join the set after the update pass, so they are
/// drawn once at their birth position and first advanced on the next step.
/// Culling runs last: removal is never observable mid-pass.
pub fn step(state: &mut SimState, dt_ms: f32) -> Vec<SimEvent> {
    let mut events = Vec::new();
    let mut children = Vec::new();

    let mut particles = std::mem::take(&mut state.particles);
    for particle in particles.iter_mut() {
        update_particle(
            particle,
            dt_ms,
            &state.viewport,
            &mut state.detector,
            &state.shields,
            &mut state.rng,
            &mut children,
            &mut events,
        );
    }
    particles.append(&mut children);

    let cull_y = state.viewport.height + CULL_MARGIN;
    particles.retain(|p| !p.pending_removal && p.pos.y <= cull_y);
    state.particles = particles;

    events
}

/// Advance one ray by one tick
///
/// Check order: motion, decay, ground entry, ground erosion, detector,
/// shields. The checks are independent; several may flag the same ray in one
/// tick, and marking is idempotent. Public so tests can drive a single ray
/// with a forced RNG.
#[allow(clippy::too_many_arguments)]
pub fn update_particle(
    particle: &mut Particle,
    dt_ms: f32,
    viewport: &Viewport,
    detector: &mut Detector,
    shields: &[Shield],
    rng: &mut impl Rng,
    children: &mut Vec<Particle>,
    events: &mut Vec<SimEvent>,
) {
    // Constant fall plus angled horizontal drift
    particle.pos.x += particle.angle_deg.to_radians().tan() * particle.speed;
    particle.pos.y += particle.speed;

    // A ray may split once, below the guard band, while budget remains
    if particle.pos.y > DECAY_GUARD_Y
        && !particle.decayed
        && particle.decay_budget > 0
        && rng.random::<f32>() < DECAY_CHANCE
    {
        particle.decayed = true;
        particle.decay_budget -= 1;
        children.extend(spawn_children(particle, rng));
    }

    // Ground entry is a one-time edge transition
    if particle.pos.y > viewport.ground_top() && !particle.in_ground {
        particle.in_ground = true;
        if rng.random::<f32>() < GROUND_ABSORB_CHANCE {
            particle.mark_for_removal();
        }
    }

    // Buried rays erode: one roll per elapsed interval. The timer resets to
    // zero on reaching the threshold whether or not the roll removed the ray,
    // so overshoot past the interval is dropped rather than carried over.
    if particle.in_ground {
        particle.ground_timer_ms += dt_ms;
        if particle.ground_timer_ms >= GROUND_EROSION_INTERVAL_MS {
            if rng.random::<f32>() < GROUND_EROSION_CHANCE {
                particle.mark_for_removal();
            }
            particle.ground_timer_ms = 0.0;
        }
    }

    // Detection scores the ray and absorbs it
    if detector.contains(particle.pos) {
        particle.mark_for_removal();
        if detector.register_detection() {
            log::info!("detection goal reached at {} rays", detector.detections);
            events.push(SimEvent::GoalReached {
                detections: detector.detections,
            });
        }
    }

    // Every brick covering the ray rolls absorption independently
    for shield in shields {
        if shield.rect.contains(particle.pos) && rng.random::<f32>() < SHIELD_ABSORB_CHANCE {
            particle.mark_for_removal();
        }
    }
}

/// Split a decayed parent into two children diverging by a shared angle
///
/// One angle roll serves both children (`+a` and `-a`); each child perturbs
/// the parent's speed independently. Children inherit the already-decremented
/// budget.
fn spawn_children(parent: &Particle, rng: &mut impl Rng) -> [Particle; 2] {
    let angle = rng.random_range(CHILD_ANGLE_MIN_DEG..CHILD_ANGLE_MAX_DEG);
    let first = Particle::new(
        parent.pos,
        parent.speed * rng.random_range(CHILD_SPEED_FACTOR_MIN..CHILD_SPEED_FACTOR_MAX),
        angle,
        parent.decay_budget,
    );
    let second = Particle::new(
        parent.pos,
        parent.speed * rng.random_range(CHILD_SPEED_FACTOR_MIN..CHILD_SPEED_FACTOR_MAX),
        -angle,
        parent.decay_budget,
    );
    [first, second]
}
