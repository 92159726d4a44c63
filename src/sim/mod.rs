//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (every probabilistic branch draws from an injected Rng)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_contains};
pub use state::{Detector, Particle, Shield, ShieldId, SimEvent, SimState, Viewport};
pub use tick::{spawn_particle, step, update_particle};
