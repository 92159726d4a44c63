//! Simulation state and core entity types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circle_contains};
use crate::consts::*;

/// A falling cosmic ray
///
/// Rays fall straight down at `speed` px/tick with a horizontal drift set by
/// `angle_deg`. The decay budget counts how many generations of children this
/// lineage may still produce; it only ever decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Fall speed in px/tick
    pub speed: f32,
    /// Horizontal drift direction in degrees (0 = straight down)
    pub angle_deg: f32,
    /// Remaining decay generations
    pub decay_budget: u8,
    /// Whether this ray has already split (a ray decays at most once)
    pub decayed: bool,
    /// Set when the ray first enters the ground band; never reverts
    pub in_ground: bool,
    /// Milliseconds accumulated since the last ground-erosion roll
    pub ground_timer_ms: f32,
    /// Removal is deferred to end-of-step; once set this never clears
    pub pending_removal: bool,
}

impl Particle {
    pub fn new(pos: Vec2, speed: f32, angle_deg: f32, decay_budget: u8) -> Self {
        Self {
            pos,
            speed,
            angle_deg,
            decay_budget,
            decayed: false,
            in_ground: false,
            ground_timer_ms: 0.0,
            pending_removal: false,
        }
    }

    /// Flag the ray for end-of-step removal (idempotent)
    #[inline]
    pub fn mark_for_removal(&mut self) {
        self.pending_removal = true;
    }
}

/// Opaque handle for a shield, stable across repositioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShieldId(pub u32);

/// A lead brick the player drags around to block rays
///
/// Dimensions are fixed at construction; only the position moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub id: ShieldId,
    pub rect: Rect,
}

impl Shield {
    pub fn new(id: ShieldId, x: f32, y: f32) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT),
        }
    }

    /// Reposition the brick's top-left corner
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.rect.pos = Vec2::new(x, y);
    }
}

/// The player's circular sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    /// Fixed home position in the middle of the ground band
    pub center: Vec2,
    pub radius: f32,
    /// Upgrades bought so far (capped)
    pub upgrades: u32,
    /// Cumulative rays detected; never decreases
    pub detections: u32,
    /// Set once, when the detection goal is first reached
    pub goal_completed: bool,
}

impl Detector {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: DETECTOR_BASE_RADIUS,
            upgrades: 0,
            detections: 0,
            goal_completed: false,
        }
    }

    /// Check if a point is strictly inside the sensor
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        circle_contains(self.center, self.radius, point)
    }

    /// Grow the sensor by one upgrade step
    ///
    /// Returns false (leaving the radius unchanged) once the upgrade cap is
    /// reached; hitting the cap is policy, not an error.
    pub fn upgrade(&mut self) -> bool {
        if self.upgrades >= MAX_DETECTOR_UPGRADES {
            return false;
        }
        self.radius += DETECTOR_UPGRADE_STEP;
        self.upgrades += 1;
        true
    }

    /// Count one detected ray
    ///
    /// Returns true exactly once per session: the first time the counter
    /// reaches the goal. Later crossings never re-trigger.
    pub fn register_detection(&mut self) -> bool {
        self.detections += 1;
        if !self.goal_completed && self.detections >= DETECTION_GOAL {
            self.goal_completed = true;
            return true;
        }
        false
    }
}

/// Events raised by a simulation step, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// The detection goal was reached; fires at most once per session
    GoalReached { detections: u32 },
}

/// Fixed pixel dimensions of the play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Height of the ground band at the bottom of the viewport
    #[inline]
    pub fn ground_height(&self) -> f32 {
        self.height * GROUND_FRACTION
    }

    /// Y coordinate where the ground band begins
    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.height - self.ground_height()
    }

    /// The detector's home position: centered, half-buried in the ground
    pub fn detector_center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - self.ground_height() / 2.0)
    }
}

/// Complete simulation state for one session
///
/// Owns every entity collection and the seeded RNG; no module-level state
/// anywhere, so independent sessions can coexist (and tests stay hermetic).
#[derive(Debug, Clone)]
pub struct SimState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub viewport: Viewport,
    pub particles: Vec<Particle>,
    pub shields: Vec<Shield>,
    pub detector: Detector,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SimState {
    /// Create a session: empty sky, the starting brick stack, a base detector
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mut state = Self {
            seed,
            viewport,
            particles: Vec::new(),
            shields: Vec::new(),
            detector: Detector::new(viewport.detector_center()),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        // Starting bricks stack upward from just above the ground band
        let stack_base = viewport.ground_top() - BRICK_STACK_RAISE;
        for i in 0..BRICK_COUNT {
            let id = state.next_shield_id();
            state.shields.push(Shield::new(
                id,
                BRICK_STACK_X,
                stack_base - i as f32 * BRICK_HEIGHT,
            ));
        }

        state
    }

    fn next_shield_id(&mut self) -> ShieldId {
        let id = ShieldId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Look up a shield by handle
    pub fn shield(&self, id: ShieldId) -> Option<&Shield> {
        self.shields.iter().find(|s| s.id == id)
    }

    /// Find the shield under a point, if any (first match in stack order)
    pub fn pick_shield_at(&self, point: Vec2) -> Option<ShieldId> {
        self.shields
            .iter()
            .find(|s| s.rect.contains(point))
            .map(|s| s.id)
    }

    /// Move a shield's top-left corner; false if the handle is stale
    pub fn move_shield(&mut self, id: ShieldId, x: f32, y: f32) -> bool {
        match self.shields.iter_mut().find(|s| s.id == id) {
            Some(shield) => {
                shield.move_to(x, y);
                true
            }
            None => false,
        }
    }

    /// End a drag. Drag bookkeeping is owned by the input adapter, so this
    /// has no simulation-side effect; it exists to complete the contract.
    pub fn release_shield(&mut self, _id: ShieldId) {}

    /// Where the "+" upgrade button sits, beside the detector's rim
    pub fn upgrade_button_rect(&self) -> Rect {
        Rect::new(
            self.detector.center.x + self.detector.radius + UPGRADE_BUTTON_GAP,
            self.detector.center.y - UPGRADE_BUTTON_SIZE / 2.0,
            UPGRADE_BUTTON_SIZE,
            UPGRADE_BUTTON_SIZE,
        )
    }

    /// Check if a point hits the upgrade button
    pub fn point_in_upgrade_button(&self, point: Vec2) -> bool {
        self.upgrade_button_rect().contains(point)
    }

    /// Buy an upgrade if any remain; false once the cap is reached
    pub fn try_upgrade_detector(&mut self) -> bool {
        self.detector.upgrade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_viewport_ground_band() {
        let vp = test_viewport();
        assert_eq!(vp.ground_height(), 120.0);
        assert_eq!(vp.ground_top(), 480.0);
        assert_eq!(vp.detector_center(), Vec2::new(400.0, 540.0));
    }

    #[test]
    fn test_detector_upgrade_step_and_cap() {
        let mut detector = Detector::new(Vec2::new(400.0, 540.0));
        let base = detector.radius;

        assert!(detector.upgrade());
        assert_eq!(detector.radius, base + DETECTOR_UPGRADE_STEP);
        assert!(detector.upgrade());
        assert!(detector.upgrade());
        assert_eq!(detector.radius, base + 3.0 * DETECTOR_UPGRADE_STEP);

        // Fourth upgrade is refused and changes nothing
        assert!(!detector.upgrade());
        assert_eq!(detector.radius, base + 3.0 * DETECTOR_UPGRADE_STEP);
        assert_eq!(detector.upgrades, MAX_DETECTOR_UPGRADES);
    }

    #[test]
    fn test_goal_fires_exactly_once() {
        let mut detector = Detector::new(Vec2::new(400.0, 540.0));

        for _ in 0..DETECTION_GOAL - 1 {
            assert!(!detector.register_detection());
        }
        assert_eq!(detector.detections, 49);
        assert!(!detector.goal_completed);

        // The 50th detection completes the goal
        assert!(detector.register_detection());
        assert!(detector.goal_completed);

        // The 51st and beyond never re-trigger
        assert!(!detector.register_detection());
        assert_eq!(detector.detections, 51);
        assert!(detector.goal_completed);
    }

    #[test]
    fn test_detector_contains_is_strict() {
        let detector = Detector::new(Vec2::new(400.0, 540.0));
        assert!(detector.contains(Vec2::new(400.0, 540.0)));
        assert!(detector.contains(Vec2::new(420.0, 540.0)));
        assert!(!detector.contains(Vec2::new(400.0 + detector.radius, 540.0)));
    }

    #[test]
    fn test_initial_brick_stack() {
        let state = SimState::new(7, test_viewport());
        assert_eq!(state.shields.len(), BRICK_COUNT as usize);

        // Stacked upward from the base, all at the same x, fixed size
        let base_y = state.viewport.ground_top() - BRICK_STACK_RAISE;
        for (i, shield) in state.shields.iter().enumerate() {
            assert_eq!(shield.rect.pos.x, BRICK_STACK_X);
            assert_eq!(shield.rect.pos.y, base_y - i as f32 * BRICK_HEIGHT);
            assert_eq!(shield.rect.size, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT));
        }
    }

    #[test]
    fn test_shield_move_round_trip() {
        let mut state = SimState::new(7, test_viewport());
        let id = state.shields[0].id;

        assert!(state.move_shield(id, 321.0, 123.0));
        let shield = state.shield(id).unwrap();
        assert_eq!(shield.rect.pos, Vec2::new(321.0, 123.0));
        // Dimensions unchanged from construction
        assert_eq!(shield.rect.size, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT));
    }

    #[test]
    fn test_stale_shield_handle_is_no_op() {
        let mut state = SimState::new(7, test_viewport());
        let stale = ShieldId(9999);

        assert!(!state.move_shield(stale, 0.0, 0.0));
        assert!(state.shield(stale).is_none());
        state.release_shield(stale);
    }

    #[test]
    fn test_pick_shield_at() {
        let mut state = SimState::new(7, test_viewport());
        let id = state.shields[2].id;
        state.move_shield(id, 600.0, 100.0);

        assert_eq!(
            state.pick_shield_at(Vec2::new(610.0, 105.0)),
            Some(id),
            "point inside the moved brick picks it"
        );
        assert_eq!(state.pick_shield_at(Vec2::new(700.0, 300.0)), None);
    }

    #[test]
    fn test_upgrade_button_tracks_radius() {
        let mut state = SimState::new(7, test_viewport());
        let before = state.upgrade_button_rect();
        assert!(state.point_in_upgrade_button(before.center()));

        assert!(state.try_upgrade_detector());
        let after = state.upgrade_button_rect();
        // Button slides outward with the rim, same size
        assert_eq!(after.pos.x, before.pos.x + DETECTOR_UPGRADE_STEP);
        assert_eq!(after.pos.y, before.pos.y);
        assert_eq!(after.size, before.size);
    }
}
