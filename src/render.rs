//! Per-frame scene snapshots
//!
//! The simulation never draws. After each step a `Scene` is captured from
//! the state and handed to whatever surface is available: the wasm front-end
//! paints it on a canvas, the native demo dumps it as JSON, and headless
//! tests just inspect it. Fields are listed in back-to-front draw order.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Rect, SimState, Viewport};

/// The detector as a drawable circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectorView {
    pub center: Vec2,
    pub radius: f32,
}

/// Everything a surface needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub viewport: Viewport,
    /// The ground band along the bottom of the viewport
    pub ground: Rect,
    pub detector: DetectorView,
    pub shields: Vec<Rect>,
    /// Live ray positions, including rays on their final off-screen frame
    pub particles: Vec<Vec2>,
    /// The "+" affordance beside the detector rim
    pub upgrade_button: Rect,
    pub detections: u32,
    pub goal_completed: bool,
}

impl Scene {
    /// Capture a read-only snapshot of the current state
    pub fn capture(state: &SimState) -> Self {
        let viewport = state.viewport;
        Self {
            viewport,
            ground: Rect::new(
                0.0,
                viewport.ground_top(),
                viewport.width,
                viewport.ground_height(),
            ),
            detector: DetectorView {
                center: state.detector.center,
                radius: state.detector.radius,
            },
            shields: state.shields.iter().map(|s| s.rect).collect(),
            particles: state.particles.iter().map(|p| p.pos).collect(),
            upgrade_button: state.upgrade_button_rect(),
            detections: state.detector.detections,
            goal_completed: state.detector.goal_completed,
        }
    }
}

/// Radius rays are drawn with, in px
pub const PARTICLE_DRAW_RADIUS: f32 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawn_particle;

    #[test]
    fn test_scene_mirrors_state() {
        let mut state = SimState::new(5, Viewport::new(800.0, 600.0));
        for _ in 0..3 {
            spawn_particle(&mut state);
        }

        let scene = Scene::capture(&state);
        assert_eq!(scene.ground, Rect::new(0.0, 480.0, 800.0, 120.0));
        assert_eq!(scene.detector.center, state.detector.center);
        assert_eq!(scene.detector.radius, state.detector.radius);
        assert_eq!(scene.shields.len(), BRICK_COUNT as usize);
        assert_eq!(scene.particles.len(), 3);
        assert_eq!(scene.detections, 0);
        assert!(!scene.goal_completed);
    }

    #[test]
    fn test_upgrade_button_hugs_the_rim() {
        let mut state = SimState::new(5, Viewport::new(800.0, 600.0));
        let scene = Scene::capture(&state);
        assert_eq!(
            scene.upgrade_button.pos.x,
            state.detector.center.x + state.detector.radius + UPGRADE_BUTTON_GAP
        );

        state.try_upgrade_detector();
        let scene = Scene::capture(&state);
        assert_eq!(
            scene.upgrade_button.pos.x,
            state.detector.center.x + state.detector.radius + UPGRADE_BUTTON_GAP
        );
    }
}
