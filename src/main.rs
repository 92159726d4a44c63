//! Cosmic Catcher entry point
//!
//! The simulation core is platform-free; this file is the driver on both
//! targets. On wasm32 it paints scene snapshots onto a 2D canvas and feeds
//! pointer events back into the simulation; on native it runs a seeded
//! headless smoke run and dumps the final scene as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

    use cosmic_catcher::consts::*;
    use cosmic_catcher::render::{PARTICLE_DRAW_RADIUS, Scene};
    use cosmic_catcher::sim::{ShieldId, SimEvent, SimState, Viewport, spawn_particle, step};

    /// Game instance holding the simulation and its drawing surface
    struct Game {
        state: SimState,
        ctx: CanvasRenderingContext2d,
        /// Simulation-time accumulator for fixed 16 ms substeps
        accumulator: f32,
        /// Wall-clock accumulator for the 500 ms spawn cadence
        spawn_accumulator: f32,
        last_time: f64,
        /// Brick currently held by the pointer, if any
        dragging: Option<ShieldId>,
    }

    impl Game {
        fn new(seed: u64, viewport: Viewport, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: SimState::new(seed, viewport),
                ctx,
                accumulator: 0.0,
                spawn_accumulator: 0.0,
                last_time: 0.0,
                dragging: None,
            }
        }

        /// Run the spawn cadence and simulation substeps for one frame
        fn update(&mut self, dt_ms: f32) -> Vec<SimEvent> {
            let dt_ms = dt_ms.min(100.0);

            self.spawn_accumulator += dt_ms;
            while self.spawn_accumulator >= SPAWN_INTERVAL_MS {
                spawn_particle(&mut self.state);
                self.spawn_accumulator -= SPAWN_INTERVAL_MS;
            }

            let mut events = Vec::new();
            self.accumulator += dt_ms;
            let mut substeps = 0;
            while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
                events.extend(step(&mut self.state, TICK_MS));
                self.accumulator -= TICK_MS;
                substeps += 1;
            }
            events
        }

        /// Paint the current frame
        fn render(&self) {
            let scene = Scene::capture(&self.state);
            let ctx = &self.ctx;
            let vp = scene.viewport;

            ctx.clear_rect(0.0, 0.0, vp.width as f64, vp.height as f64);

            // Ground band
            ctx.set_fill_style_str("#654321");
            fill_rect(ctx, &scene.ground);

            // Detector
            ctx.begin_path();
            let _ = ctx.arc(
                scene.detector.center.x as f64,
                scene.detector.center.y as f64,
                scene.detector.radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.set_fill_style_str("red");
            ctx.fill();

            // Lead bricks
            ctx.set_fill_style_str("#333333");
            for rect in &scene.shields {
                fill_rect(ctx, rect);
            }

            // Upgrade button: green square with a white plus
            ctx.set_fill_style_str("#4CAF50");
            fill_rect(ctx, &scene.upgrade_button);
            ctx.set_fill_style_str("white");
            ctx.set_font("20px Arial");
            let _ = ctx.fill_text(
                "+",
                (scene.upgrade_button.pos.x + 10.0) as f64,
                (scene.upgrade_button.pos.y + 22.0) as f64,
            );

            // Rays
            ctx.set_fill_style_str("white");
            for pos in &scene.particles {
                ctx.begin_path();
                let _ = ctx.arc(
                    pos.x as f64,
                    pos.y as f64,
                    PARTICLE_DRAW_RADIUS as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }

            // Counter
            ctx.set_font("20px Arial");
            let _ = ctx.fill_text(&format!("Particles detected: {}", scene.detections), 10.0, 30.0);
        }
    }

    fn fill_rect(ctx: &CanvasRenderingContext2d, rect: &cosmic_catcher::sim::Rect) {
        ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cosmic Catcher starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the play area to the window once at load
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context unavailable")
            .expect("2d context unavailable")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let viewport = Viewport::new(width as f32, height as f32);
        let game = Rc::new(RefCell::new(Game::new(seed, viewport, ctx)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Cosmic Catcher running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down: pick up a brick, and check the upgrade button
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                let mut g = game.borrow_mut();

                if let Some(id) = g.state.pick_shield_at(pos) {
                    g.dragging = Some(id);
                }

                if g.state.point_in_upgrade_button(pos) {
                    if g.state.try_upgrade_detector() {
                        log::info!("Detector upgraded! New radius: {}", g.state.detector.radius);
                    } else {
                        log::info!("Maximum upgrades reached!");
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move: drag the held brick, centered under the cursor
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some(id) = g.dragging {
                    let x = event.offset_x() as f32 - BRICK_WIDTH / 2.0;
                    let y = event.offset_y() as f32 - BRICK_HEIGHT / 2.0;
                    g.state.move_shield(id, x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up: let go
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some(id) = g.dragging.take() {
                    g.state.release_shield(id);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let events = {
            let mut g = game.borrow_mut();
            let dt_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                TICK_MS
            };
            g.last_time = time;

            let events = g.update(dt_ms);
            g.render();
            events
        };

        for event in events {
            let SimEvent::GoalReached { detections } = event;
            show_goal_modal(detections);
        }

        request_animation_frame(game);
    }

    /// One-time congratulations overlay, dismissed by its close button
    fn show_goal_modal(detections: u32) {
        let document = web_sys::window().unwrap().document().unwrap();

        let modal = document.create_element("div").expect("create modal");
        let _ = modal.set_attribute(
            "style",
            "position: fixed; top: 50%; left: 50%; transform: translate(-50%, -50%); \
             background-color: white; padding: 20px; border-radius: 10px; \
             box-shadow: 0 0 10px rgba(0, 0, 0, 0.5); z-index: 1000; text-align: center;",
        );
        modal.set_inner_html(&format!(
            "<h2>Congratulations!</h2>\
             <p>You've completed your first goal of detecting {detections} particles.</p>\
             <p>You have received additional resources and can build a bigger detector!</p>\
             <button style=\"padding: 10px 20px; margin-top: 10px;\">Close</button>"
        ));

        let handle = modal.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            handle.remove();
        });
        let _ = modal.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();

        let body = document.body().expect("no body");
        let _ = body.append_child(&modal);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cosmic_catcher::consts::*;
    use cosmic_catcher::render::Scene;
    use cosmic_catcher::sim::{SimEvent, SimState, Viewport, spawn_particle, step};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0531C);
    let mut state = SimState::new(seed, Viewport::new(800.0, 600.0));
    log::info!("Cosmic Catcher headless run, seed {}", seed);

    // One minute of simulated time at the usual cadences
    let ticks = (60_000.0 / TICK_MS) as u32;
    let mut spawn_accumulator = 0.0_f32;
    for _ in 0..ticks {
        spawn_accumulator += TICK_MS;
        while spawn_accumulator >= SPAWN_INTERVAL_MS {
            spawn_particle(&mut state);
            spawn_accumulator -= SPAWN_INTERVAL_MS;
        }
        for event in step(&mut state, TICK_MS) {
            let SimEvent::GoalReached { detections } = event;
            log::info!("Goal reached: {} rays detected", detections);
        }
    }

    log::info!(
        "Done: {} rays detected, {} still falling",
        state.detector.detections,
        state.particles.len()
    );
    let scene = Scene::capture(&state);
    println!(
        "{}",
        serde_json::to_string_pretty(&scene).expect("scene serializes")
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
