//! Browser bindings
//!
//! Thin `wasm-bindgen` wrapper over [`Simulation`]. JavaScript owns the
//! canvas, the synth and the `requestAnimationFrame` loop; it calls
//! `frame(now, play)` every animation frame and redraws from `positions()`
//! when a tick ran.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::audio::NoteSink;
use crate::render::NullRenderer;
use crate::{PhysicsSettings, Simulation};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(e: crate::ConfigError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Forwards each trigger to a JS callback
struct JsSink<'a>(&'a js_sys::Function);

impl NoteSink for JsSink<'_> {
    fn play(&mut self, note: i32) {
        if let Err(e) = self.0.call1(&JsValue::NULL, &JsValue::from(note)) {
            log::warn!("play callback failed: {:?}", e);
        }
    }
}

#[wasm_bindgen]
pub struct WebSimulation {
    sim: Simulation,
}

#[wasm_bindgen]
impl WebSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: u64) -> Result<WebSimulation, JsValue> {
        let sim = Simulation::new(PhysicsSettings::with_arena(width, height), seed).map_err(to_js)?;
        Ok(Self { sim })
    }

    /// Run the frame hook. Returns true if a tick ran and the canvas needs a redraw.
    pub fn frame(&mut self, now: f64, play: &js_sys::Function) -> bool {
        self.sim
            .on_frame(now, &mut JsSink(play), &mut NullRenderer)
            .is_some()
    }

    pub fn add_node(&mut self, note: i32, dx: f32, dy: f32, color: Option<String>) -> usize {
        self.sim.add_node(note, Vec2::new(dx, dy), color)
    }

    pub fn add_random_node(&mut self, note: i32, speed: f32) -> usize {
        self.sim.add_random_node(note, speed)
    }

    pub fn clear_nodes(&mut self) {
        self.sim.clear_nodes();
    }

    pub fn shift_notes(&mut self, steps: i32) {
        self.sim.shift_notes(steps);
    }

    pub fn reset(&mut self, now: f64) {
        self.sim.reset(now);
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.sim.toggle_pause();
        self.sim.is_paused()
    }

    #[wasm_bindgen(getter)]
    pub fn paused(&self) -> bool {
        self.sim.is_paused()
    }

    #[wasm_bindgen(setter)]
    pub fn set_paused(&mut self, paused: bool) {
        self.sim.set_paused(paused);
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.sim.resize(width, height, &mut NullRenderer).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn radius(&self) -> f32 {
        self.sim.radius()
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<(), JsValue> {
        self.sim.set_radius(radius).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn friction_coefficient(&self) -> f32 {
        self.sim.friction_coefficient()
    }

    pub fn set_friction_coefficient(&mut self, friction: f32) -> Result<(), JsValue> {
        self.sim.set_friction_coefficient(friction).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn wall_restitution(&self) -> f32 {
        self.sim.wall_restitution()
    }

    pub fn set_wall_restitution(&mut self, restitution: f32) -> Result<(), JsValue> {
        self.sim.set_wall_restitution(restitution).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn node_restitution(&self) -> f32 {
        self.sim.node_restitution()
    }

    pub fn set_node_restitution(&mut self, restitution: f32) -> Result<(), JsValue> {
        self.sim.set_node_restitution(restitution).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 {
        self.sim.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 {
        self.sim.height()
    }

    #[wasm_bindgen(getter)]
    pub fn background_color(&self) -> String {
        self.sim.settings().background_color.clone()
    }

    #[wasm_bindgen(setter)]
    pub fn set_background_color(&mut self, color: String) {
        self.sim.set_background_color(color);
    }

    /// Node centers flattened as `[x0, y0, x1, y1, ...]`
    pub fn positions(&self) -> Vec<f32> {
        self.sim
            .nodes()
            .iter()
            .flat_map(|n| [n.position.x, n.position.y])
            .collect()
    }

    /// Node colors in node order, default color filled in
    pub fn colors(&self) -> Vec<String> {
        self.sim.frame().circles().map(|(_, c)| c.to_string()).collect()
    }

    pub fn notes(&self) -> Vec<i32> {
        self.sim.nodes().iter().map(|n| n.note).collect()
    }
}
