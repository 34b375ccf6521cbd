//! Render contract
//!
//! Renderers get a read-only [`Frame`] once per tick, after resolution.
//! Drawing itself happens outside this crate.

use glam::Vec2;

use crate::consts::DEFAULT_COLOR;
use crate::sim::Node;

/// Read-only view of the arena for one redraw
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub nodes: &'a [Node],
    pub radius: f32,
    pub width: f32,
    pub height: f32,
    pub background: &'a str,
}

impl<'a> Frame<'a> {
    /// Circles to draw: center and fill color
    pub fn circles(self) -> impl Iterator<Item = (Vec2, &'a str)> + 'a {
        self.nodes
            .iter()
            .map(|n| (n.position, n.color.as_deref().unwrap_or(DEFAULT_COLOR)))
    }
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Ignores every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &Frame<'_>) {}
}

/// Counts redraws
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameCounter {
    pub frames: u64,
}

impl Renderer for FrameCounter {
    fn draw(&mut self, _frame: &Frame<'_>) {
        self.frames += 1;
    }
}
