//! Additive velocity brush, the only external write interface.
//!
//! Driven by an input collaborator (drag gestures), never by the solver.
//! Direct calls are safe between ticks; during a running session strokes
//! should go through `Solver::queue_brush` so they merge at tick start.

use glam::Vec2;

use crate::grid::Grid;

/// Fixed gain applied to every stroke delta.
pub const BRUSH_STRENGTH: f32 = 5.0;

impl Grid {
    /// Add `delta * BRUSH_STRENGTH` to every interior fluid cell whose
    /// center lies within `radius` of `pos` (grid space), with linear
    /// falloff `(radius - dist) / radius`. Solid cells are untouched.
    pub fn apply_brush(&mut self, pos: Vec2, radius: f32, delta: Vec2) {
        if radius <= 0.0 {
            log::warn!("ignoring brush stroke with non-positive radius {}", radius);
            return;
        }
        for j in 1..=self.height {
            for i in 1..=self.width {
                let idx = self.cell_index(i, j);
                if self.solid[idx] == 0 {
                    continue;
                }
                let center = Vec2::new(i as f32 + 0.5, j as f32 + 0.5);
                let dist = pos.distance(center);
                if dist < radius {
                    let falloff = (radius - dist) / radius;
                    self.u[idx] += delta.x * falloff * BRUSH_STRENGTH;
                    self.v[idx] += delta.y * falloff * BRUSH_STRENGTH;
                }
            }
        }
    }
}
