//! Per-tick orchestration of the velocity solver.
//!
//! One `Solver` owns one `Grid` for the lifetime of a session. `step(dt)`
//! is the sole entry point and always runs the whole tick: merge staged
//! brush strokes, body force, vorticity confinement, advection,
//! projection. External readers observe the grid only between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// A brush edit staged for the next tick.
///
/// Input collaborators may run while a tick is in flight conceptually
/// (event queues), so strokes are buffered here and merged atomically at
/// tick start instead of mutating the grid mid-update.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrushStroke {
    /// Stroke center in grid space.
    pub pos: Vec2,
    /// Influence radius in cells.
    pub radius: f32,
    /// Velocity delta, scaled by the brush gain and falloff per cell.
    pub delta: Vec2,
}

/// Operator-split velocity solver: confinement, advection, projection.
pub struct Solver {
    /// The grid this solver owns and mutates in place. Handed out by
    /// reference to rendering and input collaborators; never cloned into
    /// them.
    pub grid: Grid,
    /// Demo toggle: skip the advection phase.
    pub advect: bool,
    /// Demo toggle: skip the projection phase.
    pub project: bool,
    staged_strokes: Vec<BrushStroke>,
}

impl Solver {
    /// Take ownership of a constructed grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            advect: true,
            project: true,
            staged_strokes: Vec::new(),
        }
    }

    /// Stage a brush stroke to be merged at the start of the next tick.
    pub fn queue_brush(&mut self, stroke: BrushStroke) {
        self.staged_strokes.push(stroke);
    }

    /// Advance the simulation by `dt`. Atomic from the caller's view: the
    /// grid is consistent before and after, never observed mid-phase. A
    /// tick always runs to completion; anomalies (degenerate cells,
    /// out-of-range samples) are absorbed locally by the phases.
    pub fn step(&mut self, dt: f32) {
        for stroke in self.staged_strokes.drain(..) {
            self.grid.apply_brush(stroke.pos, stroke.radius, stroke.delta);
        }

        self.grid.apply_gravity(dt);
        self.grid.apply_vorticity_confinement(dt);
        if self.advect {
            self.grid.advect_velocity(dt);
        }
        if self.project {
            self.grid.project_velocities();
        }
    }
}
