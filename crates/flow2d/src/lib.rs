//! 2D incompressible-flow velocity solver for interactive teaching demos.
//!
//! A staggered-grid (MAC) "Stable Fluids"-family solver: per tick it
//! injects rotational forcing (vorticity confinement), advects the
//! velocity field semi-Lagrangian style, then drives divergence toward
//! zero with over-relaxed Gauss-Seidel sweeps against solid boundaries.
//! Unconditionally stable and tuned for visual plausibility at real-time
//! rates, not for verified CFD.
//!
//! This crate is framework-agnostic: rendering, camera framing, and input
//! live in the host application and talk to the solver only through
//! `Grid` read accessors and the brush interface.
//!
//! # Example
//!
//! ```
//! use flow2d::{BrushStroke, Grid, Solver, VelocityInit};
//! use glam::Vec2;
//!
//! let grid = Grid::new(16, 9, VelocityInit::Zero);
//! let mut solver = Solver::new(grid);
//!
//! // Drag gesture from the input layer, merged at the next tick.
//! solver.queue_brush(BrushStroke {
//!     pos: Vec2::new(8.5, 5.5),
//!     radius: 2.0,
//!     delta: Vec2::new(1.0, 0.0),
//! });
//!
//! solver.step(1.0 / 60.0);
//! assert!(solver.grid.max_speed() > 0.0);
//! ```

pub mod advect;
pub mod brush;
pub mod grid;
pub mod project;
pub mod sample;
pub mod solver;
pub mod vorticity;

pub use brush::BRUSH_STRENGTH;
pub use glam::Vec2;
pub use grid::{Grid, VelocityInit};
pub use solver::{BrushStroke, Solver};
