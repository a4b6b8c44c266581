//! Staggered MAC grid for the 2D velocity solver.
//!
//! Velocity components are stored on cell faces:
//! - u (X-component) on left faces: `u[i,j]` is the flux between columns i-1 and i
//! - v (Y-component) on bottom faces: `v[i,j]` is the flux between rows j-1 and j
//!
//! Every per-cell array is `(width+2) * (height+2)`: the interior is
//! `i in 1..=width`, `j in 1..=height`, wrapped in a one-cell ring of
//! solid boundary cells. In grid space, cell `(i, j)` spans
//! `[i, i+1] x [j, j+1]`, so `u[i,j]` sits at `(i, j+0.5)` and `v[i,j]`
//! at `(i+0.5, j)`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Initial velocity policy for grid construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum VelocityInit {
    /// All faces start at rest.
    Zero,
    /// Fluid-cell faces start at uniform random values in `[min, max]`.
    /// Seeded so demos and tests are reproducible.
    RandomUniform { min: f32, max: f32, seed: u64 },
}

/// Staggered velocity grid plus solver parameters.
///
/// Owned by one `Solver` per session; external collaborators (renderers,
/// brushes) read and write it only between ticks. Dimensions and array
/// shapes are fixed after construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Grid {
    /// Interior cell count in X (W). Arrays span W+2 columns.
    pub width: usize,
    /// Interior cell count in Y (H). Arrays span H+2 rows.
    pub height: usize,

    /// X face velocities, `(W+2)*(H+2)`, left face of each cell.
    pub u: Vec<f32>,
    /// Y face velocities, `(W+2)*(H+2)`, bottom face of each cell.
    pub v: Vec<f32>,

    /// 1 = fluid, 0 = impermeable boundary/obstacle. The outer ring is
    /// always 0. Stored as integers because the projector uses the flag
    /// directly as a correction weight.
    pub solid: Vec<u8>,

    /// Gauss-Seidel sweeps per projection call.
    pub solver_iterations: usize,
    /// Over-relaxation factor, stable in (0, 2).
    pub overrelaxation: f32,
    /// Vorticity confinement strength, >= 0. Zero disables confinement.
    pub vorticity_strength: f32,
    /// Uniform body force applied at tick start. Zero by default; the
    /// tank demos run without gravity.
    pub gravity: Vec2,

    /// Curl per cell, refreshed by the confinement pass. Ring stays zero.
    pub vorticity: Vec<f32>,
    /// Normalized gradient of |curl| per cell, confinement scratch.
    pub(crate) vorticity_gradient: Vec<Vec2>,
    /// Advection double buffers; never exposed outside the tick.
    pub(crate) u_next: Vec<f32>,
    pub(crate) v_next: Vec<f32>,
}

impl Grid {
    /// Create a grid with all interior cells fluid.
    ///
    /// Panics when `width` or `height` is zero.
    pub fn new(width: usize, height: usize, init: VelocityInit) -> Self {
        Self::with_obstacles(width, height, init, &[])
    }

    /// Create a grid with the given interior cells marked as obstacles.
    /// Obstacle coordinates outside the interior are ignored.
    ///
    /// Panics when `width` or `height` is zero.
    pub fn with_obstacles(
        width: usize,
        height: usize,
        init: VelocityInit,
        obstacles: &[(usize, usize)],
    ) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be positive, got {}x{}",
            width,
            height
        );

        let len = (width + 2) * (height + 2);
        let mut grid = Self {
            width,
            height,
            u: vec![0.0; len],
            v: vec![0.0; len],
            solid: vec![0; len],
            solver_iterations: 20,
            overrelaxation: 1.9,
            vorticity_strength: 0.0,
            gravity: Vec2::ZERO,
            vorticity: vec![0.0; len],
            vorticity_gradient: vec![Vec2::ZERO; len],
            u_next: vec![0.0; len],
            v_next: vec![0.0; len],
        };

        // Interior starts fluid; the ring stays 0.
        for j in 1..=height {
            for i in 1..=width {
                let idx = grid.cell_index(i, j);
                grid.solid[idx] = 1;
            }
        }
        for &(i, j) in obstacles {
            grid.set_solid(i, j);
        }

        grid.init_velocities(init);
        grid
    }

    fn init_velocities(&mut self, init: VelocityInit) {
        match init {
            VelocityInit::Zero => {}
            VelocityInit::RandomUniform { min, max, seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                for j in 1..=self.height {
                    for i in 1..=self.width {
                        let idx = self.cell_index(i, j);
                        if self.solid[idx] == 0 {
                            continue;
                        }
                        self.u[idx] = rng.gen_range(min..=max);
                        self.v[idx] = rng.gen_range(min..=max);
                    }
                }
            }
        }
    }

    // ========== Index helpers ==========

    /// Flat index for all per-cell arrays (u, v, solid, vorticity).
    #[inline]
    pub fn cell_index(&self, i: usize, j: usize) -> usize {
        j * (self.width + 2) + i
    }

    /// True for `1..=width` x `1..=height`, the cells the solver touches.
    #[inline]
    pub fn in_interior(&self, i: usize, j: usize) -> bool {
        (1..=self.width).contains(&i) && (1..=self.height).contains(&j)
    }

    // ========== Solid mask ==========

    /// Mark an interior cell as an obstacle and zero its faces.
    /// Ring cells are already solid; out-of-interior coordinates are ignored.
    pub fn set_solid(&mut self, i: usize, j: usize) {
        if self.in_interior(i, j) {
            let idx = self.cell_index(i, j);
            self.solid[idx] = 0;
            self.u[idx] = 0.0;
            self.v[idx] = 0.0;
        }
    }

    /// Solid flag accessor: 1 = fluid, 0 = solid. Out-of-range is solid.
    #[inline]
    pub fn solid_at(&self, i: usize, j: usize) -> u8 {
        if i <= self.width + 1 && j <= self.height + 1 {
            self.solid[self.cell_index(i, j)]
        } else {
            0
        }
    }

    // ========== Read accessors for rendering collaborators ==========

    /// Staggered velocity pair stored at cell `(i, j)`:
    /// `.x` is the left-face flux, `.y` the bottom-face flux.
    /// Out-of-range indices read as zero.
    #[inline]
    pub fn velocity_at(&self, i: usize, j: usize) -> Vec2 {
        if i <= self.width + 1 && j <= self.height + 1 {
            let idx = self.cell_index(i, j);
            Vec2::new(self.u[idx], self.v[idx])
        } else {
            Vec2::ZERO
        }
    }

    /// Discrete divergence of cell `(i, j)`:
    /// `(u[i+1,j] - u[i,j]) + (v[i,j+1] - v[i,j])`.
    ///
    /// Diagnostic for the external visualizer; returns 0 for ring or
    /// out-of-range indices.
    pub fn divergence_at(&self, i: usize, j: usize) -> f32 {
        if !self.in_interior(i, j) {
            return 0.0;
        }
        let idx = self.cell_index(i, j);
        let right = self.cell_index(i + 1, j);
        let top = self.cell_index(i, j + 1);
        (self.u[right] - self.u[idx]) + (self.v[top] - self.v[idx])
    }

    // ========== Forces ==========

    /// Add the uniform body force to every interior fluid cell.
    pub fn apply_gravity(&mut self, dt: f32) {
        if self.gravity == Vec2::ZERO {
            return;
        }
        let g = self.gravity * dt;
        for j in 1..=self.height {
            for i in 1..=self.width {
                let idx = self.cell_index(i, j);
                if self.solid[idx] == 1 {
                    self.u[idx] += g.x;
                    self.v[idx] += g.y;
                }
            }
        }
    }

    // ========== Diagnostics ==========

    /// Sum of |divergence| over the interior.
    pub fn total_divergence(&self) -> f32 {
        let mut total = 0.0;
        for j in 1..=self.height {
            for i in 1..=self.width {
                total += self.divergence_at(i, j).abs();
            }
        }
        total
    }

    /// Largest |divergence| over the interior.
    pub fn max_divergence(&self) -> f32 {
        let mut max = 0.0f32;
        for j in 1..=self.height {
            for i in 1..=self.width {
                max = max.max(self.divergence_at(i, j).abs());
            }
        }
        max
    }

    /// Largest staggered-pair speed in the field.
    pub fn max_speed(&self) -> f32 {
        self.u
            .iter()
            .zip(&self.v)
            .map(|(&u, &v)| Vec2::new(u, v).length())
            .fold(0.0f32, f32::max)
    }

    /// Sum of |curl| over the interior, from the last confinement pass.
    pub fn total_absolute_vorticity(&self) -> f32 {
        let mut total = 0.0;
        for j in 1..=self.height {
            for i in 1..=self.width {
                total += self.vorticity[self.cell_index(i, j)].abs();
            }
        }
        total
    }
}
