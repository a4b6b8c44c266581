//! Vorticity computation and confinement.
//!
//! Semi-Lagrangian advection smears out rotation; confinement re-injects
//! it by pushing velocity perpendicular to the gradient of |curl|,
//! amplifying vortices the field already has.

use glam::Vec2;

use crate::grid::Grid;

impl Grid {
    /// Refresh the curl field over the interior. Ring cells stay zero so
    /// the gradient pass can read them without bounds checks.
    ///
    /// omega = dv/dx - du/dy, central differences:
    /// `0.5*(v[i+1,j] - v[i-1,j]) - 0.5*(u[i,j+1] - u[i,j-1])`
    pub fn compute_vorticity(&mut self) {
        for j in 1..=self.height {
            for i in 1..=self.width {
                let dv_dx =
                    0.5 * (self.v[self.cell_index(i + 1, j)] - self.v[self.cell_index(i - 1, j)]);
                let du_dy =
                    0.5 * (self.u[self.cell_index(i, j + 1)] - self.u[self.cell_index(i, j - 1)]);
                let idx = self.cell_index(i, j);
                self.vorticity[idx] = dv_dx - du_dy;
            }
        }
    }

    /// Refresh the normalized gradient of |curl|. Degenerate gradients
    /// (flat |curl|) become the zero vector and produce no force.
    fn compute_vorticity_gradient(&mut self) {
        for j in 1..=self.height {
            for i in 1..=self.width {
                let dx = 0.5
                    * (self.vorticity[self.cell_index(i + 1, j)].abs()
                        - self.vorticity[self.cell_index(i - 1, j)].abs());
                let dy = 0.5
                    * (self.vorticity[self.cell_index(i, j + 1)].abs()
                        - self.vorticity[self.cell_index(i, j - 1)].abs());
                let idx = self.cell_index(i, j);
                self.vorticity_gradient[idx] = Vec2::new(dx, dy).normalize_or_zero();
            }
        }
    }

    /// Apply the confinement force to every interior cell, once per tick.
    ///
    /// The force is perpendicular to the |curl| gradient and signed by the
    /// local curl: `strength * (N.y, -N.x) * omega`, integrated over `dt`.
    /// The boundary ring is untouched.
    pub fn apply_vorticity_confinement(&mut self, dt: f32) {
        if self.vorticity_strength == 0.0 {
            return;
        }

        self.compute_vorticity();
        self.compute_vorticity_gradient();

        for j in 1..=self.height {
            for i in 1..=self.width {
                let idx = self.cell_index(i, j);
                if self.solid[idx] == 0 {
                    continue;
                }
                let n = self.vorticity_gradient[idx];
                let w = self.vorticity[idx];
                let force = self.vorticity_strength * Vec2::new(n.y, -n.x) * w;
                self.u[idx] += force.x * dt;
                self.v[idx] += force.y * dt;
            }
        }
    }
}
