//! Semi-Lagrangian advection of the staggered velocity field.
//!
//! First order and unconditionally stable: each face traces backward along
//! its own reconstructed velocity and resamples the previous field at the
//! origin. One substep per call regardless of trace distance; very fast
//! flow can skip over features, which is accepted for the demos.

use crate::grid::Grid;

impl Grid {
    /// Advect both face fields over `dt`.
    ///
    /// All new values land in scratch buffers first, so every trace reads
    /// the unmodified previous field; the buffers replace the live field
    /// only after both axis passes finish.
    pub fn advect_velocity(&mut self, dt: f32) {
        // Backward traces are clamped into the interior span of grid
        // space; the sampler clamps again per stencil.
        let max_x = (self.width + 1) as f32;
        let max_y = (self.height + 1) as f32;

        for j in 1..=self.height {
            for i in 1..=self.width {
                let idx = self.cell_index(i, j);
                // Obstacle cells hold wall faces; those stay fixed.
                if self.solid[idx] == 0 {
                    self.u_next[idx] = self.u[idx];
                    continue;
                }
                let vel = self.velocity_at_u_face(i, j);
                let x = (i as f32 - vel.x * dt).clamp(1.0, max_x);
                let y = (j as f32 + 0.5 - vel.y * dt).clamp(1.0, max_y);
                self.u_next[idx] = self.sample_u(x, y);
            }
        }

        for j in 1..=self.height {
            for i in 1..=self.width {
                let idx = self.cell_index(i, j);
                if self.solid[idx] == 0 {
                    self.v_next[idx] = self.v[idx];
                    continue;
                }
                let vel = self.velocity_at_v_face(i, j);
                let x = (i as f32 + 0.5 - vel.x * dt).clamp(1.0, max_x);
                let y = (j as f32 - vel.y * dt).clamp(1.0, max_y);
                self.v_next[idx] = self.sample_v(x, y);
            }
        }

        for j in 1..=self.height {
            for i in 1..=self.width {
                let idx = self.cell_index(i, j);
                self.u[idx] = self.u_next[idx];
                self.v[idx] = self.v_next[idx];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::VelocityInit;

    #[test]
    fn test_zero_field_unchanged() {
        let mut grid = Grid::new(8, 8, VelocityInit::Zero);
        grid.advect_velocity(1.0 / 30.0);
        assert!(grid.u.iter().all(|&x| x == 0.0));
        assert!(grid.v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_zero_dt_is_identity() {
        let mut grid = Grid::new(
            8,
            6,
            VelocityInit::RandomUniform {
                min: -3.0,
                max: 3.0,
                seed: 9,
            },
        );
        let before = grid.clone();
        grid.advect_velocity(0.0);
        // Zero trace distance resamples each face exactly at itself.
        for j in 1..=6 {
            for i in 1..=8 {
                let idx = grid.cell_index(i, j);
                assert!(
                    (grid.u[idx] - before.u[idx]).abs() < 1e-6,
                    "u drifted at ({}, {})",
                    i,
                    j
                );
                assert!(
                    (grid.v[idx] - before.v[idx]).abs() < 1e-6,
                    "v drifted at ({}, {})",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_uniform_flow_never_gains_speed() {
        let mut grid = Grid::new(16, 9, VelocityInit::Zero);
        for j in 1..=9 {
            for i in 1..=16 {
                let idx = grid.cell_index(i, j);
                grid.u[idx] = 4.0;
            }
        }
        let max_before = grid.max_speed();
        grid.advect_velocity(1.0 / 60.0);
        // Bilinear resampling is a convex combination of stored values, so
        // the field maximum cannot grow.
        assert!(grid.max_speed() <= max_before + 1e-5);
        assert!(grid.v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_ring_faces_never_written() {
        let mut grid = Grid::new(
            6,
            6,
            VelocityInit::RandomUniform {
                min: -5.0,
                max: 5.0,
                seed: 1,
            },
        );
        grid.advect_velocity(0.1);
        for k in 0..=7 {
            assert_eq!(grid.velocity_at(k, 0), glam::Vec2::ZERO);
            assert_eq!(grid.velocity_at(k, 7), glam::Vec2::ZERO);
            assert_eq!(grid.velocity_at(0, k), glam::Vec2::ZERO);
            assert_eq!(grid.velocity_at(7, k), glam::Vec2::ZERO);
        }
    }
}
