//! Bilinear sampling of the staggered velocity field.
//!
//! The two components live on different lattices, so each is interpolated
//! from its own 2x2 stencil: u from `(i, j+0.5)` positions, v from
//! `(i+0.5, j)`. Queries outside the stored range are clamped, never
//! an error.

use glam::Vec2;

use crate::grid::Grid;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Grid {
    /// Sample the full velocity at a continuous grid-space point.
    pub fn sample_velocity(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(self.sample_u(x, y), self.sample_v(x, y))
    }

    /// Sample the X component. u[i,j] sits at `(i, j+0.5)`.
    pub fn sample_u(&self, x: f32, y: f32) -> f32 {
        let fx = x;
        let fy = y - 0.5;

        let i = (fx.floor() as i32).clamp(0, self.width as i32) as usize;
        let j = (fy.floor() as i32).clamp(0, self.height as i32) as usize;
        let tx = (fx - i as f32).clamp(0.0, 1.0);
        let ty = (fy - j as f32).clamp(0.0, 1.0);

        let u00 = self.u[self.cell_index(i, j)];
        let u10 = self.u[self.cell_index(i + 1, j)];
        let u01 = self.u[self.cell_index(i, j + 1)];
        let u11 = self.u[self.cell_index(i + 1, j + 1)];

        lerp(lerp(u00, u10, tx), lerp(u01, u11, tx), ty)
    }

    /// Sample the Y component. v[i,j] sits at `(i+0.5, j)`.
    pub fn sample_v(&self, x: f32, y: f32) -> f32 {
        let fx = x - 0.5;
        let fy = y;

        let i = (fx.floor() as i32).clamp(0, self.width as i32) as usize;
        let j = (fy.floor() as i32).clamp(0, self.height as i32) as usize;
        let tx = (fx - i as f32).clamp(0.0, 1.0);
        let ty = (fy - j as f32).clamp(0.0, 1.0);

        let v00 = self.v[self.cell_index(i, j)];
        let v10 = self.v[self.cell_index(i + 1, j)];
        let v01 = self.v[self.cell_index(i, j + 1)];
        let v11 = self.v[self.cell_index(i + 1, j + 1)];

        lerp(lerp(v00, v10, tx), lerp(v01, v11, tx), ty)
    }

    /// Full velocity at the u face `(i, j+0.5)`: the stored u plus the
    /// average of the four nearest v samples.
    pub fn velocity_at_u_face(&self, i: usize, j: usize) -> Vec2 {
        let u = self.u[self.cell_index(i, j)];
        let v = 0.25
            * (self.v[self.cell_index(i - 1, j)]
                + self.v[self.cell_index(i, j)]
                + self.v[self.cell_index(i - 1, j + 1)]
                + self.v[self.cell_index(i, j + 1)]);
        Vec2::new(u, v)
    }

    /// Full velocity at the v face `(i+0.5, j)`: the stored v plus the
    /// average of the four nearest u samples.
    pub fn velocity_at_v_face(&self, i: usize, j: usize) -> Vec2 {
        let v = self.v[self.cell_index(i, j)];
        let u = 0.25
            * (self.u[self.cell_index(i, j - 1)]
                + self.u[self.cell_index(i + 1, j - 1)]
                + self.u[self.cell_index(i, j)]
                + self.u[self.cell_index(i + 1, j)]);
        Vec2::new(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::VelocityInit;

    #[test]
    fn test_sample_exact_at_face_positions() {
        let mut grid = Grid::new(6, 6, VelocityInit::Zero);
        let idx = grid.cell_index(2, 3);
        grid.u[idx] = 4.0;
        grid.v[idx] = -2.0;

        // u[2,3] sits at (2.0, 3.5), v[2,3] at (2.5, 3.0).
        assert_eq!(grid.sample_u(2.0, 3.5), 4.0);
        assert_eq!(grid.sample_v(2.5, 3.0), -2.0);
        let vel = grid.sample_velocity(2.0, 3.5);
        assert_eq!(vel.x, 4.0);
    }

    #[test]
    fn test_sample_uniform_field_is_constant() {
        let mut grid = Grid::new(8, 5, VelocityInit::Zero);
        grid.u.fill(3.0);
        grid.v.fill(-1.5);
        for &(x, y) in &[(1.0, 1.0), (4.3, 2.7), (8.99, 5.5), (2.5, 4.0)] {
            let vel = grid.sample_velocity(x, y);
            assert!((vel.x - 3.0).abs() < 1e-6, "u at ({}, {})", x, y);
            assert!((vel.y + 1.5).abs() < 1e-6, "v at ({}, {})", x, y);
        }
    }

    #[test]
    fn test_sample_halfway_between_faces() {
        let mut grid = Grid::new(6, 6, VelocityInit::Zero);
        let a = grid.cell_index(2, 3);
        let b = grid.cell_index(3, 3);
        grid.u[a] = 2.0;
        grid.u[b] = 6.0;
        // Midpoint of the two u faces at (2, 3.5) and (3, 3.5).
        assert!((grid.sample_u(2.5, 3.5) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_out_of_range_clamps() {
        let mut grid = Grid::new(4, 4, VelocityInit::Zero);
        grid.u.fill(2.0);
        grid.v.fill(2.0);
        // Far outside the domain: clamped, never panics, stays in range.
        for &(x, y) in &[(-10.0, -10.0), (100.0, 3.0), (2.0, 100.0)] {
            let vel = grid.sample_velocity(x, y);
            assert!((vel.x - 2.0).abs() < 1e-6);
            assert!((vel.y - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_face_velocity_averages_perpendicular_component() {
        let mut grid = Grid::new(6, 6, VelocityInit::Zero);
        let idx = grid.cell_index(3, 3);
        grid.u[idx] = 1.0;
        for (i, j) in [(2, 3), (3, 3), (2, 4), (3, 4)] {
            let k = grid.cell_index(i, j);
            grid.v[k] = 2.0;
        }
        let vel = grid.velocity_at_u_face(3, 3);
        assert!((vel.x - 1.0).abs() < 1e-6);
        assert!((vel.y - 2.0).abs() < 1e-6);
    }
}
