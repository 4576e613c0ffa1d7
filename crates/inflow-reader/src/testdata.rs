//! Synthetic channel-flow stores for tests and tooling.
//!
//! The generated fields follow simple closed forms so that readers can be
//! checked value by value:
//!
//! - `pointsY[j, k]` = cell-centred wall-normal position of row `j`
//! - `pointsZ[j, k]` = cell-centred spanwise position of column `k`
//! - `uX[t, j, k]` = `t + pointsY[j, k]` (monotone in the wall distance)
//! - `uY[t, j, k]` = `-uX[t, j, k]`
//! - `uZ[t, j, k]` = `0.01 * k`

use std::path::Path;

use ndarray::{Array2, Array3};
use tracing::debug;

use crate::error::Result;
use crate::layout::StoreLayout;
use crate::points::Points;

/// Velocity components over the whole time series.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocitySeries {
    pub ux: Array3<f64>,
    pub uy: Array3<f64>,
    pub uz: Array3<f64>,
}

/// Face-center coordinates of a channel cross-section with `n_y` cells
/// across `[0, half_width]` and `n_z` cells across `[0, span]`.
pub fn channel_points(n_y: usize, n_z: usize, half_width: f64, span: f64) -> Points {
    let dy = half_width / n_y as f64;
    let dz = span / n_z as f64;
    Points {
        y: Array2::from_shape_fn((n_y, n_z), |(j, _)| (j as f64 + 0.5) * dy),
        z: Array2::from_shape_fn((n_y, n_z), |(_, k)| (k as f64 + 0.5) * dz),
    }
}

/// Velocity series matching [`channel_points`] with unit half-width.
pub fn channel_velocity(n_times: usize, n_y: usize, n_z: usize) -> VelocitySeries {
    let dy = 1.0 / n_y as f64;
    let ux = Array3::from_shape_fn((n_times, n_y, n_z), |(t, j, _)| t as f64 + (j as f64 + 0.5) * dy);
    let uy = ux.mapv(|u| -u);
    let uz = Array3::from_shape_fn((n_times, n_y, n_z), |(_, _, k)| 0.01 * k as f64);
    VelocitySeries { ux, uy, uz }
}

/// Write points and velocity to a new store at `path`.
pub fn write_store(
    path: &Path,
    layout: &StoreLayout,
    points: &Points,
    velocity: &VelocitySeries,
) -> Result<()> {
    debug!(path = %path.display(), "Writing inflow store");
    let file = hdf5::File::create(path)?;

    let group = file.create_group(&layout.points_group)?;
    for (name, data) in [(&layout.points_y, &points.y), (&layout.points_z, &points.z)] {
        let ds = group.new_dataset::<f64>().shape(data.dim()).create(name.as_str())?;
        ds.write(data)?;
    }

    let group = file.create_group(&layout.velocity_group)?;
    let components = [
        (&layout.u_x, &velocity.ux),
        (&layout.u_y, &velocity.uy),
        (&layout.u_z, &velocity.uz),
    ];
    for (name, data) in components {
        let ds = group.new_dataset::<f64>().shape(data.dim()).create(name.as_str())?;
        ds.write(data)?;
    }

    Ok(())
}

/// Write a channel store with the default layout and unit half-width.
///
/// Returns the data that was written, for verification in tests.
pub fn write_channel_store(
    path: &Path,
    n_times: usize,
    n_y: usize,
    n_z: usize,
) -> Result<(Points, VelocitySeries)> {
    let points = channel_points(n_y, n_z, 1.0, 2.0);
    let velocity = channel_velocity(n_times, n_y, n_z);
    write_store(path, &StoreLayout::default(), &points, &velocity)?;
    Ok((points, velocity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_points() {
        let points = channel_points(4, 2, 1.0, 2.0);
        assert_eq!(points.y.dim(), (4, 2));
        assert_eq!(points.y.column(0).to_vec(), vec![0.125, 0.375, 0.625, 0.875]);
        assert_eq!(points.z.row(3).to_vec(), vec![0.5, 1.5]);
    }

    #[test]
    fn test_channel_velocity() {
        let velocity = channel_velocity(3, 4, 2);
        assert_eq!(velocity.ux.dim(), (3, 4, 2));
        assert_eq!(velocity.ux[[2, 0, 1]], 2.125);
        assert_eq!(velocity.uy[[2, 0, 1]], -2.125);
        assert_eq!(velocity.uz[[0, 3, 1]], 0.01);
    }
}
