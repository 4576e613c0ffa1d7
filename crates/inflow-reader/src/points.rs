//! Face-center coordinates of the inflow plane.
//!
//! Rescaling following Lund et al. needs an interpolant that covers the whole
//! interval `[0, delta]` in the wall-normal direction. A finite-volume grid
//! has no face centers on the wall or on the channel center line, so callers
//! typically pad a row at the wall, drop the rows beyond the half-width and
//! pin the last row to `delta`.

use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::edges::{append_row, constant_row, fill_row, first_row, prepend_row, trim_rows};
use crate::error::{InflowError, Result};
use crate::layout::StoreLayout;
use crate::store;

/// Wall-normal (`y`) and spanwise (`z`) coordinates of the face centers.
///
/// Both arrays have shape `(nPointsY, nPointsZ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    pub y: Array2<f64>,
    pub z: Array2<f64>,
}

impl Points {
    /// Wall-normal rows; `y` and `z` always share one shape.
    pub fn n_points_y(&self) -> usize {
        self.y.nrows()
    }

    /// Spanwise columns; `y` and `z` always share one shape.
    pub fn n_points_z(&self) -> usize {
        self.y.ncols()
    }
}

/// How the coordinate arrays are reshaped after loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsOptions {
    /// Prepend a row with this `y` value.
    pub add_val_bot: Option<f64>,
    /// Append a row with this `y` value.
    pub add_val_top: Option<f64>,
    /// Rows removed from the bottom, counted after padding.
    pub exclude_bot: usize,
    /// Rows removed from the top, counted after padding.
    pub exclude_top: usize,
    /// Overwrite the first `y` row with this value.
    pub exchange_val_bot: Option<f64>,
    /// Overwrite the last `y` row with this value.
    pub exchange_val_top: Option<f64>,
}

impl PointsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_val_bot(mut self, value: f64) -> Self {
        self.add_val_bot = Some(value);
        self
    }

    pub fn add_val_top(mut self, value: f64) -> Self {
        self.add_val_top = Some(value);
        self
    }

    pub fn exclude_bot(mut self, rows: usize) -> Self {
        self.exclude_bot = rows;
        self
    }

    pub fn exclude_top(mut self, rows: usize) -> Self {
        self.exclude_top = rows;
        self
    }

    pub fn exchange_val_bot(mut self, value: f64) -> Self {
        self.exchange_val_bot = Some(value);
        self
    }

    pub fn exchange_val_top(mut self, value: f64) -> Self {
        self.exchange_val_top = Some(value);
        self
    }

    /// Pad, trim and exchange freshly loaded coordinate arrays.
    ///
    /// A padded `z` row is always a copy of the current first `z` row, for
    /// the top pad as well as for the bottom one.
    pub fn apply(&self, y: Array2<f64>, z: Array2<f64>) -> Result<Points> {
        if y.dim() != z.dim() {
            return Err(InflowError::ShapeMismatch {
                what: "pointsZ".to_string(),
                expected: y.dim(),
                found: z.dim(),
            });
        }

        let (mut y, mut z) = (y, z);

        if let Some(value) = self.add_val_bot {
            debug!(value, "Prepending wall-normal row");
            let z_row = first_row(&z)?.to_owned();
            y = prepend_row(&y, constant_row(y.ncols(), value).view())?;
            z = prepend_row(&z, z_row.view())?;
        }

        if let Some(value) = self.add_val_top {
            debug!(value, "Appending wall-normal row");
            let z_row = first_row(&z)?.to_owned();
            y = append_row(&y, constant_row(y.ncols(), value).view())?;
            z = append_row(&z, z_row.view())?;
        }

        if self.exclude_top > 0 || self.exclude_bot > 0 {
            debug!(
                exclude_bot = self.exclude_bot,
                exclude_top = self.exclude_top,
                rows = y.nrows(),
                "Trimming wall-normal rows"
            );
            y = trim_rows(y, 0, self.exclude_top)?;
            z = trim_rows(z, 0, self.exclude_top)?;
            y = trim_rows(y, self.exclude_bot, 0)?;
            z = trim_rows(z, self.exclude_bot, 0)?;
        }

        if let Some(value) = self.exchange_val_bot {
            fill_row(&mut y, 0, value)?;
        }

        if let Some(value) = self.exchange_val_top {
            let last = y.nrows().checked_sub(1).ok_or_else(|| {
                InflowError::row_range("cannot exchange the top row of an empty array")
            })?;
            fill_row(&mut y, last, value)?;
        }

        Ok(Points { y, z })
    }
}

/// Read the face-center coordinates from the default store layout.
pub fn read_points(path: impl AsRef<Path>, options: &PointsOptions) -> Result<Points> {
    read_points_with_layout(path, &StoreLayout::default(), options)
}

/// Read the face-center coordinates from a store with a custom layout.
pub fn read_points_with_layout(
    path: impl AsRef<Path>,
    layout: &StoreLayout,
    options: &PointsOptions,
) -> Result<Points> {
    let path = path.as_ref();
    let (y, z) = {
        let file = store::open_store(path)?;
        let points = store::group(&file, &layout.points_group)?;
        (
            store::read_2d(&points, &layout.points_y)?,
            store::read_2d(&points, &layout.points_z)?,
        )
    };

    let points = options.apply(y, z)?;
    info!(
        path = %path.display(),
        n_points_y = points.n_points_y(),
        n_points_z = points.n_points_z(),
        "Read points"
    );
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> (Array2<f64>, Array2<f64>) {
        let y = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let z = array![[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]];
        (y, z)
    }

    #[test]
    fn test_no_options_is_identity() {
        let (y, z) = sample();
        let points = PointsOptions::default().apply(y.clone(), z.clone()).unwrap();
        assert_eq!(points.y, y);
        assert_eq!(points.z, z);
    }

    #[test]
    fn test_add_bottom_copies_first_z_row() {
        let (y, z) = sample();
        let points = PointsOptions::new()
            .add_val_bot(0.0)
            .apply(y, z.clone())
            .unwrap();

        assert_eq!(points.y.dim(), (4, 2));
        assert_eq!(points.y.row(0).to_vec(), vec![0.0, 0.0]);
        assert_eq!(points.y.row(1).to_vec(), vec![1.0, 1.0]);
        assert_eq!(points.z.row(0), z.row(0));
        assert_eq!(points.z.row(1), z.row(0));
    }

    #[test]
    fn test_add_top_copies_first_z_row() {
        let (y, z) = sample();
        let points = PointsOptions::new()
            .add_val_top(4.0)
            .apply(y, z.clone())
            .unwrap();

        assert_eq!(points.n_points_y(), 4);
        assert_eq!(points.y.row(3).to_vec(), vec![4.0, 4.0]);
        // The first row, not the neighbouring top row
        assert_eq!(points.z.row(3), z.row(0));
        assert_ne!(points.z.row(3), z.row(2));
    }

    #[test]
    fn test_exclude_counts_after_padding() {
        let (y, z) = sample();
        let points = PointsOptions::new()
            .add_val_bot(0.0)
            .add_val_top(4.0)
            .exclude_bot(1)
            .exclude_top(2)
            .apply(y, z)
            .unwrap();

        // 3 rows + 2 padded - 1 - 2
        assert_eq!(points.n_points_y(), 2);
        assert_eq!(points.y, array![[1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(points.z, array![[0.1, 0.2], [0.3, 0.4]]);
    }

    #[test]
    fn test_pad_then_trim_same_side_is_noop() {
        let (y, z) = sample();
        let points = PointsOptions::new()
            .add_val_top(42.0)
            .exclude_top(1)
            .apply(y.clone(), z.clone())
            .unwrap();
        assert_eq!(points.y, y);
        assert_eq!(points.z, z);
    }

    #[test]
    fn test_exchange_only_touches_y() {
        let (y, z) = sample();
        let points = PointsOptions::new()
            .exclude_top(1)
            .exchange_val_bot(0.0)
            .exchange_val_top(1.5)
            .apply(y, z.clone())
            .unwrap();

        assert_eq!(points.y, array![[0.0, 0.0], [1.5, 1.5]]);
        assert_eq!(points.z, z.slice(ndarray::s![..2, ..]));
    }

    #[test]
    fn test_excluding_too_many_rows_fails() {
        let (y, z) = sample();
        let result = PointsOptions::new().exclude_bot(2).exclude_top(2).apply(y, z);
        assert!(matches!(result, Err(InflowError::RowRange(_))));
    }

    #[test]
    fn test_huge_exclude_counts_fail() {
        let (y, z) = sample();
        let result = PointsOptions::new()
            .exclude_bot(usize::MAX)
            .exclude_top(1)
            .apply(y.clone(), z.clone());
        assert!(matches!(result, Err(InflowError::RowRange(_))));

        let result = PointsOptions::new().exclude_top(usize::MAX).apply(y, z);
        assert!(matches!(result, Err(InflowError::RowRange(_))));
    }

    #[test]
    fn test_exchange_on_empty_result_fails() {
        let (y, z) = sample();
        let result = PointsOptions::new()
            .exclude_top(3)
            .exchange_val_top(1.0)
            .apply(y, z);
        assert!(matches!(result, Err(InflowError::RowRange(_))));
    }

    #[test]
    fn test_mismatched_shapes_fail() {
        let (y, _) = sample();
        let z = Array2::zeros((2, 2));
        let result = PointsOptions::default().apply(y, z);
        assert!(matches!(result, Err(InflowError::ShapeMismatch { .. })));
    }
}
