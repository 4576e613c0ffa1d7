//! Time-indexed velocity readers.
//!
//! A reader is built once from static options and then called with a time
//! index for every snapshot the inflow generator needs. Readers hold only
//! configuration; each call opens the store, reads one plane per velocity
//! component and reshapes it.

use std::fmt;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::edges::{append_row, blend_rows, constant_row, prepend_row, trim_rows};
use crate::error::{InflowError, Result};
use crate::layout::StoreLayout;
use crate::store;

/// Storage backend a velocity reader pulls its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderKind {
    /// HDF5 store with a `(nTimes, nPointsY, nPointsZ)` dataset per component
    Hdf5,
}

impl ReaderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hdf5 => "hdf5",
        }
    }
}

impl fmt::Display for ReaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three velocity components of one time step.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocitySnapshot {
    pub ux: Array2<f64>,
    pub uy: Array2<f64>,
    pub uz: Array2<f64>,
}

impl VelocitySnapshot {
    /// Build a snapshot, checking that all components share one shape.
    pub fn new(ux: Array2<f64>, uy: Array2<f64>, uz: Array2<f64>) -> Result<Self> {
        for (what, component) in [("uY", &uy), ("uZ", &uz)] {
            if component.dim() != ux.dim() {
                return Err(InflowError::ShapeMismatch {
                    what: what.to_string(),
                    expected: ux.dim(),
                    found: component.dim(),
                });
            }
        }
        Ok(Self { ux, uy, uz })
    }

    /// Wall-normal rows; all components share the shape of `ux`.
    pub fn n_points_y(&self) -> usize {
        self.ux.nrows()
    }

    /// Spanwise columns; all components share the shape of `ux`.
    pub fn n_points_z(&self) -> usize {
        self.ux.ncols()
    }

    /// Components in x, y, z order.
    pub fn components(&self) -> [&Array2<f64>; 3] {
        [&self.ux, &self.uy, &self.uz]
    }

    fn try_map<F>(self, mut f: F) -> Result<Self>
    where
        F: FnMut(Array2<f64>) -> Result<Array2<f64>>,
    {
        Ok(Self {
            ux: f(self.ux)?,
            uy: f(self.uy)?,
            uz: f(self.uz)?,
        })
    }

    fn try_for_each<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Array2<f64>) -> Result<()>,
    {
        f(&mut self.ux)?;
        f(&mut self.uy)?;
        f(&mut self.uz)
    }
}

/// How velocity snapshots are reshaped after loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityOptions {
    /// Prepend a row of this value to every component.
    pub add_val_bot: Option<f64>,
    /// Append a row of this value to every component.
    pub add_val_top: Option<f64>,
    /// Rows removed from the bottom, counted after padding.
    pub exclude_bot: usize,
    /// Rows removed from the top, counted after padding.
    pub exclude_top: usize,
    /// Blend the first kept row with the last excluded bottom row.
    pub interp_val_bot: bool,
    /// Blend the last kept row with the first excluded top row.
    pub interp_val_top: bool,
}

impl VelocityOptions {
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

    pub fn interp_val_bot(mut self, enabled: bool) -> Self {
        self.interp_val_bot = enabled;
        self
    }

    pub fn interp_val_top(mut self, enabled: bool) -> Self {
        self.interp_val_top = enabled;
        self
    }

    /// Pad, interpolate and trim a freshly loaded snapshot.
    ///
    /// Interpolation reads rows that are about to be excluded, so it runs
    /// before any truncation.
    pub fn apply(&self, snapshot: VelocitySnapshot) -> Result<VelocitySnapshot> {
        let mut snapshot = snapshot;

        if let Some(value) = self.add_val_bot {
            snapshot =
                snapshot.try_map(|u| prepend_row(&u, constant_row(u.ncols(), value).view()))?;
        }

        if let Some(value) = self.add_val_top {
            snapshot =
                snapshot.try_map(|u| append_row(&u, constant_row(u.ncols(), value).view()))?;
        }

        let n_points_y = snapshot.n_points_y();
        let excluded = self.exclude_bot.checked_add(self.exclude_top);
        if excluded.map_or(true, |excluded| excluded > n_points_y) {
            return Err(InflowError::row_range(format!(
                "cannot exclude {} bottom and {} top rows from {} rows",
                self.exclude_bot, self.exclude_top, n_points_y
            )));
        }
        let topmost_point = n_points_y - self.exclude_top;

        if self.interp_val_top && self.exclude_top > 0 {
            let target = topmost_point.checked_sub(1).ok_or_else(|| {
                InflowError::row_range("no row left below the excluded top rows to interpolate")
            })?;
            debug!(row = target, "Interpolating top row");
            snapshot.try_for_each(|u| blend_rows(u, target, topmost_point))?;
        }

        if self.interp_val_bot && self.exclude_bot > 0 {
            debug!(row = self.exclude_bot, "Interpolating bottom row");
            let exclude_bot = self.exclude_bot;
            snapshot.try_for_each(|u| blend_rows(u, exclude_bot, exclude_bot - 1))?;
        }

        if self.exclude_top > 0 {
            snapshot = snapshot.try_map(|u| trim_rows(u, 0, self.exclude_top))?;
        }

        if self.exclude_bot > 0 {
            snapshot = snapshot.try_map(|u| trim_rows(u, self.exclude_bot, 0))?;
        }

        Ok(snapshot)
    }
}

/// A time-indexed source of velocity snapshots.
pub trait VelocityReader {
    /// Backend the snapshots come from.
    fn kind(&self) -> ReaderKind;

    /// Read and reshape the snapshot at `time_index`.
    fn read(&self, time_index: usize) -> Result<VelocitySnapshot>;
}

/// Velocity reader backed by an HDF5 store.
#[derive(Debug, Clone)]
pub struct Hdf5VelocityReader {
    path: PathBuf,
    layout: StoreLayout,
    options: VelocityOptions,
}

impl Hdf5VelocityReader {
    pub fn new(path: impl Into<PathBuf>, layout: StoreLayout, options: VelocityOptions) -> Self {
        Self {
            path: path.into(),
            layout,
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn options(&self) -> &VelocityOptions {
        &self.options
    }

    /// Number of stored time steps, taken from the `uX` dataset.
    pub fn n_times(&self) -> Result<usize> {
        let file = store::open_store(&self.path)?;
        let velocity = store::group(&file, &self.layout.velocity_group)?;
        let ds = store::dataset(&velocity, &self.layout.u_x)?;
        store::time_axis_len(&ds, &self.layout.u_x)
    }

    fn load(&self, time_index: usize) -> Result<VelocitySnapshot> {
        let file = store::open_store(&self.path)?;
        let velocity = store::group(&file, &self.layout.velocity_group)?;
        let [u_x, u_y, u_z] = self.layout.velocity_components();
        VelocitySnapshot::new(
            store::read_time_slice(&velocity, u_x, time_index)?,
            store::read_time_slice(&velocity, u_y, time_index)?,
            store::read_time_slice(&velocity, u_z, time_index)?,
        )
    }
}

impl VelocityReader for Hdf5VelocityReader {
    fn kind(&self) -> ReaderKind {
        ReaderKind::Hdf5
    }

    fn read(&self, time_index: usize) -> Result<VelocitySnapshot> {
        let snapshot = self.options.apply(self.load(time_index)?)?;
        info!(
            path = %self.path.display(),
            time_index,
            n_points_y = snapshot.n_points_y(),
            "Read velocity snapshot"
        );
        Ok(snapshot)
    }
}

/// Build a velocity reader for a store with the default layout.
pub fn make_velocity_reader(
    path: impl Into<PathBuf>,
    options: VelocityOptions,
) -> Hdf5VelocityReader {
    Hdf5VelocityReader::new(path, StoreLayout::default(), options)
}

/// Build a velocity reader for a store with a custom layout.
pub fn make_velocity_reader_with_layout(
    path: impl Into<PathBuf>,
    layout: StoreLayout,
    options: VelocityOptions,
) -> Hdf5VelocityReader {
    Hdf5VelocityReader::new(path, layout, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    /// Four wall-normal rows, component k scaled by k + 1.
    fn snapshot() -> VelocitySnapshot {
        let base = array![[0.0, 0.0], [2.0, 4.0], [4.0, 8.0], [6.0, 12.0]];
        VelocitySnapshot::new(base.clone(), &base * 2.0, &base * 3.0).unwrap()
    }

    #[test]
    fn test_reader_kind_tag() {
        assert_eq!(ReaderKind::Hdf5.as_str(), "hdf5");
        assert_eq!(ReaderKind::Hdf5.to_string(), "hdf5");
        let reader = make_velocity_reader("unused.h5", VelocityOptions::default());
        assert_eq!(reader.kind(), ReaderKind::Hdf5);
    }

    #[test]
    fn test_padding_applies_to_all_components() {
        let result = VelocityOptions::new()
            .add_val_bot(0.5)
            .add_val_top(9.0)
            .apply(snapshot())
            .unwrap();

        assert_eq!(result.n_points_y(), 6);
        for u in result.components() {
            assert_eq!(u.row(0).to_vec(), vec![0.5, 0.5]);
            assert_eq!(u.row(5).to_vec(), vec![9.0, 9.0]);
        }
    }

    #[test]
    fn test_interp_bottom_before_trim() {
        let original = snapshot();
        let result = VelocityOptions::new()
            .exclude_bot(1)
            .interp_val_bot(true)
            .apply(original.clone())
            .unwrap();

        assert_eq!(result.n_points_y(), 3);
        assert_eq!(result.ux.row(0).to_vec(), vec![1.0, 2.0]);
        assert_eq!(result.uy.row(0).to_vec(), vec![2.0, 4.0]);
        assert_eq!(result.uz.row(0).to_vec(), vec![3.0, 6.0]);
        assert_eq!(result.ux.row(1), original.ux.row(2));
    }

    #[test]
    fn test_interp_top_before_trim() {
        let base = array![[0.0], [1.0], [2.0], [3.0], [5.0]];
        let original = VelocitySnapshot::new(base.clone(), base.clone(), base).unwrap();
        let result = VelocityOptions::new()
            .exclude_top(1)
            .interp_val_top(true)
            .apply(original)
            .unwrap();

        assert_eq!(result.n_points_y(), 4);
        // Row 3 is the mean of original rows 3 and 4, row 4 is gone
        assert_eq!(result.ux[[3, 0]], 4.0);
        assert_eq!(result.uz.column(0).to_vec(), vec![0.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_interp_without_exclude_is_noop() {
        let original = snapshot();
        let result = VelocityOptions::new()
            .interp_val_bot(true)
            .interp_val_top(true)
            .apply(original.clone())
            .unwrap();
        assert_eq!(result, original);
    }

    #[test]
    fn test_exclude_without_interp() {
        let original = snapshot();
        let result = VelocityOptions::new()
            .exclude_bot(1)
            .exclude_top(1)
            .apply(original.clone())
            .unwrap();
        assert_eq!(result.ux, original.ux.slice(ndarray::s![1..3, ..]));
    }

    #[test]
    fn test_pad_and_interp_against_wall_value() {
        // Padding a zero wall row then excluding it with interpolation puts
        // the half-way value in the first kept row.
        let result = VelocityOptions::new()
            .add_val_bot(0.0)
            .exclude_bot(1)
            .interp_val_bot(true)
            .apply(snapshot())
            .unwrap();
        assert_eq!(result.n_points_y(), 4);
        assert_eq!(result.ux.row(0).to_vec(), vec![0.0, 0.0]);
        assert_eq!(result.ux.row(1).to_vec(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_excluding_all_top_rows_with_interp_fails() {
        let result = VelocityOptions::new()
            .exclude_top(4)
            .interp_val_top(true)
            .apply(snapshot());
        assert!(matches!(result, Err(InflowError::RowRange(_))));
    }

    #[test]
    fn test_interp_bottom_needs_a_kept_row() {
        let result = VelocityOptions::new()
            .exclude_bot(4)
            .interp_val_bot(true)
            .apply(snapshot());
        assert!(matches!(result, Err(InflowError::RowRange(_))));
    }

    #[test]
    fn test_huge_exclude_counts_fail() {
        let result = VelocityOptions::new()
            .exclude_bot(usize::MAX)
            .exclude_top(1)
            .apply(snapshot());
        assert!(matches!(result, Err(InflowError::RowRange(_))));

        let result = VelocityOptions::new()
            .exclude_top(usize::MAX)
            .interp_val_top(true)
            .apply(snapshot());
        assert!(matches!(result, Err(InflowError::RowRange(_))));
    }

    #[test]
    fn test_top_blend_runs_before_bottom_blend() {
        // With three rows both blends target row 1; the bottom blend sees the
        // row already averaged with row 2.
        let base = array![[0.0, 8.0], [4.0, 4.0], [8.0, 0.0]];
        let original = VelocitySnapshot::new(base.clone(), &base * 2.0, base).unwrap();
        let result = VelocityOptions::new()
            .exclude_bot(1)
            .exclude_top(1)
            .interp_val_bot(true)
            .interp_val_top(true)
            .apply(original)
            .unwrap();

        assert_eq!(result.n_points_y(), 1);
        // 0.5 * (r0 + 0.5 * (r1 + r2))
        assert_eq!(result.ux.row(0).to_vec(), vec![3.0, 5.0]);
        assert_eq!(result.uy.row(0).to_vec(), vec![6.0, 10.0]);
        assert_eq!(result.uz.row(0).to_vec(), vec![3.0, 5.0]);
    }

    #[test]
    fn test_mismatched_components_fail() {
        let ux = Array2::zeros((3, 2));
        let uy = Array2::zeros((3, 2));
        let uz = Array2::zeros((2, 2));
        let result = VelocitySnapshot::new(ux, uy, uz);
        assert!(matches!(
            result,
            Err(InflowError::ShapeMismatch { ref what, .. }) if what == "uZ"
        ));
    }
}
