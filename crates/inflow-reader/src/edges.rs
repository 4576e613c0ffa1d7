//! Row-wise edge operations on 2D fields.
//!
//! Every field handled by this crate is an `Array2<f64>` whose rows are
//! wall-normal positions and whose columns are spanwise positions. The
//! readers only ever touch the first and last rows, so everything here works
//! on whole rows.

use ndarray::{concatenate, s, Array1, Array2, ArrayView1, Axis};

use crate::error::{InflowError, Result};

/// A row of `ncols` copies of `value`.
pub fn constant_row(ncols: usize, value: f64) -> Array1<f64> {
    Array1::from_elem(ncols, value)
}

/// Returns a new array with `row` placed in front of the first row.
pub fn prepend_row(arr: &Array2<f64>, row: ArrayView1<f64>) -> Result<Array2<f64>> {
    Ok(concatenate(Axis(0), &[row.view().insert_axis(Axis(0)), arr.view()])?)
}

/// Returns a new array with `row` placed after the last row.
pub fn append_row(arr: &Array2<f64>, row: ArrayView1<f64>) -> Result<Array2<f64>> {
    Ok(concatenate(Axis(0), &[arr.view(), row.view().insert_axis(Axis(0))])?)
}

/// Drops `bottom` leading rows and `top` trailing rows.
///
/// Removing every row is allowed and yields an array with zero rows.
pub fn trim_rows(arr: Array2<f64>, bottom: usize, top: usize) -> Result<Array2<f64>> {
    let rows = arr.nrows();
    if bottom.checked_add(top).map_or(true, |excluded| excluded > rows) {
        return Err(InflowError::row_range(format!(
            "cannot exclude {} bottom and {} top rows from {} rows",
            bottom, top, rows
        )));
    }
    if bottom == 0 && top == 0 {
        return Ok(arr);
    }
    Ok(arr.slice_move(s![bottom..rows - top, ..]))
}

/// Overwrites every entry of row `index` with `value`.
pub fn fill_row(arr: &mut Array2<f64>, index: usize, value: f64) -> Result<()> {
    check_row(arr, index)?;
    arr.row_mut(index).fill(value);
    Ok(())
}

/// Replaces row `target` with the mean of itself and row `other`.
pub fn blend_rows(arr: &mut Array2<f64>, target: usize, other: usize) -> Result<()> {
    check_row(arr, target)?;
    check_row(arr, other)?;
    let neighbour = arr.row(other).to_owned();
    arr.row_mut(target)
        .zip_mut_with(&neighbour, |t, &o| *t = 0.5 * (*t + o));
    Ok(())
}

/// View of the first row, or a row-range error for an empty array.
pub fn first_row(arr: &Array2<f64>) -> Result<ArrayView1<'_, f64>> {
    check_row(arr, 0)?;
    Ok(arr.row(0))
}

fn check_row(arr: &Array2<f64>, index: usize) -> Result<()> {
    if index >= arr.nrows() {
        return Err(InflowError::row_range(format!(
            "row {} does not exist in an array with {} rows",
            index,
            arr.nrows()
        )));
    }
    Ok(())
}
