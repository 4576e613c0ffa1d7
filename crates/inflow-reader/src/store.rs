//! HDF5 store access.
//!
//! Every public reader opens the store, pulls the arrays it needs and drops
//! the file handle before returning. Nothing here caches a handle, so a store
//! that is rewritten between calls is always seen fresh.

use std::path::Path;
use std::sync::Once;

use ndarray::{Array2, Ix2};
use serde::Serialize;
use tracing::debug;

use crate::error::{InflowError, Result};
use crate::layout::StoreLayout;

/// Silence HDF5's automatic error printing to stderr.
///
/// Failed lookups are turned into [`InflowError`] values; without this the C
/// library would additionally dump its own error stack for each of them.
/// Safe to call any number of times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        hdf5::silence_errors(true);
    });
}

/// Open a store read-only.
pub(crate) fn open_store(path: &Path) -> Result<hdf5::File> {
    silence_hdf5_errors();
    debug!(path = %path.display(), "Opening HDF5 store");
    hdf5::File::open(path).map_err(|e| {
        if !path.exists() {
            InflowError::missing_data(format!("store {} does not exist", path.display()))
        } else {
            InflowError::Hdf5(e)
        }
    })
}

pub(crate) fn group(file: &hdf5::File, name: &str) -> Result<hdf5::Group> {
    if !file.link_exists(name) {
        return Err(InflowError::missing_data(format!(
            "group '{}' in {}",
            name,
            file.filename()
        )));
    }
    Ok(file.group(name)?)
}

pub(crate) fn dataset(group: &hdf5::Group, name: &str) -> Result<hdf5::Dataset> {
    if !group.link_exists(name) {
        return Err(InflowError::missing_data(format!(
            "dataset '{}' in group '{}'",
            name,
            group.name()
        )));
    }
    Ok(group.dataset(name)?)
}

/// Read a whole 2D dataset.
pub(crate) fn read_2d(group: &hdf5::Group, name: &str) -> Result<Array2<f64>> {
    let ds = dataset(group, name)?;
    Ok(ds.read_2d::<f64>()?)
}

/// Read the `(time_index, .., ..)` plane of a 3D dataset.
pub(crate) fn read_time_slice(
    group: &hdf5::Group,
    name: &str,
    time_index: usize,
) -> Result<Array2<f64>> {
    let ds = dataset(group, name)?;
    let n_times = time_axis_len(&ds, name)?;
    if time_index >= n_times {
        return Err(InflowError::TimeIndexOutOfRange {
            index: time_index,
            n_times,
        });
    }
    Ok(ds.read_slice::<f64, _, Ix2>((time_index, .., ..))?)
}

pub(crate) fn time_axis_len(ds: &hdf5::Dataset, name: &str) -> Result<usize> {
    let shape = ds.shape();
    if shape.len() != 3 {
        return Err(InflowError::missing_data(format!(
            "dataset '{}' has {} dimensions, expected (nTimes, nPointsY, nPointsZ)",
            name,
            shape.len()
        )));
    }
    Ok(shape[0])
}

/// Shape of one dataset in a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetShape {
    /// Path of the dataset inside the store, e.g. `points/pointsY`
    pub path: String,
    pub shape: Vec<usize>,
}

/// Dataset shapes and time-axis length of a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSummary {
    pub datasets: Vec<DatasetShape>,
    /// Length of the time axis of the first velocity component
    pub n_times: usize,
}

/// Report the shape of every dataset named by `layout`.
pub fn describe_store(path: impl AsRef<Path>, layout: &StoreLayout) -> Result<StoreSummary> {
    let file = open_store(path.as_ref())?;

    let mut datasets = Vec::with_capacity(5);

    let points = group(&file, &layout.points_group)?;
    for name in [layout.points_y.as_str(), layout.points_z.as_str()] {
        let ds = dataset(&points, name)?;
        datasets.push(DatasetShape {
            path: format!("{}/{}", layout.points_group, name),
            shape: ds.shape(),
        });
    }

    let velocity = group(&file, &layout.velocity_group)?;
    let mut n_times = None;
    for name in layout.velocity_components() {
        let ds = dataset(&velocity, name)?;
        if n_times.is_none() {
            n_times = Some(time_axis_len(&ds, name)?);
        }
        datasets.push(DatasetShape {
            path: format!("{}/{}", layout.velocity_group, name),
            shape: ds.shape(),
        });
    }

    Ok(StoreSummary {
        datasets,
        n_times: n_times.unwrap_or(0),
    })
}
