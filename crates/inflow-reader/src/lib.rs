//! Readers for inflow data stored in HDF5.
//!
//! This crate loads face-center coordinates and velocity snapshots written
//! by a CFD solver and reshapes them for inflow generation by rescaling
//! (Lund et al.). Reshaping is limited to the wall-normal edges of each
//! field: padding a boundary row, trimming rows, pinning boundary
//! coordinates and blending a kept row with the row being dropped.
//!
//! # Store Layout
//!
//! ```text
//! /points/pointsY     (nPointsY, nPointsZ)
//! /points/pointsZ     (nPointsY, nPointsZ)
//! /velocity/uX        (nTimes, nPointsY, nPointsZ)
//! /velocity/uY        (nTimes, nPointsY, nPointsZ)
//! /velocity/uZ        (nTimes, nPointsY, nPointsZ)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use inflow_reader::{make_velocity_reader, read_points, PointsOptions, VelocityOptions, VelocityReader};
//!
//! let points = read_points("inflow.h5", &PointsOptions::new().add_val_bot(0.0).exclude_top(12))?;
//!
//! let reader = make_velocity_reader(
//!     "inflow.h5",
//!     VelocityOptions::new().add_val_bot(0.0).exclude_top(12).interp_val_top(true),
//! );
//! for t in 0..reader.n_times()? {
//!     let snapshot = reader.read(t)?;
//!     // ...
//! }
//! ```

pub mod config;
pub mod edges;
pub mod error;
pub mod layout;
pub mod points;
pub mod store;
pub mod testdata;
pub mod velocity;

// Re-export commonly used types at crate root
pub use config::ReaderConfig;
pub use error::{InflowError, Result};
pub use layout::StoreLayout;
pub use points::{read_points, read_points_with_layout, Points, PointsOptions};
pub use store::{describe_store, silence_hdf5_errors, DatasetShape, StoreSummary};
pub use velocity::{
    make_velocity_reader, make_velocity_reader_with_layout, Hdf5VelocityReader, ReaderKind,
    VelocityOptions, VelocityReader, VelocitySnapshot,
};
