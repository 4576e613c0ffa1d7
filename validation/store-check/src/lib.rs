//! Validation tooling for inflow stores.
//!
//! Loads a store through the `inflow-reader` readers exactly as an inflow
//! generator would and reports what comes back:
//! - Dataset shapes and time-axis length
//! - Reshaped coordinates
//! - Per-component statistics of single snapshots
//! - A sweep over every stored time step

pub mod logging;
pub mod report;
pub mod sweep;

pub use report::{ComponentStats, PointsReport, SnapshotReport};
pub use sweep::{sweep, SweepResult};
