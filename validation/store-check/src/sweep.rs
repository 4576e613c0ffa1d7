//! Sweep over every stored time step.

use inflow_reader::{Result, VelocityReader};
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of reading every snapshot of a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepResult {
    pub snapshots: usize,
    /// Shape of the first snapshot read
    pub shape: Option<(usize, usize)>,
    pub problems: Vec<String>,
}

impl SweepResult {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Read time indices `0..n_times` and check that every snapshot has the
/// shape of the first one and holds only finite values.
///
/// Read errors abort the sweep; content problems are collected.
pub fn sweep<R: VelocityReader>(reader: &R, n_times: usize) -> Result<SweepResult> {
    let mut result = SweepResult::default();

    for time_index in 0..n_times {
        let snapshot = reader.read(time_index)?;
        result.snapshots += 1;
        debug!(time_index, "Checked snapshot");

        let shape = snapshot.ux.dim();
        match result.shape {
            None => result.shape = Some(shape),
            Some(expected) if expected != shape => {
                let problem = format!(
                    "t={}: shape {:?} differs from {:?}",
                    time_index, shape, expected
                );
                warn!("{}", problem);
                result.problems.push(problem);
            }
            Some(_) => {}
        }

        for (name, component) in ["uX", "uY", "uZ"].iter().zip(snapshot.components()) {
            let non_finite = component.iter().filter(|v| !v.is_finite()).count();
            if non_finite > 0 {
                let problem = format!(
                    "t={}: {} has {} non-finite values",
                    time_index, name, non_finite
                );
                warn!("{}", problem);
                result.problems.push(problem);
            }
        }
    }

    Ok(result)
}
