//! Group and dataset names of an inflow store.

use serde::{Deserialize, Serialize};

/// Names of the groups and datasets a store is read from.
///
/// The default is the layout written by the solver post-processing:
///
/// ```text
/// /points/pointsY     (nPointsY, nPointsZ)
/// /points/pointsZ     (nPointsY, nPointsZ)
/// /velocity/uX        (nTimes, nPointsY, nPointsZ)
/// /velocity/uY        (nTimes, nPointsY, nPointsZ)
/// /velocity/uZ        (nTimes, nPointsY, nPointsZ)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreLayout {
    pub points_group: String,
    pub points_y: String,
    pub points_z: String,
    pub velocity_group: String,
    pub u_x: String,
    pub u_y: String,
    pub u_z: String,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self {
            points_group: "points".to_string(),
            points_y: "pointsY".to_string(),
            points_z: "pointsZ".to_string(),
            velocity_group: "velocity".to_string(),
            u_x: "uX".to_string(),
            u_y: "uY".to_string(),
            u_z: "uZ".to_string(),
        }
    }
}

impl StoreLayout {
    /// Velocity component dataset names in x, y, z order.
    pub fn velocity_components(&self) -> [&str; 3] {
        [&self.u_x, &self.u_y, &self.u_z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = StoreLayout::default();
        assert_eq!(layout.points_group, "points");
        assert_eq!(layout.velocity_components(), ["uX", "uY", "uZ"]);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let layout: StoreLayout = serde_yaml::from_str("velocity_group: flow\n").unwrap();
        assert_eq!(layout.velocity_group, "flow");
        assert_eq!(layout.points_y, "pointsY");
    }
}
