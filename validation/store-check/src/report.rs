//! Report building and formatting.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use inflow_reader::{Points, StoreSummary, VelocitySnapshot};
use ndarray::Array2;
use serde::Serialize;

use crate::sweep::SweepResult;

/// Min / max / mean of one velocity component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentStats {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ComponentStats {
    pub fn from_array(name: &str, arr: &Array2<f64>) -> Self {
        let min = arr.iter().copied().fold(f64::INFINITY, f64::min);
        let max = arr.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = arr.mean().unwrap_or(f64::NAN);
        Self {
            name: name.to_string(),
            min,
            max,
            mean,
        }
    }
}

/// Summary of one reshaped velocity snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotReport {
    pub reader: String,
    pub time_index: usize,
    pub shape: (usize, usize),
    pub components: Vec<ComponentStats>,
}

impl SnapshotReport {
    pub fn new(reader: &str, time_index: usize, snapshot: &VelocitySnapshot) -> Self {
        let components = ["uX", "uY", "uZ"]
            .iter()
            .zip(snapshot.components())
            .map(|(name, arr)| ComponentStats::from_array(name, arr))
            .collect();
        Self {
            reader: reader.to_string(),
            time_index,
            shape: snapshot.ux.dim(),
            components,
        }
    }
}

/// Summary of reshaped coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsReport {
    pub shape: (usize, usize),
    /// First `pointsY` row
    pub y_bottom: Vec<f64>,
    /// Last `pointsY` row
    pub y_top: Vec<f64>,
    /// First `pointsZ` row
    pub z_bottom: Vec<f64>,
}

impl PointsReport {
    pub fn new(points: &Points) -> Self {
        let row = |arr: &Array2<f64>, index: Option<usize>| {
            index
                .filter(|&i| i < arr.nrows())
                .map(|i| arr.row(i).to_vec())
                .unwrap_or_default()
        };
        let last = points.y.nrows().checked_sub(1);
        Self {
            shape: points.y.dim(),
            y_bottom: row(&points.y, Some(0)),
            y_top: row(&points.y, last),
            z_bottom: row(&points.z, Some(0)),
        }
    }
}

fn new_table(title: String) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![title]);
    table
}

fn format_row(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.6}", v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a store summary as a console table.
pub fn format_summary_table(summary: &StoreSummary) -> String {
    let mut table = new_table("Store Summary".to_string());
    for dataset in &summary.datasets {
        table.add_row(vec![dataset.path.clone(), format!("{:?}", dataset.shape)]);
    }
    table.add_row(vec!["Times:".to_string(), summary.n_times.to_string()]);
    table.to_string()
}

/// Format a points report as a console table.
pub fn format_points_table(report: &PointsReport) -> String {
    let mut table = new_table("Points".to_string());
    table.add_row(vec![
        "Shape:".to_string(),
        format!("{} x {}", report.shape.0, report.shape.1),
    ]);
    table.add_row(vec!["pointsY bottom:".to_string(), format_row(&report.y_bottom)]);
    table.add_row(vec!["pointsY top:".to_string(), format_row(&report.y_top)]);
    table.add_row(vec!["pointsZ bottom:".to_string(), format_row(&report.z_bottom)]);
    table.to_string()
}

/// Format a snapshot report as a console table.
pub fn format_snapshot_table(report: &SnapshotReport) -> String {
    let mut table = new_table(format!(
        "Velocity t={} ({} reader)",
        report.time_index, report.reader
    ));
    table.add_row(vec![
        "Shape:".to_string(),
        format!("{} x {}", report.shape.0, report.shape.1),
    ]);
    table.add_row(vec!["".to_string(), "min / max / mean".to_string()]);
    for stats in &report.components {
        table.add_row(vec![
            stats.name.clone(),
            format!("{:.6} / {:.6} / {:.6}", stats.min, stats.max, stats.mean),
        ]);
    }
    table.to_string()
}

/// Format a sweep result as a console table.
pub fn format_sweep_table(result: &SweepResult) -> String {
    let mut table = new_table("Velocity Sweep".to_string());
    table.add_row(vec!["Snapshots read:".to_string(), result.snapshots.to_string()]);
    table.add_row(vec![
        "Shape:".to_string(),
        result
            .shape
            .map(|(y, z)| format!("{} x {}", y, z))
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec!["Problems:".to_string(), result.problems.len().to_string()]);
    for problem in &result.problems {
        table.add_row(vec!["".to_string(), problem.clone()]);
    }
    table.to_string()
}

/// Format any report as pretty JSON.
pub fn format_json<T: Serialize>(report: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_component_stats() {
        let stats = ComponentStats::from_array("uX", &array![[1.0, 2.0], [3.0, 6.0]]);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 6.0);
        assert_eq!(stats.mean, 3.0);
    }

    #[test]
    fn test_points_report_of_empty_points() {
        let points = Points {
            y: Array2::zeros((0, 3)),
            z: Array2::zeros((0, 3)),
        };
        let report = PointsReport::new(&points);
        assert_eq!(report.shape, (0, 3));
        assert!(report.y_bottom.is_empty());
        assert!(report.y_top.is_empty());
    }

    #[test]
    fn test_snapshot_table_mentions_reader() {
        let base = array![[1.0, 2.0]];
        let snapshot = VelocitySnapshot::new(base.clone(), base.clone(), base).unwrap();
        let report = SnapshotReport::new("hdf5", 7, &snapshot);
        let table = format_snapshot_table(&report);
        assert!(table.contains("t=7"));
        assert!(table.contains("hdf5"));

        let json = format_json(&report).unwrap();
        assert!(json.contains("\"time_index\": 7"));
    }
}
