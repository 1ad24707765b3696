//! Stress test result records and tabular conversion.
//!
//! Results are produced fresh by each scenario run and owned by the caller.
//! `ScenarioTable` is the text-report form: one row per position, one
//! aggregate row per bucket, one column per formatted shock point.

use std::collections::HashMap;
use std::fmt;

use stress_core::{Float, InstrumentKind};

/// Per-position outcome of one scenario run.
///
/// `stress_points` is the display axis and is shared across all positions
/// of one run; in idiosyncratic mode it holds the normalized fraction axis
/// while the applied shocks were the position's own underlying values.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StressResult<T: Float> {
    /// Name of the scenario that produced this result.
    pub scenario_name: String,
    /// Position identifier.
    pub position_id: String,
    /// Underlying symbol the position is grouped under.
    pub underlying: String,
    /// Kind tag of the priced instrument.
    pub instrument_kind: InstrumentKind,
    /// Signed position quantity.
    pub quantity: T,
    /// Unshocked position value (quantity × base unit price).
    pub base_value: T,
    /// Display axis, index-aligned with `pnl_values`.
    pub stress_points: Vec<T>,
    /// P&L at each stress point.
    pub pnl_values: Vec<T>,
}

/// Aggregate outcome of one scenario run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioResults<T: Float> {
    /// Scenario name.
    pub scenario_name: String,
    /// Canonical display axis for the whole run.
    pub stress_points: Vec<T>,
    /// Per-position results, in portfolio order.
    pub position_results: Vec<StressResult<T>>,
    /// Bucketed elementwise P&L sums; iteration order is unspecified.
    pub aggregation_results: HashMap<String, Vec<T>>,
}

impl<T: Float> ScenarioResults<T> {
    /// Aggregated P&L array for one bucket.
    pub fn aggregation(&self, bucket: &str) -> Option<&[T]> {
        self.aggregation_results.get(bucket).map(Vec::as_slice)
    }
}

/// Metadata columns leading every scenario table.
const META_COLUMNS: [&str; 6] = [
    "scenario",
    "underlying",
    "position_id",
    "instrument_kind",
    "quantity",
    "base_value",
];

/// A formatted scenario report.
///
/// Shock-point columns are the axis values formatted to 3 decimal places,
/// after the identifying metadata columns. Aggregate rows follow the
/// position rows, one per bucket, sorted by bucket key for stable output.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ScenarioTable {
    /// Build the table form of a scenario's results.
    pub fn from_results<T: Float + fmt::Display>(results: &ScenarioResults<T>) -> Self {
        let mut columns: Vec<String> = META_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(results.stress_points.iter().map(|p| format!("{p:.3}")));

        let mut rows = Vec::with_capacity(
            results.position_results.len() + results.aggregation_results.len(),
        );
        for result in &results.position_results {
            let mut row = vec![
                result.scenario_name.clone(),
                result.underlying.clone(),
                result.position_id.clone(),
                result.instrument_kind.to_string(),
                format!("{:.2}", result.quantity),
                format!("{:.2}", result.base_value),
            ];
            row.extend(result.pnl_values.iter().map(|v| format!("{v:.2}")));
            rows.push(row);
        }

        let mut buckets: Vec<&String> = results.aggregation_results.keys().collect();
        buckets.sort();
        for bucket in buckets {
            let mut row = vec![
                results.scenario_name.clone(),
                bucket.clone(),
                format!("AGG_{bucket}"),
                "AGGREGATE".to_string(),
                String::new(),
                String::new(),
            ];
            row.extend(
                results.aggregation_results[bucket]
                    .iter()
                    .map(|v| format!("{v:.2}")),
            );
            rows.push(row);
        }

        Self { columns, rows }
    }

    /// Column headers: metadata columns then formatted shock points.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Formatted rows: positions first, then aggregate rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for ScenarioTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(String::len).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{column:>width$}", width = widths[i])?;
        }
        writeln!(f)?;

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{cell:>width$}", width = widths[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_results() -> ScenarioResults<f64> {
        let mut aggregation_results = HashMap::new();
        aggregation_results.insert("AAPL".to_string(), vec![-1400.0, 1400.0]);

        ScenarioResults {
            scenario_name: "Price Stress".to_string(),
            stress_points: vec![-0.05, 0.05],
            position_results: vec![StressResult {
                scenario_name: "Price Stress".to_string(),
                position_id: "pos1".to_string(),
                underlying: "AAPL".to_string(),
                instrument_kind: InstrumentKind::EQUITY,
                quantity: 100.0,
                base_value: 28_000.0,
                stress_points: vec![-0.05, 0.05],
                pnl_values: vec![-1400.0, 1400.0],
            }],
            aggregation_results,
        }
    }

    #[test]
    fn test_table_columns() {
        let table = ScenarioTable::from_results(&sample_results());

        assert_eq!(
            table.columns(),
            &[
                "scenario",
                "underlying",
                "position_id",
                "instrument_kind",
                "quantity",
                "base_value",
                "-0.050",
                "0.050",
            ]
        );
    }

    #[test]
    fn test_table_position_and_aggregate_rows() {
        let table = ScenarioTable::from_results(&sample_results());

        assert_eq!(table.len(), 2);
        let position_row = &table.rows()[0];
        assert_eq!(position_row[2], "pos1");
        assert_eq!(position_row[3], "equity");
        assert_eq!(position_row[6], "-1400.00");

        let aggregate_row = &table.rows()[1];
        assert_eq!(aggregate_row[1], "AAPL");
        assert_eq!(aggregate_row[2], "AGG_AAPL");
        assert_eq!(aggregate_row[3], "AGGREGATE");
        assert_eq!(aggregate_row[4], "");
        assert_eq!(aggregate_row[7], "1400.00");
    }

    #[test]
    fn test_table_display_aligns_columns() {
        let table = ScenarioTable::from_results(&sample_results());
        let rendered = format!("{table}");

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("position_id"));
        assert!(lines[1].contains("pos1"));
        assert!(lines[2].contains("AGG_AAPL"));
    }

    #[test]
    fn test_aggregation_accessor() {
        let results = sample_results();

        assert_eq!(results.aggregation("AAPL"), Some(&[-1400.0, 1400.0][..]));
        assert_eq!(results.aggregation("MSFT"), None);
    }
}
