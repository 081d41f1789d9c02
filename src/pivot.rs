//! Size-by-workload cross-tabulation of one metric.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::schema::Sample;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ElapsedMs,
    Throughput,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::ElapsedMs, Metric::Throughput];

    pub fn value(&self, sample: &Sample) -> f64 {
        match self {
            Metric::ElapsedMs => sample.elapsed_ms(),
            Metric::Throughput => sample.throughput() as f64,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::ElapsedMs => "Milliseconds to complete",
            Metric::Throughput => "Values processed per millisecond",
        }
    }

    /// File stem used when a chart for this metric is written to disk.
    pub fn slug(&self) -> &'static str {
        match self {
            Metric::ElapsedMs => "time_to_complete",
            Metric::Throughput => "throughput",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::ElapsedMs => "ms",
            Metric::Throughput => "values/ms",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub input_size: usize,
    /// One cell per column; `None` where that workload never ran at this size.
    pub cells: Vec<Option<f64>>,
}

/// Rows are input sizes in ascending order, columns are function names in
/// first-seen order. A repeated `(size, function)` pair keeps the value of
/// the sample appended last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub metric: Metric,
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    pub fn build(samples: &[Sample], metric: Metric) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut cells: BTreeMap<usize, BTreeMap<usize, f64>> = BTreeMap::new();

        for sample in samples {
            let col = match columns.iter().position(|c| c == sample.function_name()) {
                Some(idx) => idx,
                None => {
                    columns.push(sample.function_name().to_string());
                    columns.len() - 1
                }
            };
            cells
                .entry(sample.input_size())
                .or_default()
                .insert(col, metric.value(sample));
        }

        let rows = cells
            .into_iter()
            .map(|(input_size, by_col)| PivotRow {
                input_size,
                cells: (0..columns.len()).map(|c| by_col.get(&c).copied()).collect(),
            })
            .collect();

        Self {
            metric,
            columns,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, input_size: usize, function_name: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == function_name)?;
        self.rows
            .iter()
            .find(|r| r.input_size == input_size)
            .and_then(|r| r.cells[col])
    }

    /// `(input_size, value)` points for one column, skipping empty cells.
    pub fn series(&self, col: usize) -> Vec<(usize, f64)> {
        self.rows
            .iter()
            .filter_map(|r| r.cells.get(col).copied().flatten().map(|v| (r.input_size, v)))
            .collect()
    }
}

impl fmt::Display for PivotTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.metric.title(), self.metric.unit())?;
        if self.is_empty() {
            return writeln!(f, "  (no samples)");
        }

        let width = self.columns.iter().map(|c| c.len()).max().unwrap_or(0).max(12);
        write!(f, "{:>12}", "n_values")?;
        for c in &self.columns {
            write!(f, "  {:>width$}", c)?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:>12}", row.input_size)?;
            for cell in &row.cells {
                match (cell, self.metric) {
                    (Some(v), Metric::ElapsedMs) => write!(f, "  {:>width$.3}", v)?,
                    (Some(v), Metric::Throughput) => write!(f, "  {:>width$.0}", v)?,
                    (None, _) => write!(f, "  {:>width$}", "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
