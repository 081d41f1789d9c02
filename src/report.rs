//! Turn a sample store into comparative reports.
//!
//! A report is built from a snapshot: both metric pivots, one log-log chart
//! per non-empty pivot, and (optionally) the charts written to disk. Human
//! output goes to stderr so stdout stays free for the JSON document.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::chart::{self, Chart};
use crate::error::{Error, Result};
use crate::pivot::{Metric, PivotTable};
use crate::schema::Sample;
use crate::store::SampleStore;

#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Where to write `<metric>.svg`; charts stay in memory when `None`.
    pub chart_dir: Option<PathBuf>,
    /// Print the sample table and pivots to stderr.
    pub print_table: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub samples: Vec<Sample>,
    pub pivots: Vec<PivotTable>,
    pub charts: Vec<Chart>,
    pub chart_paths: Vec<PathBuf>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn pivot(&self, metric: Metric) -> Option<&PivotTable> {
        self.pivots.iter().find(|p| p.metric == metric)
    }

    pub fn chart(&self, metric: Metric) -> Option<&Chart> {
        self.charts.iter().find(|c| c.metric == metric)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Raw samples, one row each, in append order.
    pub fn sample_table(&self) -> String {
        let name_width = self
            .samples
            .iter()
            .map(|s| s.function_name().len())
            .max()
            .unwrap_or(0)
            .max("function".len());

        let mut out = format!(
            "{:>5}  {:<name_width$}  {:>10}  {:>14}  {:>13}\n",
            "", "function", "n_values", "t_milliseconds", "values_per_ms"
        );
        for (i, s) in self.samples.iter().enumerate() {
            out.push_str(&format!(
                "{:>5}  {:<name_width$}  {:>10}  {:>14.3}  {:>13}\n",
                i,
                s.function_name(),
                s.input_size(),
                s.elapsed_ms(),
                s.throughput()
            ));
        }
        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "no samples recorded");
        }
        write!(f, "{}", self.sample_table())?;
        for pivot in &self.pivots {
            writeln!(f)?;
            write!(f, "{pivot}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn build(&self, store: &SampleStore) -> Result<Report> {
        let samples = store.snapshot();
        let pivots: Vec<PivotTable> = Metric::ALL
            .iter()
            .map(|m| PivotTable::build(&samples, *m))
            .collect();
        let charts: Vec<Chart> = pivots.iter().filter_map(chart::render).collect();

        let mut chart_paths = Vec::new();
        if let Some(dir) = &self.config.chart_dir {
            if !charts.is_empty() {
                fs::create_dir_all(dir)?;
            }
            for c in &charts {
                let path = dir.join(format!("{}.svg", c.metric.slug()));
                fs::write(&path, &c.svg).map_err(|source| Error::ChartWrite {
                    path: path.clone(),
                    source,
                })?;
                tracing::info!(path = %path.display(), title = %c.title, "chart written");
                chart_paths.push(path);
            }
        }

        let report = Report {
            samples,
            pivots,
            charts,
            chart_paths,
        };

        if self.config.print_table {
            eprint!("{report}");
        }
        tracing::info!(
            samples = report.samples.len(),
            charts = report.charts.len(),
            "report built"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_with(samples: &[(&str, usize, f64)]) -> SampleStore {
        let store = SampleStore::new();
        for (name, n, ms) in samples {
            store.append(Sample::from_millis(*name, *n, *ms));
        }
        store
    }

    #[test]
    fn test_empty_store_gives_empty_report() {
        let report = ReportBuilder::default().build(&SampleStore::new()).unwrap();
        assert!(report.is_empty());
        assert!(report.charts.is_empty());
        assert_eq!(report.pivots.len(), 2);
        assert!(report.pivots.iter().all(|p| p.rows.is_empty()));
        assert_eq!(report.to_string(), "no samples recorded\n");
    }

    #[test]
    fn test_empty_store_writes_no_files() {
        let dir = tempdir().unwrap();
        let charts = dir.path().join("charts");
        let builder = ReportBuilder::new(ReportConfig {
            chart_dir: Some(charts.clone()),
            print_table: false,
        });
        let report = builder.build(&SampleStore::new()).unwrap();
        assert!(report.chart_paths.is_empty());
        assert!(!charts.exists());
    }

    #[test]
    fn test_report_has_both_metrics() {
        let store = store_with(&[("a", 10, 1.0), ("a", 100, 5.0), ("b", 10, 0.5)]);
        let report = ReportBuilder::default().build(&store).unwrap();

        let elapsed = report.pivot(Metric::ElapsedMs).unwrap();
        assert_eq!(elapsed.get(100, "a"), Some(5.0));
        assert_eq!(elapsed.get(100, "b"), None);

        let throughput = report.pivot(Metric::Throughput).unwrap();
        assert_eq!(throughput.get(10, "b"), Some(20.0));

        assert_eq!(report.charts.len(), 2);
        assert_eq!(
            report.chart(Metric::Throughput).unwrap().title,
            "Values processed per millisecond"
        );
    }

    #[test]
    fn test_charts_written_to_dir() {
        let dir = tempdir().unwrap();
        let store = store_with(&[("a", 10, 1.0), ("a", 100, 5.0)]);
        let builder = ReportBuilder::new(ReportConfig {
            chart_dir: Some(dir.path().join("out")),
            print_table: false,
        });
        let report = builder.build(&store).unwrap();

        assert_eq!(report.chart_paths.len(), 2);
        let time_chart = fs::read_to_string(dir.path().join("out/time_to_complete.svg")).unwrap();
        assert!(time_chart.contains("Milliseconds to complete"));
        assert!(dir.path().join("out/throughput.svg").is_file());
    }

    #[test]
    fn test_chart_dir_blocked_by_file() {
        let dir = tempdir().unwrap();
        // A file where the chart directory should be.
        let blocker = dir.path().join("taken");
        fs::write(&blocker, b"x").unwrap();

        let builder = ReportBuilder::new(ReportConfig {
            chart_dir: Some(blocker),
            print_table: false,
        });
        let err = builder
            .build(&store_with(&[("a", 10, 1.0)]))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_) | Error::ChartWrite { .. }));
    }

    #[test]
    fn test_to_json_includes_pivots() {
        let store = store_with(&[("a", 10, 1.0), ("b", 10, 0.5)]);
        let report = ReportBuilder::default().build(&store).unwrap();
        let v: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(v["samples"].as_array().unwrap().len(), 2);
        assert_eq!(v["pivots"][0]["metric"], "elapsed_ms");
        assert_eq!(v["pivots"][0]["columns"][1], "b");
        assert_eq!(v["pivots"][1]["rows"][0]["cells"][1], 20.0);
    }

    #[test]
    fn test_sample_table_columns() {
        let store = store_with(&[("fast_count_occurrences", 1000, 0.25)]);
        let report = ReportBuilder::default().build(&store).unwrap();
        let table = report.sample_table();
        let header = table.lines().next().unwrap();
        for col in ["function", "n_values", "t_milliseconds", "values_per_ms"] {
            assert!(header.contains(col), "missing {col}");
        }
        let row = table.lines().nth(1).unwrap();
        assert!(row.contains("fast_count_occurrences"));
        assert!(row.contains("0.250"));
        assert!(row.trim_end().ends_with("4000"));
    }
}
