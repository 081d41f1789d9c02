//! Scoped reporting: one report per batch of timed runs.
//!
//! A [`Session`] owns the store its recorder appends to. The report is built
//! exactly once, when the session is finished or dropped. A batch that fails
//! still gets a report of whatever it captured before the failure, and the
//! failure is then handed back to the caller unchanged. This holds for `Err`
//! returns from [`Session::run`] and for panics unwinding through the guard.

use crate::error::{Error, Result};
use crate::recorder::{Notice, Recorder};
use crate::report::{Report, ReportBuilder};
use crate::store::SampleStore;

#[derive(Debug)]
pub struct Session {
    recorder: Recorder,
    builder: ReportBuilder,
    reported: bool,
}

impl Session {
    /// Start a session over a fresh, empty store.
    pub fn begin(builder: ReportBuilder) -> Self {
        Self::over(SampleStore::new(), builder)
    }

    /// Start a session over an existing store.
    ///
    /// Samples already in `store` will appear in this session's report. That
    /// is almost never wanted, so it is logged; call [`SampleStore::clear`]
    /// first to keep sessions independent.
    pub fn over(store: SampleStore, builder: ReportBuilder) -> Self {
        if !store.is_empty() {
            tracing::warn!(
                samples = store.len(),
                "session started over a non-empty store; earlier samples will be reported again"
            );
        }
        Self {
            recorder: Recorder::new(store),
            builder,
            reported: false,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.recorder.set_notice(notice);
        self
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn store(&self) -> &SampleStore {
        self.recorder.store()
    }

    /// Build the report now instead of at drop.
    pub fn finish(mut self) -> Result<Report> {
        self.reported = true;
        self.builder.build(self.recorder.store())
    }

    /// Run `body` as the session's batch and report afterwards.
    ///
    /// If `body` returns `Err`, the partial report is still built (and printed
    /// if configured) before the error is returned as-is.
    pub fn run<T, E>(
        self,
        body: impl FnOnce(&Recorder) -> std::result::Result<T, E>,
    ) -> std::result::Result<(T, Report), E>
    where
        E: From<Error>,
    {
        match body(&self.recorder) {
            Ok(value) => {
                let report = self.finish()?;
                Ok((value, report))
            }
            Err(err) => {
                if let Err(report_err) = self.finish() {
                    tracing::warn!(error = %report_err, "partial report failed after batch error");
                }
                Err(err)
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.reported {
            return;
        }
        self.reported = true;
        if let Err(err) = self.builder.build(self.recorder.store()) {
            tracing::warn!(error = %err, "report at session end failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportConfig;
    use crate::schema::Sample;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use tempfile::tempdir;

    fn cumsum(values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .scan(0.0, |acc, v| {
                *acc += v;
                Some(*acc)
            })
            .collect()
    }

    fn quiet_session(builder: ReportBuilder) -> Session {
        Session::begin(builder).with_notice(Notice::Quiet)
    }

    #[test]
    fn test_begin_does_nothing_observable() {
        let session = quiet_session(ReportBuilder::default());
        assert!(session.store().is_empty());
        let report = session.finish().unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_with_notice_applies_to_recorder() {
        let session = Session::begin(ReportBuilder::default()).with_notice(Notice::Quiet);
        assert_eq!(session.recorder().notice(), Notice::Quiet);
        session.recorder().wrap(cumsum).call(&[1.0; 10][..]);
        assert_eq!(session.finish().unwrap().samples.len(), 1);
    }

    #[test]
    fn test_run_reports_once_over_batch() {
        let session = quiet_session(ReportBuilder::default());
        let (sum, report) = session
            .run(|rec| {
                let timed = rec.wrap(cumsum);
                for n in [10usize, 100] {
                    let values = vec![1.0; n];
                    timed.call(values.as_slice());
                }
                Ok::<_, Error>(timed.call(&[1.0, 2.0, 3.0][..]))
            })
            .unwrap();

        assert_eq!(sum, vec![1.0, 3.0, 6.0]);
        assert_eq!(report.samples.len(), 3);
        let pivot = report.pivot(crate::pivot::Metric::ElapsedMs).unwrap();
        let sizes: Vec<_> = pivot.rows.iter().map(|r| r.input_size).collect();
        assert_eq!(sizes, vec![3, 10, 100]);
    }

    #[derive(Debug, PartialEq)]
    enum BatchError {
        Workload(&'static str),
        Harness(String),
    }

    impl From<Error> for BatchError {
        fn from(e: Error) -> Self {
            BatchError::Harness(e.to_string())
        }
    }

    #[test]
    fn test_run_reports_partial_results_then_propagates() {
        let dir = tempdir().unwrap();
        let session = quiet_session(ReportBuilder::new(ReportConfig {
            chart_dir: Some(dir.path().to_path_buf()),
            print_table: false,
        }));

        let err = session
            .run(|rec| {
                rec.wrap(cumsum).call(&[1.0; 10][..]);
                Err::<(), _>(BatchError::Workload("second workload failed"))
            })
            .unwrap_err();

        assert_eq!(err, BatchError::Workload("second workload failed"));
        // The sample captured before the failure made it into the charts.
        assert!(dir.path().join("time_to_complete.svg").is_file());
    }

    #[test]
    fn test_drop_reports_on_panic() {
        let dir = tempdir().unwrap();
        let chart = dir.path().join("throughput.svg");
        let builder = ReportBuilder::new(ReportConfig {
            chart_dir: Some(dir.path().to_path_buf()),
            print_table: false,
        });

        let result = catch_unwind(AssertUnwindSafe(|| {
            let session = quiet_session(builder);
            session.recorder().wrap(cumsum).call(&[1.0; 100][..]);
            panic!("batch aborted");
        }));

        assert!(result.is_err());
        assert!(chart.is_file());
    }

    #[test]
    fn test_drop_skips_already_reported_session() {
        let dir = tempdir().unwrap();
        let builder = ReportBuilder::new(ReportConfig {
            chart_dir: Some(dir.path().to_path_buf()),
            print_table: false,
        });
        let mut session = quiet_session(builder);
        session.recorder().wrap(cumsum).call(&[1.0; 10][..]);
        session.reported = true;
        drop(session);

        assert!(!dir.path().join("time_to_complete.svg").exists());
    }

    #[test]
    fn test_plain_drop_reports() {
        let dir = tempdir().unwrap();
        {
            let session = quiet_session(ReportBuilder::new(ReportConfig {
                chart_dir: Some(dir.path().to_path_buf()),
                print_table: false,
            }));
            session.recorder().wrap(cumsum).call(&[1.0; 10][..]);
        }
        assert!(dir.path().join("time_to_complete.svg").is_file());
    }

    #[test]
    fn test_cleared_store_isolates_sessions() {
        let store = SampleStore::new();
        let first =
            Session::over(store.clone(), ReportBuilder::default()).with_notice(Notice::Quiet);
        first.recorder().wrap(cumsum).call(&[1.0; 10][..]);
        assert_eq!(first.finish().unwrap().samples.len(), 1);

        store.clear();
        let second =
            Session::over(store.clone(), ReportBuilder::default()).with_notice(Notice::Quiet);
        second.recorder().wrap(cumsum).call(&[1.0; 100][..]);
        let report = second.finish().unwrap();
        assert_eq!(report.samples.len(), 1);
        assert_eq!(report.samples[0].input_size(), 100);
    }

    #[test]
    fn test_unclear_store_carries_earlier_samples() {
        let store = SampleStore::new();
        store.append(Sample::from_millis("earlier", 10, 1.0));
        let session = Session::over(store, ReportBuilder::default());
        let report = session.finish().unwrap();
        assert_eq!(report.samples[0].function_name(), "earlier");
    }
}
