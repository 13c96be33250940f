use std::sync::{Arc, Mutex};

use rental_listing_stats::ingestion::{
    ingest_from_path, IngestionContext, IngestionObserver, IngestionOptions, IngestionSeverity, IngestionStats,
    SourceFormat,
};
use rental_listing_stats::AnalysisError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestionStats>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &AnalysisError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &AnalysisError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: &Arc<RecordingObserver>, alert_at_or_above: IngestionSeverity) -> IngestionOptions {
    IngestionOptions {
        observer: Some(obs.clone()),
        alert_at_or_above,
        ..Default::default()
    }
}

#[test]
fn observer_receives_row_stats_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let listings =
        ingest_from_path("tests/fixtures/listings.csv", &options(&obs, IngestionSeverity::Critical)).unwrap();

    assert_eq!(listings.len(), 9);
    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![IngestionStats {
            rows: 9,
            rows_with_unparsable_fields: 3,
        }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());

    let err = ingest_from_path(
        "tests/fixtures/does_not_exist.csv",
        &options(&obs, IngestionSeverity::Critical),
    )
    .unwrap_err();
    assert_eq!(err.stage(), rental_listing_stats::Stage::Load);

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_bad_header() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        // Forcing TSV on a comma file collapses the header into one unknown column.
        format: Some(SourceFormat::Tsv),
        ..options(&obs, IngestionSeverity::Critical)
    };

    let err = ingest_from_path("tests/fixtures/listings.csv", &opts).unwrap_err();
    assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_errors_too() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestionOptions {
        format: Some(SourceFormat::Tsv),
        ..options(&obs, IngestionSeverity::Error)
    };

    let _ = ingest_from_path("tests/fixtures/listings.csv", &opts).unwrap_err();
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}
