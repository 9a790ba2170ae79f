use biotracker_core::db::open_db_in_memory;
use biotracker_core::{
    ActivityStatus, CatalogService, DoseLogService, EstimateService, NewCompound,
    RecordDoseRequest, SqliteCompoundRepository, SqliteLogRepository, TrackerError,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::Connection;

const TOLERANCE: f64 = 1e-6;

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 20)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn setup(conn: &Connection) -> (
    CatalogService<SqliteCompoundRepository<'_>>,
    DoseLogService<SqliteLogRepository<'_>>,
    EstimateService<SqliteCompoundRepository<'_>, SqliteLogRepository<'_>>,
) {
    let catalog = CatalogService::new(SqliteCompoundRepository::try_new(conn).unwrap());
    let log = DoseLogService::new(SqliteLogRepository::try_new(conn).unwrap());
    let estimator = EstimateService::new(
        SqliteCompoundRepository::try_new(conn).unwrap(),
        SqliteLogRepository::try_new(conn).unwrap(),
    );
    (catalog, log, estimator)
}

fn add_compound(
    catalog: &CatalogService<SqliteCompoundRepository<'_>>,
    name: &str,
    half_life_hours: f64,
    min_threshold: f64,
    time_to_peak_hours: f64,
) {
    catalog
        .add(&NewCompound {
            name: name.to_string(),
            half_life_hours,
            category: "Peptide".to_string(),
            min_threshold,
            time_to_peak_hours,
        })
        .unwrap();
}

fn record_at(
    log: &DoseLogService<SqliteLogRepository<'_>>,
    compound: &str,
    dose: f64,
    timestamp: NaiveDateTime,
) {
    log.record(&RecordDoseRequest {
        compound_name: compound.to_string(),
        dose_amount: dose,
        timestamp: Some(timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
    })
    .unwrap();
}

#[test]
fn single_dose_halves_each_half_life() {
    let conn = open_db_in_memory().unwrap();
    let (catalog, log, estimator) = setup(&conn);

    add_compound(&catalog, "BPC-157", 4.0, 0.0, 0.0);
    record_at(&log, "BPC-157", 100.0, t0());

    let after_four = estimator
        .estimate_active("BPC-157", t0() + Duration::hours(4))
        .unwrap();
    assert!((after_four.amount - 50.0).abs() < TOLERANCE);
    assert_eq!(after_four.status, ActivityStatus::Active);

    let after_eight = estimator
        .estimate_active("BPC-157", t0() + Duration::hours(8))
        .unwrap();
    assert!((after_eight.amount - 25.0).abs() < TOLERANCE);
}

#[test]
fn superposition_sums_each_dose_remainder() {
    let conn = open_db_in_memory().unwrap();
    let (catalog, log, estimator) = setup(&conn);

    add_compound(&catalog, "BPC-157", 4.0, 0.0, 0.0);
    record_at(&log, "BPC-157", 50.0, t0());
    record_at(&log, "BPC-157", 50.0, t0() + Duration::hours(4));

    // 25 left from the first dose plus the full fresh second dose.
    let estimate = estimator
        .estimate_active("BPC-157", t0() + Duration::hours(4))
        .unwrap();
    assert!((estimate.amount - 75.0).abs() < TOLERANCE);
}

#[test]
fn empty_history_is_depleted_even_at_zero_threshold() {
    let conn = open_db_in_memory().unwrap();
    let (catalog, _log, estimator) = setup(&conn);

    add_compound(&catalog, "BPC-157", 4.0, 0.0, 0.0);

    let estimate = estimator.estimate_active("BPC-157", t0()).unwrap();
    assert_eq!(estimate.amount, 0.0);
    assert_eq!(estimate.status, ActivityStatus::Depleted);
}

#[test]
fn threshold_flags_redosing_readiness() {
    let conn = open_db_in_memory().unwrap();
    let (catalog, log, estimator) = setup(&conn);

    add_compound(&catalog, "BPC-157", 4.0, 30.0, 0.0);
    record_at(&log, "BPC-157", 100.0, t0());

    let early = estimator
        .estimate_active("BPC-157", t0() + Duration::hours(4))
        .unwrap();
    assert_eq!(early.status, ActivityStatus::Active);

    // 100 * 2^-3 = 12.5, below the 30 threshold.
    let late = estimator
        .estimate_active("BPC-157", t0() + Duration::hours(12))
        .unwrap();
    assert!((late.amount - 12.5).abs() < TOLERANCE);
    assert_eq!(late.status, ActivityStatus::Depleted);
}

#[test]
fn doses_after_the_query_instant_are_excluded() {
    let conn = open_db_in_memory().unwrap();
    let (catalog, log, estimator) = setup(&conn);

    add_compound(&catalog, "BPC-157", 4.0, 0.0, 0.0);
    record_at(&log, "BPC-157", 100.0, t0() + Duration::hours(2));

    let estimate = estimator.estimate_active("BPC-157", t0()).unwrap();
    assert_eq!(estimate.amount, 0.0);
    assert_eq!(estimate.status, ActivityStatus::Depleted);
}

#[test]
fn other_compounds_do_not_contribute() {
    let conn = open_db_in_memory().unwrap();
    let (catalog, log, estimator) = setup(&conn);

    add_compound(&catalog, "BPC-157", 4.0, 0.0, 0.0);
    add_compound(&catalog, "TB-500", 240.0, 0.0, 0.0);
    record_at(&log, "TB-500", 2000.0, t0());
    record_at(&log, "BPC-157", 100.0, t0());

    let estimate = estimator
        .estimate_active("BPC-157", t0() + Duration::hours(4))
        .unwrap();
    assert!((estimate.amount - 50.0).abs() < TOLERANCE);
}

#[test]
fn absorption_ramp_rises_to_peak_then_decays() {
    let conn = open_db_in_memory().unwrap();
    let (catalog, log, estimator) = setup(&conn);

    add_compound(&catalog, "Testo Enantato", 4.0, 0.0, 2.0);
    record_at(&log, "Testo Enantato", 100.0, t0());

    let halfway_up = estimator
        .estimate_active("Testo Enantato", t0() + Duration::hours(1))
        .unwrap();
    assert!((halfway_up.amount - 50.0).abs() < TOLERANCE);

    let at_peak = estimator
        .estimate_active("Testo Enantato", t0() + Duration::hours(2))
        .unwrap();
    assert!((at_peak.amount - 100.0).abs() < TOLERANCE);

    // One half-life past the peak.
    let declining = estimator
        .estimate_active("Testo Enantato", t0() + Duration::hours(6))
        .unwrap();
    assert!((declining.amount - 50.0).abs() < TOLERANCE);
}

#[test]
fn unknown_compound_cannot_be_estimated() {
    let conn = open_db_in_memory().unwrap();
    let (_catalog, log, estimator) = setup(&conn);

    record_at(&log, "mystery", 100.0, t0());

    let err = estimator.estimate_active("mystery", t0()).unwrap_err();
    assert!(matches!(
        err,
        TrackerError::UnknownCompound(name) if name == "mystery"
    ));
}

#[test]
fn deleting_a_compound_keeps_history_but_stops_estimation() {
    let conn = open_db_in_memory().unwrap();
    let (catalog, log, estimator) = setup(&conn);

    let created = catalog
        .add(&NewCompound {
            name: "BPC-157".to_string(),
            half_life_hours: 4.0,
            category: "Peptide".to_string(),
            min_threshold: 0.0,
            time_to_peak_hours: 0.0,
        })
        .unwrap();
    record_at(&log, "BPC-157", 100.0, t0());

    catalog.remove(created.id).unwrap();

    // History outlives the catalog entry; estimation no longer can.
    assert_eq!(log.history().unwrap().len(), 1);
    let err = estimator
        .estimate_active("BPC-157", t0() + Duration::hours(4))
        .unwrap_err();
    assert!(matches!(err, TrackerError::UnknownCompound(_)));
}
