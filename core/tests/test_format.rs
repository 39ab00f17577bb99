// core/tests/test_format.rs
use serde_json::{json, Value};

use segment_history::{
    efforts_to_sheet_rows, format_elapsed_time, round_metric, EffortRecord, SegmentNameMap,
};

fn efforts(values: Vec<Value>) -> Vec<EffortRecord> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).expect("effort må være et objekt"))
        .collect()
}

fn names(pairs: &[(&str, &str)]) -> SegmentNameMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_efforts_to_sheet_rows_formats_columns() {
    let input = efforts(vec![json!({
        "start_date_local": "2024-05-01T10:00:00Z",
        "segment": {"id": 555},
        "elapsed_time": 83,
        "id": 8888,
        "avg_watts": 320.5,
        "average_hr": 152,
        "avg_cadence": 89.7,
    })]);

    let rows = efforts_to_sheet_rows(&input, &names(&[("555", "soria")]), "Morten", "4580190");

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].to_tsv_line(),
        [
            "2024",
            "soria",
            "Morten",
            "01:23",
            "https://www.strava.com/segment_efforts/8888",
            "321",
            "152",
            "90",
        ]
        .join("\t")
    );
}

#[test]
fn test_efforts_to_sheet_rows_picks_fastest_per_year() {
    let input = efforts(vec![
        json!({"start_date_local": "2024-05-01T08:00:00Z", "segment": {"id": 123}, "elapsed_time": 150, "id": 1}),
        json!({"start_date_local": "2024-06-01T08:00:00Z", "segment": {"id": 123}, "elapsed_time": 120, "id": 2}),
        json!({"start_date_local": "2024-07-01T08:00:00Z", "segment": {"id": 999}, "elapsed_time": 200, "id": 3}),
    ]);

    let rows = efforts_to_sheet_rows(
        &input,
        &names(&[("123", "alpha"), ("999", "beta")]),
        "Test",
        "4580190",
    );

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].segment, "alpha");
    assert_eq!(rows[0].elapsed, "02:00");
    assert!(rows[0].effort_url.ends_with("segment_efforts/2"));
    assert_eq!(rows[1].segment, "beta");
    assert_eq!(rows[1].elapsed, "03:20");
}

#[test]
fn metric_rounding_is_half_up_on_exact_decimals() {
    assert_eq!(round_metric(Some(&json!(320.5))), "321");
    assert_eq!(round_metric(Some(&json!(89.7))), "90");
    assert_eq!(round_metric(Some(&json!(152))), "152");
    assert_eq!(round_metric(Some(&json!(0.5))), "1");
    assert_eq!(round_metric(Some(&json!(1.45))), "1");
    assert_eq!(round_metric(Some(&json!("250.5"))), "251");
}

#[test]
fn unusable_metrics_render_empty_never_zero() {
    assert_eq!(round_metric(None), "");
    assert_eq!(round_metric(Some(&json!(null))), "");
    assert_eq!(round_metric(Some(&json!(""))), "");
    assert_eq!(round_metric(Some(&json!("n/a"))), "");
    assert_eq!(round_metric(Some(&json!([1, 2]))), "");
}

#[test]
fn elapsed_time_formatting() {
    assert_eq!(format_elapsed_time(Some(&json!(83))), "01:23");
    assert_eq!(format_elapsed_time(Some(&json!(59.5))), "01:00");
    assert_eq!(format_elapsed_time(Some(&json!(3725))), "62:05");
    assert_eq!(format_elapsed_time(Some(&json!(0))), "00:00");
    assert_eq!(format_elapsed_time(None), "");
    assert_eq!(format_elapsed_time(Some(&json!(null))), "");
    assert_eq!(format_elapsed_time(Some(&json!("x"))), "");
}

#[test]
fn metric_aliases_are_checked_in_priority_order() {
    let input = efforts(vec![json!({
        "start_date": "2024-01-01",
        "average_watts": null,
        "avg_watts": "",
        "watts": 250.4,
        "average_heartrate": 140.5,
        "avg_hr": 100,
        "average_cadence": 0,
        "avg_cadence": 85.5,
    })]);

    let rows = efforts_to_sheet_rows(&input, &SegmentNameMap::new(), "X", "1");

    assert_eq!(rows[0].avg_watts, "250");
    assert_eq!(rows[0].avg_bpm, "141");
    assert_eq!(rows[0].avg_cadence, "86", "0 regnes som tom og faller videre");
}

#[test]
fn sparse_effort_still_gives_eight_fields() {
    let input = efforts(vec![json!({"segment_id": 42})]);

    let rows = efforts_to_sheet_rows(&input, &SegmentNameMap::new(), "   ", "1");
    let row = &rows[0];

    assert_eq!(row.segment, "42", "ukjent segment vises med rå id");
    assert_eq!(row.navn, "NAVN", "tomt navn faller tilbake til NAVN");
    assert_eq!(row.year, "");
    assert_eq!(row.elapsed, "");
    assert_eq!(row.effort_url, "");
    assert_eq!(row.to_tsv_line().split('\t').count(), 8);
}

#[test]
fn one_malformed_record_does_not_spoil_the_rest() {
    let input = efforts(vec![
        json!({"segment_id": 1, "start_date": 2024, "elapsed_time": {"bad": true}, "avg_watts": "??"}),
        json!({"segment_id": 2, "start_date": "2024-03-03", "elapsed_time": 61, "id": 5, "avg_watts": 200}),
    ]);

    let rows = efforts_to_sheet_rows(&input, &SegmentNameMap::new(), "A", "1");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].year, "2024");
    assert_eq!(rows[0].elapsed, "");
    assert_eq!(rows[0].avg_watts, "");
    assert_eq!(rows[1].elapsed, "01:01");
    assert_eq!(rows[1].avg_watts, "200");
}
