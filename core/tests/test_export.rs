// core/tests/test_export.rs
use serde_json::json;

use segment_history::export::{histories_json, print_sheet, write_results_csv};
use segment_history::{SheetRow, SHEET_HEADER};

fn sample_rows() -> Vec<SheetRow> {
    vec![
        SheetRow {
            year: "2024".into(),
            segment: "alpha".into(),
            navn: "Tor".into(),
            elapsed: "02:00".into(),
            effort_url: "https://www.strava.com/segment_efforts/2".into(),
            avg_watts: "321".into(),
            avg_bpm: "".into(),
            avg_cadence: "90".into(),
        },
        SheetRow {
            year: "2023".into(),
            segment: "beta, med komma".into(),
            navn: "Tor".into(),
            ..SheetRow::default()
        },
    ]
}

#[test]
fn test_write_results_csv_creates_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("results.csv");
    let rows = sample_rows();

    write_results_csv(&path, &SHEET_HEADER, &rows).expect("skriv csv");

    let mut reader = csv::Reader::from_path(&path).expect("les csv");
    let header: Vec<String> = reader.headers().expect("header").iter().map(String::from).collect();
    assert_eq!(header, SHEET_HEADER.to_vec());
    assert_eq!(header[0], "År");

    let records: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.expect("rad").iter().map(String::from).collect())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], rows[0].columns().to_vec());
    assert_eq!(records[1][1], "beta, med komma");
}

#[test]
fn print_sheet_writes_header_then_rows() {
    let mut out: Vec<u8> = Vec::new();
    print_sheet(&mut out, &sample_rows()).expect("print");

    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "År\tsegment\tNAVN\telapsed time (mm:ss)\tsegment effort URL\tavg Watt\tavg Bpm\tavg Cadence");
    assert!(lines[1].starts_with("2024\talpha\tTor\t02:00\t"));
}

#[test]
fn histories_json_shapes() {
    assert_eq!(histories_json(&[]), json!({}));

    let one = json!({"efforts": [{"id": 1, "elapsed_time": 120}]});
    assert_eq!(histories_json(&[("5".into(), one.clone())]), one);

    let many = histories_json(&[
        ("9".into(), json!({"efforts": []})),
        ("1".into(), json!({"efforts": [{"id": 3}]})),
    ]);
    let keys: Vec<&String> = many.as_object().expect("objekt").keys().collect();
    assert_eq!(keys, vec!["9", "1"], "innsettingsrekkefølgen skal bevares");
    assert_eq!(many["1"]["efforts"][0]["id"], 3);
}
