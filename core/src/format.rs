// core/src/format.rs
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::config::SEGMENT_EFFORT_URL_PREFIX;
use crate::models::{EffortRecord, SheetRow, CADENCE_KEYS, HEARTRATE_KEYS, WATTS_KEYS};
use crate::reduce::{reduce_best_efforts, BestEffort};
use crate::sheet_meta::SegmentNameMap;

/// Overskrift for TSV-utskrift og CSV-fil.
pub const SHEET_HEADER: [&str; 8] = [
    "År",
    "segment",
    "NAVN",
    "elapsed time (mm:ss)",
    "segment effort URL",
    "avg Watt",
    "avg Bpm",
    "avg Cadence",
];

pub const DEFAULT_NAVN: &str = "NAVN";

fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Eksakt desimal-avrunding, halv opp (bort fra null): 320.5 -> 321, -2.5 -> -3.
pub fn round_half_up(value: &Value) -> Option<i64> {
    parse_decimal(value)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Heltall som tekst; manglende eller ugyldig verdi gir "" (aldri "0").
pub fn round_metric(value: Option<&Value>) -> String {
    value
        .and_then(round_half_up)
        .map(|n| n.to_string())
        .unwrap_or_default()
}

/// Sekunder -> "MM:SS" (avrundet til nærmeste hele sekund); mangler => "".
pub fn format_elapsed_time(value: Option<&Value>) -> String {
    let Some(total) = value.and_then(round_half_up) else {
        return String::new();
    };
    let (minutes, seconds) = (total.div_euclid(60), total.rem_euclid(60));
    format!("{minutes:02}:{seconds:02}")
}

pub fn effort_url(effort: &EffortRecord) -> String {
    effort
        .effort_id()
        .map(|id| format!("{SEGMENT_EFFORT_URL_PREFIX}{id}"))
        .unwrap_or_default()
}

/// Bygger én regnearkrad fra en vinner-effort.
pub fn format_row(best: &BestEffort<'_>, segment_names: &SegmentNameMap, navn: &str) -> SheetRow {
    let effort = best.effort;
    let segment_id = &best.key.segment_id;
    let navn = match navn.trim() {
        "" => DEFAULT_NAVN,
        n => n,
    };

    SheetRow {
        year: best.key.year.clone(),
        segment: segment_names
            .get(segment_id)
            .cloned()
            .unwrap_or_else(|| segment_id.clone()),
        navn: navn.to_string(),
        elapsed: format_elapsed_time(effort.get("elapsed_time")),
        effort_url: effort_url(effort),
        avg_watts: round_metric(effort.first_present(WATTS_KEYS)),
        avg_bpm: round_metric(effort.first_present(HEARTRATE_KEYS)),
        avg_cadence: round_metric(effort.first_present(CADENCE_KEYS)),
    }
}

/// Reduser + formater i ett steg.
pub fn efforts_to_sheet_rows(
    efforts: &[EffortRecord],
    segment_names: &SegmentNameMap,
    navn: &str,
    default_segment_id: &str,
) -> Vec<SheetRow> {
    reduce_best_efforts(efforts, default_segment_id)
        .iter()
        .map(|best| format_row(best, segment_names, navn))
        .collect()
}
