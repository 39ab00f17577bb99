// core/src/sheet_meta.rs
use std::collections::{HashMap, HashSet};

/// Én rad fra regnearkeksporten: kolonnenavn -> celle.
pub type MetadataRow = HashMap<String, String>;

/// segment-id -> Id-navn
pub type SegmentNameMap = HashMap<String, String>;

pub const SEGMENT_COLUMN: &str = "Segment";
pub const ID_NAVN_COLUMN: &str = "Id-navn";

fn cell<'a>(row: &'a MetadataRow, column: &str) -> &'a str {
    row.get(column).map(|v| v.trim()).unwrap_or("")
}

/// Siste sti-ledd i en segmentlenke, uten `/`, `?...` og `#...`.
/// Kun rene sifre godtas.
pub fn segment_id_from_link(link: &str) -> Option<String> {
    let cleaned = link.trim().trim_end_matches('/');
    if cleaned.is_empty() {
        return None;
    }
    let last = cleaned.rsplit('/').next().unwrap_or(cleaned);
    let last = last.split('?').next().unwrap_or(last);
    let last = last.split('#').next().unwrap_or(last);

    if !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()) {
        Some(last.to_string())
    } else {
        None
    }
}

/// Senere rader overskriver tidligere for samme segment.
pub fn build_segment_name_map(rows: &[MetadataRow]) -> SegmentNameMap {
    let mut mapping = SegmentNameMap::new();
    for row in rows {
        let id_navn = cell(row, ID_NAVN_COLUMN);
        if id_navn.is_empty() {
            continue;
        }
        if let Some(segment_id) = segment_id_from_link(cell(row, SEGMENT_COLUMN)) {
            mapping.insert(segment_id, id_navn.to_string());
        }
    }
    mapping
}

/// Unike segment-id-er i arkrekkefølge.
pub fn extract_segment_ids(rows: &[MetadataRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter_map(|row| segment_id_from_link(cell(row, SEGMENT_COLUMN)))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
