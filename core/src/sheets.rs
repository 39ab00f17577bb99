// core/src/sheets.rs
use std::collections::HashMap;
use std::time::Duration;

use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};
use ureq::Agent;

use crate::config::{sheet_export_url, METADATA_SHEET_GID};
use crate::error::{FetchError, SheetError};
use crate::sheet_meta::MetadataRow;

/// Kilde for TSV-eksport av en regnearkfane.
pub trait SheetSource {
    fn export_tsv(&self, gid: &str) -> Result<String, FetchError>;
}

/// Google Sheets eksport-klient (blocking)
pub struct GoogleSheets {
    agent: Agent,
}

impl GoogleSheets {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self { agent }
    }
}

impl Default for GoogleSheets {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetSource for GoogleSheets {
    fn export_tsv(&self, gid: &str) -> Result<String, FetchError> {
        let url = sheet_export_url(gid);
        let resp = self
            .agent
            .get(&url)
            .set("Accept", "text/tab-separated-values")
            .call()
            .map_err(|e| FetchError::Http {
                url: url.clone(),
                source: Box::new(e),
            })?;
        let body = resp
            .into_string()
            .map_err(|e| FetchError::Body { url, source: e })?;
        Ok(body.trim_start_matches('\u{feff}').to_string())
    }
}

/// Faste TSV-svar per fane (gid); ukjent gid gir feil.
#[derive(Debug, Clone, Default)]
pub struct StaticSheetSource {
    pub tabs: HashMap<String, String>,
}

impl SheetSource for StaticSheetSource {
    fn export_tsv(&self, gid: &str) -> Result<String, FetchError> {
        self.tabs.get(gid).cloned().ok_or_else(|| FetchError::Json {
            url: sheet_export_url(gid),
            path: ".".into(),
            message: "no tab registered".into(),
        })
    }
}

fn tsv_reader(text: &str, has_headers: bool) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(text.as_bytes())
}

fn record_to_row(headers: &StringRecord, record: &StringRecord) -> MetadataRow {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), record.get(i).unwrap_or("").to_string()))
        .collect()
}

/// TSV med overskriftsrad -> rader; helt tomme rader droppes.
pub fn parse_metadata_tsv(text: &str) -> Result<Vec<MetadataRow>, SheetError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = tsv_reader(text, true);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record_to_row(&headers, &record));
    }
    Ok(rows)
}

pub fn fetch_segment_metadata(source: &dyn SheetSource) -> Result<Vec<MetadataRow>, SheetError> {
    let text = source.export_tsv(METADATA_SHEET_GID)?;
    let rows = parse_metadata_tsv(&text)?;
    info!("📄 {} metadata-rader hentet fra Løpsinfo", rows.len());
    Ok(rows)
}

/// Navneforslag fra Utøvere-fanen.
///
/// Tar kolonne 2 (eller 1 hvis arket bare har én kolonne). Gir det ingenting,
/// brukes første kolonne med "navn" i overskriften, ellers første ikke-tomme celle.
pub fn parse_athlete_names(text: &str, limit: usize) -> Vec<String> {
    if limit == 0 {
        return Vec::new();
    }
    let text = text.trim_start_matches('\u{feff}');
    let records: Vec<StringRecord> = tsv_reader(text, false)
        .records()
        .filter_map(Result::ok)
        .collect();
    let Some((header, data)) = records.split_first() else {
        return Vec::new();
    };

    let column = if header.len() > 1 { 1 } else { 0 };
    let mut names: Vec<String> = data
        .iter()
        .filter_map(|r| r.get(column))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect();
    if !names.is_empty() {
        return names;
    }

    let navn_column = header
        .iter()
        .position(|h| !h.is_empty() && h.to_lowercase().contains("navn"));
    for record in data {
        let value = match navn_column {
            Some(i) => record.get(i).map(str::trim).unwrap_or(""),
            None => record.iter().map(str::trim).find(|v| !v.is_empty()).unwrap_or(""),
        };
        if !value.is_empty() {
            names.push(value.to_string());
        }
        if names.len() >= limit {
            break;
        }
    }
    names
}

/// Feil ved henting svelges – forslag er valgfrie.
pub fn fetch_athlete_names(source: &dyn SheetSource, gid: &str, limit: usize) -> Vec<String> {
    if limit == 0 {
        return Vec::new();
    }
    match source.export_tsv(gid) {
        Ok(text) => parse_athlete_names(&text, limit),
        Err(e) => {
            warn!("kunne ikke hente Utøvere-fanen: {e}");
            Vec::new()
        }
    }
}
