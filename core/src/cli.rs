// core/src/cli.rs
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde_json::Value;

use crate::config::{Settings, DEFAULT_ATHLETE_SUGGESTIONS};
use crate::export::{histories_json, print_sheet, write_results_csv};
use crate::format::{efforts_to_sheet_rows, SHEET_HEADER};
use crate::headers::{build_headers, load_curl_headers, CredentialOverrides};
use crate::models::EffortRecord;
use crate::navn::load_or_prompt_navn;
use crate::sheet_meta::{build_segment_name_map, extract_segment_ids, MetadataRow, ID_NAVN_COLUMN, SEGMENT_COLUMN};
use crate::sheets::{fetch_athlete_names, fetch_segment_metadata, SheetSource};
use crate::strava::{efforts_from_history, HistorySource};

#[derive(Debug, Parser)]
#[command(
    name = "segment-history",
    about = "Fetch Strava segment history and print as JSON or sheet rows."
)]
pub struct Args {
    /// Output tab-separated rows for all segments in Løpsinfo (default).
    #[arg(long, overrides_with = "json")]
    pub all: bool,

    /// Output the raw JSON payload(s) from Strava.
    #[arg(long, overrides_with = "all")]
    pub json: bool,

    /// Cookie header (overstyrer STRAVA_COOKIE_HEADER og cURL-snutten).
    #[arg(long)]
    pub cookie: Option<String>,

    /// X-CSRF-Token (overstyrer STRAVA_CSRF_TOKEN og cURL-snutten).
    #[arg(long)]
    pub csrf_token: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// -v = info, -vv = debug
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Sheet,
    Json,
}

impl Args {
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Sheet
        }
    }

    pub fn explicit_credentials(&self) -> CredentialOverrides {
        CredentialOverrides {
            cookie: self.cookie.clone(),
            csrf_token: self.csrf_token.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Eksterne samarbeidspartnere (HTTP) – byttes ut med faste svar i tester.
pub struct Collaborators<'a> {
    pub history: &'a dyn HistorySource,
    pub sheets: &'a dyn SheetSource,
}

fn print_segment_definitions<W: Write>(out: &mut W, rows: &[MetadataRow]) -> std::io::Result<()> {
    writeln!(out, "Segment definitions (Id-navn -> Segment):")?;
    for row in rows {
        let id_navn = row.get(ID_NAVN_COLUMN).map(String::as_str).unwrap_or("");
        let link = row.get(SEGMENT_COLUMN).map(String::as_str).unwrap_or("");
        if !id_navn.is_empty() || !link.is_empty() {
            writeln!(out, "{id_navn}\t{link}")?;
        }
    }
    writeln!(out)
}

/// Henter historikk for hvert segment. Manglende pålogging stopper alt;
/// feil for ett enkelt segment logges og hoppes over.
pub fn collect_histories(
    source: &dyn HistorySource,
    segment_ids: &[String],
    explicit: &CredentialOverrides,
    settings: &Settings,
) -> Result<Vec<(String, Value)>> {
    let extracted = load_curl_headers(&settings.curl_snippet_path);
    let mut histories = Vec::with_capacity(segment_ids.len());

    for segment_id in segment_ids {
        let headers = build_headers(explicit, &settings.env_credentials, &extracted, segment_id)
            .context("could not assemble Strava request headers")?;
        match source.segment_history(segment_id, &headers) {
            Ok(history) => histories.push((segment_id.clone(), history)),
            Err(e) => warn!("Failed to fetch history for segment {segment_id}: {e}"),
        }
    }
    Ok(histories)
}

pub fn run<R, W>(
    args: &Args,
    settings: &Settings,
    deps: &Collaborators<'_>,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mode = args.mode();

    // 1️⃣ Segmentdefinisjoner fra Løpsinfo (valgfritt)
    let metadata = match fetch_segment_metadata(deps.sheets) {
        Ok(rows) => {
            if mode == OutputMode::Sheet {
                print_segment_definitions(out, &rows)?;
            }
            rows
        }
        Err(e) => {
            warn!("Failed to fetch segment metadata: {e}");
            Vec::new()
        }
    };
    let segment_names = build_segment_name_map(&metadata);

    // 2️⃣ Segmenter å hente – fallback til konfigurert default
    let mut segment_ids = extract_segment_ids(&metadata);
    if segment_ids.is_empty() {
        segment_ids.push(settings.default_segment_id.clone());
    }
    info!("henter historikk for {} segment(er)", segment_ids.len());

    // 3️⃣ Historikk fra Strava
    let histories = collect_histories(
        deps.history,
        &segment_ids,
        &args.explicit_credentials(),
        settings,
    )?;

    match mode {
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(&histories_json(&histories))?;
            writeln!(out, "{json}")?;
        }
        OutputMode::Sheet => {
            // 4️⃣ NAVN (cache eller spørsmål), så redusering + formatering
            let navn = load_or_prompt_navn(&settings.navn_cache_path, input, out, || {
                fetch_athlete_names(
                    deps.sheets,
                    &settings.athletes_sheet_gid,
                    DEFAULT_ATHLETE_SUGGESTIONS,
                )
            })?;

            let efforts: Vec<EffortRecord> = histories
                .iter()
                .flat_map(|(_, history)| efforts_from_history(history))
                .collect();
            let rows = efforts_to_sheet_rows(
                &efforts,
                &segment_names,
                &navn,
                &settings.default_segment_id,
            );

            print_sheet(out, &rows)?;
            match write_results_csv(&settings.results_csv_path, &SHEET_HEADER, &rows) {
                Ok(()) => writeln!(
                    out,
                    "\nSaved {} rows to {}",
                    rows.len(),
                    settings.results_csv_path.display()
                )?,
                Err(e) => warn!(
                    "Failed to write {}: {e}",
                    settings.results_csv_path.display()
                ),
            }
        }
    }

    Ok(())
}
