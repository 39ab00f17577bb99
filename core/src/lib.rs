pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod headers;
pub mod models;
pub mod navn;
pub mod reduce;
pub mod sheet_meta;
pub mod sheets;
pub mod strava;

// Re-eksport av det mest brukte, slik at tester kan importere fra roten
pub use config::Settings;
pub use error::{ConfigError, FetchError, NavnError, SheetError};
pub use format::{efforts_to_sheet_rows, format_row, round_metric, format_elapsed_time, SHEET_HEADER};
pub use headers::{build_headers, parse_curl_headers, CredentialOverrides, HeaderMap, RequestHeaders};
pub use models::{EffortRecord, SheetRow};
pub use reduce::{reduce_best_efforts, AggregationKey, BestEffort};
pub use sheet_meta::{build_segment_name_map, extract_segment_ids, segment_id_from_link, MetadataRow, SegmentNameMap};
pub use sheets::GoogleSheets;
pub use strava::StravaClient;
