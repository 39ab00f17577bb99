// core/src/strava.rs
use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use ureq::Agent;

use crate::config::segment_history_url;
use crate::error::FetchError;
use crate::headers::RequestHeaders;
use crate::models::EffortRecord;

/// Kilde for rå segmenthistorikk (prod: StravaClient, test: StaticHistorySource).
pub trait HistorySource {
    fn segment_history(
        &self,
        segment_id: &str,
        headers: &RequestHeaders,
    ) -> Result<Value, FetchError>;
}

/// Strava-klient – enkel blocking-versjon (ureq)
pub struct StravaClient {
    agent: Agent,
}

impl StravaClient {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self { agent }
    }
}

impl Default for StravaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HistorySource for StravaClient {
    fn segment_history(
        &self,
        segment_id: &str,
        headers: &RequestHeaders,
    ) -> Result<Value, FetchError> {
        let url = segment_history_url(segment_id);
        let request = headers
            .pairs()
            .into_iter()
            .fold(self.agent.get(&url), |req, (name, value)| req.set(name, value));

        let resp = request.call().map_err(|e| FetchError::Http {
            url: url.clone(),
            source: Box::new(e),
        })?;
        let body = resp.into_string().map_err(|e| FetchError::Body {
            url: url.clone(),
            source: e,
        })?;

        let payload: Value = serde_json::from_str(&body).map_err(|e| FetchError::Json {
            url: url.clone(),
            path: format!("line {} column {}", e.line(), e.column()),
            message: e.to_string(),
        })?;

        info!("[Strava] segment={segment_id} => {} bytes", body.len());
        Ok(payload)
    }
}

/// Faste svar per segment-id; manglende id gir Json-feil.
#[derive(Debug, Clone, Default)]
pub struct StaticHistorySource {
    pub payloads: HashMap<String, Value>,
}

impl HistorySource for StaticHistorySource {
    fn segment_history(
        &self,
        segment_id: &str,
        _headers: &RequestHeaders,
    ) -> Result<Value, FetchError> {
        self.payloads
            .get(segment_id)
            .cloned()
            .ok_or_else(|| FetchError::Json {
                url: segment_history_url(segment_id),
                path: ".".into(),
                message: "no payload registered".into(),
            })
    }
}

#[derive(Debug, Deserialize)]
struct HistoryPayload {
    #[serde(default)]
    efforts: Vec<Value>,
}

/// Henter `efforts`-listen fra en historikk-payload.
///
/// Elementer som ikke er objekter hoppes over; feil form på toppnivå gir tom liste.
pub fn efforts_from_history(history: &Value) -> Vec<EffortRecord> {
    let payload: HistoryPayload = match serde_path_to_error::deserialize(history) {
        Ok(p) => p,
        Err(e) => {
            warn!("segmenthistorikk har uventet form ved `{}`: {}", e.path(), e.inner());
            return Vec::new();
        }
    };

    payload
        .efforts
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| match EffortRecord::try_from(raw) {
            Ok(effort) => Some(effort),
            Err(other) => {
                debug!("hopper over efforts[{i}]: ikke et objekt ({other})");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_efforts_are_skipped() {
        let history = json!({"efforts": [{"id": 1}, 7, null, {"id": 2}]});
        let efforts = efforts_from_history(&history);
        assert_eq!(efforts.len(), 2);
        assert_eq!(efforts[1].effort_id().as_deref(), Some("2"));
    }

    #[test]
    fn wrong_shape_yields_no_efforts() {
        assert!(efforts_from_history(&json!({"efforts": "nope"})).is_empty());
        assert!(efforts_from_history(&json!([1, 2, 3])).is_empty());
        assert!(efforts_from_history(&json!({})).is_empty());
    }
}
