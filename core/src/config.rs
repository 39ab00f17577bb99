// core/src/config.rs
use std::path::{Path, PathBuf};

use crate::headers::CredentialOverrides;

pub const DEFAULT_SEGMENT_ID: &str = "4580190";

pub const SEGMENT_HISTORY_URL_TEMPLATE: &str =
    "https://www.strava.com/athlete/segments/{segment_id}/history";
pub const SEGMENT_REFERER_URL_TEMPLATE: &str = "https://www.strava.com/segments/{segment_id}";
pub const SEGMENT_EFFORT_URL_PREFIX: &str = "https://www.strava.com/segment_efforts/";

pub const GOOGLE_SHEET_ID: &str = "16-gb4q-aAdpWsrwcn-91vOEqSNfND9xp8Sku4QVDi9s";
/// Fanen "Løpsinfo" (Id-navn -> Segment)
pub const METADATA_SHEET_GID: &str = "2089954890";
/// Fanen "Utøvere"
pub const DEFAULT_ATHLETES_SHEET_GID: &str = "244792171";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

pub const DEFAULT_ATHLETE_SUGGESTIONS: usize = 6;

pub fn segment_history_url(segment_id: &str) -> String {
    SEGMENT_HISTORY_URL_TEMPLATE.replace("{segment_id}", segment_id)
}

pub fn segment_referer_url(segment_id: &str) -> String {
    SEGMENT_REFERER_URL_TEMPLATE.replace("{segment_id}", segment_id)
}

pub fn sheet_export_url(gid: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{GOOGLE_SHEET_ID}/export?format=tsv&gid={gid}")
}

/// Kjøretidsinnstillinger, hentet fra miljøvariabler med faste defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_segment_id: String,
    pub curl_snippet_path: PathBuf,
    pub navn_cache_path: PathBuf,
    pub results_csv_path: PathBuf,
    pub athletes_sheet_gid: String,
    /// Miljø-nivået i header-presedensen (STRAVA_COOKIE_HEADER osv.)
    pub env_credentials: CredentialOverrides,
}

impl Settings {
    /// Leser fra prosessens miljø; relative stier løses mot arbeidskatalogen.
    pub fn from_env() -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::from_lookup(|key| std::env::var(key).ok(), &cwd))
    }

    /// Som `from_env`, men med injisert oppslag (testbart uten å røre miljøet).
    pub fn from_lookup<F>(lookup: F, cwd: &Path) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path_or = |key: &str, default_name: &str| -> PathBuf {
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => cwd.join(v.trim()),
                _ => cwd.join(default_name),
            }
        };
        let text_or = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            default_segment_id: text_or("STRAVA_SEGMENT_ID", DEFAULT_SEGMENT_ID),
            curl_snippet_path: path_or("STRAVA_CURL_FILE", ".strava_curl"),
            navn_cache_path: path_or("GRANCAKONGEN_NAVN_PATH", ".grancakongen_navn"),
            results_csv_path: path_or("GRANCAKONGEN_RESULTS_PATH", "results.csv"),
            athletes_sheet_gid: text_or("GRANCAKONGEN_UTOEVERE_GID", DEFAULT_ATHLETES_SHEET_GID),
            env_credentials: CredentialOverrides {
                cookie: lookup("STRAVA_COOKIE_HEADER"),
                csrf_token: lookup("STRAVA_CSRF_TOKEN"),
                user_agent: lookup("STRAVA_USER_AGENT"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_resolve_against_cwd() {
        let cwd = Path::new("/tmp/gk");
        let s = Settings::from_lookup(|_| None, cwd);
        assert_eq!(s.default_segment_id, DEFAULT_SEGMENT_ID);
        assert_eq!(s.curl_snippet_path, cwd.join(".strava_curl"));
        assert_eq!(s.results_csv_path, cwd.join("results.csv"));
        assert_eq!(s.athletes_sheet_gid, DEFAULT_ATHLETES_SHEET_GID);
        assert_eq!(s.env_credentials, CredentialOverrides::default());
    }

    #[test]
    fn env_values_override_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STRAVA_SEGMENT_ID", "123"),
            ("GRANCAKONGEN_RESULTS_PATH", "/data/out.csv"),
            ("STRAVA_CSRF_TOKEN", "tok"),
            ("GRANCAKONGEN_UTOEVERE_GID", "  "),
        ]);
        let s = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()), Path::new("/w"));
        assert_eq!(s.default_segment_id, "123");
        // absolutt sti vinner over cwd i PathBuf::join
        assert_eq!(s.results_csv_path, PathBuf::from("/data/out.csv"));
        assert_eq!(s.athletes_sheet_gid, DEFAULT_ATHLETES_SHEET_GID);
        assert_eq!(s.env_credentials.csrf_token.as_deref(), Some("tok"));
    }

    #[test]
    fn urls_are_built_from_templates() {
        assert_eq!(
            segment_history_url("987654"),
            "https://www.strava.com/athlete/segments/987654/history"
        );
        assert_eq!(segment_referer_url("1"), "https://www.strava.com/segments/1");
        assert!(sheet_export_url("42").ends_with("export?format=tsv&gid=42"));
    }
}
