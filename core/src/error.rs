// core/src/error.rs
use thiserror::Error;

/// Manglende påloggingsdata etter alle fallback-nivåer (arg → env → cURL-snutt).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("A Cookie header is required (use --cookie, STRAVA_COOKIE_HEADER or a -H/-b flag in the cURL snippet)")]
    MissingCookie,
    #[error("A CSRF token is required (use --csrf-token, STRAVA_CSRF_TOKEN or an X-CSRF-Token header in the cURL snippet)")]
    MissingCsrfToken,
}

/// Feil fra HTTP-samarbeidspartnerne (Strava og Google Sheets).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("could not read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unexpected JSON from {url} at `{path}`: {message}")]
    Json {
        url: String,
        path: String,
        message: String,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum NavnError {
    #[error("NAVN kan ikke være tomt")]
    Empty,
    #[error("Ugyldig valg: skriv et tall mellom 1 og {max} eller et navn.")]
    InvalidChoice { max: usize },
    #[error("NAVN-cache: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("could not decode TSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
