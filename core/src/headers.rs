// core/src/headers.rs
use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{segment_referer_url, DEFAULT_USER_AGENT};
use crate::error::ConfigError;

/// Header-navn (små bokstaver) -> verdi.
pub type HeaderMap = HashMap<String, String>;

/// `^` (cmd.exe) eller backtick (PowerShell) rett før linjeskift.
static WINDOWS_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\^|`)\s*\n").expect("static regex"));

fn normalize_continuations(command: &str) -> String {
    let posix = command
        .replace("\\\r\n", " ")
        .replace("\\\n", " ")
        .replace("\r\n", "\n");
    WINDOWS_CONTINUATION.replace_all(&posix, " ").into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagKind {
    Header,
    Cookie,
}

/// Gjenkjenner -H/--header/-b/--cookie i alle stavemåter.
/// Returnerer (type, inline-verdi); `None` som verdi betyr "neste token".
fn classify(token: &str) -> Option<(FlagKind, Option<&str>)> {
    let lowered = token.to_lowercase();
    if token == "-H" || lowered == "--header" {
        return Some((FlagKind::Header, None));
    }
    if lowered.starts_with("--header=") {
        return Some((FlagKind::Header, token.get("--header=".len()..)));
    }
    if token.len() > 2 && token.starts_with("-H") {
        return Some((FlagKind::Header, Some(&token[2..])));
    }
    if token == "-b" || lowered == "--cookie" {
        return Some((FlagKind::Cookie, None));
    }
    if lowered.starts_with("--cookie=") {
        return Some((FlagKind::Cookie, token.get("--cookie=".len()..)));
    }
    if token.len() > 2 && token.starts_with("-b") {
        return Some((FlagKind::Cookie, Some(&token[2..])));
    }
    None
}

fn store_header(headers: &mut HeaderMap, raw: &str) {
    let Some((name, value)) = raw.trim().split_once(':') else {
        return;
    };
    let name = name.trim().to_lowercase();
    let value = value.trim();
    if name.is_empty() || value.is_empty() {
        return;
    }
    headers.insert(name, value.to_string());
}

fn store_cookie(headers: &mut HeaderMap, raw: &str) {
    let cookie = raw.trim();
    // `@fil` betyr "les fra fil" i curl – vi gjør ingen fil-indireksjon
    if cookie.is_empty() || cookie.starts_with('@') {
        return;
    }
    headers.insert("cookie".to_string(), cookie.to_string());
}

/// Plukker headere ut av en innlimt cURL-kommando (POSIX eller Windows).
///
/// Best-effort: ugyldig quoting eller søppel gir tomt kart, aldri feil.
/// Senere forekomster av samme header overskriver tidligere.
pub fn parse_curl_headers(command: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if command.trim().is_empty() {
        return headers;
    }

    let normalized = normalize_continuations(command);
    let Some(tokens) = shlex::split(&normalized) else {
        debug!("cURL-snutt kunne ikke tokeniseres, ignorerer");
        return headers;
    };

    let mut idx = 0;
    while idx < tokens.len() {
        if let Some((kind, inline)) = classify(&tokens[idx]) {
            let value = match inline {
                Some(v) => Some(v),
                None => {
                    idx += 1;
                    tokens.get(idx).map(String::as_str)
                }
            };
            match (kind, value) {
                (FlagKind::Header, Some(v)) => store_header(&mut headers, v),
                (FlagKind::Cookie, Some(v)) => store_cookie(&mut headers, v),
                (_, None) => {}
            }
        }
        idx += 1;
    }

    headers
}

/// Leser cURL-snutten fra disk. Manglende/uleselig fil => tomt kart.
pub fn load_curl_headers(path: &Path) -> HeaderMap {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_curl_headers(&text),
        Err(e) => {
            debug!("ingen cURL-snutt på {}: {}", path.display(), e);
            HeaderMap::new()
        }
    }
}

/// Ett presedensnivå for påloggingsdata (eksplisitt argument eller miljø).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialOverrides {
    pub cookie: Option<String>,
    pub csrf_token: Option<String>,
    pub user_agent: Option<String>,
}

/// Ferdig header-sett for historikk-forespørselen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    pub cookie: String,
    pub csrf_token: String,
    pub user_agent: String,
    pub referer: String,
}

impl RequestHeaders {
    /// Alle headere i fast rekkefølge, klare for `ureq::Request::set`.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Accept", "application/javascript"),
            ("Cookie", self.cookie.as_str()),
            ("Referer", self.referer.as_str()),
            ("User-Agent", self.user_agent.as_str()),
            ("X-CSRF-Token", self.csrf_token.as_str()),
            ("X-Requested-With", "XMLHttpRequest"),
        ]
    }
}

fn first_non_blank<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

/// Presedens: eksplisitt > miljø > cURL-snutt > (kun user-agent) default.
pub fn build_headers(
    explicit: &CredentialOverrides,
    env: &CredentialOverrides,
    extracted: &HeaderMap,
    segment_id: &str,
) -> Result<RequestHeaders, ConfigError> {
    let cookie = first_non_blank(&[
        explicit.cookie.as_deref(),
        env.cookie.as_deref(),
        extracted.get("cookie").map(String::as_str),
    ]);
    let csrf_token = first_non_blank(&[
        explicit.csrf_token.as_deref(),
        env.csrf_token.as_deref(),
        extracted.get("x-csrf-token").map(String::as_str),
    ]);
    let user_agent = first_non_blank(&[
        explicit.user_agent.as_deref(),
        env.user_agent.as_deref(),
        extracted.get("user-agent").map(String::as_str),
    ])
    .unwrap_or(DEFAULT_USER_AGENT);

    let Some(cookie) = cookie else {
        warn!("ingen Cookie funnet for segment {segment_id}");
        return Err(ConfigError::MissingCookie);
    };
    let Some(csrf_token) = csrf_token else {
        warn!("ingen CSRF-token funnet for segment {segment_id}");
        return Err(ConfigError::MissingCsrfToken);
    };

    Ok(RequestHeaders {
        cookie: cookie.to_string(),
        csrf_token: csrf_token.to_string(),
        user_agent: user_agent.to_string(),
        referer: segment_referer_url(segment_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_all_spellings() {
        assert_eq!(classify("-H"), Some((FlagKind::Header, None)));
        assert_eq!(classify("--HEADER"), Some((FlagKind::Header, None)));
        assert_eq!(classify("-HAccept: x"), Some((FlagKind::Header, Some("Accept: x"))));
        assert_eq!(classify("--cookie=a=b"), Some((FlagKind::Cookie, Some("a=b"))));
        assert_eq!(classify("-ba=b"), Some((FlagKind::Cookie, Some("a=b"))));
        assert_eq!(classify("--compressed"), None);
        assert_eq!(classify("-X"), None);
    }

    #[test]
    fn normalize_joins_caret_and_backtick_lines() {
        let out = normalize_continuations("curl x ^\r\n  -H a `\n -b c");
        assert!(!out.contains('\n'), "linjeskift igjen: {out:?}");
        assert!(!out.contains('^') && !out.contains('`'));
    }
}
