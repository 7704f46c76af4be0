/// Synchronous client for the **REST Countries API (v3.1)**.
///
/// This module covers the bulk `/all` endpoint with a restricted field set and
/// returns results as normalized `models::CountryRecord` rows.
///
/// ### Notes
/// - The bulk endpoint rejects unrestricted requests with 400; the `fields`
///   parameter below keeps the query inside the allowed set.
/// - One malformed record does not fail the load; it lands in
///   `LoadReport::skipped` and the remaining records are kept.
/// - Network timeouts use a sane default (30s) and can be adjusted by editing
///   the client builder.
///
/// Typical usage:
/// ```no_run
/// # use rcd_rs::Client;
/// let client = Client::default();
/// let report = client.load()?;
/// println!("{} countries, {} skipped", report.records.len(), report.skipped.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
use crate::models::{FetchError, LoadReport, normalize};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fields requested from the API. Restricting the set keeps the bulk
/// endpoint from answering 400 and keeps payloads small.
pub const FIELDS: [&str; 8] = [
    "name",
    "capital",
    "region",
    "subregion",
    "population",
    "area",
    "flag",
    "flags",
];

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
    /// Memoized result of the fixed request. Shared across clones so a
    /// session issues the network request at most once until invalidated.
    cache: Arc<Mutex<Option<Arc<LoadReport>>>>,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("rcd_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "https://restcountries.com/v3.1".into(),
            http,
            cache: Arc::new(Mutex::new(None)),
        }
    }
}

// Allow -, _, . unescaped in field names
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(|s| percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl Client {
    /// Client against a different base URL (primarily for tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Issue the fixed request and return the raw country objects.
    ///
    /// ### Errors
    /// - Network/HTTP error after retrying transient failures
    /// - JSON decoding error
    /// - Response that is not a top-level array
    pub fn fetch_raw(&self) -> Result<Vec<Value>, FetchError> {
        let url = format!(
            "{}/all?fields={}",
            self.base_url,
            enc_join(FIELDS.iter().copied())
        );
        match self.get_json(&url)? {
            Value::Array(items) => Ok(items),
            _ => Err(FetchError::Payload("not a top-level array".into())),
        }
    }

    // Small retry for transient failures (5xx / network errors)
    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let mut last_err: Option<FetchError> = None;
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => {
                    let body = r.text().map_err(FetchError::Transport)?;
                    return serde_json::from_str(&body).map_err(FetchError::Decode);
                }
                Ok(r) if r.status().is_server_error() => {
                    last_err = Some(FetchError::Status(r.status())); // retry
                }
                Ok(r) => return Err(FetchError::Status(r.status())),
                Err(e) => last_err = Some(FetchError::Transport(e)),
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        Err(last_err.unwrap_or_else(|| FetchError::Payload("retries exhausted".into())))
    }

    /// Fetch and normalize the full country set, memoized per session.
    ///
    /// The first call issues the network request; later calls return the
    /// cached report until [`Client::invalidate`] or [`Client::refresh`].
    /// Malformed records are collected into `LoadReport::skipped` instead of
    /// failing the load.
    pub fn load(&self) -> Result<Arc<LoadReport>, FetchError> {
        if let Some(cached) = self.cache.lock().expect("cache lock poisoned").as_ref() {
            return Ok(Arc::clone(cached));
        }

        let raw = self.fetch_raw()?;
        let mut report = LoadReport::default();
        for value in &raw {
            match normalize(value) {
                Ok(record) => report.records.push(record),
                Err(skip) => report.skipped.push(skip),
            }
        }

        let report = Arc::new(report);
        *self.cache.lock().expect("cache lock poisoned") = Some(Arc::clone(&report));
        Ok(report)
    }

    /// Drop the memoized dataset; the next [`Client::load`] re-issues the request.
    pub fn invalidate(&self) {
        *self.cache.lock().expect("cache lock poisoned") = None;
    }

    /// Invalidate and reload in one step.
    pub fn refresh(&self) -> Result<Arc<LoadReport>, FetchError> {
        self.invalidate();
        self.load()
    }
}
