//! Paged collection fetch contract
//!
//! The list controller knows nothing about transports. It hands a
//! [`FetchRequest`] to a [`PageFetcher`] and expects a [`PaginatedResponse`]
//! back. `HttpFetcher` talks to the REST backend; `DemoFetcher` serves an
//! in-memory registry.

mod error;
pub mod http;

pub use error::FetchError;
pub use http::HttpFetcher;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tokio::sync::watch;

// ─────────────────────────────────────────────────────────────────────────────
// Route descriptor
// ─────────────────────────────────────────────────────────────────────────────

/// Descriptor identifying a collection endpoint
///
/// Paths may contain `{name}` placeholders, e.g. `/api/v1/facility/{facility_id}/asset/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiRoute {
    pub path: String,
}

impl ApiRoute {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Substitute `{name}` placeholders from `path_params`
    pub fn resolve(&self, path_params: &BTreeMap<String, String>) -> Result<String, FetchError> {
        let mut out = String::with_capacity(self.path.len());
        let mut rest = self.path.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                // Unterminated brace is literal text
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let name = &after[..end];
            let value = path_params
                .get(name)
                .ok_or_else(|| FetchError::InvalidRoute {
                    path: self.path.clone(),
                    missing: name.to_string(),
                })?;
            out.push_str(value);
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

impl fmt::Display for ApiRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Query parameters
// ─────────────────────────────────────────────────────────────────────────────

/// A single query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Text(String),
    Number(i64),
    /// Present in the map but omitted on the wire
    Unset,
}

impl QueryValue {
    /// Parse a CLI/config string
    ///
    /// Only canonical integers become `Number`; anything that would not print
    /// back identically ("0123", " 42", "+7") stays `Text`.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => Self::Number(n),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn as_wire(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Unset => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

/// Ordered query parameter map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &QueryValue)> {
        self.0.iter()
    }

    /// Text value for `key`, if set (numbers are rendered)
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(QueryValue::as_wire)
    }

    /// Numeric value for `key`, if it is a number
    pub fn number(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(QueryValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Key/value pairs to put on the wire (unset values dropped)
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_wire().map(|v| (k.clone(), v)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Parse a `key=value` pair as given on the command line
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Response shape
// ─────────────────────────────────────────────────────────────────────────────

/// One page of a collection, in server order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    pub count: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(results: Vec<T>, count: u64) -> Self {
        Self { results, count }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cancellation
// ─────────────────────────────────────────────────────────────────────────────

/// Owner side of an abort signal
#[derive(Debug)]
pub struct AbortController {
    tx: watch::Sender<bool>,
}

impl AbortController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }

    pub fn abort(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation token forwarded to fetchers
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the controller aborts; never resolves if it is dropped first
    pub async fn aborted(mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fetcher contract
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a fetcher needs to load one page
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub route: ApiRoute,
    pub path_params: BTreeMap<String, String>,
    /// Includes the controller-owned `limit` and `offset`
    pub query_params: QueryParams,
    pub headers: Vec<(String, String)>,
    pub signal: Option<AbortSignal>,
}

impl FetchRequest {
    pub fn limit(&self) -> Option<i64> {
        self.query_params.number("limit")
    }

    pub fn offset(&self) -> Option<i64> {
        self.query_params.number("offset")
    }
}

/// Loads one page of `T` from somewhere
///
/// The returned future must be `'static` so the controller can run it on its
/// own task; implementations clone what they need out of `self`.
pub trait PageFetcher<T>: Send + Sync {
    fn fetch(&self, request: FetchRequest)
        -> BoxFuture<'static, Result<PaginatedResponse<T>, FetchError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_resolves_placeholders() {
        let route = ApiRoute::new("/api/v1/facility/{facility_id}/asset/");
        let params = BTreeMap::from([("facility_id".to_string(), "f-17".to_string())]);
        assert_eq!(
            route.resolve(&params).unwrap(),
            "/api/v1/facility/f-17/asset/"
        );
    }

    #[test]
    fn test_route_reports_missing_placeholder() {
        let route = ApiRoute::new("/api/v1/users/{username}/");
        let err = route.resolve(&BTreeMap::new()).unwrap_err();
        assert_eq!(
            err,
            FetchError::InvalidRoute {
                path: "/api/v1/users/{username}/".to_string(),
                missing: "username".to_string(),
            }
        );
    }

    #[test]
    fn test_route_without_placeholders_is_unchanged() {
        let route = ApiRoute::new("/api/v1/patient/");
        assert_eq!(route.resolve(&BTreeMap::new()).unwrap(), "/api/v1/patient/");
    }

    #[test]
    fn test_unset_values_are_not_sent() {
        let params = QueryParams::new()
            .with("name", "ravi")
            .with("limit", 14u32)
            .with("phone_number", QueryValue::Unset);

        assert_eq!(
            params.to_pairs(),
            vec![
                ("limit".to_string(), "14".to_string()),
                ("name".to_string(), "ravi".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_value_parse() {
        assert_eq!(QueryValue::parse("42"), QueryValue::Number(42));
        assert_eq!(QueryValue::parse("male"), QueryValue::Text("male".into()));
        assert_eq!(QueryValue::parse("-3"), QueryValue::Number(-3));
        assert_eq!(QueryValue::parse("0123"), QueryValue::Text("0123".into()));
        assert_eq!(QueryValue::parse(" 42"), QueryValue::Text(" 42".into()));
        assert_eq!(QueryValue::parse("+7"), QueryValue::Text("+7".into()));
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("gender=female").unwrap(),
            ("gender".to_string(), "female".to_string())
        );
        assert_eq!(
            parse_key_value("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[tokio::test]
    async fn test_abort_signal_fires() {
        let controller = AbortController::new();
        let signal = controller.signal();
        assert!(!signal.is_aborted());

        let waiter = tokio::spawn(signal.clone().aborted());
        controller.abort();
        waiter.await.unwrap();
        assert!(signal.is_aborted());
    }
}
