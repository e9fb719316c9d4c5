//! HTTP page fetcher
//!
//! Issues `GET {base_url}{route}?{query}` against the REST backend and decodes
//! the `{ "results": [...], "count": n }` envelope.

use super::{FetchError, FetchRequest, PageFetcher, PaginatedResponse};
use anyhow::{Context, Result};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::time::Duration;

/// Maximum number of error-body bytes carried into `FetchError::Status`
const MAX_ERROR_BODY: usize = 512;

/// Page fetcher backed by a shared reqwest client
pub struct HttpFetcher<T> {
    client: reqwest::Client,
    base_url: String,
    /// Sent with every request, before per-request headers
    default_headers: Vec<(String, String)>,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpFetcher<T> {
    /// Create a fetcher for `base_url` (e.g. `https://care.example.org`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .user_agent(concat!("carelist/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers: Vec::new(),
            _item: PhantomData,
        })
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>`
    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, request: &FetchRequest) -> Result<reqwest::RequestBuilder, FetchError> {
        let path = request.route.resolve(&request.path_params)?;
        let url = format!("{}{}", self.base_url, path);

        let mut req = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&request.query_params.to_pairs());

        for (name, value) in self.default_headers.iter().chain(request.headers.iter()) {
            req = req.header(name.as_str(), value.as_str());
        }

        Ok(req)
    }
}

impl<T> PageFetcher<T> for HttpFetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    fn fetch(
        &self,
        request: FetchRequest,
    ) -> BoxFuture<'static, Result<PaginatedResponse<T>, FetchError>> {
        let built = self.build_request(&request);
        let signal = request.signal;

        Box::pin(async move {
            let req = built?;
            let send = send_and_decode::<T>(req);

            match signal {
                Some(signal) => {
                    if signal.is_aborted() {
                        return Err(FetchError::Aborted);
                    }
                    tokio::select! {
                        result = send => result,
                        _ = signal.aborted() => Err(FetchError::Aborted),
                    }
                }
                None => send.await,
            }
        })
    }
}

async fn send_and_decode<T: DeserializeOwned>(
    req: reqwest::RequestBuilder,
) -> Result<PaginatedResponse<T>, FetchError> {
    let response = req
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let mut message = response.text().await.unwrap_or_default();
        if message.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
        }
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{AbortController, ApiRoute, QueryParams};
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::collections::{BTreeMap, HashMap};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Patient {
        id: u64,
        name: String,
    }

    async fn patients(
        Query(query): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> Result<Json<Value>, StatusCode> {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer t0k") {
            return Err(StatusCode::UNAUTHORIZED);
        }
        let limit: u64 = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(14);
        let offset: u64 = query.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
        let results: Vec<Value> = (offset..(offset + limit).min(42))
            .map(|i| json!({ "id": i, "name": format!("Patient {}", i) }))
            .collect();
        Ok(Json(json!({ "results": results, "count": 42 })))
    }

    async fn facility_assets(Path(facility): Path<String>) -> Json<Value> {
        Json(json!({ "results": [{ "id": 1, "name": facility }], "count": 1 }))
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/api/v1/patient/", get(patients))
            .route("/api/v1/facility/:facility/asset/", get(facility_assets))
            .route(
                "/api/v1/broken/",
                get(|| async { (StatusCode::OK, "not json") }),
            )
            .route(
                "/api/v1/down/",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
            )
            .route(
                "/api/v1/slow/",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Json(json!({ "results": [], "count": 0 }))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request(path: &str, query_params: QueryParams) -> FetchRequest {
        FetchRequest {
            route: ApiRoute::new(path),
            path_params: BTreeMap::new(),
            query_params,
            headers: Vec::new(),
            signal: None,
        }
    }

    #[tokio::test]
    async fn test_fetches_requested_window() {
        let base = spawn_server().await;
        let fetcher: HttpFetcher<Patient> = HttpFetcher::new(&base, Duration::from_secs(5))
            .unwrap()
            .with_bearer_token("t0k");

        let page = fetcher
            .fetch(request(
                "/api/v1/patient/",
                QueryParams::new().with("limit", 14u32).with("offset", 28u32),
            ))
            .await
            .unwrap();

        assert_eq!(page.count, 42);
        assert_eq!(page.results.len(), 14);
        assert_eq!(page.results[0].id, 28);
        assert_eq!(page.results[13].name, "Patient 41");
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let base = spawn_server().await;
        let fetcher: HttpFetcher<Patient> =
            HttpFetcher::new(&base, Duration::from_secs(5)).unwrap();

        let err = fetcher
            .fetch(request("/api/v1/patient/", QueryParams::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 401, .. }));

        let err = fetcher
            .fetch(request("/api/v1/down/", QueryParams::new()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                status: 503,
                message: "maintenance".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let base = spawn_server().await;
        let fetcher: HttpFetcher<Patient> =
            HttpFetcher::new(&base, Duration::from_secs(5)).unwrap();

        let err = fetcher
            .fetch(request("/api/v1/broken/", QueryParams::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_path_params_are_substituted() {
        let base = spawn_server().await;
        let fetcher: HttpFetcher<Patient> =
            HttpFetcher::new(&base, Duration::from_secs(5)).unwrap();

        let mut req = request("/api/v1/facility/{facility_id}/asset/", QueryParams::new());
        req.path_params
            .insert("facility_id".to_string(), "ward-7".to_string());

        let page = fetcher.fetch(req).await.unwrap();
        assert_eq!(page.results, vec![Patient { id: 1, name: "ward-7".into() }]);
    }

    #[tokio::test]
    async fn test_abort_signal_cancels_request() {
        let base = spawn_server().await;
        let fetcher: HttpFetcher<Patient> =
            HttpFetcher::new(&base, Duration::from_secs(60)).unwrap();

        let controller = AbortController::new();
        let mut req = request("/api/v1/slow/", QueryParams::new());
        req.signal = Some(controller.signal());

        let pending = tokio::spawn(fetcher.fetch(req));
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.abort();

        assert_eq!(pending.await.unwrap().unwrap_err(), FetchError::Aborted);
    }
}
