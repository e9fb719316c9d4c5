// Demo mode: serve a deterministic in-memory patient registry
//
// Lets the TUI run without a backend. Responses arrive after an artificial
// delay so loading states are visible, and every Nth request can be made to
// fail to show the error slot.
//
// Run with: CARELIST_DEMO=1 cargo run --release

use crate::request::{FetchError, FetchRequest, PageFetcher, PaginatedResponse};
use chrono::{Duration as ChronoDuration, NaiveDate};
use futures::future::BoxFuture;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Patients in the default registry
pub const DEMO_PATIENT_COUNT: usize = 137;

const GIVEN_NAMES: [&str; 12] = [
    "Asha", "Ravi", "Meera", "Arjun", "Fatima", "Joseph", "Lakshmi", "Vikram", "Anita", "Suresh",
    "Divya", "Kiran",
];

const FAMILY_NAMES: [&str; 9] = [
    "Nair", "Menon", "Pillai", "Thomas", "Kurian", "Varghese", "Iyer", "Rahman", "George",
];

const FACILITIES: [&str; 4] = [
    "District Hospital Ernakulam",
    "CHC Aluva",
    "PHC Kalamassery",
    "Taluk Hospital Perumbavoor",
];

const GENDERS: [&str; 3] = ["female", "male", "transgender"];

/// In-memory page fetcher over demo patient records
pub struct DemoFetcher {
    records: Arc<Vec<Value>>,
    latency: Duration,
    /// Fail every Nth request (1-based count) with a 503
    fail_every: Option<u64>,
    requests: AtomicU64,
}

impl DemoFetcher {
    /// Registry of `DEMO_PATIENT_COUNT` patients with a 350ms delay
    pub fn new() -> Self {
        Self::with_records(generate_patients(DEMO_PATIENT_COUNT))
            .with_latency(Duration::from_millis(350))
    }

    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(records),
            latency: Duration::ZERO,
            fail_every: None,
            requests: AtomicU64::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_fail_every(mut self, n: u64) -> Self {
        self.fail_every = (n > 0).then_some(n);
        self
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl Default for DemoFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher<Value> for DemoFetcher {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<PaginatedResponse<Value>, FetchError>> {
        let number = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        let fail = self.fail_every.is_some_and(|n| number % n == 0);
        let records = Arc::clone(&self.records);
        let latency = self.latency;

        Box::pin(async move {
            let wait = tokio::time::sleep(latency);
            match request.signal.clone() {
                Some(signal) => {
                    tokio::select! {
                        _ = wait => {}
                        _ = signal.aborted() => return Err(FetchError::Aborted),
                    }
                }
                None => wait.await,
            }

            if fail {
                tracing::debug!("Demo fetcher failing request #{}", number);
                return Err(FetchError::Status {
                    status: 503,
                    message: "Demo registry temporarily unavailable".to_string(),
                });
            }

            Ok(query_records(&records, &request))
        })
    }
}

/// Filter then window `records` the way the REST backend does
fn query_records(records: &[Value], request: &FetchRequest) -> PaginatedResponse<Value> {
    let params = &request.query_params;
    let name = params.text("name").map(|n| n.to_lowercase());
    let gender = params.text("gender");

    let matching: Vec<&Value> = records
        .iter()
        .filter(|r| match &name {
            Some(needle) => r["name"]
                .as_str()
                .is_some_and(|n| n.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .filter(|r| match &gender {
            Some(g) => r["gender"].as_str() == Some(g.as_str()),
            None => true,
        })
        .collect();

    let offset = usize::try_from(request.offset().unwrap_or(0).max(0)).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit().unwrap_or(14).max(0)).unwrap_or(usize::MAX);

    let results = matching
        .iter()
        .skip(offset)
        .take(limit)
        .map(|r| (*r).clone())
        .collect();

    PaginatedResponse::new(results, matching.len() as u64)
}

/// Deterministic patient records
pub fn generate_patients(count: usize) -> Vec<Value> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();

    (0..count)
        .map(|i| {
            let given = GIVEN_NAMES[i % GIVEN_NAMES.len()];
            let family = FAMILY_NAMES[(i / GIVEN_NAMES.len()) % FAMILY_NAMES.len()];
            let age = 1 + (i * 37) % 90;
            let last_visit = base_date + ChronoDuration::days(((i * 11) % 300) as i64);

            json!({
                "id": format!("P-{:05}", 10_001 + i),
                "name": format!("{} {}", given, family),
                "gender": GENDERS[i % GENDERS.len()],
                "age": age,
                "phone_number": format!("+91 9{:09}", (i * 7_919_113) % 1_000_000_000),
                "facility": FACILITIES[i % FACILITIES.len()],
                "last_encounter": last_visit.format("%Y-%m-%d").to_string(),
            })
        })
        .collect()
}
