// HTTP timing provider client with a local disk cache
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::application::session_repository::{SessionQuery, SessionRepository};
use crate::domain::session::{Lap, SessionData};
use crate::domain::telemetry::{TelemetrySample, TelemetryTrace};

/// Fetches session telemetry over HTTP and caches the raw payload on disk,
/// so repeated runs against the same session never re-download.
#[derive(Debug, Clone)]
pub struct HttpSessionRepository {
    base_url: String,
    cache_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    laps: Vec<LapRecord>,
}

#[derive(Debug, Deserialize)]
struct LapRecord {
    driver: String,
    lap_number: u32,
    lap_time_ms: u64,
    samples: Vec<SampleRecord>,
}

/// Wire sample. The provider reports session-clock time in milliseconds;
/// mapping rebases it to seconds since the first sample of the lap.
#[derive(Debug, Deserialize)]
struct SampleRecord {
    time_ms: f64,
    distance_m: f64,
    speed_kmh: f64,
}

impl HttpSessionRepository {
    pub fn new(base_url: String, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_dir: cache_dir.into(),
        }
    }

    fn session_url(&self, query: &SessionQuery) -> String {
        format!(
            "{}/sessions/{}/{}/{}/telemetry",
            self.base_url,
            query.year,
            urlencoding::encode(&query.circuit),
            urlencoding::encode(&query.session_type)
        )
    }

    fn cache_path(&self, query: &SessionQuery) -> PathBuf {
        let name = format!(
            "{}_{}_{}.json",
            query.year,
            query.circuit.to_lowercase().replace(' ', "_"),
            query.session_type.to_lowercase()
        );
        self.cache_dir.join(name)
    }

    async fn load_or_fetch(&self, query: &SessionQuery) -> Result<String> {
        let path = self.cache_path(query);
        if path.exists() {
            tracing::debug!("Session cache hit: {}", path.display());
            return std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read cached session {}", path.display()));
        }

        let body = self.fetch_remote(query).await?;

        std::fs::create_dir_all(&self.cache_dir).with_context(|| {
            format!("failed to create cache dir {}", self.cache_dir.display())
        })?;
        std::fs::write(&path, &body)
            .with_context(|| format!("failed to write session cache {}", path.display()))?;
        tracing::debug!("Session cached at {}", path.display());

        Ok(body)
    }

    async fn fetch_remote(&self, query: &SessionQuery) -> Result<String> {
        let url = self.session_url(query);
        tracing::info!("Fetching session telemetry from {}", url);

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("failed to send request to timing provider")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "timing provider request failed with status {}: {}",
                status,
                body
            );
        }

        response
            .text()
            .await
            .context("failed to read timing provider response")
    }

    fn parse_session(body: &str) -> Result<SessionData> {
        let response: SessionResponse =
            serde_json::from_str(body).context("failed to parse session payload")?;

        let mut laps = Vec::with_capacity(response.laps.len());
        for record in response.laps {
            let t0_ms = record.samples.first().map_or(0.0, |s| s.time_ms);
            let samples: Vec<TelemetrySample> = record
                .samples
                .iter()
                .map(|s| TelemetrySample {
                    time_s: (s.time_ms - t0_ms) / 1000.0,
                    distance_m: s.distance_m,
                    speed_kmh: s.speed_kmh,
                })
                .collect();

            let trace = TelemetryTrace::new(record.driver.clone(), samples).with_context(|| {
                format!(
                    "lap {} of {} has unusable telemetry",
                    record.lap_number, record.driver
                )
            })?;
            laps.push(Lap {
                driver: record.driver,
                number: record.lap_number,
                lap_time_s: record.lap_time_ms as f64 / 1000.0,
                trace,
            });
        }

        Ok(SessionData::new(laps))
    }
}

#[async_trait]
impl SessionRepository for HttpSessionRepository {
    async fn fetch_session(&self, query: &SessionQuery) -> Result<SessionData> {
        let body = self.load_or_fetch(query).await?;
        Self::parse_session(&body)
    }
}
