use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::lifecycle::normalizer::{normalize, LifecycleEvent, RawEvent};
use crate::lifecycle::LifecycleType;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Source of raw lifecycle payloads.
#[async_trait]
pub trait LifecycleSource: Send + Sync {
    async fn fetch_lifecycle(&self, kind: LifecycleType, id: &str) -> Result<Value, ConsoleError>;
}

/// Outcome of one lifecycle lookup. When `valid` is false `events` is empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LifecycleResult {
    pub total_hits: i64,
    pub events: Vec<LifecycleEvent>,
    pub valid: bool,
}

impl LifecycleResult {
    fn invalid(total_hits: i64) -> Self {
        Self {
            total_hits,
            events: Vec::new(),
            valid: false,
        }
    }
}

pub struct LifecycleFetcher<S> {
    source: S,
}

impl<S: LifecycleSource> LifecycleFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// One attempt, no retry. Failures come back as an invalid result.
    pub async fn fetch_details(&self, kind: LifecycleType, id: &str) -> LifecycleResult {
        debug!(?kind, id, "fetching lifecycle");
        let payload = match self.source.fetch_lifecycle(kind, id).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(?kind, id, error = %err, "lifecycle fetch failed");
                return LifecycleResult::invalid(0);
            }
        };

        match parse_payload(&payload) {
            Ok(result) => {
                info!(?kind, id, events = result.events.len(), "lifecycle loaded");
                result
            }
            Err((total_hits, err)) => {
                warn!(?kind, id, error = %err, "lifecycle payload rejected");
                LifecycleResult::invalid(total_hits)
            }
        }
    }
}

/// Integral totals count whether the server wrote them as `1` or `1.0`;
/// anything else counts as no hits.
fn hit_count(total: &Value) -> i64 {
    total
        .as_i64()
        .or_else(|| {
            total
                .as_f64()
                .filter(|n| n.fract() == 0.0 && n.abs() <= i64::MAX as f64)
                .map(|n| n as i64)
        })
        .unwrap_or(0)
}

fn parse_payload(payload: &Value) -> Result<LifecycleResult, (i64, ConsoleError)> {
    let hits = match payload.get("hits") {
        Some(hits) if !hits.is_null() => hits,
        _ => {
            return Err((
                0,
                ConsoleError::InvalidResponseShape("hits missing".into()),
            ))
        }
    };

    let total_hits = hits.get("total").map(hit_count).unwrap_or(0);
    if total_hits != 1 {
        return Err((
            total_hits,
            ConsoleError::InvalidResponseShape(format!("expected 1 hit, got {}", total_hits)),
        ));
    }

    let raw: Vec<RawEvent> = payload
        .pointer("/result/events")
        .and_then(Value::as_array)
        .map(|events| {
            events
                .iter()
                .filter_map(|event| match event {
                    Value::Object(map) => Some(map.clone()),
                    other => {
                        warn!(entry = %other, "skipping non-object lifecycle event");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(LifecycleResult {
        total_hits,
        events: normalize(&raw),
        valid: true,
    })
}

/// Reads lifecycles from `{prefix}/{type}lifecycles/{id}`.
pub struct HttpLifecycleSource {
    client: reqwest::Client,
    config: ConsoleConfig,
}

impl HttpLifecycleSource {
    pub fn new(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        config.validate()?;
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }
}

#[async_trait]
impl LifecycleSource for HttpLifecycleSource {
    async fn fetch_lifecycle(&self, kind: LifecycleType, id: &str) -> Result<Value, ConsoleError> {
        let url = self.config.lifecycle_url(kind, id)?;
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;
        debug!(%url, status = response.status().as_u16(), "GET");
        Ok(response.json::<Value>().await?)
    }
}
