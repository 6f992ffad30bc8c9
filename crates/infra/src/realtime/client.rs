//! SSE change-feed client
//!
//! Subscribes to a table's change stream on the hosted backend and pumps
//! decoded [`ChangeEvent`]s into a bounded channel in delivery order. The
//! stream is re-opened with exponential backoff when it drops; cancelling
//! the subscription token stops the pump.

use std::time::Duration;

use async_trait::async_trait;
use frontdesk_core::{ChangeFeed, ChangeSubscription, TenantScope};
use frontdesk_domain::constants::{CHANGE_FEED_BUFFER, TENANT_COLUMN};
use frontdesk_domain::{ChangeEvent, FrontdeskError, RealtimeConfig, Result, StoreConfig};
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::errors::InfraError;

/// Connection settings for the change-feed endpoint.
#[derive(Debug, Clone)]
pub struct RealtimeClientConfig {
    /// Base URL of the change-stream endpoint.
    pub base_url: String,
    /// Service key presented on every request.
    pub service_key: String,
    /// Initial reconnect backoff; doubles per consecutive failure.
    pub reconnect_backoff: Duration,
}

impl RealtimeClientConfig {
    /// Derive the feed settings from the store and realtime configuration.
    pub fn from_config(store: &StoreConfig, realtime: &RealtimeConfig) -> Self {
        Self {
            base_url: store.base_url.clone(),
            service_key: store.service_key.clone(),
            reconnect_backoff: Duration::from_millis(realtime.reconnect_backoff_ms),
        }
    }
}

/// [`ChangeFeed`] implementation over the backend's SSE endpoint.
pub struct RealtimeClient {
    client: reqwest::Client,
    base_url: Url,
    backoff: Duration,
}

impl RealtimeClient {
    /// Build a realtime client.
    pub fn new(config: &RealtimeClientConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|err| {
            let infra: InfraError = err.into();
            FrontdeskError::from(infra)
        })?;

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&config.service_key)
            .map_err(|_| FrontdeskError::Config("service key is not header-safe".into()))?;
        key.set_sensitive(true);
        headers.insert("apikey", key);

        // No overall timeout: the stream is long-lived by design. Connect
        // failures are handled by the reconnect loop.
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| {
                let infra: InfraError = err.into();
                FrontdeskError::from(infra)
            })?;

        Ok(Self { client, base_url, backoff: config.reconnect_backoff })
    }

    fn stream_url(&self, table: &str, scope: &TenantScope) -> Result<Url> {
        let mut url = self.base_url.join("changes").map_err(|err| {
            let infra: InfraError = err.into();
            FrontdeskError::from(infra)
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("table", table);
            if let Some(org) = scope.filter() {
                pairs.append_pair(TENANT_COLUMN, &format!("eq.{org}"));
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ChangeFeed for RealtimeClient {
    async fn subscribe(&self, table: &str, scope: &TenantScope) -> Result<ChangeSubscription> {
        let url = self.stream_url(table, scope)?;
        let (tx, rx) = mpsc::channel(CHANGE_FEED_BUFFER);
        let token = CancellationToken::new();

        let pump_token = token.clone();
        let client = self.client.clone();
        let backoff = self.backoff;
        let table = table.to_string();
        // Detached on purpose: the pump exits when the subscription guard
        // cancels the token or the receiver is dropped.
        let _pump = tokio::spawn(async move {
            pump(client, url, table, tx, pump_token, backoff).await;
        });

        Ok(ChangeSubscription::new(rx, token))
    }
}

/// Read the SSE stream until the subscription is cancelled or the consumer
/// goes away, reconnecting with backoff on stream loss.
async fn pump(
    client: reqwest::Client,
    url: Url,
    table: String,
    tx: mpsc::Sender<ChangeEvent>,
    token: CancellationToken,
    base_backoff: Duration,
) {
    let mut failures: u32 = 0;

    loop {
        if token.is_cancelled() || tx.is_closed() {
            return;
        }

        let connected = tokio::select! {
            () = token.cancelled() => return,
            response = client.get(url.clone()).header("Accept", "text/event-stream").send() => response,
        };

        match connected {
            Ok(response) if response.status().is_success() => {
                debug!(%url, table, "change stream connected");
                failures = 0;
                if !read_stream(response, &table, &tx, &token).await {
                    return;
                }
            }
            Ok(response) => {
                warn!(table, status = %response.status(), "change stream rejected");
            }
            Err(err) => {
                warn!(table, error = %err, "change stream connection failed");
            }
        }

        failures = failures.saturating_add(1);
        let delay = base_backoff.saturating_mul(1u32 << failures.min(6));
        tokio::select! {
            () = token.cancelled() => return,
            () = tokio::time::sleep(delay) => {}
        }
    }
}

/// Drain one connected stream. Returns `false` when pumping should stop for
/// good (cancelled or the consumer dropped), `true` to reconnect.
async fn read_stream(
    response: reqwest::Response,
    table: &str,
    tx: &mpsc::Sender<ChangeEvent>,
    token: &CancellationToken,
) -> bool {
    let mut stream = response.bytes_stream();
    let mut buffer = String::new();

    loop {
        let chunk = tokio::select! {
            () = token.cancelled() => return false,
            chunk = stream.next() => chunk,
        };

        match chunk {
            Some(Ok(bytes)) => {
                buffer.push_str(&String::from_utf8_lossy(&bytes));
                // SSE frames are separated by a blank line.
                while let Some(boundary) = buffer.find("\n\n") {
                    let frame = buffer[..boundary].to_string();
                    buffer.drain(..boundary + 2);
                    if let Some(event) = decode_frame(&frame) {
                        if tx.send(event).await.is_err() {
                            debug!(table, "change feed consumer dropped, stopping pump");
                            return false;
                        }
                    }
                }
            }
            Some(Err(err)) => {
                warn!(table, error = %err, "change stream read failed, reconnecting");
                return true;
            }
            None => {
                debug!(table, "change stream ended, reconnecting");
                return true;
            }
        }
    }
}

/// Decode one SSE frame's `data:` payload into a change event.
fn decode_frame(frame: &str) -> Option<ChangeEvent> {
    let data: String = frame
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n");

    if data.is_empty() {
        return None;
    }

    match serde_json::from_str::<ChangeEvent>(&data) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(error = %err, "undecodable change frame, skipping");
            None
        }
    }
}
