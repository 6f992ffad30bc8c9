//! REST client for the hosted backend store
//!
//! The store exposes a Postgres-flavored REST dialect: equality filters as
//! `column=eq.value` query parameters, `order`/`limit` parameters, and a
//! `Prefer: return=representation` header on writes so mutations hand back
//! the affected rows. Requests carry the service key; tenant scoping is a
//! query filter supplied by the caller.

use std::time::Duration;

use frontdesk_domain::{FrontdeskError, Result, StoreConfig};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::errors::{error_for_status, InfraError};
use crate::http::HttpClient;

/// An equality filter on one column.
#[derive(Debug, Clone)]
pub struct Filter {
    column: String,
    value: String,
}

impl Filter {
    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self { column: column.into(), value: value.to_string() }
    }

    fn query_pair(&self) -> (String, String) {
        (self.column.clone(), format!("eq.{}", self.value))
    }
}

/// Client for the hosted store's REST endpoint.
pub struct StoreClient {
    http: HttpClient,
    base_url: Url,
}

impl StoreClient {
    /// Build a client from the store configuration.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        // A missing trailing slash would make Url::join swallow the last
        // path segment of the base.
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
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key))
            .map_err(|_| FrontdeskError::Config("service key is not header-safe".into()))?;
        bearer.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, table: &str) -> Result<Url> {
        self.base_url.join(table).map_err(|err| {
            let infra: InfraError = err.into();
            FrontdeskError::from(infra)
        })
    }

    /// Select rows with equality filters, optional ordering, and a row cap.
    #[instrument(skip(self, filters))]
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<T>> {
        let mut url = self.endpoint(table)?;
        {
            let mut pairs = url.query_pairs_mut();
            for filter in filters {
                let (column, value) = filter.query_pair();
                pairs.append_pair(&column, &value);
            }
            if let Some(order) = order {
                pairs.append_pair("order", order);
            }
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }

        debug!(%url, "store select");
        let response = self.http.send(self.http.request(Method::GET, url)).await?;
        Self::decode_rows(response).await
    }

    /// Select a single row; `Ok(None)` when no row matches.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
    ) -> Result<Option<T>> {
        let mut rows = self.select::<T>(table, filters, None, Some(1)).await?;
        Ok(rows.pop())
    }

    /// Insert one row, returning the stored representation.
    #[instrument(skip(self, row))]
    pub async fn insert<T: Serialize + Sync, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<R> {
        let url = self.endpoint(table)?;
        let response = self
            .http
            .send(
                self.http
                    .request(Method::POST, url)
                    .header("Prefer", "return=representation")
                    .json(row),
            )
            .await?;

        let mut rows: Vec<R> = Self::decode_rows(response).await?;
        rows.pop().ok_or_else(|| {
            FrontdeskError::Store("insert returned no representation".to_string())
        })
    }

    /// Apply a partial update to the row with the given id, returning the
    /// updated representation. A vanished row is reported as not-found.
    #[instrument(skip(self, patch))]
    pub async fn update<P: Serialize + Sync, R: DeserializeOwned>(
        &self,
        table: &str,
        id: Uuid,
        patch: &P,
    ) -> Result<R> {
        let mut url = self.endpoint(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let response = self
            .http
            .send(
                self.http
                    .request(Method::PATCH, url)
                    .header("Prefer", "return=representation")
                    .json(patch),
            )
            .await?;

        let mut rows: Vec<R> = Self::decode_rows(response).await?;
        rows.pop().ok_or_else(|| FrontdeskError::NotFound(format!("{table} row {id}")))
    }

    /// Delete the row with the given id. Deleting an absent row is a no-op,
    /// matching the backend's semantics.
    #[instrument(skip(self))]
    pub async fn delete(&self, table: &str, id: Uuid) -> Result<()> {
        let mut url = self.endpoint(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let response = self.http.send(self.http.request(Method::DELETE, url)).await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &body))
    }

    async fn decode_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &body));
        }
        response.json::<Vec<T>>().await.map_err(|err| {
            let infra: InfraError = err.into();
            FrontdeskError::from(infra)
        })
    }
}
