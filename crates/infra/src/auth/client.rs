//! Password auth client for the hosted auth service
//!
//! Covers the dashboard's auth contract: sign-in, sign-up, sign-out,
//! current-session lookup, and profile resolution. Sign-up creates the
//! profile row; a session whose profile row is missing gets a minimal one
//! bootstrapped with the default role, matching the dashboard's historical
//! behavior.

use std::sync::Arc;
use std::time::Duration;

use frontdesk_domain::{
    AuthConfig, AuthSession, FrontdeskError, Result, UserProfile, UserRole,
};
use frontdesk_core::UserDirectory;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::errors::{error_for_status, InfraError};
use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
}

/// Client for the hosted auth endpoint plus profile resolution.
pub struct AuthClient {
    http: HttpClient,
    base_url: Url,
    users: Arc<dyn UserDirectory>,
}

impl AuthClient {
    /// Build an auth client from configuration and the profile directory.
    pub fn new(config: &AuthConfig, users: Arc<dyn UserDirectory>) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|err| {
            let infra: InfraError = err.into();
            FrontdeskError::from(infra)
        })?;

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| FrontdeskError::Config("auth api key is not header-safe".into()))?;
        key.set_sensitive(true);
        headers.insert("apikey", key);

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url, users })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|err| {
            let infra: InfraError = err.into();
            FrontdeskError::from(infra)
        })
    }

    /// Exchange email/password credentials for a session.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .http
            .send(
                self.http
                    .request(Method::POST, url)
                    .json(&serde_json::json!({ "email": email, "password": password })),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Credential rejections come back as 400s from the auth service.
            if status.is_client_error() {
                return Err(FrontdeskError::Auth(body));
            }
            return Err(error_for_status(status, &body));
        }

        let token: TokenResponse = response.json().await.map_err(|err| {
            let infra: InfraError = err.into();
            FrontdeskError::from(infra)
        })?;

        info!(user_id = %token.user.id, "signed in");
        Ok(AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
            user_id: token.user.id,
        })
    }

    /// Register a new account and create its profile row with the default
    /// role.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        organization_id: Option<Uuid>,
    ) -> Result<UserProfile> {
        let url = self.endpoint("signup")?;
        let response = self
            .http
            .send(
                self.http
                    .request(Method::POST, url)
                    .json(&serde_json::json!({ "email": email, "password": password })),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.is_client_error() {
                return Err(FrontdeskError::Auth(body));
            }
            return Err(error_for_status(status, &body));
        }

        let user: AuthUser = response.json().await.map_err(|err| {
            let infra: InfraError = err.into();
            FrontdeskError::from(infra)
        })?;

        let profile = UserProfile {
            id: user.id,
            organization_id,
            email: email.to_string(),
            full_name: full_name.to_string(),
            role: UserRole::User,
            phone: None,
            is_active: true,
        };
        let stored = self.users.insert(&profile).await?;
        info!(user_id = %stored.id, "account registered");
        Ok(stored)
    }

    /// Revoke the session behind `access_token`.
    #[instrument(skip(self, access_token))]
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = self.endpoint("logout")?;
        let response = self
            .http
            .send(self.http.request(Method::POST, url).bearer_auth(access_token))
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &body))
    }

    /// Resolve the user behind an access token.
    #[instrument(skip(self, access_token))]
    pub async fn current_user(&self, access_token: &str) -> Result<Uuid> {
        let url = self.endpoint("user")?;
        let response = self
            .http
            .send(self.http.request(Method::GET, url).bearer_auth(access_token))
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FrontdeskError::Auth(if body.is_empty() {
                "invalid or expired session".to_string()
            } else {
                body
            }));
        }

        let user: AuthUser = response.json().await.map_err(|err| {
            let infra: InfraError = err.into();
            FrontdeskError::from(infra)
        })?;
        Ok(user.id)
    }

    /// Fetch the profile for a user id, bootstrapping a minimal row with the
    /// default role when none exists yet.
    pub async fn profile_for(&self, user_id: Uuid) -> Result<UserProfile> {
        if let Some(profile) = self.users.fetch(user_id).await? {
            return Ok(profile);
        }

        warn!(%user_id, "no profile row for session user, bootstrapping one");
        let minimal = UserProfile {
            id: user_id,
            organization_id: None,
            email: String::new(),
            full_name: String::new(),
            role: UserRole::User,
            phone: None,
            is_active: true,
        };
        self.users.insert(&minimal).await
    }

    /// Resolve an access token all the way to a profile.
    pub async fn profile_for_token(&self, access_token: &str) -> Result<UserProfile> {
        let user_id = self.current_user(access_token).await?;
        self.profile_for(user_id).await
    }
}
