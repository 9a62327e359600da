// ==================== IDENTITY SERVICE CLIENT ====================
// External system of record for global email uniqueness and authentication.
// Every call is a single request; failures are returned as-is, never retried.

use crate::models::UserRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

const APP_NAME_HEADER: &str = "x-app-name";

#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Global existence check for an email.
    async fn email_exists(&self, email: &str) -> Result<bool, String>;

    /// Registers a full user record with the identity service.
    async fn create_user(&self, user: &UserRecord) -> Result<(), String>;

    /// Looks a user up by email. Not-found is reported as a plain error.
    async fn authenticate(&self, email: &str) -> Result<UserRecord, String>;

    /// Pushes arbitrary profile fields and returns the resulting record.
    async fn sync_profile(&self, fields: &Map<String, Value>) -> Result<UserRecord, String>;
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    exists: bool,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: Option<UserRecord>,
}

#[derive(Serialize)]
struct UserPayload<'a, T: Serialize> {
    user: &'a T,
}

#[derive(Serialize)]
struct AuthPayload<'a> {
    email: &'a str,
}

/// reqwest-backed identity client, namespaced by the `x-app-name` header.
#[derive(Clone)]
pub struct HttpIdentityClient {
    http: reqwest::Client,
    base_url: String,
    app_name: String,
}

impl HttpIdentityClient {
    pub fn new(base_url: &str, app_name: &str, timeout: Option<Duration>) -> Result<Self, String> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| format!("Failed to build identity HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_name: app_name.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_for_user<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<UserRecord, String> {
        let response = self
            .http
            .post(self.url(path))
            .header(APP_NAME_HEADER, &self.app_name)
            .json(body)
            .send()
            .await
            .map_err(|e| format!("Identity request to {} failed: {}", path, e))?;

        if !response.status().is_success() {
            return Err(format!("Identity API error on {}: {}", path, response.status()));
        }

        let envelope: UserEnvelope = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse identity response: {}", e))?;

        envelope
            .user
            .ok_or_else(|| format!("Identity API returned no user on {}", path))
    }
}

#[async_trait]
impl IdentityApi for HttpIdentityClient {
    async fn email_exists(&self, email: &str) -> Result<bool, String> {
        log::debug!("🔎 Identity check for {}", email);

        let response = self
            .http
            .get(self.url("/check"))
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| format!("Identity check failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Identity API error on /check: {}", response.status()));
        }

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse identity check response: {}", e))?;

        Ok(body.exists)
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), String> {
        let response = self
            .http
            .post(self.url("/identity"))
            .header(APP_NAME_HEADER, &self.app_name)
            .json(&UserPayload { user })
            .send()
            .await
            .map_err(|e| format!("Identity write failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Identity API error on /identity: {}", response.status()));
        }

        Ok(())
    }

    async fn authenticate(&self, email: &str) -> Result<UserRecord, String> {
        self.post_for_user("/auth", &AuthPayload { email }).await
    }

    async fn sync_profile(&self, fields: &Map<String, Value>) -> Result<UserRecord, String> {
        self.post_for_user("/identity", &UserPayload { user: fields }).await
    }
}
