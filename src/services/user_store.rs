// ==================== USER STORE ====================
// Two mutually exclusive deployments:
//   - IdentityUserStore: every read/write is proxied to the identity service
//   - KvUserStore: records live in the key-value store and are mirrored,
//     best-effort, to the identity service
//
// Neither variant serializes concurrent signups for the same email.

use crate::{
    models::{NewUser, UserRecord},
    services::{identity_service::IdentityApi, kv_store::KeyValueStore},
    utils::{error::AppError, id::generate_user_id},
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Result of a successful signup.
#[derive(Debug, Clone)]
pub struct SignupOutcome {
    pub message: &'static str,
    pub user: UserRecord,
    /// Set when the record was stored but the identity mirror failed.
    pub mirror_error: Option<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn signup(&self, new_user: NewUser) -> Result<SignupOutcome, AppError>;

    async fn login(&self, email: &str) -> Result<UserRecord, AppError>;

    /// `fields` is the raw request body.
    async fn profile(&self, fields: &Map<String, Value>) -> Result<UserRecord, AppError>;

    fn kind(&self) -> &'static str;
}

// ==================== VARIANT A: IDENTITY API ONLY ====================

pub struct IdentityUserStore {
    identity: Arc<dyn IdentityApi>,
    app_name: String,
}

impl IdentityUserStore {
    pub fn new(identity: Arc<dyn IdentityApi>, app_name: &str) -> Self {
        Self {
            identity,
            app_name: app_name.to_string(),
        }
    }
}

#[async_trait]
impl UserStore for IdentityUserStore {
    async fn signup(&self, new_user: NewUser) -> Result<SignupOutcome, AppError> {
        let exists = self
            .identity
            .email_exists(&new_user.email)
            .await
            .map_err(|e| AppError::internal("Signup failed", e))?;

        if exists {
            return Err(AppError::EmailExists(format!(
                "{} is already registered",
                new_user.email
            )));
        }

        let user = new_user.into_record(generate_user_id(&self.app_name), &self.app_name);

        self.identity.create_user(&user).await.map_err(|e| {
            log::error!("❌ Failed to write to identity API: {}", e);
            AppError::bad_gateway("Failed to write to identity API", e)
        })?;

        Ok(SignupOutcome {
            message: "User created via cache",
            user,
            mirror_error: None,
        })
    }

    async fn login(&self, email: &str) -> Result<UserRecord, AppError> {
        self.identity
            .authenticate(email)
            .await
            .map_err(|e| AppError::internal("Login failed", e))
    }

    async fn profile(&self, fields: &Map<String, Value>) -> Result<UserRecord, AppError> {
        self.identity
            .sync_profile(fields)
            .await
            .map_err(|e| AppError::internal("Profile fetch failed", e))
    }

    fn kind(&self) -> &'static str {
        "identity"
    }
}

// ==================== VARIANT B: KEY-VALUE BACKED ====================

pub struct KvUserStore {
    identity: Arc<dyn IdentityApi>,
    kv: Arc<dyn KeyValueStore>,
    app_name: String,
}

impl KvUserStore {
    pub fn new(identity: Arc<dyn IdentityApi>, kv: Arc<dyn KeyValueStore>, app_name: &str) -> Self {
        Self {
            identity,
            kv,
            app_name: app_name.to_string(),
        }
    }

    async fn lookup(&self, email: &str, failure: &'static str) -> Result<UserRecord, AppError> {
        match self.kv.get(email).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AppError::not_found(
                "User not found.",
                format!("No user registered with email {}", email),
            )),
            Err(e) => Err(AppError::internal(failure, e)),
        }
    }
}

#[async_trait]
impl UserStore for KvUserStore {
    async fn signup(&self, new_user: NewUser) -> Result<SignupOutcome, AppError> {
        let email = new_user.email.clone();

        let exists = self
            .identity
            .email_exists(&email)
            .await
            .map_err(|e| AppError::internal("Signup failed", e))?;
        if exists {
            return Err(AppError::EmailExists(format!("{} is already registered", email)));
        }

        let local = self
            .kv
            .get(&email)
            .await
            .map_err(|e| AppError::internal("Signup failed", e))?;
        if local.is_some() {
            return Err(AppError::EmailExists(format!("{} is already registered", email)));
        }

        let user = new_user.into_record(generate_user_id(&self.app_name), &self.app_name);

        self.kv
            .put(&email, &user)
            .await
            .map_err(|e| AppError::internal("Signup failed", e))?;

        // The key-value write is authoritative; a failed mirror is reported, not rolled back.
        let mirror_error = match self.identity.create_user(&user).await {
            Ok(()) => None,
            Err(e) => {
                log::warn!("⚠️  Identity mirror failed for {}: {}", email, e);
                Some(e)
            }
        };

        Ok(SignupOutcome {
            message: "User created.",
            user,
            mirror_error,
        })
    }

    async fn login(&self, email: &str) -> Result<UserRecord, AppError> {
        self.lookup(email, "Login failed").await
    }

    async fn profile(&self, fields: &Map<String, Value>) -> Result<UserRecord, AppError> {
        let email = fields
            .get("email")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::MissingFields("email is required".to_string()))?;

        self.lookup(email, "Profile fetch failed").await
    }

    fn kind(&self) -> &'static str {
        "kv"
    }
}
