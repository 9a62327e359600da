use std::env;
use std::time::Duration;

/// Which backend owns user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStoreKind {
    /// All user reads and writes go through the identity service.
    Identity,
    /// User records live in the key-value store, mirrored to the identity service.
    KeyValue,
}

impl UserStoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStoreKind::Identity => "identity",
            UserStoreKind::KeyValue => "kv",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub identity_api_url: String,
    pub identity_timeout: Option<Duration>,
    pub app_name: String,
    pub user_store: UserStoreKind,
    pub kv_hosts: Vec<String>,
    pub kv_namespace: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = get("PORT", "7000")
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let identity_timeout = match lookup("IDENTITY_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| format!("Invalid IDENTITY_TIMEOUT_SECS: {}", e))?,
            )),
            None => None,
        };

        let user_store = match get("USER_STORE", "identity").to_lowercase().as_str() {
            "identity" => UserStoreKind::Identity,
            "kv" => UserStoreKind::KeyValue,
            other => {
                return Err(format!(
                    "Invalid USER_STORE: {}. Supported: identity, kv",
                    other
                ))
            }
        };

        let kv_hosts = split_list(&get("KV_HOSTS", "redis://127.0.0.1:6379"));
        if user_store == UserStoreKind::KeyValue && kv_hosts.is_empty() {
            return Err("KV_HOSTS must list at least one host".to_string());
        }

        Ok(Self {
            host: get("HOST", "0.0.0.0"),
            port,
            mongodb_uri: get("MONGODB_URI", "mongodb://localhost:27017"),
            mongodb_database: get("MONGODB_DATABASE", "rivas_db"),
            identity_api_url: get("IDENTITY_API_URL", "http://localhost:5000")
                .trim_end_matches('/')
                .to_string(),
            identity_timeout,
            app_name: get("APP_NAME", "rivas"),
            user_store,
            kv_hosts,
            kv_namespace: get("KV_NAMESPACE", "rivas"),
            cors_allowed_origins: split_list(&get("CORS_ALLOWED_ORIGINS", "http://localhost:3000")),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
