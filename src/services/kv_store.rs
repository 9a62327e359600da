use crate::models::UserRecord;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// User records keyed by email. A miss is `Ok(None)`, never an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, email: &str) -> Result<Option<UserRecord>, String>;

    /// Overwrite-or-create, no concurrency check.
    async fn put(&self, email: &str, record: &UserRecord) -> Result<(), String>;
}

/// Redis-backed store. Values are JSON under `<namespace>:users:<email>`.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    manager: ConnectionManager,
    namespace: String,
}

impl RedisKeyValueStore {
    /// Connects to the first reachable host in `hosts`.
    pub async fn connect(hosts: &[String], namespace: &str) -> Result<Self, String> {
        let mut last_error = "no key-value hosts configured".to_string();

        for host in hosts {
            let client = match redis::Client::open(host.as_str()) {
                Ok(client) => client,
                Err(e) => {
                    log::warn!("⚠️  Invalid key-value host {}: {}", host, e);
                    last_error = format!("invalid host {}: {}", host, e);
                    continue;
                }
            };

            match ConnectionManager::new(client).await {
                Ok(manager) => {
                    log::info!("✅ Key-value store connected: {}", host);
                    return Ok(Self {
                        manager,
                        namespace: namespace.to_string(),
                    });
                }
                Err(e) => {
                    log::warn!("⚠️  Key-value host {} unreachable: {}", host, e);
                    last_error = format!("{}: {}", host, e);
                }
            }
        }

        Err(format!("Failed to connect to key-value store ({})", last_error))
    }

    fn key(&self, email: &str) -> String {
        user_key(&self.namespace, email)
    }
}

pub fn user_key(namespace: &str, email: &str) -> String {
    format!("{}:users:{}", namespace, email)
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, email: &str) -> Result<Option<UserRecord>, String> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn
            .get(self.key(email))
            .await
            .map_err(|e| format!("Key-value get failed: {}", e))?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| format!("Corrupt user record for {}: {}", email, e))
        })
        .transpose()
    }

    async fn put(&self, email: &str, record: &UserRecord) -> Result<(), String> {
        let json = serde_json::to_string(record)
            .map_err(|e| format!("Failed to encode user record: {}", e))?;

        let mut conn = self.manager.clone();
        conn.set::<_, _, ()>(self.key(email), json)
            .await
            .map_err(|e| format!("Key-value put failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_key_is_namespaced() {
        assert_eq!(user_key("rivas", "a@b.com"), "rivas:users:a@b.com");
    }

    #[tokio::test]
    async fn test_connect_fails_without_hosts() {
        let result = RedisKeyValueStore::connect(&[], "rivas").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_put_then_get() {
        dotenv::dotenv().ok();
        let hosts = vec![std::env::var("KV_HOSTS").unwrap_or_else(|_| "redis://127.0.0.1:6379".into())];
        let store = RedisKeyValueStore::connect(&hosts, "rivas-test").await.unwrap();

        let record = UserRecord {
            user_id: "rivas-test".into(),
            email: "kv@b.com".into(),
            name: "KV".into(),
            age: 22,
            app: "rivas".into(),
        };

        store.put("kv@b.com", &record).await.unwrap();
        assert_eq!(store.get("kv@b.com").await.unwrap(), Some(record));
        assert_eq!(store.get("missing@b.com").await.unwrap(), None);
    }
}
