//! In-memory stand-ins for the external stores, used by handler and store tests.

use crate::{
    models::{ProgressEntry, RatingEntry, UserRecord, WatchlistEntry},
    services::{app_data_service::AppDataStore, identity_service::IdentityApi, kv_store::KeyValueStore},
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeIdentity {
    users: Mutex<HashMap<String, UserRecord>>,
    check_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fail_check: AtomicBool,
    fail_create: AtomicBool,
}

impl FakeIdentity {
    pub fn with_user(user: UserRecord) -> Self {
        let fake = Self::default();
        fake.users.lock().unwrap().insert(user.email.clone(), user);
        fake
    }

    pub fn fail_check(&self, fail: bool) {
        self.fail_check.store(fail, Ordering::SeqCst);
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityApi for FakeIdentity {
    async fn email_exists(&self, email: &str) -> Result<bool, String> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_check.load(Ordering::SeqCst) {
            return Err("Identity check failed: connection refused".to_string());
        }
        Ok(self.users.lock().unwrap().contains_key(email))
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), String> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err("Identity API error on /identity: 503 Service Unavailable".to_string());
        }
        self.users.lock().unwrap().insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn authenticate(&self, email: &str) -> Result<UserRecord, String> {
        self.users
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .ok_or_else(|| "Identity API error on /auth: 404 Not Found".to_string())
    }

    async fn sync_profile(&self, fields: &Map<String, Value>) -> Result<UserRecord, String> {
        let email = fields.get("email").and_then(Value::as_str).unwrap_or_default();
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(email)
            .ok_or_else(|| "Identity API error on /identity: 404 Not Found".to_string())?;

        if let Some(name) = fields.get("name").and_then(Value::as_str) {
            user.name = name.to_string();
        }
        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct InMemoryKv {
    records: Mutex<HashMap<String, UserRecord>>,
    put_calls: AtomicUsize,
    fail_get: AtomicBool,
    fail_put: AtomicBool,
}

impl InMemoryKv {
    /// Fails both reads and writes.
    pub fn fail(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn fail_put(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKv {
    async fn get(&self, email: &str) -> Result<Option<UserRecord>, String> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err("Key-value get failed: connection reset".to_string());
        }
        Ok(self.records.lock().unwrap().get(email).cloned())
    }

    async fn put(&self, email: &str, record: &UserRecord) -> Result<(), String> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err("Key-value put failed: connection reset".to_string());
        }
        self.records
            .lock()
            .unwrap()
            .insert(email.to_string(), record.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAppData {
    pub watchlist: Mutex<Vec<WatchlistEntry>>,
    pub progress: Mutex<Vec<ProgressEntry>>,
    pub ratings: Mutex<Vec<RatingEntry>>,
    fail: AtomicBool,
}

impl InMemoryAppData {
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("Database error: server selection timeout".to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl AppDataStore for InMemoryAppData {
    async fn add_to_watchlist(&self, entry: &WatchlistEntry) -> Result<(), String> {
        self.check()?;
        self.watchlist.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn update_progress(&self, entry: &ProgressEntry) -> Result<(), String> {
        self.check()?;
        let mut rows = self.progress.lock().unwrap();
        match rows
            .iter_mut()
            .find(|row| row.user_id == entry.user_id && row.movie_id == entry.movie_id)
        {
            Some(row) => row.progress = entry.progress.clone(),
            None => rows.push(entry.clone()),
        }
        Ok(())
    }

    async fn rate_movie(&self, entry: &RatingEntry) -> Result<(), String> {
        self.check()?;
        self.ratings.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
