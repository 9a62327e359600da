pub mod app_data_service;
pub mod identity_service;
pub mod kv_store;
pub mod user_store;
