pub mod config;
pub mod probe;
pub mod query;
pub mod runtime_config;
pub mod store;
