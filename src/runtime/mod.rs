//! Runtime configuration resolution.
//!
//! Everything in here is pure and synchronous. Persistence lives in
//! [`crate::service::runtime_config`], which feeds these functions.

pub mod bootstrap;
pub mod model;
pub mod redirect;
pub mod sources;
pub mod validation;

pub use bootstrap::{
    bootstrap, resolve_active, AppView, Bootstrap, CacheLocation, CachePolicy, ConfigSource,
    IdentityClientSettings,
};
pub use model::{Role, RuntimeConfig, CONFIG_STORAGE_KEY};
pub use sources::BuildEnv;
pub use validation::{
    is_disallowed, is_runtime_config_valid, is_valid_guid, validate_fields, FieldIssue,
};
