// Adapters layer: concrete page stores behind the PageCreator port.

pub mod dry_run;
pub mod jsonl_store;
pub mod rest_store;

pub use dry_run::DryRunPageStore;
pub use jsonl_store::{JsonlPageStore, StoredPage};
pub use rest_store::RestPageStore;

use crate::config::toml_config::TomlConfig;
use crate::domain::ports::PageCreator;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::validate_required_field;
use std::time::Duration;

/// Builds the page store selected by `store.type`.
pub fn build_page_store(config: &TomlConfig) -> Result<Box<dyn PageCreator>> {
    match config.store.r#type.as_str() {
        "jsonl" => Ok(Box::new(JsonlPageStore::open(&config.store.output_path)?)),
        "rest" => {
            let endpoint = validate_required_field("store.endpoint", &config.store.endpoint)?;
            let mut store = RestPageStore::new(
                endpoint.clone(),
                Duration::from_secs(config.timeout_seconds()),
            )?;
            if let Some(username) = &config.store.username {
                let password = config.store.password.clone().unwrap_or_default();
                store = store.with_basic_auth(username.clone(), password);
            }
            Ok(Box::new(store))
        }
        "dry-run" => Ok(Box::new(DryRunPageStore::new())),
        other => Err(ImportError::InvalidConfigValueError {
            field: "store.type".to_string(),
            value: other.to_string(),
            reason: "Expected one of: jsonl, rest, dry-run".to_string(),
        }),
    }
}
