use crate::core::coordinator::DEFAULT_ACCEPTED_CONTENT_TYPES;
use crate::domain::model::AuthorId;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_positive_number,
    validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

pub const STORE_TYPES: &[&str] = &["jsonl", "rest", "dry-run"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub import: ImportSection,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSection {
    #[serde(default = "default_author_id")]
    pub author_id: u64,
}

impl Default for ImportSection {
    fn default() -> Self {
        Self {
            author_id: default_author_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_type")]
    pub r#type: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            r#type: default_store_type(),
            output_path: default_output_path(),
            endpoint: None,
            username: None,
            password: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_content_types")]
    pub accepted_content_types: Vec<String>,
    pub admin_url: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accepted_content_types: default_content_types(),
            admin_url: None,
        }
    }
}

fn default_author_id() -> u64 {
    1
}

fn default_store_type() -> String {
    "jsonl".to_string()
}

fn default_output_path() -> String {
    "./output/pages.jsonl".to_string()
}

fn default_content_types() -> Vec<String> {
    DEFAULT_ACCEPTED_CONTENT_TYPES
        .iter()
        .map(|t| t.to_string())
        .collect()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ImportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CMS_PASSWORD})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn author(&self) -> AuthorId {
        AuthorId(self.import.author_id)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.store.timeout_seconds.unwrap_or(30)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_one_of("store.type", &self.store.r#type, STORE_TYPES)?;

        match self.store.r#type.as_str() {
            "jsonl" => validate_path("store.output_path", &self.store.output_path)?,
            "rest" => {
                let endpoint = validate_required_field("store.endpoint", &self.store.endpoint)?;
                validate_url("store.endpoint", endpoint)?;
                if let Some(username) = &self.store.username {
                    validate_non_empty_string("store.username", username)?;
                    validate_required_field("store.password", &self.store.password)?;
                }
            }
            _ => {}
        }

        if let Some(timeout) = self.store.timeout_seconds {
            validate_positive_number("store.timeout_seconds", timeout, 1)?;
        }

        if self.upload.accepted_content_types.is_empty() {
            return Err(ImportError::ConfigValidationError {
                field: "upload.accepted_content_types".to_string(),
                message: "At least one content type must be accepted".to_string(),
            });
        }

        if let Some(admin_url) = &self.upload.admin_url {
            validate_url("upload.admin_url", admin_url)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
