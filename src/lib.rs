pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{build_page_store, DryRunPageStore, JsonlPageStore, RestPageStore};
pub use config::TomlConfig;
pub use crate::core::coordinator::{Notice, NoticeKind, UploadCoordinator, UploadedFile};
pub use crate::core::processor::CsvImportProcessor;
pub use domain::model::{AuthorId, CreatedPage, ImportOutcome, ImportStats, PageDraft};
pub use domain::ports::PageCreator;
pub use utils::error::{ImportError, Result};
