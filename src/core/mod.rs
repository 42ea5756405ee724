pub mod coordinator;
pub mod processor;
pub mod sanitize;

pub use crate::domain::model::{AuthorId, CreatedPage, ImportOutcome, ImportStats, PageDraft};
pub use crate::domain::ports::PageCreator;
pub use crate::utils::error::Result;
