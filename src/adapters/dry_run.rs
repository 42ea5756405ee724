use crate::domain::model::{CreatedPage, PageDraft};
use crate::domain::ports::PageCreator;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

/// Logs each draft instead of storing it.
#[derive(Debug, Default)]
pub struct DryRunPageStore {
    counter: AtomicU64,
}

impl DryRunPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn planned(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PageCreator for DryRunPageStore {
    async fn create_draft_page(&self, draft: &PageDraft) -> Result<CreatedPage> {
        let id = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            "🔍 [dry run] would create draft page #{} '{}' ({} bytes of content)",
            id,
            draft.title,
            draft.content.len()
        );
        Ok(CreatedPage { id })
    }
}
