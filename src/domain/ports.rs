use crate::domain::model::{CreatedPage, PageDraft};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The host's "create draft page" capability.
#[async_trait]
pub trait PageCreator: Send + Sync {
    async fn create_draft_page(&self, draft: &PageDraft) -> Result<CreatedPage>;
}

#[async_trait]
impl<T: PageCreator + ?Sized> PageCreator for Box<T> {
    async fn create_draft_page(&self, draft: &PageDraft) -> Result<CreatedPage> {
        (**self).create_draft_page(draft).await
    }
}

#[async_trait]
impl<T: PageCreator + ?Sized> PageCreator for std::sync::Arc<T> {
    async fn create_draft_page(&self, draft: &PageDraft) -> Result<CreatedPage> {
        (**self).create_draft_page(draft).await
    }
}
