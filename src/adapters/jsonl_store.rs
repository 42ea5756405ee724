use crate::domain::model::{CreatedPage, PageDraft};
use crate::domain::ports::PageCreator;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// One line of the store file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPage {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub draft: PageDraft,
}

/// Local page store: appends each created page to a JSON-lines file.
#[derive(Debug)]
pub struct JsonlPageStore {
    path: PathBuf,
    last_id: Mutex<u64>,
}

impl JsonlPageStore {
    /// Opens (or prepares) the store file; ids continue after existing entries.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let last_id = if path.exists() {
            Self::read_pages_from(&path)?
                .iter()
                .map(|page| page.id)
                .max()
                .unwrap_or(0)
        } else {
            0
        };
        tracing::debug!("Opened page store {} (last id {})", path.display(), last_id);

        Ok(Self {
            path,
            last_id: Mutex::new(last_id),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_pages(&self) -> Result<Vec<StoredPage>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        Self::read_pages_from(&self.path)
    }

    fn read_pages_from(path: &Path) -> Result<Vec<StoredPage>> {
        let reader = BufReader::new(fs::File::open(path)?);
        let mut pages = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            pages.push(serde_json::from_str(&line)?);
        }
        Ok(pages)
    }
}

#[async_trait]
impl PageCreator for JsonlPageStore {
    async fn create_draft_page(&self, draft: &PageDraft) -> Result<CreatedPage> {
        let mut last_id = self.last_id.lock().await;
        let page = StoredPage {
            id: *last_id + 1,
            created_at: Utc::now(),
            draft: draft.clone(),
        };

        let mut line = serde_json::to_string(&page)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        *last_id = page.id;
        Ok(CreatedPage { id: page.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AuthorId, PageStatus};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_appends_pages_with_increasing_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonlPageStore::open(temp_dir.path().join("out/pages.jsonl")).unwrap();

        let first = PageDraft::new("About Us".to_string(), "Learn more".to_string(), AuthorId(3));
        let second = PageDraft::new("Services".to_string(), "Discover".to_string(), AuthorId(3));

        assert_eq!(store.create_draft_page(&first).await.unwrap().id, 1);
        assert_eq!(store.create_draft_page(&second).await.unwrap().id, 2);

        let pages = store.read_pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].draft, first);
        assert_eq!(pages[1].draft.title, "Services");
        assert_eq!(pages[1].draft.status, PageStatus::Draft);
    }

    #[tokio::test]
    async fn test_reopen_continues_ids() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pages.jsonl");
        let draft = PageDraft::new("Home".to_string(), String::new(), AuthorId(1));

        {
            let store = JsonlPageStore::open(&path).unwrap();
            store.create_draft_page(&draft).await.unwrap();
        }

        let store = JsonlPageStore::open(&path).unwrap();
        assert_eq!(store.create_draft_page(&draft).await.unwrap().id, 2);
        assert_eq!(store.read_pages().unwrap().len(), 2);
    }

    #[test]
    fn test_read_pages_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonlPageStore::open(temp_dir.path().join("pages.jsonl")).unwrap();
        assert!(store.read_pages().unwrap().is_empty());
    }
}
