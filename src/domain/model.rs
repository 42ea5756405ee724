use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the user the created pages are attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub u64);

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Page,
}

/// One page creation request, derived from a single CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDraft {
    pub title: String,
    pub content: String,
    pub status: PageStatus,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub author: AuthorId,
}

impl PageDraft {
    pub fn new(title: String, content: String, author: AuthorId) -> Self {
        Self {
            title,
            content,
            status: PageStatus::Draft,
            post_type: PostType::Page,
            author,
        }
    }
}

/// What a store reports back after a successful creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPage {
    pub id: u64,
}

/// Result of one pass over a CSV document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Created(usize),
    MissingColumns,
    UnreadableFile,
}

impl ImportOutcome {
    pub fn created_count(&self) -> Option<usize> {
        match self {
            ImportOutcome::Created(count) => Some(*count),
            ImportOutcome::MissingColumns | ImportOutcome::UnreadableFile => None,
        }
    }
}

/// Per-pass counters, used for logging only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub rows_read: usize,
    pub blank_rows: usize,
    pub blank_titles: usize,
    pub failed: usize,
    pub created: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_draft_serializes_as_draft_page() {
        let draft = PageDraft::new("About Us".to_string(), "Learn more".to_string(), AuthorId(7));
        let json = serde_json::to_value(&draft).unwrap();

        assert_eq!(json["status"], "draft");
        assert_eq!(json["type"], "page");
        assert_eq!(json["author"], 7);
    }

    #[test]
    fn test_created_count_only_for_created() {
        assert_eq!(ImportOutcome::Created(3).created_count(), Some(3));
        assert_eq!(ImportOutcome::MissingColumns.created_count(), None);
        assert_eq!(ImportOutcome::UnreadableFile.created_count(), None);
    }
}
