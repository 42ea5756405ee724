use crate::domain::model::{CreatedPage, PageDraft};
use crate::domain::ports::PageCreator;
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct CreatePageRequest<'a> {
    title: &'a str,
    content: &'a str,
    status: &'a str,
    author: u64,
}

#[derive(Debug, Deserialize)]
struct CreatePageResponse {
    id: u64,
}

/// Page store backed by a CMS REST endpoint, e.g. `/wp-json/wp/v2/pages`.
#[derive(Debug, Clone)]
pub struct RestPageStore {
    client: Client,
    endpoint: String,
    username: Option<String>,
    password: Option<String>,
}

impl RestPageStore {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            username: None,
            password: None,
        })
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PageCreator for RestPageStore {
    async fn create_draft_page(&self, draft: &PageDraft) -> Result<CreatedPage> {
        let body = CreatePageRequest {
            title: &draft.title,
            content: &draft.content,
            status: "draft",
            author: draft.author.0,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_ref());
        }

        tracing::debug!("POST {} for '{}'", self.endpoint, draft.title);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ImportError::PageRejected {
                title: draft.title.clone(),
                reason: format!("HTTP {}: {}", status.as_u16(), text),
            });
        }

        let created: CreatePageResponse = response.json().await?;
        Ok(CreatedPage { id: created.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AuthorId;
    use httpmock::prelude::*;

    fn draft() -> PageDraft {
        PageDraft::new(
            "About Us".to_string(),
            "<p>Learn more</p>".to_string(),
            AuthorId(4),
        )
    }

    #[tokio::test]
    async fn test_posts_draft_page() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/wp-json/wp/v2/pages")
                .header("Authorization", "Basic YWRtaW46c2VjcmV0")
                .json_body(serde_json::json!({
                    "title": "About Us",
                    "content": "<p>Learn more</p>",
                    "status": "draft",
                    "author": 4
                }));
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": 42, "status": "draft"}));
        });

        let store = RestPageStore::new(server.url("/wp-json/wp/v2/pages"), Duration::from_secs(5))
            .unwrap()
            .with_basic_auth("admin", "secret");

        let created = store.create_draft_page(&draft()).await.unwrap();

        api_mock.assert();
        assert_eq!(created.id, 42);
    }

    #[tokio::test]
    async fn test_rejection_becomes_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/pages");
            then.status(403).body("forbidden");
        });

        let store = RestPageStore::new(server.url("/pages"), Duration::from_secs(5)).unwrap();
        let err = store.create_draft_page(&draft()).await.unwrap_err();

        api_mock.assert();
        match err {
            ImportError::PageRejected { title, reason } => {
                assert_eq!(title, "About Us");
                assert!(reason.contains("403"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
