use crate::core::processor::CsvImportProcessor;
use crate::domain::model::{AuthorId, ImportOutcome};
use crate::domain::ports::PageCreator;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::validate_file_extension;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_ACCEPTED_CONTENT_TYPES: &[&str] = &["text/csv", "application/vnd.ms-excel"];

/// A file handed over by the upload form, already stored in a temporary location.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: String,
    pub temp_path: PathBuf,
    pub upload_ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// Message shown to the administrator after an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }

    /// Admin page URL with the notice attached as `success=` or `error=`.
    pub fn redirect_location(&self, admin_url: &str) -> Result<Url> {
        let mut url = Url::parse(admin_url).map_err(|e| ImportError::InvalidConfigValueError {
            field: "upload.admin_url".to_string(),
            value: admin_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        url.query_pairs_mut()
            .append_pair(self.kind.as_str(), &self.message);
        Ok(url)
    }
}

impl From<ImportOutcome> for Notice {
    fn from(outcome: ImportOutcome) -> Self {
        match outcome {
            ImportOutcome::MissingColumns => {
                Notice::error("CSV must have \"title\" and \"description\" columns.")
            }
            ImportOutcome::UnreadableFile => Notice::error("Error processing CSV file."),
            ImportOutcome::Created(0) => Notice::error("No valid rows found in CSV."),
            ImportOutcome::Created(1) => Notice::success("1 page created."),
            ImportOutcome::Created(count) => Notice::success(format!("{} pages created.", count)),
        }
    }
}

/// Checks an upload, runs the import once and reports the result as a notice.
///
/// Authorization and anti-forgery checks belong to the host and must have
/// passed before `handle_upload` is called.
pub struct UploadCoordinator<P: PageCreator> {
    processor: CsvImportProcessor<P>,
    accepted_content_types: Vec<String>,
}

impl<P: PageCreator> UploadCoordinator<P> {
    pub fn new(processor: CsvImportProcessor<P>) -> Self {
        Self {
            processor,
            accepted_content_types: DEFAULT_ACCEPTED_CONTENT_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    pub fn with_accepted_content_types(mut self, content_types: Vec<String>) -> Self {
        self.accepted_content_types = content_types;
        self
    }

    pub fn processor(&self) -> &CsvImportProcessor<P> {
        &self.processor
    }

    fn is_acceptable(&self, file: &UploadedFile) -> bool {
        if let Err(e) = validate_file_extension("csv_file", &file.original_name, &["csv"]) {
            tracing::debug!("Upload rejected: {}", e);
            return false;
        }
        // parameters such as "; charset=utf-8" are ignored
        let essence = file.content_type.split(';').next().unwrap_or_default().trim();
        let accepted = self
            .accepted_content_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(essence));
        if !accepted {
            tracing::debug!("Upload rejected: content type '{}'", file.content_type);
        }
        accepted
    }

    pub async fn handle_upload(&self, file: &UploadedFile, author: AuthorId) -> Notice {
        if !file.upload_ok {
            tracing::warn!("Upload of '{}' did not complete", file.original_name);
            return Notice::error("File upload failed.");
        }

        if !self.is_acceptable(file) {
            return Notice::error("Please upload a valid CSV file.");
        }

        let outcome = self.processor.process_path(&file.temp_path, author).await;
        tracing::info!("Upload '{}' finished with {:?}", file.original_name, outcome);
        Notice::from(outcome)
    }
}
