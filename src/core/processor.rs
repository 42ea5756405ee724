use crate::core::sanitize::{sanitize_post_content, sanitize_text_field};
use crate::domain::model::{AuthorId, ImportOutcome, ImportStats, PageDraft};
use crate::domain::ports::PageCreator;
use csv::{ByteRecord, ReaderBuilder};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const TITLE_COLUMN: &str = "title";
const DESCRIPTION_COLUMN: &str = "description";

/// Positions of the required columns, resolved once from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    title: usize,
    description: usize,
}

impl ColumnMap {
    fn from_header(header: &ByteRecord) -> Option<Self> {
        let names: Vec<String> = header.iter().map(normalize_header_cell).collect();
        let position = |wanted: &str| names.iter().position(|name| name == wanted);

        Some(Self {
            title: position(TITLE_COLUMN)?,
            description: position(DESCRIPTION_COLUMN)?,
        })
    }
}

fn normalize_header_cell(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
}

fn field(record: &ByteRecord, index: usize) -> Cow<'_, str> {
    record
        .get(index)
        .map(String::from_utf8_lossy)
        .unwrap_or(Cow::Borrowed(""))
}

fn is_blank_row(record: &ByteRecord) -> bool {
    record
        .iter()
        .all(|value| String::from_utf8_lossy(value).trim().is_empty())
}

/// Turns CSV rows into draft pages, one page per row with a title.
pub struct CsvImportProcessor<P: PageCreator> {
    creator: P,
}

impl<P: PageCreator> CsvImportProcessor<P> {
    pub fn new(creator: P) -> Self {
        Self { creator }
    }

    pub fn creator(&self) -> &P {
        &self.creator
    }

    pub async fn process_path<Q: AsRef<Path>>(&self, path: Q, author: AuthorId) -> ImportOutcome {
        self.process_path_with_stats(path, author).await.0
    }

    pub async fn process_path_with_stats<Q: AsRef<Path>>(
        &self,
        path: Q,
        author: AuthorId,
    ) -> (ImportOutcome, ImportStats) {
        let path = path.as_ref();
        tracing::info!("📄 Importing pages from {}", path.display());

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Cannot open {}: {}", path.display(), e);
                return (ImportOutcome::UnreadableFile, ImportStats::default());
            }
        };

        self.process_reader_with_stats(BufReader::new(file), author)
            .await
    }

    pub async fn process_reader<R: Read>(&self, reader: R, author: AuthorId) -> ImportOutcome {
        self.process_reader_with_stats(reader, author).await.0
    }

    pub async fn process_reader_with_stats<R: Read>(
        &self,
        reader: R,
        author: AuthorId,
    ) -> (ImportOutcome, ImportStats) {
        let mut stats = ImportStats::default();
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut record = ByteRecord::new();
        let columns = match csv_reader.read_byte_record(&mut record) {
            Ok(true) => ColumnMap::from_header(&record),
            Ok(false) => {
                tracing::info!("CSV input is empty, nothing to import");
                return (ImportOutcome::Created(0), stats);
            }
            Err(e) => {
                tracing::warn!("Failed to read CSV header: {}", e);
                return (ImportOutcome::UnreadableFile, stats);
            }
        };
        let Some(columns) = columns else {
            tracing::warn!("CSV header lacks '{}' or '{}' column", TITLE_COLUMN, DESCRIPTION_COLUMN);
            return (ImportOutcome::MissingColumns, stats);
        };
        tracing::debug!(
            "Resolved columns: title={}, description={}",
            columns.title,
            columns.description
        );

        loop {
            match csv_reader.read_byte_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    // rows before this point stay created
                    tracing::warn!(
                        "Stopping import after {} rows, CSV read error: {}",
                        stats.rows_read,
                        e
                    );
                    break;
                }
            }
            stats.rows_read += 1;

            if is_blank_row(&record) {
                stats.blank_rows += 1;
                continue;
            }

            let title = field(&record, columns.title);
            if title.trim().is_empty() {
                stats.blank_titles += 1;
                continue;
            }
            let description = field(&record, columns.description);

            let draft = PageDraft::new(
                sanitize_text_field(&title),
                sanitize_post_content(&description),
                author,
            );

            match self.creator.create_draft_page(&draft).await {
                Ok(page) => {
                    stats.created += 1;
                    tracing::debug!("Created draft page {} '{}'", page.id, draft.title);
                }
                Err(e) => {
                    stats.failed += 1;
                    tracing::warn!("Skipping row {}: {}", stats.rows_read + 1, e);
                }
            }
        }

        tracing::info!(
            "✅ Import finished: {} created, {} failed, {} blank rows, {} rows without title",
            stats.created,
            stats.failed,
            stats.blank_rows,
            stats.blank_titles
        );

        (ImportOutcome::Created(stats.created), stats)
    }
}
