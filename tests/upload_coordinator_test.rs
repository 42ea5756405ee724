use csv_page_creator::{
    AuthorId, CsvImportProcessor, DryRunPageStore, JsonlPageStore, Notice, NoticeKind,
    UploadCoordinator, UploadedFile,
};
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn upload(name: &str, content_type: &str, temp_path: PathBuf) -> UploadedFile {
    UploadedFile {
        original_name: name.to_string(),
        content_type: content_type.to_string(),
        temp_path,
        upload_ok: true,
    }
}

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn jsonl_coordinator(temp_dir: &TempDir) -> UploadCoordinator<JsonlPageStore> {
    let store = JsonlPageStore::open(temp_dir.path().join("pages.jsonl")).unwrap();
    UploadCoordinator::new(CsvImportProcessor::new(store))
}

#[tokio::test]
async fn test_successful_upload() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = jsonl_coordinator(&temp_dir);
    let file = csv_file("title,description\nAbout Us,Learn more\nServices,Discover\n");

    let notice = coordinator
        .handle_upload(
            &upload("pages.csv", "text/csv", file.path().to_path_buf()),
            AuthorId(1),
        )
        .await;

    assert_eq!(notice, Notice::success("2 pages created."));
    assert_eq!(coordinator.processor().creator().read_pages().unwrap().len(), 2);
}

#[tokio::test]
async fn test_excel_content_type_and_upper_case_extension() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = jsonl_coordinator(&temp_dir);
    let file = csv_file("title,description\nHome,Welcome\n");

    let notice = coordinator
        .handle_upload(
            &upload(
                "PAGES.CSV",
                "application/vnd.ms-excel",
                file.path().to_path_buf(),
            ),
            AuthorId(1),
        )
        .await;

    assert_eq!(notice, Notice::success("1 page created."));
}

#[tokio::test]
async fn test_failed_upload_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = jsonl_coordinator(&temp_dir);
    let mut file = upload("pages.csv", "text/csv", temp_dir.path().join("never-written.csv"));
    file.upload_ok = false;

    let notice = coordinator.handle_upload(&file, AuthorId(1)).await;

    assert_eq!(notice, Notice::error("File upload failed."));
}

#[tokio::test]
async fn test_wrong_extension_or_type_is_rejected_before_import() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = jsonl_coordinator(&temp_dir);
    let file = csv_file("title,description\nHome,Welcome\n");

    for (name, content_type) in [
        ("pages.txt", "text/csv"),
        ("pages", "text/csv"),
        ("pages.csv", "application/json"),
    ] {
        let notice = coordinator
            .handle_upload(
                &upload(name, content_type, file.path().to_path_buf()),
                AuthorId(1),
            )
            .await;
        assert_eq!(notice, Notice::error("Please upload a valid CSV file."));
    }

    assert!(coordinator.processor().creator().read_pages().unwrap().is_empty());
}

#[tokio::test]
async fn test_error_outcomes_become_error_notices() {
    let coordinator = UploadCoordinator::new(CsvImportProcessor::new(DryRunPageStore::new()));
    let temp_dir = TempDir::new().unwrap();

    let missing_columns = csv_file("name,body\nA,B\n");
    let no_rows = csv_file("title,description\n,\n");
    let empty = csv_file("");

    let cases = [
        (
            missing_columns.path().to_path_buf(),
            "CSV must have \"title\" and \"description\" columns.",
        ),
        (no_rows.path().to_path_buf(), "No valid rows found in CSV."),
        (empty.path().to_path_buf(), "No valid rows found in CSV."),
        (temp_dir.path().join("gone.csv"), "Error processing CSV file."),
    ];

    for (path, message) in cases {
        let notice = coordinator
            .handle_upload(&upload("pages.csv", "text/csv", path), AuthorId(1))
            .await;
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, message);
    }
    assert_eq!(coordinator.processor().creator().planned(), 0);
}

#[tokio::test]
async fn test_content_type_parameters_are_ignored() {
    let coordinator = UploadCoordinator::new(CsvImportProcessor::new(DryRunPageStore::new()));
    let file = csv_file("title,description\nHome,Welcome\n");

    let notice = coordinator
        .handle_upload(
            &upload(
                "pages.csv",
                "text/csv; charset=utf-8",
                file.path().to_path_buf(),
            ),
            AuthorId(1),
        )
        .await;

    assert!(notice.is_success());
}

#[tokio::test]
async fn test_custom_content_types() {
    let coordinator = UploadCoordinator::new(CsvImportProcessor::new(DryRunPageStore::new()))
        .with_accepted_content_types(vec!["text/plain".to_string()]);
    let file = csv_file("title,description\nHome,Welcome\n");

    let rejected = coordinator
        .handle_upload(
            &upload("pages.csv", "text/csv", file.path().to_path_buf()),
            AuthorId(1),
        )
        .await;
    let accepted = coordinator
        .handle_upload(
            &upload("pages.csv", "text/plain", file.path().to_path_buf()),
            AuthorId(1),
        )
        .await;

    assert!(!rejected.is_success());
    assert!(accepted.is_success());
}
