use clap::Parser;
use csv_page_creator::utils::{error::ErrorSeverity, logger, validation::Validate};
use csv_page_creator::{
    build_page_store, CliConfig, CsvImportProcessor, UploadCoordinator, UploadedFile,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting csv-page-creator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let store = match build_page_store(&config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(
                "❌ Cannot open page store: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            let exit_code = if e.severity() >= ErrorSeverity::Critical { 3 } else { 1 };
            std::process::exit(exit_code);
        }
    };
    tracing::info!("📦 Page store: {}", config.store.r#type);

    let coordinator = UploadCoordinator::new(CsvImportProcessor::new(store))
        .with_accepted_content_types(config.upload.accepted_content_types.clone());

    // 命令列檔案視同一次已完成的上傳
    let upload = UploadedFile {
        original_name: cli
            .csv
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        content_type: cli.content_type.clone(),
        temp_path: cli.csv.clone(),
        upload_ok: true,
    };

    let notice = coordinator.handle_upload(&upload, config.author()).await;

    if let Some(admin_url) = &config.upload.admin_url {
        let location = notice.redirect_location(admin_url)?;
        tracing::info!("↪️ Redirect: {}", location);
    }

    if notice.is_success() {
        println!("✅ {}", notice.message);
        Ok(())
    } else {
        eprintln!("❌ {}", notice.message);
        std::process::exit(1);
    }
}
