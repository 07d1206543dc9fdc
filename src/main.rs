use clap::Parser;
use course_registry::http::shutdown_signal;
use course_registry::utils::{logger, validation::Validate};
use course_registry::{create_router, seed, AppState, CliConfig, Store, StoreMode};
use std::sync::Arc;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.json_logs(), cli.verbose, config.log_level());

    tracing::info!("Starting course-registry");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store = if cli.setup {
        let mut store = Store::new(StoreMode::Fresh, config.data_file());
        store.set_mapping(seed::default_departments());
        store.save_to_file();
        tracing::info!("🌱 Registry reset to the seed data");
        store
    } else {
        Store::new(config.store_mode()?, config.data_file())
    };

    // 保留一份 handle，伺服器停止後才能存檔
    let store = Arc::new(Mutex::new(store));
    let app = create_router(AppState::from_shared(Arc::clone(&store)));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if config.save_on_exit() {
        store.lock().await.save_to_file();
    } else {
        tracing::info!("Save on exit disabled, discarding in-memory changes");
    }

    tracing::info!("✅ course-registry stopped");
    Ok(())
}
