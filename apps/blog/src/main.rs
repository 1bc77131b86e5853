use quill_blog::models::PostStore;
use quill_blog::{views, AppState};
use quill_core::{AppConfig, AppConfigTrait};
use quill_http::{
    apply_http_layers, init_logging, log_shutdown_info, log_startup_info, start_server,
    FormSigner, HttpConfig, LoggingConfig,
};
use quill_orm::{Database, DatabaseConfig};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging = LoggingConfig::from_env()?;
    logging.validate()?;
    init_logging(&logging).map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let app_config = AppConfig::from_env()?;
    app_config.validate()?;
    let db_config = DatabaseConfig::from_env()?;
    db_config.validate()?;
    let http_config = HttpConfig::from_env()?;
    http_config.validate()?;

    debug!(
        app = ?app_config.config_sources(),
        database = ?db_config.config_sources(),
        http = ?http_config.config_sources(),
        "Configuration sources"
    );

    if !app_config.secret_key_from_env {
        warn!("APP_SECRET_KEY is not set; using the built-in development key");
    }

    let database = Database::connect(&db_config).await?;
    database.health_check().await?;
    let posts = PostStore::new(database.clone());
    posts.ensure_schema().await?;
    info!(posts = posts.count().await?, "Post store ready");

    let signer = FormSigner::new(&app_config.secret_key, http_config.csrf_token_lifetime());
    let state = AppState::new(posts, views::templates()?, signer);
    let router = apply_http_layers(quill_blog::app(state), &http_config);

    log_startup_info(&app_config.name, quill_blog::VERSION, &http_config.bind_address());
    let served = start_server(router, &http_config).await;

    database.close().await;
    log_shutdown_info(&app_config.name);

    served?;
    Ok(())
}
