use chemviz::infrastructure::bootstrap;
use chemviz::infrastructure::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let server = bootstrap::setup(&config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    server.await
}
