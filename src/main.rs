use product_api::{
    app::product::repository::PgProductRepository,
    create_app,
    infrastructure::{database::DatabaseManager, logger::Logger},
    AppState, Config,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            Logger::init("info");
            error!("配置加载失败: {}", e);
            return Err(e.into());
        }
    };

    Logger::init(&config.log_level);

    info!(
        db_username = %config.db_username,
        db_name = %config.db_name,
        db_host = %config.db_host,
        db_port = config.db_port,
        "启动产品 API 服务"
    );

    let database = DatabaseManager::new(config.connect_options())
        .await
        .map_err(|e| {
            error!("数据库连接失败: {}", e);
            e
        })?;

    let repository = Arc::new(PgProductRepository::new(database.into_pool()));
    let app = create_app(AppState::new(repository));

    let listener = TcpListener::bind(config.http_addr).await?;
    info!("🚀 服务器运行在 http://{}", listener.local_addr()?);
    info!("   GET    /products?count=N&start=M");
    info!("   POST   /product");
    info!("   GET    /product/:id");
    info!("   PUT    /product/:id");
    info!("   DELETE /product/:id");
    info!("   GET    /health");

    axum::serve(listener, app).await?;

    Ok(())
}
