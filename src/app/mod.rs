//! 应用层：共享状态与路由装配

pub mod product;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::core::middleware::request_logging_middleware;
use product::{handler::health_check, repository::ProductRepository, service::ProductService};

/// 应用状态，在构造路由时显式传入
#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            product_service: ProductService::new(repository),
        }
    }
}

/// 创建完整的应用路由
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(product::routes())
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
