//! 产品资源：模型、数据访问、业务服务与 HTTP 处理器

pub mod handler;
pub mod memory;
pub mod model;
pub mod repository;
pub mod service;

use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handler::list_products))
        .route("/product", post(handler::create_product))
        .route(
            "/product/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
}
