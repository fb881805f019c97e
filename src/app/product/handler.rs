//! 产品处理器

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequestParts, Path, Query, State,
    },
    http::{request::Parts, StatusCode},
    response::Json,
};

use super::model::{parse_product_id, ListParams, Product, ProductPayload};
use crate::app::AppState;
use crate::core::{
    error::CoreError,
    response::{HealthResponse, ResultResponse},
};

/// 路径中的产品 id，必须匹配 `[0-9]+`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| CoreError::invalid_product_id())?;

        parse_product_id(&raw)
            .map(ProductId)
            .ok_or_else(CoreError::invalid_product_id)
    }
}

fn decode_payload(
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<ProductPayload, CoreError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|_| CoreError::invalid_payload())
}

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let params = query.map(|Query(params)| params).unwrap_or_default();
    let products = state.product_service.list_products(&params).await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let payload = decode_payload(payload)?;
    let product = state.product_service.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, CoreError> {
    let product = state.product_service.get_product(id).await?;
    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    let payload = decode_payload(payload)?;
    let product = state.product_service.update_product(id, payload).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<ResultResponse>, CoreError> {
    state.product_service.delete_product(id).await?;
    Ok(Json(ResultResponse::success()))
}

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, CoreError> {
    state.product_service.health().await?;
    Ok(Json(HealthResponse::ok()))
}
