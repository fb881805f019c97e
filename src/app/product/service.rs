//! 产品业务服务

use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use super::{
    model::{ListParams, Product, ProductPayload},
    repository::ProductRepository,
};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_product(&self, id: i32) -> Result<Product, CoreError> {
        Ok(self.repository.get(id).await?)
    }

    pub async fn list_products(&self, params: &ListParams) -> Result<Vec<Product>, CoreError> {
        let (offset, limit) = params.clamp();
        Ok(self.repository.list(offset, limit).await?)
    }

    pub async fn create_product(&self, payload: ProductPayload) -> Result<Product, CoreError> {
        payload.validate()?;

        let product = self
            .repository
            .create(&payload.name, payload.normalized_price())
            .await?;

        info!("Created product: {} ({})", product.name, product.id);
        Ok(product)
    }

    /// 更新产品；id 不存在时不做任何修改，返回按路径 id 规整后的请求数据
    pub async fn update_product(
        &self,
        id: i32,
        payload: ProductPayload,
    ) -> Result<Product, CoreError> {
        payload.validate()?;

        let product = Product {
            id,
            price: payload.normalized_price(),
            name: payload.name,
        };

        match self.repository.update(&product).await? {
            Some(updated) => {
                info!("Updated product: {} ({})", updated.name, updated.id);
                Ok(updated)
            }
            None => {
                warn!("Update matched no product with id {}", id);
                Ok(product)
            }
        }
    }

    pub async fn delete_product(&self, id: i32) -> Result<(), CoreError> {
        let removed = self.repository.delete(id).await?;
        info!("Deleted product {} ({} row(s) removed)", id, removed);
        Ok(())
    }

    pub async fn health(&self) -> Result<(), CoreError> {
        Ok(self.repository.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::memory::MemoryProductRepository;
    use axum::http::StatusCode;
    use rust_decimal::Decimal;

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryProductRepository::new()))
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn payload(name: &str, price: &str) -> ProductPayload {
        ProductPayload {
            name: name.to_string(),
            price: dec(price),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let created = service.create_product(payload("test product", "11.00")).await.unwrap();
        let fetched = service.get_product(created.id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.name, "test product");
        assert_eq!(fetched.price, dec("11"));
    }

    #[tokio::test]
    async fn test_create_rounds_price_to_cents() {
        let created = service().create_product(payload("rounded", "9.999")).await.unwrap();
        assert_eq!(created.price, dec("10.00"));
    }

    #[tokio::test]
    async fn test_create_rounds_half_cent_away_from_zero() {
        let service = service();
        let created = service.create_product(payload("half", "1.005")).await.unwrap();
        assert_eq!(created.price, dec("1.01"));

        let created = service.create_product(payload("half", "1.015")).await.unwrap();
        assert_eq!(created.price, dec("1.02"));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let err = service().create_product(payload("", "-1")).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Product name must not be empty, Product price must be between 0 and 99999999.99"
        );
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let service = service();
        let created = service.create_product(payload("before", "10")).await.unwrap();
        let updated = service
            .update_product(created.id, payload("after", "22.00"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "after");
        assert_eq!(updated.price, dec("22"));
    }

    #[tokio::test]
    async fn test_update_missing_echoes_payload() {
        let echoed = service()
            .update_product(5, payload("nobody", "1.005"))
            .await
            .unwrap();
        assert_eq!(echoed.id, 5);
        assert_eq!(echoed.name, "nobody");
        assert_eq!(echoed.price, dec("1.01"));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service();
        let created = service.create_product(payload("gone", "1")).await.unwrap();
        service.delete_product(created.id).await.unwrap();
        service.delete_product(created.id).await.unwrap();

        let err = service.get_product(created.id).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
