//! 进程内产品存储
//!
//! 与 `PgProductRepository` 语义一致（自增 id、按 id 排序、价格保留两位小数），
//! 供不依赖数据库的路由测试使用。

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;

use super::{
    model::{round_to_cents, Product},
    repository::ProductRepository,
};
use crate::core::error::RepositoryError;

#[derive(Default)]
struct MemoryState {
    last_id: i32,
    rows: BTreeMap<i32, Product>,
}

#[derive(Default)]
pub struct MemoryProductRepository {
    state: RwLock<MemoryState>,
    unavailable: AtomicBool,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 模拟存储故障：之后的所有操作都返回 `RepositoryError::Storage`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn get(&self, id: i32) -> Result<Product, RepositoryError> {
        self.check_available()?;
        let state = self.state.read().await;
        state.rows.get(&id).cloned().ok_or(RepositoryError::NotFound)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        self.check_available()?;
        let state = self.state.read().await;
        let products = state
            .rows
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok(products)
    }

    async fn create(&self, name: &str, price: Decimal) -> Result<Product, RepositoryError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        state.last_id += 1;
        let product = Product {
            id: state.last_id,
            name: name.to_string(),
            price: round_to_cents(price),
        };
        state.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Option<Product>, RepositoryError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let updated = state.rows.get_mut(&product.id).map(|row| {
            row.name = product.name.clone();
            row.price = round_to_cents(product.price);
            row.clone()
        });
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<u64, RepositoryError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        Ok(state.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_sequential_and_never_reused() {
        let repo = MemoryProductRepository::new();
        let first = repo.create("a", Decimal::ONE).await.unwrap();
        let second = repo.create("b", Decimal::TWO).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert_eq!(repo.delete(second.id).await.unwrap(), 1);
        let third = repo.create("c", Decimal::from(3)).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_list_orders_by_id_with_offset_and_limit() {
        let repo = MemoryProductRepository::new();
        for i in 0..5 {
            repo.create(&format!("Product {}", i), Decimal::from((i + 1) * 10))
                .await
                .unwrap();
        }

        let page = repo.list(1, 2).await.unwrap();
        let ids: Vec<i32> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);

        assert!(repo.list(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prices_are_stored_in_cents() {
        let repo = MemoryProductRepository::new();
        let created = repo.create("half", "1.005".parse().unwrap()).await.unwrap();
        assert_eq!(created.price, "1.01".parse::<Decimal>().unwrap());
        assert_eq!(repo.get(created.id).await.unwrap().price.scale(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_noop() {
        let repo = MemoryProductRepository::new();
        let ghost = Product {
            id: 42,
            name: "ghost".to_string(),
            price: Decimal::ONE,
        };
        assert_eq!(repo.update(&ghost).await.unwrap(), None);
        assert!(matches!(repo.get(42).await, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_unavailable_store_reports_storage_error() {
        let repo = MemoryProductRepository::new();
        repo.set_unavailable(true);
        assert!(matches!(
            repo.get(1).await,
            Err(RepositoryError::Storage(_))
        ));
        assert!(repo.ping().await.is_err());

        repo.set_unavailable(false);
        assert!(repo.ping().await.is_ok());
    }
}
