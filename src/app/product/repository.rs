//! 产品数据访问层
//!
//! 所有 SQL 均使用绑定参数。price 列为 NUMERIC(10,2)，与 `Decimal` 直接映射，
//! 写入时超出两位的小数由列精度取整。

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::model::Product;
use crate::core::error::RepositoryError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get(&self, id: i32) -> Result<Product, RepositoryError>;

    /// 按 id 升序返回 `[offset, offset + limit)` 范围内的产品
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, RepositoryError>;

    async fn create(&self, name: &str, price: Decimal) -> Result<Product, RepositoryError>;

    /// 按 id 更新名称和价格；id 不存在时返回 `None`
    async fn update(&self, product: &Product) -> Result<Option<Product>, RepositoryError>;

    /// 返回删除的行数
    async fn delete(&self, id: i32) -> Result<u64, RepositoryError>;

    async fn ping(&self) -> Result<(), RepositoryError>;
}

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get(&self, id: i32) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price FROM products ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn create(&self, name: &str, price: Decimal) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price) VALUES ($1, $2) \
             RETURNING id, name, price",
        )
        .bind(name)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Option<Product>, RepositoryError> {
        let updated = sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $1, price = $2 WHERE id = $3 \
             RETURNING id, name, price",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
