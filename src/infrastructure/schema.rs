//! products 表结构
//!
//! 服务本身不做迁移；这里的 DDL 供测试与手工初始化使用。

use sqlx::PgPool;

pub const TABLE_CREATION_QUERY: &str = r#"
CREATE TABLE IF NOT EXISTS products
(
    id SERIAL,
    name TEXT NOT NULL,
    price NUMERIC(10,2) NOT NULL DEFAULT 0.00,
    CONSTRAINT products_pkey PRIMARY KEY (id)
)
"#;

pub async fn ensure_table_exists(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(TABLE_CREATION_QUERY).execute(pool).await?;
    Ok(())
}

/// 清空表并把 id 序列重置为 1
pub async fn clear_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM products").execute(pool).await?;
    sqlx::query("ALTER SEQUENCE products_id_seq RESTART WITH 1")
        .execute(pool)
        .await?;
    Ok(())
}
