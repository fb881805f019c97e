//! 产品数据模型

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// 默认及最大分页条数
pub const MAX_PAGE_SIZE: i64 = 10;

/// NUMERIC(10,2) 可表示的最大价格 99999999.99
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// 价格小数位数，与 NUMERIC(10,2) 一致
pub const PRICE_SCALE: u32 = 2;

/// 价格在 JSON 中以数字表示，在 Rust 与数据库中为定点小数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// 创建与更新产品的请求体，请求体中的 id 字段会被忽略
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub name: String,

    #[serde(default, with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

impl ProductPayload {
    /// 按数据库精度保留两位小数
    pub fn normalized_price(&self) -> Decimal {
        round_to_cents(self.price)
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO || *price > MAX_PRICE {
        let mut error = ValidationError::new("price_range");
        error.message = Some(Cow::Owned(format!(
            "Product price must be between 0 and {}",
            MAX_PRICE
        )));
        return Err(error);
    }
    Ok(())
}

/// 四舍五入到分，中点远离零，与 PostgreSQL 的 NUMERIC 取整一致
pub fn round_to_cents(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// 列表查询参数，原样保留字符串，无法解析的值视为缺省
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub count: Option<String>,
    pub start: Option<String>,
}

impl ListParams {
    /// 返回 (offset, limit)：limit 超出 [1, 10] 时取 10，offset 小于 0 时取 0
    pub fn clamp(&self) -> (i64, i64) {
        let count = parse_or_zero(self.count.as_deref());
        let start = parse_or_zero(self.start.as_deref());

        let limit = if (1..=MAX_PAGE_SIZE).contains(&count) {
            count
        } else {
            MAX_PAGE_SIZE
        };
        let offset = start.max(0);

        (offset, limit)
    }
}

fn parse_or_zero(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// 解析路径中的产品 id，只接受 `[0-9]+` 且在 i32 范围内的值
pub fn parse_product_id(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
