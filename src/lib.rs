//! # 产品 REST API
//!
//! 基于 Axum + SQLx 的单资源 CRUD 服务，分层如下：
//! - `app`: 应用层，产品模型、数据访问、业务服务与处理器
//! - `core`: 核心层，错误处理、响应结构与中间件
//! - `infrastructure`: 基础设施层，配置、数据库连接与日志

pub mod app;
pub mod core;
pub mod infrastructure;

pub use crate::app::{create_app, AppState};
pub use crate::core::error::{CoreError, RepositoryError};
pub use crate::infrastructure::config::{Config, ConfigError};
