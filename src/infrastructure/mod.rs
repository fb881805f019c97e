//! 基础设施层：配置、数据库连接、表结构与日志

pub mod config;
pub mod database;
pub mod logger;
pub mod schema;
