//! 配置加载
//!
//! 配置全部来自环境变量；启动时若存在 `.env` 文件会先将其载入环境。

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8010";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// 服务配置
#[derive(Clone)]
pub struct Config {
    /// 数据库用户名 (DB_USERNAME)
    pub db_username: String,
    /// 数据库密码 (DB_PASSWORD)
    pub db_password: String,
    /// 数据库名称 (DB_NAME)
    pub db_name: String,
    /// 数据库主机 (DB_HOST)
    pub db_host: String,
    /// 数据库端口 (PORT)
    pub db_port: u16,
    /// HTTP 监听地址 (HTTP_ADDR)
    pub http_addr: SocketAddr,
    /// 日志级别 (LOG_LEVEL)，RUST_LOG 存在时优先
    pub log_level: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_username", &self.db_username)
            .field("db_password", &"***")
            .field("db_name", &self.db_name)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("http_addr", &self.http_addr)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// 载入 `.env`（如果存在）后从进程环境读取配置
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意键值来源构造配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let db_port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_DB_PORT,
        };

        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let http_addr = http_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: "HTTP_ADDR",
                value: http_addr.clone(),
            })?;

        Ok(Self {
            db_username: required("DB_USERNAME")?,
            db_password: required("DB_PASSWORD")?,
            db_name: required("DB_NAME")?,
            db_host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            db_port,
            http_addr,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// 构造数据库连接参数；凭据按字段传递，无需对密码做 URL 转义
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_username)
            .password(&self.db_password)
            .database(&self.db_name)
            .ssl_mode(PgSslMode::Prefer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DB_USERNAME", "postgres"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "products"),
        ]))
        .unwrap();

        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 5432);
        assert_eq!(config.http_addr, "0.0.0.0:8010".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DB_USERNAME", "app"),
            ("DB_PASSWORD", ""),
            ("DB_NAME", "shop"),
            ("DB_HOST", "db.internal"),
            ("PORT", "5433"),
            ("HTTP_ADDR", "127.0.0.1:9000"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.db_password, "");
        assert_eq!(config.db_host, "db.internal");
        assert_eq!(config.db_port, 5433);
        assert_eq!(config.http_addr.port(), 9000);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_and_invalid() {
        let missing = Config::from_lookup(lookup_from(&[("DB_USERNAME", "app")]));
        assert_eq!(missing.unwrap_err(), ConfigError::Missing("DB_PASSWORD"));

        let invalid = Config::from_lookup(lookup_from(&[
            ("DB_USERNAME", "app"),
            ("DB_PASSWORD", "pw"),
            ("DB_NAME", "shop"),
            ("PORT", "not-a-port"),
        ]));
        assert_eq!(
            invalid.unwrap_err(),
            ConfigError::Invalid {
                name: "PORT",
                value: "not-a-port".to_string()
            }
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let config = Config::from_lookup(lookup_from(&[
            ("DB_USERNAME", "app"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "shop"),
        ]))
        .unwrap();

        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
