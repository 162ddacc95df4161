use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub posts: PostsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_token_expires_in")]
    pub token_expires_in: i64, // seconds
}

/// 帖子编号生成与开奖操作的限制
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsConfig {
    #[serde(default = "default_identifier_max_attempts")]
    pub identifier_max_attempts: u32,
    #[serde(default = "default_operation_timeout_secs")]
    pub operation_timeout_secs: u64,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            identifier_max_attempts: default_identifier_max_attempts(),
            operation_timeout_secs: default_operation_timeout_secs(),
        }
    }
}

fn default_token_expires_in() -> i64 {
    7200
}

fn default_identifier_max_attempts() -> u32 {
    10_000
}

fn default_operation_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env_defaults()?,
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "无法读取配置文件 {config_path}: {e}"
                )));
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("解析配置文件失败: {e}")))
    }

    fn from_env_defaults() -> AppResult<Self> {
        // 数据库 URL 在无配置文件时必须提供
        let database_url = get_env("DATABASE_URL").ok_or_else(|| {
            AppError::ConfigError(
                "缺少 DATABASE_URL 环境变量，且未找到配置文件 config.toml".to_string(),
            )
        })?;

        Ok(Config {
            server: ServerConfig {
                host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: get_env_parse("SERVER_PORT", 8080u16),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
            },
            jwt: JwtConfig {
                secret: get_env("JWT_SECRET")
                    .unwrap_or_else(|| "change-me-in-production".to_string()),
                token_expires_in: get_env_parse("JWT_EXPIRES_IN", default_token_expires_in()),
            },
            posts: PostsConfig::default(),
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.token_expires_in = n;
        }
        if let Ok(v) = env::var("IDENTIFIER_MAX_ATTEMPTS")
            && let Ok(n) = v.parse()
        {
            self.posts.identifier_max_attempts = n;
        }
        if let Ok(v) = env::var("OPERATION_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            self.posts.operation_timeout_secs = n;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.posts.identifier_max_attempts == 0 {
            return Err(AppError::ConfigError(
                "posts.identifier_max_attempts must be at least 1".to_string(),
            ));
        }
        if self.posts.operation_timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "posts.operation_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
url = "postgres://localhost/hemung"
max_connections = 5

[jwt]
secret = "s3cret"
"#;

    #[test]
    fn test_parse_uses_post_defaults() {
        let config = Config::parse(MINIMAL).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.jwt.token_expires_in, 7200);
        assert_eq!(config.posts.identifier_max_attempts, 10_000);
        assert_eq!(config.posts.operation_timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let raw = format!("{MINIMAL}\n[posts]\nidentifier_max_attempts = 0\n");
        let config = Config::parse(&raw).unwrap();
        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            Config::parse("[server\nhost="),
            Err(AppError::ConfigError(_))
        ));
    }
}
