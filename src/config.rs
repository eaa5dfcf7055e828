use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 后端 REST 接口 (licitación API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    /// 前端走 HTTPS 时后端也必须走 HTTPS
    pub force_https: bool,
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// 实际使用的基础地址: 去掉末尾 `/`, 需要时 http -> https
    pub fn api_base(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        match base.strip_prefix("http://") {
            Some(rest) if self.force_https => format!("https://{}", rest),
            _ => base.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            backend: BackendConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                force_https: false,
                timeout_secs: 30,
            },
        }
    }
}

impl AppConfig {
    /// 默认值 + 环境变量 (SEGUIMIENTO__SERVER__PORT, SEGUIMIENTO__BACKEND__BASE_URL ...)
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("backend.base_url", defaults.backend.base_url)?
            .set_default("backend.force_https", defaults.backend.force_https)?
            .set_default("backend.timeout_secs", defaults.backend.timeout_secs as i64)?
            .add_source(
                config::Environment::with_prefix("SEGUIMIENTO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
