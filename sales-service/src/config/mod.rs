use service_core::config as core_config;
use service_core::error::AppError;
use service_core::observability::LogFormat;
use std::env;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct SalesConfig {
    pub common: core_config::Config,
    pub upload: UploadConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    pub is_prod: bool,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub otlp_endpoint: Option<String>,
}

impl SalesConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let default_limit = DEFAULT_MAX_UPLOAD_BYTES.to_string();
        let max_upload_bytes = get_env("MAX_UPLOAD_BYTES", Some(&default_limit), is_prod)?
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid MAX_UPLOAD_BYTES: {}", e))
            })?;

        let config = SalesConfig {
            common: common_config,
            upload: UploadConfig { max_upload_bytes },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    "ALLOWED_ORIGINS",
                    Some("http://localhost:3000"),
                    is_prod,
                )?),
            },
            logging: LoggingConfig {
                level: get_env("LOG_LEVEL", Some("info"), false)?,
                format: parse_log_format(&get_env("LOG_FORMAT", Some("json"), false)?)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
            is_prod,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.upload.max_upload_bytes == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MAX_UPLOAD_BYTES must be greater than 0"
            )));
        }

        if self.is_prod && self.cors.allowed_origins.iter().any(|o| o == "*") {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Wildcard CORS origin not allowed in production"
            )));
        }

        Ok(())
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_log_format(raw: &str) -> Result<LogFormat, AppError> {
    raw.parse()
        .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!("LOG_FORMAT: {}", e)))
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
