//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BrokerClientConfig, BrokerConfig, ConfigError, ConsumerRetryConfig,
    CorsConfig, DatabaseConfig, Environment, ServerConfig,
};
