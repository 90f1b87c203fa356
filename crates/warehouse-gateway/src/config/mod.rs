//! Configuration resolution: environment, listen address, public base URL.

use clap::ValueEnum;

use crate::types::{GatewayError, GatewayResult};

/// Deployment environment. Controls error redaction and base-URL resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

/// Process-wide gateway configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub environment: Environment,
    /// Listen address (host:port).
    pub addr: String,
    /// Public domain advertised in the OpenAPI document.
    pub domain: Option<String>,
}

impl GatewayConfig {
    /// Public base URL the OpenAPI document advertises. Production deployments
    /// must configure a domain; development falls back to the listen address.
    pub fn base_url(&self) -> GatewayResult<String> {
        match self.environment {
            Environment::Production => self.domain.clone().ok_or_else(|| {
                GatewayError::Configuration(
                    "a public domain is required in production (--domain or WAREHOUSE_DOMAIN)"
                        .to_string(),
                )
            }),
            Environment::Development => Ok(self
                .domain
                .clone()
                .unwrap_or_else(|| format!("http://{}", self.addr))),
        }
    }
}

/// Resolve the environment: CLI flag, then WAREHOUSE_ENV, then development.
pub fn resolve_environment(explicit: Option<Environment>) -> Environment {
    if let Some(environment) = explicit {
        return environment;
    }

    match std::env::var("WAREHOUSE_ENV").ok().as_deref() {
        Some("production") => Environment::Production,
        _ => Environment::Development,
    }
}

/// Resolve the public domain: CLI flag, then WAREHOUSE_DOMAIN.
pub fn resolve_domain(explicit: Option<String>) -> Option<String> {
    explicit.or_else(|| std::env::var("WAREHOUSE_DOMAIN").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_base_url_falls_back_to_listen_address() {
        let config = GatewayConfig {
            environment: Environment::Development,
            addr: "0.0.0.0:3000".to_string(),
            domain: None,
        };
        assert_eq!(config.base_url().unwrap(), "http://0.0.0.0:3000");
    }

    #[test]
    fn explicit_domain_wins_in_development() {
        let config = GatewayConfig {
            environment: Environment::Development,
            addr: "0.0.0.0:3000".to_string(),
            domain: Some("https://rpc.example.com".to_string()),
        };
        assert_eq!(config.base_url().unwrap(), "https://rpc.example.com");
    }

    #[test]
    fn production_requires_a_domain() {
        let config = GatewayConfig {
            environment: Environment::Production,
            addr: "0.0.0.0:3000".to_string(),
            domain: None,
        };
        let err = config.base_url().unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
    }

    #[test]
    fn explicit_environment_flag_wins() {
        assert_eq!(
            resolve_environment(Some(Environment::Production)),
            Environment::Production
        );
    }
}
