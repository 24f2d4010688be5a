use anyhow::{Result, bail};

pub const PRODUCTION_ENDPOINT: &str = "https://employeeace-api.apratim.me/graphql";
pub const DEVELOPMENT_ENDPOINT: &str = "http://localhost:5000/graphql";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "" | "dev" | "development" => Ok(Environment::Development),
            "prod" | "production" => Ok(Environment::Production),
            other => bail!("APP_ENV must be development or production, got {other:?}"),
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Environment::Development => DEVELOPMENT_ENDPOINT,
            Environment::Production => PRODUCTION_ENDPOINT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: Environment,
    pub endpoint: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let environment = match lookup("APP_ENV") {
            Some(raw) => Environment::parse(&raw)?,
            None => Environment::Development,
        };
        let endpoint = lookup("GRAPHQL_ENDPOINT")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| environment.default_endpoint().to_string());
        validate_endpoint(&endpoint)?;
        Ok(Self {
            environment,
            endpoint,
        })
    }

    /// Apply a `--endpoint` flag on top of the environment.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Result<Self> {
        if let Some(endpoint) = endpoint {
            validate_endpoint(&endpoint)?;
            self.endpoint = endpoint;
        }
        Ok(self)
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        bail!("GraphQL endpoint must be an http(s) URL, got {endpoint:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_to_local_development_server() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.endpoint, "http://localhost:5000/graphql");
    }

    #[test]
    fn production_selects_fixed_address() {
        let config = config_from(&[("APP_ENV", "Production")]).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.endpoint, PRODUCTION_ENDPOINT);
    }

    #[test]
    fn explicit_endpoint_wins_over_environment() {
        let config = config_from(&[
            ("APP_ENV", "prod"),
            ("GRAPHQL_ENDPOINT", "http://10.0.0.5:5000/graphql"),
        ])
        .unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.5:5000/graphql");
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert!(config_from(&[("APP_ENV", "staging")]).is_err());
    }

    #[test]
    fn flag_override_is_validated() {
        let config = config_from(&[]).unwrap();
        assert!(config.clone().with_endpoint_override(Some("ftp://x".into())).is_err());
        let config = config
            .with_endpoint_override(Some("https://example.test/graphql".into()))
            .unwrap();
        assert_eq!(config.endpoint, "https://example.test/graphql");
    }
}
