use std::env;

use anyhow::{anyhow, Context};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mongo_uri: String,
    pub database: String,
    pub collection: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    const DATABASE: &'static str = "issues";
    const COLLECTION: &'static str = "issues";
    const HOST: &'static str = "0.0.0.0";
    const PORT: u16 = 3000;

    /// | Env Var             | Default   |
    /// |---------------------|-----------|
    /// | `MONGOURI`          | required  |
    /// | `ISSUES_DATABASE`   | `issues`  |
    /// | `ISSUES_COLLECTION` | `issues`  |
    /// | `HOST`              | `0.0.0.0` |
    /// | `PORT`              | `3000`    |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongo_uri = lookup("MONGOURI")
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| anyhow!("MONGOURI is not set"))?;

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?,
            None => Self::PORT,
        };

        Ok(Self {
            mongo_uri,
            database: lookup("ISSUES_DATABASE").unwrap_or_else(|| Self::DATABASE.to_string()),
            collection: lookup("ISSUES_COLLECTION")
                .unwrap_or_else(|| Self::COLLECTION.to_string()),
            host: lookup("HOST").unwrap_or_else(|| Self::HOST.to_string()),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_uri_is_set() {
        let config = config(&[("MONGOURI", "mongodb://localhost:27017")]).unwrap();
        assert_eq!(config.database, "issues");
        assert_eq!(config.collection, "issues");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn overrides_are_read() {
        let config = config(&[
            ("MONGOURI", "mongodb://db:27017"),
            ("ISSUES_DATABASE", "tracker"),
            ("ISSUES_COLLECTION", "tickets"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(config.database, "tracker");
        assert_eq!(config.collection, "tickets");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_uri_is_an_error() {
        assert!(config(&[]).is_err());
        assert!(config(&[("MONGOURI", "")]).is_err());
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(config(&[("MONGOURI", "mongodb://db"), ("PORT", "http")]).is_err());
    }
}
