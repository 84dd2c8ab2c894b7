use crate::utils::error::AppError;
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "jobbox";

/// Runtime configuration taken from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::InvalidRequest(format!("PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let mongodb_uri = match lookup("MONGODB_URI") {
            Some(uri) => uri,
            None => match (lookup("DB_USER"), lookup("DB_PASS"), lookup("MONGODB_CLUSTER")) {
                (Some(user), Some(pass), Some(cluster)) => format!(
                    "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                    user, pass, cluster
                ),
                _ => DEFAULT_URI.to_string(),
            },
        };

        let database_name =
            lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        Ok(Self {
            host,
            port,
            mongodb_uri,
            database_name,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection string with credentials masked, for logging.
    pub fn redacted_uri(&self) -> String {
        match (self.mongodb_uri.find("://"), self.mongodb_uri.rfind('@')) {
            (Some(scheme), Some(at)) if at > scheme => format!(
                "{}://***@{}",
                &self.mongodb_uri[..scheme],
                &self.mongodb_uri[at + 1..]
            ),
            _ => self.mongodb_uri.clone(),
        }
    }
}
