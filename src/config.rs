use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub enable_wikidata: bool,
    pub openai_api_key: SecretString,
    pub openai_model: String,
    pub openai_max_tokens: u32,
    pub openai_connect_timeout_secs: u64,
    pub openai_read_timeout_secs: u64,
    pub wikidata_connect_timeout_secs: u64,
    pub wikidata_read_timeout_secs: u64,
    pub catalog_path: String,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            enable_wikidata: env::var("ENABLE_WIKIDATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_default(),
            ),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_max_tokens: env::var("OPENAI_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            openai_connect_timeout_secs: env::var("OPENAI_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            openai_read_timeout_secs: env::var("OPENAI_READ_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            wikidata_connect_timeout_secs: env::var("WIKIDATA_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            wikidata_read_timeout_secs: env::var("WIKIDATA_READ_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            catalog_path: env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "data/videos.csv".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if the OpenAI credential is missing
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.openai_api_key.expose_secret().is_empty() {
            panic!(
                "FATAL: OPENAI_API_KEY is not set! Quiz generation cannot work without a credential."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            enable_wikidata: false,
            openai_api_key: SecretString::from("test_api_key".to_string()),
            openai_model: "gpt-4o".to_string(),
            openai_max_tokens: 5000,
            openai_connect_timeout_secs: 30,
            openai_read_timeout_secs: 60,
            wikidata_connect_timeout_secs: 10,
            wikidata_read_timeout_secs: 15,
            catalog_path: "data/videos.csv".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.openai_model.is_empty());
        assert!(config.openai_max_tokens > 0);
        assert!(config.wikidata_read_timeout_secs >= config.wikidata_connect_timeout_secs);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert!(!config.enable_wikidata);
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.openai_max_tokens, 5000);
        assert_eq!(config.catalog_path, "data/videos.csv");
    }
}
