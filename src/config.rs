use std::env::var;

/// Process-wide configuration, read from the environment once at startup
/// and injected into handlers via `Extension`. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub cors_origin: Option<String>,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: var("FAST2SMS_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            cors_origin: var("CORS_ORIGIN").ok(),
            environment: var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn api_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
