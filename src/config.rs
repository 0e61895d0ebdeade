use search_providers::DEFAULT_API_VERSION;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub(crate) const WEBHOOK_PATH: &str = "/webhook";

fn default_port() -> u16 {
    5000u16
}

fn default_request_timeout() -> u64 {
    10u64
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SearchStrategy {
    #[default]
    Mobile,
    Api,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DeliveryMode {
    #[default]
    Polling,
    Webhook,
}

#[derive(Clone, PartialEq)]
pub(crate) enum SearchBackend {
    Mobile { session_cookie: Option<String> },
    ApiToken { access_token: String },
    ApiOAuth { app_id: String, app_secret: String },
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    #[error("Invalid value of environment variable {variable}: {reason}")]
    InvalidVariable {
        variable: &'static str,
        reason: String,
    },
}

impl From<envy::Error> for ConfigError {
    fn from(error: envy::Error) -> Self {
        match error {
            envy::Error::MissingValue(field) => ConfigError::MissingVariable(field.to_uppercase()),
            other => ConfigError::InvalidVariable {
                variable: "environment",
                reason: other.to_string(),
            },
        }
    }
}

#[derive(Clone, Deserialize)]
pub(crate) struct Config {
    pub(crate) bot_token: String,
    #[serde(default)]
    pub(crate) search_strategy: SearchStrategy,
    pub(crate) vk_session_cookie: Option<String>,
    pub(crate) vk_access_token: Option<String>,
    pub(crate) vk_app_id: Option<String>,
    pub(crate) vk_app_secret: Option<String>,
    #[serde(default = "default_api_version")]
    pub(crate) vk_api_version: String,
    #[serde(default)]
    pub(crate) delivery_mode: DeliveryMode,
    pub(crate) webhook_base_url: Option<String>,
    #[serde(default = "default_port")]
    pub(crate) port: u16,
    #[serde(default = "default_request_timeout")]
    pub(crate) request_timeout: u64,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub(crate) fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Self>(vars)?;

        if config.bot_token.trim().is_empty() {
            return Err(ConfigError::MissingVariable("BOT_TOKEN".into()));
        }

        config.search_backend()?;

        if config.delivery_mode == DeliveryMode::Webhook {
            config.webhook_url()?;
        }

        Ok(config)
    }

    pub(crate) fn search_backend(&self) -> Result<SearchBackend, ConfigError> {
        match self.search_strategy {
            SearchStrategy::Mobile => Ok(SearchBackend::Mobile {
                session_cookie: non_empty(&self.vk_session_cookie),
            }),
            SearchStrategy::Api => {
                if let Some(access_token) = non_empty(&self.vk_access_token) {
                    return Ok(SearchBackend::ApiToken { access_token });
                }

                match (non_empty(&self.vk_app_id), non_empty(&self.vk_app_secret)) {
                    (Some(app_id), Some(app_secret)) => {
                        Ok(SearchBackend::ApiOAuth { app_id, app_secret })
                    }
                    (Some(_), None) => Err(ConfigError::MissingVariable("VK_APP_SECRET".into())),
                    (None, Some(_)) => Err(ConfigError::MissingVariable("VK_APP_ID".into())),
                    (None, None) => Err(ConfigError::MissingVariable("VK_ACCESS_TOKEN".into())),
                }
            }
        }
    }

    pub(crate) fn webhook_url(&self) -> Result<Url, ConfigError> {
        let base_url = non_empty(&self.webhook_base_url)
            .ok_or_else(|| ConfigError::MissingVariable("WEBHOOK_BASE_URL".into()))?;

        Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), WEBHOOK_PATH)).map_err(
            |error| ConfigError::InvalidVariable {
                variable: "WEBHOOK_BASE_URL",
                reason: error.to_string(),
            },
        )
    }

    pub(crate) fn bind_address(&self) -> (&'static str, u16) {
        ("0.0.0.0", self.port)
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
