use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub messaging: MessagingConfig,

    #[serde(default)]
    pub http: HttpConfig,
}
impl AppConfig {
    pub fn load(config_filepath: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_filepath {
            Some(path) => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {path:?}"))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse TOML config file: {path:?}"))?
            }

            // Without an explicit flag the default file is optional, everything
            // can come from defaults and environment variables.
            None => match fs::read_to_string("config.toml") {
                Ok(content) => toml::from_str(&content)
                    .with_context(|| "Failed to parse TOML config file: config.toml")?,
                Err(_) => AppConfig::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if self.completion.api_key.is_none() {
            self.completion.api_key = env::var("COMPLETION_API_KEY").ok();
        }
        if self.messaging.api_key.is_none() {
            self.messaging.api_key = env::var("MESSAGING_API_KEY").ok();
        }
        if self.messaging.api_secret.is_none() {
            self.messaging.api_secret = env::var("MESSAGING_API_SECRET").ok();
        }
        if self.messaging.from_number.is_none() {
            self.messaging.from_number = env::var("MESSAGING_FROM_NUMBER").ok();
        }

        // The original deployment selected its listening port with PORT only.
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.http.address.set_port(port);
        }
    }

    /// Missing credentials are a startup failure, not a per-request surprise.
    fn validate(&self) -> Result<()> {
        if self.completion.api_key.is_none() {
            bail!("Missing completion API key. Set [completion] api_key or the COMPLETION_API_KEY environment variable!");
        }
        if self.messaging.api_key.is_none() || self.messaging.api_secret.is_none() {
            bail!("Missing messaging API credentials. Set [messaging] api_key/api_secret or the MESSAGING_API_KEY/MESSAGING_API_SECRET environment variables!");
        }
        if self.messaging.from_number.is_none() {
            bail!("Missing messaging sender number. Set [messaging] from_number or the MESSAGING_FROM_NUMBER environment variable!");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_completion_base_url")]
    pub base_url: String,

    #[serde(default = "default_completion_model")]
    pub model: String,

    #[serde(default = "default_completion_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_completion_temperature")]
    pub temperature: f32,

    #[serde(default = "default_completion_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}
impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_completion_base_url(),
            model: default_completion_model(),
            max_tokens: default_completion_max_tokens(),
            temperature: default_completion_temperature(),
            timeout_secs: default_completion_timeout(),
            system_prompt: default_system_prompt(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub api_secret: Option<String>,

    #[serde(default)]
    pub from_number: Option<String>,

    #[serde(default = "default_messaging_base_url")]
    pub base_url: String,

    #[serde(default = "default_messaging_timeout")]
    pub timeout_secs: u64,
}
impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            from_number: None,
            base_url: default_messaging_base_url(),
            timeout_secs: default_messaging_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_address")]
    pub address: SocketAddr,
}
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: default_http_address(),
        }
    }
}

fn default_completion_base_url() -> String {
    "https://api.novita.ai/openai".to_string()
}
fn default_completion_model() -> String {
    "openai/gpt-oss-20b".to_string()
}
fn default_completion_max_tokens() -> u32 {
    256
}
fn default_completion_temperature() -> f32 {
    0.7
}
fn default_completion_timeout() -> u64 {
    15
}
fn default_system_prompt() -> String {
    "You are Nexora AI, a friendly SMS assistant. Reply in 1-3 short sentences. Never include XML in your answer.".to_string()
}
fn default_messaging_base_url() -> String {
    "https://rest.nexmo.com".to_string()
}
fn default_messaging_timeout() -> u64 {
    10
}
fn default_http_address() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 5000)
}
