use secrecy::Secret;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_PORT: u16 = 5000;
pub const DEFAULT_CHAT_PORT: u16 = 8000;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_VENDOR_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_DOCUMENT_POLL_TIMEOUT_SECONDS: u64 = 120;
const DEFAULT_AGENT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Everything both binaries read from the environment.
///
/// A vendor section is `None` when any of its required variables is unset or
/// empty; the matching route then answers with its "not configured" error.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub frontend: FrontendConfig,
    pub search: Option<SearchConfig>,
    pub document: Option<DocumentConfig>,
    pub speech: Option<SpeechConfig>,
    pub agent: Option<AgentConfig>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub template_dir: PathBuf,
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: Secret<String>,
    pub index_name: String,
    pub api_version: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub endpoint: String,
    pub api_key: Secret<String>,
    pub model_id: String,
    pub api_version: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub key: Secret<String>,
    pub region: String,
    pub language: String,
    /// Overrides the regional `stt.speech.microsoft.com` host.
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub endpoint: String,
    pub api_key: Secret<String>,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), default_port)
    }

    pub fn from_lookup<F>(lookup: F, default_port: u16) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Ok(Self {
            server: ServerConfig {
                host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
                port: parse_or(&var, "PORT", default_port)?,
                max_upload_bytes: parse_or(&var, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|origins| {
                        origins
                            .split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            frontend: FrontendConfig {
                template_dir: var("EDUVOICE_TEMPLATE_DIR")
                    .unwrap_or_else(|| "templates".into())
                    .into(),
                static_dir: var("CHAT_STATIC_DIR")
                    .unwrap_or_else(|| "static".into())
                    .into(),
            },
            search: SearchConfig::from_lookup(&var),
            document: DocumentConfig::from_lookup(&var)?,
            speech: SpeechConfig::from_lookup(&var),
            agent: AgentConfig::from_lookup(&var),
        })
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|e: AddrParseError| ConfigError::Invalid {
            key: "SERVER_HOST",
            reason: e.to_string(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl SearchConfig {
    fn from_lookup(var: &impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            endpoint: var("SEARCH_ENDPOINT")?,
            api_key: Secret::new(var("SEARCH_API_KEY")?),
            index_name: var("SEARCH_INDEX_NAME")?,
            api_version: "2023-11-01".into(),
            timeout: Duration::from_secs(DEFAULT_VENDOR_TIMEOUT_SECONDS),
        })
    }
}

impl DocumentConfig {
    fn from_lookup(var: &impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let poll_timeout = parse_or(
            var,
            "DOCUMENT_POLL_TIMEOUT_SECONDS",
            DEFAULT_DOCUMENT_POLL_TIMEOUT_SECONDS,
        )?;

        let (Some(endpoint), Some(api_key)) =
            (var("FORM_RECOGNIZER_ENDPOINT"), var("FORM_RECOGNIZER_API_KEY"))
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            endpoint,
            api_key: Secret::new(api_key),
            model_id: "prebuilt-layout".into(),
            api_version: "2023-07-31".into(),
            timeout: Duration::from_secs(DEFAULT_VENDOR_TIMEOUT_SECONDS),
            poll_interval: Duration::from_secs(1),
            poll_timeout: Duration::from_secs(poll_timeout),
        }))
    }
}

impl SpeechConfig {
    fn from_lookup(var: &impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            key: Secret::new(var("SPEECH_KEY")?),
            region: var("SPEECH_REGION")?,
            language: var("SPEECH_LANGUAGE").unwrap_or_else(|| "en-US".into()),
            endpoint: var("SPEECH_ENDPOINT"),
            timeout: Duration::from_secs(DEFAULT_VENDOR_TIMEOUT_SECONDS),
        })
    }

    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.stt.speech.microsoft.com", self.region),
        }
    }
}

impl AgentConfig {
    fn from_lookup(var: &impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            endpoint: var("FOUNDATION_AGENT_ENDPOINT")?,
            api_key: Secret::new(var("FOUNDATION_AGENT_API_KEY")?),
            timeout: Duration::from_secs(DEFAULT_AGENT_TIMEOUT_SECONDS),
        })
    }
}

fn parse_or<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
