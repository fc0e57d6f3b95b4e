use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the remote chat service
    #[arg(long, env = "CHAT_API_BASE_URL")]
    pub upstream_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL the widget's sends are forwarded to (`{base_url}/api/chat`).
    pub base_url: String,
}

impl AppConfig {
    /// Load configuration from the process arguments and environment.
    ///
    /// Priority: CLI flag > CLI env var > `WIDGET_`-prefixed env var >
    /// config file > defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("upstream.base_url", "")?;

        // Config file: explicit path if given, otherwise ./config.yaml when present.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }

        // Environment variables (prefixed with WIDGET_), e.g. WIDGET_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("WIDGET")
                .separator("__")
                .try_parsing(true),
        );

        // CLI overrides (clap also resolves their dedicated env vars)
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = cli.upstream_url {
            builder = builder.set_override("upstream.base_url", url)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;

        if cfg.upstream.base_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "chat service base URL is not configured; set CHAT_API_BASE_URL, \
                 --upstream-url or upstream.base_url"
                    .to_string(),
            ));
        }

        Ok(cfg)
    }
}
