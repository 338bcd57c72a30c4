use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use tracing::info;

use recipe_grid_frontend::api::{RecipeSource, DEFAULT_BASE_URL, DEFAULT_RECIPES_PATH};
use recipe_grid_frontend::assets::{AssetResolver, DEFAULT_IMAGE_PREFIX};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HTTPConfig {
    pub host: String,
    pub port: u16,
}

impl HTTPConfig {
    pub fn connection_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves `host`, which may be a hostname, to the first address found.
    pub async fn socket_addr(&self) -> io::Result<SocketAddr> {
        let host_port = self.connection_string();
        let addr = tokio::net::lookup_host(&host_port)
            .await?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no address found for {host_port}"),
                )
            });
        addr
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_recipes_path() -> String {
    DEFAULT_RECIPES_PATH.to_string()
}

fn default_delay_ms() -> u64 {
    3000
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_recipes_path")]
    pub recipes_path: String,
    /// Artificial latency after the upstream answers, 0 to disable.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            base_url: default_base_url(),
            recipes_path: default_recipes_path(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl UpstreamConfig {
    pub fn recipe_source(&self) -> recipe_grid_frontend::api::Result<RecipeSource> {
        Ok(RecipeSource::new(&self.base_url, &self.recipes_path)?
            .with_delay(Duration::from_millis(self.delay_ms)))
    }
}

fn default_image_prefix() -> String {
    DEFAULT_IMAGE_PREFIX.to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AssetsConfig {
    /// Local directory served under `image_prefix`. Without one, every
    /// non-empty filename is assumed to resolve.
    #[serde(default)]
    pub image_dir: Option<PathBuf>,
    #[serde(default = "default_image_prefix")]
    pub image_prefix: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        AssetsConfig {
            image_dir: None,
            image_prefix: default_image_prefix(),
            static_dir: default_static_dir(),
        }
    }
}

impl AssetsConfig {
    pub fn resolver(&self) -> AssetResolver {
        let resolver = AssetResolver::new(&self.image_prefix);
        match &self.image_dir {
            Some(dir) => resolver.with_image_dir(dir),
            None => resolver,
        }
    }
}

fn get_or_default<T: DeserializeOwned + Default>(conf: &Config, key: &str) -> Result<T, ConfigError> {
    match conf.get::<T>(key) {
        Ok(section) => Ok(section),
        Err(ConfigError::NotFound(_)) => {
            info!("no [{key}] section, using defaults");
            Ok(T::default())
        }
        Err(err) => Err(err),
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub http_config: HTTPConfig,
    pub upstream_config: UpstreamConfig,
    pub assets_config: AssetsConfig,
}

impl AppConfig {
    pub fn load(path_str: &str) -> Result<Self, ConfigError> {
        let mut conf = Config::default();
        let conf_file = File::new(path_str, config::FileFormat::Toml);
        conf.merge(conf_file)?;

        let mut http_config = conf.get::<HTTPConfig>("http")?;
        if let Ok(host) = std::env::var("RECIPE_GRID_SERVER_HOST") {
            info!("getting server host from env: {host}");
            http_config.host = host;
        } else {
            info!("getting server host from file");
        }

        let mut upstream_config = get_or_default::<UpstreamConfig>(&conf, "upstream")?;
        if let Ok(base_url) = std::env::var("RECIPE_GRID_UPSTREAM_URL") {
            info!("getting upstream url from env: {base_url}");
            upstream_config.base_url = base_url;
        }
        if let Ok(delay_ms) = std::env::var("RECIPE_GRID_DELAY_MS") {
            info!("getting upstream delay from env");
            upstream_config.delay_ms = delay_ms.parse::<u64>().map_err(|_| {
                ConfigError::Message("Failed to parse delay for upstream config".to_string())
            })?;
        }

        let assets_config = get_or_default::<AssetsConfig>(&conf, "assets")?;

        Ok(AppConfig {
            http_config,
            upstream_config,
            assets_config,
        })
    }
}
