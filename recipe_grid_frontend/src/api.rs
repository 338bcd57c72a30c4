use futures_timer::Delay;
use recipe_grid_model::Recipe;
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_RECIPES_PATH: &str = "/recipes";
/// Artificial latency applied by the default source.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to do some HTTP: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Failed to do some JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid recipes url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Bad response: {0}")]
    Http(String),
}
pub type Result<T> = std::result::Result<T, Error>;

async fn response_http_err<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await?;
        Err(Error::Http(format!("{status} – {text}")))
    } else {
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice::<T>(&body)?)
    }
}

/// Where recipes come from: one url, one optional delay.
#[derive(Debug, Clone)]
pub struct RecipeSource {
    client: reqwest::Client,
    url: Url,
    delay: Option<Duration>,
}

impl RecipeSource {
    /// `path` is appended to whatever path `base_url` already carries.
    pub fn new(base_url: &str, path: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        let url = base.join(path.trim_start_matches('/'))?;
        Ok(RecipeSource {
            client: reqwest::Client::new(),
            url,
            delay: None,
        })
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        let delay = (!delay.is_zero()).then_some(delay);
        RecipeSource { delay, ..self }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// A single GET, then the delay (if any), then decoding. Nothing is retried.
    pub async fn fetch_recipes(&self) -> Result<Vec<Recipe>> {
        tracing::debug!(url = %self.url, "fetching recipes");
        let resp = self.client.get(self.url.clone()).send().await?;
        if let Some(delay) = self.delay {
            tracing::debug!(?delay, "simulating upstream latency");
            Delay::new(delay).await;
        }
        let recipes = response_http_err::<Vec<Recipe>>(resp).await?;
        tracing::debug!(count = recipes.len(), "fetched recipes");
        Ok(recipes)
    }
}

impl Default for RecipeSource {
    fn default() -> Self {
        RecipeSource {
            client: reqwest::Client::new(),
            url: Url::parse(DEFAULT_BASE_URL)
                .and_then(|base| base.join(DEFAULT_RECIPES_PATH))
                .expect("default recipes url is valid"),
            delay: Some(DEFAULT_DELAY),
        }
    }
}

/// Fetches from `http://localhost:4000/recipes` with the default delay.
pub async fn get_recipes() -> Result<Vec<Recipe>> {
    RecipeSource::default().fetch_recipes().await
}
