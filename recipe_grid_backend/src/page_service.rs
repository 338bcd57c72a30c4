use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, get_service},
    Router,
};
use itertools::Itertools;
use recipe_grid_frontend::api::{self, RecipeSource};
use recipe_grid_frontend::assets::AssetResolver;
use recipe_grid_frontend::templates::recipes::{render_recipes_page, STYLESHEET_PATH};
use recipe_grid_model::{Recipe, RecipeId};
use thiserror::Error as ThisError;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Failed to fetch recipes: {0}")]
    Fetch(#[from] api::Error),
}
pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Recipes page failed: {self}");
        let status = match self {
            Error::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Ids seen more than once in a single collection.
pub fn duplicate_ids(recipes: &[Recipe]) -> Vec<&RecipeId> {
    recipes.iter().map(|recipe| &recipe.id).duplicates().collect()
}

pub struct PageState {
    source: RecipeSource,
    assets: AssetResolver,
}

impl PageState {
    pub fn new(source: RecipeSource, assets: AssetResolver) -> Self {
        PageState { source, assets }
    }

    pub fn assets(&self) -> &AssetResolver {
        &self.assets
    }

    /// One fetch, one render. A failed fetch renders nothing.
    pub async fn render(&self) -> Result<String> {
        let recipes = self.source.fetch_recipes().await?;
        let duplicates = duplicate_ids(&recipes);
        if !duplicates.is_empty() {
            warn!(?duplicates, "recipe ids are not unique in this collection");
        }
        info!(count = recipes.len(), "rendering recipe cards");
        Ok(render_recipes_page(recipes, &self.assets))
    }
}

async fn recipes_page(Extension(state): Extension<Arc<PageState>>) -> Result<Html<String>> {
    Ok(Html(state.render().await?))
}

async fn handle_io_error(err: std::io::Error) -> (StatusCode, String) {
    tracing::error!("Failed to serve static file: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Unhandled internal error: {err}"),
    )
}

pub fn router(state: Arc<PageState>, static_dir: &Path) -> Router {
    let mut router = Router::new().route("/", get(recipes_page)).route(
        STYLESHEET_PATH,
        get_service(ServeFile::new(static_dir.join("index.css"))).handle_error(handle_io_error),
    );

    match (state.assets.image_dir(), state.assets.prefix()) {
        (Some(image_dir), prefix) if !prefix.is_empty() => {
            info!("serving images from {} at {prefix}", image_dir.display());
            router = router.nest(
                prefix,
                get_service(ServeDir::new(image_dir)).handle_error(handle_io_error),
            );
        }
        (Some(_), _) => {
            warn!("image prefix is empty, not serving the image directory; avatars use the fallback")
        }
        (None, _) => info!("no image directory configured"),
    }

    router
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
