use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use recipe_grid_backend::page_service::{router, PageState};
use recipe_grid_frontend::api::{Error as FetchError, RecipeSource};
use recipe_grid_frontend::assets::AssetResolver;
use recipe_grid_model::Recipe;
use serde_json::json;
use tower::ServiceExt;

fn sample_recipes() -> serde_json::Value {
    json!([
        {
            "title": "Mushroom Risotto",
            "image": "risotto.png",
            "time": 45,
            "description": "Creamy and earthy.",
            "vegan": false,
            "id": "1"
        },
        {
            "title": "Chickpea Curry",
            "image": "curry.png",
            "time": 30,
            "description": "Warming and quick.",
            "vegan": true,
            "id": "2"
        }
    ])
}

/// Spawns a stand-in recipes api on an ephemeral port.
async fn spawn_upstream(app: Router) -> SocketAddr {
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    addr
}

async fn upstream_with(body: serde_json::Value) -> SocketAddr {
    spawn_upstream(Router::new().route("/recipes", get(move || async move { Json(body) }))).await
}

fn source_for(addr: SocketAddr) -> RecipeSource {
    RecipeSource::new(&format!("http://{addr}"), "/recipes").unwrap()
}

fn app(addr: SocketAddr, assets: AssetResolver, static_dir: &Path) -> Router {
    let state = Arc::new(PageState::new(source_for(addr), assets));
    router(state, static_dir)
}

async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn fetches_and_decodes_recipes() {
    let addr = upstream_with(sample_recipes()).await;
    let recipes = source_for(addr).fetch_recipes().await.unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(
        recipes[1],
        Recipe {
            title: "Chickpea Curry".into(),
            image: "curry.png".into(),
            time: 30,
            description: "Warming and quick.".into(),
            vegan: true,
            id: "2".into(),
        }
    );
}

#[tokio::test]
async fn delay_is_applied_before_returning() {
    let addr = upstream_with(json!([])).await;
    let source = source_for(addr).with_delay(std::time::Duration::from_millis(200));

    let started = std::time::Instant::now();
    let recipes = source.fetch_recipes().await.unwrap();
    assert!(recipes.is_empty());
    assert!(started.elapsed() >= std::time::Duration::from_millis(200));
}

#[tokio::test]
async fn non_ok_status_is_an_error() {
    let addr = spawn_upstream(Router::new().route(
        "/recipes",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "kitchen closed") }),
    ))
    .await;

    match source_for(addr).fetch_recipes().await {
        Err(FetchError::Http(msg)) => {
            assert!(msg.contains("503"));
            assert!(msg.contains("kitchen closed"));
        }
        other => panic!("expected an http error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_an_error() {
    let addr = upstream_with(json!({ "recipes": "not a list" })).await;
    assert!(matches!(
        source_for(addr).fetch_recipes().await,
        Err(FetchError::Serde(_))
    ));
}

#[tokio::test]
async fn unreachable_upstream_is_an_error() {
    // Bind and drop to get a port nobody is listening on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let source = RecipeSource::new(&format!("http://127.0.0.1:{port}"), "/recipes").unwrap();
    assert!(matches!(
        source.fetch_recipes().await,
        Err(FetchError::Request(_))
    ));
}

#[tokio::test]
async fn renders_one_card_per_recipe() {
    let addr = upstream_with(sample_recipes()).await;
    let static_dir = tempfile::tempdir().unwrap();
    let (status, body) = get_page(
        app(addr, AssetResolver::default(), static_dir.path()),
        "/",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("data-recipe-id=").count(), 2);
    assert!(body.contains("Mushroom Risotto"));
    assert!(body.contains("45 mins to cook."));
    assert!(body.contains("30 mins to cook."));
    assert_eq!(body.matches("Vegan!").count(), 1);
    assert_eq!(body.matches("View Recipe").count(), 2);
    assert!(body.contains("/img/risotto.png"));
}

#[tokio::test]
async fn empty_collection_renders_an_empty_grid() {
    let addr = upstream_with(json!([])).await;
    let static_dir = tempfile::tempdir().unwrap();
    let (status, body) = get_page(
        app(addr, AssetResolver::default(), static_dir.path()),
        "/",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("data-recipe-id=").count(), 0);
    assert!(body.contains("<title>Recipes</title>"));
}

#[tokio::test]
async fn upstream_failure_aborts_the_page() {
    let addr = spawn_upstream(Router::new().route(
        "/recipes",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;
    let static_dir = tempfile::tempdir().unwrap();
    let (status, body) = get_page(
        app(addr, AssetResolver::default(), static_dir.path()),
        "/",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("Failed to fetch recipes"));
    assert!(!body.contains("data-recipe-id="));
}

#[tokio::test]
async fn missing_images_fall_back_and_present_ones_are_served() {
    let addr = upstream_with(sample_recipes()).await;
    let image_dir = tempfile::tempdir().unwrap();
    std::fs::write(image_dir.path().join("curry.png"), b"not really a png").unwrap();
    let static_dir = tempfile::tempdir().unwrap();
    let assets = AssetResolver::default().with_image_dir(image_dir.path());

    let (status, body) = get_page(app(addr, assets.clone(), static_dir.path()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/img/curry.png"));
    assert!(!body.contains("/img/risotto.png"));
    assert_eq!(body.matches("avatar-fallback").count(), 1);

    let (status, image) = get_page(app(addr, assets, static_dir.path()), "/img/curry.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(image, "not really a png");
}

#[tokio::test]
async fn serves_the_stylesheet() {
    let addr = upstream_with(json!([])).await;
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.css"), ".card { display: flex; }").unwrap();

    let (status, css) = get_page(
        app(addr, AssetResolver::default(), static_dir.path()),
        "/index.css",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(css.contains(".card"));
}
