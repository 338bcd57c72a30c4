use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use thiserror::Error as ThisError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recipe_grid_backend::app_config::AppConfig;
use recipe_grid_backend::page_service::{self, PageState};

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

#[derive(Debug, ThisError)]
enum Error {
    #[error("recipe_grid failed to load config from {0}, Config Error {1}")]
    Config(String, #[source] config::ConfigError),
    #[error("recipe_grid failed to resolve bind address {0}: {1}")]
    Address(String, #[source] std::io::Error),
}

#[derive(Debug, Parser)]
#[clap(name = "recipe_grid", about = "Renders a grid of recipe cards from a recipes api")]
struct Cli {
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the recipes page, fetching on every request
    Serve,
    /// Fetch once and write the page as static html
    Render {
        /// Output file, stdout when absent
        #[clap(long, short)]
        out: Option<PathBuf>,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recipe_grid=info,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn page_state(conf: &AppConfig) -> anyhow::Result<PageState> {
    let source = conf
        .upstream_config
        .recipe_source()
        .context("building the recipes source")?;
    Ok(PageState::new(source, conf.assets_config.resolver()))
}

async fn serve(conf: AppConfig) -> anyhow::Result<()> {
    let state = Arc::new(page_state(&conf)?);
    let app = page_service::router(state, &conf.assets_config.static_dir);

    let host_port = conf.http_config.connection_string();
    let addr = conf
        .http_config
        .socket_addr()
        .await
        .map_err(|err| Error::Address(host_port.clone(), err))?;
    let server = axum::Server::try_bind(&addr)
        .with_context(|| format!("binding {host_port}"))?
        .serve(app.into_make_service());

    tracing::info!("Successfully bound server to {}", server.local_addr());
    server.await.context("running the recipes page server")?;
    Ok(())
}

async fn render(conf: AppConfig, out: Option<PathBuf>) -> anyhow::Result<()> {
    let html = page_state(&conf)?.render().await?;
    match out {
        Some(path) => {
            tokio::fs::write(&path, html)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote recipes page to {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let conf = AppConfig::load(&cli.config).map_err(|err| Error::Config(cli.config.clone(), err))?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(conf).await,
        Command::Render { out } => render(conf, out).await,
    }
}
