//! Sitemap kernel
//!
//! HTTP server and command-line tools for XML sitemaps.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sitemap_kernel::{AppState, Config, routes};

#[derive(Parser)]
#[command(name = "sitemapd", version, about = "XML sitemap server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve sitemaps over HTTP (default).
    Serve,

    /// Print one sitemap document to stdout.
    Render {
        /// Module name, e.g. `sitemapindex`, `post`, `post_movie`, `taxonomy_genre`.
        module: String,
    },

    /// List every content item and why it is excluded, if it is.
    Inspect,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_tracing();

    let config = Config::from_env().context("failed to load configuration")?;
    let state = AppState::new(&config).await;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, state).await,
        Command::Render { module } => cmd_render(&state, &module).await,
        Command::Inspect => cmd_inspect(&state).await,
    }
}

async fn serve(config: &Config, state: AppState) -> Result<()> {
    info!(
        port = config.port,
        site_url = %config.site_url,
        item_types = state.content_types().len(),
        taxonomies = state.content_types().taxonomy_count(),
        "Starting sitemap server"
    );

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

async fn cmd_render(state: &AppState, module: &str) -> Result<()> {
    let rendered = state
        .sitemaps()
        .render(module)
        .await
        .with_context(|| format!("cannot render sitemap '{module}'"))?;

    print!("{}", rendered.xml);
    Ok(())
}

async fn cmd_inspect(state: &AppState) -> Result<()> {
    let reports = state.sitemaps().inspect().await;

    if reports.is_empty() {
        println!("No content items found.");
        return Ok(());
    }

    println!("{:<8} {:<16} {:<32} {:<10} STATUS", "ID", "TYPE", "SLUG", "PUBLISHED");
    println!("{}", "-".repeat(80));

    for report in &reports {
        let status = match &report.excluded {
            Some(reason) => format!("excluded ({reason})"),
            None => "included".to_string(),
        };
        let published = if report.published { "yes" } else { "no" };

        println!(
            "{:<8} {:<16} {:<32} {:<10} {}",
            report.id, report.item_type, report.slug, published, status
        );
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    // Logs go to stderr so `render` output stays clean.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
