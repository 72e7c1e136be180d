//! Commit Explorer - interactive commit history view for a per-line commit log
//!
//! # Usage
//! ```bash
//! commit-explorer                          # Serve ./loc.csv
//! commit-explorer path/to/loc.csv --open   # Serve and open browser
//! commit-explorer loc.csv --repo-url https://github.com/me/site/commit/
//! ```

mod error;
mod explorer;
mod models;
mod routes;

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use axum::Router;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use clap::Parser;
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use explorer::config::{DEFAULT_COMMIT_URL_BASE, DEFAULT_ITEM_HEIGHT, DEFAULT_WINDOW_SIZE};
use explorer::{Explorer, ExplorerConfig};

/// Embedded page: markup, styles and the event glue script
#[derive(Embed)]
#[folder = "assets"]
struct Assets;

/// Commit Explorer - explore a commit log by time of day and date
#[derive(Parser)]
#[command(name = "commit-explorer")]
#[command(about = "Interactive commit history explorer", long_about = None)]
struct Cli {
    /// Path to the per-line commit log (CSV)
    #[arg(value_name = "LOG_PATH", default_value = "loc.csv")]
    log_path: PathBuf,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Prefix joined with a commit id to link to that commit
    #[arg(long, default_value = DEFAULT_COMMIT_URL_BASE)]
    repo_url: String,

    /// Height of one timeline item, in pixels
    #[arg(long, default_value_t = DEFAULT_ITEM_HEIGHT, value_parser = parse_item_height)]
    item_height: f64,

    /// Number of timeline items rendered at once
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE, value_parser = parse_window_size)]
    window_size: usize,
}

fn parse_item_height(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(height) if height.is_finite() && height > 0.0 => Ok(height),
        _ => Err(format!("expected a positive number of pixels, got '{}'", raw)),
    }
}

fn parse_window_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(format!("expected a positive item count, got '{}'", raw)),
    }
}

/// Serve embedded static files
async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    // Default to index.html for root or non-file paths
    let path = if path.is_empty() || !path.contains('.') {
        "index.html"
    } else {
        path
    };

    match Assets::get(path).map(|content| (path, content)).or_else(|| {
        Assets::get("index.html").map(|content| ("index.html", content))
    }) {
        Some((path, content)) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ExplorerConfig {
        item_height: cli.item_height,
        window_size: cli.window_size,
        commit_url_base: cli.repo_url.clone(),
        ..ExplorerConfig::default()
    };
    let mut explorer = Explorer::new(config);

    // A failed load is not fatal to the server: the page shows the error
    let log_display = cli.log_path.display().to_string();
    match explorer::loader::load_log(&cli.log_path) {
        Ok(rows) => explorer.load(rows),
        Err(e) => {
            eprintln!("✗ Failed to load commit log: {}", e);
            eprintln!("  Path: {}", log_display);
            explorer.fail(&e);
        }
    }
    let commit_count = explorer.state().commits().len();

    let shared_explorer = Arc::new(RwLock::new(explorer));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router with API routes and static file serving
    let app = Router::new()
        .merge(routes::create_router(shared_explorer))
        .fallback(get(serve_static))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind to the port
    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    // Print startup message
    let url = format!("http://127.0.0.1:{}", cli.port);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │               Commit Explorer               │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  Commit log: {}", log_display);
    println!("  Commits:    {}", commit_count);
    println!("  Server:     {}", url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    // Open browser if requested
    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    // Set up graceful shutdown
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["commit-explorer"]);
        assert_eq!(cli.log_path, PathBuf::from("loc.csv"));
        assert_eq!(cli.port, 3001);
        assert_eq!(cli.item_height, DEFAULT_ITEM_HEIGHT);
        assert_eq!(cli.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(cli.repo_url, DEFAULT_COMMIT_URL_BASE);
    }

    #[test]
    fn rejects_non_positive_timeline_settings() {
        assert!(Cli::try_parse_from(["commit-explorer", "--item-height", "0"]).is_err());
        assert!(Cli::try_parse_from(["commit-explorer", "--window-size", "0"]).is_err());
        let cli = Cli::try_parse_from(["commit-explorer", "log.csv", "--item-height", "30"]).unwrap();
        assert_eq!(cli.item_height, 30.0);
    }

    #[test]
    fn embedded_page_matches_rendered_panels() {
        let page = Assets::get("index.html").unwrap();
        let page = std::str::from_utf8(&page.data).unwrap();
        // Panels render block markup, so their containers must not be <p>
        assert!(page.contains(r#"<div id="selection-count"></div>"#));

        let script = Assets::get("app.js").unwrap();
        let script = std::str::from_utf8(&script.data).unwrap();
        assert!(script.contains("hovered = views.highlighted"));
    }

    #[tokio::test]
    async fn serves_embedded_index_for_unknown_routes() {
        let req = Request::builder().uri("/meta").body(Body::empty()).unwrap();
        let response = serve_static(req).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }
}
