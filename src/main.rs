use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::{middleware as layers, routing::get, Router};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use modelhub_api::auth::{self, AuthConfig, Claims, UserInfo};
use modelhub_api::config;
use modelhub_api::handlers;
use modelhub_api::middleware::require_auth;
use modelhub_api::state::AppState;
use modelhub_api::store::{ModelStore, PgModelStore};

#[derive(Parser)]
#[command(name = "modelhub-api", about = "ModelHub catalog backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve,
    /// Mint a development access token signed with the configured secret
    Token {
        /// Token subject (user id)
        #[arg(long, default_value = "dev-user")]
        sub: String,
        /// Display name carried in the UserInfo payload
        #[arg(long, default_value = "Dev User")]
        name: String,
        /// Email carried in the UserInfo payload
        #[arg(long, default_value = "dev@modelhub.example")]
        email: String,
        /// Omit the UserInfo payload entirely
        #[arg(long)]
        no_user_info: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::Token {
            sub,
            name,
            email,
            no_user_info,
        } => mint_token(sub, name, email, no_user_info),
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting ModelHub API in {:?} mode", config.environment);

    // Verification material is built once here and handed to the gate;
    // nothing reads the secret at request time.
    let auth = AuthConfig::from_secret(&config.security.jwt_secret)
        .context("SECURITY_JWT_SECRET must be configured")?;
    let store = PgModelStore::from_env(&config.database).context("failed to set up model store")?;

    let state = AppState {
        auth,
        store: Arc::new(store) as Arc<dyn ModelStore>,
    };
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("MODELHUB_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("🚀 ModelHub API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}

fn app(state: AppState) -> Router {
    // Everything under /api sits behind the access gate
    let protected = Router::new()
        .route("/api/models", get(handlers::models::model_list))
        .route("/api/models/:id", get(handlers::models::model_show))
        .route("/api/auth/whoami", get(handlers::auth::whoami_get))
        .route_layer(layers::from_fn_with_state(state.auth.clone(), require_auth));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(protected)
        .with_state(state)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn mint_token(sub: String, name: String, email: String, no_user_info: bool) -> anyhow::Result<()> {
    let config = config::config();

    let user_info = (!no_user_info).then(|| UserInfo {
        id: Uuid::new_v4(),
        name,
        email,
    });
    let claims = Claims::new(sub, user_info);
    let token = auth::issue_token(&claims, &config.security.jwt_secret)?;

    println!("{}", token);
    Ok(())
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "ModelHub API",
            "version": version,
            "description": "Backend API for the ModelHub 3D asset catalog",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "models": "/api/models[?page&per_page&order_by&tags&search] (protected)",
                "model": "/api/models/:id (protected)",
                "whoami": "/api/auth/whoami (protected)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
