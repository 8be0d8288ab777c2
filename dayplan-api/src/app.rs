/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use dayplan_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = dayplan_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post},
    Router,
};
use dayplan_shared::auth::{jwt, middleware::AuthContext};
use dayplan_shared::store::postgres::PgTodoStore;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (users, health check)
    pub db: PgPool,

    /// Todo storage adapter
    pub store: PgTodoStore,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            store: PgTodoStore::new(db.clone()),
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                     # Health check (public)
/// └── /v1/                        # API v1 (versioned)
///     ├── /auth/
///     │   ├── POST /signin        # Sign in / sign up / anonymous (public)
///     │   └── GET  /me            # Current user (authenticated)
///     └── /todos/                 # Todo routes (authenticated)
///         ├── POST   /            # Create todo
///         ├── GET    /for-date    # Todos active on a calendar day
///         ├── POST   /toggle      # Toggle completion
///         └── DELETE /:id         # Delete todo
/// ```
///
/// # Middleware Stack
///
/// 1. Request tracing (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Bearer-token authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Sign-in is public; /me requires a token
    let auth_routes = Router::new()
        .route("/signin", post(routes::auth::signin))
        .merge(
            Router::new()
                .route("/me", get(routes::auth::me))
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    bearer_auth_layer,
                )),
        );

    // Todo routes (require a valid token)
    let todo_routes = Router::new()
        .route("/", post(routes::todos::create_todo))
        .route("/for-date", get(routes::todos::todos_for_date))
        .route("/toggle", post(routes::todos::toggle_todo))
        .route("/:id", delete(routes::todos::delete_todo))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/todos", todo_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::security::security_headers,
        ))
        .with_state(state)
}

/// Bearer-token authentication middleware layer
///
/// Extracts and validates the JWT from the Authorization header, then injects
/// [`AuthContext`] into request extensions for handlers to consume.
async fn bearer_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        crate::error::ApiError::BadRequest("Expected Bearer token".to_string())
    })?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut()
        .insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}
