use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::services::{AuthService, CatalogService, WriteDispatcher, WriteOp};
use crate::state::SharedState;

pub mod auth;
mod dramas;
mod error;
pub mod events;
mod genres;
mod observability;
mod pages;
mod parts;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use tokio::sync::RwLock;

pub use crate::domain::events::NotificationEvent;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn event_bus(&self) -> &tokio::sync::broadcast::Sender<NotificationEvent> {
        &self.shared.event_bus
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn CatalogService> {
        &self.shared.catalog
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth
    }

    #[must_use]
    pub fn writes(&self) -> &WriteDispatcher {
        &self.shared.writes
    }
}

/// Dispatches a validated write and answers before the store acknowledges.
fn accept(state: &AppState, op: WriteOp) -> (StatusCode, Json<ApiResponse<WriteAcceptedDto>>) {
    let body = WriteAcceptedDto::from(&op);
    state.writes().dispatch(op);
    (StatusCode::ACCEPTED, Json(ApiResponse::success(body)))
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, secure_cookies, inactivity_minutes) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_inactivity_minutes,
        )
    };

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            inactivity_minutes,
        )));

    let api_router = Router::new()
        .merge(create_admin_api_router(state.clone()))
        .route("/dramas", get(dramas::list_dramas))
        .route("/dramas/trending", get(dramas::trending_dramas))
        .route("/dramas/{id}", get(dramas::get_drama))
        .route("/genres", get(genres::list_genres))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .merge(events::router());

    let admin_pages = Router::new()
        .route("/admin", get(pages::admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::page_gate_middleware,
        ));

    let page_router = Router::new()
        .merge(admin_pages)
        .route("/", get(pages::home))
        .route("/dramas/{id}", get(pages::drama))
        .route("/request", get(pages::request))
        .route("/collaboration", get(pages::collaboration))
        .route("/login", get(pages::login))
        .route("/signup", get(pages::signup));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .merge(page_router)
        .layer(session_layer)
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_admin_api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/admin/dramas",
            get(dramas::admin_list_dramas).post(dramas::create_drama),
        )
        .route("/admin/dramas/options", get(dramas::drama_options))
        .route(
            "/admin/dramas/{id}",
            put(dramas::update_drama).delete(dramas::delete_drama),
        )
        .route(
            "/admin/genres",
            get(genres::list_genres).post(genres::create_genre),
        )
        .route(
            "/admin/genres/{id}",
            put(genres::update_genre).delete(genres::delete_genre),
        )
        .route("/admin/parts", get(parts::list_parts).post(parts::create_part))
        .route("/admin/parts/grouped", get(parts::grouped_parts))
        .route(
            "/admin/parts/{id}",
            get(parts::get_part)
                .put(parts::update_part)
                .delete(parts::delete_part),
        )
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/api-key/regenerate", post(auth::regenerate_api_key))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
