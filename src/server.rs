//! # Server Configuration
//!
//! Router assembly, shared state and the HTTP listener for the listings API.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{self, SessionResolver};
use crate::config::AppConfig;
use crate::handlers::{self, leads, properties, resources, saved_properties, search_alerts, testimonials, tools};
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
    pub sessions: Arc<dyn SessionResolver>,
}

impl AppState {
    /// State with the session resolver derived from `config`.
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        let sessions = auth::session_resolver(&config);
        Self {
            config: Arc::new(config),
            db,
            sessions,
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

impl FromRef<AppState> for Arc<dyn SessionResolver> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.sessions)
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route(
            "/properties",
            get(properties::list_properties).post(properties::create_property),
        )
        .route(
            "/properties/{id}",
            get(properties::get_property)
                .patch(properties::update_property)
                .delete(properties::delete_property),
        )
        .route("/leads", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/saved-properties",
            get(saved_properties::list_saved_properties).post(saved_properties::save_property),
        )
        .route(
            "/saved-properties/{id}",
            axum::routing::delete(saved_properties::delete_saved_property),
        )
        .route(
            "/search-alerts",
            get(search_alerts::list_search_alerts).post(search_alerts::create_search_alert),
        )
        .route(
            "/search-alerts/{id}",
            get(search_alerts::get_search_alert)
                .patch(search_alerts::update_search_alert)
                .delete(search_alerts::delete_search_alert),
        )
        .route(
            "/search-alerts/{id}/properties",
            get(search_alerts::matching_properties),
        )
        .route(
            "/resources",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route("/resources/{id}", get(resources::get_resource))
        .route(
            "/testimonials",
            get(testimonials::list_testimonials).post(testimonials::create_testimonial),
        )
        .route("/catalog", get(tools::catalog))
        .route("/mortgage-estimate", get(tools::mortgage_estimate))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(telemetry::trace_id_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([telemetry::TRACE_ID_HEADER, header::LOCATION])
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = config.bind_addr().context("invalid server address")?;
    let profile = config.profile.clone();
    let app = create_app(AppState::new(config, db));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, %profile, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::properties::list_properties,
        crate::handlers::properties::create_property,
        crate::handlers::properties::get_property,
        crate::handlers::properties::update_property,
        crate::handlers::properties::delete_property,
        crate::handlers::leads::list_leads,
        crate::handlers::leads::create_lead,
        crate::handlers::saved_properties::list_saved_properties,
        crate::handlers::saved_properties::save_property,
        crate::handlers::saved_properties::delete_saved_property,
        crate::handlers::search_alerts::list_search_alerts,
        crate::handlers::search_alerts::create_search_alert,
        crate::handlers::search_alerts::get_search_alert,
        crate::handlers::search_alerts::update_search_alert,
        crate::handlers::search_alerts::delete_search_alert,
        crate::handlers::search_alerts::matching_properties,
        crate::handlers::resources::list_resources,
        crate::handlers::resources::create_resource,
        crate::handlers::resources::get_resource,
        crate::handlers::testimonials::list_testimonials,
        crate::handlers::testimonials::create_testimonial,
        crate::handlers::tools::catalog,
        crate::handlers::tools::mortgage_estimate,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::handlers::HealthStatus,
            crate::error::ApiError,
            crate::models::property::Model,
            crate::models::lead::Model,
            crate::models::saved_property::Model,
            crate::models::search_alert::Model,
            crate::models::resource::Model,
            crate::models::testimonial::Model,
            crate::resources::properties::CreateProperty,
            crate::resources::properties::PatchProperty,
            crate::resources::leads::CreateLead,
            crate::resources::saved_properties::SaveProperty,
            crate::resources::saved_properties::SavedPropertyWithListing,
            crate::resources::search_alerts::CreateSearchAlert,
            crate::resources::search_alerts::PatchSearchAlert,
            crate::resources::learning::CreateResource,
            crate::resources::testimonials::CreateTestimonial,
            crate::catalog::Catalog,
            crate::format::MortgageEstimate,
            crate::format::MortgageDisplay,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "properties", description = "Property listings"),
        (name = "leads", description = "Lead capture"),
        (name = "saved-properties", description = "Listings saved by signed-in users"),
        (name = "search-alerts", description = "Saved listing searches"),
        (name = "resources", description = "Investor guides and downloads"),
        (name = "testimonials", description = "Client testimonials"),
        (name = "tools", description = "Option lists and calculators"),
    ),
    info(
        title = "Brokerage Listings API",
        description = "Listings, leads and saved searches for a real estate investment brokerage",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
