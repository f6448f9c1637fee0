use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment, SecurityConfig};
use crate::handlers::{institutions, resources, system};
use crate::state::AppState;

/// Full application router with middleware applied per config
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(institution_routes())
        .merge(resource_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if let Some(cors) = cors_layer(&config.security, config.environment) {
        router = router.layer(cors);
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn institution_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/educationalInstitutions",
            get(institutions::list).post(institutions::create),
        )
        .route(
            "/educationalInstitutions/:institution_id",
            get(institutions::show),
        )
        .route(
            "/educationalInstitutions/:institution_id/classes",
            get(institutions::list_classes).post(institutions::create_class),
        )
}

fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/educationalInstitutions/:institution_id/classes/:class_id/resources",
            get(resources::list).post(resources::create),
        )
        .route(
            "/educationalInstitutions/:institution_id/classes/:class_id/resources/:resource_id",
            get(resources::show)
                .put(resources::update)
                .delete(resources::delete),
        )
        .route(
            "/educationalInstitutions/:institution_id/classes/:class_id/resources/:resource_id/comments",
            post(resources::create_comment),
        )
}

fn cors_layer(security: &SecurityConfig, environment: Environment) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if environment == Environment::Development {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
