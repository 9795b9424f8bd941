/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * From the outside in:
 * 1. `TraceLayer` - request spans
 * 2. `CorsLayer` - cross-origin headers and preflight answers
 * 3. Auth gate - attaches an `AuthOutcome` to every request
 */

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    response::{IntoResponse, Json},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::middleware::auth::auth_gate;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Services shared by the handlers
/// * `config` - Image directory and CORS origin
///
/// # Route Details
///
/// - `/auth/*`, `/feed/*` - see [`configure_api_routes`]
/// - `/images/*` - post images, served from `config.images_dir`
/// - anything else - 404 JSON
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router<()> {
    let router = configure_api_routes(Router::new());

    // Post images
    let router = router.nest_service("/images", ServeDir::new(&config.images_dir));

    // Fallback handler for 404
    let router = router.fallback(not_found);

    let router = router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(config.cors_allow_origin.as_deref()))
            .layer(middleware::from_fn_with_state(app_state.tokens.clone(), auth_gate)),
    );

    router.with_state(app_state)
}

fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    match allow_origin {
        None => cors.allow_origin(Any),
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                cors.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
            }
        },
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Not found.")))
}
