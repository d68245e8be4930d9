//! Route assembly for the Switchboard HTTP surface.
//!
//! The router itself carries only the administration routes (when
//! enabled); everything else is served by the dispatcher middleware, which
//! wraps the whole router and consults the API table before the inner
//! routes are reached.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dispatch;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// Receives the fully-constructed `AppState` and threads it through every
/// route via `.with_state(state)`. Requests that match no admin route and
/// no API-table entry end in the default 404 fallback.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new();

    if state.config.server.admin {
        router = router.merge(admin_routes());
    }

    let cors = build_cors_layer(&state);

    router
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            dispatch::dispatch,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Administration surface: table CRUD plus capability listings.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/_edit/apis", get(handlers::admin::list_apis))
        .route("/_edit/apis", post(handlers::admin::create_api))
        .route("/_edit/apis/{*url}", put(handlers::admin::update_api))
        .route("/_edit/apis/{*url}", delete(handlers::admin::delete_api))
        .route("/_edit/apiGroups", get(handlers::admin::list_groups))
        .route("/_edit/apiGroups", post(handlers::admin::create_group))
        .route(
            "/_edit/apiGroups/{name}",
            put(handlers::admin::rename_group),
        )
        .route(
            "/_edit/apiGroups/{name}",
            delete(handlers::admin::delete_group),
        )
        .route("/_edit/plugins", get(handlers::admin::list_plugins))
        .route("/_edit/handlers", get(handlers::admin::list_handlers))
        .route("/_edit/pluginConfigs", get(handlers::admin::list_bindings))
        .route("/_edit/pluginConfigs", post(handlers::admin::create_binding))
        .route(
            "/_edit/pluginConfigs/{index}",
            put(handlers::admin::update_binding),
        )
        .route(
            "/_edit/pluginConfigs/{index}",
            delete(handlers::admin::delete_binding),
        )
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
