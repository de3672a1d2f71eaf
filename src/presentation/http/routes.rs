use super::{
    handlers::{admin, auth, catalog, countries, docs, health, home, profile, votes},
    middleware::admin::require_admin,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, patch, post},
};

pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/v1/admin/movies", post(admin::create_movie))
        .route("/api/v1/admin/movies/{id}", delete(admin::delete_movie))
        .route("/api/v1/admin/actors", post(admin::create_actor))
        .route("/api/v1/admin/actors/{id}", delete(admin::delete_actor))
        .route(
            "/api/v1/admin/countries/{id}",
            delete(admin::delete_country),
        )
        .route("/api/v1/admin/stats", get(admin::stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Docs, also the root landing target
        .route("/", get(|| async { Redirect::to("/api/v1/docs") }))
        .route("/api/v1/docs", get(docs::api_docs))
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        // Shared catalog
        .route("/api/v1/movies", get(catalog::list_movies))
        .route("/api/v1/movies/{id}/vote", post(votes::vote_movie))
        .route("/api/v1/actors", get(catalog::list_actors))
        .route("/api/v1/actors/{id}/vote", post(votes::vote_actor))
        .route("/api/v1/countries", get(countries::list_countries))
        // Personal lists
        .route("/api/v1/home", get(home::get_home))
        .route("/api/v1/home/movies", post(home::create_personal_movie))
        .route(
            "/api/v1/home/movies/{id}",
            delete(home::delete_personal_movie),
        )
        .route("/api/v1/home/actors", post(home::create_personal_actor))
        .route(
            "/api/v1/home/actors/{id}",
            delete(home::delete_personal_actor),
        )
        // Profile
        .route("/api/v1/profile", get(profile::get_profile))
        .route("/api/v1/profile/info", patch(profile::update_info))
        .route("/api/v1/profile/avatar", post(profile::upload_avatar))
        .route("/api/v1/profile/password", post(profile::change_password))
        // Admin login (unprotected)
        .route("/api/v1/admin/login", post(admin::admin_login))
        // Admin (protected by JWT middleware)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
