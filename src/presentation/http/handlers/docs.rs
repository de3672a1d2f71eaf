use axum::Json;
use serde_json::json;

/// Plain JSON index of the API surface, also the target of the root redirect.
pub async fn api_docs() -> Json<serde_json::Value> {
    Json(json!({
        "name": "cinerate API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": {
                "POST /api/v1/auth/register": "Create an account (email, username, password)",
                "POST /api/v1/auth/login": "Log in with username or email",
                "POST /api/v1/auth/logout": "Acknowledge logout (discard token client-side)",
                "GET /api/v1/auth/me": "Current user from bearer token",
            },
            "catalog": {
                "GET /api/v1/movies": "Shared movie catalog, optional ?country= filter",
                "GET /api/v1/actors": "Shared actor catalog, optional ?country= filter",
                "POST /api/v1/movies/{id}/vote": "Cast a vote for a movie (idempotent)",
                "POST /api/v1/actors/{id}/vote": "Cast a vote for an actor (idempotent)",
                "GET /api/v1/countries": "Country directory with flag emoji",
            },
            "home": {
                "GET /api/v1/home": "Personal ranked lists, ?movie_country= / ?actor_country=",
                "POST /api/v1/home/movies": "Add a personal movie (multipart, optional poster)",
                "POST /api/v1/home/actors": "Add a personal actor (multipart, optional poster)",
                "DELETE /api/v1/home/movies/{id}": "Remove a personal movie",
                "DELETE /api/v1/home/actors/{id}": "Remove a personal actor",
            },
            "profile": {
                "GET /api/v1/profile": "Profile with avatar URL",
                "PATCH /api/v1/profile/info": "Update first name / email",
                "POST /api/v1/profile/avatar": "Upload avatar (multipart)",
                "POST /api/v1/profile/password": "Change password",
            },
            "admin": {
                "POST /api/v1/admin/login": "Admin login against configured credentials",
                "POST /api/v1/admin/movies": "Create a catalog movie",
                "POST /api/v1/admin/actors": "Create a catalog actor",
                "DELETE /api/v1/admin/movies/{id}": "Delete a catalog movie",
                "DELETE /api/v1/admin/actors/{id}": "Delete a catalog actor",
                "DELETE /api/v1/admin/countries/{id}": "Delete an unreferenced country",
                "GET /api/v1/admin/stats": "Row counts per table",
            },
            "ops": {
                "GET /health": "Liveness and database connectivity",
            },
        },
    }))
}
