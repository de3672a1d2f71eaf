use axum::{Json, extract::State};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::country::repository::CountryRepository,
    infrastructure::database::schema_probe::table_has_column,
    presentation::http::{errors::AppError, state::AppState},
};

#[derive(Debug, Serialize)]
pub struct CountryResponse {
    pub id: Uuid,
    pub name: String,
    pub iso_code: String,
    pub flag_emoji: String,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<CountryResponse>,
    pub warnings: Vec<String>,
}

/// Country directory. Before the iso_code migration has been applied the
/// endpoint returns an empty list with a notice instead of failing.
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<CountriesResponse>, AppError> {
    if !table_has_column(&state.db, "countries", "iso_code").await {
        return Ok(Json(CountriesResponse {
            countries: Vec::new(),
            warnings: vec![
                "Country data is unavailable until database migrations are applied.".to_string(),
            ],
        }));
    }

    let countries = state
        .country_repo
        .list()
        .await?
        .into_iter()
        .map(|c| CountryResponse {
            id: c.id,
            flag_emoji: c.flag_emoji(),
            name: c.name,
            iso_code: c.iso_code,
        })
        .collect();

    Ok(Json(CountriesResponse {
        countries,
        warnings: Vec::new(),
    }))
}
