use crate::domain::{
    shared::errors::DomainError,
    country::{
        entity::{Country, next_available_iso_code, normalize_country_name},
        repository::CountryRepository,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

/// Attempts before giving up when concurrent resolvers keep racing over the
/// same free iso_code slot.
const MAX_CREATE_ATTEMPTS: usize = 3;

pub struct SqlxCountryRepository {
    pub pool: PgPool,
}

impl SqlxCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Country>, DomainError> {
        sqlx::query_as::<_, Country>(
            "SELECT id, name, iso_code, created_at FROM countries WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }
}

#[async_trait]
impl CountryRepository for SqlxCountryRepository {
    async fn list(&self) -> Result<Vec<Country>, DomainError> {
        sqlx::query_as::<_, Country>(
            "SELECT id, name, iso_code, created_at FROM countries ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn resolve_or_create(&self, raw_name: &str) -> Result<Country, DomainError> {
        let name = normalize_country_name(raw_name);

        if let Some(existing) = self.find_by_name(&name).await? {
            return Ok(existing);
        }

        // Insert keyed on the case-insensitive name index; DO NOTHING means a
        // concurrent creator of the same name wins and we re-select their row.
        // A 23505 can then only come from the iso_code index, where two
        // resolvers of different names picked the same free slot: retry with
        // a fresh scan of used codes.
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let used: HashSet<String> =
                sqlx::query_scalar::<_, String>("SELECT iso_code FROM countries")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
                    .into_iter()
                    .collect();
            let iso_code = next_available_iso_code(&used);

            let inserted = sqlx::query_as::<_, Country>(
                "INSERT INTO countries (id, name, iso_code) VALUES ($1, $2, $3)
                 ON CONFLICT ((LOWER(name))) DO NOTHING
                 RETURNING id, name, iso_code, created_at",
            )
            .bind(Uuid::now_v7())
            .bind(&name)
            .bind(&iso_code)
            .fetch_optional(&self.pool)
            .await;

            match inserted {
                Ok(Some(country)) => {
                    tracing::info!(name = %country.name, iso_code = %country.iso_code, "created country from user input");
                    return Ok(country);
                }
                Ok(None) => {
                    return self.find_by_name(&name).await?.ok_or_else(|| {
                        DomainError::InfrastructureError(
                            "country vanished after name conflict".to_string(),
                        )
                    });
                }
                Err(sqlx::Error::Database(db_err))
                    if db_err.code().as_deref() == Some("23505") =>
                {
                    tracing::warn!(name = %name, iso_code = %iso_code, attempt, "iso code collision, retrying");
                }
                Err(e) => return Err(DomainError::InfrastructureError(e.to_string())),
            }
        }

        Err(DomainError::Conflict(
            "could not allocate a country code, please retry".to_string(),
        ))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                Err(DomainError::NotFound("Country not found".to_string()))
            }
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23503") => {
                Err(DomainError::Conflict(
                    "Country is still referenced by movies, actors, or personal entries"
                        .to_string(),
                ))
            }
            Err(e) => Err(DomainError::InfrastructureError(e.to_string())),
        }
    }
}
