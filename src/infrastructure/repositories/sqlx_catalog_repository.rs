use crate::domain::{
    catalog::{
        entity::{Actor, Movie},
        repository::CatalogRepository,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const MOVIE_COLUMNS: &str = "m.id, m.title, m.country_id, c.name AS country_name, \
     c.iso_code, m.vote_count, m.created_at";
const ACTOR_COLUMNS: &str = "a.id, a.name, a.country_id, c.name AS country_name, \
     c.iso_code, a.vote_count, a.created_at";

pub struct SqlxCatalogRepository {
    pub pool: PgPool,
}

impl SqlxCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for SqlxCatalogRepository {
    async fn list_movies(&self, country: Option<&str>) -> Result<Vec<Movie>, DomainError> {
        let base = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies m JOIN countries c ON c.id = m.country_id"
        );
        let query = match country {
            Some(_) => format!(
                "{base} WHERE LOWER(c.name) = LOWER($1) ORDER BY m.vote_count DESC, m.title ASC"
            ),
            None => format!("{base} ORDER BY m.vote_count DESC, m.title ASC"),
        };

        let mut q = sqlx::query_as::<_, Movie>(&query);
        if let Some(name) = country {
            q = q.bind(name.to_string());
        }
        q.fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn list_actors(&self, country: Option<&str>) -> Result<Vec<Actor>, DomainError> {
        let base = format!(
            "SELECT {ACTOR_COLUMNS} FROM actors a JOIN countries c ON c.id = a.country_id"
        );
        let query = match country {
            Some(_) => format!(
                "{base} WHERE LOWER(c.name) = LOWER($1) ORDER BY a.vote_count DESC, a.name ASC"
            ),
            None => format!("{base} ORDER BY a.vote_count DESC, a.name ASC"),
        };

        let mut q = sqlx::query_as::<_, Actor>(&query);
        if let Some(name) = country {
            q = q.bind(name.to_string());
        }
        q.fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn create_movie(&self, title: &str, country_id: Uuid) -> Result<Movie, DomainError> {
        let id = Uuid::now_v7();
        sqlx::query("INSERT INTO movies (id, title, country_id) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(title)
            .bind(country_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies m JOIN countries c ON c.id = m.country_id \
             WHERE m.id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn create_actor(&self, name: &str, country_id: Uuid) -> Result<Actor, DomainError> {
        let id = Uuid::now_v7();
        sqlx::query("INSERT INTO actors (id, name, country_id) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(country_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        sqlx::query_as::<_, Actor>(&format!(
            "SELECT {ACTOR_COLUMNS} FROM actors a JOIN countries c ON c.id = a.country_id \
             WHERE a.id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn delete_movie(&self, id: Uuid) -> Result<(), DomainError> {
        let done = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        if done.rows_affected() == 0 {
            return Err(DomainError::NotFound("Movie not found".to_string()));
        }
        Ok(())
    }

    async fn delete_actor(&self, id: Uuid) -> Result<(), DomainError> {
        let done = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        if done.rows_affected() == 0 {
            return Err(DomainError::NotFound("Actor not found".to_string()));
        }
        Ok(())
    }
}
