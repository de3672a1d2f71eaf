use crate::domain::{
    shared::errors::DomainError,
    collection::{
        entity::{NewPersonalActor, NewPersonalMovie, PersonalActor, PersonalMovie},
        repository::CollectionRepository,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const MOVIE_COLUMNS: &str = "p.id, p.user_id, p.title, p.country_id, c.name AS country_name, \
     c.iso_code, p.production_year, p.score, p.poster_key, p.poster_url, p.created_at";
const ACTOR_COLUMNS: &str = "p.id, p.user_id, p.full_name, p.country_id, c.name AS country_name, \
     c.iso_code, p.born, p.score, p.poster_key, p.poster_url, p.created_at";

pub struct SqlxCollectionRepository {
    pub pool: PgPool,
}

impl SqlxCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionRepository for SqlxCollectionRepository {
    async fn list_movies(
        &self,
        user_id: Uuid,
        country: Option<&str>,
    ) -> Result<Vec<PersonalMovie>, DomainError> {
        let base = format!(
            "SELECT {MOVIE_COLUMNS} FROM personal_movies p JOIN countries c ON c.id = p.country_id \
             WHERE p.user_id = $1"
        );
        let order = "ORDER BY p.score DESC, p.created_at DESC, p.title ASC";
        let query = match country {
            Some(_) => format!("{base} AND LOWER(c.name) = LOWER($2) {order}"),
            None => format!("{base} {order}"),
        };

        let mut q = sqlx::query_as::<_, PersonalMovie>(&query).bind(user_id);
        if let Some(name) = country {
            q = q.bind(name.to_string());
        }
        q.fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn list_actors(
        &self,
        user_id: Uuid,
        country: Option<&str>,
    ) -> Result<Vec<PersonalActor>, DomainError> {
        let base = format!(
            "SELECT {ACTOR_COLUMNS} FROM personal_actors p JOIN countries c ON c.id = p.country_id \
             WHERE p.user_id = $1"
        );
        let order = "ORDER BY p.score DESC, p.created_at DESC, p.full_name ASC";
        let query = match country {
            Some(_) => format!("{base} AND LOWER(c.name) = LOWER($2) {order}"),
            None => format!("{base} {order}"),
        };

        let mut q = sqlx::query_as::<_, PersonalActor>(&query).bind(user_id);
        if let Some(name) = country {
            q = q.bind(name.to_string());
        }
        q.fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn insert_movie(&self, entry: NewPersonalMovie) -> Result<PersonalMovie, DomainError> {
        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO personal_movies
                (id, user_id, title, country_id, production_year, score, poster_key, poster_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(id)
        .bind(entry.user_id)
        .bind(&entry.title)
        .bind(entry.country_id)
        .bind(entry.production_year)
        .bind(entry.score)
        .bind(&entry.poster_key)
        .bind(&entry.poster_url)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        sqlx::query_as::<_, PersonalMovie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM personal_movies p \
             JOIN countries c ON c.id = p.country_id WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn insert_actor(&self, entry: NewPersonalActor) -> Result<PersonalActor, DomainError> {
        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO personal_actors
                (id, user_id, full_name, country_id, born, score, poster_key, poster_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(id)
        .bind(entry.user_id)
        .bind(&entry.full_name)
        .bind(entry.country_id)
        .bind(entry.born)
        .bind(entry.score)
        .bind(&entry.poster_key)
        .bind(&entry.poster_url)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        sqlx::query_as::<_, PersonalActor>(&format!(
            "SELECT {ACTOR_COLUMNS} FROM personal_actors p \
             JOIN countries c ON c.id = p.country_id WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn find_movie(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<PersonalMovie>, DomainError> {
        sqlx::query_as::<_, PersonalMovie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM personal_movies p \
             JOIN countries c ON c.id = p.country_id WHERE p.id = $1 AND p.user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn find_actor(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<PersonalActor>, DomainError> {
        sqlx::query_as::<_, PersonalActor>(&format!(
            "SELECT {ACTOR_COLUMNS} FROM personal_actors p \
             JOIN countries c ON c.id = p.country_id WHERE p.id = $1 AND p.user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    async fn delete_movie(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let done = sqlx::query("DELETE FROM personal_movies WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(done.rows_affected() > 0)
    }

    async fn delete_actor(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let done = sqlx::query("DELETE FROM personal_actors WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(done.rows_affected() > 0)
    }
}
