use crate::domain::{
    shared::errors::DomainError,
    voting::{outcome::VoteOutcome, repository::VoteRepository},
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxVoteRepository {
    pub pool: PgPool,
}

impl SqlxVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Shared write path for both ledgers. The insert is keyed on the
    /// (user, item) uniqueness constraint, and the counter increment is a
    /// relative update, so concurrent double-submission cannot produce a
    /// second row or a lost update. Item lookup, insert, and increment share
    /// one transaction: either all take effect or none do.
    async fn cast(
        &self,
        vote_table: &str,
        item_table: &str,
        title_column: &str,
        item_column: &str,
        user_id: Uuid,
        item_id: Uuid,
        missing_message: &str,
    ) -> Result<VoteOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        let item_title = sqlx::query_scalar::<_, String>(&format!(
            "SELECT {title_column} FROM {item_table} WHERE id = $1"
        ))
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound(missing_message.to_string()))?;

        let inserted = sqlx::query(&format!(
            "INSERT INTO {vote_table} (id, user_id, {item_column}) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, {item_column}) DO NOTHING"
        ))
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(item_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
        .rows_affected()
            == 1;

        if inserted {
            sqlx::query(&format!(
                "UPDATE {item_table} SET vote_count = vote_count + 1 WHERE id = $1"
            ))
            .bind(item_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        }

        let vote_count = sqlx::query_scalar::<_, i32>(&format!(
            "SELECT vote_count FROM {item_table} WHERE id = $1"
        ))
        .bind(item_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        Ok(VoteOutcome {
            item_id,
            item_title,
            created: inserted,
            vote_count,
        })
    }
}

#[async_trait]
impl VoteRepository for SqlxVoteRepository {
    async fn cast_movie_vote(
        &self,
        user_id: Uuid,
        movie_id: Uuid,
    ) -> Result<VoteOutcome, DomainError> {
        self.cast(
            "movie_votes",
            "movies",
            "title",
            "movie_id",
            user_id,
            movie_id,
            "Movie not found",
        )
        .await
    }

    async fn cast_actor_vote(
        &self,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<VoteOutcome, DomainError> {
        self.cast(
            "actor_votes",
            "actors",
            "name",
            "actor_id",
            user_id,
            actor_id,
            "Actor not found",
        )
        .await
    }
}
