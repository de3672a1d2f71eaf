use super::outcome::VoteOutcome;
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Append-only vote ledger: at most one row per (user, item), enforced by the
/// database uniqueness constraint rather than application checks.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Atomically ensure a vote row exists for (user, movie). Increments the
    /// movie's counter by exactly one when the row is new; otherwise leaves it
    /// untouched. Voting on a missing movie is [`DomainError::NotFound`].
    async fn cast_movie_vote(&self, user_id: Uuid, movie_id: Uuid)
    -> Result<VoteOutcome, DomainError>;

    /// Same contract as [`Self::cast_movie_vote`], for actors.
    async fn cast_actor_vote(&self, user_id: Uuid, actor_id: Uuid)
    -> Result<VoteOutcome, DomainError>;
}
