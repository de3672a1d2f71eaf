use super::entity::{NewPersonalActor, NewPersonalMovie, PersonalActor, PersonalMovie};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// The user's ranked movie list (score desc, newest first), optionally
    /// filtered by country name (case-insensitive).
    async fn list_movies(
        &self,
        user_id: Uuid,
        country: Option<&str>,
    ) -> Result<Vec<PersonalMovie>, DomainError>;

    async fn list_actors(
        &self,
        user_id: Uuid,
        country: Option<&str>,
    ) -> Result<Vec<PersonalActor>, DomainError>;

    async fn insert_movie(&self, entry: NewPersonalMovie) -> Result<PersonalMovie, DomainError>;

    async fn insert_actor(&self, entry: NewPersonalActor) -> Result<PersonalActor, DomainError>;

    /// Fetch one of the user's own movie entries; `None` when it does not
    /// exist or belongs to someone else.
    async fn find_movie(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<PersonalMovie>, DomainError>;

    async fn find_actor(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<PersonalActor>, DomainError>;

    /// Delete an owned entry; returns false when nothing matched.
    async fn delete_movie(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError>;

    async fn delete_actor(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError>;
}
