use super::entity::{Actor, Movie};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List movies ranked by vote count, optionally filtered by country name
    /// (case-insensitive).
    async fn list_movies(&self, country: Option<&str>) -> Result<Vec<Movie>, DomainError>;
    async fn list_actors(&self, country: Option<&str>) -> Result<Vec<Actor>, DomainError>;
    async fn create_movie(&self, title: &str, country_id: Uuid) -> Result<Movie, DomainError>;
    async fn create_actor(&self, name: &str, country_id: Uuid) -> Result<Actor, DomainError>;
    async fn delete_movie(&self, id: Uuid) -> Result<(), DomainError>;
    async fn delete_actor(&self, id: Uuid) -> Result<(), DomainError>;
}
