use super::entity::Country;
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// Full directory, ordered by name.
    async fn list(&self) -> Result<Vec<Country>, DomainError>;

    /// Case-insensitive lookup by name; creates the country with the next
    /// unused two-letter code when absent. Idempotent across case variants.
    async fn resolve_or_create(&self, raw_name: &str) -> Result<Country, DomainError>;

    /// Protected delete: fails with [`DomainError::Conflict`] while the
    /// country is still referenced by catalog or personal records.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
