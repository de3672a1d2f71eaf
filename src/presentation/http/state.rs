use crate::{
    config::Config,
    infrastructure::{
        repositories::{
            sqlx_catalog_repository::SqlxCatalogRepository,
            sqlx_collection_repository::SqlxCollectionRepository,
            sqlx_country_repository::SqlxCountryRepository,
            sqlx_vote_repository::SqlxVoteRepository,
        },
        storage::traits::StorageService,
    },
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub storage: Arc<dyn StorageService>,
    pub config: Config,
    pub country_repo: Arc<SqlxCountryRepository>,
    pub catalog_repo: Arc<SqlxCatalogRepository>,
    pub vote_repo: Arc<SqlxVoteRepository>,
    pub collection_repo: Arc<SqlxCollectionRepository>,
}
