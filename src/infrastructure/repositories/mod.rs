pub mod sqlx_catalog_repository;
pub mod sqlx_collection_repository;
pub mod sqlx_country_repository;
pub mod sqlx_vote_repository;
