pub mod outcome;
pub mod repository;
