pub mod catalog;
pub mod collection;
pub mod country;
pub mod shared;
pub mod voting;
