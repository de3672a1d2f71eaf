pub mod pool;
pub mod schema_probe;
