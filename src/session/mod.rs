pub mod pool;
pub mod quiz;
pub mod summary;
