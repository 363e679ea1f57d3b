pub mod collation;
pub mod pool;
