#![allow(dead_code)]

mod fake_provider;
mod fixtures;
mod test_db;

pub use fake_provider::*;
pub use fixtures::*;
pub use test_db::*;
