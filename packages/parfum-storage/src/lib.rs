pub mod db;
pub mod lookups;
pub mod models;
pub mod notes;
pub mod perfumes;
pub mod schema;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
