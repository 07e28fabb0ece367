//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod recipe_repo;
pub mod reference_repo;
pub mod schema;


pub use recipe_repo::PostgresRecipeRepository;
pub use reference_repo::{PostgresNutrientTypeRepository, PostgresRecipeTypeRepository};
pub use schema::ensure_schema;
