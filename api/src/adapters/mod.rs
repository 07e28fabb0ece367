//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;

pub use postgres::{
    ensure_schema, PostgresNutrientTypeRepository, PostgresRecipeRepository,
    PostgresRecipeTypeRepository,
};
