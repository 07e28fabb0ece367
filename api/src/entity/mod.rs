//! SeaORM entities
//!
//! Table mappings in sea-orm-cli codegen layout. Kept in sync with
//! `adapters::postgres::schema` by hand.

pub mod ingredients;
pub mod nutrient_types;
pub mod ratings;
pub mod recipe_nutrients;
pub mod recipe_types;
pub mod recipes;
pub mod steps;
