//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod recipes;
pub mod reference;

pub use recipes::{create_recipe, delete_recipe, get_recipe, list_recipes, rate_recipe};
pub use reference::{list_nutrient_types, list_recipe_types};
