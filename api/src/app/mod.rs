//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod recipe_service;
pub mod recipe_view;

pub use recipe_service::{
    CreateRecipeInput, IngredientInput, NutrientInput, RecipeService, StepInput,
};
pub use recipe_view::{NutrientTypeView, RecipeTypeView, RecipeView};
