//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod rating;
pub mod recipe;
pub mod reference;

pub use rating::{NewRating, Rating, Score, MAX_SOURCE_IP_LEN};
pub use recipe::{
    Ingredient, NewRecipe, Recipe, RecipeId, RecipeNutrient, Step, MAX_INGREDIENT_NAME_LEN,
    MAX_TITLE_LEN, MAX_UNIT_LEN,
};
pub use reference::{NutrientType, NutrientTypeId, RecipeType, RecipeTypeId};
