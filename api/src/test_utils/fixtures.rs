//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;

use crate::app::{CreateRecipeInput, IngredientInput, StepInput};
use crate::domain::entities::{
    Ingredient, NewRecipe, NutrientType, NutrientTypeId, Rating, Recipe, RecipeId, RecipeType,
    RecipeTypeId, Score, Step,
};

/// Create the "Bakery" recipe type (id 1)
pub fn test_recipe_type() -> RecipeType {
    RecipeType {
        id: RecipeTypeId(1),
        name: "Bakery".to_string(),
        description: Some("Breads and pastries".to_string()),
    }
}

/// Create the "Protein" nutrient type (id 1, grams)
pub fn test_nutrient_type() -> NutrientType {
    NutrientType {
        id: NutrientTypeId(1),
        name: "Protein".to_string(),
        unit: "g".to_string(),
    }
}

/// Create a stored recipe: 4 diners, 200 g of flour, one step, no votes
pub fn test_recipe() -> Recipe {
    Recipe {
        id: RecipeId(1),
        title: "Bread".to_string(),
        diners: 4,
        description: None,
        recipe_type: test_recipe_type(),
        ingredients: vec![Ingredient {
            name: "Flour".to_string(),
            quantity: 200.0,
            unit: "g".to_string(),
        }],
        steps: vec![Step {
            order: 1,
            description: "Mix".to_string(),
        }],
        nutrients: vec![],
        ratings: vec![],
        created_at: Utc::now(),
        deleted_at: None,
    }
}

/// Create a stored recipe with one vote per score, each from a distinct IP
pub fn test_recipe_with_votes(scores: &[i32]) -> Recipe {
    let mut recipe = test_recipe();
    recipe.ratings = scores
        .iter()
        .enumerate()
        .map(|(i, score)| Rating {
            score: Score::new(*score).unwrap(),
            source_ip: format!("10.0.0.{}", i + 1),
            created_at: Utc::now(),
        })
        .collect();
    recipe
}

/// Validated data matching `test_recipe`
pub fn test_new_recipe() -> NewRecipe {
    let recipe = test_recipe();
    NewRecipe {
        title: recipe.title,
        diners: recipe.diners,
        description: recipe.description,
        recipe_type: recipe.recipe_type,
        ingredients: recipe.ingredients,
        steps: recipe.steps,
        nutrients: recipe.nutrients,
    }
}

/// Create-input that passes validation against `test_recipe_type`
pub fn create_input() -> CreateRecipeInput {
    CreateRecipeInput {
        title: Some("Bread".to_string()),
        diners: Some(4),
        recipe_type_id: Some(test_recipe_type().id.0),
        description: Some("Simple white loaf".to_string()),
        ingredients: Some(vec![IngredientInput {
            name: "Flour".to_string(),
            quantity: 200.0,
            unit: "g".to_string(),
        }]),
        steps: Some(vec![StepInput {
            order: 1,
            description: "Mix".to_string(),
        }]),
        nutrients: vec![],
    }
}
