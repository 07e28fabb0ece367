//! Reference data handlers

use axum::{extract::State, Json};

use crate::app::{NutrientTypeView, RecipeTypeView};
use crate::error::AppError;
use crate::AppState;

/// GET /recipe-types
pub async fn list_recipe_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeTypeView>>, AppError> {
    Ok(Json(state.recipe_service.recipe_types().await?))
}

/// GET /nutrient-types
pub async fn list_nutrient_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<NutrientTypeView>>, AppError> {
    Ok(Json(state.recipe_service.nutrient_types().await?))
}
