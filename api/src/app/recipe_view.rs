//! Recipe representation
//!
//! The JSON shape returned by every recipe endpoint. Field names are kebab-case and all
//! child collections are always present, empty or not.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{NutrientType, Recipe, RecipeType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RecipeView {
    pub id: i32,
    pub title: String,
    pub number_diner: i32,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub recipe_type: RecipeTypeView,
    pub ingredients: Vec<IngredientView>,
    pub steps: Vec<StepView>,
    pub nutrients: Vec<NutrientView>,
    pub rating: RatingView,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeTypeView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientTypeView {
    pub id: i32,
    pub name: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientView {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub order: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientView {
    #[serde(rename = "type")]
    pub nutrient_type: NutrientTypeView,
    pub quantity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RatingView {
    pub number_votes: usize,
    pub rating_avg: f64,
}

impl From<&RecipeType> for RecipeTypeView {
    fn from(t: &RecipeType) -> Self {
        Self {
            id: t.id.0,
            name: t.name.clone(),
            description: t.description.clone(),
        }
    }
}

impl From<&NutrientType> for NutrientTypeView {
    fn from(t: &NutrientType) -> Self {
        Self {
            id: t.id.0,
            name: t.name.clone(),
            unit: t.unit.clone(),
        }
    }
}

impl From<&Recipe> for RecipeView {
    fn from(recipe: &Recipe) -> Self {
        let summary = recipe.rating_summary();

        Self {
            id: recipe.id.0,
            title: recipe.title.clone(),
            number_diner: recipe.diners,
            description: recipe.description.clone(),
            recipe_type: (&recipe.recipe_type).into(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|i| IngredientView {
                    name: i.name.clone(),
                    quantity: i.quantity,
                    unit: i.unit.clone(),
                })
                .collect(),
            steps: recipe
                .steps
                .iter()
                .map(|s| StepView {
                    order: s.order,
                    description: s.description.clone(),
                })
                .collect(),
            nutrients: recipe
                .nutrients
                .iter()
                .map(|n| NutrientView {
                    nutrient_type: (&n.nutrient_type).into(),
                    quantity: n.quantity,
                })
                .collect(),
            rating: RatingView {
                number_votes: summary.votes,
                rating_avg: summary.average,
            },
            created_at: recipe.created_at,
            deleted_at: recipe.deleted_at,
        }
    }
}
