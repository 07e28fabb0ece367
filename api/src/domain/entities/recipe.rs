//! Recipe aggregate
//!
//! A recipe owns its ingredients, steps, nutrients and ratings. Children have no
//! identity of their own outside the recipe and no link back to it; the parent id
//! only exists in storage rows.

use chrono::{DateTime, Utc};

use super::rating::{Rating, RatingSummary};
use super::reference::{NutrientType, RecipeType};

/// Longest recipe title the catalog stores
pub const MAX_TITLE_LEN: usize = 255;
/// Longest ingredient name
pub const MAX_INGREDIENT_NAME_LEN: usize = 255;
/// Longest ingredient unit
pub const MAX_UNIT_LEN: usize = 50;

/// Unique identifier for a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(pub i32);

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// A preparation step. `order` is kept exactly as supplied, gaps and repeats included.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub order: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeNutrient {
    pub nutrient_type: NutrientType,
    pub quantity: f64,
}

/// A recipe with all of its children loaded
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub diners: i32,
    pub description: Option<String>,
    pub recipe_type: RecipeType,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub nutrients: Vec<RecipeNutrient>,
    pub ratings: Vec<Rating>,
    pub created_at: DateTime<Utc>,
    /// Set when the recipe is soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Recipe {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check whether `source_ip` already voted on this recipe (exact match)
    pub fn has_vote_from(&self, source_ip: &str) -> bool {
        self.ratings.iter().any(|r| r.source_ip == source_ip)
    }

    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary::from_scores(self.ratings.iter().map(|r| r.score))
    }
}

/// A validated recipe ready to be persisted together with its children
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub diners: i32,
    pub description: Option<String>,
    pub recipe_type: RecipeType,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub nutrients: Vec<RecipeNutrient>,
}
