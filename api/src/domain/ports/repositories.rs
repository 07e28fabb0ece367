//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    NewRating, NewRecipe, NutrientType, NutrientTypeId, Rating, Recipe, RecipeId, RecipeType,
    RecipeTypeId,
};
use crate::error::DomainError;

/// Repository for the Recipe aggregate
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Find a recipe by ID, soft-deleted ones included
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, DomainError>;

    /// Find recipes that are not soft-deleted, ordered by ID
    async fn find_active(
        &self,
        recipe_type: Option<&RecipeTypeId>,
    ) -> Result<Vec<Recipe>, DomainError>;

    /// Persist a recipe and all of its children atomically
    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, DomainError>;

    /// Append a rating to an active recipe
    ///
    /// Fails with `DomainError::NotFound` when the recipe is missing or soft-deleted, and
    /// with `DomainError::Conflict` when it already has a rating from the same source IP.
    /// Both must hold under concurrent calls.
    async fn add_rating(&self, id: &RecipeId, rating: &NewRating) -> Result<Rating, DomainError>;

    /// Mark a recipe as deleted if it is still active
    ///
    /// Returns `false` when the recipe does not exist or was already deleted.
    async fn soft_delete(&self, id: &RecipeId, at: DateTime<Utc>) -> Result<bool, DomainError>;
}

/// Read-only repository for recipe types
#[async_trait]
pub trait RecipeTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: &RecipeTypeId) -> Result<Option<RecipeType>, DomainError>;

    async fn find_all(&self) -> Result<Vec<RecipeType>, DomainError>;
}

/// Read-only repository for nutrient types
#[async_trait]
pub trait NutrientTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: &NutrientTypeId) -> Result<Option<NutrientType>, DomainError>;

    async fn find_all(&self) -> Result<Vec<NutrientType>, DomainError>;
}
