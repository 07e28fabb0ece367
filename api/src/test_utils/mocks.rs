//! Mock implementations of port traits
//!
//! In-memory repositories that behave like the PostgreSQL adapters, including the
//! one-vote-per-IP rule and conditional soft delete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    NewRating, NewRecipe, NutrientType, NutrientTypeId, Rating, Recipe, RecipeId, RecipeType,
    RecipeTypeId,
};
use crate::domain::ports::{NutrientTypeRepository, RecipeRepository, RecipeTypeRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Recipe Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryRecipeRepository {
    recipes: Arc<RwLock<BTreeMap<i32, Recipe>>>,
    next_id: Arc<RwLock<i32>>,
    pub should_fail: Arc<RwLock<bool>>,
    /// Return recipes without their ratings, as if read before a concurrent vote committed
    hide_ratings: Arc<RwLock<bool>>,
    /// Return deleted recipes as active, as if read before a concurrent delete committed
    hide_deletion: Arc<RwLock<bool>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository whose every call fails with a database error
    pub fn failing() -> Self {
        Self {
            should_fail: Arc::new(RwLock::new(true)),
            ..Self::default()
        }
    }

    /// Pre-populate with a recipe for testing
    pub fn with_recipe(self, recipe: Recipe) -> Self {
        {
            let mut next_id = self.next_id.write().unwrap();
            *next_id = (*next_id).max(recipe.id.0);
            self.recipes.write().unwrap().insert(recipe.id.0, recipe);
        }
        self
    }

    pub fn hide_ratings_on_read(&self, hide: bool) {
        *self.hide_ratings.write().unwrap() = hide;
    }

    pub fn hide_deletion_on_read(&self, hide: bool) {
        *self.hide_deletion.write().unwrap() = hide;
    }

    /// Number of stored recipes, soft-deleted ones included
    pub fn count(&self) -> usize {
        self.recipes.read().unwrap().len()
    }

    /// Stored recipe as-is, bypassing every filter
    pub fn get(&self, id: i32) -> Option<Recipe> {
        self.recipes.read().unwrap().get(&id).cloned()
    }

    fn check_fail(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().unwrap() {
            return Err(DomainError::Database("Mock failure".to_string()));
        }
        Ok(())
    }

    fn as_read(&self, recipe: &Recipe) -> Recipe {
        let mut recipe = recipe.clone();
        if *self.hide_ratings.read().unwrap() {
            recipe.ratings.clear();
        }
        if *self.hide_deletion.read().unwrap() {
            recipe.deleted_at = None;
        }
        recipe
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, DomainError> {
        self.check_fail()?;
        let recipes = self.recipes.read().unwrap();
        Ok(recipes.get(&id.0).map(|r| self.as_read(r)))
    }

    async fn find_active(
        &self,
        recipe_type: Option<&RecipeTypeId>,
    ) -> Result<Vec<Recipe>, DomainError> {
        self.check_fail()?;
        let recipes = self.recipes.read().unwrap();
        Ok(recipes
            .values()
            .filter(|r| !r.is_deleted())
            .filter(|r| recipe_type.map_or(true, |t| r.recipe_type.id == *t))
            .map(|r| self.as_read(r))
            .collect())
    }

    async fn create(&self, new_recipe: &NewRecipe) -> Result<Recipe, DomainError> {
        self.check_fail()?;

        let id = {
            let mut next_id = self.next_id.write().unwrap();
            *next_id += 1;
            *next_id
        };

        let recipe = Recipe {
            id: RecipeId(id),
            title: new_recipe.title.clone(),
            diners: new_recipe.diners,
            description: new_recipe.description.clone(),
            recipe_type: new_recipe.recipe_type.clone(),
            ingredients: new_recipe.ingredients.clone(),
            steps: new_recipe.steps.clone(),
            nutrients: new_recipe.nutrients.clone(),
            ratings: Vec::new(),
            created_at: Utc::now(),
            deleted_at: None,
        };

        self.recipes.write().unwrap().insert(id, recipe.clone());
        Ok(recipe)
    }

    async fn add_rating(&self, id: &RecipeId, rating: &NewRating) -> Result<Rating, DomainError> {
        self.check_fail()?;

        // Check and insert under one write lock, like the unique index does
        let mut recipes = self.recipes.write().unwrap();
        let recipe = recipes
            .get_mut(&id.0)
            .filter(|r| !r.is_deleted())
            .ok_or_else(|| DomainError::NotFound(format!("Recipe {} not found", id)))?;

        if recipe.has_vote_from(&rating.source_ip) {
            return Err(DomainError::Conflict(format!(
                "Recipe {} already has a vote from {}",
                id, rating.source_ip
            )));
        }

        let stored = Rating {
            score: rating.score,
            source_ip: rating.source_ip.clone(),
            created_at: Utc::now(),
        };
        recipe.ratings.push(stored.clone());
        Ok(stored)
    }

    async fn soft_delete(&self, id: &RecipeId, at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_fail()?;

        let mut recipes = self.recipes.write().unwrap();
        match recipes.get_mut(&id.0) {
            Some(recipe) if !recipe.is_deleted() => {
                recipe.deleted_at = Some(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ============================================================================
// In-Memory Reference Repositories
// ============================================================================

#[derive(Default)]
pub struct InMemoryRecipeTypeRepository {
    types: Arc<RwLock<BTreeMap<i32, RecipeType>>>,
}

impl InMemoryRecipeTypeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(self, recipe_type: RecipeType) -> Self {
        self.types
            .write()
            .unwrap()
            .insert(recipe_type.id.0, recipe_type);
        self
    }
}

#[async_trait]
impl RecipeTypeRepository for InMemoryRecipeTypeRepository {
    async fn find_by_id(&self, id: &RecipeTypeId) -> Result<Option<RecipeType>, DomainError> {
        Ok(self.types.read().unwrap().get(&id.0).cloned())
    }

    async fn find_all(&self) -> Result<Vec<RecipeType>, DomainError> {
        Ok(self.types.read().unwrap().values().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryNutrientTypeRepository {
    types: Arc<RwLock<BTreeMap<i32, NutrientType>>>,
}

impl InMemoryNutrientTypeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(self, nutrient_type: NutrientType) -> Self {
        self.types
            .write()
            .unwrap()
            .insert(nutrient_type.id.0, nutrient_type);
        self
    }
}

#[async_trait]
impl NutrientTypeRepository for InMemoryNutrientTypeRepository {
    async fn find_by_id(&self, id: &NutrientTypeId) -> Result<Option<NutrientType>, DomainError> {
        Ok(self.types.read().unwrap().get(&id.0).cloned())
    }

    async fn find_all(&self) -> Result<Vec<NutrientType>, DomainError> {
        Ok(self.types.read().unwrap().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Score;
    use crate::test_utils::test_recipe;

    #[tokio::test]
    async fn add_rating_enforces_one_vote_per_ip() {
        let repo = InMemoryRecipeRepository::new().with_recipe(test_recipe());
        let id = test_recipe().id;
        let vote = NewRating {
            score: Score::new(4).unwrap(),
            source_ip: "10.0.0.1".to_string(),
        };

        repo.add_rating(&id, &vote).await.unwrap();
        let err = repo.add_rating(&id, &vote).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.get(id.0).unwrap().ratings.len(), 1);
    }

    #[tokio::test]
    async fn add_rating_to_deleted_recipe_is_not_found() {
        let repo = InMemoryRecipeRepository::new().with_recipe(test_recipe());
        let id = test_recipe().id;
        repo.soft_delete(&id, Utc::now()).await.unwrap();

        let vote = NewRating {
            score: Score::new(4).unwrap(),
            source_ip: "10.0.0.1".to_string(),
        };
        let err = repo.add_rating(&id, &vote).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(repo.get(id.0).unwrap().ratings.is_empty());
    }

    #[tokio::test]
    async fn soft_delete_only_once() {
        let repo = InMemoryRecipeRepository::new().with_recipe(test_recipe());
        let id = test_recipe().id;

        assert!(repo.soft_delete(&id, Utc::now()).await.unwrap());
        assert!(!repo.soft_delete(&id, Utc::now()).await.unwrap());
        assert!(!repo.soft_delete(&RecipeId(999), Utc::now()).await.unwrap());
    }

    #[tokio::test]
    async fn new_ids_follow_seeded_ones() {
        let repo = InMemoryRecipeRepository::new().with_recipe(test_recipe());
        let created = repo
            .create(&crate::test_utils::test_new_recipe())
            .await
            .unwrap();

        assert!(created.id.0 > test_recipe().id.0);
    }
}
