//! Recipe service
//!
//! Creates, lists, rates and soft-deletes recipes. Every operation returns the same
//! `RecipeView` representation.

use std::sync::Arc;

use chrono::Utc;

use super::recipe_view::{NutrientTypeView, RecipeTypeView, RecipeView};
use crate::domain::entities::{
    Ingredient, NewRating, NewRecipe, NutrientTypeId, Recipe, RecipeId, RecipeNutrient,
    RecipeTypeId, Score, Step, MAX_INGREDIENT_NAME_LEN, MAX_SOURCE_IP_LEN, MAX_TITLE_LEN,
    MAX_UNIT_LEN,
};
use crate::domain::ports::{NutrientTypeRepository, RecipeRepository, RecipeTypeRepository};
use crate::error::{AppError, DomainError};

/// Input for creating a recipe
///
/// Required fields are optional here so that a missing field surfaces as a validation
/// error in the documented order instead of a decoding failure.
#[derive(Debug, Clone, Default)]
pub struct CreateRecipeInput {
    pub title: Option<String>,
    pub diners: Option<i32>,
    pub recipe_type_id: Option<i32>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<IngredientInput>>,
    pub steps: Option<Vec<StepInput>>,
    pub nutrients: Vec<NutrientInput>,
}

#[derive(Debug, Clone)]
pub struct IngredientInput {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone)]
pub struct StepInput {
    pub order: i32,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NutrientInput {
    pub nutrient_type_id: i32,
    pub quantity: f64,
}

/// Service for the recipe catalog
///
/// Generic over its ports; `?Sized` lets the HTTP layer hold it behind trait objects.
pub struct RecipeService<RR, TR, NR>
where
    RR: RecipeRepository + ?Sized,
    TR: RecipeTypeRepository + ?Sized,
    NR: NutrientTypeRepository + ?Sized,
{
    recipes: Arc<RR>,
    recipe_types: Arc<TR>,
    nutrient_types: Arc<NR>,
}

impl<RR, TR, NR> RecipeService<RR, TR, NR>
where
    RR: RecipeRepository + ?Sized,
    TR: RecipeTypeRepository + ?Sized,
    NR: NutrientTypeRepository + ?Sized,
{
    pub fn new(recipes: Arc<RR>, recipe_types: Arc<TR>, nutrient_types: Arc<NR>) -> Self {
        Self {
            recipes,
            recipe_types,
            nutrient_types,
        }
    }

    /// Validate, assemble and persist a new recipe
    ///
    /// Fails fast on the first violated precondition, checked in this order:
    /// 1. title and diner count
    /// 2. recipe type
    /// 3. ingredients
    /// 4. steps
    /// 5. nutrient types, one by one
    ///
    /// Nothing is written unless every check passes.
    pub async fn create_recipe(&self, input: CreateRecipeInput) -> Result<RecipeView, AppError> {
        let title = match input.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                return Err(DomainError::validation("title", "Title is required").into());
            }
        };
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::validation(
                "title",
                format!("Title must be at most {} characters", MAX_TITLE_LEN),
            )
            .into());
        }

        let diners = match input.diners {
            Some(d) if d > 0 => d,
            Some(d) => {
                return Err(DomainError::validation(
                    "number-diner",
                    format!("number-diner must be a positive integer, got {}", d),
                )
                .into());
            }
            None => {
                return Err(
                    DomainError::validation("number-diner", "number-diner is required").into(),
                );
            }
        };

        let type_id = input.recipe_type_id.ok_or_else(|| {
            DomainError::validation("type-id", "Recipe type ID is required")
        })?;
        let recipe_type = self
            .recipe_types
            .find_by_id(&RecipeTypeId(type_id))
            .await?
            .ok_or_else(|| {
                DomainError::validation("type-id", format!("Invalid recipe type ID {}", type_id))
            })?;

        let ingredients = match input.ingredients {
            Some(list) if !list.is_empty() => list
                .into_iter()
                .map(validate_ingredient)
                .collect::<Result<Vec<_>, _>>()?,
            _ => {
                return Err(DomainError::validation(
                    "ingredients",
                    "At least one ingredient is required",
                )
                .into());
            }
        };

        let steps = match input.steps {
            Some(list) if !list.is_empty() => list
                .into_iter()
                .map(validate_step)
                .collect::<Result<Vec<_>, _>>()?,
            _ => {
                return Err(
                    DomainError::validation("steps", "At least one step is required").into(),
                );
            }
        };

        let mut nutrients = Vec::with_capacity(input.nutrients.len());
        for entry in input.nutrients {
            let nutrient_type = self
                .nutrient_types
                .find_by_id(&NutrientTypeId(entry.nutrient_type_id))
                .await?
                .ok_or_else(|| {
                    DomainError::validation(
                        "nutrients",
                        format!("Nutrient type ID {} not found", entry.nutrient_type_id),
                    )
                })?;

            if !entry.quantity.is_finite() {
                return Err(DomainError::validation(
                    "nutrients",
                    format!("Quantity for nutrient type {} must be a number", nutrient_type.id),
                )
                .into());
            }

            nutrients.push(RecipeNutrient {
                nutrient_type,
                quantity: entry.quantity,
            });
        }

        let new_recipe = NewRecipe {
            title,
            diners,
            description: input.description,
            recipe_type,
            ingredients,
            steps,
            nutrients,
        };

        let recipe = self.recipes.create(&new_recipe).await?;

        tracing::info!(
            recipe_id = %recipe.id,
            ingredients = recipe.ingredients.len(),
            steps = recipe.steps.len(),
            nutrients = recipe.nutrients.len(),
            "Recipe created"
        );

        Ok(Self::serialize(&recipe))
    }

    /// Record a vote for a recipe from `source_ip`
    ///
    /// Checks, in order: the recipe is active, the score is in range, the IP has not
    /// voted yet. The repository enforces the first and last rules again atomically, so
    /// two racing requests from one IP cannot both succeed and a vote racing a delete is
    /// not stored.
    pub async fn rate(
        &self,
        id: &RecipeId,
        score: i32,
        source_ip: &str,
    ) -> Result<RecipeView, AppError> {
        let recipe = self.find_active(id).await?;

        let score = Score::new(score)?;

        if source_ip.is_empty() || source_ip.len() > MAX_SOURCE_IP_LEN {
            return Err(DomainError::validation(
                "source-ip",
                format!("Invalid client address: {:?}", source_ip),
            )
            .into());
        }

        if recipe.has_vote_from(source_ip) {
            tracing::debug!(recipe_id = %id, source_ip, "Rejected duplicate vote");
            return Err(duplicate_vote(id, source_ip).into());
        }

        let rating = NewRating {
            score,
            source_ip: source_ip.to_string(),
        };
        self.recipes.add_rating(id, &rating).await?;

        tracing::info!(recipe_id = %id, score = score.value(), "Vote recorded");

        let recipe = self.find_active(id).await?;
        Ok(Self::serialize(&recipe))
    }

    /// List active recipes, optionally only those of one recipe type
    pub async fn list(&self, recipe_type: Option<RecipeTypeId>) -> Result<Vec<RecipeView>, AppError> {
        let recipes = self.recipes.find_active(recipe_type.as_ref()).await?;
        Ok(recipes.iter().map(Self::serialize).collect())
    }

    /// Get an active recipe
    pub async fn get(&self, id: &RecipeId) -> Result<RecipeView, AppError> {
        let recipe = self.find_active(id).await?;
        Ok(Self::serialize(&recipe))
    }

    /// Soft-delete an active recipe
    ///
    /// Deleting twice is an error: the second call reports the recipe as not found.
    pub async fn delete(&self, id: &RecipeId) -> Result<RecipeView, AppError> {
        let mut recipe = self.find_active(id).await?;

        let now = Utc::now();
        if !self.recipes.soft_delete(id, now).await? {
            // Lost a race with another delete
            return Err(not_found(id).into());
        }
        recipe.deleted_at = Some(now);

        tracing::info!(recipe_id = %id, "Recipe deleted");

        Ok(Self::serialize(&recipe))
    }

    /// Build the output representation. Performs no I/O.
    pub fn serialize(recipe: &Recipe) -> RecipeView {
        RecipeView::from(recipe)
    }

    /// All recipe types
    pub async fn recipe_types(&self) -> Result<Vec<RecipeTypeView>, AppError> {
        let types = self.recipe_types.find_all().await?;
        Ok(types.iter().map(RecipeTypeView::from).collect())
    }

    /// All nutrient types
    pub async fn nutrient_types(&self) -> Result<Vec<NutrientTypeView>, AppError> {
        let types = self.nutrient_types.find_all().await?;
        Ok(types.iter().map(NutrientTypeView::from).collect())
    }

    async fn find_active(&self, id: &RecipeId) -> Result<Recipe, DomainError> {
        match self.recipes.find_by_id(id).await? {
            Some(recipe) if !recipe.is_deleted() => Ok(recipe),
            _ => Err(not_found(id)),
        }
    }
}

fn not_found(id: &RecipeId) -> DomainError {
    DomainError::NotFound(format!("Recipe {} not found", id))
}

fn duplicate_vote(id: &RecipeId, source_ip: &str) -> DomainError {
    DomainError::Conflict(format!(
        "Recipe {} already has a vote from {}",
        id, source_ip
    ))
}

fn validate_ingredient(input: IngredientInput) -> Result<Ingredient, DomainError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(DomainError::validation(
            "ingredients",
            "Ingredient name must not be empty",
        ));
    }
    if name.chars().count() > MAX_INGREDIENT_NAME_LEN {
        return Err(DomainError::validation(
            "ingredients",
            format!(
                "Ingredient name must be at most {} characters",
                MAX_INGREDIENT_NAME_LEN
            ),
        ));
    }
    if !input.quantity.is_finite() {
        return Err(DomainError::validation(
            "ingredients",
            format!("Quantity for ingredient '{}' must be a number", name),
        ));
    }

    let unit = input.unit.trim();
    if unit.chars().count() > MAX_UNIT_LEN {
        return Err(DomainError::validation(
            "ingredients",
            format!(
                "Unit for ingredient '{}' must be at most {} characters",
                name, MAX_UNIT_LEN
            ),
        ));
    }

    Ok(Ingredient {
        name: name.to_string(),
        quantity: input.quantity,
        unit: unit.to_string(),
    })
}

fn validate_step(input: StepInput) -> Result<Step, DomainError> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(DomainError::validation(
            "steps",
            format!("Description for step {} must not be empty", input.order),
        ));
    }

    Ok(Step {
        order: input.order,
        description: description.to_string(),
    })
}
