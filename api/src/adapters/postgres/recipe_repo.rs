//! PostgreSQL adapter for RecipeRepository
//!
//! A recipe spans seven tables. Reads load the recipe rows first and then each child
//! table with one `IN` query, so listing costs a fixed number of round trips.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use super::schema::RATING_UNIQUE_INDEX;
use crate::domain::entities::{
    Ingredient, NewRating, NewRecipe, NutrientType, Rating, Recipe, RecipeId, RecipeNutrient,
    RecipeType, RecipeTypeId, Score, Step,
};
use crate::domain::ports::RecipeRepository;
use crate::entity::{
    ingredients, nutrient_types, ratings, recipe_nutrients, recipe_types, recipes, steps,
};
use crate::error::DomainError;

/// PostgreSQL implementation of RecipeRepository
pub struct PostgresRecipeRepository {
    db: DatabaseConnection,
}

impl PostgresRecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, DomainError> {
        let result = recipes::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match result {
            Some(model) => Ok(load_recipes(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_active(
        &self,
        recipe_type: Option<&RecipeTypeId>,
    ) -> Result<Vec<Recipe>, DomainError> {
        let mut query = recipes::Entity::find().filter(recipes::Column::DeletedAt.is_null());
        if let Some(type_id) = recipe_type {
            query = query.filter(recipes::Column::RecipeTypeId.eq(type_id.0));
        }

        let models = query
            .order_by_asc(recipes::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        load_recipes(&self.db, models).await
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, DomainError> {
        let now = Utc::now().fixed_offset();

        // Dropping the transaction without commit rolls it back, so any `?` below
        // leaves no partial recipe behind.
        let txn = self.db.begin().await.map_err(db_err)?;

        let created = recipes::ActiveModel {
            title: Set(recipe.title.clone()),
            diners: Set(recipe.diners),
            description: Set(recipe.description.clone()),
            recipe_type_id: Set(recipe.recipe_type.id.0),
            created_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        ingredients::Entity::insert_many(recipe.ingredients.iter().enumerate().map(
            |(position, ingredient)| ingredients::ActiveModel {
                recipe_id: Set(created.id),
                position: Set(position as i32),
                name: Set(ingredient.name.clone()),
                quantity: Set(ingredient.quantity),
                unit: Set(ingredient.unit.clone()),
                ..Default::default()
            },
        ))
        .exec(&txn)
        .await
        .map_err(db_err)?;

        steps::Entity::insert_many(recipe.steps.iter().enumerate().map(|(position, step)| {
            steps::ActiveModel {
                recipe_id: Set(created.id),
                position: Set(position as i32),
                step_order: Set(step.order),
                description: Set(step.description.clone()),
                ..Default::default()
            }
        }))
        .exec(&txn)
        .await
        .map_err(db_err)?;

        if !recipe.nutrients.is_empty() {
            recipe_nutrients::Entity::insert_many(recipe.nutrients.iter().enumerate().map(
                |(position, nutrient)| recipe_nutrients::ActiveModel {
                    recipe_id: Set(created.id),
                    nutrient_type_id: Set(nutrient.nutrient_type.id.0),
                    position: Set(position as i32),
                    quantity: Set(nutrient.quantity),
                    ..Default::default()
                },
            ))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        self.find_by_id(&RecipeId(created.id)).await?.ok_or_else(|| {
            DomainError::Internal(format!("Recipe {} vanished after commit", created.id))
        })
    }

    async fn add_rating(&self, id: &RecipeId, rating: &NewRating) -> Result<Rating, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // Row lock on the active recipe: a concurrent soft delete waits for this
        // transaction, or makes the lookup come back empty.
        let active = recipes::Entity::find_by_id(id.0)
            .filter(recipes::Column::DeletedAt.is_null())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_err)?;
        if active.is_none() {
            return Err(DomainError::NotFound(format!("Recipe {} not found", id)));
        }

        let model = ratings::ActiveModel {
            recipe_id: Set(id.0),
            score: Set(rating.score.value()),
            source_ip: Set(rating.source_ip.clone()),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains(RATING_UNIQUE_INDEX) => {
                DomainError::Conflict(format!(
                    "Recipe {} already has a vote from {}",
                    id, rating.source_ip
                ))
            }
            _ => db_err(e),
        })?;

        txn.commit().await.map_err(db_err)?;

        rating_from_model(model)
    }

    async fn soft_delete(&self, id: &RecipeId, at: DateTime<Utc>) -> Result<bool, DomainError> {
        // Conditional update: of two racing deletes only one sees an active row
        let result = recipes::Entity::update_many()
            .col_expr(recipes::Column::DeletedAt, Expr::value(at.fixed_offset()))
            .filter(recipes::Column::Id.eq(id.0))
            .filter(recipes::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected == 1)
    }
}

/// Assemble full aggregates for the given recipe rows, preserving their order
async fn load_recipes<C>(db: &C, models: Vec<recipes::Model>) -> Result<Vec<Recipe>, DomainError>
where
    C: ConnectionTrait,
{
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let type_ids: Vec<i32> = models.iter().map(|m| m.recipe_type_id).collect();

    let types: HashMap<i32, RecipeType> = recipe_types::Entity::find()
        .filter(recipe_types::Column::Id.is_in(type_ids))
        .all(db)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|m| (m.id, m.into()))
        .collect();

    let mut ingredients_by_recipe: HashMap<i32, Vec<Ingredient>> = HashMap::new();
    for m in ingredients::Entity::find()
        .filter(ingredients::Column::RecipeId.is_in(ids.clone()))
        .order_by_asc(ingredients::Column::RecipeId)
        .order_by_asc(ingredients::Column::Position)
        .all(db)
        .await
        .map_err(db_err)?
    {
        ingredients_by_recipe
            .entry(m.recipe_id)
            .or_default()
            .push(m.into());
    }

    let mut steps_by_recipe: HashMap<i32, Vec<Step>> = HashMap::new();
    for m in steps::Entity::find()
        .filter(steps::Column::RecipeId.is_in(ids.clone()))
        .order_by_asc(steps::Column::RecipeId)
        .order_by_asc(steps::Column::Position)
        .all(db)
        .await
        .map_err(db_err)?
    {
        steps_by_recipe.entry(m.recipe_id).or_default().push(m.into());
    }

    let mut nutrients_by_recipe: HashMap<i32, Vec<RecipeNutrient>> = HashMap::new();
    for (m, nutrient_type) in recipe_nutrients::Entity::find()
        .find_also_related(nutrient_types::Entity)
        .filter(recipe_nutrients::Column::RecipeId.is_in(ids.clone()))
        .order_by_asc(recipe_nutrients::Column::RecipeId)
        .order_by_asc(recipe_nutrients::Column::Position)
        .all(db)
        .await
        .map_err(db_err)?
    {
        let nutrient_type: NutrientType = nutrient_type
            .ok_or_else(|| {
                DomainError::Database(format!(
                    "Recipe nutrient {} references missing nutrient type {}",
                    m.id, m.nutrient_type_id
                ))
            })?
            .into();

        nutrients_by_recipe
            .entry(m.recipe_id)
            .or_default()
            .push(RecipeNutrient {
                nutrient_type,
                quantity: m.quantity,
            });
    }

    let mut ratings_by_recipe: HashMap<i32, Vec<Rating>> = HashMap::new();
    for m in ratings::Entity::find()
        .filter(ratings::Column::RecipeId.is_in(ids))
        .order_by_asc(ratings::Column::Id)
        .all(db)
        .await
        .map_err(db_err)?
    {
        let recipe_id = m.recipe_id;
        ratings_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(rating_from_model(m)?);
    }

    models
        .into_iter()
        .map(|m| {
            let recipe_type = types.get(&m.recipe_type_id).cloned().ok_or_else(|| {
                DomainError::Database(format!(
                    "Recipe {} references missing recipe type {}",
                    m.id, m.recipe_type_id
                ))
            })?;

            Ok(Recipe {
                id: RecipeId(m.id),
                title: m.title,
                diners: m.diners,
                description: m.description,
                recipe_type,
                ingredients: ingredients_by_recipe.remove(&m.id).unwrap_or_default(),
                steps: steps_by_recipe.remove(&m.id).unwrap_or_default(),
                nutrients: nutrients_by_recipe.remove(&m.id).unwrap_or_default(),
                ratings: ratings_by_recipe.remove(&m.id).unwrap_or_default(),
                created_at: m.created_at.with_timezone(&Utc),
                deleted_at: m.deleted_at.map(|dt| dt.with_timezone(&Utc)),
            })
        })
        .collect()
}

/// Stored scores are range-checked by the table, a bad one means the row was edited by hand
fn rating_from_model(model: ratings::Model) -> Result<Rating, DomainError> {
    let score = Score::new(model.score).map_err(|_| {
        DomainError::Database(format!(
            "Rating {} has out of range score {}",
            model.id, model.score
        ))
    })?;

    Ok(Rating {
        score,
        source_ip: model.source_ip,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

/// Convert SeaORM model to domain entity
impl From<ingredients::Model> for Ingredient {
    fn from(model: ingredients::Model) -> Self {
        Ingredient {
            name: model.name,
            quantity: model.quantity,
            unit: model.unit,
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<steps::Model> for Step {
    fn from(model: steps::Model) -> Self {
        Step {
            order: model.step_order,
            description: model.description,
        }
    }
}
