//! PostgreSQL adapters for the reference data repositories

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::entities::{NutrientType, NutrientTypeId, RecipeType, RecipeTypeId};
use crate::domain::ports::{NutrientTypeRepository, RecipeTypeRepository};
use crate::entity::{nutrient_types, recipe_types};
use crate::error::DomainError;

/// PostgreSQL implementation of RecipeTypeRepository
pub struct PostgresRecipeTypeRepository {
    db: DatabaseConnection,
}

impl PostgresRecipeTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeTypeRepository for PostgresRecipeTypeRepository {
    async fn find_by_id(&self, id: &RecipeTypeId) -> Result<Option<RecipeType>, DomainError> {
        let result = recipe_types::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<RecipeType>, DomainError> {
        let results = recipe_types::Entity::find()
            .order_by_asc(recipe_types::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// PostgreSQL implementation of NutrientTypeRepository
pub struct PostgresNutrientTypeRepository {
    db: DatabaseConnection,
}

impl PostgresNutrientTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NutrientTypeRepository for PostgresNutrientTypeRepository {
    async fn find_by_id(&self, id: &NutrientTypeId) -> Result<Option<NutrientType>, DomainError> {
        let result = nutrient_types::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<NutrientType>, DomainError> {
        let results = nutrient_types::Entity::find()
            .order_by_asc(nutrient_types::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<recipe_types::Model> for RecipeType {
    fn from(model: recipe_types::Model) -> Self {
        RecipeType {
            id: RecipeTypeId(model.id),
            name: model.name,
            description: model.description,
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<nutrient_types::Model> for NutrientType {
    fn from(model: nutrient_types::Model) -> Self {
        NutrientType {
            id: NutrientTypeId(model.id),
            name: model.name,
            unit: model.unit,
        }
    }
}
