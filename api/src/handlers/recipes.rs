//! Recipe handlers
//!
//! Endpoints for creating, listing, rating and deleting recipes.

use std::net::SocketAddr;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        ConnectInfo, Path, Query, State,
    },
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::app::{CreateRecipeInput, IngredientInput, NutrientInput, RecipeView, StepInput};
use crate::domain::entities::{RecipeId, RecipeTypeId};
use crate::error::{AppError, DomainError};
use crate::AppState;

/// Query parameters for listing recipes
#[derive(Debug, Deserialize)]
pub struct ListRecipesQuery {
    /// Only recipes of this recipe type. Empty means no filter.
    #[serde(rename = "type")]
    pub recipe_type: Option<String>,
}

impl ListRecipesQuery {
    fn recipe_type(&self) -> Result<Option<RecipeTypeId>, AppError> {
        match self.recipe_type.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_param("type", raw).map(|id| Some(RecipeTypeId(id))),
        }
    }
}

/// Request to create a recipe
///
/// Required fields are optional here so the service can report which one is missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub number_diner: Option<i32>,
    pub type_id: Option<i32>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<IngredientRequest>>,
    pub steps: Option<Vec<StepRequest>>,
    #[serde(default)]
    pub nutrients: Vec<NutrientRequest>,
}

#[derive(Debug, Deserialize)]
pub struct IngredientRequest {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub order: i32,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NutrientRequest {
    pub type_id: i32,
    pub quantity: f64,
}

impl From<CreateRecipeRequest> for CreateRecipeInput {
    fn from(req: CreateRecipeRequest) -> Self {
        CreateRecipeInput {
            title: req.title,
            diners: req.number_diner,
            recipe_type_id: req.type_id,
            description: req.description,
            ingredients: req.ingredients.map(|list| {
                list.into_iter()
                    .map(|i| IngredientInput {
                        name: i.name,
                        quantity: i.quantity,
                        unit: i.unit,
                    })
                    .collect()
            }),
            steps: req.steps.map(|list| {
                list.into_iter()
                    .map(|s| StepInput {
                        order: s.order,
                        description: s.description,
                    })
                    .collect()
            }),
            nutrients: req
                .nutrients
                .into_iter()
                .map(|n| NutrientInput {
                    nutrient_type_id: n.type_id,
                    quantity: n.quantity,
                })
                .collect(),
        }
    }
}

/// GET /recipes
///
/// List active recipes, optionally filtered with `?type=<recipe type id>`.
pub async fn list_recipes(
    State(state): State<AppState>,
    query: Result<Query<ListRecipesQuery>, QueryRejection>,
) -> Result<Json<Vec<RecipeView>>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        AppError::Domain(DomainError::validation("query", rejection.body_text()))
    })?;

    let recipes = state.recipe_service.list(query.recipe_type()?).await?;

    Ok(Json(recipes))
}

/// POST /recipes
///
/// Create a recipe with its ingredients, steps and nutrients. Answers 200 with the
/// full recipe, like every other recipe endpoint.
pub async fn create_recipe(
    State(state): State<AppState>,
    body: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeView>, AppError> {
    let Json(req) = body.map_err(|rejection| {
        AppError::Domain(DomainError::validation("body", rejection.body_text()))
    })?;

    let recipe = state.recipe_service.create_recipe(req.into()).await?;

    Ok(Json(recipe))
}

/// GET /recipes/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeView>, AppError> {
    let id = RecipeId(parse_param("id", &id)?);
    let recipe = state.recipe_service.get(&id).await?;
    Ok(Json(recipe))
}

/// DELETE /recipes/:id
///
/// Soft-delete a recipe. Returns the recipe as it was deleted.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeView>, AppError> {
    let id = RecipeId(parse_param("id", &id)?);
    let recipe = state.recipe_service.delete(&id).await?;
    Ok(Json(recipe))
}

/// POST /recipes/:id/rating/:rate
///
/// Vote on a recipe. One vote per client IP per recipe.
pub async fn rate_recipe(
    State(state): State<AppState>,
    Path((id, rate)): Path<(String, String)>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<RecipeView>, AppError> {
    let id = RecipeId(parse_param("id", &id)?);
    let rate = parse_param("rate", &rate)?;

    let source_ip = client_ip(
        &headers,
        peer.map(|ConnectInfo(addr)| addr),
        state.config.trust_forwarded_for,
    )?;

    let recipe = state
        .recipe_service
        .rate(&id, rate, &source_ip)
        .await?;

    Ok(Json(recipe))
}

/// Parse an integer path or query parameter, reporting failures against `field`
fn parse_param(field: &str, raw: &str) -> Result<i32, AppError> {
    raw.trim().parse().map_err(|_| {
        AppError::Domain(DomainError::validation(
            field,
            format!("{} must be an integer, got {:?}", field, raw),
        ))
    })
}

/// Resolve the voter address
///
/// With `trust_forwarded_for` the first `X-Forwarded-For` entry wins, falling back to
/// the socket peer when the header is absent.
fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> Result<String, AppError> {
    if trust_forwarded_for {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return Ok(ip.to_string());
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .ok_or_else(|| AppError::BadRequest("Unable to determine client address".to_string()))
}
