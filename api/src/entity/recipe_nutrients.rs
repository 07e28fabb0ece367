use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipe_nutrients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub recipe_id: i32,
    pub nutrient_type_id: i32,
    pub position: i32,
    #[sea_orm(column_type = "Double")]
    pub quantity: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recipes::Entity",
        from = "Column::RecipeId",
        to = "super::recipes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Recipes,
    #[sea_orm(
        belongs_to = "super::nutrient_types::Entity",
        from = "Column::NutrientTypeId",
        to = "super::nutrient_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    NutrientTypes,
}

impl Related<super::recipes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipes.def()
    }
}

impl Related<super::nutrient_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NutrientTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
