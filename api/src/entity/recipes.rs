use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub diners: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub recipe_type_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recipe_types::Entity",
        from = "Column::RecipeTypeId",
        to = "super::recipe_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    RecipeTypes,
    #[sea_orm(has_many = "super::ingredients::Entity")]
    Ingredients,
    #[sea_orm(has_many = "super::steps::Entity")]
    Steps,
    #[sea_orm(has_many = "super::recipe_nutrients::Entity")]
    RecipeNutrients,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
}

impl Related<super::recipe_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeTypes.def()
    }
}

impl Related<super::ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl Related<super::steps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Steps.def()
    }
}

impl Related<super::recipe_nutrients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeNutrients.def()
    }
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
