use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "nutrient_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub unit: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipe_nutrients::Entity")]
    RecipeNutrients,
}

impl Related<super::recipe_nutrients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeNutrients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
