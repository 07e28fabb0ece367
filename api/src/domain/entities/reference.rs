//! Reference data
//!
//! Lookup records a recipe points at by id. The service never creates or edits them.

/// Unique identifier for a recipe type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeTypeId(pub i32);

impl std::fmt::Display for RecipeTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a nutrient type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NutrientTypeId(pub i32);

impl std::fmt::Display for NutrientTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recipe category (starter, main course, dessert...)
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeType {
    pub id: RecipeTypeId,
    pub name: String,
    pub description: Option<String>,
}

/// Nutrient a recipe can declare a quantity of (protein in g, energy in kcal...)
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientType {
    pub id: NutrientTypeId,
    pub name: String,
    pub unit: String,
}
