use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "menu_category")]
pub enum MenuCategory {
    #[sea_orm(string_value = "Breakfast")]
    Breakfast,
    #[sea_orm(string_value = "Lunch")]
    Lunch,
    #[sea_orm(string_value = "Dinner")]
    Dinner,
    #[sea_orm(string_value = "Drinks")]
    Drinks,
    #[sea_orm(string_value = "Desserts")]
    Desserts,
}

impl MenuCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "breakfast" => Some(MenuCategory::Breakfast),
            "lunch" => Some(MenuCategory::Lunch),
            "dinner" => Some(MenuCategory::Dinner),
            "drinks" => Some(MenuCategory::Drinks),
            "desserts" => Some(MenuCategory::Desserts),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "spice_level")]
pub enum SpiceLevel {
    #[sea_orm(string_value = "Mild")]
    Mild,
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "Hot")]
    Hot,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: MenuCategory,
    pub image: String,
    pub is_available: bool,
    pub is_veg: bool,
    pub ingredients: Json,
    pub spice_level: SpiceLevel,
    /// Derived from reviews, never set by clients.
    pub average_rating: f64,
    /// Derived from reviews, never set by clients.
    pub review_count: i32,
    pub order_count: i32,
    pub owner_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
