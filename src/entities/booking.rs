use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl BookingStatus {
    /// Parse a status string, tolerating any casing from clients.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "PENDING" => Some(BookingStatus::Pending),
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "REJECTED" => Some(BookingStatus::Rejected),
            _ => None,
        }
    }

    /// CONFIRMED and REJECTED are terminal; nothing moves out of them.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Rejected)
    }

    /// The only permitted transitions are PENDING -> CONFIRMED and
    /// PENDING -> REJECTED.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        self == BookingStatus::Pending
            && matches!(next, BookingStatus::Confirmed | BookingStatus::Rejected)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub owner_id: Uuid,
    pub menu_item_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: Date,
    pub time: String,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::menu_item::Entity",
        from = "Column::MenuItemId",
        to = "super::menu_item::Column::Id"
    )]
    MenuItem,
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_move_to_confirmed_or_rejected() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Rejected));
    }

    #[test]
    fn pending_cannot_move_to_pending() {
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn terminal_states_never_transition() {
        for from in [BookingStatus::Confirmed, BookingStatus::Rejected] {
            assert!(from.is_terminal());
            for to in [
                BookingStatus::Pending,
                BookingStatus::Confirmed,
                BookingStatus::Rejected,
            ] {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(BookingStatus::parse("confirmed"), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::parse("PENDING"), Some(BookingStatus::Pending));
        assert_eq!(BookingStatus::parse("Rejected"), Some(BookingStatus::Rejected));
        assert_eq!(BookingStatus::parse("cancelled"), None);
    }
}
