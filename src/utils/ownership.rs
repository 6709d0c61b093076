//! Tenant ownership rules.
//!
//! Every menu item and booking belongs to exactly one admin account (the
//! tenant). These checks run server-side before any tenant-scoped mutation
//! or single-resource read; client-supplied owner ids are never trusted
//! for authorization.

use uuid::Uuid;

use crate::entities::booking;
use crate::entities::menu_item;
use crate::entities::user::UserRole;

/// What a caller may do with a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAccess {
    /// Tenant admin: transition, delete, full read.
    Manage,
    /// Requesting customer: read and cancel only.
    ReadCancel,
}

/// Resolve a caller's access to a booking. Rules apply in order, first
/// match wins:
/// 1. admin owning the booking's tenant -> Manage
/// 2. admin of another tenant -> denied
/// 3. the customer who placed the booking -> ReadCancel
/// 4. anyone else -> denied
pub fn booking_access(
    role: &UserRole,
    caller_id: Uuid,
    booking: &booking::Model,
) -> Option<BookingAccess> {
    match role {
        UserRole::Admin if booking.owner_id == caller_id => Some(BookingAccess::Manage),
        UserRole::Admin => None,
        UserRole::User if booking.user_id == caller_id => Some(BookingAccess::ReadCancel),
        UserRole::User => None,
    }
}

/// Only the owning tenant admin may mutate a menu item.
pub fn can_manage_menu_item(role: &UserRole, caller_id: Uuid, item: &menu_item::Model) -> bool {
    *role == UserRole::Admin && item.owner_id == caller_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::booking::BookingStatus;
    use crate::entities::menu_item::{MenuCategory, SpiceLevel};
    use chrono::{NaiveDate, Utc};

    fn booking(owner_id: Uuid, user_id: Uuid) -> booking::Model {
        booking::Model {
            id: Uuid::new_v4(),
            user_id,
            owner_id,
            menu_item_id: None,
            name: "Guest".to_string(),
            email: "guest@example.com".to_string(),
            phone: "555-0100".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
            time: "19:00".to_string(),
            guests: 2,
            special_requests: None,
            status: BookingStatus::Pending,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn menu_item(owner_id: Uuid) -> menu_item::Model {
        menu_item::Model {
            id: Uuid::new_v4(),
            name: "Pad Thai".to_string(),
            description: "Noodles".to_string(),
            price: 12.5,
            category: MenuCategory::Dinner,
            image: "pad-thai.jpg".to_string(),
            is_available: true,
            is_veg: false,
            ingredients: serde_json::json!(["noodles", "peanuts"]),
            spice_level: SpiceLevel::Medium,
            average_rating: 0.0,
            review_count: 0,
            order_count: 0,
            owner_id,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn owning_admin_gets_full_access() {
        let admin = Uuid::new_v4();
        let b = booking(admin, Uuid::new_v4());
        assert_eq!(
            booking_access(&UserRole::Admin, admin, &b),
            Some(BookingAccess::Manage)
        );
    }

    #[test]
    fn admin_of_another_tenant_is_denied() {
        let b = booking(Uuid::new_v4(), Uuid::new_v4());
        let other_admin = Uuid::new_v4();
        assert_eq!(booking_access(&UserRole::Admin, other_admin, &b), None);
    }

    #[test]
    fn admin_who_is_also_the_customer_is_still_denied_cross_tenant() {
        // Rule order matters: an admin is judged as an admin, even when
        // their own id appears as the requesting customer.
        let admin = Uuid::new_v4();
        let b = booking(Uuid::new_v4(), admin);
        assert_eq!(booking_access(&UserRole::Admin, admin, &b), None);
    }

    #[test]
    fn customer_gets_read_cancel_on_own_booking() {
        let user = Uuid::new_v4();
        let b = booking(Uuid::new_v4(), user);
        assert_eq!(
            booking_access(&UserRole::User, user, &b),
            Some(BookingAccess::ReadCancel)
        );
    }

    #[test]
    fn other_users_are_denied() {
        let b = booking(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(booking_access(&UserRole::User, Uuid::new_v4(), &b), None);
    }

    #[test]
    fn menu_mutation_requires_owning_admin() {
        let owner = Uuid::new_v4();
        let item = menu_item(owner);
        assert!(can_manage_menu_item(&UserRole::Admin, owner, &item));
        assert!(!can_manage_menu_item(&UserRole::Admin, Uuid::new_v4(), &item));
        assert!(!can_manage_menu_item(&UserRole::User, owner, &item));
    }
}
