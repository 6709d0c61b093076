use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::{menu_item, review};
use crate::error::AppResult;

/// Mean rating and count over a review set. Empty input resets to (0, 0).
pub fn summarize(ratings: &[i32]) -> (f64, i32) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let sum: i32 = ratings.iter().sum();
    (f64::from(sum) / ratings.len() as f64, ratings.len() as i32)
}

/// Recompute a menu item's derived rating fields from its current reviews.
///
/// Idempotent; invoked after every review create, rating update, and
/// delete. Concurrent recomputations are last-write-wins, which is fine
/// for a display statistic.
pub async fn recompute_menu_rating(
    db: &DatabaseConnection,
    menu_item_id: Uuid,
) -> AppResult<()> {
    let ratings: Vec<i32> = review::Entity::find()
        .filter(review::Column::MenuItemId.eq(menu_item_id))
        .all(db)
        .await?
        .iter()
        .map(|r| r.rating)
        .collect();

    let (average, count) = summarize(&ratings);

    // The menu item may have been deleted concurrently; nothing to update then.
    let Some(item) = menu_item::Entity::find_by_id(menu_item_id).one(db).await? else {
        return Ok(());
    };

    let mut active: menu_item::ActiveModel = item.into();
    active.average_rating = Set(average);
    active.review_count = Set(count);
    active.update(db).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_over_current_ratings() {
        let (avg, count) = summarize(&[4, 5]);
        assert_eq!(avg, 4.5);
        assert_eq!(count, 2);
    }

    #[test]
    fn single_rating() {
        assert_eq!(summarize(&[3]), (3.0, 1));
    }

    #[test]
    fn empty_resets_to_zero() {
        assert_eq!(summarize(&[]), (0.0, 0));
    }
}
