use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, QueryOrder, QuerySelect};
use models::{category, post};

use crate::blog::domain::CategoryWithCount;
use crate::errors::ServiceError;

#[derive(Debug, FromQueryResult)]
struct CategoryCountRow {
    id: i32,
    category_name: String,
    display_name: String,
    count: i64,
}

pub async fn create_category<C: ConnectionTrait>(db: &C, category_name: &str, display_name: &str) -> Result<category::Model, ServiceError> {
    Ok(category::create(db, category_name, display_name).await?)
}

pub async fn update_category<C: ConnectionTrait>(db: &C, id: i32, category_name: &str, display_name: &str) -> Result<category::Model, ServiceError> {
    Ok(category::update(db, id, category_name, display_name).await?)
}

/// Delete a category; its posts stay and lose the reference.
pub async fn delete_category<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    Ok(category::delete(db, id).await?)
}

/// All categories with their post counts, in id order.
pub async fn categories_with_counts<C: ConnectionTrait>(db: &C) -> Result<Vec<CategoryWithCount>, ServiceError> {
    let rows = category::Entity::find()
        .select_only()
        .column(category::Column::Id)
        .column(category::Column::CategoryName)
        .column(category::Column::DisplayName)
        .column_as(Expr::col((post::Entity, post::Column::Id)).count(), "count")
        .left_join(post::Entity)
        .group_by(category::Column::Id)
        .group_by(category::Column::CategoryName)
        .group_by(category::Column::DisplayName)
        .order_by_asc(category::Column::Id)
        .into_model::<CategoryCountRow>()
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|r| CategoryWithCount { id: r.id, category_name: r.category_name, display_name: r.display_name, count: r.count })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};

    #[tokio::test]
    async fn category_crud_service() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };

        let c = create_category(&db, &unique("svc-cat"), &unique("SvcCat")).await?;
        let listed = categories_with_counts(&db).await?;
        assert_eq!(listed.iter().find(|x| x.id == c.id).map(|x| x.count), Some(0));

        let dup = create_category(&db, &c.category_name, &unique("Other")).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        let updated = update_category(&db, c.id, &unique("svc-cat2"), &c.display_name).await?;
        assert_ne!(updated.category_name, c.category_name);

        assert!(delete_category(&db, c.id).await?);
        Ok(())
    }
}
