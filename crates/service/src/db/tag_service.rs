use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, QueryOrder, QuerySelect};
use models::{post_tag, tag};

use crate::blog::domain::TagWithCount;
use crate::errors::ServiceError;

#[derive(Debug, FromQueryResult)]
struct TagCountRow {
    id: i32,
    tag_name: String,
    display_name: String,
    count: i64,
}

pub async fn create_tag<C: ConnectionTrait>(db: &C, tag_name: &str, display_name: &str) -> Result<tag::Model, ServiceError> {
    Ok(tag::create(db, tag_name, display_name).await?)
}

pub async fn update_tag<C: ConnectionTrait>(db: &C, id: i32, tag_name: &str, display_name: &str) -> Result<tag::Model, ServiceError> {
    Ok(tag::update(db, id, tag_name, display_name).await?)
}

pub async fn delete_tag<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    Ok(tag::delete(db, id).await?)
}

/// All tags with the number of posts linked to each, in id order.
pub async fn tags_with_counts<C: ConnectionTrait>(db: &C) -> Result<Vec<TagWithCount>, ServiceError> {
    let rows = tag::Entity::find()
        .select_only()
        .column(tag::Column::Id)
        .column(tag::Column::TagName)
        .column(tag::Column::DisplayName)
        .column_as(Expr::col((post_tag::Entity, post_tag::Column::Id)).count(), "count")
        .left_join(post_tag::Entity)
        .group_by(tag::Column::Id)
        .group_by(tag::Column::TagName)
        .group_by(tag::Column::DisplayName)
        .order_by_asc(tag::Column::Id)
        .into_model::<TagCountRow>()
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|r| TagWithCount { id: r.id, tag_name: r.tag_name, display_name: r.display_name, count: r.count })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};

    #[tokio::test]
    async fn tag_crud_service() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };

        let t = create_tag(&db, &unique("svc-tag"), &unique("SvcTag")).await?;
        let renamed = update_tag(&db, t.id, &t.tag_name, &unique("Renamed")).await?;
        assert_ne!(renamed.display_name, t.display_name);

        let listed = tags_with_counts(&db).await?;
        let mine = listed.iter().find(|x| x.id == t.id).expect("listed");
        assert_eq!(mine.count, 0);

        assert!(delete_tag(&db, t.id).await?);
        assert!(!delete_tag(&db, t.id).await?);
        Ok(())
    }
}
