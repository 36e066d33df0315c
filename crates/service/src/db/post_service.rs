use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};
use models::post::PostFields;
use models::{category, post, post_tag, tag};
use crate::blog::domain::PostAggregate;
use crate::errors::ServiceError;

/// Newest first; id breaks ties so paging is stable.
fn newest_first(select: Select<post::Entity>) -> Select<post::Entity> {
    select
        .order_by_desc(post::Column::CreationTime)
        .order_by_desc(post::Column::Id)
}

/// Insert a post and link the named tags. Unknown tag names fail the whole call.
pub async fn create_post<C: ConnectionTrait>(db: &C, fields: PostFields, tag_names: Option<&[String]>) -> Result<post::Model, ServiceError> {
    let created = post::create(db, fields).await?;
    if let Some(names) = tag_names {
        let tags = tag::find_by_names(db, names).await?;
        let ids: Vec<i32> = tags.iter().map(|t| t.id).collect();
        post_tag::link(db, created.id, &ids).await?;
    }
    Ok(created)
}

/// Overwrite a post; `Some` tag names replace its links, `None` keeps them.
pub async fn update_post<C: ConnectionTrait>(db: &C, id: i32, fields: PostFields, tag_names: Option<&[String]>) -> Result<post::Model, ServiceError> {
    let updated = post::update(db, id, fields).await?;
    if let Some(names) = tag_names {
        let tags = tag::find_by_names(db, names).await?;
        let ids: Vec<i32> = tags.iter().map(|t| t.id).collect();
        post_tag::replace(db, id, &ids).await?;
    }
    Ok(updated)
}

/// Delete a post; returns true if deleted. Tag links cascade.
pub async fn delete_post<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ServiceError> {
    Ok(post::delete(db, id).await?)
}

/// Tags of a post in tag id order.
pub async fn tags_of_post<C: ConnectionTrait>(db: &C, post_id: i32) -> Result<Vec<tag::Model>, ServiceError> {
    let rows = tag::Entity::find()
        .inner_join(post_tag::Entity)
        .filter(post_tag::Column::PostId.eq(post_id))
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Nearest post strictly newer than `current`.
pub async fn previous_post<C: ConnectionTrait>(db: &C, current: &post::Model) -> Result<Option<post::Model>, ServiceError> {
    let row = post::Entity::find()
        .filter(post::Column::CreationTime.gt(current.creation_time))
        .order_by_asc(post::Column::CreationTime)
        .order_by_asc(post::Column::Id)
        .one(db)
        .await?;
    Ok(row)
}

/// Nearest post strictly older than `current`.
pub async fn next_post<C: ConnectionTrait>(db: &C, current: &post::Model) -> Result<Option<post::Model>, ServiceError> {
    let row = newest_first(post::Entity::find().filter(post::Column::CreationTime.lt(current.creation_time)))
        .one(db)
        .await?;
    Ok(row)
}

/// Post by url with its category, tags and neighbours.
pub async fn load_post<C: ConnectionTrait>(db: &C, url: &str) -> Result<Option<PostAggregate>, ServiceError> {
    let Some(post) = post::find_by_url(db, url).await? else { return Ok(None) };
    let category = match post.category_id {
        Some(cid) => category::Entity::find_by_id(cid).one(db).await?,
        None => None,
    };
    let tags = tags_of_post(db, post.id).await?;
    let previous = previous_post(db, &post).await?;
    let next = next_post(db, &post).await?;
    Ok(Some(PostAggregate { post, category, tags, previous, next }))
}

/// Total count and one zero-based page, newest first.
pub async fn page_posts<C: ConnectionTrait>(db: &C, page_idx: u64, per_page: u64) -> Result<(u64, Vec<post::Model>), ServiceError> {
    let paginator = newest_first(post::Entity::find()).paginate(db, per_page);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page_idx).await?;
    Ok((total, rows))
}

/// Posts carrying the tag whose display name matches exactly, newest first.
pub async fn posts_by_tag<C: ConnectionTrait>(db: &C, display_name: &str) -> Result<Vec<post::Model>, ServiceError> {
    let rows = newest_first(
        post::Entity::find()
            .inner_join(post_tag::Entity)
            .join(JoinType::InnerJoin, post_tag::Relation::Tag.def())
            .filter(tag::Column::DisplayName.eq(display_name)),
    )
    .all(db)
    .await?;
    Ok(rows)
}

/// Posts in the category whose display name matches exactly, newest first.
pub async fn posts_by_category<C: ConnectionTrait>(db: &C, display_name: &str) -> Result<Vec<post::Model>, ServiceError> {
    let rows = newest_first(
        post::Entity::find()
            .inner_join(category::Entity)
            .filter(category::Column::DisplayName.eq(display_name)),
    )
    .all(db)
    .await?;
    Ok(rows)
}

pub async fn all_posts<C: ConnectionTrait>(db: &C) -> Result<Vec<post::Model>, ServiceError> {
    Ok(newest_first(post::Entity::find()).all(db).await?)
}
