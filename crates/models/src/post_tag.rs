use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, post, tag};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub post_id: i32,
    pub tag_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Post, Tag }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Post => Entity::belongs_to(post::Entity).from(Column::PostId).to(post::Column::Id).into(),
            Relation::Tag => Entity::belongs_to(tag::Entity).from(Column::TagId).to(tag::Column::Id).into(),
        }
    }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Post.def() }
}

impl Related<tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tag.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Attach tags to a post. Callers ensure the ids are not linked yet.
pub async fn link<C: ConnectionTrait>(db: &C, post_id: i32, tag_ids: &[i32]) -> Result<(), ModelError> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let rows = tag_ids.iter().map(|&tag_id| ActiveModel { id: NotSet, post_id: Set(post_id), tag_id: Set(tag_id) });
    Entity::insert_many(rows).exec(db).await.map_err(ModelError::from_db)?;
    Ok(())
}

pub async fn unlink_all<C: ConnectionTrait>(db: &C, post_id: i32) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::PostId.eq(post_id))
        .exec(db)
        .await
        .map_err(ModelError::from_db)?;
    Ok(res.rows_affected)
}

/// Make the post's tag set exactly `tag_ids`.
pub async fn replace<C: ConnectionTrait>(db: &C, post_id: i32, tag_ids: &[i32]) -> Result<(), ModelError> {
    unlink_all(db, post_id).await?;
    link(db, post_id, tag_ids).await
}
