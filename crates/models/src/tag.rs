use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, post, post_tag, validate};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub tag_name: String,
    #[sea_orm(unique)]
    pub display_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { PostTag }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::PostTag => Entity::has_many(post_tag::Entity).into() }
    }
}

impl Related<post_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::PostTag.def() }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { post_tag::Relation::Post.def() }
    fn via() -> Option<RelationDef> { Some(post_tag::Relation::Tag.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

fn validate_names(tag_name: &str, display_name: &str) -> Result<(), ModelError> {
    validate::label("tag_name", tag_name)?;
    validate::label("display_name", display_name)
}

pub async fn create<C: ConnectionTrait>(db: &C, tag_name: &str, display_name: &str) -> Result<Model, ModelError> {
    validate_names(tag_name, display_name)?;
    let am = ActiveModel {
        id: NotSet,
        tag_name: Set(tag_name.trim().to_string()),
        display_name: Set(display_name.trim().to_string()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn update<C: ConnectionTrait>(db: &C, id: i32, tag_name: &str, display_name: &str) -> Result<Model, ModelError> {
    validate_names(tag_name, display_name)?;
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ModelError::from_db)?
        .ok_or_else(|| ModelError::NotFound("tag".into()))?
        .into();
    am.tag_name = Set(tag_name.trim().to_string());
    am.display_name = Set(display_name.trim().to_string());
    am.update(db).await.map_err(ModelError::from_db)
}

/// Returns true when a row was removed; links to posts go with it.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(ModelError::from_db)?;
    Ok(res.rows_affected > 0)
}

/// Resolve tag names to rows. Every name must exist.
pub async fn find_by_names<C: ConnectionTrait>(db: &C, names: &[String]) -> Result<Vec<Model>, ModelError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let found = Entity::find()
        .filter(Column::TagName.is_in(names.iter().cloned()))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(ModelError::from_db)?;
    if let Some(missing) = names.iter().find(|n| !found.iter().any(|t| &t.tag_name == *n)) {
        return Err(ModelError::Validation(format!("unknown tag: {missing}")));
    }
    Ok(found)
}
