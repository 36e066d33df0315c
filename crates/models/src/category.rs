use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, post, validate};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub category_name: String,
    #[sea_orm(unique)]
    pub display_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Post }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Post => Entity::has_many(post::Entity).into() }
    }
}

impl Related<post::Entity> for Entity {
    fn to() -> RelationDef { Relation::Post.def() }
}

impl ActiveModelBehavior for ActiveModel {}

fn validate_names(category_name: &str, display_name: &str) -> Result<(), ModelError> {
    validate::label("category_name", category_name)?;
    validate::label("display_name", display_name)
}

pub async fn create<C: ConnectionTrait>(db: &C, category_name: &str, display_name: &str) -> Result<Model, ModelError> {
    validate_names(category_name, display_name)?;
    let am = ActiveModel {
        id: NotSet,
        category_name: Set(category_name.trim().to_string()),
        display_name: Set(display_name.trim().to_string()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn update<C: ConnectionTrait>(db: &C, id: i32, category_name: &str, display_name: &str) -> Result<Model, ModelError> {
    validate_names(category_name, display_name)?;
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ModelError::from_db)?
        .ok_or_else(|| ModelError::NotFound("category".into()))?
        .into();
    am.category_name = Set(category_name.trim().to_string());
    am.display_name = Set(display_name.trim().to_string());
    am.update(db).await.map_err(ModelError::from_db)
}

/// Returns true when a row was removed; posts in the category keep existing without one.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(ModelError::from_db)?;
    Ok(res.rows_affected > 0)
}
