use sea_orm::{entity::prelude::*, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{category, errors::ModelError, post_tag, tag, validate};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    #[sea_orm(unique)]
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub creation_time: DateTimeWithTimeZone,
    pub category_id: Option<i32>,
    /// Offset `creation_time` was written with; the column itself comes back as UTC.
    pub utc_offset_secs: i32,
}

impl Model {
    /// `creation_time` in the offset it was written with.
    pub fn local_creation_time(&self) -> DateTimeWithTimeZone {
        match chrono::FixedOffset::east_opt(self.utc_offset_secs) {
            Some(offset) => self.creation_time.with_timezone(&offset),
            None => self.creation_time,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category, PostTag }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::PostTag => Entity::has_many(post_tag::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<post_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::PostTag.def() }
}

impl Related<tag::Entity> for Entity {
    fn to() -> RelationDef { post_tag::Relation::Tag.def() }
    fn via() -> Option<RelationDef> { Some(post_tag::Relation::Post.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Writable columns of a post.
#[derive(Clone, Debug)]
pub struct PostFields {
    pub title: String,
    pub author: String,
    pub url: String,
    pub content: String,
    pub creation_time: DateTimeWithTimeZone,
    pub category_id: Option<i32>,
}

impl PostFields {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::bounded("title", &self.title, validate::MAX_TITLE_LEN)?;
        validate::bounded("author", &self.author, validate::MAX_AUTHOR_LEN)?;
        validate::required("content", &self.content)?;
        validate::url_slug(&self.url)
    }

    pub fn utc_offset_secs(&self) -> i32 {
        self.creation_time.offset().local_minus_utc()
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: PostFields) -> Result<Model, ModelError> {
    fields.validate()?;
    let utc_offset_secs = fields.utc_offset_secs();
    let am = ActiveModel {
        id: NotSet,
        title: Set(fields.title),
        author: Set(fields.author),
        url: Set(fields.url),
        content: Set(fields.content),
        creation_time: Set(fields.creation_time),
        category_id: Set(fields.category_id),
        utc_offset_secs: Set(utc_offset_secs),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

/// Overwrite every writable column of an existing post.
pub async fn update<C: ConnectionTrait>(db: &C, id: i32, fields: PostFields) -> Result<Model, ModelError> {
    fields.validate()?;
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ModelError::from_db)?
        .ok_or_else(|| ModelError::NotFound("post".into()))?
        .into();
    am.utc_offset_secs = Set(fields.utc_offset_secs());
    am.title = Set(fields.title);
    am.author = Set(fields.author);
    am.url = Set(fields.url);
    am.content = Set(fields.content);
    am.creation_time = Set(fields.creation_time);
    am.category_id = Set(fields.category_id);
    am.update(db).await.map_err(ModelError::from_db)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(ModelError::from_db)?;
    Ok(res.rows_affected > 0)
}

pub async fn find_by_url<C: ConnectionTrait>(db: &C, url: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Url.eq(url))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn fields(url: &str) -> PostFields {
        PostFields {
            title: "Hello".into(),
            author: "meowv".into(),
            url: url.into(),
            content: "body".into(),
            creation_time: FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap(),
            category_id: None,
        }
    }

    #[test]
    fn fields_validate_ok() {
        assert!(fields("hello-world").validate().is_ok());
    }

    #[test]
    fn fields_reject_blank_title_and_bad_url() {
        let mut f = fields("hello-world");
        f.title = " ".into();
        assert!(matches!(f.validate(), Err(ModelError::Validation(_))));
        assert!(matches!(fields("Hello World").validate(), Err(ModelError::Validation(_))));
    }

    #[test]
    fn fields_reject_overlong_title_and_author() {
        let mut f = fields("hello-world");
        f.title = "t".repeat(validate::MAX_TITLE_LEN + 1);
        assert!(matches!(f.validate(), Err(ModelError::Validation(_))));
        let mut f = fields("hello-world");
        f.author = "a".repeat(validate::MAX_AUTHOR_LEN + 1);
        assert!(matches!(f.validate(), Err(ModelError::Validation(_))));
        f.author = "a".repeat(validate::MAX_AUTHOR_LEN);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn local_creation_time_restores_written_offset() {
        let written = FixedOffset::east_opt(8 * 3600).unwrap().with_ymd_and_hms(2020, 1, 1, 0, 30, 0).unwrap();
        let f = PostFields { creation_time: written, ..fields("new-year") };
        // what Postgres hands back: same instant at +00:00
        let model = Model {
            id: 1,
            title: f.title.clone(),
            author: f.author.clone(),
            url: f.url.clone(),
            content: f.content.clone(),
            creation_time: written.with_timezone(&FixedOffset::east_opt(0).unwrap()),
            category_id: None,
            utc_offset_secs: f.utc_offset_secs(),
        };
        let local = model.local_creation_time();
        assert_eq!(local, written);
        assert_eq!(local.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(local.to_rfc3339(), "2020-01-01T00:30:00+08:00");
    }
}
