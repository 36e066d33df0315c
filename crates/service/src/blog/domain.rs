use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use models::{category, post, tag};

/// Create/update input for a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub author: String,
    pub url: String,
    pub content: String,
    /// Defaults to the time of the request when omitted.
    #[serde(default)]
    pub creation_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub category_id: Option<i32>,
    /// Tag names (`tag_name`). `None` leaves links untouched on update.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Create/update input for a tag or a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelInput {
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDto {
    pub tag_name: String,
    pub display_name: String,
}

impl From<tag::Model> for TagDto {
    fn from(t: tag::Model) -> Self { Self { tag_name: t.tag_name, display_name: t.display_name } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub category_name: String,
    pub display_name: String,
}

impl From<category::Model> for CategoryDto {
    fn from(c: category::Model) -> Self { Self { category_name: c.category_name, display_name: c.display_name } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagWithCount {
    pub id: i32,
    pub tag_name: String,
    pub display_name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWithCount {
    pub id: i32,
    pub category_name: String,
    pub display_name: String,
    pub count: i64,
}

/// Neighbour link shown under a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLink {
    pub title: String,
    pub url: String,
}

impl From<post::Model> for PostLink {
    fn from(p: post::Model) -> Self { Self { title: p.title, url: p.url } }
}

/// Full post page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub title: String,
    pub author: String,
    pub url: String,
    pub content: String,
    pub creation_time: String,
    pub category: Option<CategoryDto>,
    pub tags: Vec<TagDto>,
    /// Nearest newer post
    pub previous: Option<PostLink>,
    /// Nearest older post
    pub next: Option<PostLink>,
}

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostBrief {
    pub title: String,
    pub url: String,
    pub creation_time: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsByYear {
    pub year: i32,
    pub posts: Vec<PostBrief>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub total: u64,
    pub items: Vec<T>,
}

/// Everything the post page needs, loaded in one unit of work.
#[derive(Debug, Clone)]
pub struct PostAggregate {
    pub post: post::Model,
    pub category: Option<category::Model>,
    pub tags: Vec<tag::Model>,
    pub previous: Option<post::Model>,
    pub next: Option<post::Model>,
}
