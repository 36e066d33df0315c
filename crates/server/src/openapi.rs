use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct PostInputDoc {
    pub title: String,
    pub author: String,
    /// Lowercase slug: letters, digits, `-`, `_`, `.`
    pub url: String,
    pub content: String,
    /// RFC 3339 timestamp; defaults to now
    pub creation_time: Option<String>,
    pub category_id: Option<i32>,
    /// Existing tag names; omitted on update keeps current tags
    pub tags: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct LabelInputDoc { pub name: String, pub display_name: String }

#[derive(ToSchema)]
pub struct LabelWithCountDoc {
    pub id: i32,
    /// `tag_name` or `category_name`
    pub name: String,
    pub display_name: String,
    pub count: i64,
}

#[derive(ToSchema)]
pub struct PostLinkDoc { pub title: String, pub url: String }

#[derive(ToSchema)]
pub struct PostDetailDoc {
    pub title: String,
    pub author: String,
    pub url: String,
    pub content: String,
    /// e.g. `December 01, 2019 10:00:00`
    pub creation_time: String,
    pub category: Option<LabelInputDoc>,
    pub tags: Vec<LabelInputDoc>,
    /// Nearest newer post
    pub previous: Option<PostLinkDoc>,
    /// Nearest older post
    pub next: Option<PostLinkDoc>,
}

#[derive(ToSchema)]
pub struct PostBriefDoc { pub title: String, pub url: String, pub creation_time: String, pub year: i32 }

#[derive(ToSchema)]
pub struct PostPageDoc { pub total: u64, pub items: Vec<PostBriefDoc> }

#[derive(ToSchema)]
pub struct PostsByYearDoc { pub year: i32, pub posts: Vec<PostBriefDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::posts::list,
        crate::routes::posts::create,
        crate::routes::posts::get,
        crate::routes::posts::update,
        crate::routes::posts::delete,
        crate::routes::posts::archive,
        crate::routes::tags::list,
        crate::routes::tags::create,
        crate::routes::tags::update,
        crate::routes::tags::delete,
        crate::routes::tags::posts,
        crate::routes::categories::list,
        crate::routes::categories::create,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::categories::posts,
    ),
    components(
        schemas(
            HealthResponse,
            PostInputDoc,
            LabelInputDoc,
            LabelWithCountDoc,
            PostLinkDoc,
            PostDetailDoc,
            PostBriefDoc,
            PostPageDoc,
            PostsByYearDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "posts"),
        (name = "tags"),
        (name = "categories")
    )
)]
pub struct ApiDoc;
