use sea_orm::DatabaseConnection;
use models::post::PostFields;
use models::{category, post, tag};

use crate::blog::domain::{CategoryWithCount, PostAggregate, TagWithCount};
use crate::blog::repository::BlogRepository;
use crate::db::{category_service, post_service, tag_service};
use crate::errors::ServiceError;
use crate::uow;

pub struct SeaOrmBlogRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBlogRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl BlogRepository for SeaOrmBlogRepository {
    async fn insert_post(&self, fields: PostFields, tags: Option<Vec<String>>) -> Result<post::Model, ServiceError> {
        uow::run(&self.db, move |txn| Box::pin(async move {
            post_service::create_post(txn, fields, tags.as_deref()).await
        }))
        .await
    }

    async fn update_post(&self, id: i32, fields: PostFields, tags: Option<Vec<String>>) -> Result<post::Model, ServiceError> {
        uow::run(&self.db, move |txn| Box::pin(async move {
            post_service::update_post(txn, id, fields, tags.as_deref()).await
        }))
        .await
    }

    async fn delete_post(&self, id: i32) -> Result<bool, ServiceError> {
        uow::run(&self.db, move |txn| Box::pin(async move { post_service::delete_post(txn, id).await })).await
    }

    async fn load_post(&self, url: &str) -> Result<Option<PostAggregate>, ServiceError> {
        let url = url.to_string();
        uow::run(&self.db, move |txn| Box::pin(async move { post_service::load_post(txn, &url).await })).await
    }

    async fn page_posts(&self, page_idx: u64, per_page: u64) -> Result<(u64, Vec<post::Model>), ServiceError> {
        post_service::page_posts(&self.db, page_idx, per_page).await
    }

    async fn posts_by_tag(&self, display_name: &str) -> Result<Vec<post::Model>, ServiceError> {
        post_service::posts_by_tag(&self.db, display_name).await
    }

    async fn posts_by_category(&self, display_name: &str) -> Result<Vec<post::Model>, ServiceError> {
        post_service::posts_by_category(&self.db, display_name).await
    }

    async fn all_posts(&self) -> Result<Vec<post::Model>, ServiceError> {
        post_service::all_posts(&self.db).await
    }

    async fn insert_tag(&self, tag_name: &str, display_name: &str) -> Result<tag::Model, ServiceError> {
        let (name, display) = (tag_name.to_string(), display_name.to_string());
        uow::run(&self.db, move |txn| Box::pin(async move {
            tag_service::create_tag(txn, &name, &display).await
        }))
        .await
    }

    async fn update_tag(&self, id: i32, tag_name: &str, display_name: &str) -> Result<tag::Model, ServiceError> {
        let (name, display) = (tag_name.to_string(), display_name.to_string());
        uow::run(&self.db, move |txn| Box::pin(async move {
            tag_service::update_tag(txn, id, &name, &display).await
        }))
        .await
    }

    async fn delete_tag(&self, id: i32) -> Result<bool, ServiceError> {
        uow::run(&self.db, move |txn| Box::pin(async move { tag_service::delete_tag(txn, id).await })).await
    }

    async fn tags_with_counts(&self) -> Result<Vec<TagWithCount>, ServiceError> {
        tag_service::tags_with_counts(&self.db).await
    }

    async fn insert_category(&self, category_name: &str, display_name: &str) -> Result<category::Model, ServiceError> {
        let (name, display) = (category_name.to_string(), display_name.to_string());
        uow::run(&self.db, move |txn| Box::pin(async move {
            category_service::create_category(txn, &name, &display).await
        }))
        .await
    }

    async fn update_category(&self, id: i32, category_name: &str, display_name: &str) -> Result<category::Model, ServiceError> {
        let (name, display) = (category_name.to_string(), display_name.to_string());
        uow::run(&self.db, move |txn| Box::pin(async move {
            category_service::update_category(txn, id, &name, &display).await
        }))
        .await
    }

    async fn delete_category(&self, id: i32) -> Result<bool, ServiceError> {
        uow::run(&self.db, move |txn| Box::pin(async move { category_service::delete_category(txn, id).await })).await
    }

    async fn categories_with_counts(&self) -> Result<Vec<CategoryWithCount>, ServiceError> {
        category_service::categories_with_counts(&self.db).await
    }
}
