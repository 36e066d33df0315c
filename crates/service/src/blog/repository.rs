use async_trait::async_trait;
use models::post::PostFields;
use models::{category, post, tag};

use super::domain::{CategoryWithCount, PostAggregate, TagWithCount};
use crate::errors::ServiceError;

/// Repository abstraction for blog persistence.
///
/// Post listings are always newest first (`creation_time` desc, then id desc).
/// Every write is a single unit of work.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Insert a post and link the named tags.
    async fn insert_post(&self, fields: PostFields, tags: Option<Vec<String>>) -> Result<post::Model, ServiceError>;
    /// Overwrite a post; `tags: Some` replaces its links.
    async fn update_post(&self, id: i32, fields: PostFields, tags: Option<Vec<String>>) -> Result<post::Model, ServiceError>;
    async fn delete_post(&self, id: i32) -> Result<bool, ServiceError>;
    async fn load_post(&self, url: &str) -> Result<Option<PostAggregate>, ServiceError>;
    /// Total post count plus one zero-based page.
    async fn page_posts(&self, page_idx: u64, per_page: u64) -> Result<(u64, Vec<post::Model>), ServiceError>;
    async fn posts_by_tag(&self, display_name: &str) -> Result<Vec<post::Model>, ServiceError>;
    async fn posts_by_category(&self, display_name: &str) -> Result<Vec<post::Model>, ServiceError>;
    async fn all_posts(&self) -> Result<Vec<post::Model>, ServiceError>;

    async fn insert_tag(&self, tag_name: &str, display_name: &str) -> Result<tag::Model, ServiceError>;
    async fn update_tag(&self, id: i32, tag_name: &str, display_name: &str) -> Result<tag::Model, ServiceError>;
    async fn delete_tag(&self, id: i32) -> Result<bool, ServiceError>;
    /// Id order; display ordering is applied by the service.
    async fn tags_with_counts(&self) -> Result<Vec<TagWithCount>, ServiceError>;

    async fn insert_category(&self, category_name: &str, display_name: &str) -> Result<category::Model, ServiceError>;
    async fn update_category(&self, id: i32, category_name: &str, display_name: &str) -> Result<category::Model, ServiceError>;
    async fn delete_category(&self, id: i32) -> Result<bool, ServiceError>;
    /// Id order; display ordering is applied by the service.
    async fn categories_with_counts(&self) -> Result<Vec<CategoryWithCount>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Default)]
    struct State {
        posts: Vec<post::Model>,
        tags: Vec<tag::Model>,
        categories: Vec<category::Model>,
        links: Vec<(i32, i32)>, // (post_id, tag_id)
        last_id: i32,
    }

    impl State {
        fn next_id(&mut self) -> i32 {
            self.last_id += 1;
            self.last_id
        }

        fn resolve_tags(&self, names: &[String]) -> Result<Vec<i32>, ServiceError> {
            let mut ids = Vec::with_capacity(names.len());
            for name in names {
                let tag = self.tags.iter().find(|t| &t.tag_name == name)
                    .ok_or_else(|| ServiceError::Validation(format!("unknown tag: {name}")))?;
                ids.push(tag.id);
            }
            Ok(ids)
        }

        fn check_post(&self, id: Option<i32>, fields: &PostFields) -> Result<(), ServiceError> {
            fields.validate()?;
            if self.posts.iter().any(|p| p.url == fields.url && Some(p.id) != id) {
                return Err(ServiceError::Conflict(format!("url {} already used", fields.url)));
            }
            if let Some(cid) = fields.category_id {
                if !self.categories.iter().any(|c| c.id == cid) {
                    return Err(ServiceError::Validation(format!("unknown category: {cid}")));
                }
            }
            Ok(())
        }

        fn newest_first(&self, mut posts: Vec<post::Model>) -> Vec<post::Model> {
            posts.sort_by(|a, b| b.creation_time.cmp(&a.creation_time).then(b.id.cmp(&a.id)));
            posts
        }

        fn relink(&mut self, post_id: i32, tag_ids: Vec<i32>) {
            self.links.retain(|(p, _)| *p != post_id);
            for tid in tag_ids {
                if !self.links.contains(&(post_id, tid)) {
                    self.links.push((post_id, tid));
                }
            }
        }
    }

    #[derive(Default)]
    pub struct MockBlogRepository {
        state: Mutex<State>,
    }

    impl MockBlogRepository {
        fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// `name` is already used by a row other than `id`.
    fn name_taken<'a, I>(mut existing: I, id: Option<i32>, name: &str) -> Result<(), ServiceError>
    where
        I: Iterator<Item = (i32, &'a str)>,
    {
        if existing.any(|(eid, n)| Some(eid) != id && n == name.trim()) {
            return Err(ServiceError::Conflict(format!("{} already exists", name.trim())));
        }
        Ok(())
    }

    #[async_trait]
    impl BlogRepository for MockBlogRepository {
        async fn insert_post(&self, fields: PostFields, tags: Option<Vec<String>>) -> Result<post::Model, ServiceError> {
            let mut st = self.state();
            st.check_post(None, &fields)?;
            let tag_ids = st.resolve_tags(tags.as_deref().unwrap_or_default())?;
            let id = st.next_id();
            let utc_offset_secs = fields.utc_offset_secs();
            let model = post::Model {
                id,
                title: fields.title,
                author: fields.author,
                url: fields.url,
                content: fields.content,
                utc_offset_secs,
                creation_time: fields.creation_time,
                category_id: fields.category_id,
            };
            st.posts.push(model.clone());
            st.relink(id, tag_ids);
            Ok(model)
        }

        async fn update_post(&self, id: i32, fields: PostFields, tags: Option<Vec<String>>) -> Result<post::Model, ServiceError> {
            let mut st = self.state();
            if !st.posts.iter().any(|p| p.id == id) {
                return Err(ServiceError::not_found("post"));
            }
            st.check_post(Some(id), &fields)?;
            let tag_ids = match &tags {
                Some(names) => Some(st.resolve_tags(names)?),
                None => None,
            };
            let utc_offset_secs = fields.utc_offset_secs();
            let updated = post::Model {
                id,
                title: fields.title,
                author: fields.author,
                url: fields.url,
                content: fields.content,
                utc_offset_secs,
                creation_time: fields.creation_time,
                category_id: fields.category_id,
            };
            if let Some(slot) = st.posts.iter_mut().find(|p| p.id == id) {
                *slot = updated.clone();
            }
            if let Some(ids) = tag_ids {
                st.relink(id, ids);
            }
            Ok(updated)
        }

        async fn delete_post(&self, id: i32) -> Result<bool, ServiceError> {
            let mut st = self.state();
            let before = st.posts.len();
            st.posts.retain(|p| p.id != id);
            st.links.retain(|(p, _)| *p != id);
            Ok(st.posts.len() != before)
        }

        async fn load_post(&self, url: &str) -> Result<Option<PostAggregate>, ServiceError> {
            let st = self.state();
            let Some(post) = st.posts.iter().find(|p| p.url == url).cloned() else { return Ok(None) };
            let category = post.category_id.and_then(|cid| st.categories.iter().find(|c| c.id == cid).cloned());
            let mut tags: Vec<tag::Model> = st.tags.iter()
                .filter(|t| st.links.contains(&(post.id, t.id)))
                .cloned()
                .collect();
            tags.sort_by_key(|t| t.id);
            let previous = st.posts.iter()
                .filter(|p| p.creation_time > post.creation_time)
                .min_by(|a, b| a.creation_time.cmp(&b.creation_time).then(a.id.cmp(&b.id)))
                .cloned();
            let next = st.posts.iter()
                .filter(|p| p.creation_time < post.creation_time)
                .max_by(|a, b| a.creation_time.cmp(&b.creation_time).then(a.id.cmp(&b.id)))
                .cloned();
            Ok(Some(PostAggregate { post, category, tags, previous, next }))
        }

        async fn page_posts(&self, page_idx: u64, per_page: u64) -> Result<(u64, Vec<post::Model>), ServiceError> {
            let st = self.state();
            let all = st.newest_first(st.posts.clone());
            let total = all.len() as u64;
            let items = all.into_iter()
                .skip((page_idx * per_page) as usize)
                .take(per_page as usize)
                .collect();
            Ok((total, items))
        }

        async fn posts_by_tag(&self, display_name: &str) -> Result<Vec<post::Model>, ServiceError> {
            let st = self.state();
            let Some(tag) = st.tags.iter().find(|t| t.display_name == display_name) else { return Ok(Vec::new()) };
            let posts = st.posts.iter()
                .filter(|p| st.links.contains(&(p.id, tag.id)))
                .cloned()
                .collect();
            Ok(st.newest_first(posts))
        }

        async fn posts_by_category(&self, display_name: &str) -> Result<Vec<post::Model>, ServiceError> {
            let st = self.state();
            let Some(cat) = st.categories.iter().find(|c| c.display_name == display_name) else { return Ok(Vec::new()) };
            let posts = st.posts.iter()
                .filter(|p| p.category_id == Some(cat.id))
                .cloned()
                .collect();
            Ok(st.newest_first(posts))
        }

        async fn all_posts(&self) -> Result<Vec<post::Model>, ServiceError> {
            let st = self.state();
            Ok(st.newest_first(st.posts.clone()))
        }

        async fn insert_tag(&self, tag_name: &str, display_name: &str) -> Result<tag::Model, ServiceError> {
            let mut st = self.state();
            models::validate::label("tag_name", tag_name)?;
            models::validate::label("display_name", display_name)?;
            name_taken(st.tags.iter().map(|t| (t.id, t.tag_name.as_str())), None, tag_name)?;
            name_taken(st.tags.iter().map(|t| (t.id, t.display_name.as_str())), None, display_name)?;
            let id = st.next_id();
            let model = tag::Model { id, tag_name: tag_name.trim().into(), display_name: display_name.trim().into() };
            st.tags.push(model.clone());
            Ok(model)
        }

        async fn update_tag(&self, id: i32, tag_name: &str, display_name: &str) -> Result<tag::Model, ServiceError> {
            let mut st = self.state();
            models::validate::label("tag_name", tag_name)?;
            models::validate::label("display_name", display_name)?;
            name_taken(st.tags.iter().map(|t| (t.id, t.tag_name.as_str())), Some(id), tag_name)?;
            name_taken(st.tags.iter().map(|t| (t.id, t.display_name.as_str())), Some(id), display_name)?;
            let slot = st.tags.iter_mut().find(|t| t.id == id).ok_or_else(|| ServiceError::not_found("tag"))?;
            slot.tag_name = tag_name.trim().into();
            slot.display_name = display_name.trim().into();
            Ok(slot.clone())
        }

        async fn delete_tag(&self, id: i32) -> Result<bool, ServiceError> {
            let mut st = self.state();
            let before = st.tags.len();
            st.tags.retain(|t| t.id != id);
            st.links.retain(|(_, t)| *t != id);
            Ok(st.tags.len() != before)
        }

        async fn tags_with_counts(&self) -> Result<Vec<TagWithCount>, ServiceError> {
            let st = self.state();
            let mut out: Vec<TagWithCount> = st.tags.iter()
                .map(|t| TagWithCount {
                    id: t.id,
                    tag_name: t.tag_name.clone(),
                    display_name: t.display_name.clone(),
                    count: st.links.iter().filter(|(_, tid)| *tid == t.id).count() as i64,
                })
                .collect();
            out.sort_by_key(|x| x.id);
            Ok(out)
        }

        async fn insert_category(&self, category_name: &str, display_name: &str) -> Result<category::Model, ServiceError> {
            let mut st = self.state();
            models::validate::label("category_name", category_name)?;
            models::validate::label("display_name", display_name)?;
            name_taken(st.categories.iter().map(|c| (c.id, c.category_name.as_str())), None, category_name)?;
            name_taken(st.categories.iter().map(|c| (c.id, c.display_name.as_str())), None, display_name)?;
            let id = st.next_id();
            let model = category::Model { id, category_name: category_name.trim().into(), display_name: display_name.trim().into() };
            st.categories.push(model.clone());
            Ok(model)
        }

        async fn update_category(&self, id: i32, category_name: &str, display_name: &str) -> Result<category::Model, ServiceError> {
            let mut st = self.state();
            models::validate::label("category_name", category_name)?;
            models::validate::label("display_name", display_name)?;
            name_taken(st.categories.iter().map(|c| (c.id, c.category_name.as_str())), Some(id), category_name)?;
            name_taken(st.categories.iter().map(|c| (c.id, c.display_name.as_str())), Some(id), display_name)?;
            let slot = st.categories.iter_mut().find(|c| c.id == id).ok_or_else(|| ServiceError::not_found("category"))?;
            slot.category_name = category_name.trim().into();
            slot.display_name = display_name.trim().into();
            Ok(slot.clone())
        }

        async fn delete_category(&self, id: i32) -> Result<bool, ServiceError> {
            let mut st = self.state();
            let before = st.categories.len();
            st.categories.retain(|c| c.id != id);
            for p in st.posts.iter_mut().filter(|p| p.category_id == Some(id)) {
                p.category_id = None;
            }
            Ok(st.categories.len() != before)
        }

        async fn categories_with_counts(&self) -> Result<Vec<CategoryWithCount>, ServiceError> {
            let st = self.state();
            let mut out: Vec<CategoryWithCount> = st.categories.iter()
                .map(|c| CategoryWithCount {
                    id: c.id,
                    category_name: c.category_name.clone(),
                    display_name: c.display_name.clone(),
                    count: st.posts.iter().filter(|p| p.category_id == Some(c.id)).count() as i64,
                })
                .collect();
            out.sort_by_key(|x| x.id);
            Ok(out)
        }
    }
}
