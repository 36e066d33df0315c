use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use common::pagination::Pagination;
use models::post::PostFields;
use models::post;
use tracing::{debug, info, instrument};

use super::domain::{
    CategoryWithCount, LabelInput, PagedResult, PostBrief, PostDetail, PostInput, PostsByYear, TagWithCount,
};
use super::repository::BlogRepository;
use crate::errors::ServiceError;
use crate::format::{self, DEFAULT_DATE_FORMAT};
use crate::metrics;

/// Blog service configuration
#[derive(Clone, Debug)]
pub struct BlogConfig {
    /// chrono strftime pattern for rendered `creation_time`
    pub date_format: String,
    /// Page size used when a request asks for `limit = 0`
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self { date_format: DEFAULT_DATE_FORMAT.to_string(), default_page_size: 10, max_page_size: 100 }
    }
}

impl From<&configs::BlogConfig> for BlogConfig {
    fn from(c: &configs::BlogConfig) -> Self {
        Self { date_format: c.date_format.clone(), default_page_size: c.default_page_size, max_page_size: c.max_page_size }
    }
}

/// Blog business service independent of web framework
pub struct BlogService<R: BlogRepository + ?Sized> {
    repo: Arc<R>,
    cfg: BlogConfig,
}

/// Trimmed, deduplicated tag names in first-seen order; blanks dropped.
fn clean_tags(tags: Option<Vec<String>>) -> Option<Vec<String>> {
    tags.map(|names| {
        let mut out: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.trim();
            if !name.is_empty() && !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        }
        out
    })
}

/// Case-insensitive display name order, independent of the database collation.
fn display_order(a: &str, a_id: i32, b: &str, b_id: i32) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
        .then(a_id.cmp(&b_id))
}

fn into_fields(input: PostInput) -> (PostFields, Option<Vec<String>>) {
    let fields = PostFields {
        title: input.title.trim().to_string(),
        author: input.author.trim().to_string(),
        url: input.url.trim().to_string(),
        content: input.content,
        creation_time: input.creation_time.unwrap_or_else(|| Utc::now().fixed_offset()),
        category_id: input.category_id,
    };
    (fields, clean_tags(input.tags))
}

impl<R: BlogRepository + ?Sized> BlogService<R> {
    pub fn new(repo: Arc<R>, cfg: BlogConfig) -> Self { Self { repo, cfg } }

    pub fn config(&self) -> &BlogConfig { &self.cfg }

    fn brief(&self, p: &post::Model) -> PostBrief {
        let local = p.local_creation_time();
        PostBrief {
            title: p.title.clone(),
            url: p.url.clone(),
            creation_time: format::format_creation_time(&local, &self.cfg.date_format),
            year: format::year_of(&local),
        }
    }

    fn by_year(&self, posts: &[post::Model]) -> Vec<PostsByYear> {
        format::group_by_year(posts.iter().map(|p| self.brief(p)).collect())
    }

    /// Create a post and link its tags; returns the new id.
    ///
    /// # Examples
    /// ```
    /// use service::blog::{BlogService, BlogConfig, repository::mock::MockBlogRepository};
    /// use service::blog::domain::PostInput;
    /// use std::sync::Arc;
    /// let svc = BlogService::new(Arc::new(MockBlogRepository::default()), BlogConfig::default());
    /// let input = PostInput {
    ///     title: "Hello".into(), author: "me".into(), url: "hello".into(), content: "first".into(),
    ///     creation_time: None, category_id: None, tags: None,
    /// };
    /// let id = tokio_test::block_on(svc.insert_post(input)).unwrap();
    /// let post = tokio_test::block_on(svc.get_post("hello")).unwrap();
    /// assert!(id > 0);
    /// assert_eq!(post.title, "Hello");
    /// ```
    #[instrument(skip(self, input), fields(url = %input.url))]
    pub async fn insert_post(&self, input: PostInput) -> Result<i32, ServiceError> {
        let (fields, tags) = into_fields(input);
        let created = self.repo.insert_post(fields, tags).await?;
        metrics::POSTS_CREATED_TOTAL.inc();
        info!(post_id = created.id, url = %created.url, "post_created");
        Ok(created.id)
    }

    /// Overwrite a post. `tags: None` keeps the current links.
    #[instrument(skip(self, input), fields(url = %input.url))]
    pub async fn update_post(&self, id: i32, input: PostInput) -> Result<i32, ServiceError> {
        let (fields, tags) = into_fields(input);
        let updated = self.repo.update_post(id, fields, tags).await?;
        metrics::POSTS_UPDATED_TOTAL.inc();
        info!(post_id = updated.id, url = %updated.url, "post_updated");
        Ok(updated.id)
    }

    /// Returns false when no post had that id.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: i32) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete_post(id).await?;
        if deleted {
            metrics::POSTS_DELETED_TOTAL.inc();
            info!(post_id = id, "post_deleted");
        } else {
            debug!(post_id = id, "delete of missing post");
        }
        Ok(deleted)
    }

    /// Post page by url, with category, tags and neighbours.
    #[instrument(skip(self))]
    pub async fn get_post(&self, url: &str) -> Result<PostDetail, ServiceError> {
        let _timer = metrics::QUERY_DURATION.with_label_values(&["get_post"]).start_timer();
        let Some(agg) = self.repo.load_post(url.trim()).await? else {
            metrics::POST_LOOKUPS_MISSED_TOTAL.inc();
            return Err(ServiceError::not_found("post"));
        };
        let creation_time = format::format_creation_time(&agg.post.local_creation_time(), &self.cfg.date_format);
        let p = agg.post;
        Ok(PostDetail {
            title: p.title,
            author: p.author,
            url: p.url,
            content: p.content,
            creation_time,
            category: agg.category.map(Into::into),
            tags: agg.tags.into_iter().map(Into::into).collect(),
            previous: agg.previous.map(Into::into),
            next: agg.next.map(Into::into),
        })
    }

    /// One page of posts, newest first, plus the total count.
    ///
    /// # Examples
    /// ```
    /// use service::blog::{BlogService, BlogConfig, repository::mock::MockBlogRepository};
    /// use common::pagination::Pagination;
    /// use std::sync::Arc;
    /// let svc = BlogService::new(Arc::new(MockBlogRepository::default()), BlogConfig::default());
    /// let page = tokio_test::block_on(svc.query_posts(Pagination::new(1, 10))).unwrap();
    /// assert_eq!(page.total, 0);
    /// assert!(page.items.is_empty());
    /// ```
    #[instrument(skip(self))]
    pub async fn query_posts(&self, paging: Pagination) -> Result<PagedResult<PostBrief>, ServiceError> {
        let _timer = metrics::QUERY_DURATION.with_label_values(&["query_posts"]).start_timer();
        let paging = if paging.limit == 0 { Pagination::new(paging.page, self.cfg.default_page_size) } else { paging };
        let (idx, per_page) = paging.normalize_with(self.cfg.max_page_size);
        let (total, rows) = self.repo.page_posts(idx, per_page).await?;
        debug!(total, page = idx + 1, per_page, "posts_page");
        Ok(PagedResult { total, items: rows.iter().map(|p| self.brief(p)).collect() })
    }

    /// Posts carrying the tag with this display name, grouped by year.
    #[instrument(skip(self))]
    pub async fn query_posts_by_tag(&self, display_name: &str) -> Result<Vec<PostsByYear>, ServiceError> {
        let _timer = metrics::QUERY_DURATION.with_label_values(&["posts_by_tag"]).start_timer();
        let rows = self.repo.posts_by_tag(display_name.trim()).await?;
        Ok(self.by_year(&rows))
    }

    /// Posts in the category with this display name, grouped by year.
    #[instrument(skip(self))]
    pub async fn query_posts_by_category(&self, display_name: &str) -> Result<Vec<PostsByYear>, ServiceError> {
        let _timer = metrics::QUERY_DURATION.with_label_values(&["posts_by_category"]).start_timer();
        let rows = self.repo.posts_by_category(display_name.trim()).await?;
        Ok(self.by_year(&rows))
    }

    /// Every post grouped by year, newest year first.
    #[instrument(skip(self))]
    pub async fn query_archive(&self) -> Result<Vec<PostsByYear>, ServiceError> {
        let _timer = metrics::QUERY_DURATION.with_label_values(&["archive"]).start_timer();
        let rows = self.repo.all_posts().await?;
        Ok(self.by_year(&rows))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn insert_tag(&self, input: LabelInput) -> Result<i32, ServiceError> {
        let t = self.repo.insert_tag(&input.name, &input.display_name).await?;
        info!(tag_id = t.id, tag_name = %t.tag_name, "tag_created");
        Ok(t.id)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_tag(&self, id: i32, input: LabelInput) -> Result<i32, ServiceError> {
        let t = self.repo.update_tag(id, &input.name, &input.display_name).await?;
        info!(tag_id = t.id, "tag_updated");
        Ok(t.id)
    }

    #[instrument(skip(self))]
    pub async fn delete_tag(&self, id: i32) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete_tag(id).await?;
        if deleted {
            info!(tag_id = id, "tag_deleted");
        }
        Ok(deleted)
    }

    /// Tags with post counts, ordered by display name.
    #[instrument(skip(self))]
    pub async fn query_tags(&self) -> Result<Vec<TagWithCount>, ServiceError> {
        let mut tags = self.repo.tags_with_counts().await?;
        tags.sort_by(|a, b| display_order(&a.display_name, a.id, &b.display_name, b.id));
        Ok(tags)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn insert_category(&self, input: LabelInput) -> Result<i32, ServiceError> {
        let c = self.repo.insert_category(&input.name, &input.display_name).await?;
        info!(category_id = c.id, category_name = %c.category_name, "category_created");
        Ok(c.id)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_category(&self, id: i32, input: LabelInput) -> Result<i32, ServiceError> {
        let c = self.repo.update_category(id, &input.name, &input.display_name).await?;
        info!(category_id = c.id, "category_updated");
        Ok(c.id)
    }

    /// Posts of a deleted category stay, without a category.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: i32) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete_category(id).await?;
        if deleted {
            info!(category_id = id, "category_deleted");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    /// Categories with post counts, ordered by display name.
    pub async fn query_categories(&self) -> Result<Vec<CategoryWithCount>, ServiceError> {
        let mut categories = self.repo.categories_with_counts().await?;
        categories.sort_by(|a, b| display_order(&a.display_name, a.id, &b.display_name, b.id));
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::repository::mock::MockBlogRepository;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    fn input(url: &str, when: DateTime<FixedOffset>) -> PostInput {
        PostInput {
            title: format!("Title {url}"),
            author: "author".into(),
            url: url.into(),
            content: "body".into(),
            creation_time: Some(when),
            category_id: None,
            tags: None,
        }
    }

    fn svc() -> BlogService<MockBlogRepository> {
        BlogService::new(Arc::new(MockBlogRepository::default()), BlogConfig::default())
    }

    fn label(name: &str, display: &str) -> LabelInput {
        LabelInput { name: name.into(), display_name: display.into() }
    }

    #[tokio::test]
    async fn get_post_links_neighbours_and_formats_date() {
        let svc = svc();
        let rust = svc.insert_tag(label("rust", "Rust")).await.unwrap();
        let cat = svc.insert_category(label("notes", "Notes")).await.unwrap();
        svc.insert_post(input("first", at(2019, 1, 5))).await.unwrap();
        let mut mid = input("second", at(2019, 12, 1));
        mid.category_id = Some(cat);
        mid.tags = Some(vec![" rust ".into(), "rust".into()]);
        svc.insert_post(mid).await.unwrap();
        svc.insert_post(input("third", at(2020, 3, 2))).await.unwrap();

        let detail = svc.get_post("second").await.unwrap();
        assert_eq!(detail.creation_time, "December 01, 2019 10:00:00");
        assert_eq!(detail.previous.map(|p| p.url), Some("third".to_string()));
        assert_eq!(detail.next.map(|p| p.url), Some("first".to_string()));
        assert_eq!(detail.category.map(|c| c.display_name), Some("Notes".to_string()));
        assert_eq!(detail.tags.len(), 1);

        let tags = svc.query_tags().await.unwrap();
        assert_eq!(tags.iter().find(|t| t.id == rust).map(|t| t.count), Some(1));
    }

    #[tokio::test]
    async fn newest_and_oldest_have_one_neighbour() {
        let svc = svc();
        svc.insert_post(input("old", at(2018, 1, 1))).await.unwrap();
        svc.insert_post(input("new", at(2021, 1, 1))).await.unwrap();

        let newest = svc.get_post("new").await.unwrap();
        assert!(newest.previous.is_none());
        assert_eq!(newest.next.map(|p| p.url), Some("old".to_string()));
        let oldest = svc.get_post("old").await.unwrap();
        assert!(oldest.next.is_none());
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let err = svc().get_post("nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn query_posts_pages_newest_first() {
        let svc = svc();
        for (i, y) in [2016, 2017, 2018, 2019, 2020].into_iter().enumerate() {
            svc.insert_post(input(&format!("p{i}"), at(y, 6, 1))).await.unwrap();
        }
        let first = svc.query_posts(Pagination::new(0, 2)).await.unwrap();
        assert_eq!(first.total, 5);
        assert_eq!(first.items.iter().map(|p| p.url.as_str()).collect::<Vec<_>>(), vec!["p4", "p3"]);

        let last = svc.query_posts(Pagination::new(3, 2)).await.unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].year, 2016);

        let beyond = svc.query_posts(Pagination::new(9, 2)).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 5);
    }

    #[tokio::test]
    async fn limit_zero_uses_default_page_size() {
        let svc = BlogService::new(
            Arc::new(MockBlogRepository::default()),
            BlogConfig { default_page_size: 3, ..BlogConfig::default() },
        );
        for i in 0..5 {
            svc.insert_post(input(&format!("p{i}"), at(2020, 1, i + 1))).await.unwrap();
        }
        let page = svc.query_posts(Pagination::new(1, 0)).await.unwrap();
        assert_eq!(page.items.len(), 3);
    }

    #[tokio::test]
    async fn by_tag_groups_years_descending() {
        let svc = svc();
        svc.insert_tag(label("life", "Life")).await.unwrap();
        for (url, when) in [("a", at(2018, 2, 1)), ("b", at(2019, 3, 1)), ("c", at(2019, 8, 1))] {
            let mut i = input(url, when);
            i.tags = Some(vec!["life".into()]);
            svc.insert_post(i).await.unwrap();
        }
        svc.insert_post(input("untagged", at(2020, 1, 1))).await.unwrap();

        let groups = svc.query_posts_by_tag("Life").await.unwrap();
        assert_eq!(groups.iter().map(|g| g.year).collect::<Vec<_>>(), vec![2019, 2018]);
        assert_eq!(groups[0].posts.iter().map(|p| p.url.as_str()).collect::<Vec<_>>(), vec!["c", "b"]);

        // display name match is exact
        assert!(svc.query_posts_by_tag("life").await.unwrap().is_empty());
        assert!(svc.query_posts_by_tag("Unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn by_category_and_category_delete() {
        let svc = svc();
        let cat = svc.insert_category(label("tech", "Tech")).await.unwrap();
        let mut i = input("in-cat", at(2020, 5, 5));
        i.category_id = Some(cat);
        svc.insert_post(i).await.unwrap();

        let groups = svc.query_posts_by_category("Tech").await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].posts[0].url, "in-cat");

        assert!(svc.delete_category(cat).await.unwrap());
        assert!(svc.get_post("in-cat").await.unwrap().category.is_none());
        assert!(svc.query_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn archive_covers_every_post() {
        let svc = svc();
        svc.insert_post(input("x", at(2015, 1, 1))).await.unwrap();
        svc.insert_post(input("y", at(2022, 1, 1))).await.unwrap();
        let archive = svc.query_archive().await.unwrap();
        assert_eq!(archive.iter().map(|g| g.year).collect::<Vec<_>>(), vec![2022, 2015]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_tags() {
        let svc = svc();
        svc.insert_tag(label("a", "A")).await.unwrap();
        svc.insert_tag(label("b", "B")).await.unwrap();
        let mut i = input("post", at(2020, 1, 1));
        i.tags = Some(vec!["a".into()]);
        let id = svc.insert_post(i).await.unwrap();

        // tags: None keeps links
        let mut u = input("post-renamed", at(2020, 1, 1));
        u.title = "Renamed".into();
        svc.update_post(id, u).await.unwrap();
        let d = svc.get_post("post-renamed").await.unwrap();
        assert_eq!(d.title, "Renamed");
        assert_eq!(d.tags.iter().map(|t| t.tag_name.as_str()).collect::<Vec<_>>(), vec!["a"]);

        let mut u = input("post-renamed", at(2020, 1, 1));
        u.tags = Some(vec!["b".into()]);
        svc.update_post(id, u).await.unwrap();
        let d = svc.get_post("post-renamed").await.unwrap();
        assert_eq!(d.tags.iter().map(|t| t.tag_name.as_str()).collect::<Vec<_>>(), vec!["b"]);

        let err = svc.update_post(999, input("zzz", at(2020, 1, 1))).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn insert_rejects_bad_input() {
        let svc = svc();
        svc.insert_post(input("taken", at(2020, 1, 1))).await.unwrap();

        let dup = svc.insert_post(input("taken", at(2021, 1, 1))).await.unwrap_err();
        assert!(matches!(dup, ServiceError::Conflict(_)));

        let mut bad_tag = input("fresh", at(2021, 1, 1));
        bad_tag.tags = Some(vec!["ghost".into()]);
        assert!(matches!(svc.insert_post(bad_tag).await.unwrap_err(), ServiceError::Validation(_)));

        let mut blank = input("blank-title", at(2021, 1, 1));
        blank.title = "   ".into();
        assert!(matches!(svc.insert_post(blank).await.unwrap_err(), ServiceError::Validation(_)));

        assert!(matches!(svc.insert_post(input("Bad Url", at(2021, 1, 1))).await.unwrap_err(), ServiceError::Validation(_)));

        let mut long_title = input("long-title", at(2021, 1, 1));
        long_title.title = "t".repeat(300);
        assert!(matches!(svc.insert_post(long_title).await.unwrap_err(), ServiceError::Validation(_)));
        assert_eq!(svc.query_posts(Pagination::default()).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn delete_post_reports_missing() {
        let svc = svc();
        let id = svc.insert_post(input("gone", at(2020, 1, 1))).await.unwrap();
        assert!(svc.delete_post(id).await.unwrap());
        assert!(!svc.delete_post(id).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_tag_names_conflict() {
        let svc = svc();
        let id = svc.insert_tag(label("go", "Go")).await.unwrap();
        let other = svc.insert_tag(label("zig", "Zig")).await.unwrap();
        assert!(matches!(svc.insert_tag(label("go", "Golang")).await.unwrap_err(), ServiceError::Conflict(_)));
        assert!(matches!(svc.update_tag(other, label("zig", "Go")).await.unwrap_err(), ServiceError::Conflict(_)));
        assert_eq!(svc.update_tag(id, label("go", "Go")).await.unwrap(), id);
        assert!(svc.delete_tag(id).await.unwrap());
    }

    #[tokio::test]
    async fn labels_list_case_insensitively() {
        let svc = svc();
        for (name, display) in [("c", "cherry"), ("b", "Banana"), ("a", "apple")] {
            svc.insert_tag(label(name, display)).await.unwrap();
            svc.insert_category(label(name, display)).await.unwrap();
        }
        let tags = svc.query_tags().await.unwrap();
        assert_eq!(tags.iter().map(|t| t.display_name.as_str()).collect::<Vec<_>>(), ["apple", "Banana", "cherry"]);
        let cats = svc.query_categories().await.unwrap();
        assert_eq!(cats.iter().map(|c| c.display_name.as_str()).collect::<Vec<_>>(), ["apple", "Banana", "cherry"]);
    }

    #[test]
    fn display_order_breaks_case_ties_deterministically() {
        assert_eq!(display_order("Go", 2, "go", 1), Ordering::Less);
        assert_eq!(display_order("go", 1, "go", 2), Ordering::Less);
        assert_eq!(display_order("apple", 9, "Banana", 1), Ordering::Less);
    }

    #[test]
    fn clean_tags_trims_and_dedups() {
        let out = clean_tags(Some(vec![" a".into(), "b".into(), "a ".into(), "  ".into()]));
        assert_eq!(out, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(clean_tags(None), None);
    }
}
