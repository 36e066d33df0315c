use chrono::{FixedOffset, TimeZone};
use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use common::pagination::Pagination;
use service::blog::{BlogConfig, BlogService};
use service::blog::repository::mock::MockBlogRepository;
use service::blog::domain::{LabelInput, PostBrief, PostInput};
use service::format::group_by_year;

fn seeded() -> (tokio::runtime::Runtime, BlogService<MockBlogRepository>) {
    let svc = BlogService::new(Arc::new(MockBlogRepository::default()), BlogConfig::default());
    let rt = tokio::runtime::Runtime::new().unwrap();
    let tz = FixedOffset::east_opt(0).unwrap();

    // seed outside of the measured loop
    rt.block_on(async {
        svc.insert_tag(LabelInput { name: "bench".into(), display_name: "Bench".into() }).await.unwrap();
        for i in 0..500u32 {
            let when = tz.with_ymd_and_hms(2010 + (i % 12) as i32, 1 + i % 12, 1 + i % 28, 8, 0, 0).unwrap();
            svc.insert_post(PostInput {
                title: format!("Post {i}"),
                author: "bench".into(),
                url: format!("post-{i}"),
                content: "lorem ipsum".into(),
                creation_time: Some(when),
                category_id: None,
                tags: (i % 2 == 0).then(|| vec!["bench".to_string()]),
            })
            .await
            .unwrap();
        }
    });
    (rt, svc)
}

fn bench_queries(c: &mut Criterion) {
    let (rt, svc) = seeded();

    c.bench_function("blog_query_posts_page", |b| {
        b.iter(|| rt.block_on(svc.query_posts(Pagination::new(3, 20))).unwrap());
    });
    c.bench_function("blog_posts_by_tag", |b| {
        b.iter(|| rt.block_on(svc.query_posts_by_tag("Bench")).unwrap());
    });
    c.bench_function("blog_get_post", |b| {
        b.iter(|| rt.block_on(svc.get_post("post-250")).unwrap());
    });
}

fn bench_grouping(c: &mut Criterion) {
    let briefs: Vec<PostBrief> = (0..1000)
        .map(|i| PostBrief { title: format!("t{i}"), url: format!("u{i}"), creation_time: String::new(), year: 2024 - i / 50 })
        .collect();

    c.bench_function("blog_group_by_year", |b| {
        b.iter(|| group_by_year(briefs.clone()));
    });
}

criterion_group!(benches, bench_queries, bench_grouping);
criterion_main!(benches);
