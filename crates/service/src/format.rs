//! Presentation helpers: creation time strings and year grouping.

use std::fmt::Write;

use chrono::{DateTime, Datelike, FixedOffset};
use chrono::format::{Item, StrftimeItems};

use crate::blog::domain::{PostBrief, PostsByYear};

/// `MMMM dd, yyyy HH:mm:ss` with English month names, e.g. `December 01, 2019 10:00:00`.
pub const DEFAULT_DATE_FORMAT: &str = "%B %d, %Y %H:%M:%S";

/// True when chrono understands every specifier in `pattern`.
pub fn is_valid_pattern(pattern: &str) -> bool {
    !pattern.trim().is_empty() && StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

/// Render in the timestamp's own offset; an unusable pattern falls back to the default.
pub fn format_creation_time(t: &DateTime<FixedOffset>, pattern: &str) -> String {
    let pattern = if is_valid_pattern(pattern) { pattern } else { DEFAULT_DATE_FORMAT };
    let mut out = String::new();
    if write!(out, "{}", t.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", t.format(DEFAULT_DATE_FORMAT));
    }
    out
}

pub fn year_of(t: &DateTime<FixedOffset>) -> i32 { t.year() }

/// Group posts by year keeping first-appearance order of years and the
/// original order inside each year. Fed a newest-first list, this yields
/// years descending with newest posts first.
pub fn group_by_year(posts: Vec<PostBrief>) -> Vec<PostsByYear> {
    let mut groups: Vec<PostsByYear> = Vec::new();
    for post in posts {
        match groups.iter_mut().find(|g| g.year == post.year) {
            Some(group) => group.posts.push(post),
            None => groups.push(PostsByYear { year: post.year, posts: vec![post] }),
        }
    }
    groups
}
