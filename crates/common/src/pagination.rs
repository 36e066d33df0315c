//! Pagination utilities shared by the service and HTTP layers
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

use serde::Deserialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    #[serde(default = "default_page")]
    pub page: u32,
    /// items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 { 1 }
fn default_limit() -> u32 { 10 }

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self { Self { page, limit } }

    /// Zero-based page index plus page size clamped to `1..=max_limit`; page 0 counts as page 1.
    pub fn normalize_with(self, max_limit: u32) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let limit = self.limit.clamp(1, max_limit.max(1));
        ((page - 1) as u64, limit as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: default_page(), limit: default_limit() } }
}
