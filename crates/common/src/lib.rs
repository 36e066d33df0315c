//! Shared building blocks for the blog workspace: logging setup, runtime
//! environment checks, small wire types and paging arithmetic.

pub mod types;
pub mod utils;
pub mod pagination;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn health_serializes_status() {
        let v = serde_json::to_value(types::Health { status: "ok" }).unwrap();
        assert_eq!(v["status"], "ok");
    }
}
