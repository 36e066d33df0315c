use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter, Encoder, HistogramVec, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static POSTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("blog_posts_created_total", "Total posts created")
        .expect("register posts_created_total")
});

pub static POSTS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("blog_posts_updated_total", "Total posts updated")
        .expect("register posts_updated_total")
});

pub static POSTS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("blog_posts_deleted_total", "Total posts deleted")
        .expect("register posts_deleted_total")
});

pub static POST_LOOKUPS_MISSED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("blog_post_lookups_missed_total", "Post lookups by url that found nothing")
        .expect("register post_lookups_missed_total")
});

pub static QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "blog_query_duration_seconds",
        "Blog query duration in seconds",
        &["query"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("register query_duration")
});

/// Text exposition of the default registry.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    exposition_text(buffer)
}

fn exposition_text(buffer: Vec<u8>) -> Result<String, prometheus::Error> {
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("metrics exposition is not utf-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        POSTS_CREATED_TOTAL.inc();
        QUERY_DURATION.with_label_values(&["test"]).observe(0.002);
        let text = encode_metrics().unwrap();
        assert!(text.contains("blog_posts_created_total"));
        assert!(text.contains("blog_query_duration_seconds"));
    }

    #[test]
    fn non_utf8_exposition_is_an_error() {
        assert!(matches!(exposition_text(vec![0xff, 0xfe]), Err(prometheus::Error::Msg(_))));
        assert_eq!(exposition_text(b"ok".to_vec()).unwrap(), "ok");
    }
}
