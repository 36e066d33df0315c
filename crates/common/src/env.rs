//! Environment/runtime helpers
//!
//! Sanity checks to surface missing configuration at startup.

use tracing::warn;

/// Names from `vars` that are unset or blank in the process environment.
pub fn missing_vars<'a>(vars: &[&'a str]) -> Vec<&'a str> {
    vars.iter()
        .copied()
        .filter(|name| std::env::var(name).map(|v| v.trim().is_empty()).unwrap_or(true))
        .collect()
}

/// Warn once per missing variable; the caller decides whether a default is acceptable.
pub fn warn_missing(vars: &[&str]) {
    for name in missing_vars(vars) {
        warn!(var = name, "environment variable not set; using built-in default");
    }
}

#[cfg(test)]
mod tests {
    use super::missing_vars;

    #[test]
    fn reports_unset_variables() {
        let missing = missing_vars(&["BLOG_SURELY_UNSET_VAR_FOR_TEST"]);
        assert_eq!(missing, vec!["BLOG_SURELY_UNSET_VAR_FOR_TEST"]);
    }

    #[test]
    fn ignores_present_variables() {
        // PATH is present in any sane test environment
        assert!(missing_vars(&["PATH"]).is_empty());
    }
}
