//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `<crate version> (<commit> <date>)`, shown in the CLI banner.
pub fn version_string() -> String {
    format!(
        "{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_mentions_commit() {
        let v = version_string();
        assert!(v.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(v.contains(BUILD_COMMIT));
    }

    #[test]
    fn test_build_stamps_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }
}
