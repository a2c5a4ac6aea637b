//! Display and link forms of profile URLs.

/// Strips the scheme, a leading `www.` and one trailing slash for display.
pub fn clean_url(url: &str) -> String {
    let url = url.trim();
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);
    without_www
        .strip_suffix('/')
        .unwrap_or(without_www)
        .to_string()
}

/// Link target for a user-typed URL: kept as is when it already starts with
/// `http`, otherwise prefixed with `https://`.
pub fn absolute_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_url() {
        assert_eq!(clean_url("https://www.linkedin.com/in/ada/"), "linkedin.com/in/ada");
        assert_eq!(clean_url("http://github.com/ada"), "github.com/ada");
        assert_eq!(clean_url("ada.dev"), "ada.dev");
        assert_eq!(clean_url("  https://leetcode.com/u/ada  "), "leetcode.com/u/ada");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url("github.com/ada"), "https://github.com/ada");
        assert_eq!(absolute_url("http://ada.dev"), "http://ada.dev");
        assert_eq!(absolute_url("https://ada.dev/"), "https://ada.dev/");
    }
}
