//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/tags/linux/") // -> "/blog/tags/linux/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Prefix a root-relative path (as returned by [`url_for`]) with the site URL
pub fn full_url(config: &SiteConfig, path: &str) -> String {
    format!(
        "{}/{}",
        config.url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Path of a taxonomy term page, e.g. `tags/<slug>/` or
/// `categories/<parent>/<child>/` for a category slug path
pub fn term_path(config: &SiteConfig, dir: &str, slug: &str) -> String {
    url_for(config, &format!("{}/{}/", dir, slug.trim_matches('/')))
}

/// Number of pages a listing of `len` posts needs; empty listings still get one
pub fn page_count(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1)).max(1)
}

/// The file a site path is written to, as a path: `/a/` and `/a/index.html`
/// share a key
pub fn output_key(path: &str) -> String {
    if path.ends_with('/') {
        format!("{}index.html", path)
    } else {
        path.to_string()
    }
}

/// Path of page `n` (1-based) of a paginated listing rooted at `base`
pub fn page_path(config: &SiteConfig, base: &str, n: usize) -> String {
    let base = base.trim_end_matches('/');
    if n <= 1 {
        format!("{}/", base)
    } else {
        format!("{}/{}/{}/", base, config.pagination_dir, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/atom.xml"), "/blog/atom.xml");
        assert_eq!(url_for(&config, "about/"), "/blog/about/");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_full_url() {
        let config = test_config();
        assert_eq!(
            full_url(&config, "/blog/about/"),
            "https://example.com/blog/about/"
        );
    }

    #[test]
    fn test_term_path() {
        let config = test_config();
        assert_eq!(term_path(&config, "tags", "linux-kernel"), "/blog/tags/linux-kernel/");
        assert_eq!(
            term_path(&config, "categories", "devops/ci-cd"),
            "/blog/categories/devops/ci-cd/"
        );
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn test_output_key() {
        assert_eq!(output_key("/tags/"), "/tags/index.html");
        assert_eq!(output_key("/tags/index.html"), "/tags/index.html");
        assert_eq!(output_key("/atom.xml"), "/atom.xml");
    }

    #[test]
    fn test_page_path() {
        let config = test_config();
        assert_eq!(page_path(&config, "/blog/", 1), "/blog/");
        assert_eq!(page_path(&config, "/blog/", 3), "/blog/page/3/");
        assert_eq!(page_path(&config, "/blog/tags/c/", 2), "/blog/tags/c/page/2/");
    }
}
