//! List site content

use anyhow::Result;

use crate::index::ContentIndex;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let index = site.default_index();
    print!("{}", render(&index, content_type)?);
    Ok(())
}

/// Text listing of one part of the index
pub fn render(index: &ContentIndex, content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            out.push_str(&format!("Posts ({}):\n", index.len()));
            for entry in index.listing() {
                out.push_str(&format!(
                    "  {} - {} [{}]\n",
                    entry.post.date.format("%Y-%m-%d"),
                    entry.post.title,
                    entry.post.source
                ));
            }
        }
        "tag" | "tags" => {
            let mut tags: Vec<_> = index.tags().collect();
            // most used first, then by name
            tags.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.key.cmp(&b.key)));
            out.push_str(&format!("Tags ({}):\n", tags.len()));
            for tag in tags {
                out.push_str(&format!("  {} ({})\n", tag.name, tag.len()));
            }
        }
        "category" | "categories" => {
            out.push_str(&format!("Categories ({}):\n", index.categories().count()));
            for cat in index.categories() {
                out.push_str(&format!(
                    "  {}{} ({})\n",
                    "  ".repeat(cat.depth),
                    cat.name,
                    cat.len()
                ));
            }
        }
        "archive" | "archives" => {
            out.push_str("Archives:\n");
            for year in index.archives() {
                let count: usize = year.months.iter().map(|m| index.month_posts(m).len()).sum();
                out.push_str(&format!("  {} ({})\n", year.year, count));
                for month in &year.months {
                    out.push_str(&format!(
                        "    {:02} ({})\n",
                        month.month,
                        index.month_posts(month).len()
                    ));
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category, archive",
                content_type
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::Post;
    use crate::index::IndexOptions;

    fn index() -> ContentIndex {
        let posts = [
            ("a.md", "2024-02-10", "tags: [rust, linux]\ncategories: [Linux, Kernel]\n"),
            ("b.md", "2024-01-05", "tags: [linux]\ncategories: [Linux]\n"),
            ("c.md", "2023-11-20", "tags: [go]\n"),
        ]
        .iter()
        .map(|(src, date, extra)| {
            let text = format!("---\ntitle: Post {src}\ndate: {date}\n{extra}---\n");
            Post::from_source(src, &text).unwrap()
        })
        .collect();

        let options = IndexOptions {
            now: crate::content::date::parse_date("2025-01-01").unwrap(),
            include_future: false,
        };
        ContentIndex::build(posts, &SiteConfig::default(), &options)
    }

    #[test]
    fn test_list_posts() {
        let text = render(&index(), "posts").unwrap();
        assert_eq!(
            text,
            "Posts (3):\n  2024-02-10 - Post a.md [a.md]\n  2024-01-05 - Post b.md [b.md]\n  2023-11-20 - Post c.md [c.md]\n"
        );
    }

    #[test]
    fn test_list_tags() {
        let text = render(&index(), "tag").unwrap();
        assert_eq!(text, "Tags (3):\n  linux (2)\n  go (1)\n  rust (1)\n");
    }

    #[test]
    fn test_list_categories() {
        let text = render(&index(), "category").unwrap();
        assert_eq!(text, "Categories (2):\n  Linux (2)\n    Kernel (1)\n");
    }

    #[test]
    fn test_list_archives() {
        let text = render(&index(), "archive").unwrap();
        assert_eq!(
            text,
            "Archives:\n  2024 (2)\n    02 (1)\n    01 (1)\n  2023 (1)\n    11 (1)\n"
        );
    }

    #[test]
    fn test_unknown_type() {
        assert!(render(&index(), "pages").is_err());
    }
}
