//! Generator module - writes the static site from a content index

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use crate::content::summary::strip_marker;
use crate::content::MarkdownRenderer;
use crate::helpers::{
    escape_html, escape_xml, full_url, link_to, page_count, page_path, term_path, url_for,
};
use crate::index::{CategoryNode, ContentIndex, Entry};
use crate::Site;

/// What a generation pass produced
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Files written, feed and search index included
    pub files: usize,
    /// Output paths left unwritten because several posts claim them
    pub conflicts: Vec<String>,
}

/// Static site generator
pub struct Generator<'a> {
    site: &'a Site,
    markdown: MarkdownRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Generate the entire site
    pub fn generate(&self, index: &ContentIndex) -> Result<GenerateReport> {
        fs::create_dir_all(&self.site.public_dir)
            .with_context(|| format!("creating {:?}", self.site.public_dir))?;

        let mut report = GenerateReport::default();

        self.generate_post_pages(index, &mut report)?;
        self.generate_index_pages(index, &mut report)?;
        self.generate_tag_pages(index, &mut report)?;
        self.generate_category_pages(index, &mut report)?;
        self.generate_archive_page(index, &mut report)?;
        self.generate_atom_feed(index, &mut report)?;
        self.generate_search_index(index, &mut report)?;

        Ok(report)
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, index: &ContentIndex, report: &mut GenerateReport) -> Result<()> {
        for (i, entry) in index.listing().iter().enumerate() {
            if index.is_conflicting(&entry.path) {
                if !report.conflicts.contains(&entry.path) {
                    report.conflicts.push(entry.path.clone());
                }
                continue;
            }

            let post = &entry.post;
            let mut body = String::from("<article class=\"post\">\n");
            body.push_str(&format!(
                "<h1 class=\"post-title\">{}</h1>\n",
                escape_html(&post.title)
            ));
            body.push_str(&self.post_meta(index, entry));
            body.push_str(&format!(
                "<div class=\"post-content\">\n{}</div>\n",
                self.markdown.render_post(&post.body)
            ));

            let (older, newer) = index.neighbours(i);
            if older.is_some() || newer.is_some() {
                body.push_str("<nav class=\"post-nav\">\n");
                if let Some(newer) = newer {
                    body.push_str(&format!(
                        "<span class=\"next\">{}</span>\n",
                        link_to(&newer.path, &newer.post.title)
                    ));
                }
                if let Some(older) = older {
                    body.push_str(&format!(
                        "<span class=\"prev\">{}</span>\n",
                        link_to(&older.path, &older.post.title)
                    ));
                }
                body.push_str("</nav>\n");
            }
            body.push_str("</article>\n");

            let html = self.layout(&post.title, post.description.as_deref(), &body);
            self.write(&entry.path, &html, report)?;
        }

        Ok(())
    }

    /// Date, author, tags and categories line of a post
    fn post_meta(&self, index: &ContentIndex, entry: &Entry) -> String {
        let config = &self.site.config;
        let post = &entry.post;

        let mut html = String::from("<div class=\"post-meta\">\n");
        html.push_str(&self.time_tag(&post.date));
        if let Some(author) = post.author.as_deref() {
            html.push_str(&format!(
                "<span class=\"author\">{}</span>\n",
                escape_html(author)
            ));
        }

        if !post.tags.is_empty() {
            let links: Vec<String> = post
                .tags
                .iter()
                .map(|t| match index.tag(t) {
                    Some(term) => link_to(&term_path(config, &config.tag_dir, &term.slug), t),
                    None => escape_html(t),
                })
                .collect();
            html.push_str(&format!(
                "<span class=\"tags\">{}</span>\n",
                links.join(" ")
            ));
        }

        if !post.categories.is_empty() {
            let mut key = String::new();
            let mut links = Vec::new();
            for name in &post.categories {
                if !key.is_empty() {
                    key.push('/');
                }
                key.push_str(name);
                links.push(match index.category(&key) {
                    Some(node) => {
                        link_to(&term_path(config, &config.category_dir, &node.slug), name)
                    }
                    None => escape_html(name),
                });
            }
            html.push_str(&format!(
                "<span class=\"categories\">{}</span>\n",
                links.join(" &rsaquo; ")
            ));
        }

        html.push_str("</div>\n");
        html
    }

    /// Generate the home page listing with pagination
    fn generate_index_pages(&self, index: &ContentIndex, report: &mut GenerateReport) -> Result<()> {
        let config = &self.site.config;
        let entries: Vec<&Entry> = index.listing().iter().collect();
        self.write_listing(&url_for(config, ""), &config.title, "", &entries, report)
    }

    /// Generate the tag overview and one listing per tag
    fn generate_tag_pages(&self, index: &ContentIndex, report: &mut GenerateReport) -> Result<()> {
        let config = &self.site.config;

        let mut overview = String::from("<h1>Tags</h1>\n<ul class=\"tag-list\">\n");
        for term in index.tags() {
            overview.push_str(&format!(
                "<li>{} <span class=\"count\">{}</span></li>\n",
                link_to(&term_path(config, &config.tag_dir, &term.slug), &term.name),
                term.len()
            ));
        }
        overview.push_str("</ul>\n");
        let overview_path = url_for(config, &format!("{}/", config.tag_dir));
        self.write(&overview_path, &self.layout("Tags", None, &overview), report)?;

        for term in index.tags() {
            let base = term_path(config, &config.tag_dir, &term.slug);
            let heading = format!("Tag: {}", term.name);
            self.write_listing(&base, &heading, "", &index.term_posts(term), report)?;
        }

        Ok(())
    }

    /// Generate the category tree and one listing per category node
    fn generate_category_pages(
        &self,
        index: &ContentIndex,
        report: &mut GenerateReport,
    ) -> Result<()> {
        let config = &self.site.config;

        let mut overview = String::from("<h1>Categories</h1>\n");
        overview.push_str(&self.category_tree(index, None));
        let overview_path = url_for(config, &format!("{}/", config.category_dir));
        self.write(
            &overview_path,
            &self.layout("Categories", None, &overview),
            report,
        )?;

        for node in index.categories() {
            let base = term_path(config, &config.category_dir, &node.slug);
            let heading = format!("Category: {}", node.name);
            let intro = self.category_tree(index, Some(node.key.as_str()));
            self.write_listing(&base, &heading, &intro, &index.node_posts(node), report)?;
        }

        Ok(())
    }

    /// Nested list of the categories below `parent`
    fn category_tree(&self, index: &ContentIndex, parent: Option<&str>) -> String {
        let config = &self.site.config;
        let children: Vec<&CategoryNode> = index.subcategories(parent).collect();
        if children.is_empty() {
            return String::new();
        }

        let mut html = String::from("<ul class=\"category-list\">\n");
        for node in children {
            html.push_str(&format!(
                "<li>{} <span class=\"count\">{}</span>\n{}</li>\n",
                link_to(&term_path(config, &config.category_dir, &node.slug), &node.name),
                node.len(),
                self.category_tree(index, Some(node.key.as_str()))
            ));
        }
        html.push_str("</ul>\n");
        html
    }

    /// Generate the archive page
    fn generate_archive_page(&self, index: &ContentIndex, report: &mut GenerateReport) -> Result<()> {
        let config = &self.site.config;

        let mut body = String::from("<h1>Archives</h1>\n");
        for year in index.archives() {
            body.push_str(&format!("<h2>{}</h2>\n", year.year));
            for month in &year.months {
                let posts = index.month_posts(month);
                let Some(first) = posts.first() else {
                    continue;
                };
                body.push_str(&format!(
                    "<h3>{}</h3>\n<ul class=\"archive-list\">\n",
                    first.post.date.format("%B")
                ));
                for entry in posts {
                    body.push_str(&format!(
                        "<li>{} {}</li>\n",
                        self.time_tag(&entry.post.date).trim_end(),
                        link_to(&entry.path, &entry.post.title)
                    ));
                }
                body.push_str("</ul>\n");
            }
        }

        let path = url_for(config, &format!("{}/", config.archive_dir));
        self.write(&path, &self.layout("Archives", None, &body), report)
    }

    /// Write a paginated list of posts rooted at `base`
    fn write_listing(
        &self,
        base: &str,
        heading: &str,
        intro: &str,
        entries: &[&Entry],
        report: &mut GenerateReport,
    ) -> Result<()> {
        let config = &self.site.config;
        let per_page = config.per_page.max(1);
        let total_pages = page_count(entries.len(), per_page);

        for page_num in 1..=total_pages {
            let start = (page_num - 1) * per_page;
            let end = (start + per_page).min(entries.len());

            let mut body = format!("<h1>{}</h1>\n", escape_html(heading));
            if page_num == 1 {
                body.push_str(intro);
            }
            body.push_str("<ul class=\"post-list\">\n");
            for entry in &entries[start..end] {
                body.push_str(&self.listing_item(entry));
            }
            body.push_str("</ul>\n");

            if total_pages > 1 {
                body.push_str("<nav class=\"pagination\">\n");
                if page_num > 1 {
                    body.push_str(&link_to(&page_path(config, base, page_num - 1), "Newer"));
                    body.push('\n');
                }
                body.push_str(&format!(
                    "<span class=\"page-number\">{} / {}</span>\n",
                    page_num, total_pages
                ));
                if page_num < total_pages {
                    body.push_str(&link_to(&page_path(config, base, page_num + 1), "Older"));
                    body.push('\n');
                }
                body.push_str("</nav>\n");
            }

            let html = self.layout(heading, None, &body);
            self.write(&page_path(config, base, page_num), &html, report)?;
        }

        Ok(())
    }

    fn listing_item(&self, entry: &Entry) -> String {
        let config = &self.site.config;
        let post = &entry.post;

        let mut html = format!(
            "<li class=\"post-item\">\n<h2>{}</h2>\n",
            link_to(&entry.path, &post.title)
        );
        html.push_str(&self.time_tag(&post.date));
        html.push_str(&format!(
            "<div class=\"excerpt\">\n{}</div>\n",
            self.markdown.render(post.excerpt())
        ));
        if post.parts().has_break() {
            let label = post.more_link.as_deref().unwrap_or(&config.more_link);
            html.push_str(&format!(
                "<p class=\"more\">{}</p>\n",
                link_to(&format!("{}#more", entry.path), label)
            ));
        }
        html.push_str("</li>\n");
        html
    }

    /// Generate Atom feed
    fn generate_atom_feed(&self, index: &ContentIndex, report: &mut GenerateReport) -> Result<()> {
        let config = &self.site.config;
        let home = full_url(config, &url_for(config, ""));
        let feed_path = url_for(config, "atom.xml");
        let updated = index
            .listing()
            .first()
            .map(|e| e.post.updated.unwrap_or(e.post.date))
            .unwrap_or_else(Local::now);

        let mut feed = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            escape_xml(&full_url(config, &feed_path))
        ));
        feed.push_str(&format!("  <link href=\"{}\"/>\n", escape_xml(&home)));
        feed.push_str(&format!("  <updated>{}</updated>\n", updated.to_rfc3339()));
        feed.push_str(&format!("  <id>{}</id>\n", escape_xml(&home)));
        if !config.author.is_empty() {
            feed.push_str(&format!(
                "  <author>\n    <name>{}</name>\n  </author>\n",
                escape_xml(&config.author)
            ));
        }

        for entry in index.listing().iter().take(config.feed_limit) {
            let post = &entry.post;
            let link = full_url(config, &entry.path);
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", escape_xml(&link)));
            feed.push_str(&format!("    <id>{}</id>\n", escape_xml(&link)));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                post.date.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                post.updated.unwrap_or(post.date).to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(&self.markdown.plain_text(post.excerpt()))
            ));
            feed.push_str(&format!(
                "    <content type=\"html\">{}</content>\n",
                escape_xml(&self.markdown.render(&strip_marker(&post.body)))
            ));
            for tag in &post.tags {
                feed.push_str(&format!("    <category term=\"{}\"/>\n", escape_xml(tag)));
            }
            feed.push_str("  </entry>\n");
        }
        feed.push_str("</feed>\n");

        self.write(&feed_path, &feed, report)
    }

    /// Generate search index
    fn generate_search_index(&self, index: &ContentIndex, report: &mut GenerateReport) -> Result<()> {
        let search_data: Vec<serde_json::Value> = index
            .listing()
            .iter()
            .map(|e| {
                serde_json::json!({
                    "title": e.post.title,
                    "url": e.path,
                    "date": e.post.date.to_rfc3339(),
                    "tags": e.post.tags,
                    "categories": e.post.categories,
                    "excerpt": self.markdown.plain_text(e.post.excerpt()),
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&search_data)?;
        let path = url_for(&self.site.config, "search.json");
        self.write(&path, &json, report)?;
        tracing::info!("Generated search.json");
        Ok(())
    }

    fn time_tag(&self, date: &DateTime<Local>) -> String {
        format!(
            "<time datetime=\"{}\">{}</time>\n",
            date.to_rfc3339(),
            escape_html(&self.display_date(date))
        )
    }

    /// Format with the configured pattern, falling back to ISO dates when
    /// the pattern is not a valid strftime string
    fn display_date(&self, date: &DateTime<Local>) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.site.config.date_format)).is_err() {
            out = date.format("%Y-%m-%d").to_string();
        }
        out
    }

    /// Wrap a page body in the site chrome
    fn layout(&self, title: &str, description: Option<&str>, body: &str) -> String {
        let config = &self.site.config;
        let page_title = if title == config.title {
            escape_html(title)
        } else {
            format!("{} | {}", escape_html(title), escape_html(&config.title))
        };
        let description = description.unwrap_or(&config.description);

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<title>{page_title}</title>
<meta name="description" content="{description}">
<link rel="alternate" type="application/atom+xml" href="{feed}">
</head>
<body>
<header>
<a class="site-title" href="{home}">{site_title}</a>
<nav>{archives} {tags} {categories}</nav>
</header>
<main>
{body}</main>
</body>
</html>
"#,
            lang = escape_html(&config.language),
            description = escape_html(description),
            feed = escape_html(&url_for(config, "atom.xml")),
            home = escape_html(&url_for(config, "")),
            site_title = escape_html(&config.title),
            archives = link_to(&url_for(config, &format!("{}/", config.archive_dir)), "Archives"),
            tags = link_to(&url_for(config, &format!("{}/", config.tag_dir)), "Tags"),
            categories = link_to(
                &url_for(config, &format!("{}/", config.category_dir)),
                "Categories"
            ),
        )
    }

    /// Map a site path to a file under the public directory
    fn output_file(&self, url_path: &str) -> PathBuf {
        let root = self.site.config.root.as_str();
        let relative = url_path.strip_prefix(root).unwrap_or(url_path);

        let mut path = self.site.public_dir.clone();
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        if url_path.ends_with('/') {
            path.push("index.html");
        }
        path
    }

    fn write(&self, url_path: &str, content: &str, report: &mut GenerateReport) -> Result<()> {
        let path = self.output_file(url_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("writing {:?}", path))?;
        tracing::debug!("Generated: {:?}", path);
        report.files += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::index::IndexOptions;
    use tempfile::TempDir;

    fn site_with_posts(posts: &[(&str, &str)], config: SiteConfig) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path().to_path_buf(), config);
        for (name, content) in posts {
            let path = site.source_dir.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        (dir, site)
    }

    fn options() -> IndexOptions {
        IndexOptions {
            now: crate::content::date::parse_date("2025-01-01").unwrap(),
            include_future: false,
        }
    }

    #[test]
    fn test_generate_site() {
        let (_dir, site) = site_with_posts(
            &[
                (
                    "_posts/threads.md",
                    "---\ntitle: Thread pools in C\ndate: 2024-02-01\ntags: [C, Concurrency]\ncategories: [Linux, Kernel]\n---\nTeaser **text**.\n<!--more-->\nFull <details>.\n",
                ),
                (
                    "_posts/wip.md",
                    "---\ntitle: Secret draft\ndate: 2024-03-01\ndraft: true\ntags: [C]\n---\nnope\n",
                ),
                ("_posts/broken.md", "no front-matter"),
            ],
            SiteConfig::default(),
        );

        let index = site.index(&options());
        let report = Generator::new(&site).generate(&index).unwrap();
        assert!(report.conflicts.is_empty());

        let public = &site.public_dir;
        let post_html =
            fs::read_to_string(public.join("2024/02/01/threads/index.html")).unwrap();
        assert!(post_html.contains("<h1 class=\"post-title\">Thread pools in C</h1>"));
        assert!(post_html.contains("<strong>text</strong>"));
        assert!(!post_html.contains("<!--more-->"));
        assert!(post_html.contains(r#"<span id="more"></span>"#));
        assert!(post_html.contains(r#"href="/categories/linux/kernel/""#));

        let home = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(home.contains("Thread pools in C"));
        assert!(home.contains("/2024/02/01/threads/#more"));
        assert!(!home.contains("Secret draft"));

        assert!(public.join("tags/c/index.html").exists());
        assert!(public.join("tags/concurrency/index.html").exists());
        assert!(public.join("categories/linux/index.html").exists());
        assert!(public.join("categories/linux/kernel/index.html").exists());
        assert!(public.join("archives/index.html").exists());
        assert!(!public.join("2024/03/01/wip").exists());

        let tag_page = fs::read_to_string(public.join("tags/c/index.html")).unwrap();
        assert!(!tag_page.contains("Secret draft"));

        let feed = fs::read_to_string(public.join("atom.xml")).unwrap();
        assert!(feed.contains("<title>Thread pools in C</title>"));
        assert!(!feed.contains("Secret draft"));

        let search: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(public.join("search.json")).unwrap())
                .unwrap();
        assert_eq!(search.as_array().unwrap().len(), 1);
        assert_eq!(search[0]["url"], "/2024/02/01/threads/");
        assert_eq!(search[0]["excerpt"], "Teaser text.");
    }

    #[test]
    fn test_pagination() {
        let posts: Vec<(String, String)> = (1..=5)
            .map(|d| {
                (
                    format!("p{d}.md"),
                    format!("---\ntitle: Post {d}\ndate: 2024-01-0{d}\n---\nbody\n"),
                )
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = posts
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        let config = SiteConfig {
            per_page: 2,
            ..Default::default()
        };
        let (_dir, site) = site_with_posts(&borrowed, config);

        let index = site.index(&options());
        Generator::new(&site).generate(&index).unwrap();

        let public = &site.public_dir;
        let first = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(first.contains("Post 5") && first.contains("Post 4"));
        assert!(first.contains(r#"href="/page/2/""#));
        let third = fs::read_to_string(public.join("page/3/index.html")).unwrap();
        assert!(third.contains("Post 1"));
        assert!(!public.join("page/4/index.html").exists());
    }

    #[test]
    fn test_conflicting_paths_not_written() {
        let (_dir, site) = site_with_posts(
            &[
                ("a/same.md", "---\ntitle: First\ndate: 2024-01-01\n---\none\n"),
                ("b/same.md", "---\ntitle: Second\ndate: 2024-01-01\n---\ntwo\n"),
                ("ok.md", "---\ntitle: Fine\ndate: 2024-01-02\nurl: /fine.html\n---\nok\n"),
            ],
            SiteConfig::default(),
        );

        let index = site.index(&options());
        let report = Generator::new(&site).generate(&index).unwrap();

        assert_eq!(report.conflicts, vec!["/2024/01/01/same/".to_string()]);
        assert!(!site.public_dir.join("2024/01/01/same/index.html").exists());
        assert!(site.public_dir.join("fine.html").exists());
    }

    #[test]
    fn test_tags_with_same_slug_keep_separate_pages() {
        let (_dir, site) = site_with_posts(
            &[
                ("c.md", "---\ntitle: Pointers in C\ndate: 2024-01-01\ntags: [C]\n---\nc\n"),
                ("cpp.md", "---\ntitle: Templates in C++\ndate: 2024-01-02\ntags: [C++]\n---\ncpp\n"),
            ],
            SiteConfig::default(),
        );

        let index = site.index(&options());
        let report = Generator::new(&site).generate(&index).unwrap();
        assert!(report.conflicts.is_empty());

        let c_page = fs::read_to_string(site.public_dir.join("tags/c/index.html")).unwrap();
        assert!(c_page.contains("Pointers in C"));
        assert!(!c_page.contains("Templates in C++"));
        let cpp_page = fs::read_to_string(site.public_dir.join("tags/c-2/index.html")).unwrap();
        assert!(cpp_page.contains("Templates in C++"));

        let post = fs::read_to_string(site.public_dir.join("2024/01/02/cpp/index.html")).unwrap();
        assert!(post.contains(r#"href="/tags/c-2/""#));
    }

    #[test]
    fn test_post_on_generated_page_is_reported() {
        let (_dir, site) = site_with_posts(
            &[
                ("tags.md", "---\ntitle: My tags post\ndate: 2024-01-01\nurl: /tags/\n---\nx\n"),
                ("feed.md", "---\ntitle: Feed post\ndate: 2024-01-02\nurl: /atom.xml\n---\nx\n"),
                ("fine.md", "---\ntitle: Fine\ndate: 2024-01-03\ntags: [a]\n---\nok\n"),
            ],
            SiteConfig::default(),
        );

        let index = site.index(&options());
        assert_eq!(index.diagnostics().len(), 2);
        let report = Generator::new(&site).generate(&index).unwrap();

        let mut conflicts = report.conflicts.clone();
        conflicts.sort();
        assert_eq!(conflicts, vec!["/atom.xml".to_string(), "/tags/".to_string()]);

        let overview = fs::read_to_string(site.public_dir.join("tags/index.html")).unwrap();
        assert!(overview.contains("<h1>Tags</h1>"));
        assert!(!overview.contains("My tags post</h1>"));
        let feed = fs::read_to_string(site.public_dir.join("atom.xml")).unwrap();
        assert!(feed.starts_with("<?xml"));
    }

    #[test]
    fn test_root_prefix_and_escaping() {
        let config = SiteConfig {
            root: "/blog/".to_string(),
            title: "Ops & Notes".to_string(),
            ..Default::default()
        };
        let (_dir, site) = site_with_posts(
            &[("x.md", "---\ntitle: \"<script>\"\ndate: 2024-01-01\n---\nhi\n")],
            config,
        );

        let index = site.index(&options());
        Generator::new(&site).generate(&index).unwrap();

        let html =
            fs::read_to_string(site.public_dir.join("2024/01/01/x/index.html")).unwrap();
        assert!(html.contains("&lt;script&gt; | Ops &amp; Notes"));
        assert!(html.contains(r#"href="/blog/""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_empty_site_still_has_home() {
        let (_dir, site) = site_with_posts(&[], SiteConfig::default());
        let index = site.index(&options());
        Generator::new(&site).generate(&index).unwrap();
        assert!(site.public_dir.join("index.html").exists());
        assert!(site.public_dir.join("atom.xml").exists());
    }
}
