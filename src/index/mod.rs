//! Content index - chronological listing, tags, categories and archives
//!
//! The index is built once per batch from the loaded posts and is read-only
//! afterwards. Renderers borrow it; nothing in the crate keeps a global
//! registry of posts.
//!
//! Only published posts enter the index. Drafts, and future-dated posts unless
//! explicitly included, are counted in [`ContentIndex::skipped`] and otherwise
//! invisible to every listing.

use chrono::{DateTime, Datelike, Local};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::SiteConfig;
use crate::content::{ContentError, Diagnostic, Post};
use crate::helpers::{output_key, page_count, page_path, term_path, url_for};

/// Publication rules for one build
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Posts dated after this are unpublished unless `include_future`
    pub now: DateTime<Local>,
    pub include_future: bool,
}

impl IndexOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            now: Local::now(),
            include_future: config.future,
        }
    }

    fn publishes(&self, post: &Post) -> bool {
        post.is_published(&self.now, self.include_future)
    }
}

/// A published post together with its output path
#[derive(Debug, Clone)]
pub struct Entry {
    pub post: Post,
    /// Site-relative output path, see [`Post::output_path`]
    pub path: String,
}

/// A tag and the posts carrying it
#[derive(Debug, Clone)]
pub struct Term {
    /// Lowercased lookup key
    pub key: String,
    /// Spelling of the first occurrence in listing order
    pub name: String,
    /// URL segment, unique among tags (`c`, then `c-2` for `C++`)
    pub slug: String,
    posts: Vec<usize>,
}

impl Term {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// A node of the category hierarchy
#[derive(Debug, Clone)]
pub struct CategoryNode {
    /// Lowercased path, e.g. `linux/kernel`
    pub key: String,
    /// Display name of this level only
    pub name: String,
    pub parent: Option<String>,
    /// 0 for top-level categories
    pub depth: usize,
    /// `/`-joined URL segments, each unique among its siblings
    pub slug: String,
    posts: Vec<usize>,
}

impl CategoryNode {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ArchiveMonth {
    pub month: u32,
    posts: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct ArchiveYear {
    pub year: i32,
    /// Newest month first
    pub months: Vec<ArchiveMonth>,
}

/// Immutable index over the published posts of one batch
#[derive(Debug, Default)]
pub struct ContentIndex {
    entries: Vec<Entry>,
    tags: BTreeMap<String, Term>,
    categories: BTreeMap<String, CategoryNode>,
    archives: Vec<ArchiveYear>,
    by_path: HashMap<String, usize>,
    /// Output file key -> first post claiming it
    claims: HashMap<String, usize>,
    conflicts: HashSet<String>,
    skipped: usize,
    diagnostics: Vec<Diagnostic>,
}

impl ContentIndex {
    /// Build the index from a batch of posts
    pub fn build(posts: Vec<Post>, config: &SiteConfig, options: &IndexOptions) -> Self {
        let total = posts.len();
        let mut published: Vec<Post> = posts.into_iter().filter(|p| options.publishes(p)).collect();
        let skipped = total - published.len();

        // Newest first; same-date posts ordered by source path
        published.sort_by(|a, b| {
            (Reverse(a.date), &a.source).cmp(&(Reverse(b.date), &b.source))
        });

        let mut index = ContentIndex {
            skipped,
            ..Default::default()
        };

        for (i, post) in published.into_iter().enumerate() {
            let path = post.output_path(config);
            index.add_path(i, &path, &post.source);
            index.add_tags(i, &post);
            index.add_categories(i, &post);
            index.entries.push(Entry { post, path });
        }
        index.archives = build_archives(&index.entries);
        index.assign_tag_slugs();
        index.assign_category_slugs();
        index.reserve_generated_pages(config);

        tracing::debug!(
            "Indexed {} posts, {} tags, {} categories ({} skipped)",
            index.entries.len(),
            index.tags.len(),
            index.categories.len(),
            index.skipped
        );

        index
    }

    /// Attach diagnostics produced before indexing (e.g. by the loader)
    pub fn with_diagnostics(mut self, mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.append(&mut self.diagnostics);
        self.diagnostics = diagnostics;
        self
    }

    fn add_path(&mut self, i: usize, path: &str, source: &str) {
        self.by_path.entry(path.to_string()).or_insert(i);

        let key = output_key(path);
        match self.claims.get(&key) {
            Some(&first) => {
                let first = &self.entries[first];
                let first_source = first.post.source.clone();
                tracing::warn!("{} and {} both render to {}", first_source, source, path);
                self.conflicts.insert(first.path.clone());
                self.conflicts.insert(path.to_string());
                self.diagnostics.push(Diagnostic::new(
                    source,
                    ContentError::DuplicateUrl {
                        url: path.to_string(),
                        first: first_source,
                        second: source.to_string(),
                    },
                ));
            }
            None => {
                self.claims.insert(key, i);
            }
        }
    }

    /// Posts whose path is also a generated page (listing, term page, feed)
    /// lose it to that page and are reported
    fn reserve_generated_pages(&mut self, config: &SiteConfig) {
        for (page, label) in self.generated_pages(config) {
            let Some(&i) = self.claims.get(&output_key(&page)) else {
                continue;
            };
            let entry = &self.entries[i];
            if !self.conflicts.insert(entry.path.clone()) {
                continue;
            }
            tracing::warn!("{} renders to {}, which is the {}", entry.post.source, page, label);
            self.diagnostics.push(Diagnostic::new(
                entry.post.source.as_str(),
                ContentError::DuplicateUrl {
                    url: page,
                    first: label,
                    second: entry.post.source.clone(),
                },
            ));
        }
    }

    /// Every page the generator writes besides the posts themselves,
    /// with a human-readable label
    pub fn generated_pages(&self, config: &SiteConfig) -> Vec<(String, String)> {
        let per_page = config.per_page;
        let mut pages = Vec::new();
        let mut listing = |base: String, len: usize, label: String| {
            for n in 1..=page_count(len, per_page) {
                pages.push((page_path(config, &base, n), label.clone()));
            }
        };

        listing(url_for(config, ""), self.entries.len(), "home page".to_string());
        for term in self.tags.values() {
            listing(
                term_path(config, &config.tag_dir, &term.slug),
                term.len(),
                format!("page of tag {}", term.name),
            );
        }
        for node in self.categories.values() {
            listing(
                term_path(config, &config.category_dir, &node.slug),
                node.len(),
                format!("page of category {}", node.key),
            );
        }

        pages.push((url_for(config, &format!("{}/", config.tag_dir)), "tag overview".to_string()));
        pages.push((
            url_for(config, &format!("{}/", config.category_dir)),
            "category overview".to_string(),
        ));
        pages.push((
            url_for(config, &format!("{}/", config.archive_dir)),
            "archive page".to_string(),
        ));
        pages.push((url_for(config, "atom.xml"), "feed".to_string()));
        pages.push((url_for(config, "search.json"), "search index".to_string()));
        pages
    }

    fn assign_tag_slugs(&mut self) {
        let keys: Vec<String> = self.tags.keys().cloned().collect();
        let slugs = unique_slugs(&keys);
        for (key, slug) in keys.iter().zip(slugs) {
            if let Some(term) = self.tags.get_mut(key) {
                if slug::slugify(&term.key) != slug {
                    tracing::debug!("Tag {:?} is published as {:?}", term.name, slug);
                }
                term.slug = slug;
            }
        }
    }

    /// Parents are visited before children because keys sort by path prefix
    fn assign_category_slugs(&mut self) {
        let mut siblings: BTreeMap<Option<String>, Vec<String>> = BTreeMap::new();
        for node in self.categories.values() {
            siblings
                .entry(node.parent.clone())
                .or_default()
                .push(node.key.clone());
        }

        let mut segments: HashMap<String, String> = HashMap::new();
        for keys in siblings.values() {
            let names: Vec<String> = keys
                .iter()
                .map(|k| k.rsplit('/').next().unwrap_or(k).to_string())
                .collect();
            for (key, slug) in keys.iter().zip(unique_slugs(&names)) {
                segments.insert(key.clone(), slug);
            }
        }

        let keys: Vec<String> = self.categories.keys().cloned().collect();
        for key in keys {
            let Some(node) = self.categories.get(&key) else {
                continue;
            };
            let segment = segments.get(&key).cloned().unwrap_or_default();
            let slug = match node.parent.as_ref().and_then(|p| self.categories.get(p)) {
                Some(parent) => format!("{}/{}", parent.slug, segment),
                None => segment,
            };
            if let Some(node) = self.categories.get_mut(&key) {
                node.slug = slug;
            }
        }
    }

    fn add_tags(&mut self, i: usize, post: &Post) {
        for tag in &post.tags {
            let term = self
                .tags
                .entry(tag.to_lowercase())
                .or_insert_with_key(|key| Term {
                    key: key.clone(),
                    name: tag.clone(),
                    slug: String::new(),
                    posts: Vec::new(),
                });
            if term.posts.last() != Some(&i) {
                term.posts.push(i);
            }
        }
    }

    fn add_categories(&mut self, i: usize, post: &Post) {
        let mut parent: Option<String> = None;
        for (depth, name) in post.categories.iter().enumerate() {
            let key = match &parent {
                Some(p) => format!("{}/{}", p, name.to_lowercase()),
                None => name.to_lowercase(),
            };
            let node = self
                .categories
                .entry(key.clone())
                .or_insert_with(|| CategoryNode {
                    key: key.clone(),
                    name: name.clone(),
                    parent: parent.clone(),
                    depth,
                    slug: String::new(),
                    posts: Vec::new(),
                });
            if node.posts.last() != Some(&i) {
                node.posts.push(i);
            }
            parent = Some(key);
        }
    }

    /// Published posts, newest first
    pub fn listing(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All tags in key order
    pub fn tags(&self) -> impl Iterator<Item = &Term> {
        self.tags.values()
    }

    /// Case-insensitive tag lookup
    pub fn tag(&self, name: &str) -> Option<&Term> {
        self.tags.get(&name.trim().to_lowercase())
    }

    /// Posts carrying a tag, newest first
    pub fn tag_posts(&self, name: &str) -> Vec<&Entry> {
        self.tag(name)
            .map(|t| self.resolve_all(&t.posts))
            .unwrap_or_default()
    }

    pub fn term_posts(&self, term: &Term) -> Vec<&Entry> {
        self.resolve_all(&term.posts)
    }

    /// All category nodes; parents come before their children
    pub fn categories(&self) -> impl Iterator<Item = &CategoryNode> {
        self.categories.values()
    }

    /// Case-insensitive lookup by `/`-joined path, e.g. `Linux/Kernel`
    pub fn category(&self, path: &str) -> Option<&CategoryNode> {
        let key = path
            .split('/')
            .map(|s| s.trim().to_lowercase())
            .collect::<Vec<_>>()
            .join("/");
        self.categories.get(&key)
    }

    /// Posts filed under a category or any of its subcategories
    pub fn category_posts(&self, path: &str) -> Vec<&Entry> {
        self.category(path)
            .map(|c| self.resolve_all(&c.posts))
            .unwrap_or_default()
    }

    pub fn node_posts(&self, node: &CategoryNode) -> Vec<&Entry> {
        self.resolve_all(&node.posts)
    }

    /// Direct children of a category node, `None` for top-level nodes
    pub fn subcategories<'a>(
        &'a self,
        parent: Option<&'a str>,
    ) -> impl Iterator<Item = &'a CategoryNode> + 'a {
        self.categories
            .values()
            .filter(move |c| c.parent.as_deref() == parent)
    }

    /// Posts grouped by year and month, newest first
    pub fn archives(&self) -> &[ArchiveYear] {
        &self.archives
    }

    pub fn month_posts(&self, month: &ArchiveMonth) -> Vec<&Entry> {
        self.resolve_all(&month.posts)
    }

    /// The post rendered at `path`; the first one when paths conflict
    pub fn resolve(&self, path: &str) -> Option<&Entry> {
        self.by_path.get(path).map(|&i| &self.entries[i])
    }

    /// Post paths that are claimed by another post or a generated page
    pub fn is_conflicting(&self, path: &str) -> bool {
        self.conflicts.contains(path)
    }

    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Drafts and unpublished future posts left out of the index
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Non-fatal findings for this batch
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Previous (older) and next (newer) neighbours in the listing
    pub fn neighbours(&self, position: usize) -> (Option<&Entry>, Option<&Entry>) {
        let older = self.entries.get(position + 1);
        let newer = position
            .checked_sub(1)
            .and_then(|i| self.entries.get(i));
        (older, newer)
    }

    fn resolve_all(&self, positions: &[usize]) -> Vec<&Entry> {
        positions.iter().map(|&i| &self.entries[i]).collect()
    }
}

/// Slugify each name; a name whose slug is already taken gets the first free
/// `-N` suffix once every name has had a chance at its plain slug
fn unique_slugs(names: &[String]) -> Vec<String> {
    let bases: Vec<String> = names
        .iter()
        .map(|n| {
            let s = slug::slugify(n);
            if s.is_empty() {
                "_".to_string()
            } else {
                s
            }
        })
        .collect();

    let mut taken = HashSet::new();
    let mut slugs: Vec<Option<String>> = bases
        .iter()
        .map(|b| taken.insert(b.clone()).then(|| b.clone()))
        .collect();

    for (slot, base) in slugs.iter_mut().zip(&bases) {
        if slot.is_some() {
            continue;
        }
        let mut n = 2;
        let mut candidate = format!("{}-{}", base, n);
        while !taken.insert(candidate.clone()) {
            n += 1;
            candidate = format!("{}-{}", base, n);
        }
        *slot = Some(candidate);
    }

    slugs.into_iter().flatten().collect()
}

fn build_archives(entries: &[Entry]) -> Vec<ArchiveYear> {
    let mut years: Vec<ArchiveYear> = Vec::new();
    // entries are newest first, so years and months arrive in descending order
    for (i, entry) in entries.iter().enumerate() {
        let (year, month) = (entry.post.date.year(), entry.post.date.month());
        if years.last().map(|y| y.year) != Some(year) {
            years.push(ArchiveYear {
                year,
                months: Vec::new(),
            });
        }
        let Some(current) = years.last_mut() else {
            continue;
        };
        match current.months.last_mut() {
            Some(m) if m.month == month => m.posts.push(i),
            _ => current.months.push(ArchiveMonth {
                month,
                posts: vec![i],
            }),
        }
    }
    years
}
