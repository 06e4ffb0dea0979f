//! Post model

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use super::date::{format_date, parse_date};
use super::summary::{split_summary, Summary};
use super::{ContentError, FrontMatter};
use crate::config::SiteConfig;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Post title, never empty
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Last updated date
    pub updated: Option<DateTime<Local>>,

    /// Drafts never show up in listings
    pub draft: bool,

    /// Post tags, deduplicated case-insensitively
    pub tags: Vec<String>,

    /// Post categories, hierarchy root first
    pub categories: Vec<String>,

    pub author: Option<String>,

    /// Meta description, also the excerpt fallback
    pub description: Option<String>,

    /// Explicit output path
    pub url: Option<String>,

    /// Custom "read more" label
    pub more_link: Option<String>,

    /// Custom front-matter fields
    pub extra: IndexMap<String, serde_yaml::Value>,

    /// Source file path relative to the source directory, `/` separated
    pub source: String,

    /// Slug (URL-friendly name), taken from the file name
    pub slug: String,

    /// Raw markdown after the front-matter
    pub body: String,
}

impl Post {
    /// Parse and validate a post from its file contents
    pub fn from_source(source: &str, content: &str) -> Result<Self, ContentError> {
        let (fm, body) = FrontMatter::parse(content)?;

        let title = fm
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ContentError::MissingRequiredField("title"))?
            .to_string();

        let date = match fm.date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => parse_date(value)?,
            _ => return Err(ContentError::MissingRequiredField("date")),
        };

        let updated = match fm.updated.as_deref() {
            Some(value) => match parse_date(value) {
                Ok(dt) => Some(dt),
                Err(e) => {
                    tracing::warn!("{}: ignoring `updated`: {}", source, e);
                    None
                }
            },
            None => None,
        };

        let slug = Path::new(source)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(slug::slugify)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slug::slugify(&title));

        Ok(Self {
            title,
            date,
            updated,
            draft: fm.draft,
            tags: dedup_terms(fm.tags),
            categories: clean_terms(fm.categories),
            author: fm.author,
            description: fm.description,
            url: fm.url.filter(|u| !u.trim().is_empty()),
            more_link: fm.more_link,
            extra: fm.extra,
            source: source.replace('\\', "/"),
            slug,
            body: body.to_string(),
        })
    }

    /// Front-matter that reproduces this post when parsed back
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter {
            title: Some(self.title.clone()),
            date: Some(format_date(&self.date)),
            updated: self.updated.as_ref().map(format_date),
            draft: self.draft,
            tags: self.tags.clone(),
            categories: self.categories.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            more_link: self.more_link.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Serialize back to a markdown file
    pub fn to_markdown(&self) -> Result<String, serde_yaml::Error> {
        let mut out = self.front_matter().to_yaml_block()?;
        out.push_str(&self.body);
        Ok(out)
    }

    /// Body split at the summary break
    pub fn parts(&self) -> Summary<'_> {
        split_summary(&self.body)
    }

    /// Text before `<!--more-->`, or the whole body
    pub fn summary(&self) -> &str {
        self.parts().summary
    }

    /// Text after `<!--more-->`, empty without a break
    pub fn remainder(&self) -> &str {
        self.parts().remainder
    }

    /// Teaser for listings: the summary when the author placed a break,
    /// else the description, else the whole body
    pub fn excerpt(&self) -> &str {
        let parts = self.parts();
        if parts.has_break() {
            return parts.summary;
        }
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => parts.summary,
        }
    }

    /// Whether this post belongs in public listings at `now`
    pub fn is_published(&self, now: &DateTime<Local>, include_future: bool) -> bool {
        !self.draft && (include_future || self.date <= *now)
    }

    /// Site-relative output path, `/`-prefixed
    pub fn output_path(&self, config: &SiteConfig) -> String {
        let relative = match &self.url {
            Some(url) => url.clone(),
            None => self.expand_permalink(&config.permalink),
        };
        normalize_path(&format!(
            "{}{}",
            config.root,
            relative.trim_start_matches('/')
        ))
    }

    fn expand_permalink(&self, pattern: &str) -> String {
        let category = self
            .categories
            .iter()
            .map(|c| slug::slugify(c))
            .collect::<Vec<_>>()
            .join("/");
        let date = &self.date;

        pattern
            .replace(":year", &date.format("%Y").to_string())
            .replace(":month", &date.format("%m").to_string())
            .replace(":day", &date.format("%d").to_string())
            .replace(":i_month", &date.format("%-m").to_string())
            .replace(":i_day", &date.format("%-d").to_string())
            .replace(":hour", &date.format("%H").to_string())
            .replace(":minute", &date.format("%M").to_string())
            .replace(":second", &date.format("%S").to_string())
            .replace(":title", &self.slug)
            .replace(":name", &self.slug)
            .replace(":category", &category)
    }
}

/// Trim, drop empties and collapse case-insensitive duplicates
fn dedup_terms(terms: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    clean_terms(terms)
        .into_iter()
        .filter(|t| seen.insert(t.to_lowercase()))
        .collect()
}

fn clean_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Leading slash, no doubled slashes or dot segments, trailing slash
/// unless the last segment is a file name
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();
    let mut out = format!("/{}", segments.join("/"));
    let is_file = segments.last().map(|s| s.contains('.')).unwrap_or(false);
    if !is_file && !out.ends_with('/') {
        out.push('/');
    }
    out
}
