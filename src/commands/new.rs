//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{FrontMatter, SUMMARY_MARKER};
use crate::Site;

/// Create a new post under `_posts`, returning its path
pub fn create_post(site: &Site, title: &str, draft: bool, path: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let date = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let stem = match path {
        Some(p) => p.trim_end_matches(".md").to_string(),
        None => slug::slugify(title),
    };
    if stem.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }
    if stem.contains(['/', '\\']) || stem.starts_with('.') {
        anyhow::bail!("Invalid post file name {:?}: must be a plain name", stem);
    }
    let target_dir = site.source_dir.join("_posts");
    fs::create_dir_all(&target_dir)?;
    let file_path = target_dir.join(format!("{}.md", stem));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // Load scaffold template
    let scaffold_path = site.base_dir.join("scaffolds").join("post.md");
    let content = if scaffold_path.exists() {
        let quoted_title = serde_yaml::to_string(title)?;
        let scaffold = fs::read_to_string(&scaffold_path)?;
        let has_draft_field = scaffold.contains("{{ draft }}");
        let content = scaffold
            .replace("{{ title }}", quoted_title.trim_end())
            .replace("{{ date }}", &date)
            .replace("{{ draft }}", &draft.to_string());
        if draft && !has_draft_field {
            mark_draft(content)?
        } else {
            content
        }
    } else {
        let fm = FrontMatter {
            title: Some(title.to_string()),
            date: Some(date),
            draft,
            ..Default::default()
        };
        format!("{}\n{}\n", fm.to_yaml_block()?, SUMMARY_MARKER)
    };

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Set `draft: true` in a scaffold that has no `{{ draft }}` placeholder
fn mark_draft(content: String) -> Result<String> {
    let (mut fm, body) = match FrontMatter::parse(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Scaffold front-matter unreadable, post not marked as draft: {}", e);
            return Ok(content);
        }
    };
    fm.draft = true;
    let mut out = fm.to_yaml_block()?;
    out.push_str(body);
    Ok(out)
}
