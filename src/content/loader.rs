//! Content loader - loads posts from the source directory

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::{ContentError, Diagnostic, Post};

/// Result of one batch load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Valid posts, drafts included, sorted by source path
    pub posts: Vec<Post>,
    /// Files that could not become posts
    pub diagnostics: Vec<Diagnostic>,
}

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    source_dir: &'a Path,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(source_dir: &'a Path) -> Self {
        Self { source_dir }
    }

    /// Load every post under the source directory.
    /// Files are parsed in parallel; a bad file never fails the batch.
    pub fn load_posts(&self) -> LoadReport {
        let (files, walk_errors) = self.discover();
        tracing::debug!("Found {} markdown files", files.len());

        let results: Vec<(PathBuf, Result<Post, ContentError>)> = files
            .into_par_iter()
            .map(|relative| {
                let result = self.load_post(&relative);
                (relative, result)
            })
            .collect();

        let mut report = LoadReport {
            posts: Vec::new(),
            diagnostics: walk_errors,
        };
        for (relative, result) in results {
            match result {
                Ok(post) => report.posts.push(post),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", relative.display(), e);
                    report.diagnostics.push(Diagnostic::new(relative, e));
                }
            }
        }

        report.diagnostics.sort_by(|a, b| a.source.cmp(&b.source));
        report
    }

    /// Markdown files relative to the source directory, sorted, plus a
    /// diagnostic for every entry the walk could not read (dangling links,
    /// link loops, unreadable directories)
    pub fn discover(&self) -> (Vec<PathBuf>, Vec<Diagnostic>) {
        if !self.source_dir.exists() {
            tracing::warn!("Source directory {:?} does not exist", self.source_dir);
            return (Vec::new(), Vec::new());
        }

        let mut files = Vec::new();
        let mut diagnostics = Vec::new();

        let walker = WalkDir::new(self.source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e));

        for entry in walker {
            match entry {
                Ok(e) => {
                    if e.file_type().is_file() && is_markdown_file(e.path()) {
                        files.push(self.relative(e.path()));
                    }
                }
                Err(e) => {
                    let source = e
                        .path()
                        .map(|p| self.relative(p))
                        .unwrap_or_else(|| self.source_dir.to_path_buf());
                    tracing::warn!("Cannot read {}: {}", source.display(), e);
                    diagnostics.push(Diagnostic::new(source, ContentError::Io(e.into())));
                }
            }
        }

        files.sort();
        (files, diagnostics)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.source_dir)
            .unwrap_or(path)
            .to_path_buf()
    }

    /// Load a single post from a file
    fn load_post(&self, relative: &Path) -> Result<Post, ContentError> {
        let content = fs::read_to_string(self.source_dir.join(relative))?;
        let source = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Post::from_source(&source, &content)
    }
}

/// Hidden entries and `_`-prefixed directories other than `_posts`
fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && name.starts_with('_') && name != "_posts"
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_posts_isolates_failures() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "_posts/good.md", "---\ntitle: Good\ndate: 2024-01-01\n---\nbody");
        write(dir.path(), "_posts/no-date.md", "---\ntitle: No date\n---\nbody");
        write(dir.path(), "_posts/bad-date.md", "---\ntitle: Bad\ndate: soon\n---\n");
        write(dir.path(), "notes/plain.md", "no front-matter at all");
        write(dir.path(), "notes/nested/deep.markdown", "---\ntitle: Deep\ndate: 2023-05-01\n---\n");
        write(dir.path(), "notes/image.png", "not markdown");

        let report = ContentLoader::new(dir.path()).load_posts();

        let sources: Vec<_> = report.posts.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, vec!["_posts/good.md", "notes/nested/deep.markdown"]);

        assert_eq!(report.diagnostics.len(), 3);
        let failed: Vec<_> = report
            .diagnostics
            .iter()
            .map(|d| d.source.to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            failed,
            vec!["_posts/bad-date.md", "_posts/no-date.md", "notes/plain.md"]
        );
        assert!(matches!(
            report.diagnostics[2].error,
            ContentError::MalformedFrontmatter { .. }
        ));
    }

    #[test]
    fn test_skips_hidden_and_underscore_dirs() {
        let dir = TempDir::new().unwrap();
        let post = "---\ntitle: T\ndate: 2024-01-01\n---\n";
        write(dir.path(), "_drafts/wip.md", post);
        write(dir.path(), ".git/notes.md", post);
        write(dir.path(), "_posts/kept.md", post);

        let (files, diagnostics) = ContentLoader::new(dir.path()).discover();
        assert_eq!(files, vec![PathBuf::from("_posts").join("kept.md")]);
        assert!(diagnostics.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entries_become_diagnostics() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "ok.md", "---\ntitle: Ok\ndate: 2024-01-01\n---\n");
        symlink(dir.path().join("missing.md"), dir.path().join("broken.md")).unwrap();
        symlink(dir.path(), dir.path().join("loop")).unwrap();

        let report = ContentLoader::new(dir.path()).load_posts();

        assert_eq!(report.posts.len(), 1);
        let failed: Vec<_> = report
            .diagnostics
            .iter()
            .map(|d| d.source.to_string_lossy().into_owned())
            .collect();
        assert_eq!(failed, vec!["broken.md", "loop"]);
        assert!(report
            .diagnostics
            .iter()
            .all(|d| matches!(d.error, ContentError::Io(_))));
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = TempDir::new().unwrap();
        let report = ContentLoader::new(&dir.path().join("nope")).load_posts();
        assert!(report.posts.is_empty());
        assert!(report.diagnostics.is_empty());
    }
}
