//! Content module - handles posts, front-matter and summary breaks

pub mod date;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod summary;

pub use error::{ContentError, Diagnostic};
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{normalize_path, Post};
pub use summary::{split_summary, Summary, SUMMARY_MARKER};
