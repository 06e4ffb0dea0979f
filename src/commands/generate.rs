//! Generate static files

use anyhow::Result;
use std::time::Instant;

use crate::generator::{GenerateReport, Generator};
use crate::index::IndexOptions;
use crate::Site;

/// Load, index and render the site.
/// Fails after writing everything else when output paths conflict.
pub fn run(site: &Site, future: bool) -> Result<GenerateReport> {
    let start = Instant::now();

    let mut options = IndexOptions::from_config(&site.config);
    options.include_future |= future;

    let index = site.index(&options);
    tracing::info!(
        "Indexed {} posts ({} skipped, {} diagnostics)",
        index.len(),
        index.skipped(),
        index.diagnostics().len()
    );

    let report = Generator::new(site).generate(&index)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} files in {:.2}s",
        report.files,
        duration.as_secs_f64()
    );

    if !report.conflicts.is_empty() {
        anyhow::bail!(
            "{} output path(s) claimed by more than one post, rename or set `url:` on one of them: {}",
            report.conflicts.len(),
            report.conflicts.join(", ")
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_post(site: &Site, name: &str, content: &str) {
        let path = site.source_dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_drafts_never_published() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "render_drafts: true\n").unwrap();
        let site = Site::new(dir.path()).unwrap();
        write_post(&site, "_posts/a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nA\n");
        write_post(&site, "_posts/d.md", "---\ntitle: Hidden draft\ndate: 2024-01-02\ndraft: true\n---\nD\n");
        write_post(&site, "_posts/f.md", "---\ntitle: F\ndate: 2999-01-01\n---\nF\n");

        run(&site, false).unwrap();
        assert!(site.public_dir.join("2024/01/01/a/index.html").exists());
        assert!(!site.public_dir.join("2024/01/02/d/index.html").exists());
        assert!(!site.public_dir.join("2999/01/01/f/index.html").exists());

        run(&site, true).unwrap();
        assert!(site.public_dir.join("2999/01/01/f/index.html").exists());
        assert!(!site.public_dir.join("2024/01/02/d/index.html").exists());
        for file in ["index.html", "atom.xml", "search.json"] {
            let text = fs::read_to_string(site.public_dir.join(file)).unwrap();
            assert!(!text.contains("Hidden draft"), "{file}");
        }
    }

    #[test]
    fn test_run_fails_on_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        write_post(&site, "one.md", "---\ntitle: One\ndate: 2024-01-01\nurl: /same/\n---\n");
        write_post(&site, "two.md", "---\ntitle: Two\ndate: 2024-01-02\nurl: /same/\n---\n");
        write_post(&site, "three.md", "---\ntitle: Three\ndate: 2024-01-03\n---\n");

        let err = run(&site, false).unwrap_err();
        assert!(err.to_string().contains("/same/"));
        assert!(site.public_dir.join("2024/01/03/three/index.html").exists());
        assert!(!site.public_dir.join("same/index.html").exists());
    }
}
