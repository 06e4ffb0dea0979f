//! Validate the content without writing output

use anyhow::Result;

use crate::index::ContentIndex;
use crate::Site;

/// Human-readable report of every diagnostic in the index
pub fn report(index: &ContentIndex) -> String {
    let mut out = String::new();
    for diagnostic in index.diagnostics() {
        out.push_str(&format!("  {}\n", diagnostic));
    }
    out.push_str(&format!(
        "{} published, {} skipped, {} problem(s)\n",
        index.len(),
        index.skipped(),
        index.diagnostics().len()
    ));
    out
}

/// Load and index the site, print diagnostics, fail when there are any
pub fn run(site: &Site) -> Result<()> {
    let index = site.default_index();
    print!("{}", report(&index));

    if !index.diagnostics().is_empty() {
        anyhow::bail!("{} problem(s) found", index.diagnostics().len());
    }

    Ok(())
}
