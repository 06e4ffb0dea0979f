//! Helper functions shared by the generator
//!
//! URL building for term pages and escaping for HTML and XML output.

mod html;
mod url;

pub use html::*;
pub use url::*;
