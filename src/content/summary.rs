//! Summary break handling

/// The literal marker separating a post's teaser from the rest of its body
pub const SUMMARY_MARKER: &str = "<!--more-->";

/// A body split at the first summary break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary<'a> {
    /// Text before the marker, or the whole body when there is none
    pub summary: &'a str,
    /// Text after the marker; later markers are kept verbatim
    pub remainder: &'a str,
    has_break: bool,
}

impl Summary<'_> {
    /// Whether the body contained a summary break
    pub fn has_break(&self) -> bool {
        self.has_break
    }
}

/// Split a body at the first `<!--more-->`
pub fn split_summary(body: &str) -> Summary<'_> {
    match body.find(SUMMARY_MARKER) {
        Some(pos) => Summary {
            summary: &body[..pos],
            remainder: &body[pos + SUMMARY_MARKER.len()..],
            has_break: true,
        },
        None => Summary {
            summary: body,
            remainder: "",
            has_break: false,
        },
    }
}

/// The body with the first marker removed, for full-page rendering
pub fn strip_marker(body: &str) -> String {
    let parts = split_summary(body);
    if parts.has_break() {
        format!("{}{}", parts.summary, parts.remainder)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_marker() {
        let parts = split_summary("Intro<!--more-->Rest");
        assert_eq!(parts.summary, "Intro");
        assert_eq!(parts.remainder, "Rest");
        assert!(parts.has_break());
    }

    #[test]
    fn test_single_marker_concatenates_back() {
        let bodies = [
            "Teaser paragraph.\n\n<!--more-->\n\n## Details\n\nMore text.\n",
            "<!--more-->everything after",
            "everything before<!--more-->",
            "ünïcödé 前言<!--more-->正文",
        ];
        for body in bodies {
            let parts = split_summary(body);
            assert_eq!(
                format!("{}{}{}", parts.summary, SUMMARY_MARKER, parts.remainder),
                body
            );
        }
    }

    #[test]
    fn test_no_marker() {
        let body = "No break here.\n<!-- more -->\nspaced variant is not a break\n";
        let parts = split_summary(body);
        assert_eq!(parts.summary, body);
        assert_eq!(parts.remainder, "");
        assert!(!parts.has_break());

        let empty = split_summary("");
        assert_eq!(empty.summary, "");
        assert_eq!(empty.remainder, "");
    }

    #[test]
    fn test_only_first_marker_honored() {
        let parts = split_summary("A<!--more-->B<!--more-->C");
        assert_eq!(parts.summary, "A");
        assert_eq!(parts.remainder, "B<!--more-->C");
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("A<!--more-->B<!--more-->C"), "AB<!--more-->C");
        assert_eq!(strip_marker("plain"), "plain");
    }
}
