//! Small string helpers shared by the parser and the renderers.

/// Escape the characters that are significant in HTML text and attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Remove common leading indentation from a multi-line string.
///
/// Leading blank lines are dropped; whitespace-only lines do not count
/// towards the common indentation and come out empty.
pub fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };

    let min_indent = lines[start..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines[start..]
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                &l[min_indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join symbol path components with `.`.
pub fn join_dotted<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_markup() {
        assert_eq!(html_escape("a < b && \"c\""), "a &lt; b &amp;&amp; &quot;c&quot;");
    }

    #[test]
    fn unindent_basic() {
        assert_eq!(unindent("  a\n  b\n  c"), "a\nb\nc");
    }

    #[test]
    fn unindent_mixed() {
        assert_eq!(unindent("  a\n    b\n  c"), "a\n  b\nc");
    }

    #[test]
    fn unindent_empty_first() {
        assert_eq!(unindent("\n  a\n  b"), "a\nb");
    }

    #[test]
    fn unindent_blank_line_inside() {
        assert_eq!(unindent("    a\n\n    b"), "a\n\nb");
        assert_eq!(unindent("    a\n  \n    b"), "a\n\nb");
    }

    #[test]
    fn unindent_all_blank() {
        assert_eq!(unindent("\n   \n"), "");
    }

    #[test]
    fn dotted() {
        assert_eq!(join_dotted(&["std", "io", "File"]), "std.io.File");
        assert_eq!(join_dotted::<&str>(&[]), "");
    }
}
