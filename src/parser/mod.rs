//! Parser module: comment decoration stripping and section parsing.

pub mod sections;

use crate::model::Comment;
use crate::text::unindent;
use regex::Regex;
use std::sync::LazyLock;

static RE_LINE_DOC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*///(.*)$").unwrap());

/// Parse a raw decorated doc comment into sections.
pub fn parse(raw: &str) -> Comment {
    sections::parse(&undecorate(raw))
}

/// Strip comment decoration: `///` prefixes, `/** */` and `/++ +/` delimiters
/// with their `*`/`+` gutters, then the common indentation.
///
/// Text without decoration passes through (apart from unindenting).
pub fn undecorate(raw: &str) -> String {
    let trimmed = raw.trim();

    let body = if let Some(marker) = block_marker(trimmed) {
        strip_block(trimmed, marker)
    } else {
        trimmed
            .lines()
            .map(|line| match RE_LINE_DOC.captures(line) {
                Some(caps) => caps[1].to_string(),
                None => line.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    unindent(&body).trim_end().to_string()
}

/// `*` for `/** */`, `+` for `/++ +/`.
fn block_marker(text: &str) -> Option<char> {
    if text.starts_with("/**") {
        Some('*')
    } else if text.starts_with("/++") {
        Some('+')
    } else {
        None
    }
}

fn strip_block(text: &str, marker: char) -> String {
    let closing = if marker == '*' { "*/" } else { "+/" };
    // The closing delimiter goes first: in `/**/` it shares the opening `*`.
    let inner = &text[2..];
    let inner = inner.strip_suffix(closing).unwrap_or(inner);
    let inner = inner.trim_start_matches(marker).trim_end_matches(marker);

    inner
        .lines()
        .enumerate()
        .map(|(i, line)| {
            // The first line follows the opening delimiter directly.
            if i == 0 {
                return line.to_string();
            }
            let rest = line.trim_start_matches([' ', '\t']);
            if rest.starts_with(marker) {
                rest.trim_start_matches(marker).to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
