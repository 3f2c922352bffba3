//! Section parser: line-by-line state machine over an undecorated comment.
//!
//! The first paragraph becomes `Summary`, the prose after it `Description`.
//! A line of the form `Name:` (optionally followed by text) starts a named
//! section. `---` fences delimit code, which is emitted pre-formatted and is
//! never scanned for section headers. Content is HTML-escaped here so the
//! renderers can place it verbatim; `Macros` definitions are kept raw since
//! their values are markup.

use crate::model::{Comment, Section, SectionKind};
use crate::text::{html_escape, unindent};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*([A-Za-z_][A-Za-z0-9_]*|See Also|see also):(?:[ \t]+(.*))?$").unwrap()
});

static RE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \t]*-{3,}[ \t]*$").unwrap());

static RE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*([A-Za-z_][A-Za-z0-9_]*)[ \t]*=[ \t]*(.*)$").unwrap());

// -- Parser state -------------------------------------------------------------

struct ParserState {
    sections: Vec<Section>,
    /// Name of the section currently being accumulated
    current: String,
    /// Escaped prose lines and finished code blocks of the current section
    lines: Vec<String>,
    in_code: bool,
    code: Vec<String>,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            current: "Summary".to_string(),
            lines: Vec::new(),
            in_code: false,
            code: Vec::new(),
        }
    }
}

// -- Public API ---------------------------------------------------------------

/// Parse an undecorated comment body into a `Comment`.
pub fn parse(text: &str) -> Comment {
    if text.trim().eq_ignore_ascii_case("ditto") {
        return Comment {
            sections: Vec::new(),
            is_ditto: true,
        };
    }

    let mut state = ParserState::default();
    for line in text.lines() {
        process_line(&mut state, line);
    }

    if state.in_code {
        close_code(&mut state);
    }
    flush(&mut state);

    Comment {
        sections: state.sections,
        is_ditto: false,
    }
}

// -- Line processing ----------------------------------------------------------

fn process_line(s: &mut ParserState, line: &str) {
    // 1. Code fences toggle verbatim mode
    if RE_FENCE.is_match(line) {
        if s.in_code {
            close_code(s);
        } else {
            // A fence ends the summary paragraph
            if in_summary(s) && has_content(s) {
                flush(s);
                s.current = "Description".to_string();
            }
            s.in_code = true;
        }
        return;
    }

    // 2. Inside code everything is kept as-is
    if s.in_code {
        s.code.push(line.to_string());
        return;
    }

    // 3. Section header
    if let Some(caps) = RE_HEADER.captures(line) {
        flush(s);
        s.current = caps[1].to_string();
        if let Some(rest) = caps.get(2) {
            push_text(s, rest.as_str());
        }
        return;
    }

    // 4. Blank line ends the summary paragraph
    if line.trim().is_empty() {
        if in_summary(s) {
            if has_content(s) {
                flush(s);
                s.current = "Description".to_string();
            }
            return;
        }
        s.lines.push(String::new());
        return;
    }

    // 5. Prose
    push_text(s, line);
}

fn push_text(s: &mut ParserState, text: &str) {
    if SectionKind::from_name(&s.current) == SectionKind::Macros {
        s.lines.push(text.to_string());
    } else {
        s.lines.push(html_escape(text));
    }
}

fn in_summary(s: &ParserState) -> bool {
    s.current == "Summary" && s.sections.is_empty()
}

fn has_content(s: &ParserState) -> bool {
    s.lines.iter().any(|l| !l.trim().is_empty())
}

fn close_code(s: &mut ParserState) {
    let code = unindent(&s.code.join("\n"));
    s.lines
        .push(format!("<pre><code>{}</code></pre>", html_escape(&code)));
    s.code.clear();
    s.in_code = false;
}

/// Finish the current section and append it to the result.
///
/// Empty opening prose is dropped; a named section is kept even when empty
/// because its header was written explicitly.
fn flush(s: &mut ParserState) {
    let lines = std::mem::take(&mut s.lines);
    let kind = SectionKind::from_name(&s.current);
    let content = lines.join("\n").trim().to_string();

    if kind.is_prose() && content.is_empty() {
        return;
    }

    let mapping = if kind == SectionKind::Params {
        parse_mapping(&lines)
    } else {
        Vec::new()
    };

    s.sections.push(Section {
        name: s.current.clone(),
        content,
        mapping,
    });
}

/// Parse `name = description` lines; other non-blank lines continue the
/// previous description.
fn parse_mapping(lines: &[String]) -> Vec<(String, String)> {
    let mut mapping: Vec<(String, String)> = Vec::new();
    for line in lines {
        if let Some(caps) = RE_PARAM.captures(line) {
            mapping.push((caps[1].to_string(), caps[2].trim().to_string()));
        } else if let Some((_, value)) = mapping.last_mut() {
            let text = line.trim();
            if !text.is_empty() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(text);
            }
        }
    }
    mapping
}
