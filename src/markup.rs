//! Inline markup: the `Markup` trait with its section filter, plus a ddoc-style
//! macro engine used by default.

use crate::model::{Comment, SectionKind};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Marker the section parser emits for pre-formatted code. Sections that
/// contain it are never run through markup.
pub const CODE_MARKER: &str = "<pre><code";

/// Macros nested deeper than this expand to their bare arguments, with any
/// further calls inside them unwrapped rather than expanded.
const MAX_DEPTH: usize = 16;

static RE_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*([A-Za-z_][A-Za-z0-9_]*)[ \t]*=[ \t]*(.*)$").unwrap());

/// Built-in macro definitions; user definitions take priority.
const BUILTIN_MACROS: &[(&str, &str)] = &[
    ("B", "<b>$0</b>"),
    ("I", "<i>$0</i>"),
    ("U", "<u>$0</u>"),
    ("P", "<p>$0</p>"),
    ("BR", "<br>"),
    ("D", "<code>$0</code>"),
    ("RED", "<span class=\"red\">$0</span>"),
    ("LINK", "<a href=\"$0\">$0</a>"),
    ("LINK2", "<a href=\"$1\">$+</a>"),
    ("UL", "<ul>$0</ul>"),
    ("OL", "<ol>$0</ol>"),
    ("LI", "<li>$0</li>"),
    ("DL", "<dl>$0</dl>"),
    ("DT", "<dt>$0</dt>"),
    ("DD", "<dd>$0</dd>"),
    ("TABLE", "<table>$0</table>"),
    ("TR", "<tr>$0</tr>"),
    ("TH", "<th>$0</th>"),
    ("TD", "<td>$0</td>"),
    ("LPAREN", "("),
    ("RPAREN", ")"),
    ("DOLLAR", "$"),
];

/// Inline markup engine: a pure text-to-text transformation.
pub trait Markup {
    fn transform(&self, text: &str) -> String;

    /// Transform with the definitions of the comment's own `Macros` section
    /// in scope; they take priority over every other definition. Engines
    /// without macros ignore them.
    fn transform_with(&self, text: &str, local: &HashMap<String, String>) -> String {
        let _ = local;
        self.transform(text)
    }
}

impl<F> Markup for F
where
    F: Fn(&str) -> String,
{
    fn transform(&self, text: &str) -> String {
        self(text)
    }
}

/// Apply `markup` to every section of `comment` in place.
///
/// `Params` sections have their mapping values transformed instead of the
/// content. Sections already holding pre-formatted code are left untouched,
/// as are `Macros` sections, whose definitions apply to the rest of the
/// comment.
pub fn filter_comment<M: Markup + ?Sized>(comment: &mut Comment, markup: &M) {
    let local = local_definitions(comment);

    for section in &mut comment.sections {
        if section.kind() == SectionKind::Macros {
            continue;
        }
        if section.content.contains(CODE_MARKER) {
            tracing::trace!(section = %section.name, "skipping markup for pre-formatted code");
            continue;
        }
        if section.kind() == SectionKind::Params {
            for (_, value) in &mut section.mapping {
                *value = markup.transform_with(value, &local);
            }
        } else {
            section.content = markup.transform_with(&section.content, &local);
        }
    }
}

/// Definitions from every `Macros` section of `comment`, later ones winning.
fn local_definitions(comment: &Comment) -> HashMap<String, String> {
    comment
        .sections
        .iter()
        .filter(|s| s.kind() == SectionKind::Macros)
        .flat_map(|s| parse_definitions(&s.content))
        .collect()
}

/// ddoc-style macro expansion: `$(NAME args)` plus backtick code spans.
#[derive(Debug, Default, Clone)]
pub struct MacroMarkup {
    macros: HashMap<String, String>,
}

impl MacroMarkup {
    pub fn new(macros: HashMap<String, String>) -> Self {
        Self { macros }
    }

    fn lookup<'a>(&'a self, name: &str, local: &'a HashMap<String, String>) -> Option<&'a str> {
        local
            .get(name)
            .or_else(|| self.macros.get(name))
            .map(String::as_str)
            .or_else(|| {
                BUILTIN_MACROS
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, body)| *body)
            })
    }

    fn expand(&self, text: &str, depth: usize, local: &HashMap<String, String>) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(pos) = rest.find("$(") {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 2..];
            match matching_paren(after) {
                Some(end) => {
                    out.push_str(&self.expand_call(&after[..end], depth, local));
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str("$(");
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn expand_call(&self, inner: &str, depth: usize, local: &HashMap<String, String>) -> String {
        let name_end = inner
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(inner.len());
        let name = &inner[..name_end];
        if name.is_empty() {
            return format!("$({})", inner);
        }

        let raw_args = inner[name_end..].trim_start();
        if depth >= MAX_DEPTH {
            return unwrap_calls(raw_args);
        }

        // Arguments are expanded before the macro itself.
        let args = self.expand(raw_args, depth + 1, local);
        match self.lookup(name, local) {
            Some(body) => self.expand(&substitute(body, &args), depth + 1, local),
            None => {
                tracing::trace!(name, "undefined macro");
                args
            }
        }
    }
}

impl Markup for MacroMarkup {
    fn transform(&self, text: &str) -> String {
        self.transform_with(text, &HashMap::new())
    }

    fn transform_with(&self, text: &str, local: &HashMap<String, String>) -> String {
        self.expand(&code_spans(text), 0, local)
    }
}

/// Parse ddoc-style macro definitions: `NAME = value` lines, where indented
/// lines without `=` continue the previous value.
pub fn parse_definitions(text: &str) -> HashMap<String, String> {
    let mut macros = HashMap::new();
    let mut last: Option<String> = None;

    for line in text.lines() {
        if let Some(caps) = RE_DEFINITION.captures(line) {
            let name = caps[1].to_string();
            macros.insert(name.clone(), caps[2].trim_end().to_string());
            last = Some(name);
        } else if let Some(ref name) = last {
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if let Some(value) = macros.get_mut(name) {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(text);
            }
        }
    }

    macros
}

/// Byte offset of the `)` closing an already-opened parenthesis.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Replace every `$(NAME args)` call in `text` by its bare arguments, in a
/// single pass whatever the nesting depth.
fn unwrap_calls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // One entry per open parenthesis: whether it opened a macro call.
    let mut open: Vec<bool> = Vec::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("$(") {
            let name_end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if name_end > 0 {
                open.push(true);
                rest = after[name_end..].trim_start();
                continue;
            }
        }
        match c {
            '(' => open.push(false),
            ')' if open.pop() == Some(true) => {
                rest = &rest[1..];
                continue;
            }
            _ => {}
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Fill a macro body: `$0` all arguments, `$1`..`$9` comma-separated
/// arguments, `$+` everything after the first comma.
fn substitute(body: &str, args: &str) -> String {
    let parts: Vec<&str> = args.split(',').collect();
    let tail = args.split_once(',').map_or("", |(_, t)| t.trim_start());

    let mut out = String::with_capacity(body.len() + args.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('0') => {
                chars.next();
                out.push_str(args);
            }
            Some('+') => {
                chars.next();
                out.push_str(tail);
            }
            Some(d @ '1'..='9') => {
                chars.next();
                let idx = d as usize - '1' as usize;
                if let Some(part) = parts.get(idx) {
                    out.push_str(part.trim_start());
                }
            }
            _ => out.push('$'),
        }
    }
    out
}

/// Turn `text` spans into `<code>` elements. An unmatched backtick is kept.
fn code_spans(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('`') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('`') else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str("<code>");
        out.push_str(&after[..close]);
        out.push_str("</code>");
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
