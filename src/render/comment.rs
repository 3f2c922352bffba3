//! Comment renderer: turns one raw doc comment into HTML sections.
//!
//! Emission order:
//!
//! 1. the opening `Summary`/`Description` prose, without headings
//! 2. the contract block, when the declaration has one
//! 3. every other section under its own heading (`Params` as a table)
//! 4. one merged "See Also" block
//! 5. the usage examples
//!
//! `Macros` sections are never shown.

use crate::markup::{filter_comment, Markup};
use crate::model::{Comment, Example, Section, SectionKind};
use crate::parser;
use crate::render::contract::{write_contracts, Contract};
use crate::render::write_code_block;
use crate::text::{html_escape, unindent};

pub struct CommentRenderer<M> {
    markup: M,
}

impl<M: Markup> CommentRenderer<M> {
    pub fn new(markup: M) -> Self {
        Self { markup }
    }

    /// Render a raw decorated comment into `out` and return its one-line
    /// summary.
    ///
    /// `siblings` holds the comments of the preceding declarations in the
    /// same group and is updated in place (see [`resolve_ditto`]).
    pub fn render(
        &self,
        out: &mut String,
        raw: &str,
        siblings: Option<&mut Vec<Comment>>,
        contract: Option<&Contract<'_>>,
        examples: &[Example<'_>],
    ) -> String {
        let mut comment = parser::parse(raw);
        filter_comment(&mut comment, &self.markup);
        let comment = resolve_ditto(comment, siblings);
        self.render_parsed(out, &comment, contract, examples)
    }

    /// Render an already parsed and filtered comment.
    pub fn render_parsed(
        &self,
        out: &mut String,
        comment: &Comment,
        contract: Option<&Contract<'_>>,
        examples: &[Example<'_>],
    ) -> String {
        write_sections(out, comment, contract);

        for example in examples {
            out.push_str("<div class=\"section\"><h2>Example</h2>\n");
            self.render(out, example.comment, None, None, &[]);
            write_code_block(out, &html_escape(&unindent(example.body)));
            out.push_str("</div>\n");
        }

        summary(comment)
    }
}

/// Ditto resolution against the comments of sibling declarations.
///
/// A ditto comment is replaced by the last sibling comment, when there is
/// one. Any other comment becomes the new last sibling: it overwrites the
/// last slot, or is pushed when the list is empty.
pub fn resolve_ditto(comment: Comment, siblings: Option<&mut Vec<Comment>>) -> Comment {
    let Some(siblings) = siblings else {
        return comment;
    };

    if comment.is_ditto {
        if let Some(previous) = siblings.last() {
            tracing::debug!(sections = previous.sections.len(), "ditto comment resolved");
            return previous.clone();
        }
        return comment;
    }

    match siblings.last_mut() {
        Some(last) => *last = comment.clone(),
        None => siblings.push(comment.clone()),
    }
    comment
}

/// The text handed to index and listing pages: the summary if the comment
/// opens with one, otherwise the last `Returns` section.
pub fn summary(comment: &Comment) -> String {
    if let Some(first) = comment.sections.first() {
        if first.kind() == SectionKind::Summary {
            return first.content.clone();
        }
    }

    comment
        .sections
        .iter()
        .rev()
        .find(|s| s.kind() == SectionKind::Returns)
        .map(|s| format!("Returns: {}", s.content))
        .unwrap_or_default()
}

fn write_sections(out: &mut String, comment: &Comment, contract: Option<&Contract<'_>>) {
    let prose = comment
        .sections
        .iter()
        .take_while(|s| s.kind().is_prose())
        .count();
    let (leading, rest) = comment.sections.split_at(prose);

    for section in leading {
        out.push_str("<div class=\"section\">");
        out.push_str(&section.content);
        out.push_str("</div>\n");
    }

    if let Some(contract) = contract {
        write_contracts(out, contract);
    }

    let mut see_also: Vec<&Section> = Vec::new();
    for section in rest {
        match section.kind() {
            SectionKind::SeeAlso => see_also.push(section),
            SectionKind::Macros => {}
            kind => write_section(out, section, kind),
        }
    }

    write_see_also(out, &see_also);
}

fn write_section(out: &mut String, section: &Section, kind: SectionKind<'_>) {
    if let SectionKind::Custom(name) = kind {
        tracing::trace!(name, "rendering custom section");
    }

    if kind == SectionKind::Note {
        out.push_str("<div class=\"section note\">");
    } else {
        out.push_str("<div class=\"section\">");
    }

    if !kind.is_prose() {
        out.push_str(&format!("<h2>{}</h2>\n", kind.display_name()));
    }

    if kind == SectionKind::Params {
        write_params(out, &section.mapping);
    } else {
        out.push_str(&section.content);
    }

    out.push_str("</div>\n");
}

/// Two-column parameter table; cells are placed verbatim.
fn write_params(out: &mut String, mapping: &[(String, String)]) {
    out.push_str("<table class=\"params\">\n");
    for (name, doc) in mapping {
        out.push_str(&format!(
            "<tr class=\"param\"><td class=\"paramName\">{}</td><td class=\"paramDoc\">{}</td></tr>\n",
            name, doc
        ));
    }
    out.push_str("</table>\n");
}

/// All "see also" sections, whatever their spelling, merged in encounter
/// order under one heading.
fn write_see_also(out: &mut String, sections: &[&Section]) {
    let Some(first) = sections.first() else {
        return;
    };

    out.push_str("<div class=\"section seealso\">");
    out.push_str(&format!("<h2>{}</h2>\n", first.kind().display_name()));
    let contents: Vec<&str> = sections.iter().map(|s| s.content.as_str()).collect();
    out.push_str(&contents.join("\n"));
    out.push_str("</div>\n");
}
