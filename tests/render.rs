use pretty_assertions::assert_eq;
use std::collections::HashMap;
use symdoc::render::nav;
use symdoc::{Comment, CommentRenderer, Contract, Example, MacroMarkup, Section};

fn renderer() -> CommentRenderer<MacroMarkup> {
    CommentRenderer::new(MacroMarkup::default())
}

fn render(raw: &str) -> (String, String) {
    let mut out = String::new();
    let summary = renderer().render(&mut out, raw, None, None, &[]);
    (out, summary)
}

const OPEN_DOC: &str = "\
/**
 * Opens a file.
 *
 * The file is created when missing.
 *
 * Params:
 *     path = the $(B file) path
 *     mode = open mode
 *
 * Returns: a `File` handle
 * See_Also: close
 * Note: not thread safe
 * See Also: read
 * Macros:
 *     HIDDEN = never shown
 */";

#[test]
fn full_comment() {
    let (html, summary) = render(OPEN_DOC);
    assert_eq!(
        html,
        "<div class=\"section\">Opens a file.</div>\n\
         <div class=\"section\">The file is created when missing.</div>\n\
         <div class=\"section\"><h2>Parameters</h2>\n\
         <table class=\"params\">\n\
         <tr class=\"param\"><td class=\"paramName\">path</td><td class=\"paramDoc\">the <b>file</b> path</td></tr>\n\
         <tr class=\"param\"><td class=\"paramName\">mode</td><td class=\"paramDoc\">open mode</td></tr>\n\
         </table>\n\
         </div>\n\
         <div class=\"section\"><h2>Returns</h2>\na <code>File</code> handle</div>\n\
         <div class=\"section note\"><h2>Note:</h2>\nnot thread safe</div>\n\
         <div class=\"section seealso\"><h2>See Also:</h2>\nclose\nread</div>\n"
    );
    assert_eq!(summary, "Opens a file.");
}

#[test]
fn comment_macros_apply_to_their_comment() {
    let (html, _) = render("Uses $(HELLO world).\n\nMacros:\n    HELLO = <em>$0</em>");
    assert_eq!(html, "<div class=\"section\">Uses <em>world</em>.</div>\n");

    // Definitions do not leak into the next comment.
    let (html, _) = render("Uses $(HELLO world).");
    assert_eq!(html, "<div class=\"section\">Uses world.</div>\n");
}

#[test]
fn deeply_nested_macros_render() {
    let raw = format!("{}x{}", "$(B ".repeat(2000), ")".repeat(2000));
    let (html, _) = render(&raw);
    assert!(html.starts_with("<div class=\"section\"><b><b>"));
    assert!(html.contains(">x<"));
}

#[test]
fn ditto_renders_like_previous_comment() {
    let r = renderer();
    let mut siblings = Vec::new();

    let mut first = String::new();
    r.render(&mut first, OPEN_DOC, Some(&mut siblings), None, &[]);

    let mut ditto = String::new();
    let summary = r.render(&mut ditto, "/// ditto", Some(&mut siblings), None, &[]);

    let mut direct = String::new();
    r.render(&mut direct, OPEN_DOC, None, None, &[]);

    assert_eq!(ditto, direct);
    assert_eq!(ditto, first);
    assert_eq!(summary, "Opens a file.");
    assert_eq!(siblings.len(), 1);
}

#[test]
fn ditto_chain_follows_last_non_ditto() {
    let r = renderer();
    let mut siblings = Vec::new();
    let mut out = String::new();

    r.render(&mut out, "/// First.", Some(&mut siblings), None, &[]);
    r.render(&mut out, "/// Second.", Some(&mut siblings), None, &[]);
    out.clear();
    r.render(&mut out, "/// ditto", Some(&mut siblings), None, &[]);

    assert_eq!(out, "<div class=\"section\">Second.</div>\n");
}

#[test]
fn see_also_spellings_merge_once() {
    let (html, _) = render("Summary.\n\nSee_also: a\nReturns: r\nsee also: b\nSee_Also: c");
    assert_eq!(html.matches("<h2>See Also:</h2>").count(), 1);
    assert!(html.ends_with("<div class=\"section seealso\"><h2>See Also:</h2>\na\nb\nc</div>\n"));
}

#[test]
fn fenced_code_is_not_marked_up() {
    let raw = "Summary.\n\n---\nwriteln(`$(B raw)`);\n---";
    let (html, _) = render(raw);
    assert!(html.contains("<pre><code>writeln(`$(B raw)`);</code></pre>"));
    assert!(!html.contains("<b>raw</b>"));
}

#[test]
fn user_macros_are_applied() {
    let mut macros = HashMap::new();
    macros.insert("SYM".to_string(), "<a href=\"$1.html\">$1</a>".to_string());
    let r = CommentRenderer::new(MacroMarkup::new(macros));
    let mut out = String::new();
    r.render(&mut out, "/// See $(SYM std.io).", None, None, &[]);
    assert_eq!(
        out,
        "<div class=\"section\">See <a href=\"std.io.html\">std.io</a>.</div>\n"
    );
}

#[test]
fn returns_summary_without_leading_summary() {
    let comment = Comment {
        sections: vec![
            Section::new("Description", "..."),
            Section::new("Returns", "a handle"),
        ],
        is_ditto: false,
    };
    let mut out = String::new();
    let summary = renderer().render_parsed(&mut out, &comment, None, &[]);
    assert_eq!(summary, "Returns: a handle");
}

#[test]
fn contract_and_example_placement() {
    let pre = "in { assert(path.length); }".to_string();
    let contract = Contract {
        precondition: Some(&pre),
        postcondition: None,
    };
    let examples = [Example {
        body: "\n    auto f = open(\"a\");\n",
        comment: "/// Basic use.",
    }];

    let mut out = String::new();
    renderer().render(
        &mut out,
        "/// Opens.\n///\n/// Returns: a handle",
        None,
        Some(&contract),
        &examples,
    );
    assert_eq!(
        out,
        "<div class=\"section\">Opens.</div>\n\
         <div class=\"section\"><h2>Contracts</h2>\n\
         <pre><code>in { assert(path.length); }</code></pre>\n\
         </div>\n\
         <div class=\"section\"><h2>Returns</h2>\na handle</div>\n\
         <div class=\"section\"><h2>Example</h2>\n\
         <div class=\"section\">Basic use.</div>\n\
         <pre><code>auto f = open(&quot;a&quot;);\n</code></pre>\n\
         </div>\n"
    );
}

#[test]
fn unknown_section_rendered_verbatim() {
    let (html, _) = render("Summary.\n\nThrows: FileException on error");
    assert!(html.contains("<div class=\"section\"><h2>Throws</h2>\nFileException on error</div>\n"));
}

#[test]
fn page_assembly_order() {
    let mut page = String::new();
    nav::write_header(&mut page, "std.io.File", 2);
    nav::write_toc(&mut page, &[], "std.io", None);
    nav::write_symbol_breadcrumbs(&mut page, 2, &["std", "io", "File"]);
    renderer().render(&mut page, "/// A file.", None, None, &[]);
    nav::write_footer(&mut page);

    let toc = page.find("<div class=\"toc\">").unwrap();
    let crumbs = page.find("<div class=\"breadcrumbs\">").unwrap();
    let body = page.find("A file.").unwrap();
    assert!(toc < crumbs && crumbs < body);
    assert!(page.contains("<base href=\"../../\"/>"));
    assert!(page.contains("<a href=\"std/io.html\">io</a>"));
    assert!(page.ends_with("</body>\n</html>\n"));
}
