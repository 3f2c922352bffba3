//! Page chrome: document preamble, table-of-contents sidebar and the
//! breadcrumb heading built from a symbol path.
//!
//! Pages are written in this order: `write_header`, `write_toc`,
//! `write_breadcrumbs` (or `write_symbol_breadcrumbs`), the body, then
//! `write_footer`.

use crate::text::{html_escape, join_dotted};

/// Page file extension used for every generated link.
pub const PAGE_EXTENSION: &str = "html";

/// A node of the externally built table of contents.
pub trait TocItem {
    /// Write this item; `current_module` lets an item highlight or expand
    /// itself on its own module's pages.
    fn write(&self, out: &mut String, current_module: &str);
}

/// Write the document preamble.
///
/// `depth` is how many directories the page sits below the output root; the
/// `<base>` element climbs back up so asset and page links resolve from the
/// root.
pub fn write_header(out: &mut String, title: &str, depth: usize) {
    let base = if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    };

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\"/>\n");
    out.push_str(&format!("<base href=\"{}\"/>\n", base));
    out.push_str("<link rel=\"stylesheet\" type=\"text/css\" href=\"style.css\"/>\n");
    out.push_str("<script src=\"highlight.pack.js\"></script>\n");
    out.push_str("<script src=\"search.js\"></script>\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("</head>\n<body>\n<div class=\"main\">\n");
}

/// Write the sidebar: optional free-form content, then the TOC items.
pub fn write_toc(
    out: &mut String,
    items: &[Box<dyn TocItem>],
    current_module: &str,
    additional: Option<&str>,
) {
    out.push_str("<div class=\"toc\">\n");
    if let Some(additional) = additional {
        out.push_str("<div class=\"toc-additional\">");
        out.push_str(additional);
        out.push_str("</div>\n");
    }
    out.push_str("<ul>\n");
    for item in items {
        item.write(out, current_module);
    }
    out.push_str("</ul>\n</div>\n");
}

/// Write the search box, home link and `heading`, then open the content
/// container. Must come after the TOC and before the page body.
pub fn write_breadcrumbs(out: &mut String, heading: &str) {
    out.push_str("<div class=\"breadcrumbs\">\n");
    out.push_str("<table id=\"results\"></table>\n");
    out.push_str("<a class=\"home\" href=\"index.html\">&#8962;</a>\n");
    out.push_str(
        "<input type=\"search\" id=\"search\" placeholder=\"Search\" \
         onkeyup=\"searchSubmit(this.value, event)\"/>\n",
    );
    out.push_str(heading);
    out.push_str("\n</div>\n<div class=\"content\">\n");
}

/// Breadcrumbs for the page of `stack`, whose first `module_len` components
/// name the module.
///
/// # Panics
///
/// If `module_len` exceeds the stack depth.
pub fn write_symbol_breadcrumbs<S: AsRef<str>>(out: &mut String, module_len: usize, stack: &[S]) {
    let heading = symbol_heading(module_len, stack);
    write_breadcrumbs(out, &heading);
}

/// Close the content container and the document.
pub fn write_footer(out: &mut String) {
    out.push_str("</div>\n</div>\n</body>\n</html>\n");
}

/// Build the breadcrumb heading.
///
/// `["std", "io", "File", "Mode"]` with a module length of 2 gives
/// `<small>std.<a href="std/io.html">io</a>.</small>` followed by
/// `<span class="highlight"><a href="std/io/File.html">File</a>.Mode</span>`.
/// On the module's own page the module path is plain text.
pub fn symbol_heading<S: AsRef<str>>(module_len: usize, stack: &[S]) -> String {
    assert!(
        module_len <= stack.len(),
        "module name length {} exceeds symbol stack depth {}",
        module_len,
        stack.len()
    );

    let parts: Vec<&str> = stack.iter().map(AsRef::as_ref).collect();
    let (module, decl) = parts.split_at(module_len);
    let module_path = module.join("/");
    let mut heading = String::new();

    if let Some((last, init)) = module.split_last() {
        heading.push_str("<small>");
        for part in init {
            heading.push_str(part);
            heading.push('.');
        }
        if decl.is_empty() {
            // The module's own page: nothing to link.
            heading.push_str(last);
            heading.push_str("</small>");
            return heading;
        }
        heading.push_str(&format!(
            "<a href=\"{}.{}\">{}</a>.",
            module_path, PAGE_EXTENSION, last
        ));
        heading.push_str("</small>");
    }

    let Some((current, parents)) = decl.split_last() else {
        return heading;
    };

    heading.push_str("<span class=\"highlight\">");
    for (i, part) in parents.iter().enumerate() {
        heading.push_str(&format!(
            "<a href=\"{}\">{}</a>.",
            decl_page(&module_path, &decl[..=i]),
            part
        ));
    }
    heading.push_str(current);
    heading.push_str("</span>");
    heading
}

/// Page path of a nested declaration: `<module/path>/<Outer.Inner>.html`.
fn decl_page(module_path: &str, decl: &[&str]) -> String {
    let name = join_dotted(decl);
    if module_path.is_empty() {
        format!("{}.{}", name, PAGE_EXTENSION)
    } else {
        format!("{}/{}.{}", module_path, name, PAGE_EXTENSION)
    }
}
